//! SQL data type and column definitions.

use super::constraint::{ConstraintDef, ConstraintKind};
use super::Expr;

/// A canonical column type.
///
/// Spelling variants collapse onto one node: `int`, `int4` and `integer` all
/// parse to [`DataType::Integer`], so two type texts that mean the same
/// thing compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Integer types
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,

    // Floating point
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// Numeric with precision and scale.
    Numeric {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },

    // String types
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Text (variable length, no limit).
    Text,

    /// Fixed-length bit string.
    Bit(Option<u32>),
    /// Variable-length bit string.
    Varbit(Option<u32>),

    /// Binary string.
    Bytea,
    /// Boolean.
    Boolean,

    // Date/time types
    /// Date.
    Date,
    /// Time of day.
    Time {
        /// Fractional seconds precision.
        precision: Option<u8>,
        /// `WITH TIME ZONE`.
        with_time_zone: bool,
    },
    /// Timestamp.
    Timestamp {
        /// Fractional seconds precision.
        precision: Option<u8>,
        /// `WITH TIME ZONE`.
        with_time_zone: bool,
    },
    /// Time span, optionally restricted to some fields.
    Interval {
        /// Fields the value keeps, e.g. `DAY TO SECOND`.
        fields: Option<IntervalFields>,
        /// Fractional seconds precision.
        precision: Option<u8>,
    },

    // Document and identity types
    /// Textual JSON.
    Json,
    /// Binary JSON.
    Jsonb,
    /// UUID.
    Uuid,

    // Auto-incrementing integers
    /// `smallserial`.
    Smallserial,
    /// `serial`.
    Serial,
    /// `bigserial`.
    Bigserial,

    /// Array of the element type. Declared dimension sizes are not kept,
    /// PostgreSQL does not enforce them.
    Array(Box<DataType>),

    /// A user-defined or otherwise unrecognised type, e.g. an enum or a
    /// domain, with its optional type modifiers.
    Custom {
        /// Schema the type lives in.
        schema: Option<String>,
        /// Type name.
        name: String,
        /// Type modifiers, e.g. `(4326)` in `geometry(4326)`.
        modifiers: Vec<i64>,
    },

    /// A type with an explicit `COLLATE` clause.
    Collated {
        /// The collated type.
        data_type: Box<DataType>,
        /// Schema of the collation, e.g. `pg_catalog`.
        schema: Option<String>,
        /// Collation name, as written.
        collation: String,
    },
}

/// The field restriction of an `interval` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalFields {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    YearToMonth,
    DayToHour,
    DayToMinute,
    DayToSecond,
    HourToMinute,
    HourToSecond,
    MinuteToSecond,
}

impl IntervalFields {
    /// Looks up the restriction for `start [TO end]`, with lowercase field
    /// names. Returns `None` for a range PostgreSQL does not accept.
    #[must_use]
    pub fn from_range(start: &str, end: Option<&str>) -> Option<Self> {
        let fields = match (start, end) {
            ("year", None) => Self::Year,
            ("month", None) => Self::Month,
            ("day", None) => Self::Day,
            ("hour", None) => Self::Hour,
            ("minute", None) => Self::Minute,
            ("second", None) => Self::Second,
            ("year", Some("month")) => Self::YearToMonth,
            ("day", Some("hour")) => Self::DayToHour,
            ("day", Some("minute")) => Self::DayToMinute,
            ("day", Some("second")) => Self::DayToSecond,
            ("hour", Some("minute")) => Self::HourToMinute,
            ("hour", Some("second")) => Self::HourToSecond,
            ("minute", Some("second")) => Self::MinuteToSecond,
            _ => return None,
        };
        Some(fields)
    }

    /// Returns the SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::YearToMonth => "YEAR TO MONTH",
            Self::DayToHour => "DAY TO HOUR",
            Self::DayToMinute => "DAY TO MINUTE",
            Self::DayToSecond => "DAY TO SECOND",
            Self::HourToMinute => "HOUR TO MINUTE",
            Self::HourToSecond => "HOUR TO SECOND",
            Self::MinuteToSecond => "MINUTE TO SECOND",
        }
    }

    /// Returns true if the restriction ends in seconds, the only case that
    /// takes a precision.
    #[must_use]
    pub const fn ends_in_second(&self) -> bool {
        matches!(
            self,
            Self::Second | Self::DayToSecond | Self::HourToSecond | Self::MinuteToSecond
        )
    }
}

impl DataType {
    /// Wraps this type into a one-dimensional array of it.
    #[must_use]
    pub fn array(self) -> Self {
        Self::Array(Box::new(self))
    }

    /// Creates an unqualified custom type without modifiers.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom {
            schema: None,
            name: name.into(),
            modifiers: vec![],
        }
    }

    /// `timestamp` without time zone or precision.
    #[must_use]
    pub const fn timestamp() -> Self {
        Self::Timestamp {
            precision: None,
            with_time_zone: false,
        }
    }

    /// `interval` with no field restriction or precision.
    #[must_use]
    pub const fn interval() -> Self {
        Self::Interval {
            fields: None,
            precision: None,
        }
    }

    /// `timestamp with time zone` without precision.
    #[must_use]
    pub const fn timestamptz() -> Self {
        Self::Timestamp {
            precision: None,
            with_time_zone: true,
        }
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Column constraints, in source order.
    pub constraints: Vec<ConstraintDef>,
}

impl ColumnDef {
    /// Creates a new column definition without constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints: vec![],
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: ConstraintDef) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Returns true if the column carries a `NOT NULL` constraint.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ConstraintKind::NotNull))
    }

    /// Returns the default expression, if the column has one.
    #[must_use]
    pub fn default_expr(&self) -> Option<&Expr> {
        self.constraints.iter().find_map(|c| match &c.kind {
            ConstraintKind::Default(expr) => Some(expr),
            _ => None,
        })
    }
}
