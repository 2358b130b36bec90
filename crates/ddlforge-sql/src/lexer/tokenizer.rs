//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances while `pred` holds for the current character.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Consumes `expected` if it is the current character.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace, `-- line` comments and `/* block */` comments.
    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.eat_while(|c| c != '\n');
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.pos += 2;
                // Unterminated block comments swallow the rest of the input.
                match self.input[self.pos..].find("*/") {
                    Some(offset) => self.pos += offset + 2,
                    None => self.pos = self.input.len(),
                }
                continue;
            }

            break;
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Scans a bare identifier or keyword. The first character is consumed.
    fn scan_word(&mut self) -> Token {
        self.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a quoted run terminated by `quote`, where a doubled quote stands
    /// for one literal quote. The opening quote is consumed.
    fn scan_quoted(&mut self, quote: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.advance()? {
                c if c == quote => {
                    if self.eat(quote) {
                        value.push(quote);
                    } else {
                        return Some(value);
                    }
                }
                c => value.push(c),
            }
        }
    }

    /// Scans a number (integer or float). The first digit is consumed.
    fn scan_number(&mut self) -> Token {
        let mut is_float = false;
        self.eat_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.eat_while(|c| c.is_ascii_digit());
        }

        let text = &self.input[self.start..self.pos];
        if is_float {
            match text.parse::<f64>() {
                Ok(f) => self.make_token(TokenKind::Float(f)),
                Err(e) => self.error(format!("Invalid float: {e}")),
            }
        } else {
            match text.parse::<i64>() {
                Ok(i) => self.make_token(TokenKind::Integer(i)),
                Err(e) => self.error(format!("Invalid integer: {e}")),
            }
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            ':' if self.eat(':') => TokenKind::DoubleColon,
            '<' if self.eat('=') => TokenKind::LtEq,
            '<' if self.eat('>') => TokenKind::NotEq,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::GtEq,
            '>' => TokenKind::Gt,
            '!' if self.eat('=') => TokenKind::NotEq,
            '|' if self.eat('|') => TokenKind::Concat,
            '\'' => match self.scan_quoted('\'') {
                Some(value) => TokenKind::String(value),
                None => return self.error("Unterminated string literal"),
            },
            '"' => match self.scan_quoted('"') {
                Some(value) if value.is_empty() => {
                    return self.error("Zero-length quoted identifier");
                }
                Some(value) => TokenKind::QuotedIdentifier(value),
                None => return self.error("Unterminated quoted identifier"),
            },
            c if c.is_ascii_digit() => return self.scan_number(),
            c if c.is_alphabetic() || c == '_' => return self.scan_word(),
            c => return self.error(format!("Unexpected character: {c}")),
        };
        self.make_token(kind)
    }

    /// Tokenizes the entire input and returns all tokens, ending with `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(name.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("CREATE -- comment\nTABLE /* block */ t"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                ident("t"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(token_kinds("t /* never closed"), vec![ident("t"), TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            token_kinds("alter TaBlE"),
            vec![
                TokenKind::Keyword(Keyword::Alter),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers_keep_case() {
        assert_eq!(
            token_kinds("Users int4 tbl$1"),
            vec![ident("Users"), ident("int4"), ident("tbl$1"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds(r#""Column Name" "say ""hi""""#),
            vec![
                TokenKind::QuotedIdentifier("Column Name".to_string()),
                TokenKind::QuotedIdentifier(r#"say "hi""#.to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_zero_length_quoted_identifier() {
        assert!(matches!(token_kinds(r#""""#)[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds("'it''s' ''"),
            vec![
                TokenKind::String("it's".to_string()),
                TokenKind::String(String::new()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(token_kinds("'open")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 3.14 1e10"),
            vec![
                TokenKind::Integer(42),
                TokenKind::Float(3.14),
                TokenKind::Float(1e10),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_and_delimiters() {
        assert_eq!(
            token_kinds("( ) [ ] , ; . :: = <> != < <= > >= || + - * / %"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::DoubleColon,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_colon_is_an_error() {
        assert!(matches!(token_kinds(":x")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_array_type_tokens() {
        assert_eq!(
            token_kinds("int[]"),
            vec![
                TokenKind::Keyword(Keyword::Int),
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("DROP \"t\"").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 4));
        assert_eq!(tokens[1].span, Span::new(5, 8));
    }
}
