use crate::error::ScanError;

/// The kinds of tokens the scanner can produce.
/// The catalog documents only ever use this closed set: the four structural
/// brackets, the two separators, strings, and numbers. Booleans, null and
/// exponent notation are deliberately not part of the document format.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    NameSeparator,
    /// `,`
    ValueSeparator,
    /// A string literal, enclosed in double quotes. The payload holds the
    /// content of the string. Backslash escapes are not interpreted; the
    /// characters between the quotes are taken verbatim.
    String(String),
    /// A number literal: a maximal run of digits with at most one leading
    /// `-` and at most one `.`.
    Number(f64),
}

/// A token together with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Token {
        Token { kind, line }
    }
}

/// A character-by-character scanner over one catalog document.
///
/// The scanner holds only a cursor into the input and the current line
/// number, so every call to [`next_token`](Scanner::next_token) is
/// independent of the previous one. On a scan error the offending character
/// has already been consumed: calling `next_token` again always makes
/// progress, which the parser relies on for its retry loop.
pub struct Scanner<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
        }
    }

    /// The line the scanner is currently on, for diagnostics.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Produces the next token, or `Ok(None)` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        self.skip_whitespace();
        let line = self.line;

        let Some(ch) = self.advance() else {
            return Ok(None);
        };

        let kind = match ch {
            '{' => TokenKind::BeginObject,
            '}' => TokenKind::EndObject,
            '[' => TokenKind::BeginArray,
            ']' => TokenKind::EndArray,
            ':' => TokenKind::NameSeparator,
            ',' => TokenKind::ValueSeparator,
            '"' => self.read_string(line)?,
            c if c.is_ascii_digit() || c == '.' => self.read_number(c, line)?,
            '-' if self
                .peek()
                .is_some_and(|c| c.is_ascii_digit() || *c == '.') =>
            {
                self.read_number('-', line)?
            }
            _ => return Err(ScanError::IllegalCharacter { line, ch }),
        };

        Ok(Some(Token::new(kind, line)))
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next();
        if ch == Some('\n') {
            self.line += 1;
        }
        ch
    }

    fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_string(&mut self, line: usize) -> Result<TokenKind, ScanError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(TokenKind::String(value)),
                Some(c) => value.push(c),
                None => return Err(ScanError::UnterminatedString { line }),
            }
        }
    }

    fn read_number(&mut self, first_char: char, line: usize) -> Result<TokenKind, ScanError> {
        let mut number_str = String::new();
        number_str.push(first_char);
        let mut has_dot = first_char == '.';

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                number_str.push(*c);
                self.advance();
            } else if *c == '.' && !has_dot {
                has_dot = true;
                number_str.push('.');
                self.advance();
            } else {
                break;
            }
        }

        match number_str.parse::<f64>() {
            Ok(num) => Ok(TokenKind::Number(num)),
            Err(_) => Err(ScanError::MalformedNumber {
                line,
                text: number_str,
            }),
        }
    }
}
