use kiu_common::{Diagnostic, DiagnosticBag, Span};
use tracing::{debug, trace};

use super::classify::{
    is_binary_digit, is_decimal_digit, is_hex_digit, is_identifier_char, is_octal_digit,
    is_utf8_continuation, is_whitespace,
};
use super::cursor::Cursor;
use super::stream::TokenStream;
use super::token::{NumberKind, Token, TokenKind};

/// Hand-written lexer for the Kiu language.
///
/// Every operator is recognized with at most one byte of lookahead past
/// its first byte. Lexical problems are reported to the diagnostic bag
/// and never stop the scan.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    diagnostics: DiagnosticBag,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            cursor: Cursor::new(source),
            diagnostics: DiagnosticBag::new(),
        }
    }

    /// Drain the whole source into a token stream.
    ///
    /// The stream never contains `Eof`; an empty stream means the input
    /// held nothing but trivia.
    pub fn lex(mut self) -> (TokenStream, DiagnosticBag) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            trace!(kind = %token.kind, span = %token.span, "token");
            tokens.push(token);
        }
        debug!(
            bytes = self.cursor.len(),
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "lexed source"
        );
        (TokenStream::from(tokens), self.diagnostics)
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &DiagnosticBag {
        &self.diagnostics
    }

    /// Scan the next token, or `Eof` once the input is drained.
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.cursor.offset();
        let Some(b) = self.cursor.advance() else {
            return Token::eof(Span::point(start));
        };

        match b {
            // === Operators (one byte of lookahead) ===
            b'+' => {
                if self.cursor.eat(b'+') {
                    self.make_token(TokenKind::PlusPlus, start)
                } else if self.cursor.eat(b'=') {
                    self.make_token(TokenKind::PlusEqual, start)
                } else {
                    self.make_token(TokenKind::Plus, start)
                }
            }
            b'-' => {
                if self.cursor.eat(b'-') {
                    self.make_token(TokenKind::MinusMinus, start)
                } else if self.cursor.eat(b'>') {
                    self.make_token(TokenKind::Arrow, start)
                } else if self.cursor.eat(b'=') {
                    self.make_token(TokenKind::MinusEqual, start)
                } else {
                    self.make_token(TokenKind::Minus, start)
                }
            }
            b'*' => self.one_or_assign(start, TokenKind::Asterisk, TokenKind::AsteriskEqual),
            b'/' => self.one_or_assign(start, TokenKind::Slash, TokenKind::SlashEqual),
            b'%' => self.one_or_assign(start, TokenKind::Percent, TokenKind::PercentEqual),
            b'!' => self.one_or_assign(start, TokenKind::Exclam, TokenKind::NEqual),
            b'=' => {
                if self.cursor.eat(b'=') {
                    self.make_token(TokenKind::DEqual, start)
                } else if self.cursor.eat(b'>') {
                    self.make_token(TokenKind::EArrow, start)
                } else {
                    self.make_token(TokenKind::Equal, start)
                }
            }
            b'<' => {
                if self.cursor.eat(b'=') {
                    self.make_token(TokenKind::LessEqual, start)
                } else if self.cursor.eat(b'<') {
                    self.make_token(TokenKind::DLess, start)
                } else {
                    self.make_token(TokenKind::Less, start)
                }
            }
            b'>' => {
                if self.cursor.eat(b'=') {
                    self.make_token(TokenKind::GreatEqual, start)
                } else if self.cursor.eat(b'>') {
                    self.make_token(TokenKind::DGreat, start)
                } else {
                    self.make_token(TokenKind::Great, start)
                }
            }
            b'|' => {
                if self.cursor.eat(b'|') {
                    self.make_token(TokenKind::DPipe, start)
                } else {
                    self.make_token(TokenKind::Pipe, start)
                }
            }
            b'&' => {
                if self.cursor.eat(b'&') {
                    self.make_token(TokenKind::DAmp, start)
                } else {
                    self.make_token(TokenKind::Amp, start)
                }
            }

            // === Punctuation ===
            b'.' => self.make_token(TokenKind::Dot, start),
            b',' => self.make_token(TokenKind::Comma, start),
            b':' => self.make_token(TokenKind::Colon, start),
            b';' => self.make_token(TokenKind::Semicolon, start),
            b'[' => self.make_token(TokenKind::LBrak, start),
            b']' => self.make_token(TokenKind::RBrak, start),
            b'(' => self.make_token(TokenKind::LParn, start),
            b')' => self.make_token(TokenKind::RParn, start),
            b'{' => self.make_token(TokenKind::LBrac, start),
            b'}' => self.make_token(TokenKind::RBrac, start),
            b'~' => self.make_token(TokenKind::Tilde, start),
            b'^' => self.make_token(TokenKind::Caret, start),

            // === Literals ===
            b'"' => self.scan_string(start),
            b if is_decimal_digit(b) => self.scan_number(start, b),

            // === Identifiers, keywords, and everything else ===
            b => self.scan_identifier(start, b),
        }
    }

    // ---------------------------------------------------------------
    // Trivia
    // ---------------------------------------------------------------

    /// Skip whitespace and `//` line comments, newline included.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(is_whitespace);

            if self.cursor.peek_n(2) == b"//" {
                self.cursor.eat_while(|b| b != b'\n');
                self.cursor.eat(b'\n');
                continue;
            }

            break;
        }
    }

    // ---------------------------------------------------------------
    // Number scanning
    // ---------------------------------------------------------------

    /// Scan a number literal after its first digit was consumed.
    ///
    /// `0b`, `0o` and `0x` select a radix and never produce rationals.
    /// Decimal literals take at most one `.`; a second one ends the number.
    fn scan_number(&mut self, start: usize, first: u8) -> Token {
        if first == b'0' {
            match self.cursor.peek() {
                Some(b'b') => return self.scan_radix(start, is_binary_digit, "binary"),
                Some(b'o') => return self.scan_radix(start, is_octal_digit, "octal"),
                Some(b'x') => return self.scan_radix(start, is_hex_digit, "hex"),
                _ => {}
            }
        }

        let mut kind = NumberKind::Decimal;
        while let Some(b) = self.cursor.peek() {
            if is_decimal_digit(b) {
                self.cursor.advance();
            } else if b == b'.' && kind == NumberKind::Decimal {
                kind = NumberKind::Rational;
                self.cursor.advance();
            } else {
                break;
            }
        }

        let lexeme = self.cursor.extract_from(start).into_owned();
        Token::new(TokenKind::number(kind, lexeme), self.cursor.span_from(start))
    }

    /// Scan the digits after a radix prefix. The cursor sits on the marker.
    fn scan_radix(&mut self, start: usize, is_digit: fn(u8) -> bool, radix: &str) -> Token {
        self.cursor.advance(); // marker
        let digit_start = self.cursor.offset();
        self.cursor.eat_while(is_digit);

        let lexeme = self.cursor.extract_from(start).into_owned();
        let span = self.cursor.span_from(start);
        if self.cursor.offset() == digit_start {
            self.diagnostics.report(
                Diagnostic::warning(format!("expected {} digits after '{}'", radix, lexeme))
                    .with_span(span)
                    .with_suggestion(format!("write at least one {} digit, e.g. '{}1'", radix, lexeme)),
            );
        }
        Token::new(TokenKind::DecimalNumber(lexeme), span)
    }

    // ---------------------------------------------------------------
    // String scanning
    // ---------------------------------------------------------------

    /// Scan a string literal after the opening `"` was consumed.
    ///
    /// Strings end at the closing quote and may not span lines. An
    /// unterminated string still yields a token holding what was read.
    fn scan_string(&mut self, start: usize) -> Token {
        let mut value = Vec::new();

        loop {
            match self.cursor.peek() {
                Some(b'"') => {
                    self.cursor.advance();
                    let span = self.cursor.span_from(start);
                    return Token::new(TokenKind::String(decode(value)), span);
                }
                Some(b'\\') => {
                    let escape_start = self.cursor.offset();
                    self.cursor.advance();
                    match self.cursor.peek() {
                        None | Some(b'\n') => break,
                        Some(c) => {
                            self.cursor.advance();
                            match c {
                                b'n' => value.push(b'\n'),
                                b't' => value.push(b'\t'),
                                b'r' => value.push(b'\r'),
                                b'0' => value.push(b'\0'),
                                b'\\' => value.push(b'\\'),
                                b'"' => value.push(b'"'),
                                other => {
                                    if !other.is_ascii() {
                                        self.cursor.eat_while(is_utf8_continuation);
                                    }
                                    let escaped = self.cursor.slice_from(escape_start + 1);
                                    let ch = self.cursor.extract_from(escape_start + 1);
                                    self.diagnostics.warning(
                                        format!("unknown escape sequence '\\{}'", ch),
                                        self.cursor.span_from(escape_start),
                                    );
                                    value.extend_from_slice(escaped);
                                }
                            }
                        }
                    }
                }
                None | Some(b'\n') => break,
                Some(b) => {
                    self.cursor.advance();
                    value.push(b);
                }
            }
        }

        let span = self.cursor.span_from(start);
        self.diagnostics.report(
            Diagnostic::error("unterminated string literal")
                .with_span(span)
                .with_suggestion("add a closing '\"' before the end of the line"),
        );
        Token::new(TokenKind::String(decode(value)), span)
    }

    // ---------------------------------------------------------------
    // Identifier / keyword scanning
    // ---------------------------------------------------------------

    /// Scan an identifier or keyword starting with the consumed byte `first`.
    ///
    /// Any byte no other branch claims lands here too and becomes (the
    /// start of) an identifier, with a warning attached.
    fn scan_identifier(&mut self, start: usize, first: u8) -> Token {
        if !is_identifier_char(first) {
            if !first.is_ascii() {
                self.cursor.eat_while(is_utf8_continuation);
            }
            let span = self.cursor.span_from(start);
            let ch = self.cursor.extract_from(start);
            self.diagnostics.warning(
                format!("unexpected character '{}'", ch.escape_default()),
                span,
            );
        }

        self.cursor.eat_while(is_identifier_char);
        let lexeme = self.cursor.extract_from(start);
        let kind = TokenKind::keyword_from_str(&lexeme)
            .unwrap_or_else(|| TokenKind::Identifier(lexeme.into_owned()));

        Token::new(kind, self.cursor.span_from(start))
    }

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    /// Create a token spanning `start` to the current position.
    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, self.cursor.span_from(start))
    }

    /// `op` alone, or `op=` as `assign` when followed by `=`.
    fn one_or_assign(&mut self, start: usize, op: TokenKind, assign: TokenKind) -> Token {
        if self.cursor.eat(b'=') {
            self.make_token(assign, start)
        } else {
            self.make_token(op, start)
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
