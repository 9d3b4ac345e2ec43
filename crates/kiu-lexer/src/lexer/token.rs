use kiu_common::Span;
use std::fmt;

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn eof(span: Span) -> Self {
        Self {
            kind: TokenKind::Eof,
            span,
        }
    }

    /// Literal payload, present only for numbers, strings and identifiers.
    pub fn literal(&self) -> Option<&str> {
        self.kind.literal()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Whether a numeric literal consumed a radix point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Decimal,
    Rational,
}

/// All token kinds in the Kiu language.
///
/// Literal text lives inside the variants that carry it, so a payload on
/// any other kind cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,

    // === Single-character operators and punctuation ===
    Plus,      // +
    Minus,     // -
    Asterisk,  // *
    Slash,     // /
    Percent,   // %
    Pipe,      // |
    Amp,       // &
    Equal,     // =
    Less,      // <
    Great,     // >
    Tilde,     // ~
    Caret,     // ^
    Exclam,    // !
    Dot,       // .
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;
    LBrak,     // [
    RBrak,     // ]
    LParn,     // (
    RParn,     // )
    LBrac,     // {
    RBrac,     // }

    // === Compound operators ===
    DEqual,        // ==
    NEqual,        // !=
    PlusPlus,      // ++
    PlusEqual,     // +=
    MinusMinus,    // --
    MinusEqual,    // -=
    AsteriskEqual, // *=
    SlashEqual,    // /=
    PercentEqual,  // %=
    LessEqual,     // <=
    GreatEqual,    // >=
    DLess,         // <<
    DGreat,        // >>
    DPipe,         // ||
    DAmp,          // &&
    Arrow,         // ->
    EArrow,        // =>

    // === Literals ===
    DecimalNumber(String),
    RationalNumber(String),
    String(String),
    Identifier(String),

    // === Keywords ===
    If,
    Elif,
    Else,
    Loop,
    While,
    For,
    Brk,
    Cont,
    Ret,
    Let,
    Match,
    True,
    False,
    Struc,
    Enum,
    Type,
}

/// Reserved words, in declaration order.
pub static KEYWORDS: [(&str, TokenKind); 16] = [
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("loop", TokenKind::Loop),
    ("while", TokenKind::While),
    ("for", TokenKind::For),
    ("brk", TokenKind::Brk),
    ("cont", TokenKind::Cont),
    ("ret", TokenKind::Ret),
    ("let", TokenKind::Let),
    ("match", TokenKind::Match),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    ("struc", TokenKind::Struc),
    ("enum", TokenKind::Enum),
    ("type", TokenKind::Type),
];

impl TokenKind {
    /// Try to match an identifier string to a keyword.
    pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == s)
            .map(|(_, kind)| kind.clone())
    }

    pub fn number(kind: NumberKind, literal: impl Into<String>) -> TokenKind {
        match kind {
            NumberKind::Decimal => TokenKind::DecimalNumber(literal.into()),
            NumberKind::Rational => TokenKind::RationalNumber(literal.into()),
        }
    }

    pub fn literal(&self) -> Option<&str> {
        match self {
            TokenKind::DecimalNumber(s)
            | TokenKind::RationalNumber(s)
            | TokenKind::String(s)
            | TokenKind::Identifier(s) => Some(s),
            _ => None,
        }
    }

    /// Display text of fixed kinds; the wrapper name of literal kinds.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Eof => "eof",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Pipe => "|",
            TokenKind::Amp => "&",
            TokenKind::Equal => "=",
            TokenKind::Less => "<",
            TokenKind::Great => ">",
            TokenKind::Tilde => "~",
            TokenKind::Caret => "^",
            TokenKind::Exclam => "!",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::LBrak => "[",
            TokenKind::RBrak => "]",
            TokenKind::LParn => "(",
            TokenKind::RParn => ")",
            TokenKind::LBrac => "{",
            TokenKind::RBrac => "}",
            TokenKind::DEqual => "==",
            TokenKind::NEqual => "!=",
            TokenKind::PlusPlus => "++",
            TokenKind::PlusEqual => "+=",
            TokenKind::MinusMinus => "--",
            TokenKind::MinusEqual => "-=",
            TokenKind::AsteriskEqual => "*=",
            TokenKind::SlashEqual => "/=",
            TokenKind::PercentEqual => "%=",
            TokenKind::LessEqual => "<=",
            TokenKind::GreatEqual => ">=",
            TokenKind::DLess => "<<",
            TokenKind::DGreat => ">>",
            TokenKind::DPipe => "||",
            TokenKind::DAmp => "&&",
            TokenKind::Arrow => "->",
            TokenKind::EArrow => "=>",
            TokenKind::If => "if",
            TokenKind::Elif => "elif",
            TokenKind::Else => "else",
            TokenKind::Loop => "loop",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Brk => "brk",
            TokenKind::Cont => "cont",
            TokenKind::Ret => "ret",
            TokenKind::Let => "let",
            TokenKind::Match => "match",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Struc => "struc",
            TokenKind::Enum => "enum",
            TokenKind::Type => "type",
            TokenKind::DecimalNumber(_) | TokenKind::RationalNumber(_) => "num",
            TokenKind::String(_) => "str",
            TokenKind::Identifier(_) => "id",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::String(value) => {
                f.write_str("str(")?;
                write_escaped(f, value)?;
                f.write_str(")")
            }
            _ => match self.literal() {
                Some(lit) => write!(f, "{}({})", self.name(), lit),
                None => f.write_str(self.name()),
            },
        }
    }
}

/// String payloads hold decoded text; the rendering re-escapes it so a
/// token stream always stays on one line.
fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    for ch in value.chars() {
        match ch {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\0' => f.write_str("\\0")?,
            '\\' => f.write_str("\\\\")?,
            c if c.is_control() => write!(f, "{}", c.escape_unicode())?,
            c => write!(f, "{}", c)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_round_trips_through_its_rendering() {
        for (word, kind) in KEYWORDS.iter() {
            assert_eq!(TokenKind::keyword_from_str(word).as_ref(), Some(kind));
            assert_eq!(kind.to_string(), *word);
        }
        assert_eq!(TokenKind::keyword_from_str("iffy"), None);
        assert_eq!(TokenKind::keyword_from_str("If"), None);
    }

    #[test]
    fn literal_kinds_render_with_wrappers() {
        assert_eq!(TokenKind::DecimalNumber("42".into()).to_string(), "num(42)");
        assert_eq!(TokenKind::RationalNumber("3.14".into()).to_string(), "num(3.14)");
        assert_eq!(TokenKind::String("hi there".into()).to_string(), "str(hi there)");
        assert_eq!(TokenKind::Identifier("x_1".into()).to_string(), "id(x_1)");
        assert_eq!(TokenKind::Eof.to_string(), "eof");
    }

    #[test]
    fn operators_render_as_symbols() {
        let cases = [
            (TokenKind::Plus, "+"),
            (TokenKind::Comma, ","),
            (TokenKind::Percent, "%"),
            (TokenKind::DEqual, "=="),
            (TokenKind::Arrow, "->"),
            (TokenKind::EArrow, "=>"),
            (TokenKind::DLess, "<<"),
            (TokenKind::DAmp, "&&"),
            (TokenKind::LBrac, "{"),
        ];
        for (kind, expected) in cases {
            assert_eq!(kind.to_string(), expected);
        }
    }

    #[test]
    fn only_literal_kinds_carry_payload() {
        assert_eq!(TokenKind::Identifier("a".into()).literal(), Some("a"));
        assert_eq!(TokenKind::String(String::new()).literal(), Some(""));
        assert_eq!(TokenKind::If.literal(), None);
        assert_eq!(TokenKind::Plus.literal(), None);
        assert_eq!(TokenKind::Eof.literal(), None);
    }

    #[test]
    fn number_kind_selects_variant() {
        let dec = TokenKind::number(NumberKind::Decimal, "7");
        let rat = TokenKind::number(NumberKind::Rational, "7.5");
        assert_eq!(dec, TokenKind::DecimalNumber("7".into()));
        assert_eq!(rat, TokenKind::RationalNumber("7.5".into()));
    }

    #[test]
    fn string_rendering_escapes_control_characters() {
        let kind = TokenKind::String("a\nb\tc\\d\u{7}\"e".into());
        assert_eq!(kind.to_string(), r#"str(a\nb\tc\\d\u{7}"e)"#);
        assert!(!kind.to_string().contains('\n'));
        assert_eq!(TokenKind::String("é ok".into()).to_string(), "str(é ok)");
    }

    #[test]
    fn token_display_delegates_to_kind() {
        let tok = Token::new(TokenKind::Identifier("foo".into()), Span::new(0, 3));
        assert_eq!(tok.to_string(), "id(foo)");
        assert_eq!(tok.literal(), Some("foo"));
        assert_eq!(Token::eof(Span::point(3)).to_string(), "eof");
    }
}
