//! Lexical front end for the Kiu scripting language.
//!
//! ```
//! use kiu_lexer::Lexer;
//!
//! let (tokens, diagnostics) = Lexer::new(b"let x = 3.14; // pi").lex();
//! assert_eq!(tokens.render(), "let id(x) = num(3.14) ;");
//! assert!(diagnostics.is_empty());
//! ```

use std::path::Path;

use kiu_common::{DiagnosticBag, SourceError, SourceFile};

pub mod lexer;

pub use lexer::{Lexer, NumberKind, Token, TokenKind, TokenStream};

/// Read and lex the file at `path`.
///
/// Unlike the CLI, which treats an unreadable path as empty input, library
/// callers get the open failure back.
pub fn lex_file(path: impl AsRef<Path>) -> Result<(TokenStream, DiagnosticBag), SourceError> {
    let source = SourceFile::open(path)?;
    Ok(Lexer::new(source.bytes()).lex())
}
