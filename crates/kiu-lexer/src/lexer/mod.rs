pub mod classify;
pub mod cursor;
pub mod stream;
pub mod token;

mod scanner;

pub use scanner::Lexer;
pub use stream::TokenStream;
pub use token::{NumberKind, Token, TokenKind, KEYWORDS};
