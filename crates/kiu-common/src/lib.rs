pub mod errors;
pub mod source;
pub mod span;

pub use errors::{Diagnostic, DiagnosticBag, Severity};
pub use source::{SourceError, SourceFile};
pub use span::Span;
