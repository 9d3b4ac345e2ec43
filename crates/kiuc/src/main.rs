use std::io::{self, Write};
use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kiu_common::source::display_name;
use kiu_common::{Diagnostic, Severity, SourceFile};
use kiu_lexer::lexer::classify::is_utf8_continuation;
use kiu_lexer::Lexer;

/// Kiu lexer.
///
/// Prints the token stream of a .kiu source file on one line.
#[derive(Parser)]
#[command(
    name = "kiuc",
    version,
    about,
    long_about = "Kiu lexer.\n\nReads a Kiu source file and prints its tokens, space separated,\nto standard output.\n\nExample:\n  kiuc hello.kiu"
)]
struct Cli {
    /// Input .kiu source file.
    input: PathBuf,
}

/// Diagnostics rendered with source snippets; the rest are only counted.
const MAX_RENDERED_DIAGNOSTICS: usize = 10;

fn main() {
    let cli = Cli::parse();
    init_logging();

    // An unreadable input is reported and then lexed as empty.
    let source = match SourceFile::open(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            SourceFile::empty(display_name(&cli.input))
        }
    };

    let (tokens, diagnostics) = Lexer::new(source.bytes()).lex();
    debug!(file = source.name(), tokens = tokens.len(), diagnostics = diagnostics.len(), "lexed");

    if !diagnostics.is_empty() {
        let mut printer = DiagnosticPrinter::new(&source);
        let shown = diagnostics.len().min(MAX_RENDERED_DIAGNOSTICS);
        for diag in &diagnostics.diagnostics()[..shown] {
            printer.print(diag);
        }
        let hidden = diagnostics.len() - shown;
        if hidden > 0 {
            eprintln!("... and {} more diagnostics not shown", hidden);
        }
    }

    let mut stdout = io::stdout().lock();
    if let Err(e) = write!(stdout, "{}", tokens.render()).and_then(|()| stdout.flush()) {
        warn!("failed to write token stream: {}", e);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    // A subscriber installed by the host process takes precedence.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

/// Renders diagnostics against one source file.
///
/// The decoded text and the byte-to-char table are built once and shared
/// by every report.
struct DiagnosticPrinter<'a> {
    cache: (&'a str, Source),
    offsets: CharOffsets,
}

impl<'a> DiagnosticPrinter<'a> {
    fn new(source: &'a SourceFile) -> Self {
        Self {
            cache: (source.name(), Source::from(source.text().into_owned())),
            offsets: CharOffsets::new(source.bytes()),
        }
    }

    fn print(&mut self, diag: &Diagnostic) {
        let (kind, color) = match diag.severity {
            Severity::Error => (ReportKind::Error, Color::Red),
            Severity::Warning => (ReportKind::Warning, Color::Yellow),
        };
        let file_name = self.cache.0;

        let Some(span) = diag.span else {
            eprintln!("{}", diag);
            if let Some(ref suggestion) = diag.suggestion {
                eprintln!("   = help: {}", suggestion);
            }
            eprintln!();
            return;
        };

        let start = self.offsets.get(span.start);
        let end = self.offsets.get(span.end).max(start + 1);

        let mut report = Report::build(kind, file_name, start)
            .with_message(&diag.message)
            .with_label(
                Label::new((file_name, start..end))
                    .with_message(&diag.message)
                    .with_color(color),
            );

        if let Some(ref suggestion) = diag.suggestion {
            report = report.with_help(suggestion);
        }

        if let Err(e) = report.finish().eprint(&mut self.cache) {
            warn!("failed to render diagnostic: {}", e);
        }
    }
}

/// Lexer spans are byte offsets; ariadne labels count characters.
///
/// Entry `i` is the number of characters that start before byte `i`.
struct CharOffsets(Vec<usize>);

impl CharOffsets {
    fn new(bytes: &[u8]) -> Self {
        let mut table = Vec::with_capacity(bytes.len() + 1);
        let mut chars = 0;
        table.push(0);
        for &b in bytes {
            if !is_utf8_continuation(b) {
                chars += 1;
            }
            table.push(chars);
        }
        Self(table)
    }

    fn get(&self, byte_offset: usize) -> usize {
        let last = self.0.len() - 1;
        self.0[byte_offset.min(last)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn single_positional_argument() {
        let cli = Cli::try_parse_from(["kiuc", "main.kiu"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("main.kiu"));
        assert!(Cli::try_parse_from(["kiuc"]).is_err());
        assert!(Cli::try_parse_from(["kiuc", "a.kiu", "b.kiu"]).is_err());
    }

    #[test]
    fn char_offsets_count_multibyte_once() {
        let offsets = CharOffsets::new("é@".as_bytes());
        assert_eq!(offsets.get(0), 0);
        assert_eq!(offsets.get(2), 1);
        assert_eq!(offsets.get(3), 2);
        assert_eq!(offsets.get(99), 2);
    }

    #[test]
    fn char_offsets_of_empty_source() {
        let offsets = CharOffsets::new(b"");
        assert_eq!(offsets.get(0), 0);
        assert_eq!(offsets.get(5), 0);
    }
}
