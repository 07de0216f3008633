use crate::error::ScanError;
use std::fmt;
use thiserror::Error;

/// The non-fatal conditions the reader can run into. None of these abort a
/// read; every one is reported through a [`DiagnosticSink`] and parsing
/// continues.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("invalid character {ch:?}, retrying")]
    IllegalCharacter { ch: char },

    #[error("malformed number {text:?}, retrying")]
    MalformedNumber { text: String },

    #[error("unterminated string")]
    UnterminatedString,

    #[error("unexpected token, expected {expected}, retrying")]
    UnexpectedToken { expected: &'static str },

    #[error("unknown database {name:?}, skipping its contents")]
    UnknownDatabase { name: String },

    #[error("corrupted object, skipping it")]
    CorruptedObject,

    #[error("required attributes missing, skipping object")]
    AttributesMissing,
}

/// A diagnostic tied to the input line it was observed on.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: usize, kind: DiagnosticKind) -> Self {
        Self { line, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl From<ScanError> for Diagnostic {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::IllegalCharacter { line, ch } => {
                Diagnostic::new(line, DiagnosticKind::IllegalCharacter { ch })
            }
            ScanError::MalformedNumber { line, text } => {
                Diagnostic::new(line, DiagnosticKind::MalformedNumber { text })
            }
            ScanError::UnterminatedString { line } => {
                Diagnostic::new(line, DiagnosticKind::UnterminatedString)
            }
        }
    }
}

/// Where the reader sends its diagnostics. Reporting never fails and never
/// halts the caller.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` facade at warn level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
