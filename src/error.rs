use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Recoverable lexical errors. The scanner has consumed the offending input
/// when one of these is returned, so the caller may simply ask for the next
/// token.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ScanError {
    #[error("illegal character {ch:?} at line {line}")]
    #[diagnostic(
        code(scanner::illegal_character),
        help("The character starts no valid token and has been skipped.")
    )]
    IllegalCharacter { line: usize, ch: char },

    #[error("malformed number {text:?} at line {line}")]
    #[diagnostic(code(scanner::malformed_number))]
    MalformedNumber { line: usize, text: String },

    #[error("unterminated string at line {line}")]
    #[diagnostic(
        code(scanner::unterminated_string),
        help("A closing '\"' is missing before the end of input.")
    )]
    UnterminatedString { line: usize },
}

/// Domain validation errors for waypoint and POI records.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ModelError {
    #[error("name must not be blank")]
    #[diagnostic(code(model::blank_name))]
    BlankName,

    #[error("latitude {0} is outside [-90, 90]")]
    #[diagnostic(code(model::latitude_out_of_range))]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    #[diagnostic(code(model::longitude_out_of_range))]
    LongitudeOutOfRange(f64),

    #[error("text must not contain a double quote")]
    #[diagnostic(
        code(model::embedded_quote),
        help("The document format stores strings without escape sequences.")
    )]
    EmbeddedQuote,
}

/// Fatal persistence failures. Only the storage medium being unavailable
/// aborts a read or write; malformed document content is reported through
/// the diagnostic sink instead and never surfaces here.
#[derive(Error, Debug, Diagnostic)]
pub enum PersistenceError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(persistence::read),
        help("Check that the storage medium exists and is readable.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(persistence::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
