//! Source formatting for generated Rust text

use crate::error::FormatError;

/// Reformats generated text into canonical source for the target language
pub trait Formatter {
    fn format(&self, source: &str) -> Result<String, FormatError>;
}

/// Parses with `syn` and prints with `prettyplease`.
///
/// Ordinary `//` comments do not survive the round trip; backends emit
/// doc comments for anything that must be kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustFormatter;

impl Formatter for RustFormatter {
    fn format(&self, source: &str) -> Result<String, FormatError> {
        let file = syn::parse_file(source)?;
        Ok(prettyplease::unparse(&file))
    }
}
