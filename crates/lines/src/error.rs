use thiserror::Error;

/// Errors raised while decoding a single stroke file.
///
/// Any of these aborts the file's decode; callers rendering a multi-page
/// document substitute a blank overlay for the affected page and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unexpected end of stroke data at offset {offset} (need {need} more bytes)")]
    Truncated { offset: usize, need: usize },

    #[error("unrecognized stroke file header")]
    UnknownVersion,

    #[error("stroke file declares no layers")]
    NoLayers,

    #[error("{0} bytes left over after the last declared segment")]
    TrailingBytes(usize),
}
