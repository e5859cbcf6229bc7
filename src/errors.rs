//! Error types with rich diagnostics using miette
//!
//! The geometry core never fails. These errors belong to the edges of the
//! crate: decoding generator JSON and the caller-side checks that must run
//! before a drawing is handed to the renderer.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Decode Errors
// ============================================================================

/// Errors that occur while decoding a drawing document
#[derive(Error, Diagnostic, Debug)]
pub enum DecodeError {
    #[error("invalid drawing document: {message}")]
    #[diagnostic(code(plansvg::decode::invalid_json))]
    InvalidJson {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },
}

impl DecodeError {
    /// Wrap a serde_json error, pointing the label at its line/column.
    pub fn from_json(name: &str, source: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(source, err.line(), err.column());
        DecodeError::InvalidJson {
            message: err.to_string(),
            src: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, 1)),
        }
    }
}

/// Translate serde_json's 1-based line / column into a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(source.len().saturating_sub(1))
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors raised by caller-side checks around rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("invalid drawing extent {width} x {height}")]
    #[diagnostic(
        code(plansvg::render::invalid_extent),
        help("drawing width and height must be finite and greater than zero")
    )]
    InvalidExtent {
        width: f64,
        height: f64,
        #[source]
        cause: NumericError,
    },

    #[error("invalid scale: {value}")]
    #[diagnostic(code(plansvg::render::invalid_scale))]
    InvalidScale {
        value: f64,
        #[source]
        cause: NumericError,
    },
}
