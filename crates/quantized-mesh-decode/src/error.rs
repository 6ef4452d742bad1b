//! Decode error types.

use thiserror::Error;

use crate::DecodingStep;

/// Errors that can occur while decoding a quantized-mesh tile.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The buffer ended before a section declared by the tile was complete.
    #[error(
        "truncated input while decoding {step} at offset {offset:#x} (need {need} bytes, have {have})"
    )]
    Truncated {
        step: DecodingStep,
        offset: usize,
        need: usize,
        have: usize,
    },

    /// The metadata extension carried text that is not valid JSON.
    #[error("metadata extension at offset {offset:#x} is not valid JSON: {source}")]
    MalformedMetadata {
        offset: usize,
        source: serde_json::Error,
    },
}

/// Result alias for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
