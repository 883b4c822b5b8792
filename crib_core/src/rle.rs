//! Run-length streams: each token is a repeat count followed by the byte to repeat.
use crate::error::try_with_capacity;
use crate::token::tokens;
use crate::{DecodeError, DecodeResult, Decoder, Method};

/// Hard ceiling on the expanded size of a run-length stream.
pub const RLE_OUTPUT_LIMIT: usize = 50 * 1024 * 1024;

/// Decoder for run-length token streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLengthDecoder;

impl Decoder for RunLengthDecoder {
    fn method(&self) -> Method {
        Method::RunLength
    }

    fn decode(&self, stream: &[u8]) -> DecodeResult<Vec<u8>> {
        decode_run_length(stream)
    }
}

/// Expand a run-length stream.
///
/// The whole stream is validated and sized before anything is allocated, so a
/// wrong key fails fast instead of producing a huge buffer.
pub fn decode_run_length(stream: &[u8]) -> DecodeResult<Vec<u8>> {
    let runs = tokens(stream)?;

    let mut total: usize = 0;
    for (index, token) in runs.clone().enumerate() {
        if token.field == 0 {
            return Err(DecodeError::ZeroRun { token: index });
        }

        total += usize::from(token.field);
        if total > RLE_OUTPUT_LIMIT {
            return Err(DecodeError::OutputLimit {
                limit: RLE_OUTPUT_LIMIT,
            });
        }
    }

    let mut output = try_with_capacity::<u8>(total)?;
    for token in runs {
        output.resize(output.len() + usize::from(token.field), token.literal);
    }

    Ok(output)
}
