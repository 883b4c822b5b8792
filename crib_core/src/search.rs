//! Exhaustive search over every rotation and key.
use crate::{
    contains, deobfuscate_into, DecodeResult, DictionaryDecoder, RunLengthDecoder,
    TransformParams,
};
use std::fmt;

/// Compression format a plaintext was recovered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    RunLength,
    Dictionary,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::RunLength => write!(f, "RLE"),
            Method::Dictionary => write!(f, "LZ78"),
        }
    }
}

pub trait Decoder {
    /// The format this decoder understands.
    fn method(&self) -> Method;

    /// Expand a token stream, or explain why it is not valid in this format.
    fn decode(&self, stream: &[u8]) -> DecodeResult<Vec<u8>>;
}

/// Formats in the order a search tries them for each candidate.
pub const DEFAULT_DECODERS: [&dyn Decoder; 2] = [&RunLengthDecoder, &DictionaryDecoder];

/// A successful recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    method: Method,
    params: TransformParams,
    plaintext: Vec<u8>,
}

impl Recovery {
    pub fn get_method(&self) -> Method {
        self.method
    }

    pub fn get_params(&self) -> TransformParams {
        self.params
    }

    pub fn get_rotation(&self) -> u8 {
        self.params.get_rotation()
    }

    pub fn get_key(&self) -> u8 {
        self.params.get_key()
    }

    pub fn get_plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    pub fn into_plaintext(self) -> Vec<u8> {
        self.plaintext
    }
}

/// Find the first rotation and key under which `obfuscated` decodes, in either
/// format, to something containing `crib`.
///
/// Candidates are tried by ascending rotation, then ascending key, and
/// run-length before dictionary for the same pair.
pub fn search(obfuscated: &[u8], crib: &[u8]) -> Option<Recovery> {
    search_with(obfuscated, crib, &DEFAULT_DECODERS)
}

/// Like [`search`] but with an explicit list of formats, tried in the given order.
pub fn search_with(obfuscated: &[u8], crib: &[u8], decoders: &[&dyn Decoder]) -> Option<Recovery> {
    let mut work = Vec::<u8>::new();
    if work.try_reserve_exact(obfuscated.len()).is_err() {
        log::error!(
            "Could not allocate a {} byte working buffer",
            obfuscated.len()
        );
        return None;
    }
    work.resize(obfuscated.len(), 0u8);

    for params in TransformParams::all() {
        deobfuscate_into(obfuscated, params, &mut work);

        for decoder in decoders {
            match decoder.decode(&work) {
                Ok(plaintext) if contains(&plaintext, crib) => {
                    log::debug!(
                        "Crib found with {} at {params}, {} bytes",
                        decoder.method(),
                        plaintext.len()
                    );
                    return Some(Recovery {
                        method: decoder.method(),
                        params,
                        plaintext,
                    });
                }
                Ok(_) => {}
                Err(err) => {
                    log::trace!("{} rejected {params}: {err}", decoder.method());
                }
            }
        }
    }

    log::debug!(
        "No parameters out of {} candidates revealed the crib",
        TransformParams::all().count()
    );
    None
}
