use std::fmt;
use thiserror::Error;

/// Buffers the dictionary decoder sizes up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scratch {
    Output,
    Fragment,
}

impl fmt::Display for Scratch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scratch::Output => write!(f, "output"),
            Scratch::Fragment => write!(f, "fragment"),
        }
    }
}

/// Reasons a single decode attempt is abandoned.
///
/// None of these are fatal to a search, they only rule out the current
/// candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Stream length is not a whole number of tokens
    #[error("Token stream length {0} is not a multiple of 3")]
    Misaligned(usize),

    /// The format needs at least one token
    #[error("Token stream is empty")]
    Empty,

    /// A run-length token with a repeat count of zero
    #[error("Token {token} has a zero repeat count")]
    ZeroRun { token: usize },

    /// Expansion would pass the hard output ceiling
    #[error("Expanded output would exceed {limit} bytes")]
    OutputLimit { limit: usize },

    /// Back-reference to an entry that does not exist yet
    #[error("Token {token} refers to entry {reference} but the dictionary has {size} entries")]
    BadReference {
        token: usize,
        reference: u16,
        size: usize,
    },

    /// Dictionary would grow past its fixed entry count
    #[error("Dictionary is full ({capacity} entries)")]
    DictionaryFull { capacity: usize },

    /// A pre-sized buffer would overflow
    #[error("The {buffer} buffer would exceed its capacity of {capacity} bytes")]
    CapacityExceeded { buffer: Scratch, capacity: usize },

    /// The allocator refused a buffer
    #[error("Could not allocate {0} bytes")]
    Allocation(usize),
}

/// Type alias for decoder results
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Allocate an empty vector able to hold exactly `capacity` elements, reporting
/// allocator failure instead of aborting.
pub(crate) fn try_with_capacity<T>(capacity: usize) -> DecodeResult<Vec<T>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(capacity)
        .map_err(|_| DecodeError::Allocation(capacity.saturating_mul(std::mem::size_of::<T>())))?;
    Ok(buffer)
}
