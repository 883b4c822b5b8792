//! Recovery of XOR+rotate obfuscated run-length and dictionary streams using a known crib.

mod error;
pub use error::{DecodeError, DecodeResult, Scratch};

mod transform;
pub use transform::*;

mod matcher;
pub use matcher::contains;

pub mod token;

mod rle;
pub use rle::*;

mod dictionary;
pub use dictionary::*;

mod search;
pub use search::*;
