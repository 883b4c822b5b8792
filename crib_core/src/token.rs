//! Framing shared by both stream formats: a big-endian 16-bit field followed by a literal byte.
use crate::{DecodeError, DecodeResult};
use byteorder::{BigEndian, ByteOrder};

/// Length in bytes of one token.
pub const TOKEN_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Repeat count or back-reference, depending on the format.
    pub field: u16,
    pub literal: u8,
}

impl Token {
    fn from_chunk(chunk: &[u8]) -> Self {
        Self {
            field: BigEndian::read_u16(&chunk[..2]),
            literal: chunk[2],
        }
    }
}

/// Split a stream into tokens, rejecting streams that are not a whole number of tokens.
pub fn tokens(stream: &[u8]) -> DecodeResult<impl ExactSizeIterator<Item = Token> + Clone + '_> {
    if stream.len() % TOKEN_LEN != 0 {
        return Err(DecodeError::Misaligned(stream.len()));
    }

    Ok(stream.chunks_exact(TOKEN_LEN).map(Token::from_chunk))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let stream = [0x00, 0x03, b'a', 0x12, 0x34, 0xFF];
        let parsed = tokens(&stream).unwrap().collect::<Vec<_>>();

        assert_eq!(
            parsed,
            vec![
                Token {
                    field: 3,
                    literal: b'a'
                },
                Token {
                    field: 0x1234,
                    literal: 0xFF
                },
            ]
        );
    }

    #[test]
    fn test_misaligned() {
        assert_eq!(
            tokens(&[0, 1, 2, 3]).err(),
            Some(DecodeError::Misaligned(4))
        );
        assert_eq!(tokens(&[0, 1]).err(), Some(DecodeError::Misaligned(2)));
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokens(&[]).unwrap().len(), 0);
    }
}
