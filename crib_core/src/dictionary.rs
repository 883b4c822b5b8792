//! Dictionary (LZ78 style) streams.
//!
//! Each token names a previously decoded phrase by its dictionary index and
//! adds one literal byte to it. The phrase plus literal is emitted and then
//! becomes a new dictionary entry. Index 0 is the empty phrase.
//!
//! All buffers are sized from the stream length before decoding starts and
//! never grow afterwards:
//!
//! | buffer     | capacity                                   |
//! |------------|--------------------------------------------|
//! | output     | `OUTPUT_FACTOR * len + SLACK` bytes        |
//! | fragment   | `FRAGMENT_FACTOR * len + SLACK` bytes      |
//! | dictionary | one entry per token, plus the root and one |
//!
//! Running out of any of them ends the attempt with an error.
use crate::error::try_with_capacity;
use crate::token::{tokens, TOKEN_LEN};
use crate::{DecodeError, DecodeResult, Decoder, Method, Scratch};

/// Output capacity, in bytes per input byte.
pub const OUTPUT_FACTOR: usize = 8;

/// Fragment capacity, in bytes per input byte.
pub const FRAGMENT_FACTOR: usize = 4;

/// Fixed extra room added to both byte buffers.
pub const SLACK: usize = 1024;

/// Decoder for dictionary token streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryDecoder;

impl Decoder for DictionaryDecoder {
    fn method(&self) -> Method {
        Method::Dictionary
    }

    fn decode(&self, stream: &[u8]) -> DecodeResult<Vec<u8>> {
        decode_dictionary(stream)
    }
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    parent: u16,
    literal: u8,
}

/// Append-only phrase table for one decode attempt.
struct Dictionary {
    entries: Vec<Entry>,
    capacity: usize,
}

impl Dictionary {
    fn with_capacity(capacity: usize) -> DecodeResult<Self> {
        let mut entries = try_with_capacity(capacity)?;
        entries.push(Entry {
            parent: 0,
            literal: 0,
        });

        Ok(Self { entries, capacity })
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up an entry that must already exist.
    fn get(&self, token: usize, reference: u16) -> DecodeResult<Entry> {
        self.entries
            .get(usize::from(reference))
            .copied()
            .ok_or(DecodeError::BadReference {
                token,
                reference,
                size: self.len(),
            })
    }

    fn push(&mut self, entry: Entry) -> DecodeResult<()> {
        if self.len() + 1 >= self.capacity {
            return Err(DecodeError::DictionaryFull {
                capacity: self.capacity,
            });
        }

        self.entries.push(entry);
        Ok(())
    }
}

/// Byte buffer with a hard capacity.
struct Bounded {
    bytes: Vec<u8>,
    capacity: usize,
    kind: Scratch,
}

impl Bounded {
    fn new(kind: Scratch, capacity: usize) -> DecodeResult<Self> {
        Ok(Self {
            bytes: try_with_capacity(capacity)?,
            capacity,
            kind,
        })
    }

    fn ensure_room(&self, additional: usize) -> DecodeResult<()> {
        if self.bytes.len() + additional > self.capacity {
            return Err(DecodeError::CapacityExceeded {
                buffer: self.kind,
                capacity: self.capacity,
            });
        }

        Ok(())
    }

    fn push(&mut self, byte: u8) -> DecodeResult<()> {
        self.ensure_room(1)?;
        self.bytes.push(byte);
        Ok(())
    }
}

/// Expand a dictionary stream.
pub fn decode_dictionary(stream: &[u8]) -> DecodeResult<Vec<u8>> {
    if stream.len() < TOKEN_LEN {
        return Err(DecodeError::Empty);
    }
    let phrases = tokens(stream)?;

    let mut output = Bounded::new(Scratch::Output, stream.len() * OUTPUT_FACTOR + SLACK)?;
    let mut fragment = Bounded::new(Scratch::Fragment, stream.len() * FRAGMENT_FACTOR + SLACK)?;
    let mut dictionary = Dictionary::with_capacity(phrases.len() + 2)?;

    for (index, token) in phrases.enumerate() {
        // The phrase is collected last byte first by walking towards the root.
        fragment.bytes.clear();
        fragment.push(token.literal)?;

        let mut reference = token.field;
        while reference != 0 {
            let entry = dictionary.get(index, reference)?;
            fragment.push(entry.literal)?;
            reference = entry.parent;
        }

        output.ensure_room(fragment.bytes.len())?;
        output.bytes.extend(fragment.bytes.iter().rev());

        dictionary.push(Entry {
            parent: token.field,
            literal: token.literal,
        })?;
    }

    let mut decoded = output.bytes;
    decoded.shrink_to_fit();
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(phrases: &[(u16, u8)]) -> Vec<u8> {
        phrases
            .iter()
            .flat_map(|&(reference, literal)| {
                let [hi, lo] = reference.to_be_bytes();
                [hi, lo, literal]
            })
            .collect()
    }

    #[test]
    fn test_single_token() {
        assert_eq!(decode_dictionary(&[0, 0, b'a']).unwrap(), b"a");
    }

    #[test]
    fn test_reference_previous() {
        let decoded = decode_dictionary(&[0, 0, b'a', 0, 1, b'b']).unwrap();

        assert_eq!(decoded, b"aab");
        assert_eq!(decoded.len(), 3);
    }

    #[test]
    fn test_chain_order() {
        let decoded = decode_dictionary(&stream(&[(0, b'a'), (1, b'b'), (2, b'c')])).unwrap();

        assert_eq!(decoded, b"aababc");
    }

    #[test]
    fn test_sentence() {
        let phrases = [
            (0, b'a'),
            (0, b't'),
            (0, b' '),
            (0, b'd'),
            (1, b'w'),
            (0, b'n'),
            (3, b'a'),
            (2, b' '),
            (4, b'a'),
            (0, b'w'),
            (6, b'!'),
        ];

        assert_eq!(
            decode_dictionary(&stream(&phrases)).unwrap(),
            b"at dawn at dawn!"
        );
    }

    #[test]
    fn test_self_reference() {
        assert_eq!(
            decode_dictionary(&[0, 1, b'a']),
            Err(DecodeError::BadReference {
                token: 0,
                reference: 1,
                size: 1
            })
        );
    }

    #[test]
    fn test_forward_reference() {
        let phrases = [(0, b'a'), (0, b'b'), (5, b'c')];

        assert_eq!(
            decode_dictionary(&stream(&phrases)),
            Err(DecodeError::BadReference {
                token: 2,
                reference: 5,
                size: 3
            })
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(decode_dictionary(&[]), Err(DecodeError::Empty));
        assert_eq!(decode_dictionary(&[0, 0]), Err(DecodeError::Empty));
    }

    #[test]
    fn test_misaligned() {
        assert_eq!(
            decode_dictionary(&[0, 0, b'a', 0]),
            Err(DecodeError::Misaligned(4))
        );
    }

    #[test]
    fn test_output_capacity() {
        // Each phrase extends the previous one, so output grows quadratically:
        // 100 tokens produce 5050 bytes against a capacity of 300 * 8 + 1024.
        let phrases = (0..100u16).map(|i| (i, b'a')).collect::<Vec<_>>();

        assert_eq!(
            decode_dictionary(&stream(&phrases)),
            Err(DecodeError::CapacityExceeded {
                buffer: Scratch::Output,
                capacity: 300 * OUTPUT_FACTOR + SLACK
            })
        );
    }

    #[test]
    fn test_within_capacity() {
        let phrases = (0..40u16).map(|i| (i, b'a')).collect::<Vec<_>>();
        let decoded = decode_dictionary(&stream(&phrases)).unwrap();

        assert_eq!(decoded.len(), 40 * 41 / 2);
        assert!(decoded.iter().all(|&b| b == b'a'));
    }

    #[test]
    fn test_dictionary_full() {
        let mut dictionary = Dictionary::with_capacity(3).unwrap();
        let entry = Entry {
            parent: 0,
            literal: b'x',
        };

        assert!(dictionary.push(entry).is_ok());
        assert_eq!(
            dictionary.push(entry),
            Err(DecodeError::DictionaryFull { capacity: 3 })
        );
    }

    #[test]
    fn test_trait() {
        let decoder = DictionaryDecoder;

        assert_eq!(decoder.method(), Method::Dictionary);
        assert_eq!(decoder.decode(&[0, 0, b'q']).unwrap(), b"q");
    }
}
