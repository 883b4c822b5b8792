//! Inverse of the XOR + bit rotation obfuscation.
use std::fmt;
use std::ops::RangeInclusive;

/// Rotation amounts tried by a search.
pub const ROTATIONS: RangeInclusive<u8> = 1..=7;

/// Keys tried by a search.
pub const KEYS: RangeInclusive<u8> = 0..=u8::MAX;

/// One candidate pair of obfuscation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransformParams {
    rotation: u8,
    key: u8,
}

impl TransformParams {
    pub fn new(rotation: u8, key: u8) -> Self {
        Self { rotation, key }
    }

    pub fn get_rotation(&self) -> u8 {
        self.rotation
    }

    pub fn get_key(&self) -> u8 {
        self.key
    }

    /// Every pair a search considers, ascending by rotation and then by key.
    pub fn all() -> impl Iterator<Item = TransformParams> {
        ROTATIONS.flat_map(|rotation| KEYS.map(move |key| TransformParams::new(rotation, key)))
    }

    /// Undo the obfuscation of a single byte.
    #[inline]
    pub fn deobfuscate_byte(&self, byte: u8) -> u8 {
        (byte ^ self.key).rotate_right(u32::from(self.rotation & 7))
    }
}

impl fmt::Display for TransformParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} K={:#04x}", self.rotation, self.key)
    }
}

/// Undo the obfuscation of `input`, writing into `output`.
///
/// Only the common prefix of the two slices is written; callers size them equally.
pub fn deobfuscate_into(input: &[u8], params: TransformParams, output: &mut [u8]) {
    for (out, &byte) in output.iter_mut().zip(input) {
        *out = params.deobfuscate_byte(byte);
    }
}

/// Undo the obfuscation of `input`, returning a vector.
pub fn deobfuscate(input: &[u8], params: TransformParams) -> Vec<u8> {
    input
        .iter()
        .map(|&byte| params.deobfuscate_byte(byte))
        .collect::<Vec<u8>>()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::{thread_rng, RngCore};

    /// Forward obfuscation matching `deobfuscate`: rotate left, then XOR.
    pub(crate) fn obfuscate(input: &[u8], params: TransformParams) -> Vec<u8> {
        input
            .iter()
            .map(|&byte| byte.rotate_left(u32::from(params.get_rotation() & 7)) ^ params.get_key())
            .collect::<Vec<u8>>()
    }

    #[test]
    pub fn test_known_byte() {
        // 0b1010_0101 ^ 0x0F = 0b1010_1010, rotated right by 1 = 0b0101_0101
        let params = TransformParams::new(1, 0x0F);
        assert_eq!(params.deobfuscate_byte(0b1010_0101), 0b0101_0101);

        // Rotation is taken mod 8
        let wrapped = TransformParams::new(9, 0x0F);
        assert_eq!(wrapped.deobfuscate_byte(0b1010_0101), 0b0101_0101);
    }

    #[test]
    pub fn test_round_trip() {
        let mut data = [0u8; 2048];
        thread_rng().fill_bytes(&mut data);

        for params in TransformParams::all() {
            let obfuscated = obfuscate(&data, params);
            assert!(
                deobfuscate(&obfuscated, params) == data,
                "Deobfuscating did not restore the original data for {params}."
            );
        }
    }

    #[test]
    pub fn test_not_self_inverse() {
        let data = (0u32..256).map(|x| x as u8).collect::<Vec<u8>>();
        let params = TransformParams::new(3, 0x5A);
        let twice = deobfuscate(&deobfuscate(&data, params), params);

        assert_ne!(twice, data);
    }

    #[test]
    pub fn test_into_matches_vec() {
        let mut data = vec![0u8; 999];
        thread_rng().fill_bytes(&mut data);
        let params = TransformParams::new(6, 0xC3);

        let mut work = vec![0u8; data.len()];
        deobfuscate_into(&data, params, &mut work);

        assert!(
            work == deobfuscate(&data, params),
            "Results of deobfuscate and deobfuscate_into differ."
        );
    }

    #[test]
    pub fn test_enumeration_order() {
        let all = TransformParams::all().collect::<Vec<_>>();

        assert_eq!(all.len(), 7 * 256);
        assert_eq!(all[0], TransformParams::new(1, 0));
        assert_eq!(all[255], TransformParams::new(1, 255));
        assert_eq!(all[256], TransformParams::new(2, 0));
        assert_eq!(all[all.len() - 1], TransformParams::new(7, 255));
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
