/// Check whether `needle` occurs anywhere in `haystack`.
///
/// An empty needle never matches.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }

    haystack.windows(needle.len()).any(|window| window == needle)
}
