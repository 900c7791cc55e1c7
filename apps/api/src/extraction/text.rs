/// Decodes bytes as UTF-8, substituting U+FFFD for invalid sequences.
/// Valid UTF-8 comes back unchanged.
pub fn decode_text(raw_bytes: &[u8]) -> String {
    String::from_utf8_lossy(raw_bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_utf8_unchanged() {
        assert_eq!(decode_text("naïve résumé\r\n".as_bytes()), "naïve résumé\r\n");
    }

    #[test]
    fn test_truncated_multibyte_sequence_is_replaced() {
        // "é" is 0xC3 0xA9; drop the continuation byte.
        assert_eq!(decode_text(b"caf\xC3"), "caf\u{FFFD}");
    }
}
