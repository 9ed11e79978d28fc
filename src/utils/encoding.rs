//! Text decoding for arbitrary byte input

use anyhow::{Context, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// Decode bytes into text without failing.
///
/// A byte-order mark wins, then valid UTF-8; anything else goes through
/// charset detection and is decoded with replacement characters.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "decoded with replacement characters");
    }
    text.into_owned()
}

/// Read and decode a file, returning `None` when it exceeds `max_bytes`.
pub fn read_file_safe(path: &Path, max_bytes: u64) -> Result<Option<String>> {
    let size = fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .len();
    if size > max_bytes {
        return Ok(None);
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(decode_text(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn utf8_passes_through() {
        assert_eq!(decode_text("fn main() {} // ü".as_bytes()), "fn main() {} // ü");
    }

    #[test]
    fn bom_selects_encoding() {
        let bytes = [0xFF, 0xFE, b'h', 0x00, b'i', 0x00];
        assert_eq!(decode_text(&bytes), "hi");
    }

    #[test]
    fn invalid_utf8_is_decoded_anyway() {
        let text = decode_text(&[b'a', b'b', 0xE9, b'c']);
        assert!(text.starts_with("ab"));
        assert!(text.ends_with('c'));
    }

    #[test]
    fn read_file_safe_respects_size_limit() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("big.sql");
        fs::write(&path, "SELECT id FROM users;").expect("write");

        assert_eq!(read_file_safe(&path, 5).expect("read"), None);
        assert_eq!(
            read_file_safe(&path, 1024).expect("read").as_deref(),
            Some("SELECT id FROM users;")
        );
        assert!(read_file_safe(&dir.path().join("missing"), 1024).is_err());
    }
}
