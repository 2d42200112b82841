//! Character-encoding detection for uploaded source files.
//!
//! Uploads arrive with unknown, frequently non-UTF-8 encodings. Detection
//! feeds the full byte buffer to [`chardetng::EncodingDetector`] and decodes
//! with the guessed [`encoding_rs`] encoding. Once an encoding is chosen,
//! byte sequences invalid in it are replaced with U+FFFD rather than
//! failing the decode.

use std::path::Path;

use chardetng::EncodingDetector;

use crate::error::CoreError;

/// Fully decoded text plus the name of the encoding it was decoded with.
#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    /// Canonical encoding name, e.g. `"UTF-8"` or `"windows-1252"`.
    pub encoding: &'static str,
}

/// Detect the encoding of an in-memory byte buffer and decode it.
///
/// Fails with [`CoreError::EncodingUndetectable`] when the buffer is empty,
/// since no detection heuristic has anything to work with.
pub fn detect_bytes(bytes: &[u8]) -> Result<DecodedText, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::EncodingUndetectable(
            "empty input".to_string(),
        ));
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);

    // `decode` sniffs a BOM first, so the actual encoding may differ from
    // the guess. Malformed sequences become U+FFFD.
    let (text, encoding, _had_errors) = guessed.decode(bytes);

    Ok(DecodedText {
        text: text.into_owned(),
        encoding: encoding.name(),
    })
}

/// Read a stored file and decode it via [`detect_bytes`].
///
/// A missing or unreadable file is reported as
/// [`CoreError::EncodingUndetectable`]: from the caller's point of view the
/// source text cannot be recovered either way.
pub fn detect_file(path: &Path) -> Result<DecodedText, CoreError> {
    let bytes = std::fs::read(path).map_err(|e| {
        CoreError::EncodingUndetectable(format!("cannot read {}: {e}", path.display()))
    })?;
    detect_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_detect_utf8() {
        let decoded = detect_bytes("text\nhello\nworld\n".as_bytes()).unwrap();
        assert_eq!(decoded.text, "text\nhello\nworld\n");
    }

    #[test]
    fn test_detect_latin1() {
        // "café" encoded as ISO-8859-1 / windows-1252 (0xE9 = é).
        let bytes = b"text\ncaf\xe9\n";
        let decoded = detect_bytes(bytes).unwrap();
        assert!(decoded.text.contains("café"), "got: {}", decoded.text);
        assert_ne!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn test_empty_input_is_undetectable() {
        let err = detect_bytes(b"").unwrap_err();
        assert!(matches!(err, CoreError::EncodingUndetectable(_)));
    }

    #[test]
    fn test_invalid_sequences_are_replaced_not_fatal() {
        // UTF-8 BOM pins the encoding; 0xFF is invalid in UTF-8 and must
        // decode to the replacement character instead of erroring.
        let bytes = b"\xef\xbb\xbfok\xff";
        let decoded = detect_bytes(bytes).unwrap();
        assert_eq!(decoded.encoding, "UTF-8");
        assert!(decoded.text.contains('\u{FFFD}'));
        assert!(decoded.text.contains("ok"));
    }

    #[test]
    fn test_detect_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all("text\nbonjour\n".as_bytes()).unwrap();
        let decoded = detect_file(file.path()).unwrap();
        assert_eq!(decoded.text, "text\nbonjour\n");
    }

    #[test]
    fn test_missing_file_is_undetectable() {
        let err = detect_file(Path::new("/nonexistent/source.csv")).unwrap_err();
        assert!(matches!(err, CoreError::EncodingUndetectable(_)));
    }
}
