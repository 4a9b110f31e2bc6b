//! Shared helpers.

use std::borrow::Cow;

/// Decode bytes to a string.
///
/// Tries UTF-8 first (a BOM is stripped); anything that is not valid UTF-8
/// is decoded as Windows-1252, which is what stray non-UTF-8 Markdown files
/// usually turn out to be.
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        let text = decode_text("Hello -- wörld".as_bytes());
        assert_eq!(text, "Hello -- wörld");
        assert!(matches!(text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBF# Title"), "# Title");
    }

    #[test]
    fn test_decode_falls_back_to_windows_1252() {
        // 0x93/0x94 are curly quotes, 0xE9 is é in Windows-1252.
        assert_eq!(decode_text(b"\x93caf\xE9\x94"), "\u{201C}café\u{201D}");
    }
}
