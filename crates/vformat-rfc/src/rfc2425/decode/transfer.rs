//! Transfer encodings and character sets (vCard 2.1 §2.1.5, RFC 2425 §5.8.3).

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use encoding_rs::Encoding;

use crate::error::{DecodeError, DecodeErrorKind};

/// Value of an `ENCODING` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// `7BIT`, `8BIT` or no parameter.
    Identity,
    QuotedPrintable,
    /// `BASE64` or `B`.
    Base64,
}

impl TransferEncoding {
    /// Maps an `ENCODING` parameter value.
    ///
    /// ## Errors
    /// Returns [`DecodeErrorKind::UnsupportedEncoding`] for any other name.
    pub fn from_param(s: &str) -> Result<Self, DecodeError> {
        match s.to_ascii_uppercase().as_str() {
            "7BIT" | "8BIT" => Ok(Self::Identity),
            "QUOTED-PRINTABLE" => Ok(Self::QuotedPrintable),
            "BASE64" | "B" => Ok(Self::Base64),
            _ => Err(DecodeError::new(DecodeErrorKind::UnsupportedEncoding, s)),
        }
    }

    /// Removes the transfer encoding.
    ///
    /// ## Errors
    /// Returns [`DecodeErrorKind::InvalidBase64`] for malformed BASE64 data.
    pub fn decode(self, value: &str) -> Result<Vec<u8>, DecodeError> {
        match self {
            Self::Identity => Ok(value.as_bytes().to_vec()),
            Self::QuotedPrintable => Ok(decode_quoted_printable(value.as_bytes())),
            Self::Base64 => {
                let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD.decode(compact.as_bytes()).map_err(|e| {
                    tracing::trace!(error = %e, "BASE64 decoding failed");
                    DecodeError::new(DecodeErrorKind::InvalidBase64, value)
                })
            }
        }
    }
}

fn hex(b: u8) -> Option<u8> {
    char::from(b)
        .to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
}

/// Decodes quoted-printable bytes.
///
/// Handles `=XX` and soft line breaks. A `=` that starts neither is kept
/// literally.
#[must_use]
pub fn decode_quoted_printable(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;

    while let Some(&b) = src.get(pos) {
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }

        let escaped = src
            .get(pos + 1)
            .and_then(|&h| hex(h))
            .zip(src.get(pos + 2).and_then(|&l| hex(l)));
        if let Some((high, low)) = escaped {
            out.push((high << 4) | low);
            pos += 3;
            continue;
        }

        match (src.get(pos + 1), src.get(pos + 2)) {
            (Some(b'\r'), Some(b'\n')) => pos += 3,
            (Some(b'\n'), _) => pos += 2,
            _ => {
                out.push(b);
                pos += 1;
            }
        }
    }

    out
}

/// Decodes bytes using a `CHARSET` label (WHATWG names and aliases).
///
/// ## Errors
/// Returns [`DecodeErrorKind::UnknownCharset`] for an unrecognized label and
/// [`DecodeErrorKind::InvalidCharacterData`] when the bytes are malformed.
pub fn decode_charset(bytes: &[u8], charset: Option<&str>) -> Result<String, DecodeError> {
    let encoding = match charset {
        Some(label) => Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| DecodeError::new(DecodeErrorKind::UnknownCharset, label))?,
        None => encoding_rs::UTF_8,
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(DecodeError::new(
            DecodeErrorKind::InvalidCharacterData,
            String::from_utf8_lossy(bytes),
        ));
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_printable_escapes() {
        assert_eq!(decode_quoted_printable(b"caf=C3=A9"), "café".as_bytes());
        assert_eq!(decode_quoted_printable(b"a=3Db"), b"a=b");
        assert_eq!(decode_quoted_printable(b"line=0D=0Abreak"), b"line\r\nbreak");
    }

    #[test]
    fn quoted_printable_soft_breaks_and_stray_equals() {
        assert_eq!(decode_quoted_printable(b"soft=\r\nbreak"), b"softbreak");
        assert_eq!(decode_quoted_printable(b"soft=\nbreak"), b"softbreak");
        assert_eq!(decode_quoted_printable(b"x=ZZ"), b"x=ZZ");
        assert_eq!(decode_quoted_printable(b"end="), b"end=");
    }

    #[test]
    fn encodings_from_param() {
        assert_eq!(
            TransferEncoding::from_param("b").unwrap(),
            TransferEncoding::Base64
        );
        assert_eq!(
            TransferEncoding::from_param("8bit").unwrap(),
            TransferEncoding::Identity
        );
        let err = TransferEncoding::from_param("X-UUENCODE").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnsupportedEncoding);
    }

    #[test]
    fn base64_ignores_whitespace() {
        let bytes = TransferEncoding::Base64.decode("SGVs bG8=\n").unwrap();
        assert_eq!(bytes, b"Hello");

        let err = TransferEncoding::Base64.decode("not base64!").unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::InvalidBase64);
    }

    #[test]
    fn charsets() {
        assert_eq!(
            decode_charset(&[0x63, 0x61, 0x66, 0xE9], Some("ISO-8859-1")).unwrap(),
            "café"
        );
        assert_eq!(decode_charset("žluť".as_bytes(), None).unwrap(), "žluť");
        assert_eq!(
            decode_charset(b"x", Some("X-KLINGON")).unwrap_err().kind,
            DecodeErrorKind::UnknownCharset
        );
        assert_eq!(
            decode_charset(&[0xFF, 0xFE, 0xFD], Some("utf-8")).unwrap_err().kind,
            DecodeErrorKind::InvalidCharacterData
        );
    }
}
