use crate::error::LnkError;
use base64::{Engine, engine::general_purpose};
use log::error;

/// Base64 encode data using the STANDARD engine (alphabet along with "+" and "/")
pub(crate) fn base64_encode_standard(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Single byte text encodings for legacy shell item names.
/// Shell item identifiers predate Unicode support and store names one byte per
/// character in a locale dependent code page. The original files this codec
/// targets were produced with whatever code page the authoring system used, so
/// the encoding is a caller choice rather than a constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NameEncoding {
    /// Code points through 0x7F
    Ascii,
    /// ISO 8859-1, code points through 0xFF
    Latin1,
}

impl NameEncoding {
    /// Encode a name one byte per character. Characters outside the encoding
    /// and NULs (the wire uses NUL terminators) are errors
    pub(crate) fn encode(&self, value: &str) -> Result<Vec<u8>, LnkError> {
        let max = match self {
            NameEncoding::Ascii => 0x7f,
            NameEncoding::Latin1 => 0xff,
        };

        let mut encoded = Vec::with_capacity(value.len());
        for value_char in value.chars() {
            let code = value_char as u32;
            if code == 0 || code > max {
                error!("[encoding] Character {value_char:?} not representable in {self:?}");
                return Err(LnkError::Encoding);
            }
            encoded.push(code as u8);
        }
        Ok(encoded)
    }
}

/// Encode an ASCIZ payload string. The volume, share, and path strings inside
/// the location structure are plain ASCII on the wire
pub(crate) fn encode_ascii(value: &str) -> Result<Vec<u8>, LnkError> {
    NameEncoding::Ascii.encode(value)
}
