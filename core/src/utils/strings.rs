use crate::utils::encoding::base64_encode_standard;
use log::warn;
use std::string::{FromUtf8Error, FromUtf16Error};

/// Get a UTF16 string from provided bytes data. Invalid UTF16 is base64 encoded
pub(crate) fn extract_utf16_string(data: &[u8]) -> String {
    let result = bytes_to_utf16_string(data);
    match result {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF16 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

/// Get a UTF16 string from provided bytes data
fn bytes_to_utf16_string(data: &[u8]) -> Result<String, FromUtf16Error> {
    let utf16_data: Vec<u16> = data
        .chunks_exact(2)
        .map(|wide_char| u16::from_le_bytes([wide_char[0], wide_char[1]]))
        .collect();

    String::from_utf16(&utf16_data)
}

/// Get a UTF8 string from provided bytes data. Invalid UTF8 is base64 encoded
pub(crate) fn extract_utf8_string(data: &[u8]) -> String {
    let result = bytes_to_utf8_string(data);
    match result {
        Ok(result) => result,
        Err(err) => {
            warn!("[strings] Failed to get UTF8 string: {err:?}");
            base64_encode_standard(data)
        }
    }
}

/// Get a UTF8 string from provided bytes data
fn bytes_to_utf8_string(data: &[u8]) -> Result<String, FromUtf8Error> {
    let result = String::from_utf8(data.to_vec())?;
    let value = result.trim_end_matches('\0').to_string();
    Ok(value)
}

#[cfg(test)]
mod tests {
    use crate::utils::strings::{extract_utf8_string, extract_utf16_string};

    #[test]
    fn test_extract_utf16_string() {
        let test_data = [
            79, 0, 83, 0, 81, 0, 85, 0, 69, 0, 82, 0, 89, 0, 68, 0, 46, 0, 69, 0, 88, 0, 69, 0,
        ];
        assert_eq!(extract_utf16_string(&test_data), "OSQUERYD.EXE")
    }

    #[test]
    fn test_extract_utf16_complex_string() {
        let test = [
            82, 0, 97, 0, 105, 0, 115, 0, 101, 0, 32, 0, 89, 0, 111, 0, 117, 0, 114, 0, 32, 0,
            104, 0, 97, 0, 110, 0, 100, 0, 33, 0, 32, 0, 61, 216, 75, 222, 13, 32, 66, 38, 15,
            254,
        ];
        assert_eq!(extract_utf16_string(&test), "Raise Your hand! 🙋‍♂️")
    }

    #[test]
    fn test_extract_utf16_bad_data() {
        // Lone high surrogate
        let test = [61, 216, 65, 0];
        assert_eq!(extract_utf16_string(&test), "PdhBAA==")
    }

    #[test]
    fn test_extract_utf8_string() {
        let test_data = [79, 83, 81, 85, 69, 82, 89, 68, 46, 69, 88, 69, 0];
        assert_eq!(extract_utf8_string(&test_data), "OSQUERYD.EXE")
    }
}
