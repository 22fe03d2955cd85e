use crate::error::LnkError;
use crate::utils::nom_helper::{nom_data, nom_unsigned_two_bytes};
use crate::utils::strings::extract_utf16_string;
use log::error;

/// Read one length-prefixed string field. The prefix counts UTF-16 code units,
/// not bytes, and no terminator follows the payload
pub(crate) fn read_string_field(data: &[u8]) -> nom::IResult<&[u8], String> {
    let (input, count) = nom_unsigned_two_bytes(data)?;

    // Two bytes per UTF-16 code unit
    let utf16_size = 2;
    let (input, string_data) = nom_data(input, count as u64 * utf16_size)?;
    Ok((input, extract_utf16_string(string_data)))
}

/// Append one length-prefixed string field
pub(crate) fn write_string_field(buff: &mut Vec<u8>, value: &str) -> Result<(), LnkError> {
    let units: Vec<u16> = value.encode_utf16().collect();
    if units.len() > u16::MAX as usize {
        error!(
            "[lnk] String field of {} UTF-16 units does not fit the 16-bit count",
            units.len()
        );
        return Err(LnkError::Encoding);
    }
    buff.extend_from_slice(&(units.len() as u16).to_le_bytes());
    for unit in units {
        buff.extend_from_slice(&unit.to_le_bytes());
    }
    Ok(())
}

/// Read the opaque extra blob. Unlike the string fields its prefix counts bytes
pub(crate) fn read_data_field(data: &[u8]) -> nom::IResult<&[u8], Vec<u8>> {
    let (input, count) = nom_unsigned_two_bytes(data)?;
    let (input, blob) = nom_data(input, count as u64)?;
    Ok((input, blob.to_vec()))
}

/// Append the opaque extra blob
pub(crate) fn write_data_field(buff: &mut Vec<u8>, value: &[u8]) -> Result<(), LnkError> {
    if value.len() > u16::MAX as usize {
        error!(
            "[lnk] Extra data blob of {} bytes does not fit the 16-bit count",
            value.len()
        );
        return Err(LnkError::Encoding);
    }
    buff.extend_from_slice(&(value.len() as u16).to_le_bytes());
    buff.extend_from_slice(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{read_data_field, read_string_field, write_data_field, write_string_field};
    use crate::error::LnkError;

    #[test]
    fn test_read_string_field() {
        let test = [4, 0, 119, 0, 111, 0, 114, 0, 107, 0];
        let (input, result) = read_string_field(&test).unwrap();
        assert_eq!(result, "work");
        assert!(input.is_empty());
    }

    #[test]
    fn test_read_string_field_truncated() {
        let test = [9, 0, 119, 0, 111, 0];
        assert!(read_string_field(&test).is_err());
    }

    #[test]
    fn test_write_string_field() {
        let mut buff = Vec::new();
        write_string_field(&mut buff, ".\\gość.txt").unwrap();

        let (input, result) = read_string_field(&buff).unwrap();
        assert_eq!(result, ".\\gość.txt");
        assert!(input.is_empty());
    }

    #[test]
    fn test_write_string_field_empty() {
        let mut buff = Vec::new();
        write_string_field(&mut buff, "").unwrap();
        assert_eq!(buff, [0, 0]);
    }

    #[test]
    fn test_write_string_field_too_long() {
        let mut buff = Vec::new();
        let value = "a".repeat(65536);
        assert_eq!(
            write_string_field(&mut buff, &value).unwrap_err(),
            LnkError::Encoding
        );
    }

    #[test]
    fn test_read_data_field() {
        let test = [3, 0, 1, 2, 3, 9, 9];
        let (input, result) = read_data_field(&test).unwrap();
        assert_eq!(result, [1, 2, 3]);
        assert_eq!(input, [9, 9]);
    }

    #[test]
    fn test_write_data_field() {
        let mut buff = Vec::new();
        write_data_field(&mut buff, &[0xaa, 0xbb]).unwrap();
        assert_eq!(buff, [2, 0, 0xaa, 0xbb]);
    }
}
