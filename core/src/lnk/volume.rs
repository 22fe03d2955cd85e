use crate::error::LnkError;
use crate::utils::encoding::encode_ascii;
use crate::utils::nom_helper::{nom_data, nom_unsigned_four_bytes};
use crate::utils::strings::extract_utf8_string;
use log::error;
use serde::Serialize;

/// Identity of the local volume the target resides on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalVolumeTable {
    pub drive_type: u32,
    pub serial: u32,
    pub label: String,
}

#[derive(Debug, PartialEq)]
pub enum DriveType {
    DriveUnknown,
    DriveNotRootDir,
    DriveRemovable,
    DriveFixed,
    DriveRemote,
    DriveCdrom,
    DriveRamdisk,
    Unknown,
}

impl LocalVolumeTable {
    /// Table for a label with no drive type or serial recorded
    pub fn new(label: &str) -> LocalVolumeTable {
        LocalVolumeTable {
            drive_type: 0,
            serial: 0,
            label: label.to_string(),
        }
    }

    /// Parse a local volume table. The label follows four header words and its
    /// size comes from the declared table length
    pub(crate) fn parse_table(data: &[u8]) -> Result<(&[u8], LocalVolumeTable), LnkError> {
        let (input, length) = nom_unsigned_four_bytes(data).map_err(|_| LnkError::Bounds)?;
        let (input, drive_type) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, serial) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, _label_offset) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;

        // Length covers the four header words, the label and its null
        let header_size = 0x10;
        if length <= header_size {
            error!("[lnk] Local volume table length {length} leaves no room for a label");
            return Err(LnkError::Bounds);
        }
        let (remaining_input, _) = nom_data(data, length as u64).map_err(|_| LnkError::Bounds)?;

        let label_size = (length - header_size - 1) as u64;
        let (_, label_data) = nom_data(input, label_size).map_err(|_| LnkError::Bounds)?;

        let table = LocalVolumeTable {
            drive_type,
            serial,
            label: extract_utf8_string(label_data),
        };
        Ok((remaining_input, table))
    }

    /// Serialize the table, recomputing its length from the current label
    pub(crate) fn table_bytes(&self) -> Result<Vec<u8>, LnkError> {
        let label = encode_ascii(&self.label)?;
        let header_size = 0x10;
        let size = header_size + label.len() + 1;
        if size > u32::MAX as usize {
            error!(
                "[lnk] Volume label of {} bytes overflows the table length",
                label.len()
            );
            return Err(LnkError::Encoding);
        }

        let mut buff = Vec::with_capacity(size);
        buff.extend_from_slice(&(size as u32).to_le_bytes());
        buff.extend_from_slice(&self.drive_type.to_le_bytes());
        buff.extend_from_slice(&self.serial.to_le_bytes());
        let label_offset: u32 = 0x10;
        buff.extend_from_slice(&label_offset.to_le_bytes());
        buff.extend_from_slice(&label);
        buff.push(0);
        Ok(buff)
    }

    /// Name for the drive type code
    pub fn drive_type_name(&self) -> DriveType {
        match self.drive_type {
            0 => DriveType::DriveUnknown,
            1 => DriveType::DriveNotRootDir,
            2 => DriveType::DriveRemovable,
            3 => DriveType::DriveFixed,
            4 => DriveType::DriveRemote,
            5 => DriveType::DriveCdrom,
            6 => DriveType::DriveRamdisk,
            _ => DriveType::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DriveType, LocalVolumeTable};
    use crate::error::LnkError;

    #[test]
    fn test_parse_table() {
        let test = [
            20, 0, 0, 0, 3, 0, 0, 0, 0xb1, 0xa2, 0x60, 0x46, 16, 0, 0, 0, 119, 105, 110, 0,
        ];
        let (input, result) = LocalVolumeTable::parse_table(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(result.drive_type, 3);
        assert_eq!(result.serial, 0x4660a2b1);
        assert_eq!(result.label, "win");
    }

    #[test]
    fn test_parse_table_no_label_room() {
        let test = [16, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 16, 0, 0, 0];
        assert_eq!(
            LocalVolumeTable::parse_table(&test).unwrap_err(),
            LnkError::Bounds
        );
    }

    #[test]
    fn test_parse_table_truncated() {
        let test = [20, 0, 0, 0, 3, 0, 0, 0];
        assert_eq!(
            LocalVolumeTable::parse_table(&test).unwrap_err(),
            LnkError::Bounds
        );
    }

    #[test]
    fn test_table_bytes() {
        let table = LocalVolumeTable {
            drive_type: 3,
            serial: 0x4660a2b1,
            label: String::from("win"),
        };
        let result = table.table_bytes().unwrap();
        assert_eq!(
            result,
            [20, 0, 0, 0, 3, 0, 0, 0, 0xb1, 0xa2, 0x60, 0x46, 16, 0, 0, 0, 119, 105, 110, 0]
        );

        let (_, reparsed) = LocalVolumeTable::parse_table(&result).unwrap();
        assert_eq!(reparsed, table);
    }

    #[test]
    fn test_table_bytes_empty_label() {
        let table = LocalVolumeTable::new("");
        let result = table.table_bytes().unwrap();
        assert_eq!(result, [17, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 16, 0, 0, 0, 0]);

        let (_, reparsed) = LocalVolumeTable::parse_table(&result).unwrap();
        assert_eq!(reparsed.label, "");
    }

    #[test]
    fn test_table_bytes_rejects_non_ascii() {
        let table = LocalVolumeTable::new("zówka");
        assert_eq!(table.table_bytes().unwrap_err(), LnkError::Encoding);
    }

    #[test]
    fn test_drive_type_name() {
        let mut table = LocalVolumeTable::new("win");
        table.drive_type = 3;
        assert_eq!(table.drive_type_name(), DriveType::DriveFixed);

        table.drive_type = 99;
        assert_eq!(table.drive_type_name(), DriveType::Unknown);
    }
}
