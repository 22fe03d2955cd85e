use crate::error::LnkError;
use crate::utils::encoding::encode_ascii;
use crate::utils::nom_helper::{nom_data, nom_unsigned_four_bytes};
use crate::utils::strings::extract_utf8_string;
use log::error;
use serde::Serialize;

/// Reserved word value for tables built in memory
const RESERVED_DEFAULT: u32 = 0x0002_0000;

/// Identity of the network share the target resides on. The second and fourth
/// header words are repurposed from their documented meaning: they carry the
/// byte count (null included) and offset of an optional local share mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkVolumeTable {
    pub share_name: String,
    pub mapping: Option<String>,
    pub reserved: u32,
}

impl NetworkVolumeTable {
    /// Table for a share with no local mapping
    pub fn new(share_name: &str) -> NetworkVolumeTable {
        NetworkVolumeTable {
            share_name: share_name.to_string(),
            mapping: None,
            reserved: RESERVED_DEFAULT,
        }
    }

    /// Parse a network volume table at its declared offsets
    pub(crate) fn parse_table(data: &[u8]) -> Result<(&[u8], NetworkVolumeTable), LnkError> {
        let (input, length) = nom_unsigned_four_bytes(data).map_err(|_| LnkError::Bounds)?;
        let (input, mapping_size) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, share_offset) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, mapping_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (_, reserved) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;

        // Length covers the five header words, the share name and its null,
        // and the mapping bytes counted by mapping_size
        let header_size = 0x14;
        let fixed_size = header_size as u64 + mapping_size as u64 + 1;
        if (length as u64) < fixed_size {
            error!(
                "[lnk] Network volume table length {length} is inconsistent with mapping size {mapping_size}"
            );
            return Err(LnkError::Bounds);
        }
        let (remaining_input, table) =
            nom_data(data, length as u64).map_err(|_| LnkError::Bounds)?;

        let share_size = length as u64 - fixed_size;
        let (share_start, _) = nom_data(table, share_offset as u64).map_err(|_| LnkError::Bounds)?;
        let (_, share_data) = nom_data(share_start, share_size).map_err(|_| LnkError::Bounds)?;

        let mut network = NetworkVolumeTable {
            share_name: extract_utf8_string(share_data),
            mapping: None,
            reserved,
        };

        if mapping_offset != 0 {
            if mapping_size == 0 {
                error!("[lnk] Network volume table points at a mapping with no counted bytes");
                return Err(LnkError::Bounds);
            }
            let (mapping_start, _) =
                nom_data(table, mapping_offset as u64).map_err(|_| LnkError::Bounds)?;
            let (_, mapping_data) =
                nom_data(mapping_start, mapping_size as u64 - 1).map_err(|_| LnkError::Bounds)?;
            network.mapping = Some(extract_utf8_string(mapping_data));
        }

        Ok((remaining_input, network))
    }

    /// Serialize the table, recomputing its length and offsets from the
    /// current strings. The mapping offset stays zero when there is no mapping
    pub(crate) fn table_bytes(&self) -> Result<Vec<u8>, LnkError> {
        let share = encode_ascii(&self.share_name)?;
        let mapping = match &self.mapping {
            Some(value) => Some(encode_ascii(value)?),
            None => None,
        };

        let header_size = 0x14;
        let share_size = share.len() + 1;
        let mapping_size = match &mapping {
            Some(value) => value.len() + 1,
            None => 0,
        };
        let size = header_size + share_size + mapping_size;
        if size > u32::MAX as usize {
            error!("[lnk] Network share strings overflow the table length");
            return Err(LnkError::Encoding);
        }

        let mut buff = Vec::with_capacity(size);
        buff.extend_from_slice(&(size as u32).to_le_bytes());
        buff.extend_from_slice(&(mapping_size as u32).to_le_bytes());
        let share_offset = header_size as u32;
        buff.extend_from_slice(&share_offset.to_le_bytes());
        let mapping_offset = if mapping.is_some() {
            (header_size + share_size) as u32
        } else {
            0
        };
        buff.extend_from_slice(&mapping_offset.to_le_bytes());
        buff.extend_from_slice(&self.reserved.to_le_bytes());
        buff.extend_from_slice(&share);
        buff.push(0);
        if let Some(value) = &mapping {
            buff.extend_from_slice(value);
            buff.push(0);
        }
        Ok(buff)
    }
}
