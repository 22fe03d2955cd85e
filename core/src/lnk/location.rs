use crate::error::LnkError;
use crate::lnk::network::NetworkVolumeTable;
use crate::lnk::volume::LocalVolumeTable;
use crate::utils::encoding::encode_ascii;
use crate::utils::nom_helper::{nom_data, nom_unsigned_four_bytes};
use crate::utils::strings::extract_utf8_string;
use log::{error, warn};
use serde::Serialize;

pub(crate) const FLAG_LOCAL: u32 = 0x1;
pub(crate) const FLAG_NETWORK: u32 = 0x2;

/// Where the target resides. Exactly one of the two volume tables is
/// populated; the base path only applies to the local case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileLocationInfo {
    pub local_volume: Option<LocalVolumeTable>,
    pub network_volume: Option<NetworkVolumeTable>,
    pub base_path: String,
    pub remaining_path: String,
}

impl FileLocationInfo {
    /// Parse location info: seven header words, one volume table at its
    /// declared offset, then the path strings
    pub(crate) fn parse_location(data: &[u8]) -> Result<(&[u8], FileLocationInfo), LnkError> {
        let (input, length) = nom_unsigned_four_bytes(data).map_err(|_| LnkError::Bounds)?;
        let (input, _header_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, flags) = nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, volume_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, base_path_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (input, network_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;
        let (_, remaining_path_offset) =
            nom_unsigned_four_bytes(input).map_err(|_| LnkError::Bounds)?;

        let header_size = 0x1c;
        if length < header_size {
            return Err(LnkError::Bounds);
        }
        let (remaining_input, table) =
            nom_data(data, length as u64).map_err(|_| LnkError::Bounds)?;

        let mut location = FileLocationInfo {
            local_volume: None,
            network_volume: None,
            base_path: String::new(),
            remaining_path: String::new(),
        };

        if (flags & FLAG_LOCAL) == FLAG_LOCAL {
            let (volume_start, _) =
                nom_data(table, volume_offset as u64).map_err(|_| LnkError::Bounds)?;
            let (_, volume) = LocalVolumeTable::parse_table(volume_start)?;
            location.local_volume = Some(volume);

            // The base path runs from its offset up to the remaining path
            if remaining_path_offset <= base_path_offset {
                error!("[lnk] Location info base path offset is past the remaining path");
                return Err(LnkError::Bounds);
            }
            let span = remaining_path_offset as u64 - base_path_offset as u64 - 1;
            let (base_start, _) =
                nom_data(table, base_path_offset as u64).map_err(|_| LnkError::Bounds)?;
            let (_, base_data) = nom_data(base_start, span).map_err(|_| LnkError::Bounds)?;
            location.base_path = extract_utf8_string(base_data);
        } else if (flags & FLAG_NETWORK) == FLAG_NETWORK {
            let (network_start, _) =
                nom_data(table, network_offset as u64).map_err(|_| LnkError::Bounds)?;
            let (_, network) = NetworkVolumeTable::parse_table(network_start)?;
            location.network_volume = Some(network);
        } else {
            error!("[lnk] Location info flag {flags} selects neither a local nor a network volume");
            return Err(LnkError::CorruptLocation);
        }

        // The remaining path runs to the end of the structure, minus its null
        if length <= remaining_path_offset {
            return Err(LnkError::Bounds);
        }
        let span = length as u64 - remaining_path_offset as u64 - 1;
        let (path_start, _) =
            nom_data(table, remaining_path_offset as u64).map_err(|_| LnkError::Bounds)?;
        let (_, path_data) = nom_data(path_start, span).map_err(|_| LnkError::Bounds)?;
        location.remaining_path = extract_utf8_string(path_data);

        Ok((remaining_input, location))
    }

    /// Serialize location info, recomputing the length and every offset from
    /// the current contents. The local volume takes precedence when both
    /// tables are populated
    pub(crate) fn location_bytes(&self) -> Result<Vec<u8>, LnkError> {
        let (flag, table) = if let Some(volume) = &self.local_volume {
            (FLAG_LOCAL, volume.table_bytes()?)
        } else if let Some(network) = &self.network_volume {
            (FLAG_NETWORK, network.table_bytes()?)
        } else {
            error!("[lnk] Location info has neither volume table populated");
            return Err(LnkError::MissingVolumeTable);
        };

        let mut base_path = Vec::new();
        if flag == FLAG_LOCAL {
            base_path = encode_ascii(&self.base_path)?;
            base_path.push(0);
        } else if !self.base_path.is_empty() {
            warn!("[lnk] Base path is only written for local volumes, dropping it");
        }
        let mut remaining_path = encode_ascii(&self.remaining_path)?;
        remaining_path.push(0);

        let header_size = 0x1c;
        let size = header_size + table.len() + base_path.len() + remaining_path.len();
        if size > u32::MAX as usize {
            error!("[lnk] Location info strings overflow the structure length");
            return Err(LnkError::Encoding);
        }

        let mut buff = Vec::with_capacity(size);
        buff.extend_from_slice(&(size as u32).to_le_bytes());
        let header_offset = header_size as u32;
        buff.extend_from_slice(&header_offset.to_le_bytes());
        buff.extend_from_slice(&flag.to_le_bytes());
        // Both table offset words point at 0x1C, where whichever table was
        // selected begins
        buff.extend_from_slice(&header_offset.to_le_bytes());
        buff.extend_from_slice(&((header_size + table.len()) as u32).to_le_bytes());
        buff.extend_from_slice(&header_offset.to_le_bytes());
        buff.extend_from_slice(
            &((header_size + table.len() + base_path.len()) as u32).to_le_bytes(),
        );
        buff.extend_from_slice(&table);
        buff.extend_from_slice(&base_path);
        buff.extend_from_slice(&remaining_path);
        Ok(buff)
    }
}
