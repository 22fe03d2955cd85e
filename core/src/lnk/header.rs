use crate::error::LnkError;
use crate::utils::nom_helper::{
    nom_data, nom_unsigned_eight_bytes, nom_unsigned_four_bytes,
};
use serde::Serialize;

/// First four bytes of every shortcut file
pub(crate) const SIGNATURE: [u8; 4] = [0x4c, 0x00, 0x00, 0x00];
/// Shell link class id, little endian 00021401-0000-0000-c000-000000000046
pub(crate) const HEADER_GUID: [u8; 16] = [
    0x01, 0x14, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0xc0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x46,
];

/// Flag bits controlling which sections follow the header
pub(crate) const FLAG_HAS_TARGET_ID_LIST: u32 = 0x1;
pub(crate) const FLAG_HAS_LINK_INFO: u32 = 0x2;
pub(crate) const FLAG_HAS_NAME: u32 = 0x4;
pub(crate) const FLAG_HAS_RELATIVE_PATH: u32 = 0x8;
pub(crate) const FLAG_HAS_WORKING_DIRECTORY: u32 = 0x10;
pub(crate) const FLAG_HAS_ARGUMENTS: u32 = 0x20;
pub(crate) const FLAG_HAS_ICON_LOCATION: u32 = 0x40;
pub(crate) const FLAG_HAS_EXTRA_DATA: u32 = 0x80;

#[derive(Debug)]
pub(crate) struct LnkHeader {
    pub(crate) flags: u32,
    pub(crate) attributes: u32,
    pub(crate) created: u64,
    pub(crate) modified: u64,
    pub(crate) accessed: u64,
    pub(crate) file_size: u32,
    pub(crate) icon_index: u32,
    pub(crate) show_window: u32,
    pub(crate) hot_key: u32,
    pub(crate) reserved: u64,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum LinkFlag {
    HasTargetIdList,
    HasLinkInfo,
    HasName,
    HasRelativePath,
    HasWorkingDirectory,
    HasArguments,
    HasIconLocation,
    HasExtraData,
}

#[derive(Debug, PartialEq, Serialize)]
pub enum AttributeFlag {
    ReadOnly,
    Hidden,
    System,
    VolumeLabel,
    Directory,
    Archive,
    Encrypted,
    Normal,
    Temporary,
    SparseFile,
    ReparsePoint,
    Compressed,
    Offline,
}

impl LnkHeader {
    /// Parse the fixed 0x4C byte header. Signature and GUID are expected to be
    /// checked before interpreting any field
    pub(crate) fn parse_header(data: &[u8]) -> nom::IResult<&[u8], LnkHeader> {
        let signature_guid_size = 20;
        let (input, _) = nom_data(data, signature_guid_size)?;
        let (input, flags) = nom_unsigned_four_bytes(input)?;
        let (input, attributes) = nom_unsigned_four_bytes(input)?;

        let (input, created) = nom_unsigned_eight_bytes(input)?;
        let (input, modified) = nom_unsigned_eight_bytes(input)?;
        let (input, accessed) = nom_unsigned_eight_bytes(input)?;

        let (input, file_size) = nom_unsigned_four_bytes(input)?;
        let (input, icon_index) = nom_unsigned_four_bytes(input)?;
        let (input, show_window) = nom_unsigned_four_bytes(input)?;
        let (input, hot_key) = nom_unsigned_four_bytes(input)?;
        let (input, reserved) = nom_unsigned_eight_bytes(input)?;

        let header = LnkHeader {
            flags,
            attributes,
            created,
            modified,
            accessed,
            file_size,
            icon_index,
            show_window,
            hot_key,
            reserved,
        };

        Ok((input, header))
    }

    /// Verify the signature and class GUID before any field is interpreted
    pub(crate) fn check_header(data: &[u8]) -> Result<(), LnkError> {
        if !data.starts_with(&SIGNATURE) {
            return Err(LnkError::BadSignature);
        }
        let guid_end = SIGNATURE.len() + HEADER_GUID.len();
        if data.len() < guid_end || data[SIGNATURE.len()..guid_end] != HEADER_GUID {
            return Err(LnkError::BadGuid);
        }
        Ok(())
    }

    /// Get the section flags set in a `Shortcut` header
    pub(crate) fn get_flags(flags: &u32) -> Vec<LinkFlag> {
        let mut lnk_flags: Vec<LinkFlag> = Vec::new();

        // A shortcut file may have multiple flags
        if (flags & FLAG_HAS_TARGET_ID_LIST) == FLAG_HAS_TARGET_ID_LIST {
            lnk_flags.push(LinkFlag::HasTargetIdList);
        }
        if (flags & FLAG_HAS_LINK_INFO) == FLAG_HAS_LINK_INFO {
            lnk_flags.push(LinkFlag::HasLinkInfo);
        }
        if (flags & FLAG_HAS_NAME) == FLAG_HAS_NAME {
            lnk_flags.push(LinkFlag::HasName);
        }
        if (flags & FLAG_HAS_RELATIVE_PATH) == FLAG_HAS_RELATIVE_PATH {
            lnk_flags.push(LinkFlag::HasRelativePath);
        }
        if (flags & FLAG_HAS_WORKING_DIRECTORY) == FLAG_HAS_WORKING_DIRECTORY {
            lnk_flags.push(LinkFlag::HasWorkingDirectory);
        }
        if (flags & FLAG_HAS_ARGUMENTS) == FLAG_HAS_ARGUMENTS {
            lnk_flags.push(LinkFlag::HasArguments);
        }
        if (flags & FLAG_HAS_ICON_LOCATION) == FLAG_HAS_ICON_LOCATION {
            lnk_flags.push(LinkFlag::HasIconLocation);
        }
        if (flags & FLAG_HAS_EXTRA_DATA) == FLAG_HAS_EXTRA_DATA {
            lnk_flags.push(LinkFlag::HasExtraData);
        }

        lnk_flags
    }

    /// Get target attribute flags from a `Shortcut` header
    pub(crate) fn get_attributes(attributes: &u32) -> Vec<AttributeFlag> {
        let mut attrs: Vec<AttributeFlag> = Vec::new();

        let read_only = 0x1;
        let hidden = 0x2;
        let system = 0x4;
        let volume_label = 0x8;
        let directory = 0x10;
        let archive = 0x20;
        let encrypted = 0x40;
        let normal = 0x80;
        let temporary = 0x100;
        let sparse_file = 0x200;
        let reparse_point = 0x400;
        let compressed = 0x800;
        let offline = 0x1000;

        if (attributes & read_only) == read_only {
            attrs.push(AttributeFlag::ReadOnly);
        }
        if (attributes & hidden) == hidden {
            attrs.push(AttributeFlag::Hidden);
        }
        if (attributes & system) == system {
            attrs.push(AttributeFlag::System);
        }
        if (attributes & volume_label) == volume_label {
            attrs.push(AttributeFlag::VolumeLabel);
        }
        if (attributes & directory) == directory {
            attrs.push(AttributeFlag::Directory);
        }
        if (attributes & archive) == archive {
            attrs.push(AttributeFlag::Archive);
        }
        if (attributes & encrypted) == encrypted {
            attrs.push(AttributeFlag::Encrypted);
        }
        if (attributes & normal) == normal {
            attrs.push(AttributeFlag::Normal);
        }
        if (attributes & temporary) == temporary {
            attrs.push(AttributeFlag::Temporary);
        }
        if (attributes & sparse_file) == sparse_file {
            attrs.push(AttributeFlag::SparseFile);
        }
        if (attributes & reparse_point) == reparse_point {
            attrs.push(AttributeFlag::ReparsePoint);
        }
        if (attributes & compressed) == compressed {
            attrs.push(AttributeFlag::Compressed);
        }
        if (attributes & offline) == offline {
            attrs.push(AttributeFlag::Offline);
        }

        attrs
    }

    /// Name for a show window code. There are ten documented display states
    pub(crate) fn show_window_name(value: &u32) -> String {
        match value {
            0 => String::from("SW_HIDE"),
            1 => String::from("SW_NORMAL"),
            2 => String::from("SW_SHOWMINIMIZED"),
            3 => String::from("SW_SHOWMAXIMIZED"),
            4 => String::from("SW_SHOWNOACTIVATE"),
            5 => String::from("SW_SHOW"),
            6 => String::from("SW_MINIMIZE"),
            7 => String::from("SW_SHOWMINNOACTIVE"),
            8 => String::from("SW_SHOWNA"),
            9 => String::from("SW_RESTORE"),
            10 => String::from("SW_SHOWDEFAULT"),
            _ => format!("UNKNOWN({value})"),
        }
    }
}
