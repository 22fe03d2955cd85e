use crate::error::LnkError;
use crate::filesystem::files::read_file;
use crate::lnk::header::{
    FLAG_HAS_ARGUMENTS, FLAG_HAS_EXTRA_DATA, FLAG_HAS_ICON_LOCATION, FLAG_HAS_LINK_INFO,
    FLAG_HAS_NAME, FLAG_HAS_RELATIVE_PATH, FLAG_HAS_TARGET_ID_LIST, FLAG_HAS_WORKING_DIRECTORY,
    LnkHeader,
};
use crate::lnk::location::FileLocationInfo;
use crate::lnk::shellitems::parse_id_list;
use crate::lnk::shortcut::Shortcut;
use crate::lnk::strings::{read_data_field, read_string_field};
use crate::utils::nom_helper::{nom_data, nom_unsigned_two_bytes};
use log::warn;

/// Read a shortcut file from disk and parse it
pub fn grab_lnk_file(path: &str) -> Result<Shortcut, LnkError> {
    let data = read_file(path)?;
    parse_lnk_data(&data)
}

/// Parse shortcut bytes. The header flags select which sections follow the
/// fixed header, each present section appears in its fixed order
pub fn parse_lnk_data(data: &[u8]) -> Result<Shortcut, LnkError> {
    LnkHeader::check_header(data)?;
    let (mut input, header) = LnkHeader::parse_header(data).map_err(|_| LnkError::Bounds)?;

    let mut shortcut = Shortcut::new();
    shortcut.flags = header.flags;
    shortcut.attributes = header.attributes;
    shortcut.created = header.created;
    shortcut.modified = header.modified;
    shortcut.accessed = header.accessed;
    shortcut.file_size = header.file_size;
    shortcut.icon_index = header.icon_index;
    shortcut.show_window = header.show_window;
    shortcut.hot_key = header.hot_key;
    shortcut.reserved = header.reserved;

    if (header.flags & FLAG_HAS_TARGET_ID_LIST) == FLAG_HAS_TARGET_ID_LIST {
        let (remaining, items) = parse_id_list(input)?;
        shortcut.shell_items = Some(items);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_LINK_INFO) == FLAG_HAS_LINK_INFO {
        let (remaining, location) = FileLocationInfo::parse_location(input)?;
        shortcut.location = Some(location);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_NAME) == FLAG_HAS_NAME {
        let (remaining, value) = read_string_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.description = Some(value);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_RELATIVE_PATH) == FLAG_HAS_RELATIVE_PATH {
        let (remaining, value) = read_string_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.relative_path = Some(value);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_WORKING_DIRECTORY) == FLAG_HAS_WORKING_DIRECTORY {
        let (remaining, value) = read_string_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.working_directory = Some(value);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_ARGUMENTS) == FLAG_HAS_ARGUMENTS {
        let (remaining, value) = read_string_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.command_line_args = Some(value);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_ICON_LOCATION) == FLAG_HAS_ICON_LOCATION {
        let (remaining, value) = read_string_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.icon_location = Some(value);
        input = remaining;
    }

    if (header.flags & FLAG_HAS_EXTRA_DATA) == FLAG_HAS_EXTRA_DATA {
        let (remaining, value) = read_data_field(input).map_err(|_| LnkError::Bounds)?;
        shortcut.extra_data = Some(value);
        input = remaining;
    }

    walk_extra_blocks(input)?;
    Ok(shortcut)
}

/// Skip trailing extra blocks. Writers that emit them chain two byte sized
/// blocks ending with a zero size, writers that do not simply stop after the
/// last flagged section
fn walk_extra_blocks(data: &[u8]) -> Result<(), LnkError> {
    let mut input = data;
    while !input.is_empty() {
        let (remaining, size) = nom_unsigned_two_bytes(input).map_err(|_| LnkError::Bounds)?;
        if size == 0 {
            if !remaining.is_empty() {
                warn!(
                    "[lnk] {} trailing bytes after the terminal extra block",
                    remaining.len()
                );
            }
            return Ok(());
        }
        let (remaining, _) = nom_data(remaining, size as u64).map_err(|_| LnkError::Bounds)?;
        input = remaining;
    }
    Ok(())
}
