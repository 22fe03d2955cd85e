use crate::error::LnkError;
use crate::filesystem::files::write_file;
use crate::lnk::header::{
    FLAG_HAS_ARGUMENTS, FLAG_HAS_EXTRA_DATA, FLAG_HAS_ICON_LOCATION, FLAG_HAS_LINK_INFO,
    FLAG_HAS_NAME, FLAG_HAS_RELATIVE_PATH, FLAG_HAS_TARGET_ID_LIST, FLAG_HAS_WORKING_DIRECTORY,
    HEADER_GUID, SIGNATURE,
};
use crate::lnk::shellitems::serialize_id_list;
use crate::lnk::shortcut::Shortcut;
use crate::lnk::strings::{write_data_field, write_string_field};

/// Serialize a shortcut. The flag word is derived from which sections are
/// populated, the stored `flags` value is ignored
pub fn serialize_lnk_data(shortcut: &Shortcut) -> Result<Vec<u8>, LnkError> {
    // Variable sections are serialized up front so a failure leaves no
    // partial output
    let mut id_list = None;
    if let Some(items) = &shortcut.shell_items {
        id_list = Some(serialize_id_list(items)?);
    }
    let mut location = None;
    if let Some(info) = &shortcut.location {
        location = Some(info.location_bytes()?);
    }

    let mut flags = 0;
    if id_list.is_some() {
        flags |= FLAG_HAS_TARGET_ID_LIST;
    }
    if location.is_some() {
        flags |= FLAG_HAS_LINK_INFO;
    }
    if shortcut.description.is_some() {
        flags |= FLAG_HAS_NAME;
    }
    if shortcut.relative_path.is_some() {
        flags |= FLAG_HAS_RELATIVE_PATH;
    }
    if shortcut.working_directory.is_some() {
        flags |= FLAG_HAS_WORKING_DIRECTORY;
    }
    if shortcut.command_line_args.is_some() {
        flags |= FLAG_HAS_ARGUMENTS;
    }
    if shortcut.icon_location.is_some() {
        flags |= FLAG_HAS_ICON_LOCATION;
    }
    if shortcut.extra_data.is_some() {
        flags |= FLAG_HAS_EXTRA_DATA;
    }

    let mut buff = Vec::new();
    buff.extend_from_slice(&SIGNATURE);
    buff.extend_from_slice(&HEADER_GUID);
    buff.extend_from_slice(&flags.to_le_bytes());
    buff.extend_from_slice(&shortcut.attributes.to_le_bytes());
    buff.extend_from_slice(&shortcut.created.to_le_bytes());
    buff.extend_from_slice(&shortcut.modified.to_le_bytes());
    buff.extend_from_slice(&shortcut.accessed.to_le_bytes());
    buff.extend_from_slice(&shortcut.file_size.to_le_bytes());
    buff.extend_from_slice(&shortcut.icon_index.to_le_bytes());
    buff.extend_from_slice(&shortcut.show_window.to_le_bytes());
    buff.extend_from_slice(&shortcut.hot_key.to_le_bytes());
    buff.extend_from_slice(&shortcut.reserved.to_le_bytes());

    if let Some(data) = id_list {
        buff.extend_from_slice(&data);
    }
    if let Some(data) = location {
        buff.extend_from_slice(&data);
    }
    if let Some(value) = &shortcut.description {
        write_string_field(&mut buff, value)?;
    }
    if let Some(value) = &shortcut.relative_path {
        write_string_field(&mut buff, value)?;
    }
    if let Some(value) = &shortcut.working_directory {
        write_string_field(&mut buff, value)?;
    }
    if let Some(value) = &shortcut.command_line_args {
        write_string_field(&mut buff, value)?;
    }
    if let Some(value) = &shortcut.icon_location {
        write_string_field(&mut buff, value)?;
    }
    if let Some(value) = &shortcut.extra_data {
        write_data_field(&mut buff, value)?;
    }

    Ok(buff)
}

/// Serialize a shortcut and write it to the provided path
pub fn save_lnk_file(path: &str, shortcut: &Shortcut) -> Result<(), LnkError> {
    let data = serialize_lnk_data(shortcut)?;
    write_file(path, &data)
}
