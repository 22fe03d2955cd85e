use crate::lnk::shortcut::Shortcut;
use crate::utils::time::{filetime_to_unixepoch, unixepoch_to_iso};
use crate::utils::uuid::format_guid_le_bytes;
use std::fmt;

/// Class id items start with this tag and wrap a GUID
const CLASS_ID_TAG: u8 = 0x1f;

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "flags: {:?}", self.link_flags())?;
        writeln!(f, "attributes: {:?}", self.attribute_flags())?;
        writeln!(f, "created: {}", filetime_iso(&self.created))?;
        writeln!(f, "modified: {}", filetime_iso(&self.modified))?;
        writeln!(f, "accessed: {}", filetime_iso(&self.accessed))?;
        writeln!(f, "file size: {}", self.file_size)?;
        writeln!(f, "icon index: {}", self.icon_index)?;
        writeln!(f, "show window: {}", self.show_window_name())?;
        writeln!(f, "hot key: {}", self.hot_key)?;

        if let Some(items) = &self.shell_items {
            for (index, item) in items.iter().enumerate() {
                writeln!(f, "shell item {index}:")?;
                writeln!(f, "  hex: {}", hex_dump(&item.content))?;
                writeln!(f, "  ascii: {}", ascii_dump(&item.content))?;
                let guid_end = 18;
                if item.content.len() >= guid_end && item.content[0] == CLASS_ID_TAG {
                    writeln!(
                        f,
                        "  class id: {}",
                        format_guid_le_bytes(&item.content[2..guid_end])
                    )?;
                }
            }
        }

        if let Some(location) = &self.location {
            writeln!(f, "location:")?;
            writeln!(f, "  base path: {}", location.base_path)?;
            writeln!(f, "  remaining path: {}", location.remaining_path)?;
            if let Some(volume) = &location.local_volume {
                writeln!(f, "  local volume:")?;
                writeln!(f, "    label: {}", volume.label)?;
                writeln!(f, "    drive type: {:?}", volume.drive_type_name())?;
                writeln!(f, "    serial: {:X}", volume.serial)?;
            }
            if let Some(network) = &location.network_volume {
                writeln!(f, "  network volume:")?;
                writeln!(f, "    share: {}", network.share_name)?;
                if let Some(mapping) = &network.mapping {
                    writeln!(f, "    mapping: {mapping}")?;
                }
            }
        }

        if let Some(value) = &self.description {
            writeln!(f, "description: {value}")?;
        }
        if let Some(value) = &self.relative_path {
            writeln!(f, "relative path: {value}")?;
        }
        if let Some(value) = &self.working_directory {
            writeln!(f, "working directory: {value}")?;
        }
        if let Some(value) = &self.command_line_args {
            writeln!(f, "command line: {value}")?;
        }
        if let Some(value) = &self.icon_location {
            writeln!(f, "icon location: {value}")?;
        }
        if let Some(value) = &self.extra_data {
            writeln!(f, "extra data: {}", hex_dump(value))?;
        }
        Ok(())
    }
}

fn filetime_iso(filetime: &u64) -> String {
    unixepoch_to_iso(&filetime_to_unixepoch(filetime))
}

/// Hex rows of eight bytes, continuation rows stay aligned under the label
fn hex_dump(data: &[u8]) -> String {
    let row = 8;
    let mut out = String::new();
    for (index, value) in data.iter().enumerate() {
        if index != 0 {
            if index % row == 0 {
                out.push_str("\n    ");
            } else {
                out.push(' ');
            }
        }
        out.push_str(&format!("{value:02x}"));
    }
    out
}

/// Printable ASCII projection, anything else renders as an underscore
fn ascii_dump(data: &[u8]) -> String {
    data.iter()
        .map(|value| {
            if (0x20..=0x7e).contains(value) {
                *value as char
            } else {
                '_'
            }
        })
        .collect()
}
