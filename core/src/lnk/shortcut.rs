use crate::error::LnkError;
use crate::lnk::header::{AttributeFlag, LinkFlag, LnkHeader};
use crate::lnk::location::FileLocationInfo;
use crate::lnk::shellitems::ShellItemId;
use crate::utils::encoding::NameEncoding;
use serde::Serialize;

/// In memory form of a shortcut file. Scalars mirror the fixed header, each
/// optional section is `Some` when present. Timestamps are Windows filetimes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortcut {
    /// Section flags as read from disk. Serializing derives fresh flags from
    /// which sections are populated, so this is informational
    pub flags: u32,
    pub attributes: u32,
    pub created: u64,
    pub modified: u64,
    pub accessed: u64,
    pub file_size: u32,
    pub icon_index: u32,
    pub show_window: u32,
    pub hot_key: u32,
    pub reserved: u64,
    pub shell_items: Option<Vec<ShellItemId>>,
    pub location: Option<FileLocationInfo>,
    pub description: Option<String>,
    pub relative_path: Option<String>,
    pub working_directory: Option<String>,
    pub command_line_args: Option<String>,
    pub icon_location: Option<String>,
    /// Opaque trailing section, kept verbatim
    pub extra_data: Option<Vec<u8>>,
}

impl Shortcut {
    /// An empty shortcut with the attribute and show window defaults new
    /// shortcuts carry
    pub fn new() -> Shortcut {
        let attribute_normal = 0x80;
        let attribute_offline = 0x1000;
        let show_normal = 1;

        Shortcut {
            flags: 0,
            attributes: attribute_normal | attribute_offline,
            created: 0,
            modified: 0,
            accessed: 0,
            file_size: 0,
            icon_index: 0,
            show_window: show_normal,
            hot_key: 0,
            reserved: 0,
            shell_items: None,
            location: None,
            description: None,
            relative_path: None,
            working_directory: None,
            command_line_args: None,
            icon_location: None,
            extra_data: None,
        }
    }

    /// Build a shortcut whose item list spells out the target path the way
    /// the shell records one: the desktop root, the parent directory as a
    /// rooted path, then the file name. The parent also becomes the working
    /// directory when the path has one
    pub fn from_target(target: &str, encoding: NameEncoding) -> Result<Shortcut, LnkError> {
        let mut shortcut = Shortcut::new();
        let (parent, name) = split_target_path(target);

        let mut items = vec![ShellItemId::desktop_root()];
        if !parent.is_empty() {
            items.push(ShellItemId::root(parent, encoding)?);
            shortcut.working_directory = Some(parent.to_string());
        }
        items.push(ShellItemId::file(name, encoding)?);
        shortcut.shell_items = Some(items);
        Ok(shortcut)
    }

    /// Build a shortcut that points at its target through a relative path
    /// instead of an item list
    pub fn from_relative_path(relative: &str, working_directory: &str) -> Shortcut {
        let mut shortcut = Shortcut::new();
        shortcut.relative_path = Some(relative.to_string());
        shortcut.working_directory = Some(working_directory.to_string());
        shortcut
    }

    /// Names of the section flags currently set
    pub fn link_flags(&self) -> Vec<LinkFlag> {
        LnkHeader::get_flags(&self.flags)
    }

    /// Names of the target attribute bits currently set
    pub fn attribute_flags(&self) -> Vec<AttributeFlag> {
        LnkHeader::get_attributes(&self.attributes)
    }

    /// Display state name for the show window value
    pub fn show_window_name(&self) -> String {
        LnkHeader::show_window_name(&self.show_window)
    }
}

impl Default for Shortcut {
    fn default() -> Shortcut {
        Shortcut::new()
    }
}

/// Split a target path at its last separator, accepting both slash styles
fn split_target_path(target: &str) -> (&str, &str) {
    match target.rfind(['\\', '/']) {
        Some(position) => (&target[..position], &target[position + 1..]),
        None => ("", target),
    }
}

#[cfg(test)]
mod tests {
    use super::{Shortcut, split_target_path};
    use crate::lnk::header::{AttributeFlag, LinkFlag};
    use crate::lnk::shellitems::ShellItemId;
    use crate::utils::encoding::NameEncoding;

    #[test]
    fn test_new() {
        let result = Shortcut::new();
        assert_eq!(result.flags, 0);
        assert_eq!(result.attributes, 0x1080);
        assert_eq!(result.show_window, 1);
        assert_eq!(result.created, 0);
        assert!(result.shell_items.is_none());
        assert!(result.location.is_none());
        assert!(result.description.is_none());
        assert!(result.extra_data.is_none());
    }

    #[test]
    fn test_from_target() {
        let result = Shortcut::from_target("C:\\dir\\a.jar", NameEncoding::Latin1).unwrap();
        assert_eq!(result.working_directory, Some(String::from("C:\\dir")));

        let items = result.shell_items.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ShellItemId::desktop_root());
        assert_eq!(
            items[1],
            ShellItemId::root("C:\\dir", NameEncoding::Latin1).unwrap()
        );
        assert_eq!(
            items[2],
            ShellItemId::file("a.jar", NameEncoding::Latin1).unwrap()
        );
    }

    #[test]
    fn test_from_target_bare_name() {
        let result = Shortcut::from_target("a.jar", NameEncoding::Latin1).unwrap();
        assert!(result.working_directory.is_none());

        let items = result.shell_items.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], ShellItemId::desktop_root());
        assert_eq!(
            items[1],
            ShellItemId::file("a.jar", NameEncoding::Latin1).unwrap()
        );
    }

    #[test]
    fn test_from_relative_path() {
        let result = Shortcut::from_relative_path(".\\tool.exe", "C:\\tools");
        assert_eq!(result.relative_path, Some(String::from(".\\tool.exe")));
        assert_eq!(result.working_directory, Some(String::from("C:\\tools")));
        assert!(result.shell_items.is_none());
    }

    #[test]
    fn test_link_flags() {
        let mut shortcut = Shortcut::new();
        shortcut.flags = 0x8b;
        assert_eq!(
            shortcut.link_flags(),
            [
                LinkFlag::HasTargetIdList,
                LinkFlag::HasLinkInfo,
                LinkFlag::HasRelativePath,
                LinkFlag::HasExtraData
            ]
        );
    }

    #[test]
    fn test_attribute_flags() {
        let result = Shortcut::new();
        assert_eq!(
            result.attribute_flags(),
            [AttributeFlag::Normal, AttributeFlag::Offline]
        );
    }

    #[test]
    fn test_show_window_name() {
        let result = Shortcut::new();
        assert_eq!(result.show_window_name(), "SW_NORMAL");
    }

    #[test]
    fn test_split_target_path() {
        assert_eq!(split_target_path("C:\\dir\\a.jar"), ("C:\\dir", "a.jar"));
        assert_eq!(split_target_path("tools/tool.exe"), ("tools", "tool.exe"));
        assert_eq!(split_target_path("a.jar"), ("", "a.jar"));
    }
}
