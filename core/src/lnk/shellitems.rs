use crate::error::LnkError;
use crate::utils::encoding::NameEncoding;
use crate::utils::nom_helper::{nom_data, nom_unsigned_two_bytes};
use log::error;
use serde::Serialize;

/// Canned identifier for the desktop root (My Computer): a CLSID tag byte,
/// one sort byte, then the class id in little endian
pub(crate) const DESKTOP_ROOT: [u8; 18] = [
    0x1f, 0x50, 0xe0, 0x4f, 0xd0, 0x20, 0xea, 0x3a, 0x69, 0x10, 0xa2, 0xd8, 0x08, 0x00, 0x2b,
    0x30, 0x30, 0x9d,
];

/// One opaque shell namespace identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellItemId {
    pub content: Vec<u8>,
}

impl ShellItemId {
    /// The canned desktop root identifier
    pub fn desktop_root() -> ShellItemId {
        ShellItemId {
            content: DESKTOP_ROOT.to_vec(),
        }
    }

    /// Identifier for a drive or filesystem root: `/` plus the path, no tag
    pub fn root(path: &str, encoding: NameEncoding) -> Result<ShellItemId, LnkError> {
        let mut content = encoding.encode(&format!("/{path}"))?;
        content.push(0);
        Ok(ShellItemId { content })
    }

    /// Identifier for one directory segment of the target path
    pub fn directory(name: &str, encoding: NameEncoding) -> Result<ShellItemId, LnkError> {
        ShellItemId::tagged_name(0x31, name, encoding)
    }

    /// Identifier for the target file itself
    pub fn file(name: &str, encoding: NameEncoding) -> Result<ShellItemId, LnkError> {
        ShellItemId::tagged_name(0x32, name, encoding)
    }

    /// Directory and file identifiers share one shape: the type tag, zero fill
    /// up to the name offset, the encoded name, one null
    fn tagged_name(tag: u8, name: &str, encoding: NameEncoding) -> Result<ShellItemId, LnkError> {
        let name_offset = 0x0c;
        let mut content = vec![0; name_offset];
        content[0] = tag;
        content.extend_from_slice(&encoding.encode(name)?);
        content.push(0);
        Ok(ShellItemId { content })
    }
}

/// Parse the identifier list. The leading total covers every entry plus the
/// two byte terminator and the walk must land exactly on it
pub(crate) fn parse_id_list(data: &[u8]) -> Result<(&[u8], Vec<ShellItemId>), LnkError> {
    let (input, total_size) = nom_unsigned_two_bytes(data).map_err(|_| LnkError::Bounds)?;
    let (remaining_input, mut input) =
        nom_data(input, total_size as u64).map_err(|_| LnkError::Bounds)?;

    let mut items: Vec<ShellItemId> = Vec::new();
    let mut consumed = 0;
    loop {
        let (entry_input, item_size) =
            nom_unsigned_two_bytes(input).map_err(|_| LnkError::MalformedItemList)?;
        if item_size == 0 {
            let terminator_size = 2;
            if consumed + terminator_size != total_size as usize {
                error!("[lnk] Identifier list total does not match its entries");
                return Err(LnkError::MalformedItemList);
            }
            break;
        }

        // Entry size covers its own two byte prefix
        let prefix_size = 2;
        if item_size < prefix_size {
            return Err(LnkError::MalformedItemList);
        }
        let (entry_input, content) = nom_data(entry_input, (item_size - prefix_size) as u64)
            .map_err(|_| LnkError::MalformedItemList)?;

        items.push(ShellItemId {
            content: content.to_vec(),
        });
        consumed += item_size as usize;
        input = entry_input;
    }

    Ok((remaining_input, items))
}

/// Serialize the identifier list, recomputing the leading total
pub(crate) fn serialize_id_list(items: &[ShellItemId]) -> Result<Vec<u8>, LnkError> {
    let prefix_size = 2;
    let terminator_size = 2;
    let mut total = terminator_size;
    for item in items {
        total += prefix_size + item.content.len();
    }
    if total > u16::MAX as usize {
        error!("[lnk] Identifier list of {total} bytes does not fit the 16-bit total");
        return Err(LnkError::Encoding);
    }

    let mut buff = Vec::with_capacity(total + prefix_size);
    buff.extend_from_slice(&(total as u16).to_le_bytes());
    for item in items {
        buff.extend_from_slice(&((item.content.len() + prefix_size) as u16).to_le_bytes());
        buff.extend_from_slice(&item.content);
    }
    buff.extend_from_slice(&0u16.to_le_bytes());
    Ok(buff)
}

#[cfg(test)]
mod tests {
    use super::{DESKTOP_ROOT, ShellItemId, parse_id_list, serialize_id_list};
    use crate::error::LnkError;
    use crate::utils::encoding::NameEncoding;

    #[test]
    fn test_parse_id_list() {
        let test = [
            22, 0, 20, 0, 0x1f, 0x50, 0xe0, 0x4f, 0xd0, 0x20, 0xea, 0x3a, 0x69, 0x10, 0xa2, 0xd8,
            0x08, 0x00, 0x2b, 0x30, 0x30, 0x9d, 0, 0,
        ];
        let (input, results) = parse_id_list(&test).unwrap();
        assert!(input.is_empty());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, DESKTOP_ROOT);
    }

    #[test]
    fn test_parse_id_list_two_entries() {
        let test = [9, 0, 3, 0, 65, 4, 0, 66, 66, 0, 0];
        let (_, results) = parse_id_list(&test).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, [65]);
        assert_eq!(results[1].content, [66, 66]);
    }

    #[test]
    fn test_parse_id_list_total_mismatch() {
        let test = [9, 0, 3, 0, 65, 0, 0, 9, 9, 9, 9];
        assert_eq!(
            parse_id_list(&test).unwrap_err(),
            LnkError::MalformedItemList
        );
    }

    #[test]
    fn test_parse_id_list_entry_overrun() {
        let test = [5, 0, 9, 0, 65, 0, 0];
        assert_eq!(
            parse_id_list(&test).unwrap_err(),
            LnkError::MalformedItemList
        );
    }

    #[test]
    fn test_parse_id_list_total_overrun() {
        let test = [99, 0, 1, 2, 3];
        assert_eq!(parse_id_list(&test).unwrap_err(), LnkError::Bounds);
    }

    #[test]
    fn test_serialize_id_list() {
        let items = [
            ShellItemId { content: vec![65] },
            ShellItemId {
                content: vec![66, 66],
            },
        ];
        let result = serialize_id_list(&items).unwrap();
        assert_eq!(result, [9, 0, 3, 0, 65, 4, 0, 66, 66, 0, 0]);

        let (_, reparsed) = parse_id_list(&result).unwrap();
        assert_eq!(reparsed, items);
    }

    #[test]
    fn test_serialize_empty_id_list() {
        let result = serialize_id_list(&[]).unwrap();
        assert_eq!(result, [2, 0, 0, 0]);

        let (_, reparsed) = parse_id_list(&result).unwrap();
        assert!(reparsed.is_empty());
    }

    #[test]
    fn test_file_id() {
        let result = ShellItemId::file("a.txt", NameEncoding::Latin1).unwrap();
        assert_eq!(
            result.content,
            [0x32, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 97, 46, 116, 120, 116, 0]
        );
    }

    #[test]
    fn test_directory_id() {
        let result = ShellItemId::directory("virt", NameEncoding::Latin1).unwrap();
        assert_eq!(
            result.content,
            [0x31, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 118, 105, 114, 116, 0]
        );
    }

    #[test]
    fn test_root_id() {
        let result = ShellItemId::root("E:\\", NameEncoding::Ascii).unwrap();
        assert_eq!(result.content, [47, 69, 58, 92, 0]);
    }

    #[test]
    fn test_root_id_rejects_unencodable() {
        assert_eq!(
            ShellItemId::root("Диск", NameEncoding::Latin1).unwrap_err(),
            LnkError::Encoding
        );
    }

    #[test]
    fn test_desktop_root() {
        let result = ShellItemId::desktop_root();
        assert_eq!(result.content.len(), 18);
        assert_eq!(result.content[0], 0x1f);
    }
}
