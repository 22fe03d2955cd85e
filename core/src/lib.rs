mod error;
mod filesystem;
mod lnk;
mod utils;

pub use crate::error::LnkError;
pub use crate::lnk::header::{AttributeFlag, LinkFlag};
pub use crate::lnk::location::FileLocationInfo;
pub use crate::lnk::network::NetworkVolumeTable;
pub use crate::lnk::parser::{grab_lnk_file, parse_lnk_data};
pub use crate::lnk::shellitems::ShellItemId;
pub use crate::lnk::shortcut::Shortcut;
pub use crate::lnk::volume::{DriveType, LocalVolumeTable};
pub use crate::lnk::writer::{save_lnk_file, serialize_lnk_data};
pub use crate::utils::encoding::NameEncoding;
