use std::fmt;

#[derive(Debug, PartialEq)]
pub enum LnkError {
    BadSignature,
    BadGuid,
    Bounds,
    MalformedItemList,
    CorruptLocation,
    MissingVolumeTable,
    Encoding,
    ReadFile,
    WriteFile,
}

impl std::error::Error for LnkError {}

impl fmt::Display for LnkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LnkError::BadSignature => write!(f, "Data does not start with the shortcut signature"),
            LnkError::BadGuid => write!(f, "Shortcut header GUID does not match"),
            LnkError::Bounds => write!(f, "Offset or length points past the end of the data"),
            LnkError::MalformedItemList => {
                write!(f, "Shell item list lengths are inconsistent")
            }
            LnkError::CorruptLocation => {
                write!(f, "Location info selects neither a local nor a network volume")
            }
            LnkError::MissingVolumeTable => {
                write!(f, "Location info has no volume table to serialize")
            }
            LnkError::Encoding => write!(f, "String cannot be represented in the target encoding"),
            LnkError::ReadFile => write!(f, "Could not read lnk file"),
            LnkError::WriteFile => write!(f, "Could not write lnk file"),
        }
    }
}
