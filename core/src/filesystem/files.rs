use crate::error::LnkError;
use log::error;
use std::fs::{read, write};
use std::path::Path;

/// Check if path is a file
pub(crate) fn is_file(path: &str) -> bool {
    let file = Path::new(path);
    if file.is_file() {
        return true;
    }
    false
}

/// Read a whole shortcut file into memory. Shortcut files are small, the
/// largest sections are bounded by two byte length fields
pub(crate) fn read_file(path: &str) -> Result<Vec<u8>, LnkError> {
    if !is_file(path) {
        error!("[lnk] Not a file: {path}");
        return Err(LnkError::ReadFile);
    }

    let read_result = read(path);
    match read_result {
        Ok(result) => Ok(result),
        Err(err) => {
            error!("[lnk] Failed to read file {path}: {err:?}");
            Err(LnkError::ReadFile)
        }
    }
}

/// Write serialized bytes to the provided path
pub(crate) fn write_file(path: &str, data: &[u8]) -> Result<(), LnkError> {
    let write_result = write(path, data);
    match write_result {
        Ok(()) => Ok(()),
        Err(err) => {
            error!("[lnk] Failed to write file {path}: {err:?}");
            Err(LnkError::WriteFile)
        }
    }
}
