use std::fs;
use std::io;
use std::path::Path;

/// Read a file to string, returning `Ok(None)` if it does not exist.
///
/// Only `NotFound` is treated as absence. Every other failure (permissions,
/// the path being a directory, invalid UTF-8) is returned as an error so the
/// caller can tell a missing file apart from an unreadable one.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Read a file to string, replacing invalid UTF-8 sequences with the replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
