pub mod core;
pub mod fs;
pub mod models;

use std::path::Path;

/// Last path component of an entry, or the whole path when there is none
/// (e.g. `/`).
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_os_str().to_string_lossy().into_owned())
}
