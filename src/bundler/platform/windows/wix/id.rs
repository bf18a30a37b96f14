//! Path-derived WiX identifiers.
//!
//! WiX identifiers must not start with a digit, so every derived id is an
//! underscore followed by the lowercase hex MD5 of the path.

use std::path::Path;

/// Fixed identifier of the installation root directory.
pub const INSTALL_DIR_ID: &str = "INSTALLDIR";

/// Derives the identifier for `path`.
///
/// Same path, same id, in every run on every host.
pub fn generate_id(path: &Path) -> String {
    let mut context = md5::Context::new();
    context.consume(path.as_os_str().as_encoded_bytes());
    format!("_{:x}", context.finalize())
}

/// The identifiers one directory contributes to the WiX source.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DirectoryIds {
    /// `Directory/@Id`
    pub directory: String,
    /// `Component/@Id`
    pub component: String,
    /// `RemoveFolder/@Id`
    pub uninstall: String,
}

impl DirectoryIds {
    /// Builds the id set around a directory id.
    pub fn new(directory: impl Into<String>) -> Self {
        let directory = directory.into();
        Self {
            component: format!("{directory}_component"),
            uninstall: format!("{directory}_uninstall"),
            directory,
        }
    }

    /// Id set for `path`, or for the preset id when one is given.
    pub fn for_path(path: &Path, preset: Option<&str>) -> Self {
        match preset {
            Some(id) => Self::new(id),
            None => Self::new(generate_id(path)),
        }
    }
}
