//! Directory creation with warn-and-continue semantics

use log::warn;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Create a directory, returning whether it was actually created.
///
/// An existing directory, or a missing parent when `parents` is false, is
/// logged as a warning and reported as `Ok(false)`. Anything else is an error.
pub fn make_dir(path: &Path, parents: bool) -> io::Result<bool> {
    let result = if parents {
        if path.exists() {
            Err(io::Error::from(ErrorKind::AlreadyExists))
        } else {
            fs::create_dir_all(path)
        }
    } else {
        fs::create_dir(path)
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            warn!("Attempted to create {}, but it already exists!", path.display());
            Ok(false)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("Attempted to create {}, but parent directory doesn't exist!", path.display());
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
