//! Configured path validation.

use std::path::Path;

use crate::error::{OpsError, ValidationErrorKind};

/// Require an absolute path.
///
/// Unit files and programs are resolved by systemd, not relative to the
/// caller's working directory, so relative paths are rejected up front.
pub fn validate_absolute_path(path: &Path) -> Result<(), OpsError> {
    if path.as_os_str().is_empty() || !path.is_absolute() {
        return Err(OpsError::Validation {
            kind: ValidationErrorKind::RelativePath {
                path: path.to_path_buf(),
            },
        });
    }
    Ok(())
}
