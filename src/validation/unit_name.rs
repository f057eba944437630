//! Systemd unit name validation.

use crate::error::{OpsError, ValidationErrorKind};

/// Maximum unit name length accepted by systemd (excluding the suffix).
const MAX_UNIT_NAME_LENGTH: usize = 248;

/// Validate a unit name (without the `.service` suffix).
///
/// Only ASCII alphanumerics and `-`, `_`, `.`, `@`, `:` are accepted, which
/// is the set systemd allows in unit names. Anything else could be
/// interpreted as a path or an extra argument.
///
/// # Example
///
/// ```
/// use tracker_ops::validation::validate_unit_name;
///
/// assert!(validate_unit_name("tournament-web").is_ok());
/// assert!(validate_unit_name("../etc/passwd").is_err());
/// ```
pub fn validate_unit_name(name: &str) -> Result<(), OpsError> {
    let invalid = |message: &str| OpsError::Validation {
        kind: ValidationErrorKind::InvalidUnitName {
            unit: name.to_string(),
            message: message.to_string(),
        },
    };

    if name.is_empty() {
        return Err(invalid("unit name cannot be empty"));
    }

    if name.len() > MAX_UNIT_NAME_LENGTH {
        return Err(invalid("unit name is too long"));
    }

    if name.starts_with('-') || name.starts_with('.') {
        return Err(invalid("unit name cannot start with '-' or '.'"));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | ':'))
    {
        return Err(invalid("unit name contains invalid characters"));
    }

    if name.ends_with(".service") {
        return Err(invalid("give the unit name without the '.service' suffix"));
    }

    Ok(())
}
