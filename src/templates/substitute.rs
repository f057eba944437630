//! Placeholder substitution.

use std::fs;

use tracing::debug;

use crate::error::OpsError;
use crate::services::ManagedUnit;

/// Replace the first occurrence of `placeholder` in `template` with `value`.
///
/// Later occurrences are left as they are: the template carries one
/// marker, and a second one is template text, not a slot for the secret.
///
/// Fails when the template has no placeholder, so a template that was
/// already filled in (or the wrong file) is never installed with a stale
/// secret.
pub fn substitute_placeholder(
    template: &str,
    placeholder: &str,
    value: &str,
) -> Result<String, OpsError> {
    if placeholder.is_empty() {
        return Err(OpsError::Template {
            message: "placeholder cannot be empty".to_string(),
        });
    }

    if !template.contains(placeholder) {
        return Err(OpsError::Template {
            message: format!("placeholder '{}' not found in template", placeholder),
        });
    }

    Ok(template.replacen(placeholder, value, 1))
}

/// Read a unit's template and produce the text to install.
///
/// Units with a placeholder require a token; units without one are
/// installed verbatim. The template file itself is never modified.
pub fn render_unit(unit: &ManagedUnit, token: Option<&str>) -> Result<String, OpsError> {
    let template = fs::read_to_string(&unit.template).map_err(|e| OpsError::Template {
        message: format!(
            "Failed to read template '{}': {}",
            unit.template.display(),
            e
        ),
    })?;

    let rendered = match (&unit.placeholder, token) {
        (Some(placeholder), Some(token)) => substitute_placeholder(&template, placeholder, token)
            .map_err(|e| match e {
                OpsError::Template { message } => OpsError::Template {
                    message: format!("{} '{}'", message, unit.template.display()),
                },
                other => other,
            })?,
        (Some(_), None) => {
            return Err(OpsError::Template {
                message: format!("unit '{}' requires a token", unit.service_name),
            })
        }
        (None, _) => template,
    };

    debug!(
        unit = %unit.service_name,
        template = %unit.template.display(),
        bytes = rendered.len(),
        "Unit template rendered"
    );

    Ok(rendered)
}
