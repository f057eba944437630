//! Bot token validation.
//!
//! The token is substituted verbatim into a unit file, so anything that would
//! split a line is rejected before any side effect happens.

use crate::error::{OpsError, UsageErrorKind};

/// Validate a caller-supplied bot token.
///
/// # Arguments
///
/// * `command` - The command the token was passed to (used in the error)
/// * `token` - The positional token argument, if one was given
///
/// # Returns
///
/// Returns the token on success. An absent or empty token is
/// `MissingToken`; a token containing control characters (line breaks,
/// tabs) is `InvalidToken`.
///
/// # Example
///
/// ```
/// use tracker_ops::validation::validate_token;
///
/// assert!(validate_token("setup-discord", Some("abc.DEF_123")).is_ok());
/// assert!(validate_token("setup-discord", Some("")).is_err());
/// assert!(validate_token("setup-discord", None).is_err());
/// ```
pub fn validate_token<'a>(command: &str, token: Option<&'a str>) -> Result<&'a str, OpsError> {
    let token = match token {
        Some(t) if !t.is_empty() => t,
        _ => {
            return Err(OpsError::Usage {
                kind: UsageErrorKind::MissingToken {
                    command: command.to_string(),
                },
            })
        }
    };

    if token.chars().any(char::is_control) {
        return Err(OpsError::Usage {
            kind: UsageErrorKind::InvalidToken {
                message: "token cannot contain control characters".to_string(),
            },
        });
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens() {
        assert_eq!(validate_token("setup-all", Some("ABC123")).unwrap(), "ABC123");
        assert!(validate_token("setup-all", Some("MTIz.NDU2.Nzg5-abc_DEF")).is_ok());
    }

    #[test]
    fn test_missing_token() {
        for token in [None, Some("")] {
            let result = validate_token("setup-discord", token);
            assert!(matches!(
                result,
                Err(OpsError::Usage {
                    kind: UsageErrorKind::MissingToken { .. }
                })
            ));
        }
    }

    #[test]
    fn test_token_with_line_break() {
        let result = validate_token("setup-discord", Some("abc\nExecStart=/bin/sh"));
        assert!(matches!(
            result,
            Err(OpsError::Usage {
                kind: UsageErrorKind::InvalidToken { .. }
            })
        ));
    }

    #[test]
    fn test_any_non_empty_printable_token_accepted() {
        assert_eq!(validate_token("setup-discord", Some("   ")).unwrap(), "   ");
        assert_eq!(validate_token("setup-discord", Some("abc def")).unwrap(), "abc def");
    }

    #[test]
    fn test_token_with_tab() {
        assert!(validate_token("setup-discord", Some("abc\tdef")).is_err());
    }
}
