//! Client-side file checks run before a file joins the local pool.

use platform_host::FilePayload;
use thiserror::Error;

use crate::config::UploaderConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Why a selected file cannot be uploaded. Rendered inline next to the file.
pub enum ValidationError {
    /// The file is larger than the configured limit.
    #[error("File size must be less than {max_mb}MB")]
    TooLarge {
        /// Configured limit in megabytes.
        max_mb: u64,
    },
    /// Neither the MIME type nor the extension matches the accept pattern.
    #[error("File type not accepted: {name}")]
    TypeNotAccepted {
        /// Offending file name.
        name: String,
    },
}

/// Checks size first, then type.
///
/// # Errors
///
/// Returns the first failing check as a [`ValidationError`].
pub fn validate_file(
    name: &str,
    mime_type: &str,
    size_bytes: u64,
    config: &UploaderConfig,
) -> Result<(), ValidationError> {
    if let Some(limit) = config.max_size_bytes() {
        if size_bytes > limit {
            return Err(ValidationError::TooLarge {
                max_mb: config.max_size_mb,
            });
        }
    }
    if !config.accept.accepts(name, mime_type) {
        return Err(ValidationError::TypeNotAccepted {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// [`validate_file`] over a host payload.
///
/// # Errors
///
/// See [`validate_file`].
pub fn validate_payload<F: FilePayload>(
    file: &F,
    config: &UploaderConfig,
) -> Result<(), ValidationError> {
    validate_file(&file.file_name(), &file.mime_type(), file.size_bytes(), config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::AcceptPattern;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn oversized_file_reports_limit_in_megabytes() {
        let config = UploaderConfig::default();
        let err = validate_file("movie.mp4", "video/mp4", 50 * MB, &config).unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 10MB");
    }

    #[test]
    fn file_exactly_at_limit_passes() {
        let config = UploaderConfig::default();
        assert_eq!(validate_file("a.png", "image/png", 10 * MB, &config), Ok(()));
    }

    #[test]
    fn disallowed_type_is_rejected_by_name() {
        let config = UploaderConfig {
            accept: AcceptPattern::parse("image/*"),
            ..UploaderConfig::default()
        };
        assert_eq!(
            validate_file("setup.exe", "application/x-msdownload", 10, &config),
            Err(ValidationError::TypeNotAccepted {
                name: "setup.exe".to_string()
            })
        );
    }

    #[test]
    fn size_is_checked_before_type() {
        let config = UploaderConfig {
            accept: AcceptPattern::parse("image/*"),
            ..UploaderConfig::default()
        };
        assert_eq!(
            validate_file("setup.exe", "", 11 * MB, &config),
            Err(ValidationError::TooLarge { max_mb: 10 })
        );
    }
}
