// ABOUTME: Validation for user-editable configuration values.
// ABOUTME: Image references and base-image alias keys.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("image reference must not be empty")]
    EmptyImage,

    #[error("invalid image reference {0:?}: must not contain whitespace")]
    ImageWhitespace(String),

    #[error("invalid alias key {0:?}: must match ^[A-Za-z0-9][A-Za-z0-9_-]*$")]
    AliasKey(String),

    #[error("invalid alias value for {alias:?}: {reason}")]
    AliasValue { alias: String, reason: Box<ValueError> },
}

/// Trimmed image reference, rejected when empty or containing whitespace.
pub fn validate_image_ref(value: &str) -> Result<String, ValueError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValueError::EmptyImage);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ValueError::ImageWhitespace(value.to_string()));
    }
    Ok(value.to_string())
}

/// Trimmed alias key matching `[A-Za-z0-9][A-Za-z0-9_-]*`.
pub fn validate_alias_key(key: &str) -> Result<String, ValueError> {
    let key = key.trim();
    let mut chars = key.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ValueError::AliasKey(key.to_string()));
    }
    Ok(key.to_string())
}

/// Validate one alias entry, returning the trimmed key and image.
pub fn validate_alias(key: &str, image: &str) -> Result<(String, String), ValueError> {
    let key = validate_alias_key(key)?;
    let image = validate_image_ref(image).map_err(|reason| ValueError::AliasValue {
        alias: key.clone(),
        reason: Box::new(reason),
    })?;
    Ok((key, image))
}
