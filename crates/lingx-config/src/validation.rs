//! Custom validators for lingx settings

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// BCP 47-ish language tag: primary subtag plus optional qualifiers
pub static LANGUAGE_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z]{2,8}(-[a-zA-Z0-9]{1,8})*$").unwrap());

/// Validate a single language code
pub fn validate_language_code(code: &str) -> Result<(), ValidationError> {
    if LANGUAGE_CODE_REGEX.is_match(code) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_language_code"))
    }
}

/// Validate a list of language codes
pub fn validate_language_codes(codes: &[String]) -> Result<(), ValidationError> {
    for code in codes {
        validate_language_code(code)?;
    }
    Ok(())
}
