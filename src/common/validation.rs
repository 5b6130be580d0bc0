// src/common/validation.rs

use validator::ValidationError;

// Slug: letras minúsculas, dígitos e hífens, sem hífen nas pontas.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid_chars = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if !valid_chars || slug.starts_with('-') || slug.ends_with('-') {
        let mut err = ValidationError::new("slug");
        err.message = Some("slug must contain only lowercase letters, digits and hyphens".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_kebab_case() {
        assert!(validate_slug("running-shoes-2").is_ok());
    }

    #[test]
    fn rejects_uppercase_spaces_and_edge_hyphens() {
        assert!(validate_slug("Running").is_err());
        assert!(validate_slug("running shoes").is_err());
        assert!(validate_slug("-running").is_err());
        assert!(validate_slug("running-").is_err());
    }
}
