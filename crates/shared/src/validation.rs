//! Common validation utilities.

use validator::ValidationError;

/// Player categories a club schedules classes for.
const CATEGORIES: [&str; 3] = ["mixed", "men", "women"];

/// Maximum length of a free-text skill tier.
const MAX_LEVEL_LENGTH: usize = 32;

/// Validates that a category is one of the supported values.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if CATEGORIES.contains(&category) {
        Ok(())
    } else {
        let mut err = ValidationError::new("category");
        err.message = Some("Category must be one of: mixed, men, women".into());
        Err(err)
    }
}

/// Validates a free-text skill tier ("open", "beginner", "intermediate", ...).
///
/// Tiers are club-defined, so only the shape is checked: non-empty, at most
/// 32 characters, lowercase letters, digits and dashes.
pub fn validate_skill_level(level: &str) -> Result<(), ValidationError> {
    let well_formed = !level.is_empty()
        && level.len() <= MAX_LEVEL_LENGTH
        && level
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        let mut err = ValidationError::new("skill_level");
        err.message =
            Some("Level must be 1-32 lowercase characters, digits or dashes".into());
        Err(err)
    }
}

/// Validates that a price in cents is non-negative.
pub fn validate_price_cents(price_cents: i64) -> Result<(), ValidationError> {
    if price_cents >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("price_cents");
        err.message = Some("Price must be non-negative".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_accepts_known_values() {
        assert!(validate_category("mixed").is_ok());
        assert!(validate_category("men").is_ok());
        assert!(validate_category("women").is_ok());
    }

    #[test]
    fn test_validate_category_rejects_unknown() {
        assert!(validate_category("juniors").is_err());
        assert!(validate_category("").is_err());
        assert!(validate_category("Mixed").is_err());
    }

    #[test]
    fn test_validate_skill_level_accepts_tiers() {
        assert!(validate_skill_level("open").is_ok());
        assert!(validate_skill_level("beginner").is_ok());
        assert!(validate_skill_level("advanced-2").is_ok());
    }

    #[test]
    fn test_validate_skill_level_rejects_malformed() {
        assert!(validate_skill_level("").is_err());
        assert!(validate_skill_level("Open").is_err());
        assert!(validate_skill_level("tier one").is_err());
        assert!(validate_skill_level(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(4500).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }
}
