//! Validation rules for metadata fields

/// Validation rules for a single field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    /// Empty rules (everything optional, no bounds)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Required field, no other constraints
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Required field with inclusive numeric bounds
    pub const fn required_range(min: f64, max: f64) -> Self {
        Self {
            required: true,
            min: Some(min),
            max: Some(max),
            min_length: None,
            max_length: None,
        }
    }

    /// Required field with an inclusive numeric minimum
    pub const fn required_min(min: f64) -> Self {
        Self {
            required: true,
            min: Some(min),
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Validate a string value against the rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(format!("{} must not be empty", field_label));
        }
        if let Some(min) = self.min_length {
            if value.len() < min {
                return Err(format!("{} must be at least {} characters", field_label, min));
            }
        }
        if let Some(max) = self.max_length {
            if value.len() > max {
                return Err(format!("{} must not exceed {} characters", field_label, max));
            }
        }
        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(format!("{} must be at least {}", field_label, min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} must be at most {}", field_label, max));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_bounds_are_inclusive() {
        let rules = ValidationRules::required_range(0.0, 100.0);
        assert!(rules.validate_number(0.0, "quantity").is_ok());
        assert!(rules.validate_number(100.0, "quantity").is_ok());
        assert!(rules.validate_number(-1.0, "quantity").is_err());
        assert!(rules.validate_number(101.0, "quantity").is_err());
    }

    #[test]
    fn test_required_rejects_blank() {
        let rules = ValidationRules::required();
        assert!(rules.validate_string("  ", "name").is_err());
        assert!(rules.validate_string("ok", "name").is_ok());
    }
}
