use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::codec::lenient;

/// Integer amount that is either fixed (`min == max`) or randomized within a
/// range.
///
/// Either bound may be absent. An inverted range (`min > max`) is accepted by
/// the model and only flagged by validation.
///
/// Example:
/// ```json
/// { "Min": 2, "Max": 4 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_bounds"))]
pub struct IntValueConfig {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

impl IntValueConfig {
    pub fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }

    /// A single fixed value.
    pub fn fixed(value: i32) -> Self {
        Self::new(Some(value), Some(value))
    }

    pub fn range(min: i32, max: i32) -> Self {
        Self::new(Some(min), Some(max))
    }

    pub fn with_min(self, min: Option<i32>) -> Self {
        Self { min, ..self }
    }

    pub fn with_max(self, max: Option<i32>) -> Self {
        Self { max, ..self }
    }

    pub fn is_fixed(&self) -> bool {
        self.min.is_some() && self.min == self.max
    }

    pub fn is_unset(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn is_inverted(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min > max)
    }
}

fn validate_bounds(value: &IntValueConfig) -> Result<(), ValidationError> {
    if value.is_inverted() {
        return Err(ValidationError::new("inverted_range"));
    }
    Ok(())
}
