use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A menu item keyed by its business id.
///
/// `dish_id` is the externally meaningful key used for every lookup and for
/// the toggle; it is not a storage-internal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub dish_name: String,
    pub dish_id: String,
    pub image_url: String,
    #[serde(default)]
    pub is_published: bool,
}

impl Dish {
    /// New unpublished dish.
    pub fn new(
        dish_name: impl Into<String>,
        dish_id: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            dish_name: dish_name.into(),
            dish_id: dish_id.into(),
            image_url: image_url.into(),
            is_published: false,
        }
    }

    /// Required-field check, applied by the store's insert path.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("dishName", &self.dish_name),
            ("dishId", &self.dish_id),
            ("imageUrl", &self.image_url),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::InvalidDish(format!("{field} is required")));
            }
        }

        Ok(())
    }
}
