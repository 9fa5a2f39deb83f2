use serde::Deserialize;
use validator::Validate;

/// Payload for creating or renaming a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: String,
}
