use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub product_id: i32,
    #[validate(range(min = 1, max = 5, message = "stars must be between 1 and 5"))]
    pub stars: i32,
    #[validate(length(max = 1000, message = "text cannot exceed 1000 characters"))]
    pub text: String,
}
