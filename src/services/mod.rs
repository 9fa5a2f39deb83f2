pub mod category_service;
pub mod order_service;
pub mod product_service;
pub mod review_service;
pub mod summary_service;
