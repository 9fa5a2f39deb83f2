mod common;

use rust_decimal_macros::dec;
use storefront::{
    dto::orders::CreateOrderRequest,
    entity::orders::OrderStatus,
    services::{order_service, product_service, summary_service},
};

// Beverages -> Coffee -> two reviews -> order -> status changes.
#[tokio::test]
async fn beverages_coffee_scenario() -> anyhow::Result<()> {
    let db = common::setup_db().await?;

    let beverages = common::category(&db, "Beverages").await?;
    let coffee = common::product(&db, "Coffee", dec!(9.99), Some(beverages.id)).await?;
    assert_eq!(coffee.category_id, Some(beverages.id));

    common::review(&db, coffee.id, 3, "Too bitter").await?;
    common::review(&db, coffee.id, 5, "Perfect morning cup").await?;
    assert_eq!(product_service::average_rating(&db, coffee.id).await?, 4.0);

    let placed = order_service::create_order(
        &db,
        CreateOrderRequest {
            product_ids: vec![coffee.id],
        },
    )
    .await?;
    assert_eq!(placed.order.status, OrderStatus::Preparing);
    assert_eq!(placed.order.total, dec!(9.99));
    assert_eq!(order_service::order_total(&db, placed.order.id).await?, dec!(9.99));

    let status = order_service::parse_status("out for delivery")?;
    let order = order_service::set_order_status(&db, placed.order.id, status).await?;
    assert_eq!(order.status, OrderStatus::OutForDelivery);

    let order =
        order_service::set_order_status(&db, placed.order.id, OrderStatus::Received).await?;
    assert_eq!(order.status, OrderStatus::Received);
    assert_eq!(order.placed, placed.order.placed);
    assert_eq!(order.total, dec!(9.99));

    Ok(())
}

#[tokio::test]
async fn catalog_summary_counts_products_and_reviews() -> anyhow::Result<()> {
    let db = common::setup_db().await?;

    let empty = summary_service::catalog_summary(&db).await?;
    assert_eq!((empty.num_products, empty.num_reviews), (0, 0));

    let tea = common::product(&db, "Tea", dec!(4.50), None).await?;
    common::product(&db, "Scone", dec!(2.25), None).await?;
    common::review(&db, tea.id, 4, "").await?;

    let summary = summary_service::catalog_summary(&db).await?;
    assert_eq!(summary.num_products, 2);
    assert_eq!(summary.num_reviews, 1);

    Ok(())
}
