mod common;

use rust_decimal_macros::dec;
use storefront::{dto::reviews::CreateReviewRequest, error::AppError, services::review_service};

#[tokio::test]
async fn review_needs_existing_product() -> anyhow::Result<()> {
    let db = common::setup_db().await?;

    let err = review_service::create_review(
        &db,
        CreateReviewRequest {
            product_id: 31,
            stars: 4,
            text: "Where is it?".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound("product")));
    assert!(review_service::list_reviews(&db, None).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn stars_and_text_are_bounded() -> anyhow::Result<()> {
    let db = common::setup_db().await?;
    let bread = common::product(&db, "Bread", dec!(3.00), None).await?;

    for stars in [0, 6, -1] {
        let err = review_service::create_review(
            &db,
            CreateReviewRequest {
                product_id: bread.id,
                stars,
                text: "ok".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{stars}: {err:?}");
    }

    let err = review_service::create_review(
        &db,
        CreateReviewRequest {
            product_id: bread.id,
            stars: 3,
            text: "a".repeat(1001),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Empty text is allowed.
    let review = common::review(&db, bread.id, 1, "").await?;
    assert_eq!(review.text, "");

    Ok(())
}

#[tokio::test]
async fn list_filters_by_product_and_delete_is_always_allowed() -> anyhow::Result<()> {
    let db = common::setup_db().await?;
    let jam = common::product(&db, "Jam", dec!(4.00), None).await?;
    let butter = common::product(&db, "Butter", dec!(2.80), None).await?;
    let first = common::review(&db, jam.id, 5, "Fruity").await?;
    common::review(&db, butter.id, 3, "Salty").await?;
    common::review(&db, jam.id, 2, "Too sweet").await?;

    assert_eq!(review_service::list_reviews(&db, None).await?.len(), 3);
    let jam_reviews = review_service::list_reviews(&db, Some(jam.id)).await?;
    assert_eq!(jam_reviews.len(), 2);
    assert!(jam_reviews.iter().all(|r| r.product_id == Some(jam.id)));
    assert_eq!(jam_reviews[0].id, first.id);

    review_service::delete_review(&db, first.id).await?;
    let err = review_service::get_review(&db, first.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("review")));
    let err = review_service::delete_review(&db, first.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound("review")));
    assert_eq!(review_service::list_reviews(&db, Some(jam.id)).await?.len(), 1);

    Ok(())
}
