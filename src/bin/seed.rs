use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use storefront::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{categories::CategoryRequest, products::CreateProductRequest, reviews::CreateReviewRequest},
    services::{category_service, product_service, review_service, summary_service},
    telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url, config.max_connections).await?;
    run_migrations(&orm).await?;

    let summary = summary_service::catalog_summary(&orm).await?;
    if summary.num_products > 0 {
        println!("Catalog already has {} products, skipping seed", summary.num_products);
        return Ok(());
    }

    seed_catalog(&orm).await?;

    let summary = summary_service::catalog_summary(&orm).await?;
    println!(
        "Seed completed. Products: {}, Reviews: {}",
        summary.num_products, summary.num_reviews
    );
    Ok(())
}

/// name, description, price, (stars, text) reviews
type SeedProduct = (&'static str, &'static str, Decimal, Vec<(i32, &'static str)>);

async fn seed_catalog(db: &DatabaseConnection) -> anyhow::Result<()> {
    let catalog: Vec<(&str, Vec<SeedProduct>)> = vec![
        (
            "Beverages",
            vec![
                (
                    "Coffee",
                    "Single-origin whole beans",
                    Decimal::new(999, 2),
                    vec![(5, "Great crema"), (4, "Solid daily brew")],
                ),
                (
                    "Green Tea",
                    "Loose leaf sencha",
                    Decimal::new(650, 2),
                    vec![(4, "Fresh and grassy")],
                ),
            ],
        ),
        (
            "Bakery",
            vec![
                (
                    "Sourdough Loaf",
                    "Naturally leavened, baked daily",
                    Decimal::new(575, 2),
                    vec![],
                ),
                (
                    "Croissant",
                    "All-butter, laminated by hand",
                    Decimal::new(325, 2),
                    vec![(5, "Flaky"), (3, "A bit small")],
                ),
            ],
        ),
    ];

    for (category_name, products) in catalog {
        let category = category_service::create_category(
            db,
            CategoryRequest {
                name: category_name.to_string(),
            },
        )
        .await?;

        for (name, description, price, reviews) in products {
            let product = product_service::create_product(
                db,
                CreateProductRequest {
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    category_id: Some(category.id),
                    image: None,
                },
            )
            .await?;

            for (stars, text) in reviews {
                review_service::create_review(
                    db,
                    CreateReviewRequest {
                        product_id: product.id,
                        stars,
                        text: text.to_string(),
                    },
                )
                .await?;
            }
        }
        println!("Seeded category {category_name}");
    }

    Ok(())
}
