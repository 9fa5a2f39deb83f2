use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, JoinType, ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Set, TransactionTrait,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::orders::{CreateOrderRequest, OrderWithProducts},
    entity::{
        order_products::{
            self, ActiveModel as OrderProductActive, Column as OrderProductCol,
            Entity as OrderProducts,
        },
        orders::{
            ActiveModel as OrderActive, Column as OrderCol, Entity as Orders, Model as OrderModel,
            OrderStatus,
        },
        products::{Column as ProdCol, Entity as Products, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Order, ProductSummary, normalize_price},
};

#[derive(Debug, FromQueryResult)]
struct OrderLineRow {
    order_id: Uuid,
    price: Decimal,
}

/// Lists every order, oldest placement first, each with its live total.
pub async fn list_orders(db: &DatabaseConnection) -> AppResult<Vec<Order>> {
    let orders = Orders::find()
        .order_by_asc(OrderCol::Placed)
        .order_by_asc(OrderCol::Id)
        .all(db)
        .await?;

    let mut totals: HashMap<Uuid, Decimal> = HashMap::new();
    let lines = OrderProducts::find()
        .select_only()
        .column(OrderProductCol::OrderId)
        .column(ProdCol::Price)
        .join(JoinType::InnerJoin, order_products::Relation::Products.def())
        .into_model::<OrderLineRow>()
        .all(db)
        .await?;
    for line in lines {
        *totals.entry(line.order_id).or_default() += normalize_price(line.price);
    }

    let items = orders
        .into_iter()
        .map(|model| {
            let total = totals.get(&model.id).copied().unwrap_or_default();
            order_from_entity(model, total)
        })
        .collect();
    Ok(items)
}

pub async fn get_order(db: &DatabaseConnection, id: Uuid) -> AppResult<OrderWithProducts> {
    let order = find_order(db, id).await?;
    let products = products_of(db, &order).await?;
    let total = sum_prices(&products);

    Ok(OrderWithProducts {
        order: order_from_entity(order, total),
        products: products.into_iter().map(ProductSummary::from).collect(),
    })
}

/// Sum of the order's products at their current prices.
pub async fn order_total(db: &DatabaseConnection, id: Uuid) -> AppResult<Decimal> {
    let order = find_order(db, id).await?;
    let total = sum_prices(&products_of(db, &order).await?);
    tracing::debug!(order_id = %id, total = %total, "order total computed");
    Ok(total)
}

/// Places an order for a set of products. The order row and its product
/// memberships are written in one transaction.
pub async fn create_order(
    db: &DatabaseConnection,
    payload: CreateOrderRequest,
) -> AppResult<OrderWithProducts> {
    payload.validate()?;
    let product_ids: BTreeSet<i32> = payload.product_ids.into_iter().collect();

    let txn = db.begin().await?;
    let products = Products::find()
        .filter(ProdCol::Id.is_in(product_ids.iter().copied()))
        .order_by_asc(ProdCol::Name)
        .order_by_asc(ProdCol::Id)
        .all(&txn)
        .await?;
    if products.len() != product_ids.len() {
        return Err(AppError::NotFound("product"));
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        placed: Set(Utc::now().date_naive()),
        status: Set(OrderStatus::default()),
    }
    .insert(&txn)
    .await?;

    let memberships = product_ids.iter().map(|&product_id| OrderProductActive {
        order_id: Set(order.id),
        product_id: Set(product_id),
    });
    OrderProducts::insert_many(memberships)
        .exec_without_returning(&txn)
        .await?;

    txn.commit().await?;

    let total = sum_prices(&products);
    tracing::info!(
        order_id = %order.id,
        products = product_ids.len(),
        total = %total,
        "order placed"
    );

    Ok(OrderWithProducts {
        order: order_from_entity(order, total),
        products: products.into_iter().map(ProductSummary::from).collect(),
    })
}

/// Moves an order to `status`. Every status is reachable from every other.
pub async fn set_order_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: OrderStatus,
) -> AppResult<Order> {
    let existing = find_order(db, id).await?;
    let previous = existing.status;

    let mut active: OrderActive = existing.into();
    active.status = Set(status);
    let order = active.update(db).await?;

    tracing::info!(
        order_id = %order.id,
        from = %previous,
        to = %order.status,
        "order status updated"
    );

    let total = sum_prices(&products_of(db, &order).await?);
    Ok(order_from_entity(order, total))
}

/// Parses a status name as entered by staff, e.g. `"out for delivery"`.
pub fn parse_status(input: &str) -> AppResult<OrderStatus> {
    input
        .trim()
        .parse::<OrderStatus>()
        .map_err(|_| AppError::Validation(format!("unknown order status `{input}`")))
}

async fn find_order<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<OrderModel> {
    Orders::find_by_id(id)
        .one(db)
        .await?
        .ok_or(AppError::NotFound("order"))
}

async fn products_of<C: ConnectionTrait>(db: &C, order: &OrderModel) -> AppResult<Vec<ProductModel>> {
    let products = order
        .find_related(Products)
        .order_by_asc(ProdCol::Name)
        .order_by_asc(ProdCol::Id)
        .all(db)
        .await?;
    Ok(products)
}

fn sum_prices(products: &[ProductModel]) -> Decimal {
    products.iter().map(|p| normalize_price(p.price)).sum()
}

fn order_from_entity(model: OrderModel, total: Decimal) -> Order {
    Order {
        id: model.id,
        placed: model.placed,
        status: model.status,
        total,
    }
}
