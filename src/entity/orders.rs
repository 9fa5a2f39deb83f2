use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub placed: Date,
    pub status: OrderStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_products::Entity")]
    OrderProducts,
}

impl Related<super::order_products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderProducts.def()
    }
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        super::order_products::Relation::Products.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::order_products::Relation::Orders.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert && self.placed.is_set() {
            return Err(DbErr::Custom(
                "order placement date cannot be changed".into(),
            ));
        }
        Ok(self)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.placed)
    }
}

/// Lifecycle status of an order. Any status may follow any other.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[sea_orm(
    enum_name = "order_status",
    db_type = "String(StringLen::N(20))",
    rs_type = "String"
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    #[sea_orm(string_value = "preparing")]
    #[strum(to_string = "preparing")]
    Preparing,
    #[sea_orm(string_value = "out_for_delivery")]
    #[strum(
        to_string = "out for delivery",
        serialize = "out_for_delivery",
        serialize = "out-for-delivery"
    )]
    OutForDelivery,
    #[sea_orm(string_value = "received")]
    #[strum(to_string = "received")]
    Received,
    #[sea_orm(string_value = "delayed")]
    #[strum(to_string = "delayed")]
    Delayed,
    #[sea_orm(string_value = "cancelled")]
    #[strum(to_string = "cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn parses_display_and_storage_spellings() {
        for input in ["out for delivery", "out_for_delivery", "Out-For-Delivery"] {
            let status: OrderStatus = input.parse().expect("known status");
            assert_eq!(status, OrderStatus::OutForDelivery);
        }
        assert_eq!("CANCELLED".parse::<OrderStatus>().ok(), Some(OrderStatus::Cancelled));
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("p".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn displays_human_labels() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "out for delivery");
        assert_eq!(OrderStatus::default().to_string(), "preparing");
    }

    #[test]
    fn stores_snake_case_values() {
        assert_eq!(OrderStatus::OutForDelivery.to_value(), "out_for_delivery");
        assert_eq!(OrderStatus::iter().count(), 5);
    }
}
