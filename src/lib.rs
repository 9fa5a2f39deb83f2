//! Data layer for a small storefront: categories, products with review
//! ratings, and orders with live totals. Every operation takes an explicit
//! sea-orm connection and returns plain records from [`models`].

pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod models;
pub mod services;
pub mod telemetry;
