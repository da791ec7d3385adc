//! Domain entities and value objects independent of transport and rendering.

pub mod notification;
pub mod product;
pub mod types;
