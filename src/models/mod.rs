pub mod order;
pub mod product;

pub use order::{CreateOrder, Order};
pub use product::{AvailabilityItem, AvailabilityUpdate, Product, ProductQuery};
