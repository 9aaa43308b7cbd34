pub mod order_status;
pub mod product_type;

pub use order_status::OrderStatus;
pub use product_type::ProductType;
