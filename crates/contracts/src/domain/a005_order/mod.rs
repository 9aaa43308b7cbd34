pub mod aggregate;

pub use aggregate::{Order, OrderDto, OrderId, OrderLine, OrderLineDto, PendingBadge};
