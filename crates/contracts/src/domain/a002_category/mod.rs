pub mod aggregate;

pub use aggregate::{creates_cycle, Category, CategoryDto, CategoryId};
