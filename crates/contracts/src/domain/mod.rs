pub mod common;

pub mod a001_brand;
pub mod a002_category;
pub mod a003_customer;
pub mod a004_product;
pub mod a005_order;
