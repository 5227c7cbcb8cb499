pub mod dashboard;
pub mod stock;
