pub mod backup;
pub mod billing;
pub mod products;
