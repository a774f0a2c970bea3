pub mod analytics_service;
pub mod backup_service;
pub mod billing_service;
pub mod catalog_service;
pub mod shop_service;
