pub mod cash_register_service;
pub mod product_service;
pub mod register_balance;
pub mod sale_service;
pub mod user_service;
