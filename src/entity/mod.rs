pub mod cash_registers;
pub mod products;
pub mod sales;
pub mod users;

pub use cash_registers::Entity as CashRegisters;
pub use products::Entity as Products;
pub use sales::Entity as Sales;
pub use users::Entity as Users;
