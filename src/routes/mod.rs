use axum::Router;

use crate::state::AppState;

pub mod cash_registers;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod sales;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/cash-registers", cash_registers::router())
        .nest("/sales", sales::router())
}
