use sea_orm::DatabaseConnection;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
}

impl AppState {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }

    /// Raw sqlx pool shared with the ORM connection.
    pub fn pool(&self) -> &PgPool {
        self.orm.get_postgres_connection_pool()
    }
}
