use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        println!("Connecting to PostgreSQL...");
        let database_connection = Database::connect(uri).await?;
        info!("Running migrations...");
        println!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        println!("Migrations finished.");
        info!("Connected to PostgreSQL.");
        Ok(Self {
            database_connection,
        })
    }

    /// Raw connection, mainly for integration tests that need to poke
    /// at rows directly.
    pub fn conn(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
