use api::AppConfig;
use migration::{Migrator, MigratorTrait};

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().map_err(|e| format!("DATABASE_URL not set: {e}"))?;

    let db = sea_orm::Database::connect(config.database_url.as_str()).await?;
    Migrator::up(&db, None).await?;

    api::launch(db, config).await?;
    Ok(())
}
