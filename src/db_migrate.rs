use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use duxcall_db::{create_pool, schema::initialize_database, seed::seed_dev_data};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;
    let seed = std::env::args().skip(1).any(|arg| arg == "--seed");

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url).await?;

    info!("Initializing database schema...");
    initialize_database(&db_pool).await?;
    info!("Database schema initialized successfully.");

    if seed {
        let code = seed_dev_data(&db_pool).await?;
        info!("Seeded development hospital {}", code);
    }

    Ok(())
}
