use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use accounts::{
    jwt::{JwtConfig, JwtService},
    repositories::{StyleProfileRepository, UserRepository},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting accounts service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Initialize the session token service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(jwt_config)?;

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let profile_repository = StyleProfileRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        profile_repository,
        jwt_service,
    };

    info!("Accounts service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:8000").await?;
    info!("Accounts service listening on 0.0.0.0:8000");

    axum::serve(listener, app).await?;

    Ok(())
}
