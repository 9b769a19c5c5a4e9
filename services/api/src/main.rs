use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod error;
mod jwt;
mod middleware;
mod models;
mod policy;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{DatabaseConfig, init_pool};

use crate::jwt::{JwtConfig, JwtService};
use crate::repositories::{
    BookingRepository, CategoryRepository, RoomRepository, UserRepository,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting booking API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Run migrations
    info!("Running migrations");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // JWT service
    let jwt_config = JwtConfig::from_env()?;
    let jwt_service = JwtService::new(&jwt_config);

    // Initialize repositories
    let user_repository = UserRepository::new(pool.clone());
    let room_repository = RoomRepository::new(pool.clone());
    let category_repository = CategoryRepository::new(pool.clone());
    let booking_repository = BookingRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        user_repository,
        room_repository,
        category_repository,
        booking_repository,
        jwt_service,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Booking API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
