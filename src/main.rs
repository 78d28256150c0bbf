use axum::Router;
use clap::{Parser, Subcommand};
use diesel_migrations::MigrationHarness;
use tower_http::cors::CorsLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use campus_eats::config::Config;
use campus_eats::handlers::{ApiDoc, AppState, admin_router, order_router, restaurant_router};
use campus_eats::{MIGRATIONS, ensure_location_id_column, establish_connection};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Serve => serve().await,
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let config = Config::load();

    if config.database_url != ":memory:" {
        if let Some(dir) = std::path::Path::new(&config.database_url).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
    }

    let conn = &mut establish_connection(&config.database_url)?;
    conn.run_pending_migrations(MIGRATIONS)?;
    ensure_location_id_column(conn)?;

    let state = AppState {
        config: config.clone(),
    };

    let app = Router::new()
        .merge(restaurant_router())
        .merge(order_router())
        .merge(admin_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("campus-eats listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
