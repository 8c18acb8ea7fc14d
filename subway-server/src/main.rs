use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use subway_server::service::LineService;
use subway_server::store::{LineStore, StationDirectory};
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Build the in-memory collaborators
    let stations = StationDirectory::new();
    let lines = LineStore::new();
    let service = LineService::new(stations.clone(), lines);

    // Build app state
    let state = AppState::new(stations, service);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Subway line registry listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET    /health                  - Health check");
    println!("  POST   /stations                - Register a station");
    println!("  GET    /stations                - List stations");
    println!("  DELETE /stations/:id            - Delete a station");
    println!("  POST   /lines                   - Create a line");
    println!("  GET    /lines                   - List lines");
    println!("  GET    /lines/:id               - Get a line");
    println!("  PUT    /lines/:id               - Update a line");
    println!("  DELETE /lines/:id               - Delete a line");
    println!("  POST   /lines/:id/sections      - Append a section");
    println!("  DELETE /lines/:id/sections      - Detach the terminal station");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
