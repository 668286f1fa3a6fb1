mod automation;
mod commands;
mod lcu;

use axum::routing::{get, post};
use axum::Router;

use commands::{get_champions, health, start_automation, stop_automation};

const BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() {
  let app = Router::new()
    .route("/start_automation", post(start_automation))
    .route("/stop_automation", post(stop_automation))
    .route("/health", get(health))
    .route("/champions", get(get_champions));

  let listener = match tokio::net::TcpListener::bind(BIND_ADDR).await {
    Ok(listener) => listener,
    Err(e) => {
      eprintln!("[API] Failed to bind {}: {}", BIND_ADDR, e);
      std::process::exit(1);
    }
  };

  println!("[API] RunePilot listening on {}", BIND_ADDR);
  if let Err(e) = axum::serve(listener, app).await {
    eprintln!("[API] Server error: {}", e);
    std::process::exit(1);
  }
}
