mod cli;
mod demo;
mod infra;
mod routes;
mod server;
mod views;

pub use infra::AppState;
pub use routes::router;

use dot_matrix::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
