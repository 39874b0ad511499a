mod cli;
mod guard;
mod infra;
mod limit;
mod routes;
mod server;

use innkeep::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
