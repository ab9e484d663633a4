mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use mastering_money::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
