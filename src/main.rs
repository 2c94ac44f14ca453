//! Notification service entry point.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl -X POST http://localhost:9999/aaa -d '{"event":"created"}'
//!   curl -X DELETE http://localhost:9999/aaa -H 'authorization: Bearer t0k3n'
//!   curl http://localhost:9999/bbb

use anyhow::Context;
use strata::{Config, Router, Server, app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;
    telemetry::init(&config)?;

    let router = Router::from_table(app::routes()).context("failed to build router")?;

    Server::bind(config.listen_addr)
        .serve(router)
        .await
        .context("server error")?;

    Ok(())
}
