//! HTTP server for the joule API

pub mod api;

use crate::store::{AccountStore, PlanStore, ReadingStore, TariffStore};
use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Main joule server
pub struct JouleServer {
    host: String,
    port: u16,
    readings: ReadingStore,
    accounts: AccountStore,
    plans: PlanStore,
    tariffs: TariffStore,
}

impl JouleServer {
    /// Create a new server over the given stores
    pub fn new(
        host: String,
        port: u16,
        readings: ReadingStore,
        accounts: AccountStore,
        plans: PlanStore,
        tariffs: TariffStore,
    ) -> Self {
        Self {
            host,
            port,
            readings,
            accounts,
            plans,
            tariffs,
        }
    }

    /// Bind and serve until Ctrl+C
    pub async fn start(self) -> Result<()> {
        let address: SocketAddr = format!("{}:{}", self.host, self.port)
            .parse()
            .context("Invalid server address")?;

        let routes =
            api::create_api_routes(self.readings, self.accounts, self.plans, self.tariffs);

        let (bound, server) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(address, async {
                tokio::signal::ctrl_c().await.ok();
            })
            .context(format!("Failed to bind to {}", address))?;

        tracing::info!(%bound, "joule server listening");
        println!("joule server listening on http://{}", bound);
        println!("Press Ctrl+C to stop the server");

        server.await;
        tracing::info!("joule server stopped");
        Ok(())
    }
}
