use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, info};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::context::ConnectionId;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    info!("Listening on {}", cfg.listen_addr);

    serve(listener, cfg.wait_before_response).await
}

/// Accept loop. A failing connection is logged and dropped; it never stops
/// the loop.
pub async fn serve(listener: TcpListener, wait_before_response: Duration) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = listener.accept().await?;
        let id = ConnectionId::new();
        let span = tracing::info_span!("connection", conn_id = %id, %peer);

        tokio::spawn(
            async move {
                info!("Connection accepted");
                let mut conn = Connection::new(socket, wait_before_response, id);
                if let Err(e) = conn.run().await {
                    tracing::warn!(error = %e, "connection aborted, closing socket");
                }
            }
            .instrument(span),
        );
    }
}
