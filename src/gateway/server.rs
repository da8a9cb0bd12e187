use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::bracket_data::BracketCatalog;
use crate::db::DbPool;
use crate::domain::team_name::TeamNameCanonicalizer;
use crate::logging;
use crate::settings::{self, AppSettings};

use super::routes::build_router;

#[derive(Clone)]
pub(super) struct GatewayAppState {
    pub(super) pool: DbPool,
    pub(super) canonicalizer: Arc<TeamNameCanonicalizer>,
    pub(super) brackets: Arc<BracketCatalog>,
}

fn port_candidates(preferred: Option<u16>) -> impl Iterator<Item = u16> {
    let mut candidates = Vec::with_capacity(
        (settings::MAX_GATEWAY_PORT - settings::DEFAULT_GATEWAY_PORT + 2) as usize,
    );

    if let Some(p) = preferred {
        if p > 0 {
            candidates.push(p);
        }
    }

    for port in settings::DEFAULT_GATEWAY_PORT..=settings::MAX_GATEWAY_PORT {
        if candidates.first().copied() == Some(port) {
            continue;
        }
        candidates.push(port);
    }

    candidates.into_iter()
}

fn bind_first_available(preferred: Option<u16>) -> Result<(u16, std::net::TcpListener), String> {
    for port in port_candidates(preferred) {
        let std_listener = match std::net::TcpListener::bind(("127.0.0.1", port)) {
            Ok(l) => l,
            Err(_) => continue,
        };

        if std_listener.set_nonblocking(true).is_err() {
            continue;
        }

        return Ok((port, std_listener));
    }

    Err(format!(
        "no available port in range {}..{}",
        settings::DEFAULT_GATEWAY_PORT,
        settings::MAX_GATEWAY_PORT
    ))
}

pub(crate) async fn serve(
    data_dir: PathBuf,
    app_settings: AppSettings,
    pool: DbPool,
    canonicalizer: TeamNameCanonicalizer,
    brackets: BracketCatalog,
) -> Result<(), String> {
    let requested_port = app_settings.preferred_port.max(1);
    let (port, std_listener) = bind_first_available(Some(requested_port))?;

    if port != requested_port {
        tracing::warn!(requested_port, bound_port = port, "preferred port in use");
        let mut next = app_settings.clone();
        next.preferred_port = port;
        let _ = settings::write(&data_dir, &next);
    }

    logging::spawn_cleanup_task(data_dir);

    let state = GatewayAppState {
        pool,
        canonicalizer: Arc::new(canonicalizer),
        brackets: Arc::new(brackets),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::from_std(std_listener)
        .map_err(|e| format!("gateway listener error: {e}"))?;

    tracing::info!(port, "bracket hub listening on http://127.0.0.1:{port}");

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await
        .map_err(|e| format!("gateway server error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_port_is_tried_first() {
        let candidates: Vec<u16> = port_candidates(Some(9000)).collect();
        assert_eq!(candidates.first(), Some(&9000));
        assert!(candidates.contains(&settings::DEFAULT_GATEWAY_PORT));
    }

    #[test]
    fn default_range_has_no_duplicates() {
        let candidates: Vec<u16> = port_candidates(Some(settings::DEFAULT_GATEWAY_PORT)).collect();
        let mut deduped = candidates.clone();
        deduped.dedup();
        assert_eq!(candidates, deduped);
        assert_eq!(candidates.first(), Some(&settings::DEFAULT_GATEWAY_PORT));
    }
}
