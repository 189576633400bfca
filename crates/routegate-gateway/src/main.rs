//! routegate gateway binary.
//!
//! Wires config, tracing, the routing table with built-in services, and
//! plugin autoload, then serves over axum. Host applications embedding the
//! library wire the same pieces themselves.

use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};

use routegate_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("routegate.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("state build failed");

    if state.cfg().plugins.autoload {
        let dir = PathBuf::from(&state.cfg().plugins.dir);
        match state.plugins().load_all(state.table(), &dir) {
            Ok(count) => tracing::info!(count, dir = %dir.display(), "plugins loaded"),
            Err(e) => tracing::warn!(error = %e, dir = %dir.display(), "plugin autoload failed"),
        }
    }

    let app = router::build_router(state);

    tracing::info!(%listen, "routegate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
