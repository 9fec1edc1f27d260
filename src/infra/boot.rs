use crate::infra::config::AppConfig;
use crate::infra::runtime::mcp_transport;
use crate::tools::apod::{make_factory, svc_from_config};
use std::net::SocketAddr;

pub async fn run_server(cfg: &AppConfig) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        disable_rest = cfg.disable_rest,
        api_base = %cfg.nasa.base_url,
        timeout_secs = cfg.nasa.timeout_secs,
        "BOOT nasa-apod-mcp"
    );
    cfg.validate()?;
    if cfg.uses_demo_key() {
        tracing::warn!("NASA_API_KEY not set; using the rate-limited DEMO_KEY");
    }

    let svc = svc_from_config(&cfg.nasa)?;

    // Stdio mode: run MCP over stdio ONLY (no HTTP).
    if cfg.mode == "stdio" {
        mcp_transport::serve_stdio(make_factory(svc))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = if cfg.disable_rest {
        crate::infra::http_app::build_app_default(svc)
    } else {
        crate::infra::http_app::build_app_with_rest(svc)
    };

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
