//! The `get_astronomy_picture_of_day` tool: rendering plus its rmcp router.

use std::sync::Arc;

use crate::clients::nasa::NasaRemote;
use crate::infra::config::NasaConfig;

pub mod report;
pub mod tool_router;

pub use tool_router::{ApodParams, ApodRouter, ApodSvc, TOOL_NAME};

/// Build the service backed by the live NASA API.
pub fn svc_from_config(cfg: &NasaConfig) -> Result<ApodSvc, reqwest::Error> {
    let remote = NasaRemote::from_config(cfg)?;
    Ok(ApodSvc::new(Arc::new(remote)))
}

/// Factory shape required by the rmcp transports: `(handler, ToolRouter<handler>)`.
pub fn make_factory(svc: ApodSvc) -> impl Fn() -> (ApodSvc, ApodRouter) + Clone + Send + Sync + 'static {
    move || (svc.clone(), ApodSvc::router())
}
