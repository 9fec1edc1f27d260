use std::future::Future;
use std::sync::Arc;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use serde::Deserialize;

use crate::domain::ApodSource;
use crate::infra::runtime::mcp_transport::ServerHandler;

use super::report;

pub const TOOL_NAME: &str = "get_astronomy_picture_of_day";

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
#[schemars(crate = "rmcp::schemars")]
pub struct ApodParams {
    /// Optional date in YYYY-MM-DD format. If not provided, returns today's image.
    #[serde(default)]
    pub date: Option<String>,
}

/// MCP handler exposing the APOD tool over whichever source it is given.
#[derive(Clone)]
pub struct ApodSvc {
    source: Arc<dyn ApodSource>,
}

impl ApodSvc {
    pub fn new(source: Arc<dyn ApodSource>) -> Self {
        Self { source }
    }

    /// Fetch and render. Never fails: any upstream problem becomes the fixed
    /// unavailable message.
    pub async fn report(&self, date: Option<&str>) -> String {
        match self.source.fetch(date).await {
            Ok(rec) => report::render(&rec),
            Err(e) => {
                tracing::debug!(error = %e, "apod fetch collapsed to unavailable");
                report::UNAVAILABLE.to_string()
            }
        }
    }
}

impl ServerHandler for ApodSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Fetches NASA's Astronomy Picture of the Day. Call get_astronomy_picture_of_day \
                 with an optional YYYY-MM-DD date."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl ApodSvc {
    #[rmcp::tool(
        name = "get_astronomy_picture_of_day",
        description = "Get NASA's Astronomy Picture of the Day (APOD). Optional `date` in YYYY-MM-DD format; defaults to today."
    )]
    async fn get_astronomy_picture_of_day(
        &self,
        Parameters(params): Parameters<ApodParams>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        tracing::debug!(date = ?params.date, "get_astronomy_picture_of_day invoked");
        let text = self.report(params.date.as_deref()).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

pub type ApodRouter = ToolRouter<ApodSvc>;

impl ApodSvc {
    pub fn router() -> ApodRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}
