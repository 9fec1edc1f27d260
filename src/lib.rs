//! MCP server exposing NASA's Astronomy Picture of the Day as a single tool.
//!
//! - `get_astronomy_picture_of_day` tool via rmcp (stdio or Streamable HTTP at `/mcp`)
//! - optional plain REST route `GET /v1/apod`
//! - admin CLI (`apod`, `health`, `config`, `status`)

pub mod cli;
pub mod clients;
pub mod core;
pub mod domain;
pub mod infra;
pub mod tools;
