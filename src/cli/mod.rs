use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::config::AppConfig;

#[derive(Parser)]
#[command(name = "nasa-apod-mcp")]
#[command(about = "NASA APOD MCP server - runs the server when no subcommand is given")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch one Astronomy Picture of the Day and print the report
    Apod {
        /// Date in YYYY-MM-DD format (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Health check a running server
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status and configuration
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Apod { date } => match print_apod(&AppConfig::global().nasa, date.as_deref()).await {
            Ok(report) => {
                println!("{report}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Could not build NASA client: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn print_apod(
    cfg: &crate::infra::config::NasaConfig,
    date: Option<&str>,
) -> Result<String, Box<dyn std::error::Error>> {
    let svc = crate::tools::apod::svc_from_config(cfg)?;
    Ok(svc.report(date).await)
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = AppConfig::load()?;

    if !matches!(cfg.mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", cfg.mode).into());
    }
    if cfg.mode == "server" && cfg.port == 0 {
        return Err("PORT cannot be 0".into());
    }
    if !cfg.nasa.base_url.starts_with("http://") && !cfg.nasa.base_url.starts_with("https://") {
        return Err(format!("Invalid NASA_API_BASE: {}", cfg.nasa.base_url).into());
    }
    if cfg.uses_demo_key() {
        eprintln!("⚠️  NASA_API_KEY not set; DEMO_KEY is heavily rate limited");
    }

    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let tools_response = client
        .post(format!("{}/mcp", url))
        .header("content-type", "application/json")
        .header("accept", "application/json, text/event-stream")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            println!("🔧 Tools: ✅ Available");
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    println!("\n📋 Configuration:");
    print!("{}", config_summary(&AppConfig::load_or_env()));

    Ok(())
}

fn config_summary(cfg: &AppConfig) -> String {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let api_key = if cfg.uses_demo_key() { "DEMO_KEY" } else { "configured" };
    let rest = if cfg.disable_rest { "disabled" } else { "enabled" };
    format!(
        "  Mode: {}\n  Port: {}\n  Log Level: {}\n  NASA API: {}\n  API Key: {}\n  Timeout: {}s\n  REST /v1/apod: {}\n",
        cfg.mode, cfg.port, log_level, cfg.nasa.base_url, api_key, cfg.nasa.timeout_secs, rest
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::config::NasaConfig;
    use serial_test::serial;
    use std::env;

    #[tokio::test]
    async fn health_check_fails_without_service() {
        let result = health_check("http://localhost:9").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn health_check_ok_and_error_paths() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        assert!(health_check(&server.base_url()).await.is_ok());

        let bad = MockServer::start();
        bad.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500); });
        assert!(health_check(&bad.base_url()).await.is_err());
    }

    #[tokio::test]
    async fn print_apod_renders_report_from_upstream() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/planetary/apod").query_param("date", "2020-01-01");
            then.status(200).json_body(serde_json::json!({
                "date": "2020-01-01", "title": "Horsehead", "url": "http://x/y.jpg"
            }));
        });
        let cfg = NasaConfig { api_key: "k".into(), base_url: server.base_url(), timeout_secs: 5 };
        let out = print_apod(&cfg, Some("2020-01-01")).await.unwrap();
        assert!(out.contains("Horsehead"));
    }

    #[tokio::test]
    async fn print_apod_reports_unavailable_on_failure() {
        let cfg = NasaConfig { api_key: "k".into(), base_url: "http://localhost:9".into(), timeout_secs: 2 };
        let out = print_apod(&cfg, None).await.unwrap();
        assert_eq!(out, crate::tools::apod::report::UNAVAILABLE);
    }

    fn clear_env() {
        for v in ["MODE", "PORT", "NASA_TIMEOUT_SECS", "NASA_API_BASE", "NASA_API_KEY", "NASA_MCP_CONFIG"] {
            env::remove_var(v);
        }
    }

    #[test]
    #[serial]
    fn test_validate_config_valid() {
        clear_env();
        env::set_var("MODE", "server");
        env::set_var("PORT", "8080");
        assert!(validate_config().is_ok());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_config_invalid_mode() {
        clear_env();
        env::set_var("MODE", "invalid");
        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("Invalid MODE"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_config_invalid_port() {
        clear_env();
        env::set_var("MODE", "server");
        env::set_var("PORT", "0");
        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("PORT cannot be 0"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_config_zero_timeout() {
        clear_env();
        env::set_var("NASA_TIMEOUT_SECS", "0");
        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("NASA_TIMEOUT_SECS"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_validate_config_bad_base() {
        clear_env();
        env::set_var("NASA_API_BASE", "ftp://api.nasa.gov");
        let result = validate_config();
        assert!(result.unwrap_err().to_string().contains("Invalid NASA_API_BASE"));
        clear_env();
    }

    #[tokio::test]
    async fn status_handles_non_200_health_and_tools() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(500).body("boom"); });
        server.mock(|when, then| { when.method(POST).path("/mcp"); then.status(500).body("boom"); });
        assert!(show_status(&server.base_url()).await.is_ok());
    }

    #[test]
    #[serial]
    fn status_summary_includes_file_settings() {
        clear_env();
        let path = env::temp_dir().join(format!("nasa-apod-mcp-status-{}.toml", std::process::id()));
        std::fs::write(&path, "port = 4321\n\n[nasa]\napi_key = \"file-key\"\ntimeout_secs = 12\n").unwrap();
        env::set_var("NASA_MCP_CONFIG", &path);

        let summary = config_summary(&AppConfig::load_or_env());
        assert!(summary.contains("Port: 4321"));
        assert!(summary.contains("API Key: configured"));
        assert!(summary.contains("Timeout: 12s"));

        clear_env();
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn status_fails_when_service_is_down() {
        assert!(show_status("http://localhost:9").await.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_config_failure() {
        clear_env();
        env::set_var("MODE", "nope");
        let code = run_commands(Commands::Config { validate: true }).await;
        assert_eq!(code, ExitCode::FAILURE);
        clear_env();
    }

    #[tokio::test]
    async fn run_commands_health_success() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| { when.method(GET).path("/healthz"); then.status(200).body("ok"); });
        let code = run_commands(Commands::Health { url: server.base_url() }).await;
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn cli_parses_apod_date() {
        let cli = Cli::try_parse_from(["nasa-apod-mcp", "apod", "--date", "2020-01-01"]).unwrap();
        match cli.command {
            Some(Commands::Apod { date }) => assert_eq!(date.as_deref(), Some("2020-01-01")),
            _ => panic!("expected apod subcommand"),
        }
    }

    #[test]
    fn cli_without_subcommand_serves() {
        let cli = Cli::try_parse_from(["nasa-apod-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }
}
