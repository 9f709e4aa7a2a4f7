use clap::{ArgAction, Parser, builder::BoolishValueParser};
use kbeauty_core::search::DEFAULT_SEARCH_ENDPOINT;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4120";
const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:4110";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HTTP_MAX_BODY_BYTES: usize = 64 * 1024;
const DEFAULT_MCP_SSE_KEEP_ALIVE_SECS: u64 = 15;
const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "kbeauty-mcpd", version, about = "K-Beauty catalog MCP daemon.")]
#[allow(clippy::struct_excessive_bools)]
pub struct CliArgs {
    #[arg(
        long = "stdio",
        env = "KBEAUTY_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "KBEAUTY_MCP_SERVE",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(
        long,
        env = "KBEAUTY_HTTP_SERVE",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "KBEAUTY_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "KBEAUTY_MCP_STATEFUL",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateful: bool,

    /// Seconds between SSE keep-alive pings; 0 turns them off.
    #[arg(
        long,
        env = "KBEAUTY_MCP_SSE_KEEP_ALIVE_SECS",
        default_value_t = DEFAULT_MCP_SSE_KEEP_ALIVE_SECS
    )]
    mcp_sse_keep_alive_secs: u64,

    #[arg(long, env = "KBEAUTY_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "KBEAUTY_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_HTTP_TIMEOUT_SECS
    )]
    http_timeout_secs: u64,

    #[arg(
        long,
        env = "KBEAUTY_HTTP_MAX_BODY_BYTES",
        default_value_t = DEFAULT_HTTP_MAX_BODY_BYTES
    )]
    http_max_body_bytes: usize,

    #[arg(
        long,
        env = "KBEAUTY_WEB_SEARCH",
        default_value_t = true,
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    web_search: bool,

    #[arg(long, env = "KBEAUTY_SEARCH_ENDPOINT", default_value = DEFAULT_SEARCH_ENDPOINT)]
    search_endpoint: String,

    #[arg(
        long,
        env = "KBEAUTY_SEARCH_TIMEOUT_MS",
        default_value_t = DEFAULT_SEARCH_TIMEOUT_MS
    )]
    search_timeout_ms: u64,

    #[arg(long, env = "KBEAUTY_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,

    #[arg(long, env = "KBEAUTY_LOG_FILE")]
    log_file: Option<PathBuf>,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct KBeautyConfig {
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub http_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateful: bool,
    pub mcp_sse_keep_alive: Option<Duration>,
    pub http_addr: SocketAddr,
    pub http_timeout: Duration,
    pub http_max_body_bytes: usize,
    pub web_search: bool,
    pub search_endpoint: String,
    pub search_timeout: Duration,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no transport enabled: set --stdio, --mcp-serve or --http-serve")]
    NoTransport,
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
}

impl KBeautyConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }
}

impl TryFrom<CliArgs> for KBeautyConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.mcp_serve && !args.http_serve {
            return Err(ConfigError::NoTransport);
        }

        if args.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "KBEAUTY_HTTP_TIMEOUT_SECS",
                value: args.http_timeout_secs.to_string(),
            });
        }
        if args.search_timeout_ms == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "KBEAUTY_SEARCH_TIMEOUT_MS",
                value: args.search_timeout_ms.to_string(),
            });
        }

        let search_endpoint = args.search_endpoint.trim().to_string();
        if search_endpoint.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "KBEAUTY_SEARCH_ENDPOINT",
                value: args.search_endpoint,
            });
        }

        let log_level = args.log_level.trim().to_string();
        if log_level.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "KBEAUTY_LOG_LEVEL",
                value: args.log_level,
            });
        }

        let log_file = args
            .log_file
            .filter(|path| !path.as_os_str().is_empty());

        Ok(Self {
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            http_serve: args.http_serve,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateful: args.mcp_stateful,
            mcp_sse_keep_alive: (args.mcp_sse_keep_alive_secs > 0)
                .then_some(Duration::from_secs(args.mcp_sse_keep_alive_secs)),
            http_addr: args.http_addr,
            http_timeout: Duration::from_secs(args.http_timeout_secs),
            http_max_body_bytes: args.http_max_body_bytes,
            web_search: args.web_search,
            search_endpoint,
            search_timeout: Duration::from_millis(args.search_timeout_ms),
            log_level,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            enable_stdio: false,
            mcp_serve: true,
            http_serve: true,
            mcp_http_addr: DEFAULT_MCP_HTTP_ADDR.parse().expect("valid MCP addr"),
            mcp_stateful: true,
            mcp_sse_keep_alive_secs: DEFAULT_MCP_SSE_KEEP_ALIVE_SECS,
            http_addr: DEFAULT_HTTP_ADDR.parse().expect("valid HTTP addr"),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            http_max_body_bytes: DEFAULT_HTTP_MAX_BODY_BYTES,
            web_search: true,
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            search_timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }

    #[test]
    fn defaults_parse() {
        let config = KBeautyConfig::try_from(base_args()).expect("config should parse");

        assert!(!config.enable_stdio);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.search_timeout, Duration::from_millis(5000));
        assert_eq!(config.http_max_body_bytes, 64 * 1024);
        assert_eq!(config.search_endpoint, DEFAULT_SEARCH_ENDPOINT);
        assert!(config.mcp_stateful);
        assert_eq!(config.mcp_sse_keep_alive, Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_keep_alive_disables_pings() {
        let args = CliArgs::try_parse_from([
            "kbeauty-mcpd",
            "--mcp-stateful",
            "false",
            "--mcp-sse-keep-alive-secs",
            "0",
        ])
        .expect("args should parse");
        let config = KBeautyConfig::try_from(args).expect("config should parse");

        assert!(!config.mcp_stateful);
        assert!(config.mcp_sse_keep_alive.is_none());
    }

    #[test]
    fn cli_flags_override_defaults() {
        let args = CliArgs::try_parse_from([
            "kbeauty-mcpd",
            "--stdio",
            "--web-search",
            "off",
            "--search-timeout-ms",
            "250",
        ])
        .expect("args should parse");
        let config = KBeautyConfig::try_from(args).expect("config should parse");

        assert!(config.enable_stdio);
        assert!(!config.web_search);
        assert_eq!(config.search_timeout, Duration::from_millis(250));
    }

    #[test]
    fn requires_a_transport() {
        let mut args = base_args();
        args.mcp_serve = false;
        args.http_serve = false;

        assert_eq!(KBeautyConfig::try_from(args).expect_err("no transport"), ConfigError::NoTransport);
    }

    #[test]
    fn stdio_alone_is_enough() {
        let mut args = base_args();
        args.enable_stdio = true;
        args.mcp_serve = false;
        args.http_serve = false;

        assert!(KBeautyConfig::try_from(args).is_ok());
    }

    #[test]
    fn rejects_zero_timeouts() {
        let mut args = base_args();
        args.search_timeout_ms = 0;
        assert!(matches!(
            KBeautyConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "KBEAUTY_SEARCH_TIMEOUT_MS", .. })
        ));

        let mut args = base_args();
        args.http_timeout_secs = 0;
        assert!(matches!(
            KBeautyConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "KBEAUTY_HTTP_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn rejects_blank_search_endpoint() {
        let mut args = base_args();
        args.search_endpoint = "   ".to_string();
        assert!(matches!(
            KBeautyConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "KBEAUTY_SEARCH_ENDPOINT", .. })
        ));
    }
}
