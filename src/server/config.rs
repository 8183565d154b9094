use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::dispatch::{DEFAULT_HMRC_BASE_URL, DEFAULT_IRELAND_URL, DEFAULT_SDI_URL, Endpoints};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable single-line output.
    Compact,
    /// One JSON object per line, for log shippers.
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "govly", version, about = "Forward VAT returns to Revenue (IE), SdI (IT) and HMRC (UK)")]
pub struct CliArgs {
    /// Address the HTTP server listens on.
    #[arg(long, env = "GOVLY_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Revenue Ireland VAT3 declaration endpoint.
    #[arg(long, env = "GOVLY_IRELAND_URL", default_value = DEFAULT_IRELAND_URL)]
    pub ireland_url: Url,

    /// SdI SOAP endpoint.
    #[arg(long, env = "GOVLY_SDI_URL", default_value = DEFAULT_SDI_URL)]
    pub sdi_url: Url,

    /// HMRC VAT API base; returns are posted to `<base>/<regnum>/returns`.
    #[arg(long, env = "GOVLY_HMRC_URL", default_value = DEFAULT_HMRC_BASE_URL)]
    pub hmrc_url: Url,

    /// Per-request timeout for upstream calls, in seconds. Unset means none.
    #[arg(long, env = "GOVLY_UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: Option<u64>,

    /// Log output format.
    #[arg(long, env = "GOVLY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub endpoints: Endpoints,
    pub upstream_timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let CliArgs {
            bind,
            ireland_url,
            sdi_url,
            hmrc_url,
            upstream_timeout_secs,
            log_format,
        } = args;

        for (flag, url) in [
            ("--ireland-url", &ireland_url),
            ("--sdi-url", &sdi_url),
            ("--hmrc-url", &hmrc_url),
        ] {
            anyhow::ensure!(
                matches!(url.scheme(), "http" | "https"),
                "{flag} must be an http(s) URL, got '{url}'"
            );
        }

        if let Some(secs) = upstream_timeout_secs {
            anyhow::ensure!(secs > 0, "--upstream-timeout-secs must be greater than zero");
        }

        Ok(Self {
            bind,
            endpoints: Endpoints {
                ireland: ireland_url,
                sdi: sdi_url,
                hmrc_base: hmrc_url,
            },
            upstream_timeout: upstream_timeout_secs.map(Duration::from_secs),
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig> {
        let mut argv = vec!["govly"];
        argv.extend_from_slice(args);
        ServerConfig::from_args(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.endpoints, Endpoints::default());
        assert!(config.upstream_timeout.is_none());
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn overrides() {
        let config = parse(&[
            "--bind",
            "127.0.0.1:9000",
            "--hmrc-url",
            "http://localhost:1234/vat",
            "--upstream-timeout-secs",
            "15",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.endpoints.hmrc_base.as_str(), "http://localhost:1234/vat");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let err = parse(&["--sdi-url", "ftp://example.test/sdi"]).unwrap_err();
        assert!(err.to_string().contains("--sdi-url"));
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(parse(&["--upstream-timeout-secs", "0"]).is_err());
    }
}
