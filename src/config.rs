use serde::Deserialize;

/// Authentication material for direct calls to the billing aggregator.
///
/// Per the upstream contract, missing credentials degrade to empty header
/// values rather than failing startup; only the endpoint IP has a loopback
/// default.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregatorCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub outlet_id: String,
    pub endpoint_ip: String,
}

/// How outbound aggregator calls are issued.
///
/// `Direct` attaches the `X-Ipay-*` authentication headers; `Delegated`
/// forwards the same operation paths to an internal proxy base with no
/// added authentication. The mode is fixed at process startup.
#[derive(Debug, Clone, Deserialize)]
pub enum UpstreamMode {
    Direct {
        base_url: String,
        credentials: AggregatorCredentials,
    },
    Delegated {
        proxy_base_url: String,
    },
}

impl UpstreamMode {
    /// Base URL requests are issued against in this mode.
    pub fn base_url(&self) -> &str {
        match self {
            UpstreamMode::Direct { base_url, .. } => base_url,
            UpstreamMode::Delegated { proxy_base_url } => proxy_base_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub upstream: UpstreamMode,
    /// BBPS category the biller directory is filtered by (insurance).
    pub default_category_key: String,
}

const DEFAULT_BASE_URL: &str = "https://api.instantpay.in";
const DEFAULT_CATEGORY_KEY: &str = "C11";

impl Config {
    /// Assembles the configuration from the process environment.
    ///
    /// Environment is read exactly once here; handlers receive the result
    /// through `AppState` instead of re-reading ambient state per request.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?;

        let proxy_base_url = std::env::var("BBPS_PROXY_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let upstream = match proxy_base_url {
            Some(proxy_base_url) => {
                if !proxy_base_url.starts_with("http://") && !proxy_base_url.starts_with("https://")
                {
                    anyhow::bail!("BBPS_PROXY_BASE_URL must start with http:// or https://");
                }
                UpstreamMode::Delegated { proxy_base_url }
            }
            None => UpstreamMode::Direct {
                base_url: std::env::var("BBPS_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                credentials: AggregatorCredentials {
                    client_id: std::env::var("ACCESS").unwrap_or_default(),
                    client_secret: std::env::var("SECRET").unwrap_or_default(),
                    outlet_id: std::env::var("OUTLETID").unwrap_or_default(),
                    endpoint_ip: std::env::var("ENDPOINT_IP")
                        .ok()
                        .filter(|s| !s.trim().is_empty())
                        .unwrap_or_else(|| "127.0.0.1".to_string()),
                },
            },
        };

        let default_category_key = std::env::var("BBPS_CATEGORY_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY_KEY.to_string());

        let config = Self {
            port,
            upstream,
            default_category_key,
        };

        // Log configuration without credential values
        tracing::info!("Configuration loaded successfully");
        match &config.upstream {
            UpstreamMode::Direct { base_url, .. } => {
                tracing::debug!("Aggregator base URL (direct): {}", base_url);
            }
            UpstreamMode::Delegated { proxy_base_url } => {
                tracing::info!("Delegating aggregator calls to proxy: {}", proxy_base_url);
            }
        }
        tracing::debug!("Category key: {}", config.default_category_key);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
