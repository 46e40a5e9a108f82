use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const WIKIDATA_API_URL: &str = "https://www.wikidata.org/w/api.php";
pub const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const IMAGE_RESIZER_URL: &str = "https://commons.wikimedia.org/w/thumb.php";

/// Endpoints and HTTP settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub wikidata_api: String,
    pub wikipedia_api: String,
    pub image_resizer: String,
    /// Wikimedia rejects requests without a descriptive user agent.
    pub user_agent: String,
    pub timeout: Option<Duration>,
    /// Honour `HTTP_PROXY` and friends.
    pub use_system_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wikidata_api: WIKIDATA_API_URL.to_string(),
            wikipedia_api: WIKIPEDIA_API_URL.to_string(),
            image_resizer: IMAGE_RESIZER_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Some(Duration::from_secs(30)),
            use_system_proxy: true,
        }
    }
}

/// HTTP client shared by all requests. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Config,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GETs `url` and decodes the body as `T`.
    pub(crate) async fn query<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(%url, "GET");
        let res = self.http.get(url).send().await?;
        let status = res.status();
        if !status.is_success() {
            warn!(%url, %status, "request failed");
            return Err(Error::Status {
                status,
                url: url.to_string(),
            });
        }
        let body = res.bytes().await?;
        if let Ok(ErrorEnvelope { error: Some(err) }) = serde_json::from_slice(&body) {
            warn!(%url, code = %err.code, info = %err.info, "api error");
            return Err(Error::Api {
                code: err.code,
                info: err.info,
            });
        }
        Ok(serde_json::from_slice(&body)?)
    }
}

// The action API reports failures with status 200 and this body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    code: String,
    info: String,
}
