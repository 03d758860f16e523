//! Configuration for remote execution.
//!
//! Supports loading configuration from:
//! 1. A YAML file (`~/.qlab/config.yaml` unless overridden)
//! 2. Environment variables
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! A missing file is not an error. Credentials are only demanded when remote
//! execution is requested, through [`QlabConfig::credentials`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::PollPolicy;
use crate::error::{HalError, HalResult};

/// Environment variable naming an alternative configuration file.
pub const CONFIG_ENV: &str = "QLAB_CONFIG";
/// Environment variables holding the IBM API token, in priority order.
pub const TOKEN_ENVS: [&str; 2] = ["QLAB_IBM_TOKEN", "IBM_QUANTUM_TOKEN"];
/// Environment variable overriding the IBM API endpoint.
pub const ENDPOINT_ENV: &str = "QLAB_IBM_ENDPOINT";

/// Complete qlab configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QlabConfig {
    /// IBM Quantum account settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibm: Option<IbmSettings>,

    /// Job polling settings.
    #[serde(default)]
    pub execution: ExecutionSettings,
}

/// IBM Quantum account settings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct IbmSettings {
    /// API token (legacy flow) or API key (IAM flow).
    #[serde(default)]
    pub key: Option<String>,

    /// API endpoint override.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Cloud resource name; selects the IAM key exchange flow when set.
    #[serde(default)]
    pub service_crn: Option<String>,

    /// Hub/group/project instance for the legacy flow.
    #[serde(default)]
    pub instance: Option<String>,

    /// Outbound proxies.
    #[serde(default)]
    pub proxies: ProxySettings,

    /// Verify TLS certificates.
    #[serde(default = "default_verify")]
    pub verify: bool,
}

impl fmt::Debug for IbmSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmSettings")
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("endpoint", &self.endpoint)
            .field("service_crn", &self.service_crn)
            .field("instance", &self.instance)
            .field("proxies", &self.proxies)
            .field("verify", &self.verify)
            .finish()
    }
}

/// HTTP and HTTPS proxy URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxySettings {
    /// Proxy for plain HTTP requests.
    #[serde(default)]
    pub http: Option<String>,
    /// Proxy for HTTPS requests.
    #[serde(default)]
    pub https: Option<String>,
}

/// Remote job polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSettings {
    /// Delay between status queries, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up waiting for a remote job after this many seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ExecutionSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ExecutionSettings {
    /// Polling policy for remote backends.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::with_timeout(
            Duration::from_millis(self.poll_interval_ms),
            Duration::from_secs(self.timeout_secs),
        )
    }
}

fn default_verify() -> bool {
    true
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_timeout_secs() -> u64 {
    3600
}

/// Everything needed to open an IBM Quantum session.
#[derive(Clone)]
pub struct Credentials {
    /// API token or key.
    pub token: String,
    /// Endpoint override.
    pub endpoint: Option<String>,
    /// Cloud resource name for the IAM flow.
    pub service_crn: Option<String>,
    /// Hub/group/project instance.
    pub instance: Option<String>,
    /// Outbound proxies.
    pub proxies: ProxySettings,
    /// Verify TLS certificates.
    pub verify: bool,
    /// Polling policy for jobs.
    pub poll_policy: PollPolicy,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("service_crn", &self.service_crn)
            .field("instance", &self.instance)
            .field("proxies", &self.proxies)
            .field("verify", &self.verify)
            .field("poll_policy", &self.poll_policy)
            .finish()
    }
}

impl QlabConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(text: &str) -> HalResult<Self> {
        let config: QlabConfig = serde_yaml_ng::from_str(text)
            .map_err(|e| HalError::Configuration(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HalResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            HalError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Default configuration file location, `~/.qlab/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qlab").join("config.yaml"))
    }

    /// Load configuration with environment overrides applied.
    ///
    /// An explicit `path` must exist. Otherwise `QLAB_CONFIG` or the default
    /// location is read when present, and defaults are used when not.
    pub fn load(path: Option<&Path>) -> HalResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = std::env::var_os(CONFIG_ENV)
                    .map(PathBuf::from)
                    .or_else(Self::default_path);
                match candidate {
                    Some(path) if path.exists() => Self::from_file(&path)?,
                    _ => {
                        debug!("no configuration file found, using defaults");
                        Self::default()
                    }
                }
            }
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge process environment variables into this configuration.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|name| std::env::var(name).ok())
    }

    /// Merge variables from `lookup` into this configuration.
    ///
    /// Only variables that are set override the loaded values.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let token = TOKEN_ENVS.iter().find_map(|name| lookup(name));
        let endpoint = lookup(ENDPOINT_ENV);

        if token.is_some() || endpoint.is_some() {
            let ibm = self.ibm.get_or_insert_with(|| IbmSettings {
                verify: true,
                ..IbmSettings::default()
            });
            if let Some(token) = token {
                ibm.key = Some(token);
            }
            if let Some(endpoint) = endpoint {
                ibm.endpoint = Some(endpoint);
            }
        }
        self
    }

    /// Check the configuration for values that can never work.
    pub fn validate(&self) -> HalResult<()> {
        if self.execution.poll_interval_ms == 0 {
            return Err(HalError::Configuration(
                "execution.poll_interval_ms must be greater than zero".into(),
            ));
        }
        if self.execution.timeout_secs == 0 {
            return Err(HalError::Configuration(
                "execution.timeout_secs must be greater than zero".into(),
            ));
        }
        if let Some(ibm) = &self.ibm {
            for url in [&ibm.endpoint, &ibm.proxies.http, &ibm.proxies.https]
                .into_iter()
                .flatten()
            {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(HalError::Configuration(format!(
                        "expected an http(s) URL, got '{url}'"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Credentials for remote execution.
    ///
    /// Fails with [`HalError::Configuration`] when no API key is configured.
    pub fn credentials(&self) -> HalResult<Credentials> {
        let ibm = self.ibm.as_ref().ok_or_else(|| {
            HalError::Configuration(format!(
                "no 'ibm' section configured; add one to the config file or set {}",
                TOKEN_ENVS[0]
            ))
        })?;
        let token = ibm
            .key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HalError::Configuration("ibm.key is missing or empty".into()))?;

        Ok(Credentials {
            token: token.to_string(),
            endpoint: ibm.endpoint.clone(),
            service_crn: ibm.service_crn.clone(),
            instance: ibm.instance.clone(),
            proxies: ibm.proxies.clone(),
            verify: ibm.verify,
            poll_policy: self.execution.poll_policy(),
        })
    }
}
