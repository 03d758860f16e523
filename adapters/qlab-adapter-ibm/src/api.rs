//! HTTP client for the Qiskit Runtime REST API.
//!
//! Two ways in: the IBM Cloud API (`quantum.cloud.ibm.com`), which wants an
//! IAM bearer token and a `Service-CRN` header on every call, and the older
//! `api.quantum-computing.ibm.com`, which takes the key itself as the bearer
//! token. Both expose `/v1/backends` and `/v1/jobs` with slightly different
//! payloads; the types here flatten those differences.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use qlab_hal::{Credentials, JobStatus, ProxySettings};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::{IbmError, IbmResult};

pub const CLOUD_ENDPOINT: &str = "https://quantum.cloud.ibm.com/api";
pub const LEGACY_ENDPOINT: &str = "https://api.quantum-computing.ibm.com";

const IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
const API_VERSION: &str = "2026-02-01";
// reqwest's default agent is blocked at the edge.
const USER_AGENT: &str = concat!("qlab/", env!("CARGO_PKG_VERSION"));
const TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Proxy and TLS settings applied to every connection.
#[derive(Debug, Clone)]
pub struct Transport {
    pub proxies: ProxySettings,
    pub verify: bool,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            proxies: ProxySettings::default(),
            verify: true,
        }
    }
}

impl From<&Credentials> for Transport {
    fn from(credentials: &Credentials) -> Self {
        Self {
            proxies: credentials.proxies.clone(),
            verify: credentials.verify,
        }
    }
}

impl Transport {
    fn client(&self, headers: HeaderMap) -> IbmResult<Client> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT);

        if let Some(url) = &self.proxies.http {
            builder = builder.proxy(proxy(Proxy::http(url), url)?);
        }
        if let Some(url) = &self.proxies.https {
            builder = builder.proxy(proxy(Proxy::https(url), url)?);
        }

        if !self.verify {
            warn!("TLS certificate checks are off for IBM Quantum");
            builder = builder.danger_accept_invalid_certs(true);
        }
        Ok(builder.build()?)
    }
}

fn proxy(made: reqwest::Result<Proxy>, url: &str) -> IbmResult<Proxy> {
    made.map_err(|e| IbmError::Proxy {
        url: url.to_owned(),
        reason: e.to_string(),
    })
}

fn header_value(value: &str, what: &'static str) -> IbmResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| IbmError::BadHeader(what))
}

fn bearer_headers(token: &str) -> IbmResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header_value(&format!("Bearer {token}"), "token")?,
    );
    let json = HeaderValue::from_static("application/json");
    headers.insert(header::CONTENT_TYPE, json.clone());
    headers.insert(header::ACCEPT, json);
    Ok(headers)
}

/// Which API the client speaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flavor {
    Cloud,
    /// `instance` is the hub/group/project jobs are billed to.
    Legacy { instance: Option<String> },
}

pub struct IbmClient {
    http: Client,
    base: String,
    flavor: Flavor,
}

impl fmt::Debug for IbmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IbmClient")
            .field("base", &self.base)
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct IamGrant {
    access_token: String,
}

impl IbmClient {
    /// Use `token` directly as the bearer token.
    pub fn legacy(endpoint: impl Into<String>, token: &str, transport: &Transport) -> IbmResult<Self> {
        Ok(Self {
            http: transport.client(bearer_headers(token)?)?,
            base: endpoint.into(),
            flavor: Flavor::Legacy { instance: None },
        })
    }

    /// Trade an IBM Cloud API key for an IAM token.
    pub async fn cloud(
        api_key: &str,
        service_crn: &str,
        endpoint: Option<&str>,
        transport: &Transport,
    ) -> IbmResult<Self> {
        let iam = transport.client(HeaderMap::new())?;
        let response = iam
            .post(IAM_URL)
            .form(&[
                ("grant_type", "urn:ibm:params:oauth:grant-type:apikey"),
                ("apikey", api_key),
            ])
            .send()
            .await
            .map_err(|e| IbmError::Iam(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| IbmError::Iam(e.to_string()))?;
        if !status.is_success() {
            return Err(IbmError::Iam(format!("{status}: {}", error_message(&body))));
        }
        let grant: IamGrant = serde_json::from_str(&body)
            .map_err(|e| IbmError::Iam(format!("unreadable grant: {e}")))?;
        debug!("IAM token issued");

        let mut headers = bearer_headers(&grant.access_token)?;
        headers.insert(
            HeaderName::from_static("service-crn"),
            header_value(service_crn, "service CRN")?,
        );
        headers.insert(
            HeaderName::from_static("ibm-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        Ok(Self {
            http: transport.client(headers)?,
            base: endpoint.unwrap_or(CLOUD_ENDPOINT).to_owned(),
            flavor: Flavor::Cloud,
        })
    }

    /// Bill legacy jobs to a hub/group/project. No effect on the Cloud API.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        if let Flavor::Legacy { instance: slot } = &mut self.flavor {
            *slot = Some(instance.into());
        }
        self
    }

    pub fn flavor(&self) -> &Flavor {
        &self.flavor
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        missing: impl FnOnce() -> IbmError,
    ) -> IbmResult<T> {
        let response = self.http.get(format!("{}{path}", self.base)).send().await?;
        decode(response, missing).await
    }

    /// Every device the account can see.
    ///
    /// The Cloud API lists names only, so each device is then looked up on
    /// its own; devices whose lookup fails are left out.
    pub async fn devices(&self) -> IbmResult<Vec<Device>> {
        let missing = || IbmError::NoSuchDevice("device list".into());
        if self.flavor != Flavor::Cloud {
            let listing: LegacyListing = self.get("/v1/backends", missing).await?;
            return Ok(listing.backends.into_iter().map(Device::from).collect());
        }

        let listing: CloudListing = self.get("/v1/backends", missing).await?;
        let mut devices = Vec::with_capacity(listing.devices.len());
        for entry in listing.devices {
            match self.device(&entry.name).await {
                Ok(device) => devices.push(device),
                Err(e) => warn!(device = %entry.name, error = %e, "device skipped"),
            }
        }
        Ok(devices)
    }

    pub async fn device(&self, name: &str) -> IbmResult<Device> {
        let missing = || IbmError::NoSuchDevice(name.to_owned());
        if self.flavor != Flavor::Cloud {
            let legacy: LegacyDevice = self.get(&format!("/v1/backends/{name}"), missing).await?;
            return Ok(legacy.into());
        }

        let config: CloudConfiguration = self
            .get(&format!("/v1/backends/{name}/configuration"), missing)
            .await?;
        // A device with a configuration but no status page is taken as up.
        let status = match self
            .get::<CloudStatus>(&format!("/v1/backends/{name}/status"), || {
                IbmError::NoSuchDevice(name.to_owned())
            })
            .await
        {
            Ok(status) => status,
            Err(e) => {
                debug!(device = name, error = %e, "no status page");
                CloudStatus::default()
            }
        };
        Ok(Device::merge(config, status))
    }

    /// Start a Sampler job on `device`; returns the job id.
    pub async fn run_sampler(&self, device: &str, qasm: String, shots: u32) -> IbmResult<String> {
        let body = sampler_body(&self.flavor, device, qasm, shots);
        let response = self
            .http
            .post(format!("{}/v1/jobs", self.base))
            .json(&body)
            .send()
            .await?;
        let created: Created = decode(response, || IbmError::NoSuchDevice(device.to_owned())).await?;
        Ok(created.id)
    }

    pub async fn job(&self, id: &str) -> IbmResult<RemoteJob> {
        self.get(&format!("/v1/jobs/{id}"), || IbmError::NoSuchJob(id.to_owned()))
            .await
    }

    pub async fn job_results(&self, id: &str) -> IbmResult<SamplerResults> {
        self.get(&format!("/v1/jobs/{id}/results"), || {
            IbmError::NoSuchJob(id.to_owned())
        })
        .await
    }
}

async fn decode<T: DeserializeOwned>(
    response: Response,
    missing: impl FnOnce() -> IbmError,
) -> IbmResult<T> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(missing());
    }
    let body = response.text().await?;
    if !status.is_success() {
        return Err(IbmError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Pull a readable message out of an error body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Entry {
        message: String,
    }
    #[derive(Deserialize)]
    struct Body {
        message: Option<String>,
        #[serde(default)]
        errors: Vec<Entry>,
        #[serde(rename = "errorMessage")]
        error_message: Option<String>,
    }

    let parsed = serde_json::from_str::<Body>(body).ok().and_then(|b| {
        b.message
            .or(b.error_message)
            .or_else(|| b.errors.into_iter().next().map(|e| e.message))
    });
    match parsed {
        Some(message) => message,
        None if body.trim().is_empty() => "empty response".to_owned(),
        None => body.trim().chars().take(200).collect(),
    }
}

/// Sampler request body.
///
/// The Cloud API takes V2 PUBs (`[circuit, params, shots]`) and needs the
/// service to lay the circuit out on hardware; the legacy API takes a V1
/// circuit list and an optional hub.
fn sampler_body(flavor: &Flavor, device: &str, qasm: String, shots: u32) -> Value {
    match flavor {
        Flavor::Cloud => json!({
            "program_id": "sampler",
            "backend": device,
            "params": {
                "version": 2,
                "pubs": [[qasm, {}, shots]],
                "options": { "optimization_level": 1 }
            }
        }),
        Flavor::Legacy { instance } => {
            let mut body = json!({
                "program_id": "sampler",
                "backend": device,
                "params": {
                    "circuits": [qasm],
                    "shots": shots,
                    "skip_transpilation": false
                }
            });
            if let Some(hub) = instance {
                body["hub"] = json!(hub);
            }
            body
        }
    }
}

/// A device, whichever API described it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub name: String,
    pub num_qubits: u32,
    pub simulator: bool,
    pub operational: bool,
    /// Jobs ahead in the device queue.
    pub queue: u32,
    /// Free-text state such as `active` or `maintenance`.
    pub note: Option<String>,
    pub max_shots: Option<u32>,
}

impl Device {
    fn merge(config: CloudConfiguration, status: CloudStatus) -> Self {
        Self {
            name: config.backend_name,
            num_qubits: config.n_qubits,
            simulator: config.simulator,
            operational: status.state,
            queue: u32::try_from(status.length_queue).unwrap_or(u32::MAX),
            note: status.status.filter(|s| !s.is_empty()),
            max_shots: config.max_shots,
        }
    }
}

#[derive(Deserialize)]
struct CloudListing {
    devices: Vec<CloudEntry>,
}

#[derive(Deserialize)]
struct CloudEntry {
    name: String,
}

#[derive(Deserialize)]
struct CloudConfiguration {
    backend_name: String,
    n_qubits: u32,
    #[serde(default)]
    simulator: bool,
    #[serde(default)]
    max_shots: Option<u32>,
}

#[derive(Deserialize)]
struct CloudStatus {
    state: bool,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    length_queue: u64,
}

impl Default for CloudStatus {
    fn default() -> Self {
        Self {
            state: true,
            status: None,
            length_queue: 0,
        }
    }
}

#[derive(Deserialize)]
struct LegacyListing {
    backends: Vec<LegacyDevice>,
}

#[derive(Deserialize)]
struct LegacyDevice {
    name: String,
    num_qubits: u32,
    #[serde(default)]
    simulator: bool,
    #[serde(default)]
    max_shots: Option<u32>,
    status: LegacyStatus,
}

#[derive(Deserialize)]
struct LegacyStatus {
    operational: bool,
    #[serde(default)]
    status_msg: Option<String>,
    #[serde(default)]
    pending_jobs: Option<u32>,
}

impl From<LegacyDevice> for Device {
    fn from(d: LegacyDevice) -> Self {
        Self {
            name: d.name,
            num_qubits: d.num_qubits,
            simulator: d.simulator,
            operational: d.status.operational,
            queue: d.status.pending_jobs.unwrap_or(0),
            note: d.status.status_msg,
            max_shots: d.max_shots,
        }
    }
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

/// A job as `/v1/jobs/{id}` reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteJob {
    pub id: String,
    /// `Queued`, `Running`, `Completed`... in whatever case the API uses.
    pub status: String,
    /// Cloud API failure detail.
    #[serde(default)]
    state: Option<JobState>,
    /// Legacy API failure detail.
    #[serde(default)]
    error: Option<JobError>,
}

#[derive(Debug, Clone, Deserialize)]
struct JobState {
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct JobError {
    message: String,
}

impl RemoteJob {
    pub fn reason(&self) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|s| s.reason.as_deref())
            .or(self.error.as_ref().map(|e| e.message.as_str()))
    }

    pub fn to_status(&self) -> JobStatus {
        match self.status.to_ascii_uppercase().as_str() {
            "QUEUED" => JobStatus::Queued,
            "VALIDATING" | "RUNNING" => JobStatus::Running,
            "COMPLETED" => JobStatus::Done,
            "CANCELLED" => JobStatus::Cancelled,
            "FAILED" | "ERROR" => {
                JobStatus::Failed(self.reason().unwrap_or("no reason given").to_owned())
            }
            other => {
                debug!(job_id = %self.id, status = other, "unfamiliar status, assuming running");
                JobStatus::Running
            }
        }
    }
}

/// `/v1/jobs/{id}/results`: one entry per submitted circuit.
#[derive(Debug, Deserialize)]
pub struct SamplerResults {
    pub results: Vec<PubResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PubResult {
    /// V2: per-register shot samples.
    #[serde(default)]
    pub data: Option<HashMap<String, Samples>>,
    /// V1: aggregated counts.
    #[serde(default)]
    pub counts: Option<HashMap<String, u64>>,
    /// V1: quasi-probabilities, one map per circuit.
    #[serde(default)]
    pub quasi_dists: Option<Vec<HashMap<String, f64>>>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// One hex-encoded outcome per shot, e.g. `"0x3"`.
#[derive(Debug, Deserialize)]
pub struct Samples {
    pub samples: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(status: &str) -> RemoteJob {
        serde_json::from_value(json!({ "id": "j1", "status": status })).unwrap()
    }

    #[test]
    fn test_job_status_any_case() {
        assert_eq!(job("Queued").to_status(), JobStatus::Queued);
        assert_eq!(job("VALIDATING").to_status(), JobStatus::Running);
        assert_eq!(job("Completed").to_status(), JobStatus::Done);
        assert_eq!(job("cancelled").to_status(), JobStatus::Cancelled);
        assert_eq!(job("Paused").to_status(), JobStatus::Running);
        assert_eq!(
            job("ERROR").to_status(),
            JobStatus::Failed("no reason given".into())
        );
    }

    #[test]
    fn test_failure_reason_prefers_cloud_state() {
        let failed: RemoteJob = serde_json::from_value(json!({
            "id": "j2",
            "status": "Failed",
            "state": { "reason": "circuit too deep" },
            "error": { "message": "ignored" }
        }))
        .unwrap();
        assert_eq!(failed.to_status(), JobStatus::Failed("circuit too deep".into()));

        let legacy: RemoteJob = serde_json::from_value(json!({
            "id": "j3",
            "status": "FAILED",
            "error": { "message": "bad qasm" }
        }))
        .unwrap();
        assert_eq!(legacy.reason(), Some("bad qasm"));
    }

    #[test]
    fn test_cloud_sampler_body() {
        let body = sampler_body(&Flavor::Cloud, "ibm_torino", "c0".into(), 225);
        assert_eq!(body["backend"], "ibm_torino");
        assert_eq!(body["params"]["version"], 2);
        assert_eq!(body["params"]["pubs"][0], json!(["c0", {}, 225]));
        assert!(body.get("hub").is_none());
    }

    #[test]
    fn test_legacy_sampler_body() {
        let flavor = Flavor::Legacy {
            instance: Some("hub/group/project".into()),
        };
        let body = sampler_body(&flavor, "ibmq_lima", "c0".into(), 100);
        assert_eq!(body["params"]["shots"], 100);
        assert_eq!(body["params"]["circuits"], json!(["c0"]));
        assert_eq!(body["hub"], "hub/group/project");

        let bare = sampler_body(&Flavor::Legacy { instance: None }, "ibmq_lima", "c0".into(), 1);
        assert!(bare.get("hub").is_none());
    }

    #[test]
    fn test_cloud_device_merge() {
        let config: CloudConfiguration = serde_json::from_value(json!({
            "backend_name": "ibm_torino",
            "n_qubits": 133,
            "basis_gates": ["cz", "rz", "sx", "x"]
        }))
        .unwrap();
        let status: CloudStatus =
            serde_json::from_value(json!({ "state": true, "status": "active", "length_queue": 12 }))
                .unwrap();

        let device = Device::merge(config, status);
        assert_eq!(device.name, "ibm_torino");
        assert_eq!(device.num_qubits, 133);
        assert!(device.operational && !device.simulator);
        assert_eq!(device.queue, 12);
        assert_eq!(device.note.as_deref(), Some("active"));
    }

    #[test]
    fn test_legacy_listing() {
        let listing: LegacyListing = serde_json::from_value(json!({ "backends": [{
            "name": "ibmq_qasm_simulator",
            "num_qubits": 32,
            "simulator": true,
            "status": { "operational": true, "pending_jobs": 3 }
        }]}))
        .unwrap();
        let device = Device::from(listing.backends.into_iter().next().unwrap());
        assert!(device.simulator);
        assert_eq!(device.queue, 3);
        assert!(device.max_shots.is_none());
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"message": "quota exceeded"}"#), "quota exceeded");
        assert_eq!(
            error_message(r#"{"errors": [{"message": "bad crn", "code": 1}]}"#),
            "bad crn"
        );
        assert_eq!(error_message(r#"{"errorMessage": "no key"}"#), "no key");
        assert_eq!(error_message("  gateway timeout \n"), "gateway timeout");
        assert_eq!(error_message(""), "empty response");
    }

    #[test]
    fn test_legacy_client_hides_token() {
        let client = IbmClient::legacy("https://example.com", "secret-token", &Transport::default())
            .unwrap()
            .with_instance("hub/group/project");
        assert_eq!(
            client.flavor(),
            &Flavor::Legacy {
                instance: Some("hub/group/project".into())
            }
        );
        assert!(!format!("{client:?}").contains("secret-token"));
    }

    #[test]
    fn test_transport_with_proxies_and_no_verify() {
        let transport = Transport {
            proxies: ProxySettings {
                http: Some("http://proxy.local:3128".into()),
                https: Some("http://proxy.local:3128".into()),
            },
            verify: false,
        };
        assert!(IbmClient::legacy(LEGACY_ENDPOINT, "token", &transport).is_ok());
    }

    #[test]
    fn test_token_with_newline_is_refused() {
        let err = IbmClient::legacy(LEGACY_ENDPOINT, "bad\ntoken", &Transport::default())
            .unwrap_err();
        assert!(matches!(err, IbmError::BadHeader("token")));
    }
}
