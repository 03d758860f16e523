//! Device discovery for an IBM Quantum account.

use std::sync::Arc;

use async_trait::async_trait;
use qlab_hal::{Backend, Credentials, DeviceInfo, DeviceProvider, HalResult, PollPolicy};
use tracing::info;

use crate::api::{Device, IbmClient, LEGACY_ENDPOINT, Transport};
use crate::backend::IbmBackend;
use crate::error::{IbmError, IbmResult};

/// A logged-in IBM Quantum account.
#[derive(Debug)]
pub struct IbmProvider {
    client: Arc<IbmClient>,
    poll_policy: PollPolicy,
}

impl IbmProvider {
    /// Log in with loaded credentials.
    ///
    /// With a service CRN the key goes through IBM Cloud IAM; otherwise it
    /// is the bearer token for the legacy endpoint.
    pub async fn connect(credentials: &Credentials) -> IbmResult<Self> {
        let key = credentials.token.trim();
        if key.is_empty() {
            return Err(IbmError::MissingToken);
        }
        let transport = Transport::from(credentials);
        let endpoint = credentials.endpoint.as_deref();

        let client = if let Some(crn) = &credentials.service_crn {
            info!("logging in through IBM Cloud IAM");
            IbmClient::cloud(key, crn, endpoint, &transport).await?
        } else {
            info!("logging in with a direct token");
            IbmClient::legacy(endpoint.unwrap_or(LEGACY_ENDPOINT), key, &transport)?
        };
        let client = match &credentials.instance {
            Some(instance) => client.with_instance(instance),
            None => client,
        };

        Ok(Self {
            client: Arc::new(client),
            poll_policy: credentials.poll_policy,
        })
    }
}

impl From<&Device> for DeviceInfo {
    fn from(device: &Device) -> Self {
        DeviceInfo {
            name: device.name.clone(),
            num_qubits: device.num_qubits,
            simulator: device.simulator,
            operational: device.operational,
            pending_jobs: device.queue,
        }
    }
}

#[async_trait]
impl DeviceProvider for IbmProvider {
    fn name(&self) -> &str {
        "ibm"
    }

    async fn devices(&self) -> HalResult<Vec<DeviceInfo>> {
        let devices = self.client.devices().await?;
        Ok(devices.iter().map(DeviceInfo::from).collect())
    }

    async fn open(&self, device: &DeviceInfo) -> HalResult<Arc<dyn Backend>> {
        let device = self.client.device(&device.name).await?;
        Ok(Arc::new(IbmBackend::new(
            Arc::clone(&self.client),
            device,
            self.poll_policy,
        )))
    }
}
