//! Failures talking to IBM Quantum.

use qlab_hal::HalError;
use qlab_qasm3::EmitError;
use thiserror::Error;

pub type IbmResult<T> = Result<T, IbmError>;

#[derive(Debug, Error)]
pub enum IbmError {
    #[error(
        "no IBM Quantum key: set `ibm.key` in the config file or export QLAB_IBM_TOKEN"
    )]
    MissingToken,

    /// A credential or CRN that cannot be sent as an HTTP header.
    #[error("{0} contains characters not allowed in an HTTP header")]
    BadHeader(&'static str),

    #[error("IAM key exchange failed: {0}")]
    Iam(String),

    #[error("proxy {url} rejected: {reason}")]
    Proxy { url: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with whatever message the service sent.
    #[error("IBM Quantum answered {status}: {message}")]
    Api { status: u16, message: String },

    #[error("no such job: {0}")]
    NoSuchJob(String),

    #[error("no such device: {0}")]
    NoSuchDevice(String),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<IbmError> for HalError {
    fn from(err: IbmError) -> Self {
        match err {
            IbmError::MissingToken | IbmError::BadHeader(_) | IbmError::Iam(_) => {
                HalError::Authentication(err.to_string())
            }
            IbmError::Api { status: 401 | 403, .. } => HalError::Authentication(err.to_string()),
            IbmError::Proxy { .. } => HalError::Configuration(err.to_string()),
            IbmError::Http(inner) => HalError::Network(inner),
            IbmError::NoSuchJob(id) => HalError::UnknownJob(id),
            IbmError::NoSuchDevice(name) => HalError::Unavailable(name),
            IbmError::Emit(inner) => HalError::InvalidCircuit(inner.to_string()),
            IbmError::Api { .. } | IbmError::Decode(_) => HalError::Remote(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_says_where_to_put_it() {
        let text = IbmError::MissingToken.to_string();
        assert!(text.contains("ibm.key"));
        assert!(text.contains("QLAB_IBM_TOKEN"));
    }

    #[test]
    fn test_credential_problems_are_authentication() {
        for err in [
            IbmError::MissingToken,
            IbmError::BadHeader("token"),
            IbmError::Iam("403".into()),
            IbmError::Api {
                status: 401,
                message: "expired".into(),
            },
        ] {
            assert!(matches!(HalError::from(err), HalError::Authentication(_)));
        }
    }

    #[test]
    fn test_lookups_keep_their_subject() {
        assert!(matches!(
            HalError::from(IbmError::NoSuchJob("job-7".into())),
            HalError::UnknownJob(id) if id == "job-7"
        ));
        assert!(matches!(
            HalError::from(IbmError::NoSuchDevice("ibm_nowhere".into())),
            HalError::Unavailable(name) if name == "ibm_nowhere"
        ));
    }

    #[test]
    fn test_proxy_is_configuration() {
        let err = IbmError::Proxy {
            url: "::".into(),
            reason: "relative URL".into(),
        };
        assert!(matches!(HalError::from(err), HalError::Configuration(_)));
    }

    #[test]
    fn test_other_answers_are_remote() {
        let err = IbmError::Api {
            status: 500,
            message: "boom".into(),
        };
        match HalError::from(err) {
            HalError::Remote(msg) => assert_eq!(msg, "IBM Quantum answered 500: boom"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
