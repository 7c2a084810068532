use thiserror::Error;

/// Errors raised by the on-disk key-value store backing session and
/// preference state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Outcome of a failed API call, tagged by failure class.
///
/// `Display` yields the exact string the UI shows; `status` and `detail`
/// stay internal so screens never leak transport specifics.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport never produced a usable response: unreachable host, DNS
    /// failure, timeout, or a success body that could not be decoded.
    #[error("Erro de conexão com o servidor")]
    Connection { detail: String },

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn connection(detail: impl Into<String>) -> Self {
        ApiError::Connection {
            detail: detail.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ApiError::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of an `Api` failure; `None` for connection-class ones.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Connection { .. } => None,
            ApiError::Api { status, .. } => Some(*status),
        }
    }
}

/// Errors raised by the authentication lifecycle.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The login endpoint answered with success but no usable token.
    #[error("Erro ao fazer login")]
    MissingToken,

    /// The register endpoint answered with success but an empty body.
    #[error("Erro ao criar conta")]
    MissingProfile,
}
