// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the config-center client.
//!
//! Every error produced by this crate is a [`NacosError`]: a code from the closed
//! [`ErrorCode`] taxonomy, a human readable message and an optional cause. Callers
//! branch on the code (or on the `is_*_error` predicates), never on message text.

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Shared, type-erased underlying error.
///
/// Causes are reference counted so that a [`NacosError`] can be cloned and replayed
/// to every caller that observes a memoized failure.
pub type Cause = Arc<dyn StdError + Send + Sync>;

/// The closed set of error codes.
///
/// Codes fall into four families: configuration, client, network and operation.
/// `Unknown` is only used when wrapping a foreign error that carries no code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A configuration file or entry does not exist.
    ConfigNotFound,
    /// A configuration value violates a constraint.
    ConfigInvalid,
    /// A configuration file could not be read or parsed.
    ConfigLoadFailed,
    /// A loaded configuration failed validation during client initialization.
    ConfigValidateFailed,
    /// No client (or no remote capability) is available.
    ClientNotInit,
    /// Constructing the remote capability failed.
    ClientInitFailed,
    /// The client lost or could not establish its connection.
    ClientConnection,
    /// A network operation timed out.
    NetworkTimeout,
    /// The server could not be reached.
    NetworkUnreachable,
    /// The server answered but is not serving requests.
    ServerUnavailable,
    /// A remote operation failed.
    OperationFailed,
    /// Publishing a configuration entry failed or was not applied.
    PublishFailed,
    /// Deleting a configuration entry failed or was not applied.
    DeleteFailed,
    /// Registering a change listener failed.
    ListenFailed,
    /// A wrapped error that did not carry a code of its own.
    Unknown,
}

impl ErrorCode {
    /// Returns the stable, upper snake case identifier of this code.
    ///
    /// # Examples
    ///
    /// ```
    /// use nacoscfg::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ClientNotInit.as_str(), "CLIENT_NOT_INIT");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigNotFound => "CONFIG_NOT_FOUND",
            ErrorCode::ConfigInvalid => "CONFIG_INVALID",
            ErrorCode::ConfigLoadFailed => "CONFIG_LOAD_FAILED",
            ErrorCode::ConfigValidateFailed => "CONFIG_VALIDATE_FAILED",
            ErrorCode::ClientNotInit => "CLIENT_NOT_INIT",
            ErrorCode::ClientInitFailed => "CLIENT_INIT_FAILED",
            ErrorCode::ClientConnection => "CLIENT_CONNECTION",
            ErrorCode::NetworkTimeout => "NETWORK_TIMEOUT",
            ErrorCode::NetworkUnreachable => "NETWORK_UNREACHABLE",
            ErrorCode::ServerUnavailable => "SERVER_UNAVAILABLE",
            ErrorCode::OperationFailed => "OPERATION_FAILED",
            ErrorCode::PublishFailed => "PUBLISH_FAILED",
            ErrorCode::DeleteFailed => "DELETE_FAILED",
            ErrorCode::ListenFailed => "LISTEN_FAILED",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }

    /// Returns the message used by [`NacosError::from_code`].
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ConfigNotFound => "configuration not found",
            ErrorCode::ConfigInvalid => "configuration invalid",
            ErrorCode::ConfigLoadFailed => "failed to load configuration",
            ErrorCode::ConfigValidateFailed => "configuration validation failed",
            ErrorCode::ClientNotInit => "client not initialized",
            ErrorCode::ClientInitFailed => "client initialization failed",
            ErrorCode::ClientConnection => "client connection failed",
            ErrorCode::NetworkTimeout => "network timeout",
            ErrorCode::NetworkUnreachable => "network unreachable",
            ErrorCode::ServerUnavailable => "server unavailable",
            ErrorCode::OperationFailed => "operation failed",
            ErrorCode::PublishFailed => "failed to publish configuration",
            ErrorCode::DeleteFailed => "failed to delete configuration",
            ErrorCode::ListenFailed => "failed to listen for configuration changes",
            ErrorCode::Unknown => "unknown error",
        }
    }

    /// Returns `true` for the configuration family.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ErrorCode::ConfigNotFound
                | ErrorCode::ConfigInvalid
                | ErrorCode::ConfigLoadFailed
                | ErrorCode::ConfigValidateFailed
        )
    }

    /// Returns `true` for the client family.
    pub fn is_client(&self) -> bool {
        matches!(
            self,
            ErrorCode::ClientNotInit | ErrorCode::ClientInitFailed | ErrorCode::ClientConnection
        )
    }

    /// Returns `true` for the network family.
    ///
    /// A broken client connection is a network condition as well, so
    /// `ClientConnection` is both a client and a network code.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ErrorCode::NetworkTimeout
                | ErrorCode::NetworkUnreachable
                | ErrorCode::ServerUnavailable
                | ErrorCode::ClientConnection
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error type of every fallible operation in this crate.
///
/// Rendered as `[CODE] message` or `[CODE] message: cause`.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::{ErrorCode, NacosError};
///
/// let err = NacosError::new(ErrorCode::ConfigInvalid, "port must be in 1..=65535");
/// assert_eq!(err.to_string(), "[CONFIG_INVALID] port must be in 1..=65535");
///
/// let wrapped = err.wrap("validation failed");
/// assert_eq!(wrapped.code(), ErrorCode::ConfigInvalid);
/// assert_eq!(
///     wrapped.to_string(),
///     "[CONFIG_INVALID] validation failed: [CONFIG_INVALID] port must be in 1..=65535"
/// );
/// ```
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}{}", cause_suffix(.cause))]
pub struct NacosError {
    code: ErrorCode,
    message: String,
    #[source]
    cause: Option<Cause>,
}

fn cause_suffix(cause: &Option<Cause>) -> String {
    match cause {
        Some(cause) => format!(": {}", cause),
        None => String::new(),
    }
}

impl NacosError {
    /// Creates an error without a cause.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error that chains an underlying cause.
    pub fn with_cause<E>(code: ErrorCode, message: impl Into<String>, cause: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self {
            code,
            message: message.into(),
            cause: Some(Arc::from(cause.into())),
        }
    }

    /// Creates an error carrying the default message of `code`.
    ///
    /// This is the equivalent of a predefined sentinel error.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Wraps this error, keeping its code and replacing the message.
    ///
    /// The original error becomes the cause of the returned one.
    pub fn wrap(self, message: impl Into<String>) -> Self {
        let code = self.code;
        let cause: Cause = Arc::new(self);
        Self {
            code,
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Returns the message, without code or cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the chained cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns `true` if the code belongs to the configuration family.
    pub fn is_config_error(&self) -> bool {
        self.code.is_config()
    }

    /// Returns `true` if the code belongs to the client family.
    pub fn is_client_error(&self) -> bool {
        self.code.is_client()
    }

    /// Returns `true` if the code belongs to the network family.
    pub fn is_network_error(&self) -> bool {
        self.code.is_network()
    }
}

/// Wraps any error under a new message.
///
/// A [`NacosError`] keeps its code; any other error is tagged
/// [`ErrorCode::Unknown`]. The original error is the cause of the result.
///
/// # Examples
///
/// ```
/// use nacoscfg::domain::{wrap_error, ErrorCode, NacosError};
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
/// assert_eq!(wrap_error(io, "reading cache").code(), ErrorCode::Unknown);
///
/// let err = NacosError::from_code(ErrorCode::PublishFailed);
/// assert_eq!(wrap_error(err, "retry later").code(), ErrorCode::PublishFailed);
/// ```
pub fn wrap_error<E>(err: E, message: impl Into<String>) -> NacosError
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    match err.into().downcast::<NacosError>() {
        Ok(nacos) => nacos.wrap(message),
        Err(other) => NacosError::with_cause(ErrorCode::Unknown, message, other),
    }
}

/// Returns `true` if `err` is a [`NacosError`] of the configuration family.
pub fn is_config_error(err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<NacosError>()
        .is_some_and(NacosError::is_config_error)
}

/// Returns `true` if `err` is a [`NacosError`] of the client family.
pub fn is_client_error(err: &(dyn StdError + 'static)) -> bool {
    err.downcast_ref::<NacosError>()
        .is_some_and(NacosError::is_client_error)
}

/// Returns `true` if `err` describes a network condition.
///
/// Besides network-family [`NacosError`]s this recognises I/O errors whose kind
/// indicates a timeout or a refused, reset or dropped connection.
pub fn is_network_error(err: &(dyn StdError + 'static)) -> bool {
    if let Some(nacos) = err.downcast_ref::<NacosError>() {
        return nacos.is_network_error();
    }
    if let Some(io) = err.downcast_ref::<io::Error>() {
        return matches!(
            io.kind(),
            io::ErrorKind::TimedOut
                | io::ErrorKind::ConnectionRefused
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::NotConnected
        );
    }
    false
}

/// A specialized Result type for config-center operations.
pub type Result<T> = std::result::Result<T, NacosError>;
