//! HTTP-specific constants for the Business API.

/// Path prefix of the secured business service, appended to the base URL.
pub const SECURED_SERVICE_PATH: &str = "/paga-webservices/business-rest/secured";

/// Header carrying the account principal.
pub const PRINCIPAL_HEADER: &str = "principal";

/// Header carrying the account secret.
pub const CREDENTIALS_HEADER: &str = "credentials";

/// Header carrying the request signature.
pub const HASH_HEADER: &str = "hash";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
