//! Account credentials and environment loading.
//!
//! Credentials are loaded once and are immutable for the process lifetime.
//! They must come from external configuration only — never embed them in
//! code or version control.
//!
//! # Environment Variables
//!
//! - `PAGA_BASE_URL` — API endpoint root (e.g. `https://beta.mypaga.com`)
//! - `PAGA_PRINCIPAL` — business account identifier, sent as a header
//! - `PAGA_CREDENTIALS` — account secret, sent as a header
//! - `PAGA_HASH_KEY` — shared signing secret, never transmitted

use std::fmt;

use crate::error::ConfigError;

/// Environment variable holding the API endpoint root.
pub const ENV_BASE_URL: &str = "PAGA_BASE_URL";
/// Environment variable holding the account principal.
pub const ENV_PRINCIPAL: &str = "PAGA_PRINCIPAL";
/// Environment variable holding the account secret.
pub const ENV_CREDENTIALS: &str = "PAGA_CREDENTIALS";
/// Environment variable holding the shared signing secret.
pub const ENV_HASH_KEY: &str = "PAGA_HASH_KEY";

const REQUIRED_ENV_VARS: [&str; 4] = [ENV_BASE_URL, ENV_PRINCIPAL, ENV_CREDENTIALS, ENV_HASH_KEY];

/// Which provider environment a base URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production host — real money transactions.
    Live,
    /// Test host — safe for experimentation.
    Sandbox,
    /// Host not recognised as either.
    Unknown,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Live => "LIVE",
            Self::Sandbox => "SANDBOX",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Immutable account credentials for the Business API.
///
/// Construct one per credential set and pass it to the builder and
/// transport client; multiple sets can coexist in a process, and tests can
/// use fixture values without touching the environment.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    principal: String,
    credentials: String,
    hash_key: String,
}

impl Credentials {
    /// Creates credentials from explicit values.
    ///
    /// Values are not validated here; an empty value surfaces as a
    /// `MissingCredential` build error when an envelope is built from it.
    pub fn new(
        base_url: impl Into<String>,
        principal: impl Into<String>,
        credentials: impl Into<String>,
        hash_key: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            principal: principal.into(),
            credentials: credentials.into(),
            hash_key: hash_key.into(),
        }
    }

    /// Loads credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Fails fast with [`ConfigError::MissingEnv`] listing exactly which of
    /// the four required variables are unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::MissingEnv`] listing every variable the
    /// lookup returned nothing for.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing: Vec<String> = REQUIRED_ENV_VARS
            .into_iter()
            .filter(|&name| lookup(name).is_none_or(|v| v.is_empty()))
            .map(str::to_owned)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingEnv(missing));
        }

        let get = |name: &str| lookup(name).unwrap_or_default();
        Ok(Self::new(
            get(ENV_BASE_URL),
            get(ENV_PRINCIPAL),
            get(ENV_CREDENTIALS),
            get(ENV_HASH_KEY),
        ))
    }

    /// The API endpoint root, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The account principal sent as the `principal` header.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// The account secret sent as the `credentials` header.
    #[must_use]
    pub fn credentials(&self) -> &str {
        &self.credentials
    }

    /// The shared signing secret. Used only to compute signatures;
    /// never transmitted.
    #[must_use]
    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    /// Classifies the provider environment from the base URL host.
    #[must_use]
    pub fn environment(&self) -> Environment {
        if self.base_url.contains("www.mypaga.com") {
            Environment::Live
        } else if self.base_url.contains("beta.mypaga.com")
            || self.base_url.contains("qa1.mypaga.com")
        {
            Environment::Sandbox
        } else {
            Environment::Unknown
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("principal", &self.principal)
            .field("credentials", &"***")
            .field("hash_key", &"***")
            .finish()
    }
}
