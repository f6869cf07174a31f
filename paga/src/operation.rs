//! Business API operations and their signature recipes.
//!
//! The provider authenticates each request with a SHA-512 digest over an
//! operation-specific concatenation of transmitted field values. The
//! concatenation order is the single most failure-prone contract in the API:
//! a wrong order or an omitted field produces a rejected request with no
//! indication of why. [`Operation::signature_parts`] is the one place that
//! order is defined.

use std::fmt;
use std::str::FromStr;

use crate::error::BuildError;

/// A field referenced by a signature recipe.
///
/// Parts are resolved against the *transmitted* values of the request body,
/// never against caller-internal aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePart {
    /// The caller-generated unique reference number.
    ReferenceNumber,
    /// The `accountPrincipal` body field.
    AccountPrincipal,
    /// The `accountCredentials` body field.
    AccountCredentials,
}

/// A Business API operation exposed by this SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Account balance inquiry (`accountBalance`).
    AccountBalance,
    /// Funding source listing (`getFundingSources`).
    GetFundingSources,
    /// Bank listing (`getBanks`).
    GetBanks,
}

impl Operation {
    /// All known operations.
    pub const ALL: [Self; 3] = [
        Self::AccountBalance,
        Self::GetFundingSources,
        Self::GetBanks,
    ];

    /// The operation name as it appears on the wire and in the endpoint path.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::AccountBalance => "accountBalance",
            Self::GetFundingSources => "getFundingSources",
            Self::GetBanks => "getBanks",
        }
    }

    /// The path segment appended to the secured service root.
    #[must_use]
    pub const fn path(self) -> &'static str {
        self.wire_name()
    }

    /// Default reference-number prefix for this operation.
    #[must_use]
    pub const fn reference_prefix(self) -> &'static str {
        match self {
            Self::AccountBalance => "balance",
            Self::GetFundingSources => "funding-sources",
            Self::GetBanks => "banks",
        }
    }

    /// The ordered signature recipe for this operation.
    ///
    /// The returned parts are concatenated in order, the shared hash key is
    /// appended, and the whole string is hashed with SHA-512.
    #[must_use]
    pub const fn signature_parts(self) -> &'static [SignaturePart] {
        match self {
            Self::AccountBalance | Self::GetBanks => &[SignaturePart::ReferenceNumber],
            Self::GetFundingSources => &[
                SignaturePart::ReferenceNumber,
                SignaturePart::AccountPrincipal,
                SignaturePart::AccountCredentials,
            ],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Operation {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.wire_name() == s)
            .ok_or_else(|| BuildError::InvalidOperation(s.to_owned()))
    }
}
