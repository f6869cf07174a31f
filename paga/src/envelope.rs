//! Signed request envelope construction.
//!
//! A [`SignedEnvelope`] is the complete, ready-to-send form of one Business
//! API call: the authentication headers (including the request signature)
//! and the JSON body. Envelopes are built, dispatched once, and discarded;
//! the builder itself performs no network I/O.

use serde::Serialize;
use serde_json::Value;

use crate::credentials::Credentials;
use crate::error::BuildError;
use crate::operation::{Operation, SignaturePart};
use crate::signature::compute_signature;

/// Default locale sent when the caller does not set one.
pub const DEFAULT_LOCALE: &str = "en";

/// Operation-specific request parameters.
///
/// Empty strings are valid values and are transmitted as empty strings,
/// never omitted — the provider's hash verification is field-presence
/// sensitive for some operations.
///
/// Whether `accountBalance` wants `source_of_funds` empty, `"PAGA"`, or a
/// mirror of the principal is not pinned down by provider documentation, so
/// it stays caller-settable rather than hard-coded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationFields {
    /// The `accountPrincipal` body field.
    pub account_principal: String,
    /// The `accountCredentials` body field.
    pub account_credentials: String,
    /// The `sourceOfFunds` body field (balance inquiries only).
    pub source_of_funds: String,
    /// The `locale` body field; defaults to `"en"`.
    pub locale: String,
}

impl Default for OperationFields {
    fn default() -> Self {
        Self {
            account_principal: String::new(),
            account_credentials: String::new(),
            source_of_funds: String::new(),
            locale: DEFAULT_LOCALE.to_owned(),
        }
    }
}

impl OperationFields {
    /// Creates fields with all values empty and the default locale.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account principal.
    #[must_use]
    pub fn with_account_principal(mut self, value: impl Into<String>) -> Self {
        self.account_principal = value.into();
        self
    }

    /// Sets the account credentials.
    #[must_use]
    pub fn with_account_credentials(mut self, value: impl Into<String>) -> Self {
        self.account_credentials = value.into();
        self
    }

    /// Sets the source of funds.
    #[must_use]
    pub fn with_source_of_funds(mut self, value: impl Into<String>) -> Self {
        self.source_of_funds = value.into();
        self
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, value: impl Into<String>) -> Self {
        self.locale = value.into();
        self
    }
}

/// Authentication headers attached to every request.
///
/// The transport adds `Content-Type: application/json` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeHeaders {
    /// The `principal` header value.
    pub principal: String,
    /// The `credentials` header value.
    pub credentials: String,
    /// The `hash` header value: the request signature.
    pub hash: String,
}

/// A fully built, authenticated request ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    /// The target operation.
    pub operation: Operation,
    /// Authentication headers.
    pub headers: EnvelopeHeaders,
    /// JSON request body mirroring the operation's field table.
    pub body: Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceBody<'a> {
    reference_number: &'a str,
    account_principal: &'a str,
    source_of_funds: &'a str,
    account_credentials: &'a str,
    locale: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FundingSourcesBody<'a> {
    reference_number: &'a str,
    account_principal: &'a str,
    account_credentials: &'a str,
    locale: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BanksBody<'a> {
    reference_number: &'a str,
    locale: &'a str,
}

impl SignedEnvelope {
    /// Builds an envelope from an operation name as it appears on the wire.
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::InvalidOperation`] for an unknown name —
    /// checked before any signature computation — or with
    /// [`BuildError::MissingCredential`] if a credential value is empty.
    pub fn build(
        operation_name: &str,
        credentials: &Credentials,
        reference_number: &str,
        fields: &OperationFields,
    ) -> Result<Self, BuildError> {
        let operation: Operation = operation_name.parse()?;
        Self::build_for(operation, credentials, reference_number, fields)
    }

    /// Builds an envelope for an already-resolved operation.
    ///
    /// The signature is computed over the transmitted body values in the
    /// order given by [`Operation::signature_parts`].
    ///
    /// # Errors
    ///
    /// Fails with [`BuildError::MissingCredential`] if any of the base URL,
    /// principal, credentials, or hash key is empty.
    pub fn build_for(
        operation: Operation,
        credentials: &Credentials,
        reference_number: &str,
        fields: &OperationFields,
    ) -> Result<Self, BuildError> {
        ensure_complete(credentials)?;

        let parts: Vec<&str> = operation
            .signature_parts()
            .iter()
            .map(|part| match part {
                SignaturePart::ReferenceNumber => reference_number,
                SignaturePart::AccountPrincipal => fields.account_principal.as_str(),
                SignaturePart::AccountCredentials => fields.account_credentials.as_str(),
            })
            .collect();
        let hash = compute_signature(credentials.hash_key(), &parts);

        let body = match operation {
            Operation::AccountBalance => to_body(&BalanceBody {
                reference_number,
                account_principal: &fields.account_principal,
                source_of_funds: &fields.source_of_funds,
                account_credentials: &fields.account_credentials,
                locale: &fields.locale,
            }),
            Operation::GetFundingSources => to_body(&FundingSourcesBody {
                reference_number,
                account_principal: &fields.account_principal,
                account_credentials: &fields.account_credentials,
                locale: &fields.locale,
            }),
            Operation::GetBanks => to_body(&BanksBody {
                reference_number,
                locale: &fields.locale,
            }),
        };

        Ok(Self {
            operation,
            headers: EnvelopeHeaders {
                principal: credentials.principal().to_owned(),
                credentials: credentials.credentials().to_owned(),
                hash,
            },
            body,
        })
    }
}

/// Serializes a body struct; infallible for these string-only structs.
fn to_body<T: Serialize>(body: &T) -> Value {
    serde_json::to_value(body).unwrap_or(Value::Null)
}

fn ensure_complete(credentials: &Credentials) -> Result<(), BuildError> {
    let checks = [
        ("baseUrl", credentials.base_url()),
        ("principal", credentials.principal()),
        ("credentials", credentials.credentials()),
        ("hashKey", credentials.hash_key()),
    ];
    for (name, value) in checks {
        if value.is_empty() {
            return Err(BuildError::MissingCredential(name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::signature_preimage;

    fn fixture_credentials() -> Credentials {
        Credentials::new("https://beta.mypaga.com", "org-principal", "org-secret", "k")
    }

    fn body_keys(envelope: &SignedEnvelope) -> Vec<String> {
        envelope
            .body
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn balance_body_has_all_fields_in_order() {
        let envelope = SignedEnvelope::build_for(
            Operation::AccountBalance,
            &fixture_credentials(),
            "r1",
            &OperationFields::new(),
        )
        .unwrap();

        assert_eq!(
            body_keys(&envelope),
            [
                "referenceNumber",
                "accountPrincipal",
                "sourceOfFunds",
                "accountCredentials",
                "locale",
            ]
        );
        assert_eq!(envelope.body["accountPrincipal"], "");
        assert_eq!(envelope.body["locale"], "en");
    }

    #[test]
    fn funding_sources_body_omits_source_of_funds() {
        let envelope = SignedEnvelope::build_for(
            Operation::GetFundingSources,
            &fixture_credentials(),
            "r1",
            &OperationFields::new(),
        )
        .unwrap();

        assert_eq!(
            body_keys(&envelope),
            [
                "referenceNumber",
                "accountPrincipal",
                "accountCredentials",
                "locale",
            ]
        );
    }

    #[test]
    fn banks_body_is_reference_and_locale_only() {
        let envelope = SignedEnvelope::build_for(
            Operation::GetBanks,
            &fixture_credentials(),
            "r1",
            &OperationFields::new(),
        )
        .unwrap();

        assert_eq!(body_keys(&envelope), ["referenceNumber", "locale"]);
        assert_eq!(envelope.body["referenceNumber"], "r1");
    }

    #[test]
    fn funding_sources_signature_uses_transmitted_values() {
        let fields = OperationFields::new()
            .with_account_principal("p")
            .with_account_credentials("c");
        let envelope = SignedEnvelope::build_for(
            Operation::GetFundingSources,
            &fixture_credentials(),
            "r1",
            &fields,
        )
        .unwrap();

        // Preimage is exactly referenceNumber + accountPrincipal +
        // accountCredentials + hashKey.
        assert_eq!(signature_preimage("k", &["r1", "p", "c"]), "r1pck");
        assert_eq!(envelope.headers.hash, compute_signature("k", &["r1", "p", "c"]));
    }

    #[test]
    fn balance_signature_covers_reference_number_only() {
        let fields = OperationFields::new().with_account_principal("ignored-by-hash");
        let envelope = SignedEnvelope::build_for(
            Operation::AccountBalance,
            &fixture_credentials(),
            "r1",
            &fields,
        )
        .unwrap();
        assert_eq!(envelope.headers.hash, compute_signature("k", &["r1"]));
    }

    #[test]
    fn envelope_is_deterministic_for_fixed_inputs() {
        let fields = OperationFields::new().with_account_principal("p");
        let build = || {
            SignedEnvelope::build_for(
                Operation::AccountBalance,
                &fixture_credentials(),
                "r1",
                &fields,
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn unknown_operation_name_fails_before_hashing() {
        let err = SignedEnvelope::build(
            "transferFunds",
            &fixture_credentials(),
            "r1",
            &OperationFields::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::InvalidOperation(name) if name == "transferFunds"));
    }

    #[test]
    fn empty_hash_key_is_rejected() {
        let creds = Credentials::new("https://beta.mypaga.com", "p", "c", "");
        let err = SignedEnvelope::build_for(
            Operation::GetBanks,
            &creds,
            "r1",
            &OperationFields::new(),
        )
        .unwrap_err();
        assert!(matches!(err, BuildError::MissingCredential("hashKey")));
    }

    #[test]
    fn headers_carry_principal_and_signature() {
        let envelope = SignedEnvelope::build_for(
            Operation::GetBanks,
            &fixture_credentials(),
            "r1",
            &OperationFields::new(),
        )
        .unwrap();
        assert_eq!(envelope.headers.principal, "org-principal");
        assert_eq!(envelope.headers.credentials, "org-secret");
        assert_eq!(envelope.headers.hash.len(), 128);
    }
}
