//! Async HTTP client for the Business API.
//!
//! Provides [`BusinessClient`], which dispatches signed envelopes built by
//! the `paga` core crate and interprets the provider's responses. Requests
//! are issued sequentially and independently; each call generates its own
//! fresh reference number.

use std::time::Duration;

use paga::credentials::Credentials;
use paga::envelope::{OperationFields, SignedEnvelope};
use paga::operation::Operation;
use paga::signature::new_reference_number;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::Value;

use crate::constants::{
    CREDENTIALS_HEADER, DEFAULT_TIMEOUT_SECS, HASH_HEADER, PRINCIPAL_HEADER, SECURED_SERVICE_PATH,
};
use crate::error::{ClientError, ProtocolError};
use crate::types::{BalanceResponse, BankListResponse, FundingSourcesResponse};

/// Configuration for [`BusinessClient`].
pub struct ClientConfig {
    /// HTTP request timeout.
    pub timeout: Duration,

    /// Optional pre-configured reqwest client. If `None`, a new client is
    /// created with the configured timeout.
    pub http_client: Option<reqwest::Client>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            http_client: None,
        }
    }
}

impl ClientConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a pre-configured reqwest client.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("timeout", &self.timeout)
            .field("has_http_client", &self.http_client.is_some())
            .finish()
    }
}

/// Async client for the secured Business API.
///
/// Holds one immutable credential set; construct one client per credential
/// set. The client never retries: transport failures may be retried by the
/// caller, business failures require changed inputs and a fresh reference
/// number.
///
/// # Example
///
/// ```no_run
/// use paga::credentials::Credentials;
/// use paga::envelope::OperationFields;
/// use paga_http::client::BusinessClient;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BusinessClient::new(Credentials::from_env()?);
/// let balance = client.account_balance(&OperationFields::new()).await?;
/// println!("total: {:?}", balance.total_balance);
/// # Ok(())
/// # }
/// ```
pub struct BusinessClient {
    credentials: Credentials,
    client: reqwest::Client,
}

impl BusinessClient {
    /// Creates a client with the default configuration.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    #[must_use]
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Self {
        let client = config.http_client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(config.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()
                .expect("failed to build reqwest::Client")
        });
        Self {
            credentials,
            client,
        }
    }

    /// Returns the credential set this client dispatches with.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Runs an account balance inquiry.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute) for the failure modes.
    pub async fn account_balance(
        &self,
        fields: &OperationFields,
    ) -> Result<BalanceResponse, ClientError> {
        let payload = self.execute(Operation::AccountBalance, fields).await?;
        decode(payload)
    }

    /// Lists the funding sources available to the account.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute) for the failure modes.
    pub async fn funding_sources(
        &self,
        fields: &OperationFields,
    ) -> Result<FundingSourcesResponse, ClientError> {
        let payload = self.execute(Operation::GetFundingSources, fields).await?;
        decode(payload)
    }

    /// Lists the banks known to the provider.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute) for the failure modes.
    pub async fn banks(&self, fields: &OperationFields) -> Result<BankListResponse, ClientError> {
        let payload = self.execute(Operation::GetBanks, fields).await?;
        decode(payload)
    }

    /// Dispatches one operation with a freshly generated reference number
    /// and returns the raw success payload.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Build`] for envelope construction failures
    /// - [`ClientError::Transport`] when no response is received
    /// - [`ClientError::Protocol`] for non-2xx statuses or malformed bodies
    /// - [`ClientError::Business`] for a non-zero `responseCode`, carrying
    ///   the untouched provider payload
    pub async fn execute(
        &self,
        operation: Operation,
        fields: &OperationFields,
    ) -> Result<Value, ClientError> {
        let reference = new_reference_number(operation.reference_prefix());
        self.execute_with_reference(operation, &reference, fields)
            .await
    }

    /// Dispatches one operation with a caller-supplied reference number.
    ///
    /// The reference number must be unique per request; the provider treats
    /// a duplicate as a replayed transaction.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub async fn execute_with_reference(
        &self,
        operation: Operation,
        reference_number: &str,
        fields: &OperationFields,
    ) -> Result<Value, ClientError> {
        let envelope =
            SignedEnvelope::build_for(operation, &self.credentials, reference_number, fields)?;
        self.dispatch(&envelope).await
    }

    async fn dispatch(&self, envelope: &SignedEnvelope) -> Result<Value, ClientError> {
        let url = format!(
            "{}{}/{}",
            self.credentials.base_url(),
            SECURED_SERVICE_PATH,
            envelope.operation.path()
        );

        #[cfg(feature = "telemetry")]
        tracing::debug!(operation = %envelope.operation, %url, "dispatching request");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(PRINCIPAL_HEADER, &envelope.headers.principal)
            .header(CREDENTIALS_HEADER, &envelope.headers.credentials)
            .header(HASH_HEADER, &envelope.headers.hash)
            .json(&envelope.body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProtocolError::new(status.as_u16(), "unexpected HTTP status")
                .with_body(text)
                .into());
        }

        let payload: Value = serde_json::from_str(&text).map_err(|e| {
            ProtocolError::new(status.as_u16(), format!("malformed response body: {e}"))
                .with_body(text.clone())
        })?;

        let Some(code) = payload.get("responseCode").and_then(Value::as_i64) else {
            return Err(
                ProtocolError::new(status.as_u16(), "response missing responseCode")
                    .with_body(text)
                    .into(),
            );
        };

        if code != 0 {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned);
            let mut err = paga::error::BusinessError::new(code).with_payload(payload);
            if let Some(message) = message {
                err = err.with_message(message);
            }
            #[cfg(feature = "telemetry")]
            tracing::warn!(operation = %envelope.operation, code, "business failure");
            return Err(err.into());
        }

        #[cfg(feature = "telemetry")]
        tracing::debug!(operation = %envelope.operation, "request succeeded");

        Ok(payload)
    }
}

impl std::fmt::Debug for BusinessClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessClient")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Decodes a success payload into a typed response.
fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, ClientError> {
    let rendered = payload.to_string();
    serde_json::from_value(payload).map_err(|e| {
        ProtocolError::new(200, format!("unexpected response shape: {e}"))
            .with_body(rendered)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use paga::signature::compute_signature;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn test_client(server: &MockServer) -> BusinessClient {
        let credentials = Credentials::new(server.uri(), "org-principal", "org-secret", "k");
        BusinessClient::new(credentials)
    }

    #[tokio::test]
    async fn balance_success_is_surfaced_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/paga-webservices/business-rest/secured/accountBalance"))
            .and(header(CONTENT_TYPE, "application/json"))
            .and(header(PRINCIPAL_HEADER, "org-principal"))
            .and(header(CREDENTIALS_HEADER, "org-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseCode": 0,
                "message": "success",
                "totalBalance": 100.0,
                "availableBalance": 95.5,
                "currency": "NGN",
                "balanceDateTimeUTC": "2024-01-01T00:00:00Z",
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .account_balance(&OperationFields::new())
            .await
            .unwrap();

        assert_eq!(response.response_code, 0);
        assert_eq!(response.total_balance, Some(100.0));
        assert_eq!(response.currency.as_deref(), Some("NGN"));
    }

    #[tokio::test]
    async fn request_carries_signature_over_reference_number() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/paga-webservices/business-rest/secured/accountBalance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responseCode": 0})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .execute_with_reference(
                Operation::AccountBalance,
                "balance-1700000000000-abc123def",
                &OperationFields::new(),
            )
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let hash = request_header(&requests[0], HASH_HEADER);
        assert_eq!(
            hash,
            compute_signature("k", &["balance-1700000000000-abc123def"])
        );
        assert_eq!(hash.len(), 128);
    }

    #[tokio::test]
    async fn funding_sources_signs_principal_and_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/paga-webservices/business-rest/secured/getFundingSources"))
            .and(body_partial_json(json!({
                "accountPrincipal": "p",
                "accountCredentials": "c",
                "locale": "en",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseCode": 0,
                "sources": ["PAGA"],
            })))
            .mount(&server)
            .await;

        let fields = OperationFields::new()
            .with_account_principal("p")
            .with_account_credentials("c");
        let client = test_client(&server);
        let response = client
            .execute_with_reference(Operation::GetFundingSources, "r1", &fields)
            .await
            .unwrap();
        assert_eq!(response["sources"], json!(["PAGA"]));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            request_header(&requests[0], HASH_HEADER),
            compute_signature("k", &["r1", "p", "c"])
        );
    }

    #[tokio::test]
    async fn banks_decode_typed_entries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/paga-webservices/business-rest/secured/getBanks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseCode": 0,
                "banks": [
                    {"name": "First Bank", "uuid": "a1b2"},
                    {"name": "GTBank", "uuid": "c3d4"},
                ],
            })))
            .mount(&server)
            .await;

        let response = test_client(&server)
            .banks(&OperationFields::new())
            .await
            .unwrap();
        assert_eq!(response.banks.len(), 2);
        assert_eq!(response.banks[1].name, "GTBank");
    }

    #[tokio::test]
    async fn non_zero_response_code_preserves_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responseCode": 13,
                "message": "account not linked",
            })))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .account_balance(&OperationFields::new())
            .await
            .unwrap_err();

        let ClientError::Business(business) = err else {
            panic!("expected business error, got {err}");
        };
        assert_eq!(business.response_code, 13);
        assert_eq!(business.message.as_deref(), Some("account not linked"));
        assert_eq!(business.payload["message"], "account not linked");
    }

    #[tokio::test]
    async fn non_2xx_status_preserves_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized principal"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .banks(&OperationFields::new())
            .await
            .unwrap_err();

        let ClientError::Protocol(protocol) = err else {
            panic!("expected protocol error, got {err}");
        };
        assert_eq!(protocol.status, 401);
        assert_eq!(protocol.body, "unauthorized principal");
    }

    #[tokio::test]
    async fn malformed_body_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .banks(&OperationFields::new())
            .await
            .unwrap_err();

        let ClientError::Protocol(protocol) = err else {
            panic!("expected protocol error, got {err}");
        };
        assert_eq!(protocol.body, "<html>gateway</html>");
    }

    #[tokio::test]
    async fn body_without_response_code_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .banks(&OperationFields::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }

    #[tokio::test]
    async fn each_execute_generates_a_fresh_reference_number() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"responseCode": 0})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        client.banks(&OperationFields::new()).await.unwrap();
        client.banks(&OperationFields::new()).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let reference = |req: &Request| -> String {
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            body["referenceNumber"].as_str().unwrap().to_owned()
        };
        assert_ne!(reference(&requests[0]), reference(&requests[1]));
        assert!(reference(&requests[0]).starts_with("banks-"));
    }

    fn request_header(request: &Request, name: &str) -> String {
        request
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    }
}
