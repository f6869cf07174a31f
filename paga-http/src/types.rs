//! Typed response bodies for the Business API.
//!
//! Every response carries at least `responseCode` (`0` means success) and a
//! provider-supplied `message`. Operation-specific fields are optional on
//! the wire; the provider omits them on failure responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response to an `accountBalance` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// Provider response code; `0` on success.
    pub response_code: i64,

    /// Provider-supplied message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Total balance on the account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_balance: Option<f64>,

    /// Balance available for spending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_balance: Option<f64>,

    /// ISO currency code (e.g. `"NGN"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// UTC timestamp the balance was computed at.
    #[serde(
        default,
        rename = "balanceDateTimeUTC",
        skip_serializing_if = "Option::is_none"
    )]
    pub balance_date_time_utc: Option<String>,
}

/// Response to a `getFundingSources` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingSourcesResponse {
    /// Provider response code; `0` on success.
    pub response_code: i64,

    /// Provider-supplied message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Funding sources available to the account. Shape is provider-defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Value>,
}

/// Response to a `getBanks` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankListResponse {
    /// Provider response code; `0` on success.
    pub response_code: i64,

    /// Provider-supplied message text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Known banks.
    #[serde(default)]
    pub banks: Vec<Bank>,
}

/// A bank entry in a [`BankListResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    /// Display name of the bank.
    pub name: String,
    /// Provider-assigned identifier used in subsequent calls.
    pub uuid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn balance_response_round_trips_wire_names() {
        let payload = json!({
            "responseCode": 0,
            "message": "success",
            "totalBalance": 100.0,
            "availableBalance": 95.5,
            "currency": "NGN",
            "balanceDateTimeUTC": "2024-01-01T00:00:00Z",
        });
        let response: BalanceResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.response_code, 0);
        assert_eq!(response.total_balance, Some(100.0));
        assert_eq!(response.balance_date_time_utc.as_deref(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn failure_response_parses_without_balance_fields() {
        let payload = json!({"responseCode": 13, "message": "account not linked"});
        let response: BalanceResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.response_code, 13);
        assert!(response.total_balance.is_none());
    }

    #[test]
    fn bank_list_parses_entries() {
        let payload = json!({
            "responseCode": 0,
            "banks": [{"name": "First Bank", "uuid": "a1b2"}],
        });
        let response: BankListResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(response.banks.len(), 1);
        assert_eq!(response.banks[0].uuid, "a1b2");
    }
}
