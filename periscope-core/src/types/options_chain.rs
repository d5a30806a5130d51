use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::Greeks;

/// Options chain snapshot for one underlying, as returned by
/// `GET {base_url}/snapshot/options/{underlying}`.
///
/// The decoded document is kept exactly as received (key order, `null`
/// values and fields this crate does not know about) and is what the
/// response serializes back to. The contracts in `results` are also read
/// into a lenient typed view for rendering: a value of an unexpected type
/// never fails the response, it is shown as received or treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotResponse {
    document: Map<String, Value>,
    results: Vec<OptionContract>,
}

impl SnapshotResponse {
    pub fn from_document(document: Map<String, Value>) -> Self {
        let results = match document.get("results") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| OptionContract::deserialize(item).unwrap_or_default())
                .collect(),
            // Missing, null or not a list: an empty chain
            _ => Vec::new(),
        };

        Self { document, results }
    }

    /// The document as decoded
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn status(&self) -> Option<&Value> {
        self.field("status")
    }

    pub fn request_id(&self) -> Option<&Value> {
        self.field("request_id")
    }

    /// Cursor for the next page, when the upstream paginates
    pub fn next_url(&self) -> Option<&str> {
        self.field("next_url").and_then(Value::as_str)
    }

    pub fn results(&self) -> &[OptionContract] {
        &self.results
    }

    pub fn contract_count(&self) -> usize {
        self.results.len()
    }

    fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key).filter(|value| !value.is_null())
    }
}

impl From<Map<String, Value>> for SnapshotResponse {
    fn from(document: Map<String, Value>) -> Self {
        Self::from_document(document)
    }
}

impl Serialize for SnapshotResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SnapshotResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_document)
    }
}

/// One option contract in the chain
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionContract {
    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub details: Option<ContractDetails>,
    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub greeks: Option<Greeks>,
    #[serde(default)]
    pub implied_volatility: Option<Value>,
    #[serde(default)]
    pub open_interest: Option<Value>,
    /// Only set when the upstream sent a non-empty mapping
    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub last_quote: Option<LastQuote>,
    /// Only set when the upstream sent a non-empty mapping
    #[serde(default, deserialize_with = "non_empty_mapping")]
    pub last_trade: Option<LastTrade>,
}

/// Static terms of the contract
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContractDetails {
    #[serde(default)]
    pub ticker: Option<Value>,
    #[serde(default)]
    pub contract_type: Option<Value>,
    #[serde(default)]
    pub strike_price: Option<Value>,
    /// ISO date, `YYYY-MM-DD`
    #[serde(default)]
    pub expiration_date: Option<Value>,
    #[serde(default)]
    pub exercise_style: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LastQuote {
    #[serde(default)]
    pub bid: Option<Value>,
    #[serde(default)]
    pub ask: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LastTrade {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub size: Option<Value>,
}

/// A sub-mapping counts as present only when it is a JSON object with at
/// least one key; anything else (`{}`, `null`, a scalar) reads as absent.
fn non_empty_mapping<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) if !map.is_empty() => Ok(serde_json::from_value(Value::Object(map)).ok()),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_missing_results_reads_as_empty() {
        let response: SnapshotResponse = serde_json::from_str(r#"{"status": "OK"}"#).unwrap();
        assert_eq!(response.status(), Some(&json!("OK")));
        assert!(response.request_id().is_none());
        assert_eq!(response.contract_count(), 0);

        for body in [r#"{"results": null}"#, r#"{"results": {"a": 1}}"#, r#"{"results": "none"}"#] {
            let response: SnapshotResponse = serde_json::from_str(body).unwrap();
            assert_eq!(response.contract_count(), 0, "{}", body);
        }
    }

    #[test]
    fn test_document_is_not_rewritten() {
        let body = r#"{"status":"OK","results":[{"greeks":{"vega":null,"delta":0.5},"zeta":1,"alpha":2}],"request_id":"x"}"#;
        let response: SnapshotResponse = serde_json::from_str(body).unwrap();

        assert_eq!(serde_json::to_string(&response).unwrap(), body);

        let keys: Vec<&str> = response.document().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["status", "results", "request_id"]);
    }

    #[test]
    fn test_absent_results_stay_absent() {
        let response: SnapshotResponse = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();
        assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"status":"OK"}"#);
    }

    #[test]
    fn test_mistyped_scalars_are_kept_as_received() {
        let response: SnapshotResponse = serde_json::from_value(json!({
            "status": 200,
            "results": [{
                "details": {"strike_price": "150", "ticker": 42},
                "open_interest": "1234",
                "implied_volatility": 0.25
            }]
        }))
        .unwrap();

        assert_eq!(response.status(), Some(&json!(200)));

        let contract = &response.results()[0];
        let details = contract.details.as_ref().unwrap();
        assert_eq!(details.strike_price, Some(json!("150")));
        assert_eq!(details.ticker, Some(json!(42)));
        assert_eq!(contract.open_interest, Some(json!("1234")));
        assert_eq!(contract.implied_volatility.as_ref().unwrap().to_string(), "0.25");
    }

    #[test]
    fn test_mistyped_mappings_read_as_absent() {
        let response: SnapshotResponse = serde_json::from_value(json!({
            "results": [
                {"details": "O:AAPL", "greeks": [0.5], "last_quote": 5.1},
                7
            ]
        }))
        .unwrap();

        assert_eq!(response.contract_count(), 2);
        assert_eq!(response.results()[0], OptionContract::default());
        assert_eq!(response.results()[1], OptionContract::default());
    }

    #[test]
    fn test_empty_quote_and_trade_are_absent() {
        let contract: OptionContract = serde_json::from_value(json!({
            "last_quote": {},
            "last_trade": {"price": null, "size": null}
        }))
        .unwrap();

        assert!(contract.last_quote.is_none());
        // A mapping with keys is present even when every value is null
        assert_eq!(contract.last_trade, Some(LastTrade::default()));
    }

    #[test]
    fn test_next_url() {
        let response: SnapshotResponse = serde_json::from_value(json!({
            "results": [],
            "next_url": "https://api.example.com/v3/snapshot/options/AAPL?cursor=abc"
        }))
        .unwrap();
        assert_eq!(
            response.next_url(),
            Some("https://api.example.com/v3/snapshot/options/AAPL?cursor=abc")
        );
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        assert!(serde_json::from_str::<SnapshotResponse>("[1, 2]").is_err());
        assert!(serde_json::from_str::<SnapshotResponse>("\"OK\"").is_err());
    }
}
