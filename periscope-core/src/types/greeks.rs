use serde::Deserialize;
use serde_json::Value;

/// First-order sensitivities reported per contract.
///
/// Values are carried exactly as the upstream encoded them, whatever their
/// JSON type; nothing here derives or recomputes a Greek.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Greeks {
    #[serde(default)]
    pub delta: Option<Value>,
    #[serde(default)]
    pub gamma: Option<Value>,
    #[serde(default)]
    pub theta: Option<Value>,
    #[serde(default)]
    pub vega: Option<Value>,
}
