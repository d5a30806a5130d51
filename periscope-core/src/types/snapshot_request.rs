use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::types::UnderlyingTicker;

/// `contract_type` filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Call => "call",
            ContractType::Put => "put",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractType {
    type Err = ParseContractTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(ContractType::Call),
            "put" => Ok(ContractType::Put),
            _ => Err(ParseContractTypeError(s.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown contract type: {0} (expected call or put)")]
pub struct ParseContractTypeError(pub String);

/// Scalar value of a query filter
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Integer(v) => write!(f, "{}", v),
            FilterValue::Float(v) => write!(f, "{}", v),
            FilterValue::Text(v) => f.write_str(v),
            FilterValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Integer(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Integer(v.into())
    }
}

impl From<u32> for FilterValue {
    fn from(v: u32) -> Self {
        FilterValue::Integer(v.into())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<ContractType> for FilterValue {
    fn from(v: ContractType) -> Self {
        FilterValue::Text(v.as_str().to_string())
    }
}

/// One options chain snapshot query.
///
/// Filters are free-form: the named helpers cover the ones the upstream
/// documents, and [`SnapshotRequest::filter`] forwards anything else verbatim.
/// Insertion order is the order the filters appear in the query string.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    /// Inserted into the URL path as-is (no case folding)
    pub underlying: UnderlyingTicker,
    pub filters: Vec<(String, FilterValue)>,
}

impl SnapshotRequest {
    pub fn new(underlying: impl Into<UnderlyingTicker>) -> Self {
        Self {
            underlying: underlying.into(),
            filters: Vec::new(),
        }
    }

    /// Set a filter; a key that is already present keeps its position and
    /// takes the new value
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.filters.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.filters.push((key, value)),
        }
        self
    }

    pub fn limit(self, limit: u32) -> Self {
        self.filter("limit", limit)
    }

    pub fn strike_price(self, strike_price: f64) -> Self {
        self.filter("strike_price", strike_price)
    }

    /// `YYYY-MM-DD`
    pub fn expiration_date(self, expiration_date: impl Into<String>) -> Self {
        self.filter("expiration_date", expiration_date.into())
    }

    pub fn contract_type(self, contract_type: ContractType) -> Self {
        self.filter("contract_type", contract_type)
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.filters.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}
