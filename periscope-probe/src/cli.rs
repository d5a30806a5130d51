use chrono::NaiveDate;
use clap::Parser;
use periscope_core::{ContractType, SnapshotRequest};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::probe::OutputMode;

/// Options chain snapshot probe
///
/// Fetches one options chain snapshot from the market data service and
/// prints every contract with its Greeks, followed by the raw response.
/// Credentials come from MASSIVE_API_KEY and MASSIVE_BASE_URL (a `.env` file
/// in the working directory is read first); an unset base URL means
/// https://api.massive.com/v3.
#[derive(Parser, Debug)]
#[command(name = "periscope-probe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Underlying ticker symbol, sent exactly as typed
    #[arg(short, long, default_value = "AAPL")]
    pub ticker: String,

    /// Number of contracts to fetch
    #[arg(short, long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Only contracts with this strike
    #[arg(long)]
    pub strike_price: Option<f64>,

    /// Only contracts expiring on this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_expiration_date)]
    pub expiration_date: Option<String>,

    /// Only calls or only puts
    #[arg(long)]
    pub contract_type: Option<ContractType>,

    /// Extra upstream filter, forwarded verbatim (repeatable)
    /// Example: --filter strike_price.gte=150
    #[arg(short = 'f', long = "filter", value_name = "KEY=VALUE", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Print only the raw JSON response
    #[arg(long)]
    pub json: bool,

    /// Read environment assignments from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Request the flags describe; filters keep command-line order
    pub fn snapshot_request(&self) -> SnapshotRequest {
        let mut request = SnapshotRequest::new(self.ticker.clone()).limit(self.limit);

        if let Some(strike) = self.strike_price {
            request = request.strike_price(strike);
        }
        if let Some(expiration) = &self.expiration_date {
            request = request.expiration_date(expiration.clone());
        }
        if let Some(contract_type) = self.contract_type {
            request = request.contract_type(contract_type);
        }
        for (key, value) in &self.filters {
            request = request.filter(key.clone(), value.clone());
        }

        request
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::JsonOnly
        } else {
            OutputMode::Full
        }
    }

    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "periscope_probe={},periscope_data_services={}",
                self.log_level, self.log_level
            ))
        })
    }
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

fn parse_expiration_date(raw: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use periscope_core::FilterValue;

    #[test]
    fn test_defaults_match_the_example_query() {
        let args = Args::try_parse_from(["periscope-probe"]).unwrap();
        assert_eq!(args.ticker, "AAPL");
        assert_eq!(args.limit, 10);
        assert_eq!(args.output_mode(), OutputMode::Full);

        let request = args.snapshot_request();
        assert_eq!(request.underlying, "AAPL");
        assert_eq!(request.filters, vec![("limit".to_string(), FilterValue::Integer(10))]);
    }

    #[test]
    fn test_all_filters() {
        let args = Args::try_parse_from([
            "periscope-probe",
            "--ticker",
            "spy",
            "--limit",
            "3",
            "--strike-price",
            "150",
            "--expiration-date",
            "2025-01-17",
            "--contract-type",
            "put",
            "--filter",
            "order=asc",
            "-f",
            "sort=strike_price",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.output_mode(), OutputMode::JsonOnly);

        let request = args.snapshot_request();
        assert_eq!(request.underlying, "spy");
        let rendered: Vec<(String, String)> = request
            .filters
            .iter()
            .map(|(k, v)| (k.clone(), v.to_string()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("limit".to_string(), "3".to_string()),
                ("strike_price".to_string(), "150".to_string()),
                ("expiration_date".to_string(), "2025-01-17".to_string()),
                ("contract_type".to_string(), "put".to_string()),
                ("order".to_string(), "asc".to_string()),
                ("sort".to_string(), "strike_price".to_string()),
            ]
        );
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Args::try_parse_from(["periscope-probe", "--limit", "0"]).is_err());
        assert!(Args::try_parse_from(["periscope-probe", "--contract-type", "straddle"]).is_err());
        assert!(Args::try_parse_from(["periscope-probe", "--expiration-date", "01/17/2025"]).is_err());
        assert!(Args::try_parse_from(["periscope-probe", "--filter", "novalue"]).is_err());
    }

    #[test]
    fn test_parse_filter_keeps_extra_equals() {
        assert_eq!(
            parse_filter("ticker.gte=O:AAPL=X").unwrap(),
            ("ticker.gte".to_string(), "O:AAPL=X".to_string())
        );
        assert!(parse_filter("=1").is_err());
    }
}
