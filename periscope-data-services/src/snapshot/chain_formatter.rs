use periscope_core::{OptionContract, SnapshotResponse};
use serde_json::Value;
use std::borrow::Cow;
use std::io::{self, Write};

use crate::error::Result;

/// Placeholder for any value the upstream did not send
pub const NOT_AVAILABLE: &str = "N/A";

/// Width of the `-` and `=` separator lines
pub const SEPARATOR_WIDTH: usize = 80;

/// Trait for turning a chain snapshot into terminal output
pub trait ChainFormatter {
    /// Header plus one block per contract
    fn to_chain_text(&self) -> String;

    /// The document as received, 2-space indented
    fn to_raw_json(&self) -> Result<String>;
}

impl ChainFormatter for SnapshotResponse {
    fn to_chain_text(&self) -> String {
        let header = [
            format!("Status: {}", or_na(self.status())),
            format!("Request ID: {}", or_na(self.request_id())),
            "-".repeat(SEPARATOR_WIDTH),
            format!("Total contracts returned: {}", self.contract_count()),
            String::new(),
            String::new(),
        ];

        let mut text = header.join("\n");
        for contract in self.results() {
            text.push_str(&format_contract(contract));
        }

        text
    }

    fn to_raw_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Render one contract block, ending with a blank line
pub fn format_contract(contract: &OptionContract) -> String {
    let details = contract.details.clone().unwrap_or_default();
    let greeks = contract.greeks.clone().unwrap_or_default();

    let mut lines = vec![
        format!("Contract: {}", or_na(details.ticker.as_ref())),
        format!("  Type: {}", or_na(details.contract_type.as_ref()).to_uppercase()),
        format!("  Strike: ${}", or_na(details.strike_price.as_ref())),
        format!("  Expiration: {}", or_na(details.expiration_date.as_ref())),
        format!("  Exercise Style: {}", or_na(details.exercise_style.as_ref())),
    ];

    // Names are padded to the four-letter width
    lines.push("  Greeks:".to_string());
    lines.push(format!("    Delta: {}", or_na(greeks.delta.as_ref())));
    lines.push(format!("    Gamma: {}", or_na(greeks.gamma.as_ref())));
    lines.push(format!("    Theta: {}", or_na(greeks.theta.as_ref())));
    lines.push(format!("    Vega:  {}", or_na(greeks.vega.as_ref())));

    lines.push(format!(
        "  Implied Volatility: {}",
        or_na(contract.implied_volatility.as_ref())
    ));
    lines.push(format!("  Open Interest: {}", or_na(contract.open_interest.as_ref())));

    if let Some(quote) = &contract.last_quote {
        lines.push(format!(
            "  Last Quote: Bid ${} / Ask ${}",
            or_na(quote.bid.as_ref()),
            or_na(quote.ask.as_ref())
        ));
    }

    if let Some(trade) = &contract.last_trade {
        lines.push(format!(
            "  Last Trade: ${} ({} contracts)",
            or_na(trade.price.as_ref()),
            or_na(trade.size.as_ref())
        ));
    }

    // Trailing blank line between blocks
    lines.push(String::new());
    lines.push(String::new());
    lines.join("\n")
}

/// Write the formatted chain to `out`
pub fn print_options_chain<W: Write>(out: &mut W, response: &SnapshotResponse) -> io::Result<()> {
    out.write_all(response.to_chain_text().as_bytes())
}

/// Strings print without quotes, everything else in its JSON form
fn or_na(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(NOT_AVAILABLE),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
