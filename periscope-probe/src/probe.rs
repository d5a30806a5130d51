use periscope_core::{SnapshotRequest, SnapshotResponse};
use periscope_data_services::snapshot::SEPARATOR_WIDTH;
use periscope_data_services::{
    print_options_chain, ChainFormatter, MassiveClient, PeriscopeError, SnapshotTransport,
};
use std::io::{self, Write};
use std::process::ExitCode;

/// What to print after a successful fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Formatted chain, then the raw JSON trailer
    Full,
    /// Raw JSON only
    JsonOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Rendered,
    Failed,
}

impl ProbeOutcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            ProbeOutcome::Rendered => ExitCode::SUCCESS,
            ProbeOutcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Fetch one snapshot and write the report to `out`.
///
/// Upstream and decode failures are reported on `out` and turn into
/// [`ProbeOutcome::Failed`]; only a failing writer is returned as an error.
pub async fn run<T, W>(
    client: &MassiveClient<T>,
    request: &SnapshotRequest,
    mode: OutputMode,
    out: &mut W,
) -> io::Result<ProbeOutcome>
where
    T: SnapshotTransport,
    W: Write,
{
    if mode == OutputMode::Full {
        writeln!(out, "Fetching options chain snapshot for {}...", request.underlying)?;
        writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    }

    let response = match client.get_options_chain_snapshot(request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("Snapshot for {} failed: {}", request.underlying, err);
            report_error(out, &err)?;
            return Ok(ProbeOutcome::Failed);
        }
    };

    write_report(out, &response, mode)
}

/// Write the report for a fetched snapshot: the chain and the raw-dump
/// trailer in [`OutputMode::Full`], the raw document alone otherwise
pub fn write_report<W: Write>(
    out: &mut W,
    response: &SnapshotResponse,
    mode: OutputMode,
) -> io::Result<ProbeOutcome> {
    let raw = match response.to_raw_json() {
        Ok(raw) => raw,
        Err(err) => {
            report_error(out, &err)?;
            return Ok(ProbeOutcome::Failed);
        }
    };

    if mode == OutputMode::Full {
        print_options_chain(out, response)?;
        let banner = "=".repeat(SEPARATOR_WIDTH);
        writeln!(out, "{}\nRaw JSON Response:\n{}", banner, banner)?;
    }
    writeln!(out, "{}", raw)?;

    Ok(ProbeOutcome::Rendered)
}

/// `HTTP Error: ...` plus `Response: ...` for upstream rejections,
/// `Error: ...` for everything else
pub fn report_error<W: Write>(out: &mut W, err: &PeriscopeError) -> io::Result<()> {
    match err {
        PeriscopeError::Http { body, .. } => {
            writeln!(out, "HTTP Error: {}", err)?;
            writeln!(out, "Response: {}", body)
        }
        _ => writeln!(out, "Error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_http_error() {
        let err = PeriscopeError::http(
            401,
            Some("Unauthorized"),
            "https://api.example.com/v3/snapshot/options/AAPL?apiKey=REDACTED".to_string(),
            r#"{"error":"bad key"}"#.to_string(),
        );

        let mut out = Vec::new();
        report_error(&mut out, &err).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "HTTP Error: 401 Client Error: Unauthorized for url: https://api.example.com/v3/snapshot/options/AAPL?apiKey=REDACTED\n\
             Response: {\"error\":\"bad key\"}\n"
        );
    }

    #[test]
    fn test_report_other_error() {
        let err = PeriscopeError::Config("MASSIVE_API_KEY must be set".to_string());
        let mut out = Vec::new();
        report_error(&mut out, &err).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Error: Configuration error: MASSIVE_API_KEY must be set\n"
        );
    }

    #[test]
    fn test_json_only_report_is_the_document() {
        let response: SnapshotResponse =
            serde_json::from_str(r#"{"status":"OK","request_id":"x","results":[]}"#).unwrap();

        let mut out = Vec::new();
        let outcome = write_report(&mut out, &response, OutputMode::JsonOnly).unwrap();

        assert_eq!(outcome, ProbeOutcome::Rendered);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"status\": \"OK\",\n  \"request_id\": \"x\",\n  \"results\": []\n}\n"
        );
    }

    #[test]
    fn test_full_report_layout() {
        let response: SnapshotResponse = serde_json::from_str(r#"{"status":"OK"}"#).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &response, OutputMode::Full).unwrap();

        let banner = "=".repeat(80);
        let expected = format!(
            "Status: OK\nRequest ID: N/A\n{}\nTotal contracts returned: 0\n\n\
             {banner}\nRaw JSON Response:\n{banner}\n{{\n  \"status\": \"OK\"\n}}\n",
            "-".repeat(80),
            banner = banner,
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
