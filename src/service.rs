//! Line-oriented extraction service.
//!
//! The service connects out to an orchestrator and then answers requests
//! until the connection closes. Each request is one line of JSON,
//! `{"input": <path>, "output": <path>}`; each response is one line, `{}` on
//! success or the error text on failure. A failed extraction does not end
//! the loop; a malformed request or a broken connection does.

use crate::batch::{self, FileOutcome};
use crate::error::{Error, Result};
use crate::options::ExtractOptions;
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::path::PathBuf;

/// One extraction request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceRequest {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Response line for a successful request.
pub const SUCCESS_RESPONSE: &str = "{}";

fn response_line(outcome: &FileOutcome) -> String {
    match outcome {
        FileOutcome::Written(_) => SUCCESS_RESPONSE.to_string(),
        FileOutcome::Failed(message) => message
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn abort<W: Write>(writer: &mut W, err: Error) -> Result<()> {
    log::error!("Service loop failed: {}", err);
    let _ = writeln!(writer, "{}", err).and_then(|_| writer.flush());
    Err(err)
}

/// Serve requests read from `reader` until end of input.
pub fn serve<R: BufRead, W: Write>(reader: R, mut writer: W, options: &ExtractOptions) -> Result<()> {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => return abort(&mut writer, e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }

        let request: ServiceRequest = match serde_json::from_str(&line) {
            Ok(request) => request,
            Err(e) => {
                return abort(
                    &mut writer,
                    Error::Protocol(format!("invalid request {:?}: {}", line, e)),
                )
            }
        };

        let outcome = batch::process_file(&request.input, &request.output, options, |message| {
            log::error!("{}", message);
            Ok(())
        });

        writeln!(writer, "{}", response_line(&outcome))?;
        writer.flush()?;
    }
    Ok(())
}

/// Connect to `endpoint` (`host:port`) and serve requests until it closes.
pub fn run(endpoint: &str, options: &ExtractOptions) -> Result<()> {
    log::info!("Started processing server. Connecting to {}", endpoint);
    let stream = TcpStream::connect(endpoint)?;
    let reader = BufReader::new(stream.try_clone()?);
    serve(reader, stream, options)
}
