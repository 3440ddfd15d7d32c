use std::time::Duration;

use anyhow::Context;
use checknumber::{format_response, CheckStatistics};

use crate::report;

use super::*;

const DEMO_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Parser, Default)]
#[clap(about = "Check one number, then a small batch across four countries. This is what runs when no subcommand is given.")]
pub struct DemoCommand;

impl<T> CheckerCommand<T> for DemoCommand
where
	T: Transport,
{
	fn execute(&self, checker: &mut BatchChecker<T>) -> anyhow::Result<()> {
		run_demo(checker, DEMO_DELAY)
	}
}

fn demo_requests() -> Vec<LookupRequest> {
	vec![
		LookupRequest::new("628138800001", "ID"),
		LookupRequest::new("5511999999999", "BR"),
		LookupRequest::new("5215555555555", "MX"),
		LookupRequest::new("919876543210", "IN"),
	]
}

fn run_demo<T>(checker: &mut BatchChecker<T>, delay: Duration) -> anyhow::Result<()>
where
	T: Transport,
{
	println!("=== Single Number Check ===");
	let resp = checker
		.check_one("628138800001", "ID", None)
		.context("Single number check failed")?;
	println!("Result: {}", format_response(&resp));
	println!("Raw Response: {}", serde_json::to_string_pretty(&resp)?);

	println!("\n=== Multiple Numbers Check ===");
	let outcomes = checker.check_batch(&demo_requests(), delay);

	report::print_summary(&outcomes);
	report::print_statistics(&CheckStatistics::from_outcomes(&outcomes));
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use checknumber::TransportError;

	const OK_BODY: &str = r#"{"status":"OK","message":{"number":"628138800001","whatsapp":"yes"},"transactionId":"abc123"}"#;

	/// Answers every request with the same reply.
	struct CannedTransport {
		fail: bool,
	}

	impl Transport for CannedTransport {
		fn send_request(&mut self, _req: &LookupRequest) -> Result<Vec<u8>, TransportError> {
			if self.fail {
				return Err(TransportError::Closed);
			}
			Ok(OK_BODY.as_bytes().to_vec())
		}

		fn close(&mut self) {}
	}

	#[test]
	fn test_demo_requests() {
		let requests = demo_requests();
		assert_eq!(requests.len(), 4);
		assert!(requests.iter().all(|r| validate_country_code(&r.country)));
		assert!(requests.iter().all(|r| validate_phone_number(&r.number)));
	}

	#[test]
	fn test_demo_runs_single_check_then_batch() {
		let mut checker = BatchChecker::new(CannedTransport { fail: false });
		assert!(run_demo(&mut checker, Duration::ZERO).is_ok());
	}

	#[test]
	fn test_demo_fails_when_single_check_fails() {
		let mut checker = BatchChecker::new(CannedTransport { fail: true });
		let err = run_demo(&mut checker, Duration::ZERO).unwrap_err();
		assert!(format!("{:#}", err).contains("closed"));
	}
}
