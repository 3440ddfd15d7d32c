use std::{thread, time::Duration};

use log::*;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::transport::{Transport, TransportError, WebApiTransport};
use crate::{ApiConfig, LookupRequest, LookupResponse};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
	#[error("Invalid input: {0}")]
	InvalidInput(&'static str),
	#[error(transparent)]
	Transport(#[from] TransportError),
	#[error("JSON decode error: {0}")]
	Decode(#[from] serde_path_to_error::Error<serde_json::Error>),
}

impl CheckError {
	pub fn http_status(&self) -> Option<u16> {
		match self {
			CheckError::Transport(err) => err.status().map(|s| s.as_u16()),
			_ => None,
		}
	}
}

/// Why a single lookup in a batch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckFailure {
	pub message: String,
	/// Set when the API answered with a non-success HTTP status.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<u16>,
}

impl From<CheckError> for CheckFailure {
	fn from(err: CheckError) -> Self {
		CheckFailure {
			status: err.http_status(),
			message: err.to_string(),
		}
	}
}

/// The result of one lookup in a batch, in the same position as its request.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOutcome {
	pub request: LookupRequest,
	pub result: Result<LookupResponse, CheckFailure>,
}

impl LookupOutcome {
	pub fn success(&self) -> bool {
		self.result.is_ok()
	}

	pub fn response(&self) -> Option<&LookupResponse> {
		self.result.as_ref().ok()
	}

	pub fn failure(&self) -> Option<&CheckFailure> {
		self.result.as_ref().err()
	}
}

impl Serialize for LookupOutcome {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("LookupOutcome", 3)?;
		state.serialize_field("input", &self.request)?;
		state.serialize_field("success", &self.success())?;
		match &self.result {
			Ok(resp) => state.serialize_field("result", resp)?,
			Err(failure) => state.serialize_field("error", failure)?,
		}
		state.end()
	}
}

/// Looks up numbers one at a time over a [`Transport`] it owns. The transport is closed by [`BatchChecker::close`] or when the checker is dropped.
pub struct BatchChecker<T>
where
	T: Transport,
{
	transport: T,
}

impl BatchChecker<WebApiTransport> {
	pub fn from_config(config: &ApiConfig) -> Result<Self, TransportError> {
		Ok(Self::new(WebApiTransport::new(config)?))
	}
}

impl<T> BatchChecker<T>
where
	T: Transport,
{
	pub fn new(transport: T) -> Self {
		Self { transport }
	}

	pub fn check_one(
		&mut self,
		number: &str,
		country: &str,
		callback: Option<&str>,
	) -> Result<LookupResponse, CheckError> {
		let mut req = LookupRequest::new(number, country);
		req.callback = callback.map(String::from);
		self.check_request(&req)
	}

	pub fn check_request(&mut self, req: &LookupRequest) -> Result<LookupResponse, CheckError> {
		if req.number.trim().is_empty() {
			return Err(CheckError::InvalidInput("phone number must not be empty"));
		}
		if req.country.trim().is_empty() {
			return Err(CheckError::InvalidInput("country code must not be empty"));
		}

		let body = self.transport.send_request(req)?;
		let deserializer = &mut serde_json::Deserializer::from_slice(&body);
		let resp: LookupResponse = serde_path_to_error::deserialize(deserializer)?;
		trace!("Parsed response: {:?}", resp);
		Ok(resp)
	}

	/// Checks every request in order. A failed lookup is recorded in its outcome and does not stop the batch.
	/// When `delay` is non-zero, the thread sleeps for `delay` between consecutive requests, but not after the last one.
	pub fn check_batch(&mut self, requests: &[LookupRequest], delay: Duration) -> Vec<LookupOutcome> {
		let total = requests.len();
		let mut outcomes = Vec::with_capacity(total);

		for (i, req) in requests.iter().enumerate() {
			info!("Checking {}/{}: {} ({})", i + 1, total, req.number, req.country);

			let result = self.check_request(req).map_err(|err| {
				warn!("Error checking {}: {}", req.number, err);
				CheckFailure::from(err)
			});
			outcomes.push(LookupOutcome {
				request: req.clone(),
				result,
			});

			if !delay.is_zero() && i + 1 < total {
				debug!("Sleeping {:?} before next request", delay);
				thread::sleep(delay);
			}
		}

		outcomes
	}

	pub fn close(&mut self) {
		self.transport.close();
	}
}

impl<T> Drop for BatchChecker<T>
where
	T: Transport,
{
	fn drop(&mut self) {
		self.transport.close();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::{cell::RefCell, collections::VecDeque, rc::Rc, time::Instant};

	use reqwest::StatusCode;

	const OK_YES: &str = include_str!("fixtures/responses/ok-yes.json");
	const OK_NO: &str = include_str!("fixtures/responses/ok-no-transaction-id.json");

	#[derive(Debug, Default)]
	struct FakeState {
		pub sent: Vec<Vec<(&'static str, String)>>,
		pub closed: usize,
	}

	/// Replays canned replies in order and records what was sent.
	struct FakeTransport {
		replies: VecDeque<Result<Vec<u8>, TransportError>>,
		pub state: Rc<RefCell<FakeState>>,
	}

	impl FakeTransport {
		pub fn new(replies: Vec<Result<&str, TransportError>>) -> Self {
			Self {
				replies: replies
					.into_iter()
					.map(|r| r.map(|body| body.as_bytes().to_vec()))
					.collect(),
				state: Default::default(),
			}
		}
	}

	impl Transport for FakeTransport {
		fn send_request(&mut self, req: &LookupRequest) -> Result<Vec<u8>, TransportError> {
			self.state.borrow_mut().sent.push(req.form_params());
			self.replies
				.pop_front()
				.unwrap_or_else(|| Err(TransportError::Closed))
		}

		fn close(&mut self) {
			self.state.borrow_mut().closed += 1;
		}
	}

	fn server_error() -> TransportError {
		TransportError::HttpStatus {
			status: StatusCode::INTERNAL_SERVER_ERROR,
			body: "oops".into(),
		}
	}

	fn sample_requests(n: usize) -> Vec<LookupRequest> {
		(0..n)
			.map(|i| LookupRequest::new(format!("62813880000{}", i), "id"))
			.collect()
	}

	#[test]
	fn test_check_one_uppercases_country() -> anyhow::Result<()> {
		let transport = FakeTransport::new(vec![Ok(OK_YES)]);
		let state = transport.state.clone();
		let mut checker = BatchChecker::new(transport);

		let resp = checker.check_one("628138800001", "id", None)?;

		assert_eq!(resp.transaction_id.as_deref(), Some("abc123"));
		assert_eq!(
			state.borrow().sent[0],
			vec![
				("number", "628138800001".to_owned()),
				("country", "ID".to_owned())
			]
		);
		Ok(())
	}

	#[test]
	fn test_check_one_rejects_empty_input_without_sending() {
		let transport = FakeTransport::new(vec![]);
		let state = transport.state.clone();
		let mut checker = BatchChecker::new(transport);

		assert!(matches!(
			checker.check_one("", "ID", None),
			Err(CheckError::InvalidInput(_))
		));
		assert!(matches!(
			checker.check_one("628138800001", "  ", None),
			Err(CheckError::InvalidInput(_))
		));
		assert!(state.borrow().sent.is_empty());
	}

	#[test]
	fn test_check_one_decode_error() {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![
			Ok("<html>not json</html>"),
			Ok(r#"{"status": "OK", "transactionId": "#),
		]));

		let err = checker.check_one("628138800001", "ID", None).unwrap_err();
		assert!(matches!(err, CheckError::Decode(_)), "got {:?}", err);
		assert_eq!(err.http_status(), None);

		let err = checker.check_one("628138800001", "ID", None).unwrap_err();
		assert!(matches!(err, CheckError::Decode(_)), "got {:?}", err);
	}

	#[test]
	fn test_check_one_accepts_numeric_fields() -> anyhow::Result<()> {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![Ok(
			r#"{"status":"OK","message":{"number":628138800001,"whatsapp":"yes"},"transactionId":12345}"#,
		)]));
		let outcomes = checker.check_batch(&sample_requests(1), Duration::ZERO);
		let resp = outcomes[0].response().expect("lookup should succeed");
		assert_eq!(resp.transaction_id.as_deref(), Some("12345"));
		assert_eq!(resp.number(), Some("628138800001"));
		assert_eq!(crate::CheckStatistics::from_outcomes(&outcomes).whatsapp_yes, 1);
		Ok(())
	}

	#[test]
	fn test_check_one_transport_error_keeps_status() {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![Err(server_error())]));
		let err = checker.check_one("628138800001", "ID", None).unwrap_err();
		assert_eq!(err.http_status(), Some(500));
		assert_eq!(err.to_string(), "HTTP error 500 Internal Server Error: oops");
	}

	#[test]
	fn test_batch_all_succeed_in_order() {
		let requests = sample_requests(3);
		let mut checker = BatchChecker::new(FakeTransport::new(vec![Ok(OK_YES), Ok(OK_NO), Ok(OK_YES)]));

		let outcomes = checker.check_batch(&requests, Duration::ZERO);

		assert_eq!(outcomes.len(), requests.len());
		for (outcome, req) in outcomes.iter().zip(&requests) {
			assert!(outcome.success());
			assert_eq!(&outcome.request, req);
		}
		assert_eq!(
			outcomes[0].response(),
			Some(&serde_json::from_str::<LookupResponse>(OK_YES).unwrap())
		);
		assert_eq!(
			outcomes[1].response(),
			Some(&serde_json::from_str::<LookupResponse>(OK_NO).unwrap())
		);
	}

	#[test]
	fn test_batch_isolates_failures() {
		let requests = sample_requests(4);
		let mut checker = BatchChecker::new(FakeTransport::new(vec![
			Ok(OK_YES),
			Err(server_error()),
			Ok("garbage"),
			Ok(OK_NO),
		]));

		let outcomes = checker.check_batch(&requests, Duration::ZERO);

		assert_eq!(outcomes.len(), 4);
		assert!(outcomes[0].success());
		assert!(!outcomes[1].success());
		assert!(!outcomes[2].success());
		assert!(outcomes[3].success());

		let failure = outcomes[1].failure().unwrap();
		assert_eq!(failure.status, Some(500));
		assert!(failure.message.contains("oops"));
		assert_eq!(outcomes[2].failure().unwrap().status, None);
		assert_eq!(outcomes[2].request, requests[2]);
	}

	#[test]
	fn test_batch_without_delay_does_not_sleep() {
		let requests = sample_requests(5);
		let mut checker = BatchChecker::new(FakeTransport::new((0..5).map(|_| Ok(OK_YES)).collect()));

		let start = Instant::now();
		checker.check_batch(&requests, Duration::ZERO);
		assert!(start.elapsed() < Duration::from_millis(500));
	}

	#[test]
	fn test_batch_delay_between_items_only() {
		let delay = Duration::from_millis(40);
		let requests = sample_requests(3);
		let mut checker = BatchChecker::new(FakeTransport::new(vec![
			Ok(OK_YES),
			Err(server_error()),
			Ok(OK_YES),
		]));

		let start = Instant::now();
		let outcomes = checker.check_batch(&requests, delay);
		let elapsed = start.elapsed();

		assert_eq!(outcomes.len(), 3);
		assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
	}

	#[test]
	fn test_batch_single_item_never_sleeps() {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![Ok(OK_YES)]));
		let start = Instant::now();
		checker.check_batch(&sample_requests(1), Duration::from_secs(5));
		assert!(start.elapsed() < Duration::from_secs(1));
	}

	#[test]
	fn test_empty_batch() {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![]));
		assert!(checker.check_batch(&[], Duration::from_secs(1)).is_empty());
	}

	#[test]
	fn test_close_releases_transport() {
		let transport = FakeTransport::new(vec![Err(server_error())]);
		let state = transport.state.clone();
		let mut checker = BatchChecker::new(transport);
		let _ = checker.check_one("628138800001", "ID", None);
		checker.close();
		assert_eq!(state.borrow().closed, 1);
		drop(checker);
		assert_eq!(state.borrow().closed, 2);
	}

	#[test]
	fn test_serialize_outcomes() -> anyhow::Result<()> {
		let mut checker = BatchChecker::new(FakeTransport::new(vec![Ok(OK_YES), Err(server_error())]));
		let outcomes = checker.check_batch(&sample_requests(2), Duration::ZERO);
		let json = serde_json::to_value(&outcomes)?;

		assert_eq!(json[0]["success"], true);
		assert_eq!(json[0]["input"]["country"], "id");
		assert_eq!(json[0]["result"]["transactionId"], "abc123");
		assert_eq!(json[1]["success"], false);
		assert_eq!(json[1]["error"]["status"], 500);
		assert!(json[1].get("result").is_none());
		Ok(())
	}
}
