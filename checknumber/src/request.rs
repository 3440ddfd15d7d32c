use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
	static ref NON_DIGITS: Regex = Regex::new(r"\D").unwrap();
}

/// Countries the lookup service is known to support.
pub const SUPPORTED_COUNTRIES: [&str; 10] = ["BR", "MX", "NG", "IN", "ID", "US", "CA", "GB", "DE", "FR"];

/// A single number to look up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
	pub number: String,
	/// Two letter country code. Any case is accepted, it is always sent uppercased.
	pub country: String,
	/// URL the service should notify when the lookup completes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub callback: Option<String>,
}

impl LookupRequest {
	pub fn new(number: impl Into<String>, country: impl Into<String>) -> Self {
		Self {
			number: number.into(),
			country: country.into(),
			callback: None,
		}
	}

	pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
		self.callback = Some(callback.into());
		self
	}

	pub fn normalized_country(&self) -> String {
		self.country.trim().to_uppercase()
	}

	/// The form-encoded body parameters for this request. An empty callback is omitted.
	pub fn form_params(&self) -> Vec<(&'static str, String)> {
		let mut params = vec![
			("number", self.number.clone()),
			("country", self.normalized_country()),
		];
		if let Some(callback) = self.callback.as_ref().filter(|c| !c.is_empty()) {
			params.push(("callback", callback.clone()));
		}
		params
	}
}

pub fn validate_country_code(country: &str) -> bool {
	SUPPORTED_COUNTRIES
		.iter()
		.any(|c| c.eq_ignore_ascii_case(country.trim()))
}

/// A phone number is plausible if it has between 8 and 15 digits, ignoring any formatting characters.
pub fn validate_phone_number(number: &str) -> bool {
	let digits = NON_DIGITS.replace_all(number, "");
	(8..=15).contains(&digits.len())
}
