use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The body returned by the lookup endpoint. Every field is optional, absent fields never fail decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResponse {
	#[serde(
		default,
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub status: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message: Option<ResponseMessage>,
	#[serde(
		default,
		rename = "pricingStrategy",
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub pricing_strategy: Option<String>,
	#[serde(
		default,
		rename = "transactionId",
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub transaction_id: Option<String>,
	/// Any other top level keys, kept so the raw body can be shown back to the user.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// On success `message` is an object describing the number. Errors tend to put a plain string there instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseMessage {
	Details(LookupDetails),
	Text(String),
	Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupDetails {
	#[serde(
		default,
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub number: Option<String>,
	#[serde(
		default,
		deserialize_with = "lenient_string",
		skip_serializing_if = "Option::is_none"
	)]
	pub whatsapp: Option<String>,
}

/// Scalars the API sends as strings sometimes arrive as numbers or booleans. Those are kept as text, anything else is treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value: Option<Value> = Deserialize::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::String(s)) => Some(s),
		Some(Value::Number(n)) => Some(n.to_string()),
		Some(Value::Bool(b)) => Some(b.to_string()),
		_ => None,
	})
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhatsAppStatus {
	Yes,
	No,
	Unknown,
}

impl From<&str> for WhatsAppStatus {
	fn from(s: &str) -> Self {
		match s {
			"yes" => WhatsAppStatus::Yes,
			"no" => WhatsAppStatus::No,
			_ => WhatsAppStatus::Unknown,
		}
	}
}

impl LookupResponse {
	pub fn is_ok(&self) -> bool {
		self.status.as_deref() == Some("OK")
	}

	pub fn details(&self) -> Option<&LookupDetails> {
		match &self.message {
			Some(ResponseMessage::Details(details)) => Some(details),
			_ => None,
		}
	}

	pub fn number(&self) -> Option<&str> {
		self.details().and_then(|d| d.number.as_deref())
	}

	pub fn whatsapp(&self) -> Option<&str> {
		self.details().and_then(|d| d.whatsapp.as_deref())
	}

	pub fn whatsapp_status(&self) -> WhatsAppStatus {
		self.whatsapp()
			.map(WhatsAppStatus::from)
			.unwrap_or(WhatsAppStatus::Unknown)
	}
}
