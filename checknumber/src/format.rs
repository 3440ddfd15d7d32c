use crate::{LookupOutcome, LookupResponse};

/// One line summary of a response. Fields missing from an `OK` response are shown as placeholders.
pub fn format_response(resp: &LookupResponse) -> String {
	if resp.is_ok() {
		format!(
			"Number: {}, WhatsApp: {}, Transaction ID: {}",
			resp.number().unwrap_or("Unknown"),
			resp.whatsapp().unwrap_or("Unknown"),
			resp.transaction_id.as_deref().unwrap_or("N/A"),
		)
	} else {
		let raw = serde_json::to_string(resp).unwrap_or_else(|_| format!("{:?}", resp));
		format!(
			"Status: {}, Error: {}",
			resp.status.as_deref().unwrap_or("Unknown"),
			raw
		)
	}
}

pub fn format_outcome(outcome: &LookupOutcome) -> String {
	match &outcome.result {
		Ok(resp) => format_response(resp),
		Err(failure) => format!(
			"Error for {} ({}): {}",
			outcome.request.number, outcome.request.country, failure.message
		),
	}
}
