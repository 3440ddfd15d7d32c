use serde::Serialize;

use crate::{LookupOutcome, WhatsAppStatus};

/// Aggregate counts over the outcomes of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatistics {
	pub total: usize,
	pub successful: usize,
	pub failed: usize,
	pub whatsapp_yes: usize,
	pub whatsapp_no: usize,
}

impl CheckStatistics {
	pub fn from_outcomes(outcomes: &[LookupOutcome]) -> Self {
		let mut stats = CheckStatistics {
			total: outcomes.len(),
			..Default::default()
		};
		for resp in outcomes.iter().filter_map(LookupOutcome::response) {
			stats.successful += 1;
			match resp.whatsapp_status() {
				WhatsAppStatus::Yes => stats.whatsapp_yes += 1,
				WhatsAppStatus::No => stats.whatsapp_no += 1,
				WhatsAppStatus::Unknown => {}
			}
		}
		stats.failed = stats.total - stats.successful;
		stats
	}
}
