use checknumber::{format_outcome, CheckStatistics, LookupOutcome};

pub fn print_summary(outcomes: &[LookupOutcome]) {
	println!("\n=== Results Summary ===");
	for (i, outcome) in outcomes.iter().enumerate() {
		println!("{}. {}", i + 1, format_outcome(outcome));
	}
}

pub fn print_statistics(stats: &CheckStatistics) {
	println!("\n=== Statistics ===");
	println!("Total Checks: {}", stats.total);
	println!("Successful: {}", stats.successful);
	println!("Failed: {}", stats.failed);
	println!("WhatsApp Yes: {}", stats.whatsapp_yes);
	println!("WhatsApp No: {}", stats.whatsapp_no);
}
