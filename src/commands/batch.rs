use log::*;
use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};

use anyhow::Context;
use checknumber::CheckStatistics;

use crate::{errors::InputError, report};

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Check several phone numbers, one after another")]
pub struct BatchCommand {
	#[clap(help = "Numbers to check, as NUMBER:COUNTRY or NUMBER:COUNTRY:CALLBACK, eg. 5511999999999:BR")]
	pub entries: Vec<String>,
	#[clap(
		short,
		long,
		help = "Read numbers from a JSON file.",
		long_help = "Read numbers from a JSON file containing an array of objects with \"number\", \"country\" and optionally \"callback\" keys. They are checked before any numbers given on the command line."
	)]
	pub file: Option<PathBuf>,
	#[clap(short, long, default_value_t = 1.0, help = "Seconds to wait between requests.")]
	pub delay: f64,
	#[clap(long, help = "Print the outcomes and statistics as JSON.")]
	pub json: bool,
}

impl BatchCommand {
	fn load_requests(&self) -> anyhow::Result<Vec<LookupRequest>> {
		let mut requests = match &self.file {
			Some(path) => {
				debug!("Reading numbers from {}", path.display());
				let file = File::open(path)
					.with_context(|| format!("Could not open {}", path.display()))?;
				serde_json::from_reader::<_, Vec<LookupRequest>>(BufReader::new(file))
					.with_context(|| format!("Could not parse {}", path.display()))?
			}
			None => vec![],
		};
		for entry in &self.entries {
			requests.push(parse_entry(entry)?);
		}
		if requests.is_empty() {
			return Err(InputError::EmptyBatch.into());
		}
		Ok(requests)
	}

	fn delay(&self) -> Result<Duration, InputError> {
		Duration::try_from_secs_f64(self.delay).map_err(|_| InputError::InvalidDelay(self.delay))
	}
}

impl<T> CheckerCommand<T> for BatchCommand
where
	T: Transport,
{
	fn execute(&self, checker: &mut BatchChecker<T>) -> anyhow::Result<()> {
		let delay = self.delay()?;
		let requests = self.load_requests()?;
		requests.iter().for_each(warn_if_suspicious);
		info!("Checking {} numbers with a {:?} delay", requests.len(), delay);

		let outcomes = checker.check_batch(&requests, delay);
		let stats = CheckStatistics::from_outcomes(&outcomes);

		if self.json {
			let out = serde_json::json!({
				"outcomes": outcomes,
				"statistics": stats,
			});
			println!("{}", serde_json::to_string_pretty(&out)?);
		} else {
			report::print_summary(&outcomes);
			report::print_statistics(&stats);
		}
		Ok(())
	}
}

/// Parses `NUMBER:COUNTRY[:CALLBACK]`. The callback may itself contain colons.
fn parse_entry(entry: &str) -> Result<LookupRequest, InputError> {
	let mut parts = entry.splitn(3, ':');
	let number = parts.next().unwrap_or_default().trim();
	let country = parts.next().unwrap_or_default().trim();
	if number.is_empty() || country.is_empty() {
		return Err(InputError::MalformedEntry(entry.to_owned()));
	}

	let mut req = LookupRequest::new(number, country);
	req.callback = parts
		.next()
		.map(str::trim)
		.filter(|c| !c.is_empty())
		.map(String::from);
	Ok(req)
}
