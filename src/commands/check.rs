use log::*;

use checknumber::format_response;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Check a single phone number")]
pub struct CheckCommand {
	#[clap(help = "The phone number to check, including the country calling code, eg. 628138800001")]
	pub number: String,
	#[clap(short, long, help = "Two letter country code of the number, eg. ID. Case-insensitive.")]
	pub country: String,
	#[clap(long, help = "URL the service should send the result to.")]
	pub callback: Option<String>,
	#[clap(long, help = "Print the full JSON response instead of a one line summary.")]
	pub raw: bool,
}

impl CheckCommand {
	fn request(&self) -> LookupRequest {
		let mut req = LookupRequest::new(self.number.clone(), self.country.clone());
		req.callback = self.callback.clone();
		req
	}
}

impl<T> CheckerCommand<T> for CheckCommand
where
	T: Transport,
{
	fn execute(&self, checker: &mut BatchChecker<T>) -> anyhow::Result<()> {
		let req = self.request();
		warn_if_suspicious(&req);
		info!("Checking {} ({})", req.number, req.country);
		let resp = checker.check_request(&req)?;

		if self.raw {
			println!("{}", serde_json::to_string_pretty(&resp)?);
		} else {
			println!("{}", format_response(&resp));
		}
		Ok(())
	}
}
