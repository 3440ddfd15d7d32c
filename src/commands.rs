use checknumber::{validate_country_code, validate_phone_number, BatchChecker, LookupRequest, Transport};
use clap::{Parser, ValueEnum};
use log::*;

pub mod batch;
pub mod check;
pub mod completions;
pub mod demo;

pub use batch::BatchCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use demo::DemoCommand;

/// A command that does not talk to the API.
pub(crate) trait ConstCommand {
	fn execute(&self) -> anyhow::Result<()>;
}

/// A command that performs lookups.
pub(crate) trait CheckerCommand<T>
where
	T: Transport,
{
	fn execute(&self, checker: &mut BatchChecker<T>) -> anyhow::Result<()>;
}

pub(crate) enum CommandType<T>
where
	T: Transport,
{
	Const(Box<dyn ConstCommand>),
	Checker(Box<dyn CheckerCommand<T>>),
}

#[derive(Debug, Clone, Parser)]
#[clap(name="checknumber-cli", bin_name="checknumber", author, version, about = "Check whether phone numbers are registered on WhatsApp.", long_about = None)]
pub(crate) struct Args {
	#[clap(flatten)]
	pub global: GlobalArgs,

	#[clap(subcommand)]
	pub sub: Option<Subcommands>,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct GlobalArgs {
	#[clap(
		long,
		env = "WHATSAPP_RT_API_KEY",
		hide_env_values = true,
		default_value = checknumber::config::PLACEHOLDER_API_KEY,
		help = "Your checknumber.ai API key."
	)]
	pub api_key: String,
	#[clap(
		long,
		env = "CHECKNUMBER_BASE_URL",
		default_value = checknumber::config::DEFAULT_BASE_URL,
		help = "The lookup endpoint to send requests to."
	)]
	pub base_url: String,
	#[clap(long, default_value_t = 30, help = "Request timeout in seconds.")]
	pub timeout: u64,
	#[clap(short, long, value_enum, default_value_t=Verbosity::Info, help = "Set the log level. Be warned, trace is capable of printing full request parameters.")]
	pub verbosity: Verbosity,
}

impl GlobalArgs {
	pub fn api_config(&self) -> checknumber::ApiConfig {
		checknumber::ApiConfig::new(self.api_key.clone())
			.with_base_url(self.base_url.clone())
			.with_timeout(std::time::Duration::from_secs(self.timeout))
	}
}

#[derive(Debug, Clone, Parser)]
pub(crate) enum Subcommands {
	Demo(DemoCommand),
	Check(CheckCommand),
	Batch(BatchCommand),
	Completion(CompletionsCommand),
}

impl<T> From<Subcommands> for CommandType<T>
where
	T: Transport,
{
	fn from(sub: Subcommands) -> Self {
		match sub {
			Subcommands::Demo(cmd) => CommandType::Checker(Box::new(cmd)),
			Subcommands::Check(cmd) => CommandType::Checker(Box::new(cmd)),
			Subcommands::Batch(cmd) => CommandType::Checker(Box::new(cmd)),
			Subcommands::Completion(cmd) => CommandType::Const(Box::new(cmd)),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Verbosity {
	Error = 0,
	Warn = 1,
	Info = 2,
	Debug = 3,
	Trace = 4,
}

impl std::fmt::Display for Verbosity {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_fmt(format_args!(
			"{}",
			match self {
				Verbosity::Error => "error",
				Verbosity::Warn => "warn",
				Verbosity::Info => "info",
				Verbosity::Debug => "debug",
				Verbosity::Trace => "trace",
			}
		))
	}
}

/// Lookups are still attempted for inputs that look wrong, the API has the final say.
pub(crate) fn warn_if_suspicious(req: &LookupRequest) {
	if !validate_phone_number(&req.number) {
		warn!(
			"{} does not look like a phone number, expected 8 to 15 digits",
			req.number
		);
	}
	if !validate_country_code(&req.country) {
		warn!("Country code {} is not known to be supported", req.country);
	}
}
