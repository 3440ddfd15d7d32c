use clap::Parser;
use log::*;

use checknumber::{BatchChecker, WebApiTransport};

mod commands;
mod errors;
mod report;

use commands::{CommandType, DemoCommand};

fn main() {
	std::process::exit(match run() {
		Ok(_) => 0,
		Err(e) => {
			error!("{:?}", e);
			1
		}
	});
}

fn run() -> anyhow::Result<()> {
	let args = commands::Args::parse();

	stderrlog::new()
		.verbosity(args.global.verbosity as usize)
		.module(module_path!())
		.module("checknumber")
		.init()?;

	let cmd: CommandType<WebApiTransport> = match args.sub {
		Some(sub) => sub.into(),
		None => CommandType::Checker(Box::new(DemoCommand::default())),
	};

	let cmd = match cmd {
		CommandType::Const(cmd) => {
			return cmd.execute();
		}
		CommandType::Checker(cmd) => cmd,
	};

	let config = args.global.api_config();
	if config.has_placeholder_key() {
		warn!(
			"No API key configured, requests will most likely be rejected. Set {} or pass --api-key.",
			checknumber::config::API_KEY_ENV
		);
	}
	debug!("Using endpoint {} with a {:?} timeout", config.base_url, config.timeout);

	let mut checker = BatchChecker::new(WebApiTransport::new(&config)?);
	let result = cmd.execute(&mut checker);
	checker.close();
	result
}
