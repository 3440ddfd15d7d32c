use clap::CommandFactory;
use clap_complete::Shell;

use super::*;

#[derive(Debug, Clone, Parser)]
#[clap(about = "Generate shell completions")]
pub struct CompletionsCommand {
	#[clap(
		short,
		long,
		value_enum,
		help = "The shell to generate completions for."
	)]
	pub shell: Shell,
}

impl ConstCommand for CompletionsCommand {
	fn execute(&self) -> anyhow::Result<()> {
		let mut app = Args::command();
		clap_complete::generate(self.shell, &mut app, "checknumber", &mut std::io::stdout());
		Ok(())
	}
}
