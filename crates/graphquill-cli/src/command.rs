use crate::Cli;
use crate::CommandResult;

/// Implemented by each CLI subcommand.
pub(crate) trait RunnableCommand {
    fn run(&self, cli: &Cli) -> CommandResult;
}
