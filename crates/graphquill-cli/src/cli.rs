use crate::commands;
use crate::CommandResult;
use crate::RunnableCommand;

/// A CLI tool for validating GraphQL schemas and executing queries with
/// the graphquill engine.
#[derive(clap::Parser, Debug)]
#[command(name = "graphquill", version, about, arg_required_else_help = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Command {
    /// Build and validate one or more SDL files (directories are walked
    /// for .graphql/.gql files).
    ValidateSchema(commands::ValidateSchemaCommand),

    /// Validate a query document against a schema.
    ValidateQuery(commands::ValidateQueryCommand),

    /// Execute a query against a schema using default resolvers over a
    /// JSON root value.
    Execute(commands::ExecuteCommand),
}

impl Command {
    pub fn run(&self, cli: &Cli) -> CommandResult {
        match self {
            Command::ValidateSchema(cmd) => cmd.run(cli),
            Command::ValidateQuery(cmd) => cmd.run(cli),
            Command::Execute(cmd) => cmd.run(cli),
        }
    }
}
