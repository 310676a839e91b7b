use crate::schema_loader;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use std::path::PathBuf;

/// `graphquill validate-schema <paths...>`
#[derive(clap::Args, Debug)]
pub(crate) struct ValidateSchemaCommand {
    /// SDL files, or directories to walk for .graphql/.gql files.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print the canonical SDL of the built schema.
    #[arg(long)]
    pub print: bool,
}

impl ValidateSchemaCommand {
    fn try_run(&self) -> anyhow::Result<String> {
        let schema = schema_loader::load_schema(&self.paths)?;
        let summary = format!(
            "Schema is valid ({} types, {} directives)",
            schema.types().len(),
            schema.directives().len(),
        );
        Ok(if self.print {
            schema.to_sdl()
        } else {
            summary
        })
    }
}

impl RunnableCommand for ValidateSchemaCommand {
    fn run(&self, _cli: &Cli) -> CommandResult {
        match self.try_run() {
            Ok(stdout) => CommandResult::success(stdout),
            Err(err) => CommandResult::failure(format!("{err:#}")),
        }
    }
}
