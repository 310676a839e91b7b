use crate::schema_loader;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use graphquill::validate;
use graphquill::ParseOptions;
use std::path::PathBuf;

/// `graphquill validate-query --schema <path> <query-file>`
#[derive(clap::Args, Debug)]
pub(crate) struct ValidateQueryCommand {
    /// SDL file or directory for the schema to validate against.
    #[arg(long, required = true)]
    pub schema: Vec<PathBuf>,

    /// The query document to validate.
    pub query_file: PathBuf,
}

impl ValidateQueryCommand {
    fn try_run(&self) -> anyhow::Result<String> {
        let schema = schema_loader::load_schema(&self.schema)?;
        let source = std::fs::read_to_string(&self.query_file)
            .with_context(|| format!("failed to read {}", self.query_file.display()))?;
        let document = graphquill::parse(
            &source,
            &ParseOptions {
                allow_type_system: false,
                file_path: Some(self.query_file.clone()),
            },
        )?;

        let result = validate(&schema, &document);
        if result.ok() {
            Ok("Document is valid".to_string())
        } else {
            let rendered: Vec<String> = result
                .errors
                .iter()
                .map(|error| format!("error: {}", error.message))
                .collect();
            anyhow::bail!(
                "{} validation error(s)\n{}",
                result.errors.len(),
                rendered.join("\n")
            )
        }
    }
}

impl RunnableCommand for ValidateQueryCommand {
    fn run(&self, _cli: &Cli) -> CommandResult {
        match self.try_run() {
            Ok(stdout) => CommandResult::success(stdout),
            Err(err) => CommandResult::failure(format!("{err:#}")),
        }
    }
}
