use crate::schema_loader;
use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use anyhow::Context;
use graphquill::process_graphql_query;
use graphquill::ApolloTracing;
use graphquill::ExecuteOptions;
use graphquill::ThreadPoolRuntime;
use serde_json::Value as JsonValue;
use std::path::PathBuf;
use std::sync::Arc;

/// `graphquill execute --schema <path> [--variables <json>] <query-file>`
#[derive(clap::Args, Debug)]
pub(crate) struct ExecuteCommand {
    /// SDL file or directory for the schema to execute against.
    #[arg(long, required = true)]
    pub schema: Vec<PathBuf>,

    /// The query document to execute.
    pub query_file: PathBuf,

    /// Variable values as a JSON object.
    #[arg(long)]
    pub variables: Option<String>,

    /// Operation to run when the document contains several.
    #[arg(long)]
    pub operation: Option<String>,

    /// Root value as JSON; default resolvers read fields from it.
    #[arg(long)]
    pub root: Option<String>,

    /// Worker threads for concurrent field resolution (0 = run
    /// everything on the calling thread).
    #[arg(long, default_value_t = 0)]
    pub workers: usize,

    /// Attach an Apollo-format `tracing` extension to the response.
    #[arg(long)]
    pub trace: bool,

    /// Pretty-print the JSON response.
    #[arg(long)]
    pub pretty: bool,
}

impl ExecuteCommand {
    fn parse_json_flag(flag: &Option<String>, label: &str) -> anyhow::Result<JsonValue> {
        match flag {
            Some(raw) => {
                serde_json::from_str(raw).with_context(|| format!("invalid --{label} JSON"))
            }
            None => Ok(JsonValue::Null),
        }
    }

    fn try_run(&self) -> anyhow::Result<String> {
        let schema = schema_loader::load_schema(&self.schema)?;
        let query = std::fs::read_to_string(&self.query_file)
            .with_context(|| format!("failed to read {}", self.query_file.display()))?;

        let variables = match Self::parse_json_flag(&self.variables, "variables")? {
            JsonValue::Null => serde_json::Map::new(),
            JsonValue::Object(map) => map,
            _ => anyhow::bail!("--variables must be a JSON object"),
        };

        let mut options = ExecuteOptions {
            variables,
            operation_name: self.operation.clone(),
            root: Self::parse_json_flag(&self.root, "root")?,
            ..ExecuteOptions::default()
        };
        if self.workers > 0 {
            options.runtime = Arc::new(ThreadPoolRuntime::new(self.workers));
        }
        if self.trace {
            options.instrumentation = Some(Arc::new(ApolloTracing::new()));
        }

        let response = process_graphql_query(&schema, &query, &options);
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&response)
        } else {
            serde_json::to_string(&response)
        }
        .context("failed to serialize response")?;
        Ok(rendered)
    }
}

impl RunnableCommand for ExecuteCommand {
    fn run(&self, _cli: &Cli) -> CommandResult {
        match self.try_run() {
            Ok(stdout) => CommandResult::success(stdout),
            Err(err) => CommandResult::failure(format!("{err:#}")),
        }
    }
}
