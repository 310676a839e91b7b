use anyhow::Context;
use graphquill::Schema;
use graphquill::SchemaBuilder;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Expands the given paths into SDL files: files pass through,
/// directories are walked for `.graphql` / `.gql` entries.
pub(crate) fn collect_sdl_files(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("failed to walk directory {}", path.display()))?;
                if entry.file_type().is_file() && is_sdl_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    anyhow::ensure!(!files.is_empty(), "no schema files found");
    Ok(files)
}

fn is_sdl_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("graphql" | "gql")
    )
}

/// Loads and builds a schema from the given paths.
pub(crate) fn load_schema(paths: &[PathBuf]) -> anyhow::Result<Schema> {
    let files = collect_sdl_files(paths)?;
    log::debug!("building schema from {} file(s)", files.len());
    let schema = SchemaBuilder::new()
        .load_from_files(files)?
        .build()?;
    Ok(schema)
}
