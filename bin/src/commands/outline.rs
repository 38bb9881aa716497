use crate::cli::OutlineArgs;
use anyhow::{Context, Result};
use retrace::{paths, Config, SymbolInformation, SymbolProvider};
use std::path::{Path, PathBuf};

pub fn run(args: OutlineArgs, config_override: Option<&Path>) -> Result<Vec<SymbolInformation>> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read file: {}", args.file.display()))?;

    let start_dir = match args.file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let discovered = paths::discover(&start_dir);
    let config =
        Config::load_with_overrides(config_override, discovered.config_path.as_deref())?;

    let root = args
        .root
        .or(discovered.workspace_root)
        .unwrap_or(start_dir);
    let provider = SymbolProvider::load(&root, &config);

    let file_name = args.file.to_string_lossy();
    Ok(provider.provide_document_symbols(&file_name, &text))
}

/// One symbol per line: 1-based line number, kind, label.
pub fn render(symbols: &[SymbolInformation]) -> String {
    symbols
        .iter()
        .map(|symbol| format!("{:>5}  {:<11} {}\n", symbol.line + 1, symbol.kind, symbol.name))
        .collect()
}
