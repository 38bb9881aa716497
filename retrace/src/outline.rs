//! Line-based document outline driven by `#rule:` pattern rules.
//!
//! Rules come from three places, in order:
//!
//! 1. The built-in comment tag rule, matching lines like `// TODO: fix this`
//! 2. The workspace rules file (`.symbol-rules` by default)
//! 3. `#rule:` lines inside the scanned document, active for the lines below them
//!
//! Each line of a document is matched against every active rule and each
//! match yields one [`SymbolInformation`] at column 0 of that line.

mod kind;
mod rule;

pub use kind::{SymbolKind, UnknownKind};
pub use rule::{RuleError, SymbolRule, RULE_MARKER};

use crate::{config::Config, position::Position};
use regex::Regex;
use std::{io, ops::Range, path::Path};

/// Tags comments such as `# NOTE: ...`, `// TODO: ...` or `-- FIXME: ...`.
pub const BUILTIN_RULE: &str = r"(?:#|//|--)[ \t]*((\w+):.*)";

/// One outline entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInformation {
    pub name: String,
    pub kind: SymbolKind,
    pub line: u32,
}

impl SymbolInformation {
    /// Zero-width range at the start of the symbol's line.
    pub fn range(&self) -> Range<Position> {
        let start = Position::new(self.line, 0);
        start..start
    }
}

#[derive(Debug, Clone)]
pub struct SymbolProvider {
    rules: Vec<SymbolRule>,
    default_kind: SymbolKind,
}

impl SymbolProvider {
    /// Provider with only the built-in rule (if enabled by `config`).
    pub fn new(config: &Config) -> Self {
        let mut rules = Vec::new();
        if config.builtin_rules {
            match Regex::new(BUILTIN_RULE) {
                Ok(re) => rules.push(SymbolRule::new(re)),
                Err(err) => tracing::error!("built-in symbol rule failed to compile: {err}"),
            }
        }
        Self {
            rules,
            default_kind: config.default_kind,
        }
    }

    /// Provider with the built-in rule plus the rules file under `root`.
    ///
    /// A missing rules file is normal; unreadable files and bad rules are
    /// logged and skipped.
    pub fn load(root: &Path, config: &Config) -> Self {
        let mut provider = Self::new(config);
        let path = root.join(&config.rules_file);
        match std::fs::read_to_string(&path) {
            Ok(source) => {
                let added = provider.add_rules(&source);
                tracing::info!("loaded {added} symbol rules from {}", path.display());
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no symbol rules file at {}", path.display());
            },
            Err(err) => {
                tracing::warn!("failed to read symbol rules {}: {err}", path.display());
            },
        }
        provider
    }

    /// Parse every `#rule:` line in `source` and keep the valid ones.
    /// Returns how many rules were added.
    pub fn add_rules(&mut self, source: &str) -> usize {
        let before = self.rules.len();
        for (line_num, line) in source.lines().enumerate() {
            match SymbolRule::parse(line) {
                Ok(Some(rule)) => self.rules.push(rule),
                Ok(None) => {},
                Err(err) => tracing::warn!("skipping symbol rule on line {}: {err}", line_num + 1),
            }
        }
        self.rules.len() - before
    }

    pub fn rules(&self) -> &[SymbolRule] {
        &self.rules
    }

    /// Rules whose extension filter accepts `file_name`.
    pub fn rules_for_file(&self, file_name: &str) -> Vec<SymbolRule> {
        self.rules
            .iter()
            .filter(|rule| rule.applies_to(file_name))
            .cloned()
            .collect()
    }

    pub fn provide_document_symbols(&self, file_name: &str, text: &str) -> Vec<SymbolInformation> {
        let mut active = self.rules_for_file(file_name);
        let mut symbols = Vec::new();

        for (line, line_text) in (0u32..).zip(text.lines()) {
            if line_text.contains(RULE_MARKER) {
                match SymbolRule::parse(line_text) {
                    Ok(Some(rule)) => active.push(rule),
                    Ok(None) => {},
                    Err(err) => tracing::warn!("{file_name}:{line}: skipping symbol rule: {err}"),
                }
                continue;
            }

            for rule in &active {
                if let Some(name) = rule.label_for(line_text) {
                    symbols.push(SymbolInformation {
                        name,
                        kind: rule.kind.unwrap_or(self.default_kind),
                        line,
                    });
                }
            }
        }

        symbols
    }
}
