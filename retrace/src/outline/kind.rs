use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kind of an outline symbol, named after the LSP symbol kinds a rule may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Array,
    Boolean,
    Class,
    Constant,
    Constructor,
    Enum,
    Field,
    File,
    Function,
    Interface,
    Method,
    Module,
    #[default]
    Namespace,
    Number,
    Package,
    Property,
    String,
    Variable,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 18] = [
        Self::Array,
        Self::Boolean,
        Self::Class,
        Self::Constant,
        Self::Constructor,
        Self::Enum,
        Self::Field,
        Self::File,
        Self::Function,
        Self::Interface,
        Self::Method,
        Self::Module,
        Self::Namespace,
        Self::Number,
        Self::Package,
        Self::Property,
        Self::String,
        Self::Variable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Boolean => "Boolean",
            Self::Class => "Class",
            Self::Constant => "Constant",
            Self::Constructor => "Constructor",
            Self::Enum => "Enum",
            Self::Field => "Field",
            Self::File => "File",
            Self::Function => "Function",
            Self::Interface => "Interface",
            Self::Method => "Method",
            Self::Module => "Module",
            Self::Namespace => "Namespace",
            Self::Number => "Number",
            Self::Package => "Package",
            Self::Property => "Property",
            Self::String => "String",
            Self::Variable => "Variable",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Returned when a rule part is not an exact kind name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind;

impl FromStr for SymbolKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or(UnknownKind)
    }
}
