use std::fmt;

use serde::Serialize;

/// A structural problem the builder recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Diagnostic {
    /// `END` whose name does not match the innermost open component.
    StrayEnd { line: usize, name: String },
    /// Component still open at end of input.
    UnclosedComponent { name: String },
    /// Attribute line outside any component; dropped by the decoder.
    RootAttribute { line: usize },
    /// `BEGIN` that would exceed the nesting limit; its content is flattened.
    DepthLimitExceeded { line: usize, name: String, max_depth: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrayEnd { line, name } => {
                write!(f, "line {line}: END:{name} does not close an open component")
            }
            Self::UnclosedComponent { name } => write!(f, "{name} is not closed"),
            Self::RootAttribute { line } => {
                write!(f, "line {line}: attribute outside of any component")
            }
            Self::DepthLimitExceeded {
                line,
                name,
                max_depth,
            } => write!(
                f,
                "line {line}: BEGIN:{name} exceeds the maximum depth of {max_depth}"
            ),
        }
    }
}
