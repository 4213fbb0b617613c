//! Error shape for a failed method/function dispatch.

use simplex_parser::Span;

use super::TypeId;

/// Raised when no argument alternative matches a call.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchError {
    pub name: String,
    pub receiver: Option<TypeId>,
    pub considered: Vec<Vec<TypeId>>,
    pub actual: Vec<TypeId>,
    pub span: Span,
}

impl DispatchError {
    pub fn describe(&self) -> String {
        let actual = self
            .actual
            .iter()
            .map(|t| super::interner::display_name(*t))
            .collect::<Vec<_>>()
            .join(",");
        match self.receiver {
            Some(recv) => format!(
                "no alternative of '{}' on '{}' accepts ({})",
                self.name,
                super::interner::display_name(recv),
                actual
            ),
            None => format!("no alternative of '{}' accepts ({})", self.name, actual),
        }
    }
}
