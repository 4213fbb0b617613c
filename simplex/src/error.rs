//! Error taxonomy for the semantic core, unified into a single
//! [`SimplexError`] that the CLI maps to an exit code.

use simplex_parser::{ParseErrors, Span};
use thiserror::Error;

use crate::types::TypeId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("unresolved reference '{name}' at {span:?}")]
    UnresolvedReference { name: String, span: Span },

    #[error("duplicate definition '{name}' at {span:?}")]
    DuplicateDefinition { name: String, span: Span },

    #[error("type mismatch at {span:?}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("arity mismatch for '{name}' at {span:?}: no alternative accepts {arity} argument(s)")]
    ArityMismatch {
        name: String,
        arity: usize,
        span: Span,
    },

    #[error("no method '{method}' on type '{receiver}' at {span:?}")]
    MissingMethod {
        method: String,
        receiver: String,
        span: Span,
    },

    #[error("unknown field '{field}' on type '{receiver}' at {span:?}")]
    UnknownField {
        field: String,
        receiver: String,
        span: Span,
    },

    #[error("return type mismatch for '{name}' at {span:?}: declared {declared}, found {found}")]
    ReturnTypeMismatch {
        name: String,
        declared: String,
        found: String,
        span: Span,
    },

    #[error("'{name}' is not callable at {span:?}")]
    NotCallable { name: String, span: Span },

    #[error("imported module at {span:?} contains a product block, which is not allowed in a library")]
    LibraryHasProduct { span: Span },
}

impl AnalysisError {
    pub fn span(&self) -> Span {
        match self {
            AnalysisError::UnresolvedReference { span, .. }
            | AnalysisError::DuplicateDefinition { span, .. }
            | AnalysisError::TypeMismatch { span, .. }
            | AnalysisError::ArityMismatch { span, .. }
            | AnalysisError::MissingMethod { span, .. }
            | AnalysisError::UnknownField { span, .. }
            | AnalysisError::ReturnTypeMismatch { span, .. }
            | AnalysisError::NotCallable { span, .. }
            | AnalysisError::LibraryHasProduct { span } => *span,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("undefined reference '{name}' at {span:?}")]
    Undefined { name: String, span: Span },

    #[error("no alternative of '{name}' on {receiver:?} accepts the given arguments at {span:?}")]
    InvalidParameter {
        name: String,
        receiver: Option<String>,
        span: Span,
    },

    #[error("'{op}' is not supported on '{ty}' at {span:?}")]
    UnsupportedOperation {
        op: String,
        ty: String,
        span: Span,
    },

    #[error("division by zero at {span:?}")]
    DivideByZero { span: Span },

    #[error("index {index} out of bounds (length {length}) at {span:?}")]
    IndexOutOfBounds {
        index: i64,
        length: usize,
        span: Span,
    },

    #[error("unknown field '{field}' at {span:?}")]
    UnknownField { field: String, span: Span },

    #[error("geometry kernel error at {span:?}: {message}")]
    Geometry { message: String, span: Span },

    #[error("'{name}' used before its let-binding is initialized at {span:?}")]
    UninitializedBinding { name: String, span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::Undefined { span, .. }
            | EvalError::InvalidParameter { span, .. }
            | EvalError::UnsupportedOperation { span, .. }
            | EvalError::DivideByZero { span }
            | EvalError::IndexOutOfBounds { span, .. }
            | EvalError::UnknownField { span, .. }
            | EvalError::Geometry { span, .. }
            | EvalError::UninitializedBinding { span, .. } => *span,
        }
    }
}

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("evaluation error while running product '{product}': {source}")]
    Eval {
        product: String,
        #[source]
        source: EvalError,
    },

    #[error("unknown product '{0}' requested on the command line")]
    UnknownProduct(String),
}

#[derive(Error, Debug)]
pub enum SimplexError {
    #[error("parse error:\n{0}")]
    Parse(String),

    #[error("analysis error: {0}")]
    Analysis(String),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimplexError {
    /// Exit code mapping: 1 parse, 2 analysis, 3 eval, 4 I/O.
    pub fn exit_code(&self) -> i32 {
        match self {
            SimplexError::Parse(_) => 1,
            SimplexError::Analysis(_) => 2,
            SimplexError::Eval(_) => 3,
            SimplexError::Driver(DriverError::Eval { .. }) => 3,
            SimplexError::Driver(DriverError::UnknownProduct(_)) => 1,
            SimplexError::Driver(DriverError::Io { .. }) => 4,
            SimplexError::Io(_) => 4,
        }
    }

    pub fn from_parse_errors(errors: ParseErrors, source: &str) -> Self {
        SimplexError::Parse(errors.format_all(source))
    }

    pub fn from_analysis_errors(errors: Vec<AnalysisError>) -> Self {
        SimplexError::Analysis(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

pub fn describe_type(ty: TypeId) -> String {
    ty.display_name()
}
