//! Static analyzer, tree-walking evaluator, and product driver for the
//! Simplex solid-modeling language. The companion `simplex-parser` crate
//! owns lexing/parsing; this crate owns everything that needs to know what
//! a `Solid` or a `Float` actually is.

pub mod analyzer;
pub mod builtins;
pub mod driver;
pub mod env;
pub mod error;
pub mod eval;
pub mod geometry;
pub mod library;
pub mod twist;
pub mod types;
pub mod value;

use std::path::Path;

use simplex_parser::ast::Module;

use env::Environment;
use error::SimplexError;

/// Parses, analyzes, and loads imports for `source`, returning the
/// fully-initialized module environment and its AST. `base_dir` resolves
/// relative import paths.
pub fn prepare_module(source: &str, base_dir: &Path) -> Result<(Module, Environment), SimplexError> {
    let module = simplex_parser::parse_module(source).map_err(|errors| SimplexError::from_parse_errors(errors, source))?;

    let env = builtins::root_environment();
    library::load_imports(&module.imports, base_dir, &env)?;

    let mut analyzer = analyzer::Analyzer::new();
    analyzer.analyze_module(&module, &env);
    let errors = analyzer.into_errors();
    if !errors.is_empty() {
        return Err(SimplexError::from_analysis_errors(errors));
    }

    Ok((module, env))
}
