//! Import loading: `import "path" as scope` parses and
//! analyzes a source file, rejects it if it defines any products, and
//! installs its bindings into a dedicated child environment of the root.

use std::fs;
use std::path::Path;

use simplex_parser::ast::Import;

use crate::analyzer::Analyzer;
use crate::env::Environment;
use crate::error::{AnalysisError, SimplexError};

/// Resolves and installs every import in `imports`, registering each under
/// its `scope` name in `root_env`.
pub fn load_imports(imports: &[Import], base_dir: &Path, root_env: &Environment) -> Result<(), SimplexError> {
    for import in imports {
        load_one(import, base_dir, root_env)?;
    }
    Ok(())
}

fn load_one(import: &Import, base_dir: &Path, root_env: &Environment) -> Result<(), SimplexError> {
    let path = base_dir.join(&import.path);
    let source = fs::read_to_string(&path)?;
    let module = simplex_parser::parse_module(&source).map_err(|errors| SimplexError::from_parse_errors(errors, &source))?;

    if let Some(product) = module.products.first() {
        return Err(SimplexError::from_analysis_errors(vec![AnalysisError::LibraryHasProduct {
            span: product.span,
        }]));
    }

    let scope_env = crate::builtins::root_environment();
    let mut analyzer = Analyzer::new();
    analyzer.analyze_module(&module, &scope_env);
    let errors = analyzer.into_errors();
    if !errors.is_empty() {
        return Err(SimplexError::from_analysis_errors(errors));
    }

    root_env.register_import(import.scope.clone(), scope_env);
    Ok(())
}
