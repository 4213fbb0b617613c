//! Product driver: evaluates a module's `produce` blocks and
//! writes the partitioned outputs to disk, atomically.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use simplex_parser::ast::{Module, Product};

use crate::env::Environment;
use crate::error::DriverError;
use crate::eval::eval_expr;
use crate::geometry::{self, Solid};
use crate::twist;
use crate::value::Value;

/// Runs every product in `module` whose name is in `selected` (or all
/// products, if `selected` is empty), writing outputs under `prefix`.
pub fn run(module: &Module, env: &Environment, prefix: &str, selected: &[String]) -> Result<(), DriverError> {
    if !selected.is_empty() {
        for name in selected {
            if !module.products.iter().any(|p| &p.name == name) {
                return Err(DriverError::UnknownProduct(name.clone()));
            }
        }
    }

    // A runtime error aborts the product it occurred in, not the others;
    // the first failure is still reported to the caller once every
    // selected product has had a chance to run.
    let mut first_error = None;
    for product in &module.products {
        if !selected.is_empty() && !selected.iter().any(|n| n == &product.name) {
            continue;
        }
        if let Err(e) = run_product(product, env, prefix) {
            log::error!("{e}");
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn run_product(product: &Product, env: &Environment, prefix: &str) -> Result<(), DriverError> {
    log::info!("running product '{}'", product.name);
    let scope = env.child();
    let mut values = Vec::with_capacity(product.body.len());
    for expr in &product.body {
        let value = eval_expr(expr, &scope).map_err(|source| DriverError::Eval {
            product: product.name.clone(),
            source,
        })?;
        values.push(value);
    }

    let solids: Vec<Rc<Solid>> = values
        .iter()
        .filter_map(|v| match v {
            Value::Solid(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    let texts: Vec<String> = values.iter().filter(|v| v.is_text_renderable()).map(Value::render_text).collect();
    let rest: Vec<Value> = values
        .into_iter()
        .filter(|v| !v.is_solid() && !v.is_text_renderable())
        .collect();

    if let Some(unioned) = union_all(&solids) {
        write_atomically(&stl_path(prefix, &product.name), |path| {
            let file = fs::File::create(path)?;
            geometry::stl::write_binary(&unioned, file)
        })
        .map_err(|source| DriverError::Io {
            path: stl_path(prefix, &product.name).display().to_string(),
            source,
        })?;
    }

    if !texts.is_empty() {
        let joined = texts.join("");
        write_atomically(&txt_path(prefix, &product.name), |path| fs::write(path, &joined)).map_err(|source| {
            DriverError::Io {
                path: txt_path(prefix, &product.name).display().to_string(),
                source,
            }
        })?;
    }

    if !rest.is_empty() {
        let dump = twist::render(&rest);
        write_atomically(&twist_path(prefix, &product.name), |path| fs::write(path, &dump)).map_err(|source| {
            DriverError::Io {
                path: twist_path(prefix, &product.name).display().to_string(),
                source,
            }
        })?;
    }

    Ok(())
}

fn union_all(solids: &[Rc<Solid>]) -> Option<Solid> {
    let mut iter = solids.iter();
    let first = iter.next()?.as_ref().clone();
    Some(iter.fold(first, |acc, s| acc.union(s)))
}

/// Writes to a temporary sibling file then renames into place, so a crash
/// mid-write never leaves a half-written product artifact.
fn write_atomically(path: &Path, write: impl FnOnce(&Path) -> std::io::Result<()>) -> std::io::Result<()> {
    let mut tmp_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("out").to_string();
    tmp_name.push_str(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    write(&tmp_path)?;
    fs::rename(&tmp_path, path)
}

fn stl_path(prefix: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{name}.stl"))
}

fn txt_path(prefix: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{name}.txt"))
}

fn twist_path(prefix: &str, name: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}-{name}.twist"))
}
