//! End-to-end product-driver scenarios, run against real source text and a
//! temporary output directory.

use std::fs;
use std::path::Path;

use simplex::error::SimplexError;

fn run_source(source: &str, dir: &Path, prefix: &str) -> Result<(), SimplexError> {
    let (module, env) = simplex::prepare_module(source, dir)?;
    simplex::driver::run(&module, &env, prefix, &[]).map_err(SimplexError::from)
}

#[test]
fn hello_solid_writes_only_stl() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"fun c(r:Float,h:Float):Solid { cylinder(h+2.0,r,0.1) } produce("p"){ c(10.0,20.0) }"#;

    run_source(source, dir.path(), prefix).expect("should run cleanly");

    assert!(Path::new(&format!("{prefix}-p.stl")).exists());
    assert!(!Path::new(&format!("{prefix}-p.txt")).exists());
    assert!(!Path::new(&format!("{prefix}-p.twist")).exists());
}

#[test]
fn translated_union_has_an_off_origin_bounding_box() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"
        let a = cuboid(20.0, 20.0, 20.0)->translate(vec3(-10.0, -10.0, -10.0));
        let b = cylinder(30.0, 15.0, 15.0)->translate(vec3(20.0, 25.0, 5.0));
        produce("r"){ a->union(b)->bounding_box() }
    "#;

    run_source(source, dir.path(), prefix).expect("should run cleanly");

    let dump = fs::read_to_string(format!("{prefix}-r.twist")).unwrap();
    assert!(dump.contains("bounds = {"));
    assert!(dump.contains("low = [-20, -20, -20]"));
    assert!(dump.contains("high = [35, 40, 35]"));
}

#[test]
fn record_update_appears_in_twist_dump() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"data P{x:Int y:Int}; let p=#P(1,2); produce("r"){ p.y := 9 }"#;

    run_source(source, dir.path(), prefix).expect("should run cleanly");

    let dump = fs::read_to_string(format!("{prefix}-r.twist")).unwrap();
    assert!(dump.contains("x = 1"));
    assert!(dump.contains("y = 9"));
}

#[test]
fn for_loop_maps_into_a_vector() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"produce("r"){ for i in 1->to(3) { i * i } }"#;

    run_source(source, dir.path(), prefix).expect("should run cleanly");

    let dump = fs::read_to_string(format!("{prefix}-r.twist")).unwrap();
    assert_eq!(dump.trim(), "[1, 4, 9]");
}

#[test]
fn missing_method_is_a_runtime_error_naming_method_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"produce("r"){ 3->no_such(1) }"#;

    let err = run_source(source, dir.path(), prefix).expect_err("should fail at runtime");
    assert_eq!(err.exit_code(), 3);
    let message = err.to_string();
    assert!(message.contains("no_such"));
    assert!(message.contains("Int"));
}

#[test]
fn import_resolves_scoped_bindings_and_rejects_products_in_libraries() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.s3d"), "let thing = 42").unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"import "lib.s3d" as L produce("r"){ L::thing }"#;

    run_source(source, dir.path(), prefix).expect("should run cleanly");
    let dump = fs::read_to_string(format!("{prefix}-r.twist")).unwrap();
    assert_eq!(dump.trim(), "42");
}

#[test]
fn library_with_a_product_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.s3d"), r#"produce("oops"){ 1 }"#).unwrap();
    let prefix = dir.path().join("out");
    let prefix = prefix.to_str().unwrap();
    let source = r#"import "lib.s3d" as L produce("r"){ L::thing }"#;

    let err = run_source(source, dir.path(), prefix).expect_err("should be rejected");
    assert_eq!(err.exit_code(), 2);
}
