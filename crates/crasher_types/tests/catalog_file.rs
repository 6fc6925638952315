use crasher_types::{CatalogError, ClassName, TypeCatalog, TypeIntrospector, Visibility};
use std::fs;
use tempfile::TempDir;

#[test]
fn load_reads_catalogue_from_disk() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("types.toml");
    fs::write(
        &path,
        r#"
[[types]]
name = "demo.Counter"

[[types.constructors]]

[[types.methods]]
name = "increment"
params = ["int"]
returns = "int"
"#,
    )
    .expect("write catalogue");

    let catalog = TypeCatalog::load(&path).expect("catalogue loads");
    let counter = ClassName::new("demo", "Counter");
    let ops = catalog.available_operations(&counter, Visibility::Global);
    assert_eq!(ops.len(), 2);
    assert!(ops[0].is_constructor());
    assert_eq!(ops[1].name, "increment");
}

#[test]
fn load_reports_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let error = TypeCatalog::load(&path).expect_err("file does not exist");
    match error {
        CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}
