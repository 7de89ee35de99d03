use memberwise_codegen::{expand_file, generate, listing, scan_source, CodegenError, Config};
use memberwise_core::prelude::MemberwiseError;

const SOURCE: &str = r#"use memberwise_macros::memberwise_init;

pub struct Plain {
    x: i32,
}

#[memberwise_init(defaults = { "port": 8080 })]
pub struct Server {
    host: String,
    port: u16,
}

mod inner {
    #[memberwise_macros::memberwise_init(access = internal)]
    pub(crate) struct Token<T> {
        value: T,
        #[member(constant, init = 0)]
        uses: _,
    }
}

#[memberwise_init(exclude = ["missing"])]
pub struct Broken {
    id: u64,
}
"#;

#[test]
fn finds_annotated_structs_in_order() {
    let reports = scan_source(SOURCE).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Server", "Token", "Broken"]);
}

#[test]
fn renders_signature_and_listing() {
    let reports = scan_source(SOURCE).unwrap();

    let server = reports[0].outcome.as_ref().unwrap();
    assert_eq!(reports[0].line, 8);
    assert_eq!(server.signature, "pub fn new(host: String, port: u16 = 8080)");
    assert_eq!(
        server.listing,
        "impl Server {\n    pub fn new(host: String, port: Option<u16>) -> Self {\n        Self {\n            host,\n            port: port.unwrap_or_else(|| 8080),\n        }\n    }\n}\n"
    );

    let token = reports[1].outcome.as_ref().unwrap();
    assert!(token.listing.starts_with("impl<T> Token<T> {\n    pub(crate) fn new(value: T) -> Self {\n"));
    assert!(token.listing.contains("            uses: 0,\n"));
}

#[test]
fn errors_point_at_the_offending_line() {
    let reports = scan_source(SOURCE).unwrap();
    let broken = &reports[2];
    assert_eq!(broken.line, 22);
    assert!(matches!(
        broken.outcome,
        Err(MemberwiseError::InexistentKey { ref key, .. }) if key == "missing"
    ));
}

#[test]
fn unparsable_sources_are_syntax_errors() {
    assert!(scan_source("pub struct {").is_err());
}

#[test]
fn expand_file_lists_constructors_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.rs");
    std::fs::write(&path, SOURCE).unwrap();

    let out = expand_file(&path).unwrap();
    assert!(out.contains("impl Server {"));
    assert!(out.contains("Broken: error"));
    assert!(out.contains("Suggestion"));
}

#[test]
fn generate_writes_a_listing_grouped_by_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("src")).unwrap();
    std::fs::write(
        dir.path().join("src/lib.rs"),
        "#[memberwise_init]\npub struct A { a: i32 }\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("src/plain.rs"), "pub struct B;\n").unwrap();

    let output = dir.path().join("expanded.rs");
    let config = Config::parse(&format!(
        "version = \"1.0\"\n[source]\npaths = [{:?}]\n[output]\npath = {:?}\n",
        dir.path().join("src"),
        output,
    ))
    .unwrap();

    generate(&config).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("// Generated by memberwise. Do not edit.\n"));
    assert!(written.contains("lib.rs:2 A\nimpl A {\n    pub fn new(a: i32) -> Self {\n"));
    assert!(!written.contains("plain.rs"));
}

#[test]
fn check_counts_failing_structs() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("model.rs"), SOURCE).unwrap();

    let config = Config::parse(&format!(
        "version = \"1.0\"\n[source]\npaths = [{:?}]\n",
        dir.path()
    ))
    .unwrap();

    assert!(matches!(
        memberwise_codegen::check(&config),
        Err(CodegenError::Failed(1))
    ));
}

#[test]
fn listing_of_nothing_is_empty() {
    assert_eq!(listing(&[]), "");
}
