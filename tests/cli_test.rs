//! Tests of the `synthgen` binary.

use std::fs;
use std::process::{Command, Output};

fn synthgen(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_synthgen"))
        .args(args)
        .env_remove("SYNTHGEN_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run synthgen")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

const FIELDS_YAML: &str = r#"
custom_types:
  - name: handle
    expression: "'@' + lower(faker.first_name)"
fields:
  - name: id
    data_type: integer
  - name: who
    data_type: handle
  - name: tag
    expression: "'user-' + record_index"
"#;

#[test]
fn test_generate_json_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("fields.yaml");
    fs::write(&config, FIELDS_YAML).unwrap();
    let config = config.to_str().unwrap();

    let output = synthgen(&["generate", "--config-file", config, "--count", "3", "--seed", "42"]);
    assert!(output.status.success(), "{output:?}");
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["seed_used"], 42);
    assert_eq!(json["records"].as_array().unwrap().len(), 3);
    assert_eq!(json["records"][2]["tag"], "user-2");
    assert!(json["records"][0]["who"].as_str().unwrap().starts_with('@'));

    let again = synthgen(&["generate", "--config-file", config, "--count", "3", "--seed", "42"]);
    assert_eq!(output.stdout, again.stdout);
}

#[test]
fn test_generate_csv_from_schema_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("person.json");
    fs::write(
        &schema,
        r#"{"properties": {"id": {"type": "integer"}, "name": {"type": "string"}}}"#,
    )
    .unwrap();
    let out = dir.path().join("people.csv");

    let output = synthgen(&[
        "generate",
        "--schema",
        schema.to_str().unwrap(),
        "--dialect",
        "json",
        "--count",
        "4",
        "--seed",
        "1",
        "--format",
        "csv",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");

    let csv = fs::read_to_string(&out).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "id,name");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_engine_config_limits_count() {
    let dir = tempfile::tempdir().unwrap();
    let engine_config = dir.path().join("synthgen.toml");
    fs::write(&engine_config, "max_count = 2\n").unwrap();
    let fields = dir.path().join("fields.yaml");
    fs::write(&fields, FIELDS_YAML).unwrap();

    let output = synthgen(&[
        "--config",
        engine_config.to_str().unwrap(),
        "generate",
        "--config-file",
        fields.to_str().unwrap(),
        "--count",
        "3",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the configured maximum"), "{stderr}");
}

#[test]
fn test_introspect_xsd() {
    let dir = tempfile::tempdir().unwrap();
    let schema = dir.path().join("person.xsd");
    fs::write(
        &schema,
        r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
             <xs:element name="person"><xs:complexType><xs:sequence>
               <xs:element name="age" type="xs:int"/>
             </xs:sequence></xs:complexType></xs:element>
           </xs:schema>"#,
    )
    .unwrap();

    let output = synthgen(&["introspect", "--schema", schema.to_str().unwrap(), "--dialect", "xml"]);
    assert!(output.status.success(), "{output:?}");
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["name"], "age");
    assert_eq!(json[0]["type"], "integer");
}

#[test]
fn test_test_type() {
    let output = synthgen(&["test-type", "--expression", "1+1"]);
    assert!(output.status.success(), "{output:?}");
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json, serde_json::json!({"success": true, "sample_value": 2}));

    let failed = synthgen(&["test-type", "--expression", "1/0"]);
    assert!(!failed.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&failed)).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error_kind"], "division_by_zero");
}

#[test]
fn test_functions_listing() {
    let output = synthgen(&["functions"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("random.int(min, max)"));
    assert!(text.contains("faker.email"));
    assert!(text.contains("Builtin data types"));
    for data_type in ["integer", "datetime", "uuid"] {
        assert!(text.lines().any(|line| line.trim_start().starts_with(data_type)), "{data_type}");
    }
}
