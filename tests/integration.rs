use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_tfdocs-extras")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let input = std::fs::read_to_string(fixture_path("variables.json")).unwrap();
    let output = stdout_of(cmd().write_stdin(input).assert().success());

    assert!(output.starts_with("### Required Inputs\n"));
    assert!(output.contains("| `region` | `string` |  | Region to deploy into |"));
    assert!(output.contains(
        "| `user_config` | object([UserConfig](#userconfig)) |  | Primary user settings |"
    ));
    assert!(output.contains(
        "| `instance_config` | map(object([InstanceConfig](#instanceconfig))) | `{}` | Per-instance overrides |"
    ));
    assert!(output.ends_with("[console]: https://example.com/console\n"));
}

#[test]
fn stdin_mode_nested_tables() {
    let input = std::fs::read_to_string(fixture_path("variables.json")).unwrap();
    let output = stdout_of(cmd().write_stdin(input).assert().success());

    assert!(output.contains("### Nested Types\n"));
    assert!(output.contains("#### UserConfig\n"));
    assert!(output.contains("#### Mail\n\nMail settings\n\n* **See:** <https://example.com/mail>\n"));
    assert!(output.contains("#### InstanceConfig\n"));

    assert!(output.contains("| `name` | `string` |  | Display name shown in the console |"));
    assert!(output.contains(
        "| `tier` | `string` | `\"free\"` | Account tier<br>**Enum:** free \\| pro |"
    ));
    assert!(output.contains("| `mail` | object([Mail](#mail)) |  | Mail settings<br>"));
    assert!(output.contains("| `verified` | `bool` | `false` |  |"));
    assert!(output.contains("| `tags` | `map(string)` | `{}` |  |"));
}

#[test]
fn stdin_json_format() {
    let input = std::fs::read_to_string(fixture_path("variables.json")).unwrap();
    let output = stdout_of(cmd().args(["-f", "json"]).write_stdin(input).assert().success());

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["required_inputs"]["rows"][1]["complex_type"], "UserConfig");
    assert_eq!(value["optional_inputs"]["rows"][0]["type"], "map(object(InstanceConfig))");
    assert_eq!(value["nested_inputs"]["Mail"]["rows"][0]["name"], "address");
    assert_eq!(
        value["nested_inputs"]["UserConfig"]["rows"][1]["attributes"][0]["name"],
        "Enum"
    );
}

#[test]
fn invalid_json_fails() {
    cmd()
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid variables JSON"));
}

#[test]
fn invalid_format_fails() {
    cmd()
        .args(["-f", "html"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn unparseable_type_falls_back_to_raw_string() {
    let output = stdout_of(
        cmd()
            .arg(fixture_path("broken.json"))
            .assert()
            .success()
            .stderr(predicate::str::contains("type expression not documented")),
    );
    assert!(output.contains("| `broken` | `map(` |  | Never closed |"));
    assert!(!output.contains("### Nested Types"));
}

// -- document mode --

#[test]
fn readme_mode_replaces_marked_region() {
    let dir = TempDir::new().unwrap();
    let readme = dir.path().join("README.md");
    std::fs::copy(fixture_path("README.md"), &readme).unwrap();

    cmd()
        .arg(fixture_path("variables.json"))
        .arg("-r")
        .arg(&readme)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&readme).unwrap();
    assert!(content.starts_with("# Example module\n\nHand-written introduction.\n\n"));
    assert!(content.contains("<!-- TFDOCS_EXTRAS_START -->\n### Required Inputs\n"));
    assert!(content.contains("[console]: https://example.com/console\n<!-- TFDOCS_EXTRAS_END -->"));
    assert!(content.ends_with("## License\n\nMIT\n"));
    assert!(!content.contains("stale content"));
}

#[test]
fn readme_mode_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let readme = dir.path().join("README.md");
    std::fs::copy(fixture_path("README.md"), &readme).unwrap();

    cmd()
        .arg(fixture_path("variables.json"))
        .arg("--readme")
        .arg(&readme)
        .assert()
        .success();
    let first = std::fs::read_to_string(&readme).unwrap();

    cmd()
        .arg(fixture_path("variables.json"))
        .arg("--readme")
        .arg(&readme)
        .assert()
        .success();
    assert_eq!(std::fs::read_to_string(&readme).unwrap(), first);
}

#[test]
fn readme_without_markers_fails() {
    let dir = TempDir::new().unwrap();
    let readme = dir.path().join("README.md");
    std::fs::write(&readme, "# No markers here\n").unwrap();

    cmd()
        .arg(fixture_path("variables.json"))
        .arg("-r")
        .arg(&readme)
        .assert()
        .failure()
        .stderr(predicate::str::contains("start marker"));

    assert_eq!(
        std::fs::read_to_string(&readme).unwrap(),
        "# No markers here\n"
    );
}

#[test]
fn custom_markers() {
    let dir = TempDir::new().unwrap();
    let readme = dir.path().join("README.md");
    std::fs::write(&readme, "top\n<!-- BEGIN -->\n<!-- END -->\nbottom\n").unwrap();

    cmd()
        .arg(fixture_path("variables.json"))
        .args(["-r", readme.to_str().unwrap()])
        .args(["--start-marker", "<!-- BEGIN -->", "--end-marker", "<!-- END -->"])
        .assert()
        .success();

    let content = std::fs::read_to_string(&readme).unwrap();
    assert!(content.starts_with("top\n<!-- BEGIN -->\n### Required Inputs\n"));
    assert!(content.ends_with("<!-- END -->\nbottom\n"));
}

// -- expression mode --

#[test]
fn expr_mode_prints_tree() {
    let output = stdout_of(
        cmd()
            .args(["--expr", "map(object({ /// Size\n size = optional(string, \"small\") }))"])
            .args(["--name", "instance_config"])
            .assert()
            .success(),
    );

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["name"], "instance_config");
    assert_eq!(value["collection_prefix"], "map");
    assert_eq!(value["nested_type_name"], "InstanceConfig");
    assert_eq!(value["children"][0]["name"], "size");
    assert_eq!(value["children"][0]["optional"], true);
    assert_eq!(value["children"][0]["default_value"], "\"small\"");
}

#[test]
fn expr_mode_primitive_prints_null() {
    cmd()
        .args(["--expr", "string"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn expr_mode_syntax_error_fails() {
    cmd()
        .args(["--expr", "map("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1:5"));
}

#[test]
fn expr_mode_rejects_duplicate_keys_on_request() {
    let expr = "object({ a = string a = bool })";

    cmd().args(["--expr", expr]).assert().success();

    cmd()
        .args(["--expr", expr, "--reject-duplicate-keys"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate property key"));
}

#[test]
fn expr_mode_depth_limit() {
    cmd()
        .args(["--expr", "list(list(list(string)))", "--max-depth", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nesting deeper than 2 levels"));
}

#[test]
fn max_depth_above_ceiling_is_rejected() {
    cmd()
        .args(["--expr", "string", "--max-depth", "1000000"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--max-depth"));
}
