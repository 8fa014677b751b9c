use std::io::Write;
use std::process::{Command, Stdio};

/// Helper function to run gramattr with a DSL string and stdin content
fn run_gramattr(args: &[&str], stdin_content: &str) -> Result<String, String> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_gramattr"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(stdin_content.as_bytes())
            .map_err(|e| format!("Failed to write to stdin: {}", e))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| format!("Failed to wait for process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn parse_json(out: &str) -> serde_json::Value {
    serde_json::from_str(out).expect("Output is not valid JSON")
}

const SALES: &str = "letter,num\na,1\nb,2\na,1\nc,3\n";

#[test]
fn test_end_to_end_color_cycle() {
    let out = run_gramattr(&[r#"color(letter, palette: ["red", "blue"])"#], SALES).unwrap();
    let json = parse_json(&out);
    let assignments = json[0]["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 3);
    assert_eq!(assignments[0]["key"], serde_json::json!(["a"]));
    assert_eq!(assignments[0]["value"], "red");
    assert_eq!(assignments[1]["value"], "blue");
    assert_eq!(assignments[2]["value"], "red");
}

#[test]
fn test_end_to_end_descending_markers() {
    let out = run_gramattr(&["marker(letter, ascending: false)"], SALES).unwrap();
    let json = parse_json(&out);
    assert_eq!(json[0]["attribute"], "marker");
    assert_eq!(json[0]["assignments"][0]["key"], serde_json::json!(["c"]));
    assert_eq!(json[0]["assignments"][0]["value"], "circle");
}

#[test]
fn test_end_to_end_multiple_attributes() {
    let out = run_gramattr(&["color(letter) | dash(num) | cat([num, letter])"], SALES).unwrap();
    let json = parse_json(&out);
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[1]["attribute"], "dash");
    assert_eq!(json[2]["attribute"], "nest");
    assert_eq!(json[2]["levels"], serde_json::json!([1, 0]));
    assert_eq!(json[2]["assignments"][0]["value"], serde_json::json!([1.0, "a"]));
}

#[test]
fn test_end_to_end_table_format() {
    let out = run_gramattr(
        &["--format", "table", r#"color(letter, palette: ["red"])"#],
        SALES,
    )
    .unwrap();
    assert!(out.starts_with("color [letter] default=red"));
    assert_eq!(out.lines().count(), 4);
}

#[test]
fn test_end_to_end_json_input() {
    let input = r#"[{"region": "North"}, {"region": "South"}, {"region": "North"}]"#;
    let out = run_gramattr(&["--input-format", "json", "color(region)"], input).unwrap();
    let json = parse_json(&out);
    assert_eq!(json[0]["assignments"].as_array().unwrap().len(), 2);
    assert_eq!(json[0]["assignments"][0]["value"], "#f22c40");
}

#[test]
fn test_end_to_end_invalid_syntax() {
    let result = run_gramattr(&["invalid syntax here"], SALES);
    assert!(result.is_err(), "Should have failed with parse error");
    assert!(result.unwrap_err().contains("Parse error"));
}

#[test]
fn test_end_to_end_column_not_found() {
    let result = run_gramattr(&["color(region)"], SALES);
    assert!(result.is_err(), "Should have failed with column not found");
    assert!(result.unwrap_err().contains("Invalid columns"));
}

#[test]
fn test_end_to_end_empty_csv() {
    let result = run_gramattr(&["color(letter)"], "letter,num\n");
    assert!(result.is_err(), "Should have failed with empty CSV error");
    assert!(result.unwrap_err().contains("at least one data row"));
}

#[test]
fn test_end_to_end_empty_palette() {
    let result = run_gramattr(&["color(letter, palette: [])"], SALES);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("is empty"));
}
