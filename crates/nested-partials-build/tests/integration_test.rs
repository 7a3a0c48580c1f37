//! Integration tests for nested-partials-build.

use nested_partials_build::{GenerateError, TargetsConfig, generate, synthesize_all};
use std::fs;
use tempfile::TempDir;
use tracing_test::traced_test;

const MODELS: &str = r#"
[[target]]
namespace = "App.Models"
types = [{ name = "Outer" }, { name = "Inner" }]
members = ["int fieldX;"]

[[target]]
types = [{ name = "Widget" }]
bases = ["IWidget"]
"#;

/// Create a temp directory with targets.toml
fn setup_config(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("targets.toml");
    fs::write(&config_path, content).unwrap();
    (dir, config_path)
}

#[test]
fn writes_one_file_per_target() {
    let (dir, config_path) = setup_config(MODELS);
    let output_dir = dir.path().join("generated");

    let paths = generate(&config_path, &output_dir).unwrap();

    assert_eq!(
        paths,
        [
            output_dir.join("App.Models.Outer.Inner.g.cs"),
            output_dir.join("Widget.g.cs"),
        ]
    );

    let models = fs::read_to_string(&paths[0]).unwrap();
    assert_eq!(
        models,
        "\
// <auto-generated/>
#pragma warning disable
#nullable enable
namespace App.Models
{
    partial class Outer
    {
        partial class Inner
        {
            int fieldX;
        }
    }
}
"
    );

    let widget = fs::read_to_string(&paths[1]).unwrap();
    assert!(widget.contains("partial class Widget : IWidget\n{\n}\n"));
    assert!(!widget.contains("namespace"));
}

#[test]
fn regeneration_is_byte_identical() {
    let (dir, config_path) = setup_config(MODELS);
    let first_dir = dir.path().join("first");
    let second_dir = dir.path().join("second");

    let first = generate(&config_path, &first_dir).unwrap();
    let second = generate(&config_path, &second_dir).unwrap();

    for (a, b) in first.iter().zip(&second) {
        assert_eq!(fs::read(a).unwrap(), fs::read(b).unwrap());
    }
}

#[test]
fn unchanged_files_are_not_rewritten() {
    let (dir, config_path) = setup_config(MODELS);
    let output_dir = dir.path().join("generated");

    let paths = generate(&config_path, &output_dir).unwrap();
    let before = fs::metadata(&paths[0]).unwrap().modified().unwrap();

    std::thread::sleep(std::time::Duration::from_millis(20));
    generate(&config_path, &output_dir).unwrap();

    let after = fs::metadata(&paths[0]).unwrap().modified().unwrap();
    assert_eq!(before, after);
}

#[test]
fn changed_members_rewrite_the_file() {
    let (dir, config_path) = setup_config(MODELS);
    let output_dir = dir.path().join("generated");
    generate(&config_path, &output_dir).unwrap();

    fs::write(&config_path, MODELS.replace("int fieldX;", "int fieldY;")).unwrap();
    let paths = generate(&config_path, &output_dir).unwrap();

    let models = fs::read_to_string(&paths[0]).unwrap();
    assert!(models.contains("int fieldY;"));
    assert!(!models.contains("int fieldX;"));
}

#[test]
fn format_options_apply_to_output() {
    let (dir, config_path) = setup_config(
        r#"
suffix = "Props.g"

[format]
indent_width = 2
line_ending = "crlf"

[[target]]
namespace = "N"
types = [{ name = "Box", kind = "struct", type_parameters = ["T"] }]
members = ["T value;"]
"#,
    );
    let output_dir = dir.path().join("out");

    let paths = generate(&config_path, &output_dir).unwrap();
    assert_eq!(paths, [output_dir.join("N.Box`1.Props.g.cs")]);

    let text = fs::read_to_string(&paths[0]).unwrap();
    assert!(text.contains("namespace N\r\n{\r\n  partial struct Box<T>\r\n  {\r\n    T value;\r\n  }\r\n}\r\n"));
}

#[test]
fn multi_line_members_keep_their_shape() {
    let config = TargetsConfig::from_str(
        r#"
[[target]]
namespace = "App"
types = [{ name = "Counter" }]
members = [
    """
        private int _count;
    """,
    """
        public void Reset()
        {
            _count = 0;
        }
    """,
]
"#,
    )
    .unwrap();

    let sources = synthesize_all(&config);
    assert_eq!(sources.len(), 1);
    assert!(sources[0].text.contains(
        "    partial class Counter\n    {\n        private int _count;\n\n        public void Reset()\n        {\n            _count = 0;\n        }\n    }\n"
    ));
}

#[test]
fn synthesize_all_keeps_config_order() {
    let targets: String = (0..32)
        .map(|i| format!("[[target]]\ntypes = [{{ name = \"T{i}\" }}]\n"))
        .collect();
    let config = TargetsConfig::from_str(&targets).unwrap();

    let names: Vec<_> = synthesize_all(&config)
        .into_iter()
        .map(|s| s.hint_name)
        .collect();
    let expected: Vec<_> = (0..32).map(|i| format!("T{i}.g.cs")).collect();
    assert_eq!(names, expected);
}

#[test]
fn missing_config_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let result = generate(dir.path().join("nope.toml"), dir.path().join("out"));

    match result.unwrap_err() {
        GenerateError::Config(e) => assert!(e.to_string().contains("nope.toml")),
        other => panic!("Expected Config error, got: {:?}", other),
    }
    assert!(!dir.path().join("out").exists());
}

#[test]
fn invalid_target_writes_nothing() {
    let (dir, config_path) = setup_config(
        r#"
[[target]]
types = [{ name = "Good" }]

[[target]]
types = [{ name = "Bad-Name" }]
"#,
    );
    let output_dir = dir.path().join("generated");

    let err = generate(&config_path, &output_dir).unwrap_err();
    assert!(err.to_string().contains("target[1]"));
    assert!(!output_dir.exists());
}

#[test]
fn unwritable_output_is_an_io_error() {
    let (dir, config_path) = setup_config(MODELS);
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    match generate(&config_path, &blocker).unwrap_err() {
        GenerateError::Io { path, .. } => assert_eq!(path, blocker),
        other => panic!("Expected Io error, got: {:?}", other),
    }
}

#[test]
#[traced_test]
fn logs_each_written_file() {
    let (dir, config_path) = setup_config(MODELS);
    let output_dir = dir.path().join("generated");

    generate(&config_path, &output_dir).unwrap();
    assert!(logs_contain("wrote generated source"));
    assert!(logs_contain("Widget.g.cs"));

    generate(&config_path, &output_dir).unwrap();
    assert!(logs_contain("generated source unchanged"));
}
