//! End-to-end tests driving the `stencil` binary in non-interactive mode

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn template() -> TempDir {
    let src = TempDir::new().unwrap();
    write(
        src.path(),
        "config.json",
        r#"{"Name": "World", "project": "app"}"#,
    );
    write(src.path(), "a.txt", "Hello {{.Name}}");
    write(src.path(), "sub/b.txt", "{{.Name}} again");
    write(src.path(), "{{project}}/main.txt", "project {{project}}");
    src
}

fn stencil() -> Command {
    Command::cargo_bin("stencil").unwrap()
}

#[test]
fn test_missing_template_flag_exits_1() {
    stencil()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--template"));
}

#[test]
fn test_empty_destination_flag_exits_1() {
    let src = template();
    stencil()
        .arg("--template")
        .arg(src.path())
        .args(["--destination", "", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--destination"));
}

#[test]
fn test_renders_tree_with_defaults() {
    let src = template();
    let dest = TempDir::new().unwrap();

    stencil()
        .arg("--template")
        .arg(src.path())
        .arg("--destination")
        .arg(dest.path())
        .arg("--yes")
        .assert()
        .success();

    let out = dest.path();
    assert_eq!(fs::read_to_string(out.join("a.txt")).unwrap(), "Hello World");
    assert_eq!(
        fs::read_to_string(out.join("sub/b.txt")).unwrap(),
        "World again"
    );
    assert_eq!(
        fs::read_to_string(out.join("app/main.txt")).unwrap(),
        "project app"
    );
    assert!(!out.join("config.json").exists());
}

#[test]
fn test_destination_defaults_to_working_directory() {
    let src = template();
    let cwd = TempDir::new().unwrap();

    stencil()
        .current_dir(cwd.path())
        .arg("-t")
        .arg(src.path())
        .arg("-y")
        .assert()
        .success();

    assert!(cwd.path().join("a.txt").is_file());
}

#[test]
fn test_rerun_overwrites_existing_files() {
    let src = template();
    let dest = TempDir::new().unwrap();
    write(dest.path(), "a.txt", "stale content from an earlier run");

    for _ in 0..2 {
        stencil()
            .arg("-t")
            .arg(src.path())
            .arg("-d")
            .arg(dest.path())
            .arg("-y")
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(dest.path().join("a.txt")).unwrap(),
        "Hello World"
    );
}

#[test]
fn test_missing_config_exits_1() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(src.path(), "a.txt", "hi");

    stencil()
        .arg("-t")
        .arg(src.path())
        .arg("-d")
        .arg(dest.path())
        .arg("-y")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config"));

    assert!(!dest.path().join("a.txt").exists());
}

#[test]
fn test_undefined_key_exits_1_without_output() {
    let src = template();
    let dest = TempDir::new().unwrap();
    write(src.path(), "zz.txt", "{{Undefined}}");

    stencil()
        .arg("-t")
        .arg(src.path())
        .arg("-d")
        .arg(dest.path())
        .arg("-y")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to render content template"));

    // Files before the failing one are kept, the failing one is not written
    assert!(dest.path().join("a.txt").is_file());
    assert!(!dest.path().join("zz.txt").exists());
}

#[test]
fn test_bundled_basic_template() {
    let src = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates/basic");
    let dest = TempDir::new().unwrap();

    stencil()
        .arg("-t")
        .arg(&src)
        .arg("-d")
        .arg(dest.path())
        .arg("-y")
        .assert()
        .success();

    let project = dest.path().join("hello-world");
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.starts_with("# hello-world\n"));
    assert!(readme.contains("Maintained by Your Name."));
    assert_eq!(
        fs::read_to_string(project.join(".gitignore")).unwrap(),
        "/target\n"
    );
    assert!(fs::read_to_string(project.join("src/main.rs"))
        .unwrap()
        .contains("Hello from hello-world!"));
}
