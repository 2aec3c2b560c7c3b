use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

const RULES: &str = "abandonned->abandoned\nteh->the\nclas->class, disabled due to class keyword\n";

struct Fixture {
    tree: TempDir,
    home: TempDir,
    dictionary: PathBuf,
}

fn fixture(rules: &str) -> Fixture {
    let tree = tempdir().unwrap();
    let home = tempdir().unwrap();
    let dictionary = home.path().join("dictionary.txt");
    fs::write(&dictionary, rules).unwrap();

    let root = tree.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("README"), "He Abandonned it.\n").unwrap();
    fs::write(root.join("src/lib.rs"), "// clas for teh win\n").unwrap();
    fs::write(root.join(".git/README"), "abandonned\n").unwrap();

    Fixture {
        tree,
        home,
        dictionary,
    }
}

#[allow(deprecated)]
fn spellfix(fx: &Fixture) -> Command {
    let mut cmd = Command::cargo_bin("spellfix").expect("binary");
    cmd.current_dir(fx.tree.path())
        .env("XDG_CONFIG_HOME", fx.home.path())
        .env("XDG_DATA_HOME", fx.home.path())
        .env_remove("SPELLFIX_DICTIONARY")
        .env_remove("RUST_LOG")
        .arg("--no-color")
        .arg("--dictionary")
        .arg(&fx.dictionary);
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("command run");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).unwrap()
}

fn rel(path: &str) -> String {
    Path::new(".").join(path).display().to_string()
}

#[test]
fn reports_case_adapted_fix_with_line() {
    let fx = fixture(RULES);
    let stdout = stdout_of(&mut spellfix(&fx));

    assert!(stdout.contains(&format!("{}:1: Abandonned ==> Abandoned", rel("README"))));
    assert!(stdout.contains("teh ==> the"));
    assert!(!stdout.contains(".git"));
    assert!(!stdout.contains("clas"));
}

#[test]
fn whitespace_tokenizer_omits_line_numbers() {
    let fx = fixture(RULES);
    let stdout = stdout_of(spellfix(&fx).args(["--tokenizer", "whitespace", "README"]));

    assert_eq!(stdout.trim(), "README: Abandonned ==> Abandoned");
}

#[test]
fn all_flag_reports_candidates_with_reason() {
    let fx = fixture(RULES);
    let stdout = stdout_of(spellfix(&fx).args(["--all", "src"]));

    assert!(stdout.contains("clas ==> class (disabled due to class keyword)"));
}

#[test]
fn json_output_lists_findings() {
    let fx = fixture(RULES);
    let stdout = stdout_of(spellfix(&fx).args(["--format", "json"]));

    let body: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(body["total_findings"], 2);
    assert_eq!(body["files_scanned"], 2);
    let words: Vec<&str> = body["findings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["word"].as_str().unwrap())
        .collect();
    assert!(words.contains(&"Abandonned"));
    assert!(words.contains(&"teh"));
}

#[test]
fn binary_files_are_skipped() {
    let fx = fixture(RULES);
    fs::write(fx.tree.path().join("image.png"), b"\x89PNG\x00 teh abandonned").unwrap();

    let stdout = stdout_of(spellfix(&fx).arg("image.png"));
    assert!(stdout.is_empty());
}

#[test]
fn missing_dictionary_exits_with_code_2() {
    let fx = fixture(RULES);
    fs::remove_file(&fx.dictionary).unwrap();

    spellfix(&fx)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Failed to read dictionary"));
}

#[test]
fn malformed_rules_are_reported_and_skipped() {
    let fx = fixture("this line has no arrow\nteh->the\n");

    spellfix(&fx)
        .arg("src")
        .assert()
        .success()
        .stdout(predicate::str::contains("teh ==> the"))
        .stderr(predicate::str::contains("malformed dictionary line 1"));
}

#[test]
fn dict_info_summarizes_rules() {
    let fx = fixture("teh->the\nbroken\nclas->class,\n");

    spellfix(&fx)
        .args(["dict", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rules:      2"))
        .stdout(predicate::str::contains("Autofix:    1"))
        .stdout(predicate::str::contains("Malformed lines: 2"));
}
