//! Integration tests for tree_bundle


use harness::{run_tool, TestDir};
use std::fs;

fn rule() -> String {
    "=".repeat(80)
}

#[test]
fn test_default_run_writes_both_outputs() {
    let dir = TestDir::new();
    dir.add_file("src/main.py", "print('hello')\n");
    dir.add_file(".git/config", "[core]\n");
    dir.add_file("node_modules/x.js", "module.exports = 1;\n");

    let (_stdout, stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let tree = dir.read("tree.txt");
    assert!(tree.starts_with(&dir.root_header()));
    assert!(tree.contains("src/"));
    assert!(tree.contains("main.py"));
    assert!(!tree.contains(".git"), "tree should omit .git: {}", tree);

    let bundle = dir.read("all_texts.txt");
    assert!(bundle.contains("FILE: src/main.py"));
    assert!(bundle.contains("print('hello')"));
    assert!(!bundle.contains("node_modules/x.js"));
    assert!(!bundle.contains("[core]"));
}

#[test]
fn test_exact_tree_output() {
    let dir = TestDir::new();
    dir.add_dir("B");
    dir.add_dir("A");
    dir.add_file("A/inner.txt", "inner");
    dir.add_file("a.txt", "top");

    let (_stdout, stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let expected = format!(
        "{}\n├── A/\n│   └── inner.txt\n├── B/\n└── a.txt",
        dir.root_header()
    );
    assert_eq!(dir.read("tree.txt"), expected);

    let bundle = dir.read("all_texts.txt");
    let expected = format!(
        "\n\n{r}\nFILE: A/inner.txt\n{r}\ninner\n\n{r}\nFILE: a.txt\n{r}\ntop",
        r = rule()
    );
    assert_eq!(bundle, expected);
}

#[test]
fn test_extensions_and_include_names() {
    let dir = TestDir::new();
    dir.add_file("Dockerfile", "FROM alpine\n");
    dir.add_file("readme.md", "# Title\n");
    dir.add_file("script.py", "print(1)\n");

    let (_stdout, stderr, code) = run_tool(
        &dir,
        &["--exts", ".md", "--include-names", "Dockerfile"],
    );
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let tree = dir.read("tree.txt");
    assert!(tree.contains("script.py"), "script.py stays in the tree");

    let bundle = dir.read("all_texts.txt");
    assert!(bundle.contains("FILE: Dockerfile"));
    assert!(bundle.contains("FILE: readme.md"));
    assert!(!bundle.contains("FILE: script.py"));
}

#[test]
fn test_extensions_without_dot_and_mixed_case() {
    let dir = TestDir::new();
    dir.add_file("Notes.MD", "notes");

    let (_stdout, _stderr, code) = run_tool(&dir, &["--exts", " Md , "]);
    assert_eq!(code, Some(0));
    assert!(dir.read("all_texts.txt").contains("FILE: Notes.MD"));
}

#[test]
fn test_extra_excludes_and_ignores() {
    let dir = TestDir::new();
    dir.add_file("keep.py", "keep");
    dir.add_file("build/out.py", "built");
    dir.add_file("lib/__pycache__/mod.py", "cache");
    dir.add_file("lib/vendor.min.sh", "minified");

    let (_stdout, stderr, code) = run_tool(
        &dir,
        &["--exclude", "__pycache__", "--ignore", "build,*.min.sh"],
    );
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let tree = dir.read("tree.txt");
    let bundle = dir.read("all_texts.txt");
    for hidden in ["build", "out.py", "__pycache__", "vendor.min.sh"] {
        assert!(!tree.contains(hidden), "{} should not be in tree", hidden);
        assert!(!bundle.contains(hidden), "{} should not be in bundle", hidden);
    }
    assert!(bundle.contains("FILE: keep.py"));
}

#[test]
fn test_second_run_is_identical() {
    let dir = TestDir::new();
    dir.add_file("docs/guide.txt", "guide");
    dir.add_file("run.sh", "#!/bin/sh\n");

    let (_stdout, _stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0));
    let first_tree = dir.read("tree.txt");
    let first_bundle = dir.read("all_texts.txt");

    let (_stdout, _stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0));
    assert_eq!(dir.read("tree.txt"), first_tree);
    assert_eq!(dir.read("all_texts.txt"), first_bundle);
    assert!(!first_tree.contains("tree.txt"));
    assert!(!first_bundle.contains("FILE: all_texts.txt"));
}

#[test]
fn test_custom_output_names_are_skipped() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "a");

    let args = ["--out", "listing.txt", "--bundle", "bundle.txt"];
    let (_stdout, _stderr, code) = run_tool(&dir, &args);
    assert_eq!(code, Some(0));
    let (_stdout, _stderr, code) = run_tool(&dir, &args);
    assert_eq!(code, Some(0));

    let tree = dir.read("listing.txt");
    assert!(!tree.contains("listing.txt"));
    assert!(!tree.contains("bundle.txt"));
    let bundle = dir.read("bundle.txt");
    assert_eq!(bundle.matches("FILE: ").count(), 1);
}

#[test]
fn test_explicit_root_argument() {
    let dir = TestDir::new();
    dir.add_file("project/app.py", "app");

    let (_stdout, stderr, code) = run_tool(&dir, &["--root", "project"]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let tree = dir.read("tree.txt");
    assert_eq!(tree, "project/\n└── app.py");
    assert!(dir.read("all_texts.txt").contains("FILE: app.py"));
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let dir = TestDir::new();
    fs::write(dir.path().join("data.txt"), b"head\xffend").unwrap();

    let (_stdout, _stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0));
    assert!(dir.read("all_texts.txt").ends_with("head\u{FFFD}end"));
}

#[test]
fn test_missing_root_fails() {
    let dir = TestDir::new();

    let (_stdout, stderr, code) = run_tool(&dir, &["--root", "does-not-exist"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("Root is not a directory"), "{}", stderr);
}

#[test]
fn test_unclosed_bracket_pattern_is_literal() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "a");
    dir.add_file("[oops", "bracket");

    let (_stdout, stderr, code) = run_tool(&dir, &["--ignore", "[oops"]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let tree = dir.read("tree.txt");
    assert!(!tree.contains("[oops"), "{}", tree);
    assert!(tree.contains("a.txt"));
}

#[test]
fn test_unparseable_pattern_does_not_abort() {
    let dir = TestDir::new();
    dir.add_file("a.txt", "a");
    dir.add_file("{x.txt", "brace");

    let (_stdout, stderr, code) = run_tool(&dir, &["--ignore", "{x.txt"]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);
    assert!(stderr.contains("as literal text"), "{}", stderr);

    let bundle = dir.read("all_texts.txt");
    assert!(bundle.contains("FILE: a.txt"));
    assert!(!bundle.contains("{x.txt"));
}

#[test]
fn test_status_is_logged() {
    let dir = TestDir::new();
    dir.add_file("a.py", "a");
    dir.add_file("b.sql", "b");

    let (_stdout, stderr, code) = run_tool(&dir, &[]);
    assert_eq!(code, Some(0));
    assert!(stderr.contains("Collected 2 file(s) for bundling."), "{}", stderr);
    assert!(stderr.contains("Auto excludes: .git, .idea, .venv, venv"));
    assert!(stderr.contains("Done."));
}

#[test]
fn test_preset_from_home_config() {
    let dir = TestDir::new();
    dir.add_file("schema.graphql", "type Query");
    dir.add_file("skip.py", "skip");
    let config_dir = dir.home().join(".config").join("tree_bundle");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("presets.toml"),
        "[api]\nexts = [\".graphql\"]\nignore = [\"*.py\"]\n",
    )
    .unwrap();

    let (_stdout, stderr, code) = run_tool(&dir, &["--preset", "api"]);
    assert_eq!(code, Some(0), "should succeed: {}", stderr);

    let bundle = dir.read("all_texts.txt");
    assert!(bundle.contains("FILE: schema.graphql"));
    assert!(!dir.read("tree.txt").contains("skip.py"));
}
