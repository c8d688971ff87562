use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

const CATALOG: &str = r#"
[[books]]
isbn = "0441013597"
title = "Dune"
author = "Frank Herbert"
year = 1965

[[books]]
isbn = "0441013597"
title = "Dune"
author = "Frank Herbert"
year = 1965

[[books]]
isbn = "0547928227"
title = "The Hobbit"
author = "J. R. R. Tolkien"
year = 1937
"#;

fn write_home(dir: &Path) {
    let catalog_path = dir.join("catalog.toml");
    fs::write(&catalog_path, CATALOG).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!("catalog_path = {:?}\n", catalog_path.display().to_string()),
    )
    .unwrap();
}

#[test]
fn test_classify_email() {
    cargo_bin_cmd!("shelf")
        .args(["classify", "a@b.com"])
        .assert()
        .success()
        .stdout("email\n");
}

#[test]
fn test_classify_username_cases() {
    for identifier in ["ann", "a@b", "a@@b.com", " a@b.com", "a b@c.com"] {
        cargo_bin_cmd!("shelf")
            .args(["classify", identifier])
            .assert()
            .success()
            .stdout("username\n");
    }
}

#[test]
fn test_search_text_output_dedupes() {
    let dir = tempdir().unwrap();
    write_home(dir.path());

    let output = cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .args(["search", "dune"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("Dune by Frank Herbert (1965)"));
}

#[test]
fn test_search_json_output() {
    let dir = tempdir().unwrap();
    write_home(dir.path());

    let output = cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .args(["search", "TOLKIEN", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let books: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Hobbit");
    assert_eq!(books[0]["year"], 1937);
}

#[test]
fn test_search_no_results() {
    let dir = tempdir().unwrap();
    write_home(dir.path());

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .args(["search", "neuromancer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No books match \"neuromancer\""));
}

#[test]
fn test_search_uses_sample_catalog_by_default() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .args(["search", "amy tan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Kitchen God's Wife"));
}

#[test]
fn test_search_reads_bx_books_csv() {
    let dir = tempdir().unwrap();
    let catalog_path = dir.path().join("BX_Books.csv");
    fs::write(
        &catalog_path,
        b"\"ISBN\";\"Book-Title\";\"Book-Author\";\"Year-Of-Publication\";\"Publisher\"\n\
          \"2070360024\";\"L'\xC9tranger\";\"Albert Camus\";\"1972\";\"Gallimard\"\n\
          \"2070360024\";\"L'\xC9tranger\";\"Albert Camus\";\"1972\";\"Gallimard\"\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("config.toml"),
        format!("catalog_path = {:?}\n", catalog_path.display().to_string()),
    )
    .unwrap();

    let output = cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .args(["search", "camus"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout, "2070360024  L'Étranger by Albert Camus (1972)\n");
}

#[test]
fn test_landing_page_requires_terminal() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shelf")
        .env("SHELF_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
