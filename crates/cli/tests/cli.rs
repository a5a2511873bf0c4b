//! End-to-end checks of the `bookshelf` binary.

use assert_cmd::Command;

fn bookshelf() -> Command {
    let mut cmd = Command::cargo_bin("bookshelf").unwrap();
    cmd.env("BOOKSHELF_ENV", "local")
        .env("BOOKSHELF_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn openapi_prints_book_paths() {
    let output = bookshelf().arg("openapi").assert().success().get_output().stdout.clone();

    let spec: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(spec["info"]["title"], "Bookshelf API");
    assert!(spec["paths"]["/books"]["get"].is_object());
    assert!(spec["paths"]["/books/{bookId}"]["put"].is_object());
    assert!(spec["paths"]["/healthz"]["get"].is_object());
}

#[test]
fn modules_lists_health_then_books() {
    bookshelf()
        .arg("modules")
        .assert()
        .success()
        .stdout("health\t/\nbooks\t/\n");
}

#[test]
fn unknown_environment_fails() {
    bookshelf()
        .env("BOOKSHELF_ENV", "qa")
        .arg("modules")
        .assert()
        .failure();
}
