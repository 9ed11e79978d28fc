//! Snapshot tests for the language listing and wire format.

use assert_cmd::Command;
use insta::{assert_json_snapshot, assert_snapshot};
use langsniff::{Detector, Profile};
use tempfile::TempDir;

#[test]
fn golden_language_listing_is_stable() {
    let cwd = TempDir::new().expect("temp dir");
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("langsniff"));
    cmd.current_dir(cwd.path()).arg("languages");
    let output = cmd.output().expect("run");
    assert!(output.status.success());

    let listing = String::from_utf8(output.stdout).expect("utf8");
    let listing = listing.trim_end();
    assert_snapshot!(listing, @r"
    javascript
    typescript
    python
    java
    csharp
    cpp
    php
    ruby
    go
    rust
    swift
    kotlin
    html
    css
    sql
    shell
    powershell
    perl
    r
    matlab
    c
    ");
}

#[test]
fn golden_detection_result_wire_format() {
    let detector = Detector::for_profile(Profile::Standard).expect("built-in table");
    let result = detector.detect("package main\n\nfunc main() {}\n", None);
    assert_json_snapshot!(result, @r#"
    {
      "name": "go",
      "confidence": 0.98
    }
    "#);
}
