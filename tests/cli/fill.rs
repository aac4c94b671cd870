use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, json_at};

const REFERENCE: &str = r#"{
  "m1": {
    "p1": {
      "title": "Introduction",
      "intro": "Welcome to the <strong>course</strong>"
    }
  }
}"#;

#[test]
fn test_fill_dry_run_from_reference() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", "{}")?;
    test.write_file("ref/en.json", REFERENCE)?;

    let output = test.run(&["fill", "--from", "ref/en.json", "--locale", "en"])?;

    assert_eq!(output.code, Some(1));
    assert!(
        output
            .stdout
            .contains(r#"+ locales/en/m1/p1.json: title = "Introduction"  reference"#)
    );
    assert!(output.stdout.contains("Would write 2 values in 1 file:"));
    assert!(output.stdout.contains("  - reference: 2"));
    assert!(
        output
            .stdout
            .contains("  - skipped: 1 key (no value in the reference store)")
    );
    assert_eq!(test.read_file("locales/en/m1/p1.json")?, "{}");

    Ok(())
}

#[test]
fn test_fill_apply_writes_reference_values() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", "{}")?;
    test.write_file("ref/en.json", REFERENCE)?;

    let output = test.run(&["fill", "--from", "ref/en.json", "--locale", "en", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/en/m1/p1.json")?;
    assert_eq!(store["title"], "Introduction");
    assert_eq!(store["intro"], "Welcome to the <strong>course</strong>");
    assert!(store.get("search").is_none());

    Ok(())
}

#[test]
fn test_fill_uses_configured_reference_store() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        ".pageglotrc.json",
        r#"{ "locales": ["pt", "en"], "referenceStore": "reference.json" }"#,
    )?;
    test.write_file(
        "locales/pt/reference.json",
        r#"{ "m1": { "p1": { "search": "Buscar no curso" } } }"#,
    )?;

    let output = test.run(&["fill", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(
        json_at(&store, "search").and_then(|v| v.as_str()),
        Some("Buscar no curso")
    );
    assert!(store.get("intro").is_none());

    Ok(())
}

#[test]
fn test_fill_skips_placeholder_values() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "ref/pt.json",
        &format!(r#"{{ "intro": "{}" }}"#, crate::TODO),
    )?;

    let output = test.run(&["fill", "--from", "ref/pt.json"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("✓ Nothing to write"));
    assert!(output.stdout.contains("  - skipped: 2 keys"));

    Ok(())
}

#[test]
fn test_fill_without_reference_fails() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["fill"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("No reference store"));

    Ok(())
}

#[test]
fn test_fill_unreadable_reference_fails() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("ref/en.json", "{ not json")?;

    let output = test.run(&["fill", "--from", "ref/en.json"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to load reference store"));

    Ok(())
}

#[test]
fn test_fill_all_replaces_unreferenced_placeholders() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "locales/pt/m1/p1.json",
        &format!(
            r#"{{ "title": "Introdução", "extra": {{ "note": "{}" }} }}"#,
            crate::TODO
        ),
    )?;
    test.write_file(
        "locales/pt/pt.json",
        r#"{ "extra": { "note": "Nota da página" } }"#,
    )?;

    let keys_only = test.run(&["fill", "--from", "locales/pt/pt.json", "--apply"])?;
    assert_eq!(keys_only.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(
        json_at(&store, "extra.note").and_then(|v| v.as_str()),
        Some(crate::TODO)
    );

    let output = test.run(&["fill", "--from", "locales/pt/pt.json", "--all", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(
        json_at(&store, "extra.note").and_then(|v| v.as_str()),
        Some("Nota da página")
    );
    assert_eq!(store["title"], "Introdução");
    let reference = test.read_json("locales/pt/pt.json")?;
    assert_eq!(
        json_at(&reference, "extra.note").and_then(|v| v.as_str()),
        Some("Nota da página")
    );

    Ok(())
}
