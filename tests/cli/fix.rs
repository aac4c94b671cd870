use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, PAGE, json_at};

#[test]
fn test_fix_dry_run_previews_writes() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["fix"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(
        r#"+ locales/pt/m1/p1.json: intro = "Bem-vindo ao <strong>curso</strong>"  markup"#
    ));
    assert!(
        output
            .stdout
            .contains(r#"+ locales/pt/m1/p1.json: search = "Pesquisar"  markup"#)
    );
    assert!(output.stdout.contains("Would write 2 values in 1 file:"));
    assert!(output.stdout.contains("  - markup: 2"));
    assert!(output.stdout.contains("Run with --apply to write these values."));

    let store = test.read_file("locales/pt/m1/p1.json")?;
    assert_eq!(store, r#"{ "title": "Introdução" }"#);

    Ok(())
}

#[test]
fn test_fix_apply_writes_extracted_values() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["fix", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 2 values in 1 file (planned 2)."));

    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(store["title"], "Introdução");
    assert_eq!(store["intro"], "Bem-vindo ao <strong>curso</strong>");
    assert_eq!(store["search"], "Pesquisar");

    let again = test.run(&["fix"])?;
    assert_eq!(again.code, Some(0));
    assert!(again.stdout.contains("✓ Nothing to write"));

    Ok(())
}

#[test]
fn test_fix_creates_missing_store() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/pt/other.json", "{}")?;
    std::fs::remove_file(test.root().join("locales/pt/m1/p1.json"))?;

    let output = test.run(&["fix", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(json_at(&store, "title").and_then(|v| v.as_str()), Some("Introdução"));
    assert_eq!(json_at(&store, "search").and_then(|v| v.as_str()), Some("Pesquisar"));

    Ok(())
}

#[test]
fn test_fix_prefers_overrides() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        ".pageglotrc.json",
        r#"{ "locales": ["pt", "en"], "overrides": { "m1.p1.intro": "Olá!" } }"#,
    )?;

    let output = test.run(&["fix", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(store["intro"], "Olá!");
    assert_eq!(store["search"], "Pesquisar");

    Ok(())
}

#[test]
fn test_fix_reports_extraction_failures() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "paginas/pt/m1/p1.html",
        &PAGE.replace("</body>", "  <span data-i18n=\"m1.p1.empty\"></span>\n</body>"),
    )?;

    let output = test.run(&["fix"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"warning: "m1.p1.empty"  extraction-failed"#));
    assert!(output.stdout.contains("add the value to 'overrides' in the config file"));
    assert!(output.stdout.contains("  - failed: 1 key (no content found)"));

    let applied = test.run(&["fix", "--apply"])?;
    assert_eq!(applied.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert!(store.get("empty").is_none());

    Ok(())
}

#[test]
fn test_fix_from_saved_report() -> Result<()> {
    let test = CliTest::site()?;
    test.run(&["check", "--output", "audit.json", "--locale", "pt"])?;

    let output = test.run(&["fix", "--report", "audit.json", "--apply"])?;

    assert_eq!(output.code, Some(0));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(store["intro"], "Bem-vindo ao <strong>curso</strong>");
    assert_eq!(store["search"], "Pesquisar");

    Ok(())
}

#[test]
fn test_fix_from_single_locale_issues_report() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "tools/i18n-issues-report.json",
        r#"{
  "summary": {
    "total_pages": 1,
    "pages_ok": 0,
    "pages_with_issues": 1,
    "total_missing_keys": 2
  },
  "issues": [
    {
      "title": "Introdução",
      "file": "paginas/pt/m1/p1.html",
      "json": "m1/p1.json",
      "missing": [
        { "html_key": "[html]m1.p1.intro", "json_key": "intro" },
        { "html_key": "[placeholder]m1.p1.search", "json_key": "search", "empty": true }
      ]
    }
  ]
}"#,
    )?;

    let output = test.run(&["fix", "--report", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 2 values in 1 file (planned 2)."));
    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(store["title"], "Introdução");
    assert_eq!(store["intro"], "Bem-vindo ao <strong>curso</strong>");
    assert_eq!(store["search"], "Pesquisar");

    Ok(())
}

#[test]
fn test_fix_missing_report_fails() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["fix", "--report"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read audit report"));

    Ok(())
}
