use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, MANIFEST, PAGE, TODO, json_at};

#[test]
fn test_check_reports_missing_keys() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "[html]m1.p1.intro"  missing-key"#));
    assert!(output.stdout.contains(r#"error: "[placeholder]m1.p1.search"  missing-key"#));
    assert!(output.stdout.contains("--> paginas/pt/m1/p1.html:5:"));
    assert!(
        output
            .stdout
            .contains(r#"note: "intro" not found in locales/pt/m1/p1.json (pt)"#)
    );
    assert!(output.stdout.contains("2 problems (2 errors, 0 warnings)"));
    assert!(!output.stdout.contains("m1.p1.title\""));

    Ok(())
}

#[test]
fn test_check_prints_locale_table() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["check"])?;

    let pt_row = output
        .stdout
        .lines()
        .find(|line| line.starts_with("pt "))
        .unwrap_or_default();
    assert_eq!(
        pt_row.split_whitespace().collect::<Vec<_>>(),
        ["pt", "1", "0", "1", "2"]
    );
    assert!(output.stdout.contains("(no stores)"));
    assert!(output.stdout.contains("Pages with most unresolved keys (pt):"));
    assert!(output.stdout.contains("Introdução (m1/p1.html)"));

    Ok(())
}

#[test]
fn test_check_clean_site() -> Result<()> {
    let test = CliTest::site()?;
    let complete = r#"{ "title": "Intro", "intro": "Welcome", "search": "Search" }"#;
    test.write_file("locales/pt/m1/p1.json", complete)?;
    test.write_file("locales/en/m1/p1.json", complete)?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("✓ Checked 1 page across 2 locales - no issues found")
    );

    Ok(())
}

#[test]
fn test_check_unfilled_and_empty_are_warnings() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "locales/pt/m1/p1.json",
        &format!(r#"{{ "title": "  ", "intro": "{TODO}", "search": "Pesquisar" }}"#),
    )?;

    let output = test.run(&["check", "--locale", "pt"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains(r#"warning: "m1.p1.title"  empty-value"#));
    assert!(output.stdout.contains(r#"warning: "[html]m1.p1.intro"  unfilled-value"#));
    assert!(output.stdout.contains("2 problems (0 errors, 2 warnings)"));

    Ok(())
}

#[test]
fn test_check_missing_store_is_one_issue_per_page() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/other.json", "{}")?;

    let output = test.run(&["check", "--locale", "en"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("store-missing"));
    assert!(output.stdout.contains("--> locales/en/m1/p1.json"));
    assert!(
        output
            .stdout
            .contains("3 key(s) of paginas/pt/m1/p1.html unresolved (en)")
    );

    Ok(())
}

#[test]
fn test_check_writes_audit_report() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["check", "--output"])?;

    assert!(output.stdout.contains("Saved audit report to"));
    let report = test.read_json("tools/i18n-issues-report.json")?;
    assert_eq!(json_at(&report, "locales").and_then(|l| l.as_array()).map(Vec::len), Some(2));

    let pt = &report["locales"][0];
    assert_eq!(pt["language"], "pt");
    assert_eq!(pt["total_missing_keys"], 2);
    let missing = &pt["issues"][0]["missing"][0];
    assert_eq!(missing["html_key"], "[html]m1.p1.intro");
    assert_eq!(missing["json_key"], "intro");
    assert_eq!(missing["status"], "missing");

    assert_eq!(report["locales"][1]["language"], "en");
    assert_eq!(report["locales"][1]["exists"], false);

    Ok(())
}

#[test]
fn test_check_unmapped_page() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "paginas/pt/extras/quiz.html",
        r#"<p data-i18n="extras.quiz.title">Quiz</p>"#,
    )?;

    let output = test.run(&["check", "--locale", "pt"])?;

    assert!(output.stdout.contains(r#"warning: "paginas/pt/extras/quiz.html"  unmapped-page"#));
    assert!(output.stdout.contains("1 key(s) but no entry in the pages manifest"));

    Ok(())
}

#[test]
fn test_check_with_root_flag() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("site/pages-manifest.json", MANIFEST)?;
    test.write_file("site/paginas/pt/m1/p1.html", PAGE)?;
    test.write_file("site/locales/pt/m1/p1.json", "{}")?;

    let output = test.run(&["check", "--root", "site", "--locale", "pt"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("--> paginas/pt/m1/p1.html:4:"));
    assert!(output.stdout.contains("3 problems (3 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_check_without_manifest_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read manifest"));

    Ok(())
}

#[test]
fn test_check_invalid_config_fails() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(".pageglotrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.run(&["check"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Invalid glob pattern"));

    Ok(())
}
