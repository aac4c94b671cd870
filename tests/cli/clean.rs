use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, TODO, json_at};

fn store_with_placeholders() -> String {
    format!(
        r#"{{
  "title": "Intro",
  "m1": {{ "p1": {{ "title": "{TODO}", "intro": "{TODO}" }} }},
  "quiz": {{ "question": "{TODO}", "answer": "Sim" }}
}}"#
    )
}

#[test]
fn test_clean_dry_run() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", &store_with_placeholders())?;

    let output = test.run(&["clean"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("- locales/en/m1/p1.json: m1"));
    assert!(!output.stdout.contains(": quiz"));
    assert!(
        output
            .stdout
            .contains("Would remove 1 subtree (2 placeholders) in 1 file.")
    );
    assert!(output.stdout.contains("Run with --apply to remove these subtrees."));
    assert_eq!(test.read_file("locales/en/m1/p1.json")?, store_with_placeholders());

    Ok(())
}

#[test]
fn test_clean_apply_removes_placeholder_subtrees() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", &store_with_placeholders())?;

    let output = test.run(&["clean", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Removed 1 subtree (2 placeholders) in 1 file."));

    let store = test.read_json("locales/en/m1/p1.json")?;
    assert!(store.get("m1").is_none());
    assert_eq!(store["title"], "Intro");
    assert_eq!(
        json_at(&store, "quiz.question").and_then(|v| v.as_str()),
        Some(TODO)
    );

    Ok(())
}

#[test]
fn test_clean_nothing_to_remove() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["clean"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("✓ No placeholder-only subtrees found"));

    Ok(())
}

#[test]
fn test_clean_respects_locale_selection() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", &store_with_placeholders())?;

    let output = test.run(&["clean", "--locale", "pt", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert_eq!(test.read_file("locales/en/m1/p1.json")?, store_with_placeholders());

    Ok(())
}
