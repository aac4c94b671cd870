use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, TODO};

#[test]
fn test_placeholders_dry_run() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", "{}")?;

    let output = test.run(&["placeholders"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(&format!(
        r#"+ locales/en/m1/p1.json: title = "{TODO}"  placeholder"#
    )));
    assert!(output.stdout.contains("Would write 5 values in 2 files:"));
    assert!(output.stdout.contains("  - placeholder: 5"));
    assert_eq!(test.read_file("locales/en/m1/p1.json")?, "{}");

    Ok(())
}

#[test]
fn test_placeholders_apply_fills_missing_keys_only() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "locales/en/m1/p1.json",
        &format!(r#"{{ "title": "", "intro": "{TODO}" }}"#),
    )?;

    let output = test.run(&["placeholders", "--locale", "en", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Wrote 1 value in 1 file (planned 1)."));
    assert!(output.stdout.contains("  - skipped: 2 keys (not missing)"));

    let store = test.read_json("locales/en/m1/p1.json")?;
    assert_eq!(store["title"], "");
    assert_eq!(store["intro"], TODO);
    assert_eq!(store["search"], TODO);

    Ok(())
}

#[test]
fn test_placeholders_skip_locales_without_stores() -> Result<()> {
    let test = CliTest::site()?;

    let output = test.run(&["placeholders", "--apply"])?;

    assert_eq!(output.code, Some(0));
    assert!(!test.root().join("locales/en").exists());

    let store = test.read_json("locales/pt/m1/p1.json")?;
    assert_eq!(store["title"], "Introdução");
    assert_eq!(store["intro"], TODO);

    let check = test.run(&["check", "--locale", "pt"])?;
    assert_eq!(check.code, Some(0));
    assert!(check.stdout.contains(r#"warning: "[html]m1.p1.intro"  unfilled-value"#));

    Ok(())
}
