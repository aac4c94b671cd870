use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, MANIFEST};

#[test]
fn test_verify_reports_missing_files() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file(
        "pages-manifest.json",
        &MANIFEST.replace(
            "\n  ]",
            r#",
    {
      "id": "m1-p2",
      "file": "paginas/pt/m1/p2.html",
      "translation": "m1/p2.json"
    }
  ]"#,
        ),
    )?;
    test.write_file("locales/pt/m1/p2.json", "{}")?;

    let output = test.run(&["verify"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains(r#"error: "m1-p2"  document-missing"#));
    assert!(output.stdout.contains("--> paginas/pt/m1/p2.html"));
    assert!(output.stdout.contains(r#"error: "locales/en/m1/p1.json"  store-missing"#));
    assert!(output.stdout.contains("required by paginas/pt/m1/p1.html (en)"));
    assert!(output.stdout.contains(r#"error: "locales/en/m1/p2.json"  store-missing"#));
    assert!(output.stdout.contains("3 problems (3 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_verify_complete_site() -> Result<()> {
    let test = CliTest::site()?;
    test.write_file("locales/en/m1/p1.json", "{}")?;

    let output = test.run(&["verify"])?;

    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("✓ Verified 1 page and 2 stores - no issues found")
    );

    Ok(())
}

#[test]
fn test_verify_without_manifest_fails() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["verify"])?;

    assert_eq!(output.code, Some(2));
    assert!(output.stderr.contains("Failed to read manifest"));

    Ok(())
}
