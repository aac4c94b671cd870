use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("✓ Created .pageglotrc.json"));

    let config = test.read_json(".pageglotrc.json")?;
    assert_eq!(config["pagesRoot"], "paginas/pt");
    assert_eq!(config["placeholder"], crate::TODO);
    assert_eq!(config["locales"][0], "pt");

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".pageglotrc.json", r#"{ "locales": ["pt"] }"#)?;

    let output = test.run(&["init"])?;

    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".pageglotrc.json already exists"));
    assert_eq!(
        test.read_file(".pageglotrc.json")?,
        r#"{ "locales": ["pt"] }"#
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&[])?;

    assert!(output.stdout.contains("Usage:"));

    Ok(())
}
