use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod check;
mod clean;
mod fill;
mod fix;
mod init;
mod placeholders;
mod verify;

const BIN_NAME: &str = "pageglot";

pub const TODO: &str = "TODO: Adicionar tradução";

pub const MANIFEST: &str = r#"{
  "pages": [
    {
      "id": "m1-p1",
      "file": "paginas/pt/m1/p1.html",
      "translation": "m1/p1.json",
      "mountPoint": "m1.p1",
      "title": "Introdução"
    }
  ]
}"#;

pub const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <h1 data-i18n="m1.p1.title">Introdução</h1>
  <p data-i18n="[html]m1.p1.intro">Bem-vindo ao <strong>curso</strong></p>
  <input data-i18n="[placeholder]m1.p1.search" placeholder="Pesquisar">
</body>
</html>
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    /// An empty project; the `.git` marker stops config lookup at its root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir_all(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A one-page site: manifest, source markup and a partial `pt` store.
    pub fn site() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("pages-manifest.json", MANIFEST)?;
        test.write_file("paginas/pt/m1/p1.html", PAGE)?;
        test.write_file("locales/pt/m1/p1.json", r#"{ "title": "Introdução" }"#)?;
        test.write_file(".pageglotrc.json", r#"{ "locales": ["pt", "en"] }"#)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    /// Run `pageglot <args>` and capture its output.
    pub fn run(&self, args: &[&str]) -> Result<RunOutput> {
        let output = self
            .command()
            .args(args)
            .output()
            .context("Failed to run pageglot")?;
        Ok(RunOutput::from(output))
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}

pub struct RunOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Value at a dotted path of a JSON document.
pub fn json_at<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, part| current.get(part))
}
