use std::{
    cell::OnceCell,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::scan_markup_files,
        manifest::{Manifest, PageEntry, load_manifest},
        resolver::KeyResolver,
    },
    utils::relative_display,
};

/// A markup file of the source locale, read into memory.
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    pub path: PathBuf,
    /// Path relative to the project root, forward slashes.
    pub display_path: String,
    /// Path relative to the pages root, forward slashes.
    pub pages_relative: String,
    pub content: String,
}

/// Shared state for one command run.
///
/// Configuration is resolved eagerly. The manifest and the markup documents
/// are loaded on first use, so commands that only touch stores (`clean`)
/// never read them.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--root`, `--locale`)
/// 2. `.pageglotrc.json` config file
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory, all configured paths are relative to it.
    pub root_dir: PathBuf,

    pub resolver: KeyResolver,

    /// Locales selected with `--locale`, empty when none were given.
    locale_filter: Vec<String>,

    manifest: OnceCell<Manifest>,

    documents: OnceCell<Vec<MarkupDocument>>,
}

impl CheckContext {
    /// Create a new `CheckContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file cannot be read, parsed or validated.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            tracing::debug!("no {} found, using default configuration", CONFIG_FILE_NAME);
        }

        Ok(Self::with_config(
            config_result.config,
            root_dir,
            common_args.locales.clone(),
        ))
    }

    pub fn with_config(config: Config, root_dir: PathBuf, locale_filter: Vec<String>) -> Self {
        let resolver = KeyResolver::new(config.placeholder.clone());
        Self {
            config,
            root_dir,
            resolver,
            locale_filter,
            manifest: OnceCell::new(),
            documents: OnceCell::new(),
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.manifest)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root_dir.join(&self.config.pages_root)
    }

    pub fn locale_dir(&self, locale: &str) -> PathBuf {
        self.root_dir.join(&self.config.locales_root).join(locale)
    }

    /// Store file of `page` in `locale`.
    pub fn store_path(&self, locale: &str, page: &PageEntry) -> PathBuf {
        self.locale_dir(locale).join(&page.translation)
    }

    /// Default location of the saved audit report.
    pub fn report_path(&self) -> PathBuf {
        self.root_dir.join(&self.config.report_path)
    }

    /// Configured reference store, resolved against the source locale directory.
    pub fn reference_store_path(&self) -> Option<PathBuf> {
        self.config
            .reference_store
            .as_ref()
            .map(|name| self.locale_dir(self.source_locale()).join(name))
    }

    pub fn source_locale(&self) -> &str {
        &self.config.source_locale
    }

    /// Locales to process: the `--locale` selection, or every configured locale.
    pub fn target_locales(&self) -> Vec<String> {
        if self.locale_filter.is_empty() {
            self.config.locales.clone()
        } else {
            self.locale_filter.clone()
        }
    }

    /// Like [`target_locales`](Self::target_locales), defaulting to the source locale.
    pub fn target_locales_or_source(&self) -> Vec<String> {
        if self.locale_filter.is_empty() {
            vec![self.config.source_locale.clone()]
        } else {
            self.locale_filter.clone()
        }
    }

    /// Path relative to the project root, for display.
    pub fn display_path(&self, path: &Path) -> String {
        relative_display(&self.root_dir, path)
    }

    /// The pages manifest, loaded on first access.
    ///
    /// # Errors
    ///
    /// A missing or unparsable manifest is fatal for every command that needs it.
    pub fn manifest(&self) -> Result<&Manifest> {
        if let Some(manifest) = self.manifest.get() {
            return Ok(manifest);
        }
        let manifest = load_manifest(&self.manifest_path())?;
        Ok(self.manifest.get_or_init(|| manifest))
    }

    /// Every markup document under the pages root, sorted by path.
    ///
    /// Unreadable files are logged and skipped.
    pub fn documents(&self) -> &[MarkupDocument] {
        self.documents.get_or_init(|| {
            let pages_dir = self.pages_dir();
            let scan = scan_markup_files(&self.root_dir, &pages_dir, &self.config.ignores);
            if scan.skipped_count > 0 {
                tracing::warn!(
                    "{} path(s) under {} skipped due to access errors",
                    scan.skipped_count,
                    self.display_path(&pages_dir)
                );
            }

            scan.files
                .into_iter()
                .filter_map(|path| match fs::read_to_string(&path) {
                    Ok(content) => Some(MarkupDocument {
                        display_path: self.display_path(&path),
                        pages_relative: relative_display(&pages_dir, &path),
                        path,
                        content,
                    }),
                    Err(e) => {
                        tracing::warn!("failed to read {}: {}", path.display(), e);
                        None
                    }
                })
                .collect()
        })
    }
}
