use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pattern::FilenameParser;
use crate::AircheckError;

/// A radio show the intake pipeline knows about.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    /// Canonical display name, unique across the catalog
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Alternate spellings used in filenames; stored lowercase, unique
    /// across the whole catalog
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Default transcode target for this show's uploads
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Whether uploads for this show get loudness-normalized by default
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

fn default_format() -> String {
    "wav".to_string()
}

fn default_normalize() -> bool {
    true
}

/// Catalog of known shows and their aliases.
///
/// File-backed (YAML); the surrounding workflow reads it, the parser never
/// touches it directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowCatalog {
    shows: Vec<Show>,
}

impl ShowCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog seeded with the stock shows installed on first run.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();

        let defaults = [
            (
                "Answers In Genesis",
                "Daily radio program from Answers In Genesis ministry",
                &["AIG", "AnswersInGenesis", "Answers_In_Genesis"][..],
            ),
            (
                "Focus On The Family",
                "Focus on the Family daily broadcast",
                &["FOF", "FocusOnTheFamily", "Focus_On_The_Family", "FOTF"][..],
            ),
            (
                "Adventures In Odyssey",
                "Adventures in Odyssey radio drama",
                &["AIO", "Odyssey", "AdventuresInOdyssey"][..],
            ),
            (
                "Unshackled",
                "Pacific Garden Mission presents Unshackled!",
                &["UNS", "Unshackled!"][..],
            ),
        ];

        for (name, description, aliases) in defaults {
            let show = Show {
                name: name.to_string(),
                description: Some(description.to_string()),
                aliases: aliases.iter().map(|a| a.to_lowercase()).collect(),
                default_format: default_format(),
                normalize: true,
            };
            // Seed data has no duplicates
            let _ = catalog.add_show(show);
        }

        catalog
    }

    /// Load a catalog from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

        let catalog: ShowCatalog =
            serde_yaml::from_str(&content).context("Failed to parse catalog file")?;

        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog, creating a seeded one on first use.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let catalog = Self::seeded();
            catalog.save(path)?;
            tracing::info!("Initialized default show catalog at {}", path.display());
            Ok(catalog)
        }
    }

    /// Save the catalog to a YAML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize catalog")?;

        fs_err::write(path, content)
            .with_context(|| format!("Failed to write catalog file {}", path.display()))?;

        Ok(())
    }

    /// Check catalog-wide uniqueness invariants after an external edit.
    fn validate(&self) -> Result<()> {
        let mut seen_names = Vec::new();
        let mut seen_aliases = Vec::new();

        for show in &self.shows {
            let name = show.name.to_lowercase();
            if seen_names.contains(&name) {
                anyhow::bail!("Duplicate show name in catalog: {}", show.name);
            }
            seen_names.push(name);

            for alias in &show.aliases {
                let alias = alias.to_lowercase();
                if seen_aliases.contains(&alias) {
                    anyhow::bail!("Duplicate alias in catalog: {}", alias);
                }
                seen_aliases.push(alias);
            }
        }

        Ok(())
    }

    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }

    /// Add a show, enforcing name and alias uniqueness. Aliases are folded
    /// to lowercase on the way in.
    pub fn add_show(&mut self, mut show: Show) -> Result<(), AircheckError> {
        if self
            .shows
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&show.name))
        {
            return Err(AircheckError::DuplicateShow(show.name));
        }

        let aliases: Vec<String> = show.aliases.iter().map(|a| a.to_lowercase()).collect();
        show.aliases = aliases;
        for alias in &show.aliases {
            if self.alias_exists(alias) {
                return Err(AircheckError::DuplicateAlias(alias.clone()));
            }
        }

        self.shows.push(show);
        Ok(())
    }

    /// Register a new alias for an existing show.
    pub fn add_alias(&mut self, show_name: &str, alias: &str) -> Result<(), AircheckError> {
        let alias = alias.to_lowercase();
        if self.alias_exists(&alias) {
            return Err(AircheckError::DuplicateAlias(alias));
        }

        let show = self
            .shows
            .iter_mut()
            .find(|s| s.name.eq_ignore_ascii_case(show_name))
            .ok_or_else(|| AircheckError::ShowNotFound(show_name.to_string()))?;

        show.aliases.push(alias);
        Ok(())
    }

    fn alias_exists(&self, alias: &str) -> bool {
        self.shows
            .iter()
            .any(|s| s.aliases.iter().any(|a| a == alias))
    }

    /// Single-key alias lookup: lowercased alias -> canonical show.
    pub fn lookup_alias(&self, alias: &str) -> Option<&Show> {
        let alias = alias.to_lowercase();
        self.shows
            .iter()
            .find(|s| s.aliases.iter().any(|a| *a == alias))
    }

    /// Find the show a filename most likely belongs to.
    ///
    /// Candidates are tried in catalog order: exact case-insensitive match
    /// on the canonical name or any alias first, then a substring fallback
    /// in either direction. The fallback has no tie-break beyond catalog
    /// order and can match spuriously on short names ("FOF" inside
    /// "FOFJunior") -- known imprecision, kept as-is.
    pub fn find_show_by_pattern(
        &self,
        parser: &FilenameParser,
        filename: &str,
    ) -> Option<&Show> {
        let parsed = parser.parse(filename);
        let extracted = parsed.show_name?.to_lowercase();

        for show in &self.shows {
            if show.name.to_lowercase() == extracted {
                return Some(show);
            }

            if show.aliases.iter().any(|a| *a == extracted) {
                return Some(show);
            }
        }

        self.shows.iter().find(|show| {
            let name = show.name.to_lowercase();
            extracted.contains(&name) || name.contains(&extracted)
        })
    }
}
