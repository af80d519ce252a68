//! Start-up wiring shared by the CLI and the TUI: config, store, gateway.

use std::path::{Path, PathBuf};

use crate::config::LuminaConfig;
use crate::error::LuminaResult;
use crate::gateway::AiGateway;
use crate::paths::LuminaPaths;
use crate::store::DocumentStore;

/// Everything a front end needs to run.
#[derive(Debug)]
pub struct Session {
    pub config: LuminaConfig,
    pub store: DocumentStore,
    pub gateway: AiGateway,
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// Config file to read instead of the XDG default.
    pub config_path: Option<PathBuf>,
    /// Document fixture to load instead of `library.documents`.
    pub documents: Option<PathBuf>,
}

/// Resolve the config path: explicit override, else the XDG location.
pub fn config_path(overrides: &Overrides) -> LuminaResult<PathBuf> {
    match &overrides.config_path {
        Some(path) => Ok(path.clone()),
        None => Ok(LuminaPaths::resolve()?.config_file()),
    }
}

impl Session {
    /// Load config, then the document store, then build the Gemini gateway.
    pub fn open(overrides: &Overrides) -> LuminaResult<Self> {
        let path = config_path(overrides)?;
        let config = if overrides.config_path.is_some() {
            LuminaConfig::load(&path)?
        } else {
            LuminaConfig::load_or_default(&path)?
        };
        let store = load_store(overrides.documents.as_deref().or(config.library.documents.as_deref()))?;
        let gateway = AiGateway::gemini(&config.ai);
        Ok(Self {
            config,
            store,
            gateway,
        })
    }
}

/// Load documents from `path`, or the bundled fixture when `None`.
pub fn load_store(path: Option<&Path>) -> LuminaResult<DocumentStore> {
    Ok(match path {
        Some(p) => DocumentStore::load(p)?,
        None => DocumentStore::bundled()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_and_documents() {
        let dir = tempfile::TempDir::new().unwrap();
        let docs = dir.path().join("docs.toml");
        std::fs::write(
            &docs,
            "[[documents]]\nid = \"a\"\ntitle = \"A\"\ncategory = \"Other\"\ndate = \"d\"\nsummary = \"s\"\ncontent = \"c\"\n",
        )
        .unwrap();
        let cfg = dir.path().join("config.toml");
        std::fs::write(&cfg, "[ai]\nsummary_model = \"custom-flash\"\n").unwrap();

        let session = Session::open(&Overrides {
            config_path: Some(cfg),
            documents: Some(docs),
        })
        .unwrap();
        assert_eq!(session.config.ai.summary_model, "custom-flash");
        assert_eq!(session.store.len(), 1);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Session::open(&Overrides {
            config_path: Some(dir.path().join("missing.toml")),
            documents: None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn store_defaults_to_bundled() {
        assert_eq!(load_store(None).unwrap().len(), 5);
    }
}
