//! XDG-compliant path resolution for lumina.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(lumina::paths::no_home),
        help("Set the HOME environment variable or pass --config explicitly.")
    )]
    NoHome,

    #[error("failed to create directory: {path}")]
    #[diagnostic(
        code(lumina::paths::create_dir),
        help("Check that the parent directory exists and you have write permissions.")
    )]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type PathResult<T> = std::result::Result<T, PathError>;

/// Global directories for lumina.
#[derive(Debug, Clone)]
pub struct LuminaPaths {
    /// `$XDG_CONFIG_HOME/lumina/`
    pub config_dir: PathBuf,
    /// `$XDG_STATE_HOME/lumina/`
    pub state_dir: PathBuf,
}

impl LuminaPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> PathResult<Self> {
        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| PathError::NoHome)?;

        let config_dir = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config"))
            .join("lumina");

        let state_dir = std::env::var("XDG_STATE_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".local/state"))
            .join("lumina");

        Ok(Self {
            config_dir,
            state_dir,
        })
    }

    /// Path to the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the TUI log file.
    pub fn log_file(&self) -> PathBuf {
        self.state_dir.join("lumina.log")
    }

    /// Create the state directory. Idempotent.
    pub fn ensure_state_dir(&self) -> PathResult<()> {
        std::fs::create_dir_all(&self.state_dir).map_err(|e| PathError::CreateDir {
            path: self.state_dir.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_paths_end_in_lumina() {
        // Reads the real environment; mutating env vars is unsafe in edition 2024.
        if std::env::var_os("HOME").is_none() {
            assert!(matches!(LuminaPaths::resolve(), Err(PathError::NoHome)));
            return;
        }
        let paths = LuminaPaths::resolve().unwrap();
        assert!(paths.config_dir.ends_with("lumina"));
        assert!(paths.state_dir.ends_with("lumina"));
    }

    #[test]
    fn files_derive_from_dirs() {
        let paths = LuminaPaths {
            config_dir: PathBuf::from("/cfg/lumina"),
            state_dir: PathBuf::from("/state/lumina"),
        };
        assert_eq!(paths.config_file(), PathBuf::from("/cfg/lumina/config.toml"));
        assert_eq!(paths.log_file(), PathBuf::from("/state/lumina/lumina.log"));
    }

    #[test]
    fn ensure_state_dir_creates_nested() {
        let dir = tempfile::TempDir::new().unwrap();
        let paths = LuminaPaths {
            config_dir: dir.path().join("cfg"),
            state_dir: dir.path().join("a/b/lumina"),
        };
        paths.ensure_state_dir().unwrap();
        assert!(paths.state_dir.is_dir());
        paths.ensure_state_dir().unwrap();
    }
}
