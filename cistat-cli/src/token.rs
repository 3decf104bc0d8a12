//! Access token loading
//!
//! Tokens live in plain files in the working directory. A missing token is
//! fatal and is reported before any client is built.

use std::io;
use std::path::{Path, PathBuf};

use colored::*;
use thiserror::Error;

/// Errors raised while reading configuration from disk
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token file does not exist
    #[error("token file '{}' not found", path.display())]
    MissingToken { path: PathBuf },

    /// The token file exists but holds only whitespace
    #[error("token file '{}' is empty", path.display())]
    EmptyToken { path: PathBuf },

    #[error("failed to read token file '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Service a token authenticates against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenProvider {
    GitHub,
    Travis,
}

impl TokenProvider {
    /// Setup instructions shown when the token file is missing
    pub fn instructions(&self, path: &Path) -> String {
        match self {
            TokenProvider::GitHub => format!(
                "Create a GitHub access token and save it as a text file in the current\n\
                 working directory called '{}'",
                path.display()
            ),
            TokenProvider::Travis => format!(
                "Travis-CI token not found! To obtain it, do the following:\n\n    \
                 $ travis login\n    \
                 $ travis token > {}\n",
                path.display()
            ),
        }
    }
}

/// Read a token file and trim surrounding whitespace
pub fn load_token(path: &Path) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::MissingToken {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Unreadable {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let token = contents.trim();
    if token.is_empty() {
        return Err(ConfigError::EmptyToken {
            path: path.to_path_buf(),
        });
    }

    Ok(token.to_string())
}

/// Load a token, printing setup instructions to stderr when it is missing
pub fn require_token(path: &Path, provider: TokenProvider) -> anyhow::Result<String> {
    load_token(path).map_err(|e| {
        if matches!(e, ConfigError::MissingToken { .. } | ConfigError::EmptyToken { .. }) {
            eprintln!("{}", provider.instructions(path).yellow());
        }
        e.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_token_trims() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  ghp_abc123  ").unwrap();

        assert_eq!(load_token(file.path()).unwrap(), "ghp_abc123");
    }

    #[test]
    fn test_missing_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gh-access-token");

        let err = load_token(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MissingToken { .. }));
        assert!(require_token(&path, TokenProvider::GitHub).is_err());
    }

    #[test]
    fn test_empty_token_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "\n").unwrap();

        assert!(matches!(
            load_token(file.path()),
            Err(ConfigError::EmptyToken { .. })
        ));
    }

    #[test]
    fn test_instructions_name_the_file() {
        let path = Path::new("travis-token");
        let text = TokenProvider::Travis.instructions(path);
        assert!(text.contains("travis login"));
        assert!(text.contains("travis token > travis-token"));
        assert!(
            TokenProvider::GitHub
                .instructions(Path::new("gh-access-token"))
                .contains("'gh-access-token'")
        );
    }
}
