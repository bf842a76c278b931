//! API key lookup.
//!
//! A `.env` file is a convenience: it only populates the process environment
//! before the key is read. Variables already set are never overridden.

use crate::error::{TTSError, TTSResult};
use std::path::{Path, PathBuf};

/// Load key/value pairs from an environment file.
///
/// With `None`, looks for `.env` in the current directory and its ancestors;
/// a missing file is not an error. An explicit path must exist and parse.
/// Returns the path that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> TTSResult<Option<PathBuf>> {
    match path {
        Some(path) => {
            dotenvy::from_path(path).map_err(|source| TTSError::EnvFile {
                path: path.to_path_buf(),
                source,
            })?;
            log::debug!("Loaded environment from {}", path.display());
            Ok(Some(path.to_path_buf()))
        }
        None => match dotenvy::dotenv() {
            Ok(found) => {
                log::debug!("Loaded environment from {}", found.display());
                Ok(Some(found))
            }
            Err(err) if err.not_found() => Ok(None),
            Err(source) => Err(TTSError::EnvFile {
                path: PathBuf::from(".env"),
                source,
            }),
        },
    }
}

/// Read the API key from the process environment.
pub fn api_key_from_env(var: &str) -> TTSResult<String> {
    resolve_api_key(var, |name| std::env::var(name).ok())
}

/// Resolve the API key through `lookup`; absent or blank values are missing.
pub fn resolve_api_key<F>(var: &str, lookup: F) -> TTSResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| TTSError::MissingCredential(var.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_present_key() {
        let key = resolve_api_key("OPENAI_API_KEY", |_| Some("sk-test".to_string())).unwrap();
        assert_eq!(key, "sk-test");
    }

    #[test]
    fn test_resolve_missing_key() {
        let err = resolve_api_key("OPENAI_API_KEY", |_| None).unwrap_err();
        match err {
            TTSError::MissingCredential(var) => assert_eq!(var, "OPENAI_API_KEY"),
            other => panic!("Expected MissingCredential, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_blank_key_is_missing() {
        let err = resolve_api_key("OPENAI_API_KEY", |_| Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, TTSError::MissingCredential(_)));
    }

    #[test]
    fn test_api_key_from_unset_variable() {
        let err = api_key_from_env("VOICEGEN_TEST_NEVER_SET_7F3A").unwrap_err();
        assert!(err.to_string().contains("VOICEGEN_TEST_NEVER_SET_7F3A"));
    }

    #[test]
    fn test_load_explicit_env_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "VOICEGEN_TEST_ENV_FILE_KEY=from-file").unwrap();

        let loaded = load_env_file(Some(file.path())).unwrap();
        assert_eq!(loaded.as_deref(), Some(file.path()));
        assert_eq!(
            api_key_from_env("VOICEGEN_TEST_ENV_FILE_KEY").unwrap(),
            "from-file"
        );
    }

    #[test]
    fn test_load_missing_explicit_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_env_file(Some(&dir.path().join("absent.env"))).unwrap_err();
        assert!(matches!(err, TTSError::EnvFile { .. }));
    }
}
