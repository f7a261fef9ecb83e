use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeproError {
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Backup directory {path} already exists — refusing to overwrite")]
    BackupExists { path: PathBuf },

    #[error("Backup of {path} failed (original rules directory left untouched): {source}")]
    BackupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to remove {path} after backup — your data is safe in {backup}: {source}")]
    WipeFailed {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },

    #[error("Asset '{name}' not found in source")]
    AssetNotFound { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_includes_path() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("[unclosed").unwrap_err();
        let err = CodeproError::Parse {
            path: "/proj/.claude/rules/config.yaml".into(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("config.yaml"));
        assert!(msg.contains("parse"));
    }

    #[test]
    fn wipe_failed_points_at_backup() {
        let err = CodeproError::WipeFailed {
            path: "/proj/.claude/rules".into(),
            backup: "/proj/.claude/rules.backup.20250101_120000".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.contains("rules.backup.20250101_120000"));
        assert!(msg.contains("data is safe"));
    }

    #[test]
    fn backup_failed_mentions_untouched_original() {
        let err = CodeproError::BackupFailed {
            path: "/proj/.claude/rules".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.to_string().contains("left untouched"));
    }
}
