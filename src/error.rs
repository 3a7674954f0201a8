use std::io;
use std::path::PathBuf;

use crate::engine;

/// Failure classification reported by the asset-loading backend.
///
/// The pipeline never inspects backend message strings; the hint about a
/// wrong engine version or missing mappings is keyed off this kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The file does not exist on disk.
    NotFound,

    /// The file exists but is not a package of the expected container format.
    Malformed,

    /// The container looks like a real package but deserialization failed,
    /// typically a wrong engine version or missing mappings.
    VersionMismatch,

    /// Anything else, usually an I/O failure mid-read.
    Other,
}

/// Error crossing the backend boundary: a classification plus the underlying
/// parser/loader message, surfaced verbatim to the user.
#[derive(Debug)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        LoadError {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for LoadError {}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        let kind = if err.kind() == io::ErrorKind::NotFound {
            LoadErrorKind::NotFound
        } else {
            LoadErrorKind::Other
        };
        LoadError::new(kind, err.to_string())
    }
}

/// Conversion pipeline error types, one variant per user-visible failure
/// class. Every variant maps to exit code 1.
#[derive(Debug)]
pub enum ConvertError {
    /// Engine version tag not in the known set
    UnknownEngineVersion { tag: String },

    /// Mapping file path supplied but nothing exists there
    MappingNotFound { path: PathBuf },

    /// Mapping file exists but failed to parse
    MappingParse { path: PathBuf, message: String },

    /// Input asset path does not exist
    InputNotFound { path: PathBuf },

    /// Asset failed to load or serialize; `version_hint` marks failures the
    /// backend classified as a version/mappings mismatch
    AssetParse {
        path: PathBuf,
        message: String,
        version_hint: bool,
    },

    /// Output directory creation or file write failed
    Io(io::Error),
}

impl ConvertError {
    /// True when the CLI should append the wrong-version/missing-usmap hint.
    pub fn version_hint(&self) -> bool {
        matches!(
            self,
            ConvertError::AssetParse {
                version_hint: true,
                ..
            }
        )
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::UnknownEngineVersion { tag } => {
                write!(
                    f,
                    "Invalid engine version '{}'. Valid examples: {}",
                    tag,
                    engine::example_tags().join(", ")
                )
            }
            ConvertError::MappingNotFound { path } => {
                write!(f, "Mapping file not found at '{}'", path.display())
            }
            ConvertError::MappingParse { path, message } => {
                write!(f, "Error loading mappings from '{}': {}", path.display(), message)
            }
            ConvertError::InputNotFound { path } => {
                write!(f, "Input file not found at '{}'", path.display())
            }
            ConvertError::AssetParse { path, message, .. } => {
                write!(f, "Error processing '{}': {}", path.display(), message)
            }
            ConvertError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        ConvertError::Io(err)
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_formats() {
        insta::assert_snapshot!(
            ConvertError::UnknownEngineVersion { tag: "VER_UE9_99".into() }.to_string(),
            @"Invalid engine version 'VER_UE9_99'. Valid examples: VER_UE4_27, VER_UE5_1, VER_UE5_2"
        );
        insta::assert_snapshot!(
            ConvertError::MappingNotFound { path: "/tmp/game.usmap".into() }.to_string(),
            @"Mapping file not found at '/tmp/game.usmap'"
        );
        insta::assert_snapshot!(
            ConvertError::MappingParse {
                path: "/tmp/game.usmap".into(),
                message: "unexpected end of file".into(),
            }
            .to_string(),
            @"Error loading mappings from '/tmp/game.usmap': unexpected end of file"
        );
        insta::assert_snapshot!(
            ConvertError::InputNotFound { path: "/tmp/in.uasset".into() }.to_string(),
            @"Input file not found at '/tmp/in.uasset'"
        );
        insta::assert_snapshot!(
            ConvertError::AssetParse {
                path: "/tmp/in.uasset".into(),
                message: "unknown object version".into(),
                version_hint: true,
            }
            .to_string(),
            @"Error processing '/tmp/in.uasset': unknown object version"
        );
    }

    #[test]
    fn version_hint_only_on_flagged_asset_parse() {
        let hinted = ConvertError::AssetParse {
            path: "/tmp/in.uasset".into(),
            message: "bad".into(),
            version_hint: true,
        };
        let plain = ConvertError::AssetParse {
            path: "/tmp/in.uasset".into(),
            message: "bad".into(),
            version_hint: false,
        };
        assert!(hinted.version_hint());
        assert!(!plain.version_hint());
        assert!(!ConvertError::InputNotFound { path: "/x".into() }.version_hint());
    }

    #[test]
    fn load_error_from_io_classifies_not_found() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "no such file");
        assert_eq!(LoadError::from(missing).kind, LoadErrorKind::NotFound);

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(LoadError::from(denied).kind, LoadErrorKind::Other);
    }
}
