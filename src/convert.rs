use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::EngineVersion;
use crate::error::{ConvertError, LoadError, Result};

/// A single conversion request, captured verbatim from the command line.
///
/// The engine version tag is kept as the raw string here; it is resolved
/// against the known table as the first pipeline step so the error message
/// can name the exact tag the user typed.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub engine_version_tag: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub mapping_path: Option<PathBuf>,
}

impl Invocation {
    /// Capture positional arguments (program name already stripped).
    ///
    /// Returns `None` when fewer than three are given, which the CLI turns
    /// into usage text and exit code 1. An empty fourth argument counts as
    /// "no mappings"; arguments past the fourth are ignored.
    pub fn from_args(args: &[String]) -> Option<Self> {
        if args.len() < 3 {
            return None;
        }

        Some(Invocation {
            engine_version_tag: args[0].clone(),
            input_path: PathBuf::from(&args[1]),
            output_path: PathBuf::from(&args[2]),
            mapping_path: args.get(3).filter(|s| !s.is_empty()).map(PathBuf::from),
        })
    }
}

/// Seam to the external asset-parsing library.
///
/// The pipeline only ever talks to the parser through this trait, so the
/// real `unreal_asset`-backed implementation and the test fakes are
/// interchangeable without touching orchestration logic. The mapping handle
/// is moved into `load_asset`: it belongs to exactly one conversion.
pub trait AssetBackend {
    type Mappings;
    type Asset;

    /// Parse a `.usmap` mappings file.
    fn load_mappings(&self, path: &Path) -> std::result::Result<Self::Mappings, LoadError>;

    /// Load one package from disk, consuming the mappings if any were given.
    fn load_asset(
        &self,
        path: &Path,
        version: EngineVersion,
        mappings: Option<Self::Mappings>,
    ) -> std::result::Result<Self::Asset, LoadError>;

    /// Render the loaded package as JSON text.
    fn render_json(&self, asset: &Self::Asset, pretty: bool) -> std::result::Result<String, LoadError>;
}

/// Outcome of a successful conversion.
#[derive(Debug)]
pub struct Conversion {
    pub output_path: PathBuf,
    pub mapping_loaded: bool,
}

/// Run the whole pipeline for one invocation.
///
/// Validation order matches the CLI contract: engine version tag, then the
/// mappings file (existence, then parse), then the input file, then the
/// asset load, then serialization and the file write. Fail-fast throughout;
/// the output file is only created after serialization has fully succeeded.
pub fn convert<B: AssetBackend>(backend: &B, request: &Invocation) -> Result<Conversion> {
    let version = EngineVersion::from_tag(&request.engine_version_tag).ok_or_else(|| {
        ConvertError::UnknownEngineVersion {
            tag: request.engine_version_tag.clone(),
        }
    })?;

    // The mappings file is checked before the input file, so a bad usmap
    // argument fails before any asset work starts.
    let mappings = match &request.mapping_path {
        Some(path) => {
            if !path.exists() {
                return Err(ConvertError::MappingNotFound { path: path.clone() });
            }
            match backend.load_mappings(path) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    return Err(ConvertError::MappingParse {
                        path: path.clone(),
                        message: err.message,
                    })
                }
            }
        }
        None => None,
    };
    let mapping_loaded = mappings.is_some();

    if !request.input_path.exists() {
        return Err(ConvertError::InputNotFound {
            path: request.input_path.clone(),
        });
    }

    let asset = backend
        .load_asset(&request.input_path, version, mappings)
        .map_err(|err| convert_load_error(err, &request.input_path))?;

    let json = backend
        .render_json(&asset, true)
        .map_err(|err| convert_load_error(err, &request.input_path))?;

    if let Some(parent) = request.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&request.output_path, json.as_bytes())?;

    Ok(Conversion {
        output_path: request.output_path.clone(),
        mapping_loaded,
    })
}

fn convert_load_error(err: LoadError, input_path: &Path) -> ConvertError {
    use crate::error::LoadErrorKind;

    match err.kind {
        LoadErrorKind::NotFound => ConvertError::InputNotFound {
            path: input_path.to_path_buf(),
        },
        kind => ConvertError::AssetParse {
            path: input_path.to_path_buf(),
            message: err.message,
            version_hint: kind == LoadErrorKind::VersionMismatch,
        },
    }
}
