//! Production backend over the `unreal_asset` parser.

pub mod dump;

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use unreal_asset::engine_version::EngineVersion as ParserVersion;
use unreal_asset::unversioned::Usmap;
use unreal_asset::Asset;

use crate::convert::AssetBackend;
use crate::engine::EngineVersion;
use crate::error::{LoadError, LoadErrorKind};

/// Little-endian package magic at offset 0 of every .uasset file.
const PACKAGE_FILE_TAG: u32 = 0x9E2A_83C1;

/// A package loaded by the parser, paired with the tag it was loaded as.
pub struct LoadedAsset {
    asset: Asset<File>,
    version: EngineVersion,
}

pub struct UassetBackend;

impl UassetBackend {
    /// Map a validated tag onto the parser's version identifier.
    fn parser_version(version: EngineVersion) -> Result<ParserVersion, LoadError> {
        let parsed = match version.tag() {
            "VER_UE4_0" => ParserVersion::VER_UE4_0,
            "VER_UE4_1" => ParserVersion::VER_UE4_1,
            "VER_UE4_2" => ParserVersion::VER_UE4_2,
            "VER_UE4_3" => ParserVersion::VER_UE4_3,
            "VER_UE4_4" => ParserVersion::VER_UE4_4,
            "VER_UE4_5" => ParserVersion::VER_UE4_5,
            "VER_UE4_6" => ParserVersion::VER_UE4_6,
            "VER_UE4_7" => ParserVersion::VER_UE4_7,
            "VER_UE4_8" => ParserVersion::VER_UE4_8,
            "VER_UE4_9" => ParserVersion::VER_UE4_9,
            "VER_UE4_10" => ParserVersion::VER_UE4_10,
            "VER_UE4_11" => ParserVersion::VER_UE4_11,
            "VER_UE4_12" => ParserVersion::VER_UE4_12,
            "VER_UE4_13" => ParserVersion::VER_UE4_13,
            "VER_UE4_14" => ParserVersion::VER_UE4_14,
            "VER_UE4_15" => ParserVersion::VER_UE4_15,
            "VER_UE4_16" => ParserVersion::VER_UE4_16,
            "VER_UE4_17" => ParserVersion::VER_UE4_17,
            "VER_UE4_18" => ParserVersion::VER_UE4_18,
            "VER_UE4_19" => ParserVersion::VER_UE4_19,
            "VER_UE4_20" => ParserVersion::VER_UE4_20,
            "VER_UE4_21" => ParserVersion::VER_UE4_21,
            "VER_UE4_22" => ParserVersion::VER_UE4_22,
            "VER_UE4_23" => ParserVersion::VER_UE4_23,
            "VER_UE4_24" => ParserVersion::VER_UE4_24,
            "VER_UE4_25" => ParserVersion::VER_UE4_25,
            "VER_UE4_26" => ParserVersion::VER_UE4_26,
            "VER_UE4_27" => ParserVersion::VER_UE4_27,
            "VER_UE5_0" => ParserVersion::VER_UE5_0,
            "VER_UE5_1" => ParserVersion::VER_UE5_1,
            "VER_UE5_2" => ParserVersion::VER_UE5_2,
            other => {
                return Err(LoadError::new(
                    LoadErrorKind::Other,
                    format!("engine version '{}' is not supported by the parser backend", other),
                ))
            }
        };
        Ok(parsed)
    }
}

/// Check the 4-byte package magic without handing the file to the parser.
///
/// A file that fails this check is not a package at all; a file that passes
/// it but still fails to load most likely needs a different engine version
/// or a mappings file. That distinction drives the error classification.
fn has_package_magic(path: &Path) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 4];
    let mut read = 0;
    while read < magic.len() {
        match file.read(&mut magic[read..])? {
            0 => return Ok(false),
            n => read += n,
        }
    }
    Ok(u32::from_le_bytes(magic) == PACKAGE_FILE_TAG)
}

/// Exported packages keep bulk data in a .uexp sidecar next to the .uasset.
fn open_bulk_sidecar(path: &Path) -> Result<Option<File>, LoadError> {
    let uexp = path.with_extension("uexp");
    if !uexp.exists() {
        return Ok(None);
    }
    Ok(Some(File::open(uexp)?))
}

impl AssetBackend for UassetBackend {
    type Mappings = Usmap;
    type Asset = LoadedAsset;

    fn load_mappings(&self, path: &Path) -> Result<Usmap, LoadError> {
        let file = File::open(path)?;
        Usmap::new(file).map_err(|err| LoadError::new(LoadErrorKind::Malformed, err.to_string()))
    }

    fn load_asset(
        &self,
        path: &Path,
        version: EngineVersion,
        mappings: Option<Usmap>,
    ) -> Result<LoadedAsset, LoadError> {
        match has_package_magic(path) {
            Ok(true) => {}
            Ok(false) => {
                return Err(LoadError::new(
                    LoadErrorKind::Malformed,
                    format!("'{}' is not a uasset package (missing package magic)", path.display()),
                ))
            }
            Err(err) => return Err(LoadError::from(err)),
        }

        let data = File::open(path)?;
        let bulk = open_bulk_sidecar(path)?;
        let parser_version = Self::parser_version(version)?;

        let asset = Asset::new(data, bulk, parser_version, mappings)
            .map_err(|err| LoadError::new(LoadErrorKind::VersionMismatch, err.to_string()))?;

        Ok(LoadedAsset { asset, version })
    }

    fn render_json(&self, loaded: &LoadedAsset, pretty: bool) -> Result<String, LoadError> {
        let dump = dump::AssetDump::from_asset(&loaded.asset, loaded.version.tag());
        let rendered = if pretty {
            serde_json::to_string_pretty(&dump)
        } else {
            serde_json::to_string(&dump)
        };
        rendered.map_err(|err| LoadError::new(LoadErrorKind::Other, err.to_string()))
    }
}
