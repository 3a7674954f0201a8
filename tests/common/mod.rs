// Common test utilities and helpers
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use uasset2json::engine::EngineVersion;
use uasset2json::error::{LoadError, LoadErrorKind};
use uasset2json::AssetBackend;

/// JSON the fake backend hands back for a successful load.
pub const SAMPLE_JSON: &str = r#"{
  "package": {
    "engine_version": "VER_UE4_27",
    "import_count": 0,
    "export_count": 1
  },
  "imports": [],
  "exports": [
    {
      "object_name": "Example",
      "class_name": null,
      "outer_index": 0,
      "serial_size": 0,
      "serial_offset": 0
    }
  ]
}"#;

/// Scripted stand-in for the parser backend.
///
/// Records every call so tests can assert the fail-fast ordering, not just
/// the final outcome.
pub struct FakeBackend {
    pub mapping_failure: Option<String>,
    pub asset_failure: Option<(LoadErrorKind, String)>,
    pub json: String,
    calls: RefCell<Vec<&'static str>>,
}

impl FakeBackend {
    pub fn succeeding() -> Self {
        FakeBackend {
            mapping_failure: None,
            asset_failure: None,
            json: SAMPLE_JSON.to_string(),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_mappings(message: &str) -> Self {
        let mut backend = Self::succeeding();
        backend.mapping_failure = Some(message.to_string());
        backend
    }

    pub fn failing_asset(kind: LoadErrorKind, message: &str) -> Self {
        let mut backend = Self::succeeding();
        backend.asset_failure = Some((kind, message.to_string()));
        backend
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}

impl AssetBackend for FakeBackend {
    type Mappings = ();
    type Asset = String;

    fn load_mappings(&self, _path: &Path) -> Result<(), LoadError> {
        self.calls.borrow_mut().push("load_mappings");
        match &self.mapping_failure {
            Some(message) => Err(LoadError::new(LoadErrorKind::Malformed, message.clone())),
            None => Ok(()),
        }
    }

    fn load_asset(
        &self,
        _path: &Path,
        _version: EngineVersion,
        _mappings: Option<()>,
    ) -> Result<String, LoadError> {
        self.calls.borrow_mut().push("load_asset");
        match &self.asset_failure {
            Some((kind, message)) => Err(LoadError::new(*kind, message.clone())),
            None => Ok(self.json.clone()),
        }
    }

    fn render_json(&self, asset: &String, _pretty: bool) -> Result<String, LoadError> {
        self.calls.borrow_mut().push("render_json");
        Ok(asset.clone())
    }
}

/// Drop a placeholder input file into `dir` and return its path. The fake
/// backend never reads it; only its existence matters to the pipeline.
pub fn write_input(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"placeholder package bytes").expect("write test input");
    path
}
