//! Convert a single Unreal Engine .uasset package into readable JSON.

pub mod convert;
pub mod engine;
pub mod error;
pub mod uasset;

pub use convert::{convert, AssetBackend, Conversion, Invocation};
pub use engine::EngineVersion;
pub use error::{ConvertError, LoadError, LoadErrorKind};
