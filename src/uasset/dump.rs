//! Serializable projection of a loaded package.
//!
//! Field order is fixed by the struct definitions and every collection keeps
//! the package's own order, so rendering the same input twice produces
//! byte-identical JSON.

use std::io::{Read, Seek};

use serde::Serialize;
use serde_json::Value;
use unreal_asset::exports::{ExportBaseTrait, ExportNormalTrait};
use unreal_asset::properties::{Property, PropertyDataTrait};
use unreal_asset::Asset;

#[derive(Debug, Serialize)]
pub struct AssetDump {
    pub package: PackageDump,
    pub imports: Vec<ImportDump>,
    pub exports: Vec<ExportDump>,
}

#[derive(Debug, Serialize)]
pub struct PackageDump {
    pub engine_version: String,
    pub import_count: usize,
    pub export_count: usize,
}

/// One row of the import table.
#[derive(Debug, Serialize)]
pub struct ImportDump {
    pub class_package: String,
    pub class_name: String,
    pub object_name: String,
    pub outer_index: i32,
}

/// One row of the export table. `class_name` is resolved through the import
/// table when the class index points there; `properties` is present only for
/// exports that carry a property bag.
#[derive(Debug, Serialize)]
pub struct ExportDump {
    pub object_name: String,
    pub class_name: Option<String>,
    pub outer_index: i32,
    pub serial_size: i64,
    pub serial_offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<PropertyDump>>,
}

#[derive(Debug, Serialize)]
pub struct PropertyDump {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub value: Value,
}

impl AssetDump {
    pub fn from_asset<C: Read + Seek>(asset: &Asset<C>, engine_version_tag: &str) -> Self {
        let imports: Vec<ImportDump> = asset
            .imports
            .iter()
            .map(|import| ImportDump {
                class_package: import.class_package.get_owned_content(),
                class_name: import.class_name.get_owned_content(),
                object_name: import.object_name.get_owned_content(),
                outer_index: import.outer_index.index,
            })
            .collect();

        let exports: Vec<ExportDump> = asset
            .asset_data
            .exports
            .iter()
            .map(|export| {
                let base = export.get_base_export();
                ExportDump {
                    object_name: base.object_name.get_owned_content(),
                    class_name: import_object_name(asset, base.class_index.index),
                    outer_index: base.outer_index.index,
                    serial_size: base.serial_size,
                    serial_offset: base.serial_offset,
                    properties: export
                        .get_normal_export()
                        .map(|normal| normal.properties.iter().map(property_dump).collect()),
                }
            })
            .collect();

        AssetDump {
            package: PackageDump {
                engine_version: engine_version_tag.to_string(),
                import_count: imports.len(),
                export_count: exports.len(),
            },
            imports,
            exports,
        }
    }
}

/// Resolve a package index that points into the import table (negative
/// indices; -1 is imports[0]).
fn import_object_name<C: Read + Seek>(asset: &Asset<C>, raw_index: i32) -> Option<String> {
    if raw_index >= 0 {
        return None;
    }
    asset
        .imports
        .get((-raw_index - 1) as usize)
        .map(|import| import.object_name.get_owned_content())
}

fn property_dump(property: &Property) -> PropertyDump {
    PropertyDump {
        name: property.get_name().get_owned_content(),
        property_type: property.to_serialized_name().to_string(),
        value: property_value(property),
    }
}

/// Concrete values for scalar property types. Compound types keep their type
/// name and a null value; the mappings-resolved names are the point of the
/// dump, not a full re-encoding of every payload.
fn property_value(property: &Property) -> Value {
    match property {
        Property::BoolProperty(p) => Value::from(p.value),
        Property::Int8Property(p) => Value::from(p.value),
        Property::Int16Property(p) => Value::from(p.value),
        Property::IntProperty(p) => Value::from(p.value),
        Property::Int64Property(p) => Value::from(p.value),
        Property::UInt16Property(p) => Value::from(p.value),
        Property::UInt32Property(p) => Value::from(p.value),
        Property::UInt64Property(p) => Value::from(p.value),
        Property::FloatProperty(p) => Value::from(p.value.0),
        Property::DoubleProperty(p) => Value::from(p.value.0),
        Property::StrProperty(p) => match &p.value {
            Some(text) => Value::from(text.clone()),
            None => Value::Null,
        },
        Property::NameProperty(p) => Value::from(p.value.get_owned_content()),
        Property::ObjectProperty(p) => Value::from(p.value.index),
        _ => Value::Null,
    }
}
