//! The closed set of engine version tags the converter accepts.

/// Every tag the backing parser understands, oldest first.
///
/// The set is closed: a tag either matches one of these exactly or the
/// invocation is rejected. No fuzzy matching, no default.
pub const KNOWN_TAGS: &[&str] = &[
    "VER_UE4_0",
    "VER_UE4_1",
    "VER_UE4_2",
    "VER_UE4_3",
    "VER_UE4_4",
    "VER_UE4_5",
    "VER_UE4_6",
    "VER_UE4_7",
    "VER_UE4_8",
    "VER_UE4_9",
    "VER_UE4_10",
    "VER_UE4_11",
    "VER_UE4_12",
    "VER_UE4_13",
    "VER_UE4_14",
    "VER_UE4_15",
    "VER_UE4_16",
    "VER_UE4_17",
    "VER_UE4_18",
    "VER_UE4_19",
    "VER_UE4_20",
    "VER_UE4_21",
    "VER_UE4_22",
    "VER_UE4_23",
    "VER_UE4_24",
    "VER_UE4_25",
    "VER_UE4_26",
    "VER_UE4_27",
    "VER_UE5_0",
    "VER_UE5_1",
    "VER_UE5_2",
];

/// Example tags quoted in usage and error text. Fixed list, deterministic
/// output.
pub fn example_tags() -> &'static [&'static str] {
    &["VER_UE4_27", "VER_UE5_1", "VER_UE5_2"]
}

/// An engine version tag validated against [`KNOWN_TAGS`].
///
/// Can only be constructed through [`EngineVersion::from_tag`], so holding
/// one proves the tag is in the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineVersion(&'static str);

impl EngineVersion {
    /// Resolve a raw command-line tag. Exact match only.
    pub fn from_tag(tag: &str) -> Option<Self> {
        KNOWN_TAGS.iter().find(|&&known| known == tag).map(|&known| EngineVersion(known))
    }

    pub fn tag(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
