use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::classes::base::JsonObject;

/// The finished browser index: printings grouped under their lower-cased
/// display name, plus the set code to display name lookup. Group order is
/// the canonical sort order; map order is insertion order, which keeps the
/// serialized artifact deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardexIndex {
    pub cards: IndexMap<String, Vec<CompressedPrinting>>,
    pub sets: IndexMap<String, String>,
}

impl CardexIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JsonObject for CardexIndex {}

/// Wire form of one printing inside a name group. The boolean flags
/// serialize as the number 1 and are omitted entirely when unset to keep the
/// artifact small.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressedPrinting {
    /// `<set code>|<collector number>`
    pub s: String,

    /// 1 when the printing is digital-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<u8>,

    /// 1 when the printing is promotional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<u8>,

    /// 1 when the oracle card had multiple faces before expansion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<u8>,

    /// Front image URL.
    pub f: String,

    /// Back image URL, only for printings with an imaged second face.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
}
