use serde::{Deserialize, Serialize};

use crate::classes::base::skip_if_empty_optional_string;
use crate::utils::FACE_SEPARATOR;

/// One physical or digital appearance of a card in a specific set and
/// collector number. This is the unit the pipeline sorts and groups, and the
/// shape the pre-normalized supplemental catalog deserializes straight into.
///
/// Every printing carries a non-empty `name` and `set.code`, and a front
/// image; `back` exists only when the source record had a second face with
/// its own image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardexPrinting {
    #[serde(default, skip_serializing_if = "skip_if_empty_optional_string")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "skip_if_empty_optional_string")]
    pub oracle_id: Option<String>,

    /// Pre-split rules name, kept only to detect multi-face oracle cards.
    #[serde(default, skip_serializing_if = "skip_if_empty_optional_string")]
    pub oracle_name: Option<String>,

    /// Normalized display name; the reducer case-folds this into the group key.
    pub name: String,

    /// ISO date string as shipped by the feed; parsed only while sorting.
    pub release_date: String,

    pub set: PrintingSet,

    /// Not strictly numeric, alternate arts carry suffixes like "218a".
    pub set_number: String,

    #[serde(default)]
    pub is_digital: bool,

    #[serde(default)]
    pub is_promo: bool,

    pub image_uris: PrintingImageUris,
}

impl CardexPrinting {
    /// Case-folded grouping key for the index.
    pub fn group_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Whether the oracle card this printing came from had multiple faces
    /// before expansion.
    pub fn is_multiface(&self) -> bool {
        self.oracle_name
            .as_deref()
            .map(|name| name.contains(FACE_SEPARATOR))
            .unwrap_or(false)
    }

    /// Identity string used when a record has to be named in an error.
    pub fn describe(&self) -> String {
        format!("{} ({}) #{}", self.name, self.set.code, self.set_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintingSet {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrintingImageUris {
    pub front: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}
