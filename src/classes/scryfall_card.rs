use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of the Scryfall `default_cards` bulk export, narrowed to the
/// fields the index transform consumes. Everything else in the feed is
/// ignored, and classification flags default to false/absent when missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScryfallCard {
    #[serde(default)]
    pub id: String,

    /// Absent at the top level on reversible cards; each face carries its own.
    #[serde(default)]
    pub oracle_id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub card_faces: Option<Vec<ScryfallCardFace>>,

    #[serde(default)]
    pub set: String,

    #[serde(default)]
    pub set_name: String,

    #[serde(default)]
    pub collector_number: String,

    #[serde(default)]
    pub released_at: String,

    #[serde(default)]
    pub digital: bool,

    #[serde(default)]
    pub oversized: bool,

    #[serde(default)]
    pub promo: bool,

    #[serde(default)]
    pub promo_types: Option<Vec<String>>,

    #[serde(default)]
    pub set_type: String,

    #[serde(default)]
    pub layout: String,
}

impl ScryfallCard {
    /// Identity string used when a record has to be named in an error.
    pub fn describe(&self) -> String {
        format!("{} ({}) #{}", self.name, self.set, self.collector_number)
    }
}

/// A single face of a multi-faced record. Only the presence of `image_uris`
/// matters downstream, so the URI map stays an opaque JSON value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScryfallCardFace {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub oracle_id: Option<String>,

    #[serde(default)]
    pub image_uris: Option<Value>,
}
