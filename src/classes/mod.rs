pub mod base;
pub mod card_index;
pub mod printing;
pub mod scryfall_card;

pub use base::JsonObject;
pub use card_index::{CardexIndex, CompressedPrinting};
pub use printing::{CardexPrinting, PrintingImageUris, PrintingSet};
pub use scryfall_card::{ScryfallCard, ScryfallCardFace};
