//! Builds the card-name browser index from the Scryfall bulk catalog.
//!
//! The pipeline filters the raw catalog down to the printings worth showing,
//! splits reversible cards into their two fronts, projects every survivor to
//! a minimal printing record, appends the supplemental catalog, sorts the
//! whole list into canonical order, and collapses it into the `{cards, sets}`
//! index the browser serves.

pub mod builders;
pub mod classes;
pub mod providers;
pub mod utils;

pub use builders::index_builder::build_card_index;
pub use builders::output_generator::OutputGenerator;
pub use builders::{BuilderError, BuilderResult};
pub use classes::{CardexIndex, CardexPrinting, CompressedPrinting, ScryfallCard};
pub use providers::{ProviderError, ProviderResult, ScryfallProvider};
