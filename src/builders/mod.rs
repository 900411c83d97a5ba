//! Builders module - turns the raw catalog into the browser index artifact

use thiserror::Error;

/// Builder error types
#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Malformed record {context}: {reason}")]
    MalformedRecord { context: String, reason: String },

    #[error("Supplemental catalog error: {0}")]
    SupplementalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Sanity check failed: {0}")]
    SanityCheckError(String),
}

/// Result type for builder operations
pub type BuilderResult<T> = Result<T, BuilderError>;

pub mod index_builder;
pub mod output_generator;

pub use index_builder::{
    build_card_index, build_index, compare_printings, expand_reversible, is_included,
    load_supplemental_printings, mascot_printing, project,
};

pub use output_generator::OutputGenerator;
