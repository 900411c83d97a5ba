pub mod monolith;
pub mod sf_utils;

pub use monolith::ScryfallProvider;
pub use sf_utils::build_http_header;
