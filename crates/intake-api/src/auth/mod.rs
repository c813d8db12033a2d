//! Request authorization and tenant identity

pub mod api_key;
pub mod identity;

pub use api_key::{authorize, secure_compare};
pub use identity::extract_tpa_id;
