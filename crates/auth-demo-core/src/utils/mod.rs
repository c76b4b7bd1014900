// Utility functions — id generation and origin matching.

pub mod id;
pub mod origin;

pub use id::{generate_id, IdGenerator};
pub use origin::{get_host, get_origin, is_trusted_origin, matches_origin_pattern};
