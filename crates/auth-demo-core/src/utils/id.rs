// Record id generation.
//
// The framework asks the configured strategy for a fresh id at insertion
// time. The default is a 21-character nanoid; stores with a native id format
// plug in their own generator.

use std::sync::Arc;

/// A custom id generator, called once per inserted record.
pub type IdGenerator = Arc<dyn Fn() -> String + Send + Sync>;

/// Generate a unique ID using nanoid (21 characters).
pub fn generate_id() -> String {
    nanoid::nanoid!()
}
