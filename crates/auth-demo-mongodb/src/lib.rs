// auth-demo-mongodb — the persistence handle behind the auth configuration.
//
// One MongoDB client per process, created on first use and shared by
// everything that needs the database. Record ids follow MongoDB's native
// ObjectId format.

pub mod handle;
pub mod id;

pub use handle::{DatabaseConfig, DatabaseHandle, SharedDatabase};
pub use id::{object_id, object_id_strategy};
