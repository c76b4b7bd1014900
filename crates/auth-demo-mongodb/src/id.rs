// ObjectId-based record ids.

use auth_demo_core::options::GenerateId;
use mongodb::bson::oid::ObjectId;

/// A fresh ObjectId as its 24-character hex string.
pub fn object_id() -> String {
    ObjectId::new().to_hex()
}

/// `advanced.database.generate_id` strategy producing ObjectIds.
pub fn object_id_strategy() -> GenerateId {
    GenerateId::custom(object_id)
}
