use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A gym location in the registry.
///
/// Registry entries are read-only within the ingestion core: the resolver
/// looks them up by normalized code and never creates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymRecord {
    pub id: Uuid,
    /// Short uppercase alphanumeric identifier, e.g. `OASIS`.
    pub code: String,
    pub name: String,
}
