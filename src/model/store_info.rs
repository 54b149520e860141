use serde::{Deserialize, Serialize};

use crate::framework::Record;
use crate::model::RecordId;

/// Describes the operator of the catalog.
///
/// Read-only: it is the first element of the `store_info` collection and nothing in this crate
/// writes it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Record for StoreInfo {
    type Id = RecordId;
    const COLLECTION: &'static str = "store_info";
}
