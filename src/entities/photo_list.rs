use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered photo filenames owned by a single report row, stored as one
/// JSON column. Order is submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PhotoList(pub Vec<String>);

impl PhotoList {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}
