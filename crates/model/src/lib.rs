use serde::{Deserialize, Serialize};

pub mod journey;
pub mod station;

/// A value together with the row identifier the store assigned to it.
///
/// The row identifier is internal to the store and distinct from any
/// identifier carried by the value itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithId<V> {
    #[serde(rename = "FID")]
    pub id: i32,
    #[serde(flatten)]
    pub content: V,
}

impl<V> WithId<V> {
    pub fn new(id: i32, content: V) -> Self {
        Self { id, content }
    }
}
