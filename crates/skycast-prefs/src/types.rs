use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A favorited city.
///
/// `id` is the provider's city id and the dedup key. Everything else is the
/// weather snapshot captured when the city was favorited, stored verbatim
/// alongside `id` in the same JSON object and never refreshed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: i64,
    #[serde(flatten)]
    pub snapshot: Map<String, Value>,
}

impl FavoriteCity {
    pub fn new(id: i64, mut snapshot: Map<String, Value>) -> Self {
        snapshot.remove("id");
        Self { id, snapshot }
    }

    /// Build a favorite from any serializable weather record carrying an integer `id`.
    pub fn from_snapshot<S: Serialize>(record: &S) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::to_value(record)?)
    }

    /// City name as recorded in the snapshot; used to re-query the provider.
    pub fn name(&self) -> Option<&str> {
        self.snapshot.get("name").and_then(Value::as_str)
    }

    pub fn country(&self) -> Option<&str> {
        self.snapshot
            .get("sys")
            .and_then(|sys| sys.get("country"))
            .and_then(Value::as_str)
    }
}
