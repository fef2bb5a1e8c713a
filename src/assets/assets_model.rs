use serde::{Deserialize, Serialize};

/// What kind of instrument a holding tracks.
///
/// Classification belongs to the price-adapter layer: the kind is attached to
/// the holding when it is loaded, and the engine never infers it from the
/// shape of the code string. Routing (which provider endpoint, which session
/// calendar) keys off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    #[default]
    Stock,
    Fund,
    Commodity,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Stock => "stock",
            AssetKind::Fund => "fund",
            AssetKind::Commodity => "commodity",
        }
    }
}
