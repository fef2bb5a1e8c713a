//! Asset classification.

mod assets_model;

pub use assets_model::AssetKind;
