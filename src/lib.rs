//! Workspace umbrella: re-exports `geoinsight-core` so the demos can use it directly.
pub use geoinsight_core::*;
