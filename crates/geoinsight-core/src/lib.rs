// crates/geoinsight-core/src/lib.rs

//! # geoinsight-core
//!
//! The country search box of the GeoInsight dashboard, without the pixels:
//! debounced autocomplete, keyboard navigation over the suggestions and
//! validated submission, plus the pieces around it (a REST client for the
//! GeoInsight backend, an offline suggestion catalog, the country data model
//! and the number formatting used to present it).
//!
//! ```no_run
//! use geoinsight_core::{CountryCatalog, SearchController, Update};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut search = SearchController::new(CountryCatalog::default(), |term: &str| {
//!     println!("searching for {term}");
//! });
//!
//! search.on_query_change("swe");
//! if let Some(Update::Suggestions { count, .. }) = search.pump().await {
//!     println!("{count} suggestion(s): {:?}", search.state().visible_suggestions());
//! }
//! # }
//! ```

#[cfg(feature = "http")]
pub mod api; // REST client, only with the 'http' feature
pub mod catalog;
pub mod config;
pub mod controller; // The interaction core
pub mod debounce;
pub mod error;
pub mod format;
pub mod model;
pub mod text;
pub mod traits;
pub mod validate;

// Re-exports
pub use crate::error::{ApiError, GeoInsightError, Result, ValidationError};
#[cfg(feature = "http")]
pub use api::ApiClient;
pub use catalog::CountryCatalog;
pub use config::{ApiConfig, SearchConfig};
pub use controller::{
    Focus, Key, KeyAction, SearchController, SearchState, Submission, Update, QUICK_SEARCHES,
};
pub use format::RiskLevel;
pub use model::{CountryInfo, HealthStatus, NewsArticle, ServiceStatus, WeatherData};
// Export the collaborator traits (implementors need them in scope)
pub use traits::{SearchHandler, SuggestionSource};
