// crates/geoinsight-core/src/traits.rs
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Where autocomplete suggestions come from.
///
/// The controller calls this from a spawned task once the debounce delay has
/// elapsed, so implementors must be `Send + Sync + 'static`. Errors are never
/// shown to the user: the controller logs them and clears the list.
///
/// # Examples
/// ```rust
/// use async_trait::async_trait;
/// use geoinsight_core::traits::SuggestionSource;
///
/// struct Fixed;
///
/// #[async_trait]
/// impl SuggestionSource for Fixed {
///     async fn suggest(&self, query: &str) -> geoinsight_core::Result<Vec<String>> {
///         Ok(vec![format!("{query}land")])
///     }
/// }
/// ```
#[async_trait]
pub trait SuggestionSource: Send + Sync + 'static {
    /// Returns candidate country names for a partial query, best first.
    async fn suggest(&self, query: &str) -> Result<Vec<String>>;
}

#[async_trait]
impl<S: SuggestionSource + ?Sized> SuggestionSource for Arc<S> {
    async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        (**self).suggest(query).await
    }
}

/// Receives the final search term once it has been committed.
///
/// The controller does not wait for the outcome; an implementor that needs to
/// do I/O should hand the term off (for example through a channel) and return.
///
/// Closures taking `&str` implement this trait directly:
///
/// ```rust
/// use geoinsight_core::traits::SearchHandler;
///
/// let mut seen = Vec::new();
/// let mut handler = |term: &str| seen.push(term.to_string());
/// handler.on_search("Norway");
/// assert_eq!(seen, ["Norway"]);
/// ```
pub trait SearchHandler {
    fn on_search(&mut self, term: &str);
}

impl<F> SearchHandler for F
where
    F: FnMut(&str),
{
    fn on_search(&mut self, term: &str) {
        self(term)
    }
}

impl SearchHandler for tokio::sync::mpsc::UnboundedSender<String> {
    fn on_search(&mut self, term: &str) {
        if self.send(term.to_string()).is_err() {
            tracing::debug!(term, "search receiver dropped, term discarded");
        }
    }
}
