// crates/geoinsight-core/src/controller.rs

//! # Search Controller
//!
//! Owns the search box state: the typed query, the debounced suggestion list,
//! the keyboard selection and the submission rules. It talks to two
//! collaborators, a [`SuggestionSource`] for autocomplete and a
//! [`SearchHandler`] that receives committed terms.
//!
//! Timers and fetches run as tokio tasks and report back through an internal
//! channel. Nothing touches [`SearchState`] except the controller itself: the
//! owner of the controller drains completed work with [`SearchController::pump`]
//! (or [`SearchController::try_pump`] from a synchronous loop).

use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::error::{ApiError, Result, ValidationError};
use crate::text::char_len;
use crate::traits::{SearchHandler, SuggestionSource};
use crate::validate::validate_search_term;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Country names offered as one-click searches next to the input.
pub const QUICK_SEARCHES: &[&str] = &["Germany", "Japan", "Brazil", "Norway", "USA"];

/// Keys the controller reacts to. Everything else is [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Maps DOM `KeyboardEvent.key` names (`"ArrowDown"`, `"Enter"`, ...).
    pub fn from_dom_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::Down,
            "ArrowUp" | "Up" => Key::Up,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Where input focus currently is, as far as the search box cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Input,
    Suggestions,
    #[default]
    Elsewhere,
}

/// Snapshot of everything the search box renders.
///
/// `selected_index` is `None` or a valid index into `suggestions`;
/// `suggestions_visible` is only ever `true` with a non-empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<String>,
    pub suggestions_visible: bool,
    pub selected_index: Option<usize>,
    pub focus: Focus,
}

impl SearchState {
    /// The suggestions that should be on screen right now.
    pub fn visible_suggestions(&self) -> &[String] {
        if self.suggestions_visible {
            &self.suggestions
        } else {
            &[]
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.suggestions.get(i))
            .map(String::as_str)
    }
}

/// What happened to a submission that passed or skipped validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing was done.
    Ignored,
    /// The controller is disabled; the handler was not called.
    Disabled,
    /// The handler was called with this term.
    Submitted(String),
}

/// Result of a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// No visible suggestions, or a key the list does not handle.
    Ignored,
    /// Selection moved to this index.
    Moved(usize),
    /// Enter committed the selected suggestion.
    Selected(Submission),
    /// Enter without a selection ran the normal submission path.
    Submitted(Submission),
    /// Escape closed the list.
    Dismissed,
}

/// State change applied by [`SearchController::pump`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// Fresh suggestions for the current query replaced the list.
    Suggestions { query: String, count: usize },
    /// The fetch for the current query failed; the list was cleared.
    FetchFailed { query: String },
    /// A response for an outdated query arrived and was dropped.
    Stale { query: String },
    /// The blur grace period ran out and the list was hidden.
    BlurHidden,
    /// The blur grace period ran out but focus is inside the list.
    BlurKept,
}

enum Event {
    SuggestionsLoaded {
        query: String,
        result: Result<Vec<String>>,
    },
    BlurElapsed,
}

/// Debounced autocomplete + keyboard navigation + validated submission.
///
/// Must be created and driven inside a tokio runtime. Dropping the controller
/// cancels its timers, so the suggestion source is never called afterwards.
pub struct SearchController<H: SearchHandler> {
    state: SearchState,
    config: SearchConfig,
    source: Arc<dyn SuggestionSource>,
    handler: H,
    fetch_timer: Debouncer,
    blur_timer: Debouncer,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    disabled: bool,
    // Set once a term is committed; late suggestions for it are not shown.
    committed: bool,
}

impl<H: SearchHandler> SearchController<H> {
    pub fn new(source: impl SuggestionSource, handler: H) -> Self {
        Self::with_config(source, handler, SearchConfig::default())
    }

    pub fn with_config(source: impl SuggestionSource, handler: H, config: SearchConfig) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::default(),
            config,
            source: Arc::new(source),
            handler,
            fetch_timer: Debouncer::new(),
            blur_timer: Debouncer::new(),
            events_tx,
            events_rx,
            disabled: false,
            committed: false,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Disables submission while a lookup is in flight.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// `true` while a debounced fetch is waiting for its quiet period.
    pub fn has_pending_fetch(&self) -> bool {
        self.fetch_timer.is_pending()
    }

    // -----------------------------------------------------------------------
    // INPUT EVENTS
    // -----------------------------------------------------------------------

    /// The input text changed.
    ///
    /// Resets the selection and restarts the debounce timer. Queries shorter
    /// than `min_query_len` clear the list at once and fetch nothing.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
        self.state.selected_index = None;
        self.committed = false;

        if char_len(&self.state.query) < self.config.min_query_len {
            if self.fetch_timer.cancel() {
                trace!("query too short, pending fetch cancelled");
            }
            self.state.suggestions.clear();
            self.state.suggestions_visible = false;
            return;
        }

        self.schedule_fetch();
    }

    /// A key was pressed in the input. Only acts while suggestions are shown.
    pub fn on_key_down(&mut self, key: Key) -> std::result::Result<KeyAction, ValidationError> {
        let count = self.state.suggestions.len();
        if !self.state.suggestions_visible || count == 0 {
            return Ok(KeyAction::Ignored);
        }

        match key {
            Key::Down => {
                let next = self.state.selected_index.map_or(0, |i| (i + 1) % count);
                self.state.selected_index = Some(next);
                Ok(KeyAction::Moved(next))
            }
            Key::Up => {
                let prev = match self.state.selected_index {
                    Some(i) if i > 0 => i - 1,
                    _ => count - 1,
                };
                self.state.selected_index = Some(prev);
                Ok(KeyAction::Moved(prev))
            }
            Key::Enter => match self.state.selected() {
                Some(choice) => {
                    let choice = choice.to_string();
                    Ok(KeyAction::Selected(self.on_suggestion_select(choice)))
                }
                None => self.on_submit().map(KeyAction::Submitted),
            },
            Key::Escape => {
                self.hide_suggestions();
                Ok(KeyAction::Dismissed)
            }
            Key::Other => Ok(KeyAction::Ignored),
        }
    }

    /// Submits the current query.
    pub fn on_submit(&mut self) -> std::result::Result<Submission, ValidationError> {
        let raw = self.state.query.clone();
        self.submit(&raw)
    }

    /// Validates `raw` and hands the trimmed term to the handler.
    ///
    /// Blank input is a silent no-op. Too-short input and input with digits
    /// or punctuation is rejected with the message to show the user.
    pub fn submit(&mut self, raw: &str) -> std::result::Result<Submission, ValidationError> {
        let term = match validate_search_term(raw) {
            Ok(term) => term.to_string(),
            Err(ValidationError::Empty) => return Ok(Submission::Ignored),
            Err(err) => {
                debug!(raw, %err, "search term rejected");
                return Err(err);
            }
        };
        Ok(self.commit(term))
    }

    /// A suggestion was clicked (or chosen with Enter).
    ///
    /// The text is trusted as-is: no character validation.
    pub fn on_suggestion_select(&mut self, suggestion: impl Into<String>) -> Submission {
        let suggestion = suggestion.into();
        self.state.query = suggestion.clone();
        self.commit(suggestion)
    }

    /// The pointer moved over the suggestion at `index`.
    pub fn on_suggestion_hover(&mut self, index: usize) {
        if index < self.state.suggestions.len() {
            self.state.selected_index = Some(index);
        }
    }

    /// One of the [`QUICK_SEARCHES`] buttons was pressed.
    pub fn on_quick_search(&mut self, name: &str) -> Submission {
        if self.disabled {
            return Submission::Disabled;
        }
        debug!(name, "quick search");
        self.handler.on_search(name);
        Submission::Submitted(name.to_string())
    }

    /// The input gained focus; previously fetched suggestions come back.
    pub fn on_focus(&mut self) {
        self.blur_timer.cancel();
        self.state.focus = Focus::Input;
        if char_len(&self.state.query) >= self.config.min_query_len
            && !self.state.suggestions.is_empty()
        {
            self.state.suggestions_visible = true;
        }
    }

    /// The input lost focus. After the grace delay the list is hidden unless
    /// focus has moved into it.
    pub fn on_blur(&mut self) {
        self.state.focus = Focus::Elsewhere;
        let tx = self.events_tx.clone();
        self.blur_timer.schedule(self.config.blur_grace, async move {
            let _ = tx.send(Event::BlurElapsed);
        });
    }

    /// Focus moved into the suggestion list itself.
    pub fn on_suggestions_focus(&mut self) {
        self.state.focus = Focus::Suggestions;
    }

    // -----------------------------------------------------------------------
    // EVENT LOOP
    // -----------------------------------------------------------------------

    /// Waits for the next completed timer or fetch and applies it.
    ///
    /// Waits forever if nothing is scheduled; check
    /// [`has_pending_fetch`](Self::has_pending_fetch) first when that matters.
    pub async fn pump(&mut self) -> Option<Update> {
        let event = self.events_rx.recv().await?;
        Some(self.apply(event))
    }

    /// Applies every event that is already waiting, without blocking.
    pub fn try_pump(&mut self) -> Vec<Update> {
        let mut updates = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            updates.push(self.apply(event));
        }
        updates
    }

    /// Tears the controller down: pending timers are cancelled and in-flight
    /// fetches are discarded when they finish.
    pub fn close(mut self) {
        let fetch = self.fetch_timer.cancel();
        let blur = self.blur_timer.cancel();
        self.events_rx.close();
        debug!(fetch, blur, "search controller closed");
    }

    // -----------------------------------------------------------------------
    // INTERNAL
    // -----------------------------------------------------------------------

    fn schedule_fetch(&mut self) {
        let query = self.state.query.clone();
        let source = Arc::clone(&self.source);
        let tx = self.events_tx.clone();
        trace!(%query, "suggestion fetch scheduled");

        self.fetch_timer.schedule(self.config.debounce, async move {
            spawn_fetch(source, query, tx);
        });
    }

    fn commit(&mut self, term: String) -> Submission {
        if self.disabled {
            debug!(%term, "controller disabled, search not submitted");
            return Submission::Disabled;
        }
        self.fetch_timer.cancel();
        self.committed = true;
        self.hide_suggestions();
        self.state.focus = Focus::Elsewhere;
        self.handler.on_search(&term);
        Submission::Submitted(term)
    }

    fn hide_suggestions(&mut self) {
        self.state.suggestions_visible = false;
        self.state.selected_index = None;
    }

    fn apply(&mut self, event: Event) -> Update {
        match event {
            Event::SuggestionsLoaded { query, result } => {
                if self.committed || query != self.state.query {
                    debug!(%query, current = %self.state.query, "stale suggestions dropped");
                    return Update::Stale { query };
                }
                self.state.selected_index = None;
                match result {
                    Ok(list) => {
                        let count = list.len();
                        self.state.suggestions = list;
                        self.state.suggestions_visible = count > 0;
                        Update::Suggestions { query, count }
                    }
                    Err(err) => {
                        warn!(%query, %err, "failed to fetch suggestions");
                        self.state.suggestions.clear();
                        self.state.suggestions_visible = false;
                        Update::FetchFailed { query }
                    }
                }
            }
            Event::BlurElapsed => {
                if self.state.focus == Focus::Suggestions {
                    Update::BlurKept
                } else {
                    self.hide_suggestions();
                    Update::BlurHidden
                }
            }
        }
    }
}

/// Starts a detached suggestion fetch that reports back on `tx`.
///
/// A newer keystroke only cancels the timer, never a fetch that already
/// started. Returns `false` without calling the source once the controller
/// is gone. A panicking source is reported as a failed fetch.
fn spawn_fetch(
    source: Arc<dyn SuggestionSource>,
    query: String,
    tx: mpsc::UnboundedSender<Event>,
) -> bool {
    if tx.is_closed() {
        trace!(%query, "controller closed, fetch skipped");
        return false;
    }
    debug!(%query, "fetching suggestions");
    tokio::spawn(async move {
        let fetch = tokio::spawn({
            let query = query.clone();
            async move { source.suggest(&query).await }
        });
        let result = match fetch.await {
            Ok(result) => result,
            Err(err) => {
                warn!(%query, error = %err, "suggestion source did not complete");
                Err(ApiError::Unexpected.into())
            }
        };
        let _ = tx.send(Event::SuggestionsLoaded { query, result });
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CountryCatalog;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl SearchHandler for Recorder {
        fn on_search(&mut self, term: &str) {
            self.0.push(term.to_string());
        }
    }

    fn controller() -> SearchController<Recorder> {
        SearchController::new(CountryCatalog::default(), Recorder::default())
    }

    fn seen(c: &SearchController<Recorder>) -> &[String] {
        &c.handler().0
    }

    fn show<H: SearchHandler>(c: &mut SearchController<H>, list: &[&str]) {
        c.state.suggestions = list.iter().map(|s| s.to_string()).collect();
        c.state.suggestions_visible = true;
    }

    #[tokio::test]
    async fn down_and_up_wrap_around() {
        let mut c = controller();
        show(&mut c, &["Germany", "Georgia", "Ghana"]);

        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Moved(0)));
        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Moved(1)));
        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Moved(2)));
        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Moved(0)));
        assert_eq!(c.on_key_down(Key::Up), Ok(KeyAction::Moved(2)));
        assert_eq!(c.on_key_down(Key::Up), Ok(KeyAction::Moved(1)));
    }

    #[tokio::test]
    async fn up_from_nothing_selects_last() {
        let mut c = controller();
        show(&mut c, &["Germany", "Georgia", "Ghana"]);
        assert_eq!(c.on_key_down(Key::Up), Ok(KeyAction::Moved(2)));
        assert_eq!(c.state().selected(), Some("Ghana"));
    }

    #[tokio::test]
    async fn keys_are_inert_without_visible_suggestions() {
        let mut c = controller();
        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Ignored));
        assert_eq!(c.on_key_down(Key::Enter), Ok(KeyAction::Ignored));

        show(&mut c, &["Japan"]);
        c.state.suggestions_visible = false;
        assert_eq!(c.on_key_down(Key::Down), Ok(KeyAction::Ignored));
        assert_eq!(c.state().selected_index, None);
    }

    #[tokio::test]
    async fn escape_hides_without_touching_query() {
        let mut c = controller();
        c.on_query_change("Swe");
        show(&mut c, &["Sweden", "Switzerland"]);
        c.on_key_down(Key::Down).unwrap();

        assert_eq!(c.on_key_down(Key::Escape), Ok(KeyAction::Dismissed));
        assert!(!c.state().suggestions_visible);
        assert_eq!(c.state().selected_index, None);
        assert_eq!(c.query(), "Swe");
    }

    #[tokio::test]
    async fn enter_commits_selected_suggestion() {
        let mut c = controller();
        c.on_query_change("kor");
        show(&mut c, &["South Korea"]);
        c.on_key_down(Key::Down).unwrap();

        let action = c.on_key_down(Key::Enter).unwrap();
        assert_eq!(
            action,
            KeyAction::Selected(Submission::Submitted("South Korea".into()))
        );
        assert_eq!(c.query(), "South Korea");
        assert!(!c.state().suggestions_visible);
        assert_eq!(seen(&c), ["South Korea"]);
    }

    #[tokio::test]
    async fn enter_without_selection_validates_current_text() {
        let mut c = controller();
        c.on_query_change("Brazil!");
        show(&mut c, &["Brazil"]);

        assert_eq!(
            c.on_key_down(Key::Enter),
            Err(ValidationError::InvalidCharacters)
        );
        assert!(seen(&c).is_empty());

        c.on_query_change("Brazil");
        show(&mut c, &["Brazil"]);
        assert_eq!(
            c.on_key_down(Key::Enter),
            Ok(KeyAction::Submitted(Submission::Submitted("Brazil".into())))
        );
        assert_eq!(seen(&c), ["Brazil"]);
    }

    #[tokio::test]
    async fn suggestion_select_skips_character_validation() {
        let mut c = controller();
        let odd = "Guinea (Bissau) 2";
        assert_eq!(
            c.on_suggestion_select(odd),
            Submission::Submitted(odd.to_string())
        );
        assert_eq!(c.query(), odd);
        assert_eq!(seen(&c), [odd]);
    }

    #[tokio::test]
    async fn hover_selects_only_valid_indices() {
        let mut c = controller();
        show(&mut c, &["India", "Indonesia"]);
        c.on_suggestion_hover(1);
        assert_eq!(c.state().selected_index, Some(1));
        c.on_suggestion_hover(5);
        assert_eq!(c.state().selected_index, Some(1));
    }

    #[tokio::test]
    async fn disabled_controller_keeps_handler_quiet() {
        let mut c = controller();
        c.set_disabled(true);
        assert_eq!(c.submit("Norway"), Ok(Submission::Disabled));
        assert_eq!(c.on_quick_search("Japan"), Submission::Disabled);
        assert_eq!(c.on_suggestion_select("Spain"), Submission::Disabled);
        // Validation still runs first.
        assert_eq!(c.submit("N0rway"), Err(ValidationError::InvalidCharacters));
        assert!(seen(&c).is_empty());

        c.set_disabled(false);
        assert_eq!(
            c.on_quick_search(QUICK_SEARCHES[0]),
            Submission::Submitted("Germany".into())
        );
        assert_eq!(seen(&c), ["Germany"]);
    }

    #[tokio::test]
    async fn focus_restores_existing_suggestions() {
        let mut c = controller();
        c.on_query_change("Den");
        show(&mut c, &["Denmark"]);
        c.on_key_down(Key::Escape).unwrap();

        c.on_focus();
        assert!(c.state().suggestions_visible);
        assert_eq!(c.state().focus, Focus::Input);
    }

    #[tokio::test]
    async fn new_controller_starts_unfocused() {
        let c = controller();
        assert_eq!(c.state().focus, Focus::Elsewhere);
    }

    #[tokio::test]
    async fn closed_controller_never_reaches_the_source() {
        let catalog = Arc::new(CountryCatalog::default());
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        // The timer already fired but the receiving side is gone.
        assert!(!spawn_fetch(catalog, "Germany".into(), tx));
    }

    #[tokio::test]
    async fn open_controller_dispatches_the_fetch() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(spawn_fetch(Arc::new(CountryCatalog::default()), "swe".into(), tx));

        match rx.recv().await {
            Some(Event::SuggestionsLoaded { query, result }) => {
                assert_eq!(query, "swe");
                assert_eq!(result.unwrap(), ["Sweden"]);
            }
            _ => panic!("expected loaded suggestions"),
        }
    }

    #[test]
    fn dom_key_names() {
        assert_eq!(Key::from_dom_name("ArrowDown"), Key::Down);
        assert_eq!(Key::from_dom_name("ArrowUp"), Key::Up);
        assert_eq!(Key::from_dom_name("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_name("Escape"), Key::Escape);
        assert_eq!(Key::from_dom_name("a"), Key::Other);
    }
}
