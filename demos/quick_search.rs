//! Quick search demo for geoinsight-rs
//!
//! Drives the search controller the way the dashboard does, using the
//! built-in country list instead of a running backend.

use geoinsight_rs::format::{format_currency, format_number};
use geoinsight_rs::{
    CountryCatalog, Key, KeyAction, RiskLevel, SearchController, Submission, Update,
    QUICK_SEARCHES,
};

#[tokio::main]
async fn main() {
    println!("=== GeoInsight Quick Search Demo ===\n");

    let mut search = SearchController::new(CountryCatalog::default(), |term: &str| {
        println!("  -> search handler called with {term:?}");
    });

    // Example 1: typing with autocomplete
    println!("--- Example 1: Typing \"uni\" ---");
    for partial in ["u", "un", "uni"] {
        search.on_query_change(partial);
    }
    if let Some(Update::Suggestions { query, count }) = search.pump().await {
        println!("{count} suggestion(s) for {query:?}:");
        for name in search.state().visible_suggestions() {
            println!("- {name}");
        }
    }
    println!();

    // Example 2: keyboard selection
    println!("--- Example 2: Down, Down, Enter ---");
    search.on_key_down(Key::Down).ok();
    search.on_key_down(Key::Down).ok();
    if let Ok(KeyAction::Selected(Submission::Submitted(term))) = search.on_key_down(Key::Enter) {
        println!("Selected {term}");
    }
    println!();

    // Example 3: validation
    println!("--- Example 3: Validation ---");
    for raw in ["G", "G3rmany", "France?", "  Spain  "] {
        match search.submit(raw) {
            Ok(Submission::Submitted(term)) => println!("{raw:?}: submitted {term:?}"),
            Ok(other) => println!("{raw:?}: {other:?}"),
            Err(err) => println!("{raw:?}: {err}"),
        }
    }
    println!();

    // Example 4: quick searches
    println!("--- Example 4: Quick searches ---");
    for name in QUICK_SEARCHES {
        search.on_quick_search(name);
    }
    println!();

    // Example 5: formatting helpers
    println!("--- Example 5: Formatting ---");
    println!("Population: {}", format_number(Some(83_240_525.0)));
    println!("GDP per capita: {}", format_currency(Some(48_717.99)));
    for index in [1.2, 3.0, 4.8, 6.5, 8.9] {
        println!("Risk {index}: {}", RiskLevel::from_index(Some(index)));
    }

    search.close();
}
