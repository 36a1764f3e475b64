//! geoinsight: command-line front-end for the GeoInsight backend
//!
//! Every search goes through the same controller the dashboard uses, so the
//! CLI applies the same validation and the same debounced autocomplete.
//!
//! Usage examples
//! --------------
//!
//! - Look up a country
//!   $ geoinsight search Germany
//!   $ geoinsight search south korea
//!
//! - Autocomplete (against the API, or the built-in list)
//!   $ geoinsight suggest uni
//!   $ geoinsight --offline suggest uni
//!
//! - Interactive prompt with live suggestions
//!   $ geoinsight repl
//!
//! - Backend health
//!   $ geoinsight health
//!   $ geoinsight status
//!
//! The API location comes from `--api-url` or `GEOINSIGHT_API_URL`
//! (default `http://localhost:8080/api`).
mod args;
mod logging;
mod report;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Result};
use clap::Parser;
use geoinsight_core::{
    ApiClient, ApiConfig, CountryCatalog, Key, KeyAction, SearchController, SearchState,
    Submission, SuggestionSource, Update, ValidationError, QUICK_SEARCHES,
};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

type Controller = SearchController<UnboundedSender<String>>;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_tracing(args.debug)?;

    let config =
        ApiConfig::new(args.api_url.as_str()).with_timeout(Duration::from_secs(args.timeout_secs));
    let api = Arc::new(ApiClient::new(&config)?);
    debug!(base_url = %api.base_url(), offline = args.offline, "client ready");

    // Suggestions: either the live endpoint or the built-in list
    let source: Arc<dyn SuggestionSource> = if args.offline {
        Arc::new(CountryCatalog::default())
    } else {
        api.clone()
    };

    match args.command {
        Commands::Search { name } => search(&api, source, &name.join(" ")).await,
        Commands::Suggest { query } => suggest(source, &query).await,
        Commands::Repl => repl(&api, source).await,
        Commands::Health => {
            let health = api.health().await?;
            println!("Status:  {}", health.status);
            if let Some(service) = &health.service {
                println!("Service: {service}");
            }
            if let Some(version) = &health.version {
                println!("Version: {version}");
            }
            if !health.is_up() {
                bail!("backend reports status {}", health.status);
            }
            Ok(())
        }
        Commands::Status => {
            let status = api.service_status().await?;
            for (component, state) in status.components() {
                println!("{component:<16} {state}");
            }
            println!("{:<16} {}", "overall", status.overall().unwrap_or("UNKNOWN"));
            Ok(())
        }
    }
}

/// Channel-backed controller: committed terms land in the receiver.
fn channel_controller(
    source: Arc<dyn SuggestionSource>,
) -> (Controller, UnboundedReceiver<String>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SearchController::new(source, tx), rx)
}

async fn search(api: &ApiClient, source: Arc<dyn SuggestionSource>, term: &str) -> Result<()> {
    let (mut controller, mut terms) = channel_controller(source);
    match controller.submit(term)? {
        Submission::Ignored => bail!("{}", ValidationError::Empty),
        Submission::Disabled | Submission::Submitted(_) => {}
    }
    while let Ok(term) = terms.try_recv() {
        lookup(api, &mut controller, &term).await?;
    }
    controller.close();
    Ok(())
}

async fn suggest(source: Arc<dyn SuggestionSource>, query: &str) -> Result<()> {
    let mut controller = SearchController::new(source, |_: &str| {});
    controller.on_query_change(query);
    if !controller.has_pending_fetch() {
        bail!("Type at least {} characters to get suggestions", controller.config().min_query_len);
    }

    wait_for_suggestions(&mut controller).await;
    let list = controller.state().visible_suggestions();
    if list.is_empty() {
        println!("No suggestions for \"{query}\"");
    }
    for name in list {
        println!("{name}");
    }
    controller.close();
    Ok(())
}

async fn repl(api: &ApiClient, source: Arc<dyn SuggestionSource>) -> Result<()> {
    let (mut controller, mut terms) = channel_controller(source);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_repl_help();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();

        match input {
            ":q" | ":quit" => break,
            ":help" => print_repl_help(),
            ":go" => report_submission(controller.on_submit()),
            ":quick" => {
                for (i, name) in QUICK_SEARCHES.iter().enumerate() {
                    println!("  !{} {name}", i + 1);
                }
            }
            cmd if cmd.starts_with('!') => match quick_pick(cmd) {
                Some(name) => report_submission(Ok(controller.on_quick_search(name))),
                None => eprintln!("  no such quick search: {cmd}"),
            },
            ":down" | ":up" | ":enter" | ":esc" => {
                let key = match input {
                    ":down" => Key::Down,
                    ":up" => Key::Up,
                    ":enter" => Key::Enter,
                    _ => Key::Escape,
                };
                match controller.on_key_down(key) {
                    Ok(KeyAction::Selected(s)) | Ok(KeyAction::Submitted(s)) => {
                        report_submission(Ok(s))
                    }
                    Ok(KeyAction::Ignored) => println!("  (no suggestions open)"),
                    Ok(_) => print_suggestions(controller.state()),
                    Err(err) => eprintln!("  {err}"),
                }
            }
            cmd if cmd.starts_with(':') => match cmd[1..].parse::<usize>() {
                Ok(n) if n >= 1 && n <= controller.state().visible_suggestions().len() => {
                    controller.on_suggestion_hover(n - 1);
                    if let Ok(KeyAction::Selected(s)) = controller.on_key_down(Key::Enter) {
                        report_submission(Ok(s));
                    }
                }
                _ => eprintln!("  unknown command {cmd} (try :help)"),
            },
            _ => {
                controller.on_query_change(line.as_str());
                if controller.has_pending_fetch() {
                    wait_for_suggestions(&mut controller).await;
                }
                print_suggestions(controller.state());
            }
        }

        while let Ok(term) = terms.try_recv() {
            if let Err(err) = lookup(api, &mut controller, &term).await {
                eprintln!("  {err}");
            }
        }
    }

    controller.close();
    Ok(())
}

/// Fetches and prints one country while the controller is disabled.
async fn lookup(api: &ApiClient, controller: &mut Controller, term: &str) -> Result<()> {
    controller.set_disabled(true);
    let result = api.country(term).await;
    controller.set_disabled(false);

    let info = result?;
    if let Some(message) = &info.error_message {
        bail!("{message}");
    }
    print!("{}", report::render_country(&info));
    Ok(())
}

/// Pumps until the fetch for the current query has been applied.
async fn wait_for_suggestions<H: geoinsight_core::SearchHandler>(
    controller: &mut SearchController<H>,
) {
    while let Some(update) = controller.pump().await {
        match update {
            Update::Stale { .. } | Update::BlurHidden | Update::BlurKept => continue,
            Update::Suggestions { .. } | Update::FetchFailed { .. } => break,
        }
    }
}

fn quick_pick(cmd: &str) -> Option<&'static str> {
    let n: usize = cmd.trim_start_matches('!').parse().ok()?;
    QUICK_SEARCHES.get(n.checked_sub(1)?).copied()
}

fn report_submission(result: std::result::Result<Submission, ValidationError>) {
    match result {
        Ok(Submission::Submitted(term)) => println!("  searching for {term}..."),
        Ok(Submission::Disabled) => println!("  a search is already running"),
        Ok(Submission::Ignored) => {}
        Err(err) => eprintln!("  {err}"),
    }
}

fn print_suggestions(state: &SearchState) {
    let list = state.visible_suggestions();
    if list.is_empty() {
        println!("  (no suggestions)");
        return;
    }
    for (i, name) in list.iter().enumerate() {
        let marker = if state.selected_index == Some(i) { '>' } else { ' ' };
        println!(" {marker} {}. {name}", i + 1);
    }
}

fn print_repl_help() {
    println!("Type a country name to see suggestions.");
    println!("  :N                  search suggestion N");
    println!("  :down :up :enter :esc  navigate the suggestion list");
    println!("  :go                 search the text as typed");
    println!("  :quick / !N         list / run quick searches");
    println!("  :q                  quit");
}
