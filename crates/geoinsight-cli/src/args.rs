use clap::{Parser, Subcommand};

/// CLI arguments for geoinsight
#[derive(Debug, Parser)]
#[command(
    name = "geoinsight",
    version,
    about = "Search countries and explore demographics, weather, risk and news from the GeoInsight backend"
)]
pub struct CliArgs {
    /// Base URL of the GeoInsight API
    #[arg(
        long = "api-url",
        env = "GEOINSIGHT_API_URL",
        default_value = geoinsight_core::config::DEFAULT_API_URL,
        global = true
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long = "timeout-secs", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Serve suggestions from the built-in country list instead of the API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up a country by name
    Search {
        /// Country name (e.g. Germany, "South Korea")
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Show autocomplete suggestions for a partial name
    Suggest {
        /// Partial country name, at least 2 characters
        query: String,
    },

    /// Interactive search prompt with live suggestions
    Repl,

    /// Check that the backend is up
    Health,

    /// Show the status of the backend's data sources
    Status,
}
