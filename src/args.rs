use clap::Parser;

/// Prepares a spreadsheet of evaluation criteria for the treemap dashboard.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the dashboard settings (title, sourceUrl, timeoutSeconds,
    /// cacheTtlSeconds, maxCharsPerLine). The options below take precedence over this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (URL) The location of the criteria file on the WebDAV server. The text `{user}` is replaced by
    /// the user name.
    #[clap(long, value_parser)]
    pub url: Option<String>,

    /// The user name for the WebDAV server.
    #[clap(long, value_parser, env = "EXPOSCORE_USER")]
    pub user: Option<String>,

    /// The password for the WebDAV server.
    #[clap(long, value_parser, env = "EXPOSCORE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// (file path) Reads the criteria from a local file (xlsx or CSV) instead of the server.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// Shows the demonstration data without contacting the server.
    #[clap(long, takes_value = false)]
    pub demo: bool,

    /// (text) Only lists the criteria containing this text, in any field. Case is ignored.
    #[clap(short, long, value_parser)]
    pub search: Option<String>,

    /// (default Exposcore) The title of the dashboard, also the root of the treemap.
    #[clap(long, value_parser)]
    pub title: Option<String>,

    /// (default 20) The number of characters per line of the criterion labels.
    #[clap(long, value_parser)]
    pub max_chars_per_line: Option<usize>,

    /// (seconds, default 10) How long to wait for the server.
    #[clap(long, value_parser)]
    pub timeout: Option<u64>,

    /// (seconds) If specified, renders the dashboard again at this interval. The file is
    /// downloaded again only once the cache has expired.
    #[clap(long, value_parser)]
    pub refresh: Option<u64>,

    /// (file path, 'stdout' or empty) Where to write the dashboard document in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) If specified, the listed criteria are also written there in CSV format.
    #[clap(long, value_parser)]
    pub export_csv: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
