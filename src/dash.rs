use log::{debug, info, warn};

pub use criteria_tree::*;
use snafu::{prelude::*, ErrorCompat, Snafu};

use std::fs;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::args::Args;
use crate::dash::cache::CachedFetcher;
use crate::dash::config_reader::*;
use crate::dash::fetch::*;
use crate::dash::parser::*;

pub mod cache;
pub mod config_reader;
pub mod demo;
pub mod fetch;
mod io_common;
mod io_csv;
mod io_xlsx;
pub mod parser;
pub mod report;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DashError {
    #[snafu(display("Missing credentials: set {} and {}", USER_ENV, PASSWORD_ENV))]
    CredentialsMissing {},
    #[snafu(display("Could not fetch {resource}: {source}"))]
    Fetch {
        source: FetchFailure,
        resource: String,
    },
    #[snafu(display("Could not read the criteria file in any known format: {message}"))]
    ParseFailure {
        message: String,
        attempts: Vec<ParseAttempt>,
    },
    #[snafu(display("The criteria file does not have the expected columns: {source}"))]
    Schema { source: TreeErrors },
    #[snafu(display("Error opening the workbook: {source}"))]
    OpeningExcel { source: calamine::XlsxError },
    #[snafu(display("The workbook has no sheet or no header row"))]
    EmptyExcel {},
    #[snafu(display("Error reading the text with delimiter {delimiter:?}: {source}"))]
    CsvParse {
        source: csv::Error,
        delimiter: char,
    },
    #[snafu(display("The file is empty"))]
    EmptyInput {},
    #[snafu(display("Invalid URL {url}: {source}"))]
    InvalidUrl {
        source: url::ParseError,
        url: String,
    },
    #[snafu(display("Could not create the HTTP client: {source}"))]
    HttpClient { source: reqwest::Error },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing JSON: {source}"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing CSV to {path}: {source}"))]
    WritingCsv { source: csv::Error, path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;
pub type BDashResult<T> = Result<T, Box<DashError>>;

/// Where the criteria shown on the dashboard come from.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Remote,
    File,
    Demo,
}

/// The outcome of one loading run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LoadedCriteria {
    pub source: DataSource,
    pub format: Option<SourceFormat>,
    /// Set when the demonstration data replaces the real data.
    pub warning: Option<String>,
    pub records: Vec<CriterionRecord>,
}

/// The place the criteria file is read from, chosen once per process.
pub enum CriteriaSource {
    Remote(CachedFetcher),
    File(String),
    Demo(Option<String>),
}

/// Decodes, normalizes and builds the criteria of a file.
pub fn criteria_from_bytes(bytes: &[u8]) -> DashResult<(Vec<CriterionRecord>, SourceFormat)> {
    let parsed = parse(bytes)?;
    debug!("criteria_from_bytes: attempts: {:?}", parsed.attempts);
    let records = build(&parsed.table).context(SchemaSnafu {})?;
    Ok((records, parsed.format))
}

fn demo_criteria(warning: Option<String>) -> DashResult<LoadedCriteria> {
    let records = build(&normalize(demo::demo_table())).context(SchemaSnafu {})?;
    Ok(LoadedCriteria {
        source: DataSource::Demo,
        format: None,
        warning,
        records,
    })
}

fn load_once(source: &mut CriteriaSource, now: Instant) -> DashResult<LoadedCriteria> {
    let (data_source, bytes) = match source {
        CriteriaSource::Demo(warning) => return demo_criteria(warning.clone()),
        CriteriaSource::File(path) => {
            info!("Attempting to read criteria file {:?}", path);
            let bytes = fs::read(path.as_str()).context(OpeningFileSnafu { path: path.clone() })?;
            (DataSource::File, bytes)
        }
        CriteriaSource::Remote(fetcher) => {
            let bytes = fetcher.fetch_at(now).context(FetchSnafu {
                resource: fetcher.location(),
            })?;
            (DataSource::Remote, bytes)
        }
    };
    let (records, format) = criteria_from_bytes(&bytes)?;
    Ok(LoadedCriteria {
        source: data_source,
        format: Some(format),
        warning: None,
        records,
    })
}

/// Loads the criteria. When the file cannot be fetched or decoded, the
/// demonstration data is used instead and the reason is kept as a warning.
/// Other failures, such as missing columns, are returned.
pub fn load_criteria(source: &mut CriteriaSource, now: Instant) -> DashResult<LoadedCriteria> {
    match load_once(source, now) {
        Ok(x) => Ok(x),
        Err(e @ DashError::Fetch { .. }) | Err(e @ DashError::ParseFailure { .. }) => {
            warn!("{}; showing the demonstration data", e);
            demo_criteria(Some(e.to_string()))
        }
        Err(e) => Err(e),
    }
}

/// Picks the source of the criteria from the options.
pub fn select_source(args: &Args, config: &DashboardConfig) -> DashResult<CriteriaSource> {
    if args.demo {
        return Ok(CriteriaSource::Demo(None));
    }
    if let Some(path) = &args.input {
        return Ok(CriteriaSource::File(path.clone()));
    }
    let url_template = match &config.source_url {
        Some(u) => u,
        None => {
            warn!("No criteria file configured; showing the demonstration data");
            return Ok(CriteriaSource::Demo(Some(
                "no criteria file configured".to_string(),
            )));
        }
    };
    let credentials = match Credentials::from_values(args.user.clone(), args.password.clone()) {
        Ok(c) => c,
        Err(e) => {
            warn!("{}; showing the demonstration data", e);
            return Ok(CriteriaSource::Demo(Some(e.to_string())));
        }
    };
    debug!("select_source: {:?}", credentials);
    let fetcher = WebDavFetcher::new(url_template, credentials, config.timeout()?)?;
    Ok(CriteriaSource::Remote(CachedFetcher::new(
        Box::new(fetcher),
        config.cache_ttl(),
    )))
}

fn render(
    source: &mut CriteriaSource,
    config: &DashboardConfig,
    args: &Args,
) -> DashResult<()> {
    let loaded = load_criteria(source, Instant::now())?;
    info!(
        "render: {} criteria from {:?} ({:?})",
        loaded.records.len(),
        loaded.source,
        loaded.format
    );
    let query = args.search.clone().unwrap_or_default();
    let payload = report::build_payload(config, &loaded, &query)?;
    report::write_payload(&payload, args.out.as_deref().unwrap_or("stdout"))?;
    if let Some(path) = &args.export_csv {
        let selected = search(&loaded.records, &query);
        report::export_csv_file(&selected, path)?;
    }
    Ok(())
}

/// Runs the dashboard pipeline once, or every `--refresh` seconds.
pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let file_config = match &args.config {
        Some(path) => read_config(path)?,
        None => DashboardConfig::default(),
    };
    let config = file_config.merge_args(args);
    // Fail early on invalid values.
    config.max_chars_per_line()?;
    let mut source = select_source(args, &config)?;

    render(&mut source, &config, args)?;
    if let Some(secs) = args.refresh {
        ensure_whatever!(secs > 0, "--refresh must be at least 1 second");
        loop {
            std::thread::sleep(Duration::from_secs(secs));
            if let Err(e) = render(&mut source, &config, args) {
                warn!("render failed: {}", e);
                if let Some(bt) = ErrorCompat::backtrace(&e) {
                    debug!("trace: {}", bt);
                }
            }
        }
    }
    Ok(())
}
