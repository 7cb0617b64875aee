use std::path::PathBuf;

use thiserror::Error;

use crate::data::SortOrder;
use crate::pages::Page;

/// Dataset file used when neither an argument nor `LAPTOP_DATA` names one.
pub const DEFAULT_DATA_PATH: &str = "df.csv";
pub const DEFAULT_MAX_ROWS: usize = 20;

pub const HELP: &str = "\
Usage: laptop-insights [DATA_FILE] [OPTIONS]

Load a laptop dataset (.csv, .json or .parquet) and print dashboard pages.

Options:
  --page NAME      page to show (home, overview, brand, price, performance,
                   display, insights, conclusion, or all)  [default: home]
  --brand NAME     brand for the brand page  [default: first brand in file]
  --order ORDER    brand table price order: asc or desc  [default: asc]
  --max-rows N     rows shown per table  [default: 20]
  --list-pages     print the page names and exit
  -h, --help       print this help

Environment:
  LAPTOP_DATA      data file when DATA_FILE is omitted  [default: df.csv]
  LAPTOP_MAX_ROWS  default for --max-rows
  RUST_LOG         log filter, e.g. debug";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing value for {0}")]
    MissingValue(&'static str),
    #[error("Unknown page: {0}")]
    UnknownPage(String),
    #[error("Unknown sort order: {0} (expected asc or desc)")]
    UnknownOrder(String),
    #[error("Invalid number for {flag}: {value}")]
    BadNumber { flag: &'static str, value: String },
    #[error("Unknown arg: {0}")]
    UnknownArg(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    /// Pages to print, in order.
    pub pages: Vec<Page>,
    pub brand: Option<String>,
    pub price_order: SortOrder,
    pub max_rows: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    ListPages,
    Help,
}

impl Config {
    /// Parse arguments (without the program name). `env` looks up
    /// environment variables; pass `|k| std::env::var(k).ok()` in production.
    pub fn parse<I, F>(args: I, env: F) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut data_path: Option<PathBuf> = None;
        let mut pages = vec![Page::Home];
        let mut brand = None;
        let mut price_order = SortOrder::Ascending;
        let mut max_rows = match env("LAPTOP_MAX_ROWS") {
            Some(v) => parse_rows("LAPTOP_MAX_ROWS", &v)?,
            None => DEFAULT_MAX_ROWS,
        };

        let mut args = args.into_iter();
        while let Some(a) = args.next() {
            match a.as_str() {
                "--page" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--page"))?;
                    pages = if v.eq_ignore_ascii_case("all") {
                        Page::ALL.to_vec()
                    } else {
                        vec![Page::from_name(&v).ok_or(ConfigError::UnknownPage(v))?]
                    };
                }
                "--brand" => brand = Some(args.next().ok_or(ConfigError::MissingValue("--brand"))?),
                "--order" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--order"))?;
                    price_order = match v.to_ascii_lowercase().as_str() {
                        "asc" | "ascending" => SortOrder::Ascending,
                        "desc" | "descending" => SortOrder::Descending,
                        _ => return Err(ConfigError::UnknownOrder(v)),
                    };
                }
                "--max-rows" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--max-rows"))?;
                    max_rows = parse_rows("--max-rows", &v)?;
                }
                "--list-pages" => return Ok(Command::ListPages),
                "-h" | "--help" => return Ok(Command::Help),
                other if other.starts_with('-') => return Err(ConfigError::UnknownArg(other.to_string())),
                _ if data_path.is_none() => data_path = Some(PathBuf::from(&a)),
                _ => return Err(ConfigError::UnknownArg(a.clone())),
            }
        }

        let data_path = data_path
            .or_else(|| env("LAPTOP_DATA").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Ok(Command::Run(Config {
            data_path,
            pages,
            brand,
            price_order,
            max_rows,
        }))
    }
}

fn parse_rows(flag: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::BadNumber {
            flag,
            value: value.to_string(),
        }),
    }
}
