//! CLI argument definitions using clap
//!
//! Commands:
//! - neodb inspect (--pdes <designation> | --name <name>) [--verbose]
//! - neodb query [filters...] [--limit <n>] [--outfile <path>]

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::executor::FilterCriteria;

/// neodb - Explore past and future close approaches of near-Earth objects
#[derive(Parser, Debug)]
#[command(name = "neodb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to CSV file of near-Earth objects
    #[arg(long, global = true)]
    pub neofile: Option<PathBuf>,

    /// Path to JSON file of close approach data
    #[arg(long, global = true)]
    pub cadfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect one NEO by primary designation or by name
    Inspect(InspectArgs),

    /// Query close approaches that match a set of criteria
    Query(QueryArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InspectTarget {
    /// Primary designation of the NEO, e.g. 433
    #[arg(long)]
    pub pdes: Option<String>,

    /// IAU name of the NEO, e.g. Eros
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub target: InspectTarget,

    /// Also list every known close approach of the NEO
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Only approaches on this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Only approaches on or after this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start_date: Option<NaiveDate>,

    /// Only approaches on or before this date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub end_date: Option<NaiveDate>,

    /// Minimum approach distance in au
    #[arg(long)]
    pub min_distance: Option<f64>,

    /// Maximum approach distance in au
    #[arg(long)]
    pub max_distance: Option<f64>,

    /// Minimum relative velocity in km/s
    #[arg(long)]
    pub min_velocity: Option<f64>,

    /// Maximum relative velocity in km/s
    #[arg(long)]
    pub max_velocity: Option<f64>,

    /// Minimum NEO diameter in km
    #[arg(long)]
    pub min_diameter: Option<f64>,

    /// Maximum NEO diameter in km
    #[arg(long)]
    pub max_diameter: Option<f64>,

    /// Only potentially hazardous NEOs
    #[arg(long, conflicts_with = "not_hazardous")]
    pub hazardous: bool,

    /// Only NEOs that are not potentially hazardous
    #[arg(long)]
    pub not_hazardous: bool,

    /// Maximum number of results; 0 means unlimited
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Write results to this .csv or .json file instead of stdout
    #[arg(short, long)]
    pub outfile: Option<PathBuf>,
}

impl QueryArgs {
    /// Collects the filter flags into query criteria
    pub fn criteria(&self) -> FilterCriteria {
        let hazardous = match (self.hazardous, self.not_hazardous) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        FilterCriteria {
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
            distance_min: self.min_distance,
            distance_max: self.max_distance,
            velocity_min: self.min_velocity,
            velocity_max: self.max_velocity,
            diameter_min: self.min_diameter,
            diameter_max: self.max_diameter,
            hazardous,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("'{}' is not a YYYY-MM-DD date: {}", s, e))
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
