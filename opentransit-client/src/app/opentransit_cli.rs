use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use opentransit_agency::config::CONFIG_YAML_ENV_VAR;
use opentransit_agency::DashboardConfig;
use opentransit_core::artifact::StatGroup;
use std::path::{Path, PathBuf};

use super::{run, AppError};

/// command line client for the precomputed OpenTransit artifacts and the
/// metrics service
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct OpenTransitCliArguments {
    /// dashboard configuration YAML file. when omitted the YAML held by
    /// OPENTRANSIT_CONFIG_YAML is used, and without it the defaults.
    #[arg(short, long, global = true)]
    pub config: Option<String>,
    /// directory of the per-agency YAML files referenced by the configuration
    #[arg(long, global = true)]
    pub agency_dir: Option<String>,
    /// keep decompressed copies of fetched artifacts in this directory,
    /// overriding `cache_dir` of the configuration
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
    /// select the operation to run
    #[command(subcommand)]
    pub op: OpenTransitOperation,
}

impl OpenTransitCliArguments {
    pub fn load_config(&self) -> Result<DashboardConfig, AppError> {
        let agency_dir = self.agency_dir.as_deref().map(Path::new);
        let mut config = match (&self.config, std::env::var(CONFIG_YAML_ENV_VAR)) {
            (Some(path), _) => match agency_dir {
                Some(dir) => {
                    let yaml = std::fs::read_to_string(path).map_err(|e| {
                        AppError::InvalidArgument(format!("failure reading {path}: {e}"))
                    })?;
                    DashboardConfig::from_yaml_str(&yaml, Some(dir))?
                }
                None => DashboardConfig::from_file(Path::new(path))?,
            },
            (None, Ok(_)) => DashboardConfig::from_env(agency_dir)?,
            (None, Err(_)) => {
                log::warn!("no configuration file and {CONFIG_YAML_ENV_VAR} not set, using defaults");
                DashboardConfig::default()
            }
        };
        if let Some(cache_dir) = &self.cache_dir {
            config.cache_dir = Some(cache_dir.clone());
        }
        Ok(config)
    }

    pub fn run(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        self.op.run(&config)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum OpenTransitOperation {
    /// prints the object store URLs and cache keys of the artifacts for an
    /// agency and service date
    Urls {
        #[arg(short, long)]
        agency: String,
        /// service date, YYYY-MM-DD
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "median")]
        stat_group: StatGroup,
        /// start of the time window, HH:MM
        #[arg(long)]
        start_time: Option<String>,
        /// end of the time window, HH:MM or HH:MM+1 for the next service day
        #[arg(long)]
        end_time: Option<String>,
        /// also print the arrivals URL of this route
        #[arg(short, long)]
        route: Option<String>,
    },
    /// lists the routes of an agency
    Routes {
        #[arg(short, long)]
        agency: String,
    },
    /// prints precomputed trip times from one stop
    TripTimes {
        #[arg(short, long)]
        agency: String,
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "median")]
        stat_group: StatGroup,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(short, long)]
        route: String,
        #[arg(long)]
        direction: String,
        #[arg(long)]
        from_stop: String,
        /// when omitted, trip times to every downstream stop are printed
        #[arg(long)]
        to_stop: Option<String>,
    },
    /// prints precomputed wait times of a route direction
    WaitTimes {
        #[arg(short, long)]
        agency: String,
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, default_value = "median")]
        stat_group: StatGroup,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
        #[arg(short, long)]
        route: String,
        #[arg(long)]
        direction: String,
        /// when omitted, wait times at every stop are printed
        #[arg(long)]
        stop: Option<String>,
    },
    /// summarizes the observed arrivals of a route on a service date
    Arrivals {
        #[arg(short, long)]
        agency: String,
        #[arg(short, long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(short, long)]
        route: String,
    },
    /// queries the metrics service for one trip
    Metrics {
        #[arg(short, long)]
        agency: String,
        #[arg(short, long)]
        route: String,
        #[arg(long)]
        direction: String,
        #[arg(long)]
        start_stop: String,
        #[arg(long)]
        end_stop: String,
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        start_time: Option<String>,
        #[arg(long)]
        end_time: Option<String>,
    },
    /// lists the valid second stops of a route direction
    Stops {
        #[arg(short, long)]
        agency: String,
        #[arg(short, long)]
        route: String,
        #[arg(long)]
        direction: String,
        #[arg(long)]
        first_stop: Option<String>,
    },
    /// summarizes the configuration of an agency
    Agency {
        #[arg(short, long)]
        agency: String,
    },
}

impl OpenTransitOperation {
    pub fn run(&self, config: &DashboardConfig) -> Result<(), AppError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                AppError::TokioError(format!("failure creating async rust tokio runtime: {e}"))
            })?;
        runtime.block_on(run::run_operation(self, config))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

#[cfg(test)]
mod test {
    use super::{OpenTransitCliArguments, OpenTransitOperation};
    use chrono::NaiveDate;
    use clap::Parser;
    use opentransit_core::artifact::StatGroup;

    #[test]
    fn test_parse_trip_times() {
        let args = OpenTransitCliArguments::try_parse_from([
            "opentransit",
            "trip-times",
            "--agency",
            "muni",
            "--date",
            "2020-01-15",
            "--stat-group",
            "p10-median-p90",
            "--route",
            "1",
            "--direction",
            "0",
            "--from-stop",
            "A",
        ])
        .unwrap();
        match args.op {
            OpenTransitOperation::TripTimes {
                date,
                stat_group,
                to_stop,
                ..
            } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
                assert_eq!(stat_group, StatGroup::P10MedianP90);
                assert_eq!(to_stop, None);
            }
            _ => panic!("expected trip-times"),
        }
    }

    #[test]
    fn test_invalid_date_rejected() {
        let arrivals = |date: &str| {
            OpenTransitCliArguments::try_parse_from([
                "opentransit",
                "arrivals",
                "--agency",
                "muni",
                "--date",
                date,
                "--route",
                "1",
            ])
        };
        assert!(arrivals("2020-01-15").is_ok());
        let error = arrivals("01/15/2020").err().unwrap();
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);

        let result = OpenTransitCliArguments::try_parse_from([
            "opentransit",
            "urls",
            "--agency",
            "muni",
            "--date",
            "01/15/2020",
        ]);
        assert_eq!(
            result.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::ValueValidation)
        );
    }

    #[test]
    fn test_cache_dir_argument() {
        let args = OpenTransitCliArguments::try_parse_from([
            "opentransit",
            "routes",
            "--agency",
            "muni",
            "--cache-dir",
            "/tmp/opentransit",
        ])
        .unwrap();
        assert_eq!(args.cache_dir, Some(std::path::PathBuf::from("/tmp/opentransit")));
    }
}
