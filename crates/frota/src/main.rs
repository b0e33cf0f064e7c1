//! frota - driver credential compliance
//!
//! Command line front end for the status engine. It wires together:
//! - Roster loading
//! - Store initialization and write-back
//! - CNH and Omnilink Score status
//! - Dashboard counters, bucket filters and reports

mod render;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use frota_api::DriverRecord;
use frota_config::{Roster, load_config};
use frota_core::{
    Bucket, ComplianceSummary, cnh_status_at, detailed_omnilink_status_at, filter_by_bucket,
    omnilink_score_status_at, report_rows, report_title, sync_roster,
};
use frota_store::{SqliteStore, Store};
use frota_util::{
    config_path_without_env, database_path, format_datetime_full, is_mock_time_active,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use render::OmnilinkOutput;

/// frota - CNH and Omnilink Score compliance for a driver roster
#[derive(Parser, Debug)]
#[command(name = "frota")]
#[command(about = "CNH and Omnilink Score compliance for a driver roster", long_about = None)]
struct Args {
    /// Roster file path (default: ~/.config/frota/roster.toml)
    #[arg(short, long, global = true, env = "FROTA_CONFIG", default_value_os_t = config_path_without_env())]
    config: PathBuf,

    /// Data directory override (or set FROTA_DATA_DIR env var)
    #[arg(short, long, global = true, env = "FROTA_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Reference day (YYYY-MM-DD) instead of the current date
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Read drivers from the store instead of the roster file
    #[arg(long, global = true)]
    from_store: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Status of a CNH given its expiry date
    Cnh {
        /// Expiry date (YYYY-MM-DD or timestamp)
        expiry: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Status of an Omnilink Score given its registration date
    Omnilink {
        /// Registration date (YYYY-MM-DD or timestamp)
        registration: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Status counts for every driver
    Dashboard {
        #[arg(long)]
        json: bool,
    },

    /// Drivers whose Omnilink status falls in a bucket
    Filter {
        /// Bucket key, e.g. vencidos_31-90d
        bucket: String,

        #[arg(long)]
        json: bool,
    },

    /// List the bucket keys accepted by `filter`
    Buckets,

    /// Per-driver compliance report
    Report {
        #[arg(long)]
        json: bool,
    },

    /// Load the roster into the store and write back derived Omnilink fields
    Sync,
}

/// Runs one command against a fixed reference day
struct App {
    args: Args,
    today: NaiveDate,
}

impl App {
    fn new(args: Args) -> Self {
        // Sampled once so every status in this run agrees
        let today = args.today.unwrap_or_else(frota_util::today);
        if args.today.is_none() && is_mock_time_active() {
            warn!(today = %today, "Mock time is active");
        }
        debug!(today = %today, "Reference day");
        Self { args, today }
    }

    fn run(&self) -> Result<()> {
        match &self.args.command {
            Command::Cnh { expiry, json } => self.cnh(expiry.as_deref(), *json),
            Command::Omnilink { registration, json } => {
                self.omnilink(registration.as_deref(), *json)
            }
            Command::Dashboard { json } => self.dashboard(*json),
            Command::Filter { bucket, json } => self.filter(bucket, *json),
            Command::Buckets => {
                for bucket in Bucket::ALL {
                    println!("{bucket}");
                }
                Ok(())
            }
            Command::Report { json } => self.report(*json),
            Command::Sync => self.sync(),
        }
    }

    fn load_roster(&self) -> Result<Roster> {
        let roster = load_config(&self.args.config)
            .with_context(|| format!("Failed to load roster from {:?}", self.args.config))?;

        info!(
            config_path = %self.args.config.display(),
            driver_count = roster.drivers.len(),
            "Roster loaded"
        );
        Ok(roster)
    }

    fn open_store(&self, roster: Option<&Roster>) -> Result<SqliteStore> {
        let data_dir = match (&self.args.data_dir, roster) {
            (Some(dir), _) => dir.clone(),
            (None, Some(roster)) => roster.service.data_dir.clone(),
            (None, None) => self.load_roster()?.service.data_dir,
        };

        let db_path = database_path(&data_dir);
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?;

        info!(db_path = %db_path.display(), "Store initialized");
        Ok(store)
    }

    fn drivers(&self) -> Result<Vec<DriverRecord>> {
        if self.args.from_store {
            let store = self.open_store(None)?;
            Ok(store.list_drivers()?)
        } else {
            Ok(self.load_roster()?.drivers)
        }
    }

    fn cnh(&self, expiry: Option<&str>, json: bool) -> Result<()> {
        let descriptor = cnh_status_at(expiry, self.today);
        if json {
            return print_json(&descriptor);
        }
        println!("{}", render::cnh_line(&descriptor));
        Ok(())
    }

    fn omnilink(&self, registration: Option<&str>, json: bool) -> Result<()> {
        let output = OmnilinkOutput {
            score_status: omnilink_score_status_at(registration, self.today),
            descriptor: detailed_omnilink_status_at(registration, self.today),
        };
        if json {
            return print_json(&output);
        }
        let mut text = String::new();
        render::omnilink_block(&mut text, &output)?;
        print!("{text}");
        Ok(())
    }

    fn dashboard(&self, json: bool) -> Result<()> {
        let drivers = self.drivers()?;
        let summary = ComplianceSummary::from_records(&drivers, self.today);
        if json {
            return print_json(&summary);
        }
        let mut text = String::new();
        render::dashboard(&mut text, &summary)?;
        print!("{text}");
        Ok(())
    }

    fn filter(&self, key: &str, json: bool) -> Result<()> {
        let bucket = key.parse::<Bucket>().map_err(|err| {
            let keys: Vec<_> = Bucket::ALL.iter().map(|b| b.key()).collect();
            anyhow!("{err}. Valid keys: {}", keys.join(", "))
        })?;

        let drivers = self.drivers()?;
        let matching = filter_by_bucket(&drivers, bucket, self.today);
        info!(bucket = %bucket, matched = matching.len(), "Bucket filter applied");

        if json {
            return print_json(&matching);
        }
        for record in matching {
            let descriptor =
                detailed_omnilink_status_at(record.omnilink_registration.as_deref(), self.today);
            println!("{}\t{}\t{}", record.id, record.name, descriptor.message);
        }
        Ok(())
    }

    fn report(&self, json: bool) -> Result<()> {
        let drivers = self.drivers()?;
        let rows = report_rows(&drivers, self.today);
        if json {
            return print_json(&rows);
        }
        let mut text = String::new();
        render::report(&mut text, &rows)?;

        println!("{}", report_title(self.today));
        println!();
        print!("{text}");
        println!();
        println!("Gerado em {}", format_datetime_full(&frota_util::now()));
        Ok(())
    }

    fn sync(&self) -> Result<()> {
        let roster = self.load_roster()?;
        let store = self.open_store(Some(&roster))?;

        let report = sync_roster(&store, &roster.drivers, self.today)
            .context("Failed to sync roster into the store")?;

        println!(
            "Synced {} drivers ({} Omnilink status changes)",
            report.synced, report.status_changes
        );
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    debug!(version = env!("CARGO_PKG_VERSION"), "frota starting");

    App::new(args).run()
}
