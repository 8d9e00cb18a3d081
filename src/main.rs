//! `u-assign` command-line entry point.
//!
//! Reads a student CSV (and optionally an override CSV), runs one
//! allocation, and writes the allocation and statistics tables.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use u_assign::config::{AllocationConfig, FallbackPolicy, PreferencePass};
use u_assign::table::io;
use u_assign::{Allocator, PreferenceStats};

/// Allocate students to thesis supervisors by CGPA and preference.
#[derive(Parser)]
#[command(name = "u-assign")]
#[command(version)]
struct Cli {
    /// Student table: Roll, Name, Email, CGPA, then one column per faculty
    students: PathBuf,

    /// Override table with Faculty and Roll columns
    #[arg(short, long)]
    overrides: Option<PathBuf>,

    /// Where to write the allocation table
    #[arg(long, default_value = "output_btp_mtp_allocation.csv")]
    allocation_out: PathBuf,

    /// Where to write the allocation preference statistics
    #[arg(long, default_value = "fac_preference_count.csv")]
    stats_out: PathBuf,

    /// Also write how often each faculty was ranked, regardless of outcome
    #[arg(long)]
    demand_out: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Consider only the first N faculty columns
    #[arg(short = 'n', long)]
    faculties: Option<usize>,

    /// How students without an available preference are seated
    #[arg(long, value_enum)]
    fallback: Option<FallbackArg>,

    /// Order of the preference pass
    #[arg(long, value_enum)]
    pass: Option<PassArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FallbackArg {
    RoundRobin,
    LeastLoaded,
}

#[derive(Clone, Copy, ValueEnum)]
enum PassArg {
    ByStudent,
    ByRank,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::RoundRobin => FallbackPolicy::RoundRobin,
            FallbackArg::LeastLoaded => FallbackPolicy::LeastLoaded,
        }
    }
}

impl From<PassArg> for PreferencePass {
    fn from(arg: PassArg) -> Self {
        match arg {
            PassArg::ByStudent => PreferencePass::ByStudent,
            PassArg::ByRank => PreferencePass::ByRank,
        }
    }
}

impl Cli {
    fn load_config(&self) -> Result<AllocationConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_reader(File::open(path)?)?,
            None => AllocationConfig::default(),
        };
        if let Some(n) = self.faculties {
            config.faculty_limit = Some(n);
        }
        if let Some(fallback) = self.fallback {
            config.fallback = fallback.into();
        }
        if let Some(pass) = self.pass {
            config.preference_pass = pass.into();
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.load_config()?;
    let table = io::read_students_path(&cli.students)?;
    let overrides = match &cli.overrides {
        Some(path) => io::read_overrides_path(path)?,
        None => Vec::new(),
    };

    let allocator = Allocator::new().with_config(config);
    // Warnings are already logged by the allocator as they are raised.
    let outcome = allocator.allocate(&table, &overrides)?;

    io::write_allocation_path(&outcome, &cli.allocation_out)?;
    io::write_stats_path(&outcome.stats, &cli.stats_out)?;
    info!(
        allocation = %cli.allocation_out.display(),
        stats = %cli.stats_out.display(),
        "wrote results"
    );

    if let Some(path) = &cli.demand_out {
        let schema = match allocator.config().faculty_limit {
            Some(limit) => table.schema.limited(limit)?,
            None => table.schema.clone(),
        };
        io::write_stats_path(&PreferenceStats::demand(&schema, &table.students), path)?;
        info!(demand = %path.display(), "wrote preference demand");
    }

    if outcome.unassigned_count() > 0 {
        warn!(
            students = outcome.unassigned_count(),
            "some students could not be seated"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "u_assign=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
