//! Butchery Break-even Calculator
//!
//! What-if reports over the butchery's opening plan.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use butchery_calculator::models::{Month, ProductFilter, SeasonalPreset};
use butchery_calculator::report;
use butchery_calculator::{ProductField, Session};

#[derive(Parser)]
#[command(name = "butchery-calculator")]
#[command(about = "Break-even and profitability calculator for a small butchery")]
struct Cli {
    /// Working hours per day available for preparation
    #[arg(long, env = "BUTCHERY_HOURS_PER_DAY", global = true)]
    hours_per_day: Option<String>,

    /// Working days per month
    #[arg(long, env = "BUTCHERY_DAYS_PER_MONTH", global = true)]
    days_per_month: Option<String>,

    /// Seasonal demand curve
    #[arg(long, value_enum, default_value = "bbq", global = true)]
    season: SeasonArg,

    /// Restrict portfolio totals to one product category
    #[arg(long, value_enum, default_value = "all", global = true)]
    filter: FilterArg,

    /// Override one month's demand, e.g. "jul=160" (repeatable)
    #[arg(long = "multiplier", value_name = "MONTH=PERCENT", global = true)]
    multipliers: Vec<String>,

    /// Override a product's planned monthly units, e.g. "2=25" (repeatable)
    #[arg(long = "units", value_name = "ID=UNITS", global = true)]
    units: Vec<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// More log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeasonArg {
    /// Every month at 100%
    Flat,
    /// Summer barbecue peak
    Bbq,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Classic,
    Pitmaster,
}

#[derive(Clone, Copy, ValueEnum)]
enum RankArg {
    /// Margin per minute of labor
    Efficiency,
    /// Total monthly margin contribution (top 10)
    Contribution,
    /// Margin per unit
    Margin,
}

#[derive(Subcommand)]
enum Commands {
    /// Break-even status and category split
    Summary,

    /// Ranked product economics
    Products {
        #[arg(short, long, value_enum, default_value = "efficiency")]
        rank: RankArg,
    },

    /// Labor capacity utilization
    Capacity,

    /// Month-by-month performance under the seasonal curve
    Seasonality,

    /// 24-month cumulative profit from the startup investment
    Projection,

    /// Startup and recurring cost totals
    Costs,

    /// Every view at once
    Dashboard,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let session = build_session(&cli)?;
    let dashboard = session.dashboard();

    match cli.command {
        Commands::Summary => {
            emit(cli.json, &(&dashboard.portfolio, &dashboard.profitability), || {
                report::format_summary(&dashboard)
            })?;
        }

        Commands::Products { rank } => {
            let (title, ranked) = match rank {
                RankArg::Efficiency => ("Product Efficiency (€/min)", &dashboard.efficiency_ranking),
                RankArg::Contribution => ("Top Margin Contributors", &dashboard.top_contributors),
                RankArg::Margin => ("Product Performance", &dashboard.performance_ranking),
            };
            emit(cli.json, ranked, || report::format_product_table(title, ranked))?;
        }

        Commands::Capacity => {
            emit(cli.json, &dashboard.capacity, || dashboard.capacity.to_string())?;
        }

        Commands::Seasonality => {
            emit(cli.json, &dashboard.seasonality, || dashboard.seasonality.to_string())?;
        }

        Commands::Projection => {
            emit(cli.json, &dashboard.projection, || dashboard.projection.to_string())?;
        }

        Commands::Costs => {
            emit(cli.json, &(&dashboard.startup, &dashboard.opex), || {
                format!("{}\n{}", dashboard.startup, dashboard.opex)
            })?;
        }

        Commands::Dashboard => {
            emit(cli.json, &dashboard, || {
                [
                    report::format_summary(&dashboard),
                    dashboard.capacity.to_string(),
                    dashboard.seasonality.to_string(),
                    dashboard.projection.to_string(),
                    report::format_product_table(
                        "Product Efficiency (€/min)",
                        &dashboard.efficiency_ranking,
                    ),
                    report::format_product_table(
                        "Top Margin Contributors",
                        &dashboard.top_contributors,
                    ),
                    dashboard.startup.to_string(),
                    dashboard.opex.to_string(),
                ]
                .join("\n")
            })?;
        }
    }

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Start from the sample plan and apply the command-line overrides
fn build_session(cli: &Cli) -> Result<Session> {
    let mut session = Session::with_sample_data();

    if let Some(hours) = &cli.hours_per_day {
        session.set_hours_per_day(hours);
    }
    if let Some(days) = &cli.days_per_month {
        session.set_days_per_month(days);
    }

    session.apply_seasonal_preset(match cli.season {
        SeasonArg::Flat => SeasonalPreset::Flat,
        SeasonArg::Bbq => SeasonalPreset::Bbq,
    });
    session.set_filter(match cli.filter {
        FilterArg::All => ProductFilter::All,
        FilterArg::Classic => ProductFilter::Classic,
        FilterArg::Pitmaster => ProductFilter::Pitmaster,
    });

    for entry in &cli.multipliers {
        let (month, percent) = split_assignment(entry, "--multiplier")?;
        let month: Month = month
            .parse()
            .with_context(|| format!("Invalid --multiplier '{}'", entry))?;
        session.set_seasonal_multiplier(month, percent);
    }

    for entry in &cli.units {
        let (id, units) = split_assignment(entry, "--units")?;
        if !session.update_product(id, ProductField::Units, units)? {
            bail!("No product with id '{}' (sample ids are 1-6)", id);
        }
    }

    Ok(session)
}

fn split_assignment<'a>(entry: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    entry
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .with_context(|| format!("Expected KEY=VALUE for {}, got '{}'", flag, entry))
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{}", rendered);
    } else {
        print!("{}", text());
    }
    Ok(())
}
