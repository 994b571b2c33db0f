use anyhow::{anyhow, Context, Result};
use clap::Parser;
use stack_cost_estimator::{
    resolve_rate, Currency, DeploymentOption, EditorPlan, FixedRateProvider, RatesSnapshot,
};
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
use config::{load_config, resolve_config_path, save_config, EstimatorConfig};

#[derive(Parser, Debug)]
#[clap(author = "Red", version, about)]
struct Args {
    #[arg(short = 'v')]
    verbose: bool,

    #[arg(short = 'c', long = "config")]
    config: Option<String>,

    #[arg(short = 'm', long = "messages")]
    messages: Option<u64>,

    #[arg(short = 'u', long = "users")]
    users: Option<u64>,

    #[arg(short = 'r', long = "records")]
    records: Option<u64>,

    #[arg(short = 's', long = "storage")]
    storage: Option<f64>,

    #[arg(short = 'e', long = "editor")]
    editor: Option<String>,

    #[arg(short = 'd', long = "deployment")]
    deployment: Option<String>,

    #[arg(long = "vps-price", allow_hyphen_values = true)]
    vps_price: Option<f64>,

    #[arg(long = "margin")]
    margin: Option<f64>,

    #[arg(long = "maintenance")]
    maintenance: Option<f64>,

    #[arg(long = "currency")]
    currency: Option<String>,

    #[arg(long = "rates-file")]
    rates_file: Option<String>,

    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    #[arg(long = "json")]
    json: bool,

    #[arg(long = "save")]
    save: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(config: &mut EstimatorConfig, args: &Args) -> Result<()> {
    let mut usage = config.usage.clone();

    if let Some(messages) = args.messages {
        usage = usage.with_required_messages(messages);
    }
    if let Some(users) = args.users {
        usage = usage.with_active_users(users);
    }
    if let Some(records) = args.records {
        usage = usage.with_database_records(records);
    }
    if let Some(storage) = args.storage {
        usage = usage.with_storage_gb(storage);
    }
    if let Some(editor) = &args.editor {
        usage = usage.with_editor_plan(EditorPlan::from_name(editor));
    }
    if let Some(deployment) = &args.deployment {
        usage = usage.with_deployment(DeploymentOption::from_name(deployment));
    }
    if let Some(price) = args.vps_price {
        usage = usage.with_vps_monthly_price(price);
    }
    if let Some(margin) = args.margin {
        usage = usage.with_profit_margin_pct(margin);
    }
    if let Some(maintenance) = args.maintenance {
        usage = usage.with_maintenance_pct(maintenance);
    }
    config.usage = usage;

    if let Some(code) = &args.currency {
        config.currency = Currency::from_code(code)
            .ok_or_else(|| anyhow!("Unsupported currency: {} (expected USD, BRL or EUR)", code))?;
    }

    Ok(())
}

fn exchange_rate(currency: Currency, rates_file: Option<&str>) -> f64 {
    match rates_file {
        Some(path) => match RatesSnapshot::load_from_file(path) {
            Ok(snapshot) => resolve_rate(&snapshot, currency),
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "could not load rates, using fallback");
                resolve_rate(&FixedRateProvider::default(), currency)
            }
        },
        None => resolve_rate(&FixedRateProvider::default(), currency),
    }
}

fn run(args: Args) -> Result<()> {
    let config_path = resolve_config_path(args.config.as_deref());

    let (mut config, config_loaded) = match load_config(&config_path) {
        Ok(config) => (config, true),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "ignoring unreadable config");
            (EstimatorConfig::default(), false)
        }
    };
    apply_overrides(&mut config, &args)?;

    if args.save {
        // Never replace a file we could not read with defaults.
        if !config_loaded {
            eprintln!(
                "Warning: Not saving config, {} could not be read; fix or remove it first",
                config_path.display()
            );
        } else {
            match save_config(&config_path, &config) {
                Ok(()) => tracing::info!(path = %config_path.display(), "saved config"),
                Err(e) => eprintln!("Warning: Could not save config: {:#}", e),
            }
        }
    }

    let engine = config.build_engine()?;
    let rate = exchange_rate(config.currency, args.rates_file.as_deref());
    let report = engine.report(&config.usage, config.currency, rate);

    let rendered = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        report.render_text()
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report: {}", path))?;
            println!("Report written to {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}
