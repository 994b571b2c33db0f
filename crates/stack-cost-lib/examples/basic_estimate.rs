use stack_cost_estimator::prelude::*;
use stack_cost_estimator::{ExchangeRateProvider, FixedRateProvider, RatesSnapshot};
use std::env;

fn main() -> Result<()> {
    let engine = PricingEngine::new();
    let args: Vec<String> = env::args().collect();

    // Optional rate snapshot as the first argument
    let provider: Box<dyn ExchangeRateProvider> = if args.len() >= 2 {
        println!("Loading exchange rates from: {}", args[1]);
        Box::new(RatesSnapshot::load_from_file(&args[1])?)
    } else {
        Box::new(FixedRateProvider::default())
    };

    let scenarios = [
        ("Prototype", UsageConfig::new()),
        (
            "Growing product",
            UsageConfig::new()
                .with_required_messages(1_200)
                .with_active_users(150_000)
                .with_database_records(27_000_000)
                .with_storage_gb(20.0)
                .with_editor_plan(EditorPlan::Pro)
                .with_deployment(DeploymentOption::Vps)
                .with_vps_monthly_price(15.0),
        ),
    ];

    for (name, config) in &scenarios {
        let breakdown = engine.estimate(config);

        println!();
        println!("=== {} ===", name);
        println!(
            "Recommended plan: {} ({} messages)",
            breakdown.plan().name(),
            breakdown.plan().message_limit()
        );

        for currency in [Currency::Usd, Currency::Brl, Currency::Eur] {
            let rate = resolve_rate(provider.as_ref(), currency);
            println!(
                "{}: development {} | monthly {} | with margin {} / {}",
                currency.code(),
                format_currency(breakdown.development_cost(), currency, rate),
                format_currency(breakdown.monthly_recurring_cost(), currency, rate),
                format_currency(breakdown.development_total_with_margin(), currency, rate),
                format_currency(breakdown.monthly_total_with_margin(), currency, rate),
            );
        }
    }

    println!();
    print!("{}", engine.report(&scenarios[1].1, Currency::Usd, 1.0).render_text());

    Ok(())
}
