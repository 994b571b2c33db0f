use proptest::prelude::*;
use stack_cost_estimator::{
    format_currency, parse_currency, Currency, DeploymentOption, EditorPlan, ExchangeRates,
    PlanCatalog, PricingEngine, StaticHost, UsageConfig,
};

fn editor_plan() -> impl Strategy<Value = EditorPlan> {
    prop_oneof![
        Just(EditorPlan::Hobby),
        Just(EditorPlan::Pro),
        Just(EditorPlan::Business),
    ]
}

fn deployment() -> impl Strategy<Value = DeploymentOption> {
    prop_oneof![
        Just(DeploymentOption::None),
        Just(DeploymentOption::StaticFree(StaticHost::Netlify)),
        Just(DeploymentOption::StaticFree(StaticHost::Vercel)),
        Just(DeploymentOption::Vps),
    ]
}

fn usage_config() -> impl Strategy<Value = UsageConfig> {
    (
        0u64..10_000,
        0u64..1_000_000,
        0u64..200_000_000,
        0.0f64..2_000.0,
        editor_plan(),
        deployment(),
        0.0f64..500.0,
        0.0f64..500.0,
        0.0f64..300.0,
    )
        .prop_map(
            |(messages, users, records, storage, editor, deployment, vps_price, margin, maintenance)| {
                UsageConfig::new()
                    .with_required_messages(messages)
                    .with_active_users(users)
                    .with_database_records(records)
                    .with_storage_gb(storage)
                    .with_editor_plan(editor)
                    .with_deployment(deployment)
                    .with_vps_monthly_price(vps_price)
                    .with_profit_margin_pct(margin)
                    .with_maintenance_pct(maintenance)
            },
        )
}

proptest! {
    #[test]
    fn recommended_plan_covers_messages_or_is_top_tier(messages in 0u64..20_000) {
        let catalog = PlanCatalog::standard();
        let plan = catalog.recommend(messages);

        prop_assert!(catalog.tiers().contains(plan));
        if plan.message_limit() < messages {
            prop_assert_eq!(plan, catalog.top_tier());
        } else {
            // No cheaper tier would also cover the request.
            prop_assert!(catalog
                .tiers()
                .iter()
                .filter(|tier| tier.message_limit() >= messages)
                .all(|tier| tier.message_limit() >= plan.message_limit()));
        }
    }

    #[test]
    fn all_costs_are_non_negative(config in usage_config()) {
        let breakdown = PricingEngine::new().estimate(&config);

        prop_assert!(breakdown.backend_cost() >= 0.0);
        prop_assert!(breakdown.development_cost() >= 0.0);
        prop_assert!(breakdown.monthly_recurring_cost() >= 0.0);
        prop_assert!(breakdown.development_total_with_margin() >= 0.0);
        prop_assert!(breakdown.monthly_total_with_margin() >= 0.0);
    }

    #[test]
    fn backend_cost_is_monotonic_in_users(config in usage_config(), extra in 0u64..500_000) {
        let engine = PricingEngine::new();
        let more = config.clone().with_active_users(config.active_users() + extra);
        prop_assert!(engine.backend_cost(&more) >= engine.backend_cost(&config));
    }

    #[test]
    fn backend_cost_is_monotonic_in_records(config in usage_config(), extra in 0u64..100_000_000) {
        let engine = PricingEngine::new();
        let more = config.clone().with_database_records(config.database_records() + extra);
        prop_assert!(engine.backend_cost(&more) >= engine.backend_cost(&config));
    }

    #[test]
    fn backend_cost_is_monotonic_in_storage(config in usage_config(), extra in 0.0f64..1_000.0) {
        let engine = PricingEngine::new();
        let more = config.clone().with_storage_gb(config.storage_gb() + extra);
        prop_assert!(engine.backend_cost(&more) >= engine.backend_cost(&config));
    }

    #[test]
    fn development_cost_is_monotonic_in_messages(config in usage_config(), extra in 0u64..5_000) {
        let engine = PricingEngine::new();
        let more = config.clone().with_required_messages(config.required_messages() + extra);
        prop_assert!(engine.development_cost(&more) >= engine.development_cost(&config));
    }

    #[test]
    fn monthly_cost_is_monotonic_in_maintenance(config in usage_config(), extra in 0.0f64..100.0) {
        let engine = PricingEngine::new();
        let more = config.clone().with_maintenance_pct(config.maintenance_pct() + extra);
        prop_assert!(
            engine.estimate(&more).monthly_recurring_cost()
                >= engine.estimate(&config).monthly_recurring_cost()
        );
    }

    #[test]
    fn deployment_cost_is_monotonic_in_vps_price(config in usage_config(), extra in 0.0f64..500.0) {
        let engine = PricingEngine::new();
        let more = config.clone().with_vps_monthly_price(config.vps_monthly_price() + extra);
        prop_assert!(engine.deployment_cost(&more) >= engine.deployment_cost(&config));
        prop_assert!(
            engine.estimate(&more).monthly_recurring_cost()
                >= engine.estimate(&config).monthly_recurring_cost()
        );
    }

    #[test]
    fn static_hosting_is_free(config in usage_config(), vps_price in 0.0f64..500.0) {
        let engine = PricingEngine::new();
        for host in [StaticHost::Netlify, StaticHost::Vercel] {
            let hosted = config
                .clone()
                .with_deployment(DeploymentOption::StaticFree(host))
                .with_vps_monthly_price(vps_price);
            prop_assert_eq!(engine.deployment_cost(&hosted), 0.0);
        }
    }

    #[test]
    fn totals_are_monotonic_in_margin(config in usage_config(), extra in 0.0f64..200.0) {
        let engine = PricingEngine::new();
        let more = config.clone().with_profit_margin_pct(config.profit_margin_pct() + extra);
        let base = engine.estimate(&config);
        let raised = engine.estimate(&more);

        prop_assert!(raised.development_total_with_margin() >= base.development_total_with_margin());
        prop_assert!(raised.monthly_total_with_margin() >= base.monthly_total_with_margin());
    }

    #[test]
    fn estimate_is_deterministic(config in usage_config()) {
        let engine = PricingEngine::new();
        prop_assert_eq!(engine.estimate(&config), engine.estimate(&config));
    }

    #[test]
    fn currency_round_trip(amount in 0.0f64..1_000_000.0) {
        let rates = ExchangeRates::default();
        for currency in [Currency::Usd, Currency::Brl, Currency::Eur] {
            let rate = rates.rate_for(currency);
            let text = format_currency(amount, currency, rate);
            let parsed = parse_currency(&text, currency).unwrap();
            prop_assert!((parsed / rate - amount).abs() <= 0.01, "{} -> {}", text, parsed);
        }
    }
}

#[test]
fn zero_usage_has_no_backend_cost() {
    let config = UsageConfig::new()
        .with_active_users(0)
        .with_database_records(0)
        .with_storage_gb(0.0);

    assert_eq!(PricingEngine::new().backend_cost(&config), 0.0);
}

#[test]
fn margin_is_exact_for_documented_percentages() {
    let engine = PricingEngine::new();
    for pct in [0.0, 30.0, 100.0, 500.0] {
        let config = UsageConfig::new()
            .with_required_messages(1_500)
            .with_editor_plan(EditorPlan::Business)
            .with_profit_margin_pct(pct);
        let breakdown = engine.estimate(&config);

        assert_eq!(breakdown.development_cost(), 334.0);
        assert_eq!(
            breakdown.development_total_with_margin(),
            334.0 * (1.0 + pct / 100.0)
        );
    }
}
