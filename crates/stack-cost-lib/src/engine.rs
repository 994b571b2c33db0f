use crate::calculator::Calculator;
use crate::currency::Currency;
use crate::data_structures::{CostBreakdown, PlanTier, UsageConfig};
use crate::pricing::{BackendPricing, PlanCatalog};
use crate::report::CostReport;
use anyhow::Result;

/// Stateless estimator: every call reads only the `UsageConfig` it is given.
pub struct PricingEngine {
    catalog: PlanCatalog,
    backend_pricing: BackendPricing,
    calculator: Calculator,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self {
            catalog: PlanCatalog::standard(),
            backend_pricing: BackendPricing::default(),
            calculator: Calculator::new(),
        }
    }

    pub fn with_plans(mut self, tiers: Vec<PlanTier>) -> Result<Self> {
        self.catalog = PlanCatalog::new(tiers)?;
        Ok(self)
    }

    pub fn with_backend_pricing(mut self, pricing: BackendPricing) -> Result<Self> {
        pricing.validate()?;
        self.backend_pricing = pricing;
        Ok(self)
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn backend_pricing(&self) -> &BackendPricing {
        &self.backend_pricing
    }

    pub fn recommend_plan(&self, required_messages: u64) -> &PlanTier {
        let plan = self.catalog.recommend(required_messages);
        tracing::debug!(
            required_messages,
            plan = plan.name(),
            limit = plan.message_limit(),
            "recommended app-builder plan"
        );
        plan
    }

    pub fn backend_cost(&self, config: &UsageConfig) -> f64 {
        self.calculator.calculate_backend_cost(
            &self.backend_pricing,
            config.active_users(),
            config.database_records(),
            config.storage_gb(),
        )
    }

    pub fn editor_cost(&self, config: &UsageConfig) -> f64 {
        self.calculator.calculate_editor_cost(config.editor_plan())
    }

    pub fn deployment_cost(&self, config: &UsageConfig) -> f64 {
        self.calculator
            .calculate_deployment_cost(config.deployment(), config.vps_monthly_price())
    }

    pub fn development_cost(&self, config: &UsageConfig) -> f64 {
        let plan = self.recommend_plan(config.required_messages());
        self.calculator
            .calculate_development_cost(plan, config.editor_plan())
    }

    pub fn estimate(&self, config: &UsageConfig) -> CostBreakdown {
        let plan = self.recommend_plan(config.required_messages());
        let breakdown = self
            .calculator
            .calculate_breakdown(plan, &self.backend_pricing, config);

        tracing::debug!(
            development = breakdown.development_cost(),
            monthly = breakdown.monthly_recurring_cost(),
            development_with_margin = breakdown.development_total_with_margin(),
            monthly_with_margin = breakdown.monthly_total_with_margin(),
            "estimated costs"
        );

        breakdown
    }

    pub fn report(&self, config: &UsageConfig, currency: Currency, rate: f64) -> CostReport {
        let breakdown = self.estimate(config);
        CostReport::new(config, &breakdown, &self.backend_pricing, currency, rate)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new()
    }
}
