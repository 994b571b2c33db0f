use crate::data_structures::{CostBreakdown, DeploymentOption, EditorPlan, PlanTier, UsageConfig};
use crate::pricing::BackendPricing;

pub struct Calculator;

impl Calculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate_backend_cost(
        &self,
        pricing: &BackendPricing,
        active_users: u64,
        database_records: u64,
        storage_gb: f64,
    ) -> f64 {
        let storage_gb = storage_gb.max(0.0);
        let database_gb = pricing.database_gb(database_records);
        let bandwidth_gb = pricing.estimated_bandwidth_gb(database_records);

        let exceeds_free_tier = active_users > pricing.free_user_limit
            || storage_gb > pricing.free_storage_gb
            || database_gb > pricing.free_database_gb
            || bandwidth_gb > pricing.free_bandwidth_gb;

        if !exceeds_free_tier {
            return 0.0;
        }

        let mut total = pricing.base_fee;

        if active_users > pricing.pro_user_limit {
            let extra_users = (active_users - pricing.pro_user_limit) as f64;
            total += extra_users * pricing.extra_user_cost;
        }

        total += Self::overage(
            storage_gb,
            pricing.pro_storage_gb,
            pricing.extra_storage_cost_per_gb,
        );
        total += Self::overage(
            database_gb,
            pricing.pro_database_gb,
            pricing.extra_database_cost_per_gb,
        );
        total += Self::overage(
            bandwidth_gb,
            pricing.pro_bandwidth_gb,
            pricing.extra_bandwidth_cost_per_gb,
        );

        total.max(0.0)
    }

    fn overage(value: f64, threshold: f64, rate: f64) -> f64 {
        if value > threshold {
            (value - threshold) * rate
        } else {
            0.0
        }
    }

    pub fn calculate_editor_cost(&self, plan: EditorPlan) -> f64 {
        plan.monthly_price()
    }

    pub fn calculate_deployment_cost(&self, deployment: DeploymentOption, vps_price: f64) -> f64 {
        match deployment {
            DeploymentOption::Vps => vps_price.max(0.0),
            DeploymentOption::None | DeploymentOption::StaticFree(_) => 0.0,
        }
    }

    pub fn calculate_development_cost(&self, plan: &PlanTier, editor: EditorPlan) -> f64 {
        plan.monthly_price().max(0.0) + self.calculate_editor_cost(editor)
    }

    pub fn calculate_maintenance_cost(&self, development_cost: f64, maintenance_pct: f64) -> f64 {
        development_cost * maintenance_pct.max(0.0) / 100.0
    }

    /// Margin is a whole-number percentage, e.g. `30.0` for 30%.
    pub fn apply_margin(&self, value: f64, profit_margin_pct: f64) -> f64 {
        value * (1.0 + profit_margin_pct.max(0.0) / 100.0)
    }

    pub fn calculate_breakdown(
        &self,
        plan: &PlanTier,
        pricing: &BackendPricing,
        config: &UsageConfig,
    ) -> CostBreakdown {
        let plan_cost = plan.monthly_price().max(0.0);
        let editor_cost = self.calculate_editor_cost(config.editor_plan());
        let development_cost = self.calculate_development_cost(plan, config.editor_plan());

        let backend_cost = self.calculate_backend_cost(
            pricing,
            config.active_users(),
            config.database_records(),
            config.storage_gb(),
        );
        let maintenance_cost =
            self.calculate_maintenance_cost(development_cost, config.maintenance_pct());
        let deployment_cost =
            self.calculate_deployment_cost(config.deployment(), config.vps_monthly_price());
        let monthly_cost = backend_cost + maintenance_cost + deployment_cost;

        CostBreakdown::new(
            plan.clone(),
            plan_cost,
            editor_cost,
            backend_cost,
            maintenance_cost,
            deployment_cost,
            self.apply_margin(development_cost, config.profit_margin_pct()),
            self.apply_margin(monthly_cost, config.profit_margin_pct()),
        )
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
