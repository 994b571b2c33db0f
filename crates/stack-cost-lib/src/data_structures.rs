use serde::{Deserialize, Serialize};

pub const DAILY_BONUS_MESSAGES: u64 = 5;
pub const DAYS_IN_MONTH: u64 = 30;
pub const MONTHLY_BONUS_MESSAGES: u64 = DAILY_BONUS_MESSAGES * DAYS_IN_MONTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanTier {
    name: String,
    message_limit: u64,
    monthly_price: f64,
}

impl PlanTier {
    pub fn new(name: impl Into<String>, message_limit: u64, monthly_price: f64) -> Self {
        Self {
            name: name.into(),
            message_limit,
            monthly_price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message_limit(&self) -> u64 {
        self.message_limit
    }

    pub fn monthly_price(&self) -> f64 {
        self.monthly_price
    }

    pub fn is_free(&self) -> bool {
        self.monthly_price <= 0.0
    }

    /// Paid tiers get 5 extra messages per day on top of the plan limit.
    pub fn bonus_messages(&self) -> u64 {
        if self.is_free() {
            0
        } else {
            MONTHLY_BONUS_MESSAGES
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EditorPlan {
    #[default]
    Hobby,
    Pro,
    Business,
}

impl EditorPlan {
    pub fn monthly_price(&self) -> f64 {
        match self {
            EditorPlan::Hobby => 0.0,
            EditorPlan::Pro => 20.0,
            EditorPlan::Business => 40.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EditorPlan::Hobby => "Hobby",
            EditorPlan::Pro => "Pro",
            EditorPlan::Business => "Business",
        }
    }

    /// Unknown names resolve to `Hobby`, so they add no plan cost.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hobby" | "free" => EditorPlan::Hobby,
            "pro" => EditorPlan::Pro,
            "business" => EditorPlan::Business,
            other => {
                tracing::warn!(plan = other, "unknown editor plan, assuming Hobby");
                EditorPlan::Hobby
            }
        }
    }
}

impl From<String> for EditorPlan {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<EditorPlan> for String {
    fn from(value: EditorPlan) -> Self {
        value.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticHost {
    Netlify,
    Vercel,
}

impl StaticHost {
    pub fn name(&self) -> &'static str {
        match self {
            StaticHost::Netlify => "Netlify Free",
            StaticHost::Vercel => "Vercel Hobby",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StaticHost::Netlify => {
                "Free: 100 GB bandwidth/month, 300 build min/month, up to 500 sites, 125k serverless invocations/month"
            }
            StaticHost::Vercel => {
                "Free: 100 GB bandwidth/month, 6,000 build min/month, up to 200 projects, 100k serverless invocations/month"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentOption {
    #[default]
    None,
    StaticFree(StaticHost),
    Vps,
}

impl DeploymentOption {
    pub fn key(&self) -> &'static str {
        match self {
            DeploymentOption::None => "none",
            DeploymentOption::StaticFree(StaticHost::Netlify) => "netlify",
            DeploymentOption::StaticFree(StaticHost::Vercel) => "vercel",
            DeploymentOption::Vps => "vps",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeploymentOption::None => "None",
            DeploymentOption::StaticFree(host) => host.name(),
            DeploymentOption::Vps => "Custom VPS",
        }
    }

    // Limits of the free hosts are informational, they never enter a cost.
    pub fn description(&self) -> &'static str {
        match self {
            DeploymentOption::None => "No deployment selected",
            DeploymentOption::StaticFree(host) => host.description(),
            DeploymentOption::Vps => "Self-managed server billed at its monthly price",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" => DeploymentOption::None,
            "netlify" | "static" => DeploymentOption::StaticFree(StaticHost::Netlify),
            "vercel" => DeploymentOption::StaticFree(StaticHost::Vercel),
            "vps" => DeploymentOption::Vps,
            other => {
                tracing::warn!(deployment = other, "unknown deployment option, assuming none");
                DeploymentOption::None
            }
        }
    }
}

impl From<String> for DeploymentOption {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<DeploymentOption> for String {
    fn from(value: DeploymentOption) -> Self {
        value.key().to_string()
    }
}

/// Negative and NaN inputs count as zero.
fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    required_messages: u64,
    active_users: u64,
    database_records: u64,
    storage_gb: f64,
    editor_plan: EditorPlan,
    deployment: DeploymentOption,
    vps_monthly_price: f64,
    profit_margin_pct: f64,
    maintenance_pct: f64,
}

impl UsageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_required_messages(mut self, messages: u64) -> Self {
        self.required_messages = messages;
        self
    }

    pub fn with_active_users(mut self, users: u64) -> Self {
        self.active_users = users;
        self
    }

    pub fn with_database_records(mut self, records: u64) -> Self {
        self.database_records = records;
        self
    }

    pub fn with_storage_gb(mut self, storage_gb: f64) -> Self {
        self.storage_gb = non_negative(storage_gb);
        self
    }

    pub fn with_editor_plan(mut self, plan: EditorPlan) -> Self {
        self.editor_plan = plan;
        self
    }

    pub fn with_deployment(mut self, deployment: DeploymentOption) -> Self {
        self.deployment = deployment;
        self
    }

    pub fn with_vps_monthly_price(mut self, price: f64) -> Self {
        self.vps_monthly_price = non_negative(price);
        self
    }

    pub fn with_profit_margin_pct(mut self, pct: f64) -> Self {
        self.profit_margin_pct = non_negative(pct);
        self
    }

    pub fn with_maintenance_pct(mut self, pct: f64) -> Self {
        self.maintenance_pct = non_negative(pct);
        self
    }

    pub fn required_messages(&self) -> u64 {
        self.required_messages
    }

    pub fn active_users(&self) -> u64 {
        self.active_users
    }

    pub fn database_records(&self) -> u64 {
        self.database_records
    }

    // Getters clamp again since deserialized values skip the builders.
    pub fn storage_gb(&self) -> f64 {
        non_negative(self.storage_gb)
    }

    pub fn editor_plan(&self) -> EditorPlan {
        self.editor_plan
    }

    pub fn deployment(&self) -> DeploymentOption {
        self.deployment
    }

    pub fn vps_monthly_price(&self) -> f64 {
        non_negative(self.vps_monthly_price)
    }

    pub fn profit_margin_pct(&self) -> f64 {
        non_negative(self.profit_margin_pct)
    }

    pub fn maintenance_pct(&self) -> f64 {
        non_negative(self.maintenance_pct)
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            required_messages: 100,
            active_users: 50_000,
            database_records: 1_300_000,
            storage_gb: 1.0,
            editor_plan: EditorPlan::Hobby,
            deployment: DeploymentOption::None,
            vps_monthly_price: 0.0,
            profit_margin_pct: 30.0,
            maintenance_pct: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    plan: PlanTier,
    plan_cost: f64,
    editor_cost: f64,
    backend_cost: f64,
    maintenance_cost: f64,
    deployment_cost: f64,
    development_cost: f64,
    monthly_recurring_cost: f64,
    development_total_with_margin: f64,
    monthly_total_with_margin: f64,
}

impl CostBreakdown {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plan: PlanTier,
        plan_cost: f64,
        editor_cost: f64,
        backend_cost: f64,
        maintenance_cost: f64,
        deployment_cost: f64,
        development_total_with_margin: f64,
        monthly_total_with_margin: f64,
    ) -> Self {
        Self {
            plan,
            plan_cost,
            editor_cost,
            backend_cost,
            maintenance_cost,
            deployment_cost,
            development_cost: plan_cost + editor_cost,
            monthly_recurring_cost: backend_cost + maintenance_cost + deployment_cost,
            development_total_with_margin,
            monthly_total_with_margin,
        }
    }

    pub fn plan(&self) -> &PlanTier {
        &self.plan
    }

    pub fn plan_cost(&self) -> f64 {
        self.plan_cost
    }

    pub fn editor_cost(&self) -> f64 {
        self.editor_cost
    }

    pub fn backend_cost(&self) -> f64 {
        self.backend_cost
    }

    pub fn maintenance_cost(&self) -> f64 {
        self.maintenance_cost
    }

    pub fn deployment_cost(&self) -> f64 {
        self.deployment_cost
    }

    pub fn development_cost(&self) -> f64 {
        self.development_cost
    }

    pub fn monthly_recurring_cost(&self) -> f64 {
        self.monthly_recurring_cost
    }

    pub fn development_total_with_margin(&self) -> f64 {
        self.development_total_with_margin
    }

    pub fn monthly_total_with_margin(&self) -> f64 {
        self.monthly_total_with_margin
    }
}
