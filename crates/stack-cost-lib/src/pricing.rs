use crate::data_structures::PlanTier;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// App-builder tiers ordered by ascending message limit.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    tiers: Vec<PlanTier>,
}

impl PlanCatalog {
    pub fn new(mut tiers: Vec<PlanTier>) -> Result<Self> {
        if tiers.is_empty() {
            bail!("Plan catalog must contain at least one tier");
        }

        if let Some(tier) = tiers
            .iter()
            .find(|tier| !tier.monthly_price().is_finite() || tier.monthly_price() < 0.0)
        {
            bail!(
                "Plan '{}' has an invalid monthly price: {}",
                tier.name(),
                tier.monthly_price()
            );
        }

        tiers.sort_by_key(|tier| tier.message_limit());
        Ok(Self { tiers })
    }

    pub fn standard() -> Self {
        let tiers = vec![
            PlanTier::new("Free", 5, 0.0),
            PlanTier::new("Starter", 100, 20.0),
            PlanTier::new("Launch", 250, 50.0),
            PlanTier::new("Scale 1", 500, 100.0),
            PlanTier::new("Scale 2", 1_000, 200.0),
            PlanTier::new("Scale 3", 1_500, 294.0),
            PlanTier::new("Scale 4", 2_000, 384.0),
            PlanTier::new("Scale 5", 3_000, 564.0),
            PlanTier::new("Scale 6", 4_000, 736.0),
            PlanTier::new("Scale 7", 5_000, 900.0),
        ];

        Self { tiers }
    }

    /// Smallest tier covering `required_messages`, or the top tier when none does.
    pub fn recommend(&self, required_messages: u64) -> &PlanTier {
        self.tiers
            .iter()
            .find(|tier| tier.message_limit() >= required_messages)
            .unwrap_or_else(|| self.top_tier())
    }

    pub fn top_tier(&self) -> &PlanTier {
        // Construction guarantees at least one tier.
        &self.tiers[self.tiers.len() - 1]
    }

    pub fn get(&self, name: &str) -> Option<&PlanTier> {
        self.tiers.iter().find(|tier| tier.name() == name)
    }

    pub fn tiers(&self) -> &[PlanTier] {
        &self.tiers
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Free and Pro breakpoints of the backend service plus its overage rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendPricing {
    pub free_user_limit: u64,
    pub free_storage_gb: f64,
    pub free_database_gb: f64,
    pub free_bandwidth_gb: f64,
    pub pro_user_limit: u64,
    pub pro_storage_gb: f64,
    pub pro_database_gb: f64,
    pub pro_bandwidth_gb: f64,
    pub extra_user_cost: f64,
    pub extra_storage_cost_per_gb: f64,
    pub extra_database_cost_per_gb: f64,
    pub extra_bandwidth_cost_per_gb: f64,
    pub base_fee: f64,
    pub records_per_gb: f64,
}

impl BackendPricing {
    /// Rejects overrides that could make a cost negative or shrink as usage grows.
    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("free_storage_gb", self.free_storage_gb),
            ("free_database_gb", self.free_database_gb),
            ("free_bandwidth_gb", self.free_bandwidth_gb),
            ("pro_storage_gb", self.pro_storage_gb),
            ("pro_database_gb", self.pro_database_gb),
            ("pro_bandwidth_gb", self.pro_bandwidth_gb),
            ("extra_user_cost", self.extra_user_cost),
            ("extra_storage_cost_per_gb", self.extra_storage_cost_per_gb),
            ("extra_database_cost_per_gb", self.extra_database_cost_per_gb),
            ("extra_bandwidth_cost_per_gb", self.extra_bandwidth_cost_per_gb),
            ("base_fee", self.base_fee),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                bail!("Backend pricing '{}' must be a non-negative number, got {}", name, value);
            }
        }

        if !self.records_per_gb.is_finite() || self.records_per_gb <= 0.0 {
            bail!(
                "Backend pricing 'records_per_gb' must be positive, got {}",
                self.records_per_gb
            );
        }

        if self.pro_user_limit < self.free_user_limit {
            bail!(
                "Backend pricing pro user limit ({}) is below the free limit ({})",
                self.pro_user_limit,
                self.free_user_limit
            );
        }

        let breakpoints = [
            ("storage", self.free_storage_gb, self.pro_storage_gb),
            ("database", self.free_database_gb, self.pro_database_gb),
            ("bandwidth", self.free_bandwidth_gb, self.pro_bandwidth_gb),
        ];
        for (name, free, pro) in breakpoints {
            if pro < free {
                bail!(
                    "Backend pricing pro {} threshold ({}) is below the free threshold ({})",
                    name,
                    pro,
                    free
                );
            }
        }

        Ok(())
    }

    pub fn database_gb(&self, records: u64) -> f64 {
        if self.records_per_gb <= 0.0 {
            return 0.0;
        }
        records as f64 / self.records_per_gb
    }

    /// Bandwidth is approximated from database size, rounded up to whole GB.
    pub fn estimated_bandwidth_gb(&self, records: u64) -> f64 {
        self.database_gb(records).ceil()
    }
}

impl Default for BackendPricing {
    fn default() -> Self {
        Self {
            free_user_limit: 50_000,
            free_storage_gb: 1.0,
            free_database_gb: 0.5,
            free_bandwidth_gb: 5.0,
            pro_user_limit: 100_000,
            pro_storage_gb: 100.0,
            pro_database_gb: 8.0,
            pro_bandwidth_gb: 25.0,
            extra_user_cost: 0.00325,
            extra_storage_cost_per_gb: 0.021,
            extra_database_cost_per_gb: 0.125,
            extra_bandwidth_cost_per_gb: 0.09,
            base_fee: 25.0,
            records_per_gb: 2_700_000.0,
        }
    }
}
