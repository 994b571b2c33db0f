pub mod calculator;
pub mod currency;
pub mod data_structures;
pub mod engine;
pub mod loader;
pub mod pricing;
pub mod report;

pub use calculator::Calculator;
pub use currency::{
    convert, format_currency, parse_currency, resolve_rate, Currency, ExchangeRateProvider,
    ExchangeRates, FixedRateProvider,
};
pub use data_structures::{
    CostBreakdown, DeploymentOption, EditorPlan, PlanTier, StaticHost, UsageConfig,
};
pub use engine::PricingEngine;
pub use loader::RatesSnapshot;
pub use pricing::{BackendPricing, PlanCatalog};
pub use report::{format_storage_size, CostReport, ReportRow, ReportSection};

pub use anyhow::Result;

pub mod prelude {
    pub use crate::currency::{format_currency, resolve_rate, Currency};
    pub use crate::data_structures::{CostBreakdown, DeploymentOption, EditorPlan, UsageConfig};
    pub use crate::engine::PricingEngine;
    pub use anyhow::Result;
}
