use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stack_cost_estimator::{BackendPricing, Currency, PlanTier, PricingEngine, UsageConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "~/.config/stack-cost/config.json";

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    pub usage: UsageConfig,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend_pricing: Option<BackendPricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<PlanTier>>,
}

impl EstimatorConfig {
    pub fn build_engine(&self) -> Result<PricingEngine> {
        let mut engine = PricingEngine::new();

        if let Some(plans) = &self.plans {
            engine = engine
                .with_plans(plans.clone())
                .context("Invalid plan catalog in config")?;
        }
        if let Some(pricing) = &self.backend_pricing {
            engine = engine
                .with_backend_pricing(pricing.clone())
                .context("Invalid backend pricing in config")?;
        }

        Ok(engine)
    }
}

pub fn resolve_config_path(path: Option<&str>) -> PathBuf {
    let raw = path.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn load_config(path: &Path) -> Result<EstimatorConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EstimatorConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: EstimatorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &EstimatorConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stack_cost_estimator::EditorPlan;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, EstimatorConfig::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = EstimatorConfig {
            usage: UsageConfig::new()
                .with_required_messages(500)
                .with_editor_plan(EditorPlan::Business),
            currency: Currency::Brl,
            ..EstimatorConfig::default()
        };

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"currency": "EUR", "usage": {"active_users": 120000}, "backend_pricing": {"base_fee": 30}}"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.usage.active_users(), 120_000);
        assert_eq!(config.usage.required_messages(), 100);

        let engine = config.build_engine().unwrap();
        assert_eq!(engine.backend_pricing().base_fee, 30.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_empty_plan_list_is_rejected() {
        let config = EstimatorConfig {
            plans: Some(Vec::new()),
            ..EstimatorConfig::default()
        };
        assert!(config.build_engine().is_err());
    }

    #[test]
    fn test_negative_backend_rate_is_rejected() {
        let config: EstimatorConfig =
            serde_json::from_str(r#"{"backend_pricing": {"extra_user_cost": -0.001}}"#).unwrap();
        assert!(config.build_engine().is_err());
    }

    #[test]
    fn test_explicit_config_path() {
        let path = resolve_config_path(Some("/tmp/stack-cost.json"));
        assert_eq!(path, PathBuf::from("/tmp/stack-cost.json"));
        assert!(resolve_config_path(None).ends_with("stack-cost/config.json"));
    }
}
