use crate::currency::{Currency, ExchangeRateProvider, ExchangeRates};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A saved exchange-rate response, e.g. `{"base": "USD", "rates": {"BRL": 5.1}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesSnapshot {
    base: String,
    rates: HashMap<String, f64>,
}

impl RatesSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        let mut snapshot: RatesSnapshot =
            serde_json::from_str(content).context("Failed to parse exchange rate snapshot")?;

        snapshot.base = snapshot.base.trim().to_ascii_uppercase();
        snapshot.rates = snapshot
            .rates
            .into_iter()
            .map(|(code, rate)| (code.trim().to_ascii_uppercase(), rate))
            .collect();
        snapshot.rates.entry(snapshot.base.clone()).or_insert(1.0);

        Ok(snapshot)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read rate snapshot: {}", path.as_ref().display())
        })?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid rate snapshot: {}", path.as_ref().display()))
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_ascii_uppercase()).copied()
    }

    /// USD rates for the supported currencies, keeping fallbacks for missing entries.
    pub fn to_exchange_rates(&self) -> ExchangeRates {
        let fallback = ExchangeRates::default();
        ExchangeRates {
            brl: self
                .fetch_rate(Currency::Usd, Currency::Brl)
                .unwrap_or(fallback.brl),
            eur: self
                .fetch_rate(Currency::Usd, Currency::Eur)
                .unwrap_or(fallback.eur),
        }
    }
}

impl ExchangeRateProvider for RatesSnapshot {
    fn fetch_rate(&self, base: Currency, quote: Currency) -> Result<f64> {
        let base_rate = self
            .rate(base.code())
            .ok_or_else(|| anyhow!("Snapshot has no rate for {}", base.code()))?;
        let quote_rate = self
            .rate(quote.code())
            .ok_or_else(|| anyhow!("Snapshot has no rate for {}", quote.code()))?;

        if base_rate <= 0.0 {
            return Err(anyhow!("Snapshot rate for {} is not positive", base.code()));
        }

        Ok(quote_rate / base_rate)
    }
}
