use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const FALLBACK_USD_BRL: f64 = 5.0;
pub const FALLBACK_USD_EUR: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Brl,
    Eur,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Brl => "BRL",
            Currency::Eur => "EUR",
        }
    }

    /// Locale whose number conventions are used when formatting.
    pub fn locale(&self) -> &'static str {
        match self {
            Currency::Usd => "en-US",
            Currency::Brl => "pt-BR",
            Currency::Eur => "de-DE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::Usd),
            "BRL" => Some(Currency::Brl),
            "EUR" => Some(Currency::Eur),
            _ => None,
        }
    }

    fn separators(&self) -> (char, char) {
        match self {
            Currency::Usd => (',', '.'),
            Currency::Brl | Currency::Eur => ('.', ','),
        }
    }
}

/// USD-based rates for the supported quote currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    pub brl: f64,
    pub eur: f64,
}

impl ExchangeRates {
    pub fn rate_for(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Usd => 1.0,
            Currency::Brl => self.brl,
            Currency::Eur => self.eur,
        }
    }

    pub fn fallback_for(currency: Currency) -> f64 {
        Self::default().rate_for(currency)
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self {
            brl: FALLBACK_USD_BRL,
            eur: FALLBACK_USD_EUR,
        }
    }
}

pub trait ExchangeRateProvider: Send + Sync {
    /// Units of `quote` bought by one unit of `base`.
    fn fetch_rate(&self, base: Currency, quote: Currency) -> Result<f64>;
}

#[derive(Debug, Clone, Default)]
pub struct FixedRateProvider {
    rates: ExchangeRates,
}

impl FixedRateProvider {
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }
}

impl ExchangeRateProvider for FixedRateProvider {
    fn fetch_rate(&self, base: Currency, quote: Currency) -> Result<f64> {
        let base_rate = self.rates.rate_for(base);
        if base_rate <= 0.0 {
            bail!("No usable rate for {}", base.code());
        }
        Ok(self.rates.rate_for(quote) / base_rate)
    }
}

/// Resolves the USD rate for `quote`, falling back to the documented constant
/// when the provider fails or returns a non-positive value. Costs are always
/// computed in US dollars, so a rate problem never fails an estimate.
pub fn resolve_rate(provider: &dyn ExchangeRateProvider, quote: Currency) -> f64 {
    if quote == Currency::Usd {
        return 1.0;
    }

    let fallback = ExchangeRates::fallback_for(quote);
    match provider.fetch_rate(Currency::Usd, quote) {
        Ok(rate) if rate.is_finite() && rate > 0.0 => rate,
        Ok(rate) => {
            tracing::warn!(currency = quote.code(), rate, fallback, "invalid exchange rate, using fallback");
            fallback
        }
        Err(e) => {
            tracing::warn!(currency = quote.code(), error = %e, fallback, "exchange rate unavailable, using fallback");
            fallback
        }
    }
}

pub fn convert(amount: f64, rate: f64) -> f64 {
    amount * rate
}

/// Converts a USD amount and formats it with the currency's locale rules,
/// e.g. `$1,234.56`, `R$ 1.234,56` or `1.234,56 €`.
pub fn format_currency(amount: f64, currency: Currency, rate: f64) -> String {
    let value = convert(amount, rate);
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let (group_sep, decimal_sep) = currency.separators();
    let number = format!(
        "{}{}{:02}",
        group_thousands(cents / 100, group_sep),
        decimal_sep,
        cents % 100
    );

    match currency {
        Currency::Usd => format!("{sign}${number}"),
        Currency::Brl => format!("{sign}R$ {number}"),
        Currency::Eur => format!("{sign}{number} €"),
    }
}

/// Reads back a string produced by [`format_currency`], in the target currency.
pub fn parse_currency(text: &str, currency: Currency) -> Option<f64> {
    let (group_sep, decimal_sep) = currency.separators();
    let trimmed = text
        .trim()
        .trim_start_matches('-')
        .trim_start_matches("R$")
        .trim_start_matches('$')
        .trim_end_matches('€')
        .trim();
    let negative = text.trim().starts_with('-');

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != group_sep)
        .map(|c| if c == decimal_sep { '.' } else { c })
        .collect();

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}

pub(crate) fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }

    grouped
}
