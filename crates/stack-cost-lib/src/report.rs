use crate::currency::{format_currency, group_thousands, Currency};
use crate::data_structures::{CostBreakdown, DeploymentOption, UsageConfig};
use crate::pricing::BackendPricing;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    label: String,
    value: String,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    title: String,
    rows: Vec<ReportRow>,
}

impl ReportSection {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push(ReportRow::new(label, value));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }
}

/// Printable summary of one estimate, shown in the selected currency.
#[derive(Debug, Clone, Serialize)]
pub struct CostReport {
    generated_at: DateTime<Utc>,
    currency: Currency,
    exchange_rate: f64,
    sections: Vec<ReportSection>,
    breakdown: CostBreakdown,
}

impl CostReport {
    pub fn new(
        config: &UsageConfig,
        breakdown: &CostBreakdown,
        backend_pricing: &BackendPricing,
        currency: Currency,
        exchange_rate: f64,
    ) -> Self {
        let money = |amount: f64| format_currency(amount, currency, exchange_rate);
        let plan = breakdown.plan();

        let mut app_builder = ReportSection::new("App Builder")
            .row("Required messages", format_count(config.required_messages()))
            .row("Recommended plan", plan.name())
            .row("Plan messages", format_count(plan.message_limit()))
            .row("Plan cost", money(breakdown.plan_cost()));
        if plan.bonus_messages() > 0 {
            app_builder = app_builder.row(
                "Bonus messages",
                format!("{} per month", format_count(plan.bonus_messages())),
            );
        }

        let backend = ReportSection::new("Backend")
            .row("Monthly active users", format_count(config.active_users()))
            .row("Database records", format_count(config.database_records()))
            .row(
                "Database size",
                format_storage_size(config.database_records(), backend_pricing.records_per_gb),
            )
            .row("Storage", format!("{} GB", config.storage_gb()))
            .row("Monthly cost", money(breakdown.backend_cost()));

        let editor = ReportSection::new("Code Editor")
            .row("Selected plan", config.editor_plan().name())
            .row("Plan cost", money(breakdown.editor_cost()));

        let mut deployment = ReportSection::new("Deployment")
            .row("Option", config.deployment().name())
            .row("Details", config.deployment().description());
        if config.deployment() == DeploymentOption::Vps {
            deployment = deployment.row("Monthly cost", money(breakdown.deployment_cost()));
        }

        let summary = ReportSection::new("Cost Summary")
            .row("Profit margin", format!("{}%", config.profit_margin_pct()))
            .row("Maintenance", format!("{}%", config.maintenance_pct()))
            .row("Development cost", money(breakdown.development_cost()))
            .row("Monthly maintenance", money(breakdown.maintenance_cost()))
            .row("Monthly cost", money(breakdown.monthly_recurring_cost()))
            .row(
                "Development total (with margin)",
                money(breakdown.development_total_with_margin()),
            )
            .row(
                "Monthly total (with margin)",
                money(breakdown.monthly_total_with_margin()),
            );

        Self {
            generated_at: Utc::now(),
            currency,
            exchange_rate,
            sections: vec![app_builder, backend, editor, deployment, summary],
            breakdown: breakdown.clone(),
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    pub fn sections(&self) -> &[ReportSection] {
        &self.sections
    }

    pub fn breakdown(&self) -> &CostBreakdown {
        &self.breakdown
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.title() == title)
    }

    pub fn render_text(&self) -> String {
        let width = self
            .sections
            .iter()
            .flat_map(|section| section.rows.iter())
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            "Cost Report".to_string(),
            format!(
                "Generated {} | Currency {} (rate {:.4})",
                self.generated_at.format("%Y-%m-%d %H:%M UTC"),
                self.currency.code(),
                self.exchange_rate
            ),
        ];

        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.title.clone());
            lines.push("-".repeat(section.title.chars().count()));
            lines.extend(
                section
                    .rows
                    .iter()
                    .map(|row| format!("  {:<width$}  {}", row.label, row.value)),
            );
        }

        lines.join("\n") + "\n"
    }
}

/// Size of `records` rows, shown in MB below 1 GB.
pub fn format_storage_size(records: u64, records_per_gb: f64) -> String {
    let size_gb = if records_per_gb > 0.0 {
        records as f64 / records_per_gb
    } else {
        0.0
    };

    if size_gb < 1.0 {
        format!("{:.2} MB", size_gb * 1024.0)
    } else {
        format!("{:.2} GB", size_gb)
    }
}

fn format_count(value: u64) -> String {
    group_thousands(value, ',')
}
