//! Daily Billing Computer: the billing rate a project's overall span
//! attributes to each day occupied, clipped to a configured floor so that
//! no scheduled day is ever treated as worthless in the objective.

use astican_core::{Period, Project};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Daily billing rate per project: total billing divided by the number of
/// days spanned by its earliest and latest period (inclusive), across both
/// historical and future periods. Floored at `min_daily_billing`.
pub fn daily_rates(periods: &[Period], projects: &[Project], min_daily_billing: Decimal) -> HashMap<String, Decimal> {
    let mut spans: HashMap<&str, (i64, i64)> = HashMap::new();
    for period in periods {
        let entry = spans
            .entry(period.project_id.as_str())
            .or_insert((period.first_day, period.last_day));
        entry.0 = entry.0.min(period.first_day);
        entry.1 = entry.1.max(period.last_day);
    }

    let mut rates = HashMap::new();
    for project in projects {
        let Some(billing) = project.billing else {
            continue;
        };
        let Some(&(first, last)) = spans.get(project.id.as_str()) else {
            continue;
        };
        let span_days = Decimal::from(last - first + 1);
        let rate = if span_days.is_zero() { billing } else { billing / span_days };
        rates.insert(project.id.clone(), rate.max(min_daily_billing));
    }

    rates
}
