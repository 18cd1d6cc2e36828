use contracts::dashboards::d400_sales_forecast::{DailyTotal, SaleRecord};
use std::collections::BTreeMap;

/// Collapse sale records into one revenue total per calendar day, oldest
/// day first.
///
/// Soft-deleted records must be filtered out by the caller. Records without
/// a usable date are skipped. Days without sales get no entry.
pub fn aggregate(records: &[SaleRecord]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        let Some(day) = record.day() else {
            continue;
        };
        *by_day.entry(day).or_insert(0.0) += record.grand_total;
    }

    by_day
        .into_iter()
        .map(|(day, total)| DailyTotal { day, total })
        .collect()
}
