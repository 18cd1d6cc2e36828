//! Hybrid sales forecast over a daily revenue series.
//!
//! Three per-day estimators are blended with equal weight:
//! - moving average of the last 7 days with sales
//! - last day's total grown by the mean clamped growth of the last 5 days
//! - least-squares linear trend, one step past the last day
//!
//! The series is indexed by position, not by calendar distance: a gap
//! between two days with sales counts as a single step. A forecast for
//! "the next entry" is therefore not always a forecast for tomorrow.

use contracts::dashboards::d400_sales_forecast::{DailyTotal, ForecastBreakdown, SaleRecord};

use super::aggregator;

pub const MOVING_AVERAGE_WINDOW: usize = 7;
pub const GROWTH_WINDOW: usize = 5;

fn tail(daily: &[DailyTotal], window: usize) -> &[DailyTotal] {
    &daily[daily.len().saturating_sub(window)..]
}

/// Mean total of the last 7 entries (fewer when the series is shorter).
pub fn moving_average(daily: &[DailyTotal]) -> f64 {
    let recent = tail(daily, MOVING_AVERAGE_WINDOW);
    if recent.is_empty() {
        return 0.0;
    }
    recent.iter().map(|d| d.total).sum::<f64>() / recent.len() as f64
}

/// Mean day-over-day growth over the last 5 entries, each rate clamped to
/// `[-1, 1]`. Pairs starting from a non-positive total are skipped.
pub fn average_growth(daily: &[DailyTotal]) -> f64 {
    let rates: Vec<f64> = tail(daily, GROWTH_WINDOW)
        .windows(2)
        .filter(|pair| pair[0].total > 0.0)
        .map(|pair| ((pair[1].total - pair[0].total) / pair[0].total).clamp(-1.0, 1.0))
        .collect();

    if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    }
}

/// Last entry's total grown by [`average_growth`].
pub fn growth_prediction(daily: &[DailyTotal]) -> f64 {
    match daily.last() {
        Some(last) => last.total * (1.0 + average_growth(daily)),
        None => 0.0,
    }
}

/// Least-squares line over `(index, total)` evaluated at `x = n`.
///
/// Needs at least two entries; returns 0 otherwise.
pub fn linear_prediction(daily: &[DailyTotal]) -> f64 {
    if daily.len() < 2 {
        return 0.0;
    }

    let n = daily.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, d) in daily.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += d.total;
        sum_xy += x * d.total;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return sum_y / n;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    intercept + slope * n
}

/// All three estimators and their unweighted mean, per day.
pub fn breakdown(daily: &[DailyTotal]) -> ForecastBreakdown {
    let moving_average = moving_average(daily);
    let average_growth = average_growth(daily);
    let growth_prediction = growth_prediction(daily);
    let linear_prediction = linear_prediction(daily);

    ForecastBreakdown {
        moving_average,
        average_growth,
        growth_prediction,
        linear_prediction,
        hybrid: (moving_average + growth_prediction + linear_prediction) / 3.0,
    }
}

/// Predicted revenue over `horizon_days`, floored at 0.
pub fn forecast(daily: &[DailyTotal], horizon_days: u32) -> f64 {
    if daily.is_empty() {
        return 0.0;
    }
    (breakdown(daily).hybrid * f64::from(horizon_days)).max(0.0)
}

/// Aggregate raw sale records by day, then forecast.
pub fn compute_forecast(records: &[SaleRecord], horizon_days: u32) -> f64 {
    forecast(&aggregator::aggregate(records), horizon_days)
}
