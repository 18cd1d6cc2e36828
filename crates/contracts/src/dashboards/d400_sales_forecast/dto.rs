use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::lenient::{self, SaleDate};

/// Completed sale as consumed by the forecast: only the date, the grand
/// total and the soft-delete flag of a voucher matter here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(default, deserialize_with = "lenient::sale_date")]
    pub date: Option<SaleDate>,
    #[serde(
        rename = "grandTotal",
        default,
        deserialize_with = "lenient::amount",
        serialize_with = "lenient::serialize_amount"
    )]
    pub grand_total: f64,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub deleted: bool,
}

impl SaleRecord {
    pub fn new(date: &str, grand_total: f64) -> Self {
        Self {
            date: Some(SaleDate::Text(date.to_string())),
            grand_total,
            deleted: false,
        }
    }

    /// Calendar day (`YYYY-MM-DD`) of the sale, `None` when the date is
    /// missing or unusable.
    pub fn day(&self) -> Option<String> {
        self.date.as_ref().and_then(SaleDate::day)
    }
}

/// Revenue of one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Day in format "YYYY-MM-DD"
    pub day: String,
    pub total: f64,
}

impl DailyTotal {
    pub fn new(day: &str, total: f64) -> Self {
        Self {
            day: day.to_string(),
            total,
        }
    }
}

/// Selectable forecast horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForecastHorizon {
    #[default]
    NextDay,
    NextWeek,
    NextMonth,
}

impl ForecastHorizon {
    pub fn all() -> [ForecastHorizon; 3] {
        [
            ForecastHorizon::NextDay,
            ForecastHorizon::NextWeek,
            ForecastHorizon::NextMonth,
        ]
    }

    /// Number of days the per-day estimate is multiplied by
    pub fn days(&self) -> u32 {
        match self {
            ForecastHorizon::NextDay => 1,
            ForecastHorizon::NextWeek => 7,
            ForecastHorizon::NextMonth => 30,
        }
    }

    /// Wire id, e.g. "next-week"
    pub fn id(&self) -> &'static str {
        match self {
            ForecastHorizon::NextDay => "next-day",
            ForecastHorizon::NextWeek => "next-week",
            ForecastHorizon::NextMonth => "next-month",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ForecastHorizon::NextDay => "Next Day",
            ForecastHorizon::NextWeek => "Next Week",
            ForecastHorizon::NextMonth => "Next Month",
        }
    }
}

impl fmt::Display for ForecastHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ForecastHorizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ForecastHorizon::all()
            .into_iter()
            .find(|h| h.id() == s)
            .ok_or_else(|| format!("Unknown forecast horizon: {}", s))
    }
}

/// Catalogue entry for the horizon selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastHorizonOption {
    pub id: ForecastHorizon,
    pub label: String,
    pub days: u32,
}

impl From<ForecastHorizon> for ForecastHorizonOption {
    fn from(h: ForecastHorizon) -> Self {
        Self {
            id: h,
            label: h.label().to_string(),
            days: h.days(),
        }
    }
}

/// Per-day values of the three estimators and their blend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastBreakdown {
    /// Mean of the last 7 daily totals
    pub moving_average: f64,
    /// Mean clamped day-over-day growth over the last 5 daily totals
    pub average_growth: f64,
    /// Last daily total grown by `average_growth`
    pub growth_prediction: f64,
    /// Least-squares trend evaluated one step past the last day
    pub linear_prediction: f64,
    /// Unweighted mean of the three predictions
    pub hybrid: f64,
}

/// Request for the sales forecast dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesForecastRequest {
    #[serde(default)]
    pub horizon: ForecastHorizon,
}

/// Response for the sales forecast dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesForecastResponse {
    pub horizon: ForecastHorizon,
    pub horizon_days: u32,
    /// Total of the most recent day with sales
    pub latest_total: Option<f64>,
    pub daily_totals: Vec<DailyTotal>,
    pub breakdown: ForecastBreakdown,
    /// Predicted revenue over the whole horizon, never negative
    pub prediction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_horizon_days() {
        assert_eq!(ForecastHorizon::NextDay.days(), 1);
        assert_eq!(ForecastHorizon::NextWeek.days(), 7);
        assert_eq!(ForecastHorizon::NextMonth.days(), 30);
    }

    #[test]
    fn test_horizon_wire_ids() {
        assert_eq!(
            serde_json::to_value(ForecastHorizon::NextWeek).unwrap(),
            json!("next-week")
        );
        let h: ForecastHorizon = serde_json::from_value(json!("next-month")).unwrap();
        assert_eq!(h, ForecastHorizon::NextMonth);
        assert_eq!("next-day".parse::<ForecastHorizon>(), Ok(ForecastHorizon::NextDay));
        assert!("next-year".parse::<ForecastHorizon>().is_err());
    }

    #[test]
    fn test_sale_record_from_voucher_json() {
        let record: SaleRecord = serde_json::from_value(json!({
            "date": "2024-03-01T09:12:44.000Z",
            "grandTotal": 108,
            "deleted": false,
            "username": "Aung"
        }))
        .unwrap();
        assert_eq!(record.day().as_deref(), Some("2024-03-01"));
        assert_eq!(record.grand_total, 108.0);
        assert!(!record.deleted);

        let record: SaleRecord = serde_json::from_value(json!({ "grandTotal": "n/a" })).unwrap();
        assert_eq!(record.day(), None);
        assert_eq!(record.grand_total, 0.0);
    }
}
