//! Reductions behind the dashboard: filter, headline metrics, chart series.
//!
//! Everything here is pure and works on rows already loaded by
//! [`crate::store::fetch_observations`].

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BleachingRisk, StoredObservation};

// ---

/// Number of rows shown in the raw data table.
pub const RECENT_ROW_LIMIT: usize = 100;

/// Reef selector state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReefFilter {
    All,
    Reef(String),
}

impl ReefFilter {
    /// Build from an optional query parameter; missing, empty, or `All`
    /// selects every reef.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some("All") => ReefFilter::All,
            Some(id) => ReefFilter::Reef(id.to_string()),
        }
    }

    pub fn matches(&self, observation: &StoredObservation) -> bool {
        match self {
            ReefFilter::All => true,
            ReefFilter::Reef(id) => &observation.reef_id == id,
        }
    }
}

/// Headline numbers over the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// Mean SST; `None` when no row carries a temperature.
    pub average_sst: Option<f64>,
    pub max_dhw: Option<f64>,
    pub high_risk_days: usize,
    pub reefs_monitored: usize,
}

/// Mean SST for one date across the filtered reefs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub sst_celsius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskCount {
    pub bleaching_risk: BleachingRisk,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReefLocation {
    pub reef_id: String,
    pub reef_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: String,
}

/// Entry in the reef selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReefOption {
    pub reef_id: String,
    pub reef_name: String,
}

pub fn filter_observations<'a>(
    rows: &'a [StoredObservation],
    filter: &ReefFilter,
) -> Vec<&'a StoredObservation> {
    rows.iter().filter(|r| filter.matches(r)).collect()
}

pub fn compute_metrics(rows: &[&StoredObservation]) -> DashboardMetrics {
    // ---
    let temps: Vec<f64> = rows.iter().filter_map(|r| r.sst_celsius).collect();
    let average_sst = if temps.is_empty() {
        None
    } else {
        Some(temps.iter().sum::<f64>() / temps.len() as f64)
    };

    let max_dhw = rows
        .iter()
        .filter_map(|r| r.dhw_value)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

    let high_risk_days = rows
        .iter()
        .filter(|r| r.bleaching_risk == Some(BleachingRisk::High))
        .count();

    let reefs_monitored = rows
        .iter()
        .map(|r| r.reef_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    DashboardMetrics {
        average_sst,
        max_dhw,
        high_risk_days,
        reefs_monitored,
    }
}

/// Mean SST per date, oldest first.
pub fn temperature_trend(rows: &[&StoredObservation]) -> Vec<TrendPoint> {
    // ---
    let mut by_date: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        if let Some(sst) = row.sst_celsius {
            let entry = by_date.entry(row.date).or_insert((0.0, 0));
            entry.0 += sst;
            entry.1 += 1;
        }
    }

    by_date
        .into_iter()
        .map(|(date, (sum, n))| TrendPoint {
            date,
            sst_celsius: sum / n as f64,
        })
        .collect()
}

/// Row count per risk category, most frequent first.
pub fn risk_distribution(rows: &[&StoredObservation]) -> Vec<RiskCount> {
    // ---
    let mut counts: HashMap<BleachingRisk, usize> = HashMap::new();
    for risk in rows.iter().filter_map(|r| r.bleaching_risk) {
        *counts.entry(risk).or_default() += 1;
    }

    let mut distribution: Vec<RiskCount> = counts
        .into_iter()
        .map(|(bleaching_risk, count)| RiskCount {
            bleaching_risk,
            count,
        })
        .collect();
    // Ties broken by severity so the order is stable.
    distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.bleaching_risk.cmp(&b.bleaching_risk))
    });
    distribution
}

/// Distinct reef locations in first-seen order.
pub fn reef_locations(rows: &[&StoredObservation]) -> Vec<ReefLocation> {
    // ---
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.reef_id.clone()))
        .map(|r| ReefLocation {
            reef_id: r.reef_id.clone(),
            reef_name: r.reef_name.clone(),
            latitude: r.latitude,
            longitude: r.longitude,
            country: r.country.clone(),
        })
        .collect()
}

/// Reef selector options from the unfiltered rows, in first-seen order.
pub fn reef_options(rows: &[StoredObservation]) -> Vec<ReefOption> {
    // ---
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(r.reef_id.clone()))
        .map(|r| ReefOption {
            reef_id: r.reef_id.clone(),
            reef_name: r.reef_name.clone(),
        })
        .collect()
}

/// The last [`RECENT_ROW_LIMIT`] rows of the filtered set.
pub fn recent_rows<'a>(rows: &[&'a StoredObservation]) -> Vec<&'a StoredObservation> {
    let start = rows.len().saturating_sub(RECENT_ROW_LIMIT);
    rows[start..].to_vec()
}
