//! Data models for the reef observation pipeline.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ReefError;

// ---

/// Tag written to `data_source` for every generated row.
pub const SIMULATED_SOURCE: &str = "Simulated";

/// Bleaching risk category, a step function of degree heating weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BleachingRisk {
    // ---
    #[serde(rename = "No Risk")]
    NoRisk,
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

impl BleachingRisk {
    // ---
    pub const HIGH_DHW: f64 = 8.0;
    pub const MODERATE_DHW: f64 = 4.0;
    pub const LOW_DHW: f64 = 1.0;

    /// Classify a DHW value. Thresholds are inclusive on the low end and
    /// checked highest first.
    pub fn from_dhw(dhw: f64) -> Self {
        // ---
        if dhw >= Self::HIGH_DHW {
            BleachingRisk::High
        } else if dhw >= Self::MODERATE_DHW {
            BleachingRisk::Moderate
        } else if dhw >= Self::LOW_DHW {
            BleachingRisk::Low
        } else {
            BleachingRisk::NoRisk
        }
    }

    /// Label stored in `bleaching_risk`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BleachingRisk::NoRisk => "No Risk",
            BleachingRisk::Low => "Low Risk",
            BleachingRisk::Moderate => "Moderate Risk",
            BleachingRisk::High => "High Risk",
        }
    }
}

impl fmt::Display for BleachingRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BleachingRisk {
    type Err = ReefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "No Risk" => Ok(BleachingRisk::NoRisk),
            "Low Risk" => Ok(BleachingRisk::Low),
            "Moderate Risk" => Ok(BleachingRisk::Moderate),
            "High Risk" => Ok(BleachingRisk::High),
            other => Err(ReefError::UnknownRiskLabel(other.to_string())),
        }
    }
}

/// One generated (reef, day) record, ready for the upsert writer.
///
/// `created_at` is not part of this type; the database assigns it on first
/// insert and never changes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReefObservation {
    // ---
    pub reef_id: String,
    pub reef_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub date: NaiveDate,
    pub sst_celsius: f64,
    pub dhw_value: f64,
    pub bleaching_risk: BleachingRisk,
    pub data_source: String,
}

/// Raw row as read from `reef_data`, decimals already cast to float.
#[derive(Debug, sqlx::FromRow)]
pub struct ObservationRow {
    // ---
    pub id: i32,
    pub reef_id: String,
    pub reef_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
    pub date: NaiveDate,
    pub sst_celsius: Option<f64>,
    pub dhw_value: Option<f64>,
    pub bleaching_risk: Option<String>,
    pub data_source: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A persisted observation as served to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredObservation {
    // ---
    pub id: i32,
    pub reef_id: String,
    pub reef_name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: String,
    pub date: NaiveDate,
    pub sst_celsius: Option<f64>,
    pub dhw_value: Option<f64>,
    pub bleaching_risk: Option<BleachingRisk>,
    pub data_source: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<ObservationRow> for StoredObservation {
    type Error = ReefError;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        // ---
        let bleaching_risk = row
            .bleaching_risk
            .as_deref()
            .map(BleachingRisk::from_str)
            .transpose()?;

        Ok(StoredObservation {
            id: row.id,
            reef_id: row.reef_id,
            reef_name: row.reef_name.unwrap_or_default(),
            latitude: row.latitude,
            longitude: row.longitude,
            country: row.country.unwrap_or_default(),
            date: row.date,
            sst_celsius: row.sst_celsius,
            dhw_value: row.dhw_value,
            bleaching_risk,
            data_source: row.data_source.unwrap_or_default(),
            created_at: row.created_at,
        })
    }
}
