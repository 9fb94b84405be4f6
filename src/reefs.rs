//! Reef site registry.
//!
//! The canonical list of monitored reefs. Every generated observation refers
//! to one of these by `id`; the database does not enforce that reference.

use serde::Serialize;

/// Metadata for a single monitored reef.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReefSite {
    /// Short stable identifier, e.g. `GBR001`.
    pub id: &'static str,
    pub name: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub country: &'static str,
}

pub static REEF_REGISTRY: &[ReefSite] = &[
    ReefSite {
        id: "GBR001",
        name: "Great Barrier Reef - Northern",
        latitude: -14.5,
        longitude: 145.0,
        country: "Australia",
    },
    ReefSite {
        id: "GBR002",
        name: "Great Barrier Reef - Central",
        latitude: -18.0,
        longitude: 147.0,
        country: "Australia",
    },
    ReefSite {
        id: "HAW001",
        name: "Hawaiian Islands",
        latitude: 21.5,
        longitude: -158.0,
        country: "USA",
    },
    ReefSite {
        id: "FIJ001",
        name: "Fiji Reefs",
        latitude: -18.0,
        longitude: 178.0,
        country: "Fiji",
    },
    ReefSite {
        id: "MEX001",
        name: "Mesoamerican Reef",
        latitude: 18.0,
        longitude: -87.5,
        country: "Mexico",
    },
];

/// Look up a reef by identifier.
pub fn find_reef(id: &str) -> Option<&'static ReefSite> {
    REEF_REGISTRY.iter().find(|r| r.id == id)
}
