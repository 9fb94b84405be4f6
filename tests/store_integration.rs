//! Database round-trip tests for the upsert writer and reader.
//!
//! These need a reachable PostgreSQL instance configured through the same
//! `NEON_*` variables the binaries use (a `.env` file works). Run with
//! `cargo test -- --ignored`.

use anyhow::Result;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sqlx::{Connection, PgConnection};

use reefwatch::generator::generate_observations;
use reefwatch::models::SIMULATED_SOURCE;
use reefwatch::reefs::ReefSite;
use reefwatch::{config, db, schema, store, BleachingRisk, ReefObservation};

static TEST_SITES: &[ReefSite] = &[
    ReefSite {
        id: "ZZT-RT1",
        name: "Round Trip Shoal",
        latitude: -10.25,
        longitude: 142.5,
        country: "Testland",
    },
    ReefSite {
        id: "ZZT-RT2",
        name: "Round Trip Atoll",
        latitude: 5.125,
        longitude: -160.0,
        country: "Testland",
    },
];

async fn test_connection() -> Result<PgConnection> {
    // ---
    dotenvy::dotenv().ok();
    let cfg = config::load_from_env()?;
    let mut conn = db::connect(&cfg.db).await?;
    schema::ensure_schema(&mut conn).await?;
    Ok(conn)
}

async fn delete_reefs(conn: &mut PgConnection, ids: &[&str]) -> Result<()> {
    // ---
    let ids: Vec<String> = ids.iter().map(|s| s.to_string()).collect();
    sqlx::query("DELETE FROM reef_data WHERE reef_id = ANY($1)")
        .bind(&ids)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn single(reef_id: &str, name: &str, sst: f64) -> ReefObservation {
    // ---
    let dhw = reefwatch::generator::degree_heating_weeks(sst);
    ReefObservation {
        reef_id: reef_id.to_string(),
        reef_name: name.to_string(),
        latitude: 1.5,
        longitude: 2.5,
        country: "Testland".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 26).unwrap(),
        sst_celsius: sst,
        dhw_value: reefwatch::generator::round2(dhw),
        bleaching_risk: BleachingRisk::from_dhw(dhw),
        data_source: SIMULATED_SOURCE.to_string(),
    }
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (NEON_* env vars)"]
async fn round_trip_preserves_reef_date_risk() -> Result<()> {
    // ---
    let mut conn = test_connection().await?;
    let ids: Vec<&str> = TEST_SITES.iter().map(|s| s.id).collect();
    delete_reefs(&mut conn, &ids).await?;

    let today = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let batch = generate_observations(TEST_SITES, today, &mut rng)?;

    let submitted = store::upsert_observations(&mut conn, &batch).await?;
    assert_eq!(submitted, 62);

    let stored: Vec<_> = store::fetch_observations(&mut conn)
        .await?
        .into_iter()
        .filter(|o| ids.contains(&o.reef_id.as_str()))
        .collect();

    let mut written: Vec<_> = batch
        .iter()
        .map(|o| (o.reef_id.clone(), o.date, Some(o.bleaching_risk)))
        .collect();
    let mut read: Vec<_> = stored
        .iter()
        .map(|o| (o.reef_id.clone(), o.date, o.bleaching_risk))
        .collect();
    written.sort();
    read.sort();
    assert_eq!(read, written);

    // Reader contract: newest date first.
    assert!(stored.windows(2).all(|w| w[0].date >= w[1].date));

    let first = stored.iter().find(|o| o.reef_id == "ZZT-RT2").unwrap();
    assert_eq!(first.latitude, Some(5.125));
    assert_eq!(first.data_source, "Simulated");
    assert!(first.created_at.is_some());

    delete_reefs(&mut conn, &ids).await?;
    conn.close().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (NEON_* env vars)"]
async fn second_upsert_overwrites_derived_fields_only() -> Result<()> {
    // ---
    let mut conn = test_connection().await?;
    delete_reefs(&mut conn, &["ZZT-UP1"]).await?;

    let first = single("ZZT-UP1", "Original Name", 26.5);
    let second = single("ZZT-UP1", "Renamed", 28.25);
    assert_eq!(first.bleaching_risk, BleachingRisk::NoRisk);
    assert_eq!(second.bleaching_risk, BleachingRisk::High);

    store::upsert_observations(&mut conn, &[first]).await?;
    store::upsert_observations(&mut conn, &[second]).await?;

    let rows: Vec<_> = store::fetch_observations(&mut conn)
        .await?
        .into_iter()
        .filter(|o| o.reef_id == "ZZT-UP1")
        .collect();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.sst_celsius, Some(28.25));
    assert_eq!(row.dhw_value, Some(8.75));
    assert_eq!(row.bleaching_risk, Some(BleachingRisk::High));
    // name is first-write-wins
    assert_eq!(row.reef_name, "Original Name");

    delete_reefs(&mut conn, &["ZZT-UP1"]).await?;
    conn.close().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (NEON_* env vars)"]
async fn duplicate_batch_is_rejected_without_writing() -> Result<()> {
    // ---
    let mut conn = test_connection().await?;
    delete_reefs(&mut conn, &["ZZT-DUP"]).await?;

    let batch = vec![single("ZZT-DUP", "Dup", 27.0), single("ZZT-DUP", "Dup", 28.0)];
    let err = store::upsert_observations(&mut conn, &batch).await;
    assert!(matches!(err, Err(reefwatch::ReefError::DuplicateObservation { .. })));

    let count = store::fetch_observations(&mut conn)
        .await?
        .iter()
        .filter(|o| o.reef_id == "ZZT-DUP")
        .count();
    assert_eq!(count, 0);

    conn.close().await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (NEON_* env vars)"]
async fn server_reports_version() -> Result<()> {
    // ---
    let mut conn = test_connection().await?;
    let version = db::server_version(&mut conn).await?;
    assert!(version.starts_with("PostgreSQL"), "unexpected version: {}", version);
    conn.close().await?;
    Ok(())
}
