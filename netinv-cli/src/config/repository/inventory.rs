//! Repository for the stored inventory

use anyhow::{Context, Result};
use sqlx::{Row, SqlitePool};

use crate::inventory::{Location, Region};

/// Replace the whole stored inventory
///
/// Runs in one transaction: on any failure (for example a duplicate region
/// name) the previous inventory is left as it was.
pub async fn replace_inventory(pool: &SqlitePool, regions: &[Region]) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to start transaction")?;

    sqlx::query("DELETE FROM regions")
        .execute(&mut *tx)
        .await
        .context("Failed to delete old regions")?;

    for (position, region) in regions.iter().enumerate() {
        let locations_json = serde_json::to_string(&region.locations)
            .context("Failed to serialize locations")?;

        sqlx::query(
            r#"
            INSERT INTO regions (name, position, locations_json)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&region.name)
        .bind(position as i64)
        .bind(&locations_json)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("Failed to insert region '{}'", region.name))?;
    }

    tx.commit().await.context("Failed to commit transaction")?;

    log::info!("Stored inventory with {} regions", regions.len());
    Ok(())
}

/// Load the full inventory in stored order
pub async fn load_inventory(pool: &SqlitePool) -> Result<Vec<Region>> {
    let rows = sqlx::query("SELECT name, locations_json FROM regions ORDER BY position, id")
        .fetch_all(pool)
        .await
        .context("Failed to load regions")?;

    let mut regions = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("name")?;
        let locations_json: String = row.try_get("locations_json")?;
        let locations: Vec<Location> = serde_json::from_str(&locations_json)
            .with_context(|| format!("Failed to deserialize locations of region '{}'", name))?;
        regions.push(Region { name, locations });
    }

    Ok(regions)
}

/// Number of stored regions
pub async fn region_count(pool: &SqlitePool) -> Result<usize> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM regions")
        .fetch_one(pool)
        .await
        .context("Failed to count regions")?;
    Ok(count as usize)
}
