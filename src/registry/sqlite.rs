// SPDX-License-Identifier: GPL-3.0-only
use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::error::{ParkingSpotError, Result};
use crate::registry::{
    models::{Page, PageRequest, ParkingSpot},
    traits::ParkingSpotRegistry,
};

pub struct SqliteRegistry {
    pool: SqlitePool,
}

impl SqliteRegistry {
    /// Open (creating if missing) the database file at `db_path`. The path
    /// `:memory:` opens a private in-memory database instead.
    pub async fn new(db_path: &Path, max_connections: u32) -> anyhow::Result<Self> {
        if db_path == Path::new(":memory:") {
            return Self::in_memory().await;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        let registry = Self { pool };
        registry.init_schema().await?;

        Ok(registry)
    }

    /// The pool holds a single connection that never expires, since each
    /// SQLite memory connection is its own database.
    async fn in_memory() -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let registry = Self { pool };
        registry.init_schema().await?;

        Ok(registry)
    }

    async fn init_schema(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS parking_spots (
                id TEXT PRIMARY KEY,
                parking_spot_number TEXT NOT NULL UNIQUE,
                license_plate_car TEXT NOT NULL UNIQUE,
                brand_car TEXT NOT NULL,
                model_car TEXT NOT NULL,
                color_car TEXT NOT NULL,
                registration_date TEXT NOT NULL,
                responsible_name TEXT NOT NULL,
                apartment TEXT NOT NULL,
                block TEXT NOT NULL,
                UNIQUE (apartment, block)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Initialized SQLite parking spot schema");
        Ok(())
    }

    fn spot_from_row(row: &SqliteRow) -> Result<ParkingSpot> {
        let id: String = row.try_get("id")?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| ParkingSpotError::Corrupt(format!("invalid id '{}': {}", id, e)))?;

        let registration_date: String = row.try_get("registration_date")?;
        let registration_date = DateTime::parse_from_rfc3339(&registration_date)
            .map_err(|e| {
                ParkingSpotError::Corrupt(format!(
                    "invalid registration_date '{}': {}",
                    registration_date, e
                ))
            })?
            .with_timezone(&Utc);

        Ok(ParkingSpot {
            id,
            parking_spot_number: row.try_get("parking_spot_number")?,
            license_plate_car: row.try_get("license_plate_car")?,
            brand_car: row.try_get("brand_car")?,
            model_car: row.try_get("model_car")?,
            color_car: row.try_get("color_car")?,
            registration_date,
            responsible_name: row.try_get("responsible_name")?,
            apartment: row.try_get("apartment")?,
            block: row.try_get("block")?,
        })
    }
}

/// Fixed-width RFC 3339 so that text order matches chronological order.
fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[async_trait]
impl ParkingSpotRegistry for SqliteRegistry {
    async fn insert(&self, spot: &ParkingSpot) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO parking_spots (id, parking_spot_number, license_plate_car, brand_car, model_car, color_car, registration_date, responsible_name, apartment, block)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(spot.id.to_string())
        .bind(&spot.parking_spot_number)
        .bind(&spot.license_plate_car)
        .bind(&spot.brand_car)
        .bind(&spot.model_car)
        .bind(&spot.color_car)
        .bind(format_timestamp(&spot.registration_date))
        .bind(&spot.responsible_name)
        .bind(&spot.apartment)
        .bind(&spot.block)
        .execute(&self.pool)
        .await?;

        debug!(spot_id = %spot.id, "Inserted parking spot");
        Ok(())
    }

    async fn replace(&self, spot: &ParkingSpot) -> Result<()> {
        // registration_date is never rewritten
        let result = sqlx::query(
            r#"
            UPDATE parking_spots
            SET parking_spot_number = ?2, license_plate_car = ?3, brand_car = ?4, model_car = ?5, color_car = ?6, responsible_name = ?7, apartment = ?8, block = ?9
            WHERE id = ?1
            "#,
        )
        .bind(spot.id.to_string())
        .bind(&spot.parking_spot_number)
        .bind(&spot.license_plate_car)
        .bind(&spot.brand_car)
        .bind(&spot.model_car)
        .bind(&spot.color_car)
        .bind(&spot.responsible_name)
        .bind(&spot.apartment)
        .bind(&spot.block)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ParkingSpotError::NotFound);
        }

        debug!(spot_id = %spot.id, "Replaced parking spot");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM parking_spots WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ParkingSpot>> {
        let row = sqlx::query("SELECT * FROM parking_spots WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Self::spot_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, request: &PageRequest) -> Result<Page<ParkingSpot>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM parking_spots")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT * FROM parking_spots ORDER BY {} {}, id ASC LIMIT ?1 OFFSET ?2",
            request.sort.field.column(),
            request.sort.direction.keyword(),
        );
        let rows = sqlx::query(&query)
            .bind(i64::from(request.size))
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        // A bad row fails the whole page so the totals never disagree with
        // the content.
        let spots = rows
            .iter()
            .map(Self::spot_from_row)
            .collect::<Result<Vec<_>>>()
            .inspect_err(|e| error!(error = %e, "Failed to parse parking spot from database"))?;

        Ok(Page::new(spots, request, u64::try_from(total).unwrap_or(0)))
    }

    async fn exists_by_license_plate_car(&self, license_plate_car: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE license_plate_car = ?1)",
        )
        .bind(license_plate_car)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_parking_spot_number(&self, parking_spot_number: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE parking_spot_number = ?1)",
        )
        .bind(parking_spot_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_apartment_and_block(&self, apartment: &str, block: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM parking_spots WHERE apartment = ?1 AND block = ?2)",
        )
        .bind(apartment)
        .bind(block)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
