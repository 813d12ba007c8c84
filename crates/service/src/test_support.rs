#![cfg(test)]
use chrono::{DateTime, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::ship::{rating::rating_of, Ship, ShipDraft, ShipType};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connect to the test database, migrating on first use.
/// Errors mean no database is reachable and DB-backed tests should skip.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    MIGRATED
        .get_or_try_init(|| async {
            let db = models::db::connect().await?;
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    models::db::connect().await
}

/// Noon on July 1st, far from any year boundary in every time zone.
pub fn mid_year(year: i32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, 7, 1, 12, 0, 0).unwrap()
}

pub fn complete_draft() -> ShipDraft {
    ShipDraft {
        name: Some("Eagle".into()),
        planet: Some("Earth".into()),
        ship_type: Some(ShipType::Transport),
        prod_date: Some(mid_year(3000)),
        is_used: Some(false),
        speed: Some(0.5),
        crew_size: Some(50),
    }
}

pub fn stored_ship(id: i64, name: &str, speed: f64, year: i32) -> Ship {
    let mut ship = Ship {
        id,
        name: name.to_string(),
        planet: "Earth".into(),
        ship_type: ShipType::Transport,
        prod_date: mid_year(year),
        is_used: false,
        speed,
        crew_size: 100,
        rating: 0.0,
    };
    ship.rating = rating_of(&ship);
    ship
}
