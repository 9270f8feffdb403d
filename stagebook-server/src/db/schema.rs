//! Database schema for venues, artists and shows

use sqlx::PgPool;

use super::DbError;

/// Statements applied in order; each is idempotent.
const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        address VARCHAR(120) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        facebook_link VARCHAR(120),
        image_link VARCHAR(500),
        website VARCHAR(120),
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR(500)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        phone VARCHAR(120),
        genres TEXT[] NOT NULL DEFAULT '{}',
        facebook_link VARCHAR(120),
        image_link VARCHAR(500),
        website VARCHAR(120),
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR(500)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id SERIAL PRIMARY KEY,
        venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE RESTRICT,
        artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE RESTRICT,
        start_time TIMESTAMPTZ NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(city, state)",
    "CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)",
    "CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)",
    "CREATE INDEX IF NOT EXISTS idx_shows_start ON shows(start_time)",
];

/// Create tables and indexes if they don't exist.
pub async fn migrate(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Applying schema...");

    let mut tx = pool.begin().await?;
    for statement in STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(statements = STATEMENTS.len(), "Schema up to date");
    Ok(())
}
