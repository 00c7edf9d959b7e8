use anyhow::Context;
use rusqlite::{params, Connection};

/// Schema and seed catalog, applied in order. Names are recorded in
/// `_migrations` so each one runs once per database.
const MIGRATIONS: &[(&str, &str)] = &[
    ("001_catalog.sql", include_str!("../../migrations/001_catalog.sql")),
    ("002_seed_venues.sql", include_str!("../../migrations/002_seed_venues.sql")),
];

pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    for (name, sql) in MIGRATIONS {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        conn.execute_batch(sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;
        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", params![name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!(migration = name, "applied migration");
    }

    Ok(())
}
