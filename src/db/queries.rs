use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{Ground, GroundTier, TimeSlot, Venue, VenueSummary};

// ── Venues ──

pub fn get_venue(conn: &Connection, id: i64) -> anyhow::Result<Option<Venue>> {
    let row = conn
        .query_row(
            "SELECT id, name, city, location, address, description, phone, email, timings, price_range, rating, reviews, amenities
             FROM venues WHERE id = ?1",
            params![id],
            |row| {
                Ok((
                    Venue {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        city: row.get(2)?,
                        location: row.get(3)?,
                        address: row.get(4)?,
                        description: row.get(5)?,
                        phone: row.get(6)?,
                        email: row.get(7)?,
                        timings: row.get(8)?,
                        price_range: row.get(9)?,
                        rating: row.get(10)?,
                        reviews: row.get(11)?,
                        amenities: vec![],
                        grounds: vec![],
                    },
                    row.get::<_, String>(12)?,
                ))
            },
        )
        .optional()?;

    let Some((mut venue, amenities_json)) = row else {
        return Ok(None);
    };
    venue.amenities = parse_amenities(&amenities_json);
    venue.grounds = get_grounds(conn, id)?;
    Ok(Some(venue))
}

pub fn get_grounds(conn: &Connection, venue_id: i64) -> anyhow::Result<Vec<Ground>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, capacity, tier FROM grounds WHERE venue_id = ?1 ORDER BY position ASC",
    )?;

    let rows = stmt.query_map(params![venue_id], |row| {
        let tier: String = row.get(3)?;
        Ok(Ground {
            id: row.get(0)?,
            name: row.get(1)?,
            capacity: row.get(2)?,
            tier: GroundTier::parse(&tier),
        })
    })?;

    let mut grounds = vec![];
    for row in rows {
        grounds.push(row?);
    }
    Ok(grounds)
}

pub fn list_venues(conn: &Connection) -> anyhow::Result<Vec<VenueSummary>> {
    let mut stmt = conn.prepare(
        "SELECT v.id, v.name, v.city, v.location, v.price_range, v.rating, v.reviews, v.amenities,
                (SELECT COUNT(*) FROM grounds g WHERE g.venue_id = v.id)
         FROM venues v ORDER BY v.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let amenities: String = row.get(7)?;
        Ok(VenueSummary {
            id: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            location: row.get(3)?,
            price_range: row.get(4)?,
            rating: row.get(5)?,
            reviews: row.get(6)?,
            amenities: parse_amenities(&amenities),
            grounds: row.get(8)?,
        })
    })?;

    let mut venues = vec![];
    for row in rows {
        venues.push(row?);
    }
    Ok(venues)
}

fn parse_amenities(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable amenities list");
        vec![]
    })
}

// ── Slots ──

pub fn list_slots(
    conn: &Connection,
    venue_id: i64,
    ground_id: i64,
    date: NaiveDate,
) -> anyhow::Result<Vec<TimeSlot>> {
    let date_str = date.format("%Y-%m-%d").to_string();
    let mut stmt = conn.prepare(
        "SELECT t.time_label, t.price,
                t.available AND NOT EXISTS (
                    SELECT 1 FROM slot_blocks b
                    WHERE b.ground_id = g.id AND b.date = ?3 AND b.time_label = t.time_label
                )
         FROM slot_templates t
         JOIN grounds g ON g.venue_id = t.venue_id
         WHERE t.venue_id = ?1 AND g.id = ?2
         ORDER BY t.position ASC",
    )?;

    let rows = stmt.query_map(params![venue_id, ground_id, date_str], |row| {
        Ok(TimeSlot {
            time: row.get(0)?,
            price: row.get(1)?,
            available: row.get(2)?,
        })
    })?;

    let mut slots = vec![];
    for row in rows {
        slots.push(row?);
    }
    Ok(slots)
}

/// Marks one slot as taken. Returns `false` if it was already blocked.
pub fn block_slot(
    conn: &Connection,
    ground_id: i64,
    date: NaiveDate,
    time_label: &str,
) -> anyhow::Result<bool> {
    let count = conn.execute(
        "INSERT OR IGNORE INTO slot_blocks (ground_id, date, time_label) VALUES (?1, ?2, ?3)",
        params![ground_id, date.format("%Y-%m-%d").to_string(), time_label],
    )?;
    Ok(count > 0)
}
