//! CSV roster loader.
//!
//! # CSV format
//!
//! One row per kind, in `KindId` order.
//!
//! ```csv
//! name,count,schooling,move_speed,random_spawn,spawn_x,spawn_y
//! clownfish,40,true,2.0,true,,
//! shark,1,false,3.5,false,4.0,-2.0
//! ```
//!
//! `schooling` and `random_spawn` accept `true`/`false`/`1`/`0`.  The spawn
//! columns may be empty when `random_spawn` is true.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use shoal_core::Vec2;

use crate::{KindSpec, Roster, SpawnError, SpawnResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    name:         String,
    count:        usize,
    schooling:    String,
    move_speed:   f32,
    random_spawn: String,
    spawn_x:      Option<f32>,
    spawn_y:      Option<f32>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`Roster`] from a CSV file.
pub fn load_roster_csv(path: &Path) -> SpawnResult<Roster> {
    let file = std::fs::File::open(path)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
pub fn load_roster_reader<R: Read>(reader: R) -> SpawnResult<Roster> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut kinds = Vec::new();
    for (row, result) in csv_reader.deserialize::<RosterRecord>().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let r = result.map_err(|e| SpawnError::Parse(format!("line {line}: {e}")))?;

        let random_spawn = parse_bool(&r.random_spawn, "random_spawn", line)?;
        let spawn_point = match (r.spawn_x, r.spawn_y) {
            (Some(x), Some(y)) => Vec2::new(x, y),
            (None, None) if random_spawn => Vec2::ZERO,
            _ => {
                return Err(SpawnError::Parse(format!(
                    "line {line}: fixed-spawn kind {:?} needs both spawn_x and spawn_y",
                    r.name
                )));
            }
        };

        kinds.push(KindSpec {
            schooling: parse_bool(&r.schooling, "schooling", line)?,
            name: r.name,
            count: r.count,
            move_speed: r.move_speed,
            random_spawn,
            spawn_point,
        });
    }

    Ok(Roster::new(kinds))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_bool(s: &str, column: &str, line: usize) -> SpawnResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(SpawnError::Parse(format!(
            "line {line}: {column} must be true/false/1/0, got {other:?}"
        ))),
    }
}
