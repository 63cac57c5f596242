//! World files: one JSON entity per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::error::HostError;

use super::Entity;

/// Read every entity from a world file.
///
/// Blank lines are skipped. Malformed lines are logged and skipped so one
/// bad record does not take the whole world down.
pub fn load_world(path: impl AsRef<Path>) -> Result<Vec<Entity>, HostError> {
    let file = File::open(path.as_ref())?;
    parse_world(BufReader::new(file))
}

/// Parse JSON-lines entities from any reader
pub fn parse_world(reader: impl BufRead) -> Result<Vec<Entity>, HostError> {
    let mut entities = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<Entity>(&line) {
            Ok(entity) => entities.push(entity),
            Err(e) => {
                tracing::warn!(line = index + 1, error = %e, "skipping malformed world entity");
            }
        }
    }

    Ok(entities)
}

/// Write entities back out as JSON lines
pub fn save_world(path: impl AsRef<Path>, entities: &[Entity]) -> Result<(), HostError> {
    let mut file = File::create(path.as_ref())?;
    for entity in entities {
        serde_json::to_writer(&mut file, entity)?;
        file.write_all(b"\n")?;
    }
    Ok(())
}
