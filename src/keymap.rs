use std::collections::HashMap;

use crate::dimensions::{Event, Fighter};
use crate::normalize::canonicalize_name;
use crate::source::{Corner, SourceRecord};

pub type EventKey = (Option<String>, Option<String>);

/// Lookup tables from business identity to the surrogate dimension keys.
/// A miss is a null foreign key in the consuming fact row, never an error.
pub struct KeyMaps {
    fighter_ids: HashMap<String, i64>,
    event_ids: HashMap<EventKey, i64>,
}

impl KeyMaps {
    pub fn build(fighters: &[Fighter], events: &[Event]) -> Self {
        // Insert order makes duplicate names (which extraction rules out)
        // resolve last-writer-wins.
        let fighter_ids = fighters
            .iter()
            .map(|f| (f.fighter_name.clone(), f.fighter_id))
            .collect();
        let event_ids = events
            .iter()
            .map(|e| {
                (
                    (e.event_date.clone(), e.event_location.clone()),
                    e.event_id,
                )
            })
            .collect();
        Self { fighter_ids, event_ids }
    }

    /// Resolves the fighter in the given corner of a record, canonicalizing
    /// the raw name the same way extraction did.
    pub fn fighter_id(&self, record: SourceRecord<'_>, corner: Corner) -> Option<i64> {
        let column = format!("{}Fighter", corner.stat_prefix());
        let name = canonicalize_name(record.get(&column))?;
        self.fighter_ids.get(&name).copied()
    }

    pub fn event_id(&self, record: SourceRecord<'_>) -> Option<i64> {
        let key = (
            record.get("Date").map(str::to_string),
            record.get("Location").map(str::to_string),
        );
        self.event_ids.get(&key).copied()
    }
}
