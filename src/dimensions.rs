use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::normalize::{canonicalize_name, round2};
use crate::source::{Corner, SourceTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fighter {
    pub fighter_id: i64,
    pub fighter_name: String,
    pub height_cms: Option<f64>,
    pub reach_cms: Option<f64>,
    pub stance: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event_id: i64,
    pub event_date: Option<String>,
    pub event_location: Option<String>,
}

#[derive(Default)]
struct FighterAgg {
    height_sum: f64,
    height_count: usize,
    reach_sum: f64,
    reach_count: usize,
    // Stance counts in first-seen order so frequency ties break toward the
    // earliest observed value.
    stances: Vec<(String, usize)>,
    gender: Option<String>,
}

impl FighterAgg {
    fn observe(
        &mut self,
        height: Option<f64>,
        reach: Option<f64>,
        stance: Option<&str>,
        gender: Option<&str>,
    ) {
        if let Some(h) = height {
            self.height_sum += h;
            self.height_count += 1;
        }
        if let Some(r) = reach {
            self.reach_sum += r;
            self.reach_count += 1;
        }
        if let Some(stance) = stance {
            match self.stances.iter_mut().find(|(name, _)| name == stance) {
                Some((_, count)) => *count += 1,
                None => self.stances.push((stance.to_string(), 1)),
            }
        }
        if self.gender.is_none()
            && let Some(gender) = gender
        {
            self.gender = Some(gender.to_string());
        }
    }

    fn modal_stance(&self) -> Option<String> {
        let best = self.stances.iter().map(|(_, count)| *count).max()?;
        self.stances
            .iter()
            .find(|(_, count)| *count == best)
            .map(|(name, _)| name.clone())
    }

    fn mean_height(&self) -> Option<f64> {
        (self.height_count > 0).then(|| round2(self.height_sum / self.height_count as f64))
    }

    fn mean_reach(&self) -> Option<f64> {
        (self.reach_count > 0).then(|| round2(self.reach_sum / self.reach_count as f64))
    }
}

/// Unpivots the red and blue fighter columns, de-duplicates by canonical
/// name and aggregates physical attributes across all appearances. Ids are
/// dense 1..N in canonical name order.
pub fn extract_fighters(table: &SourceTable) -> Vec<Fighter> {
    let mut groups: BTreeMap<String, FighterAgg> = BTreeMap::new();

    // All red-corner appearances first, then all blue-corner appearances,
    // so "first observed" aggregation sees the corners in that order.
    for corner in Corner::BOTH {
        let prefix = corner.stat_prefix();
        let name_col = format!("{prefix}Fighter");
        let height_col = format!("{prefix}HeightCms");
        let reach_col = format!("{prefix}ReachCms");
        let stance_col = format!("{prefix}Stance");

        for record in table.records() {
            let Some(name) = canonicalize_name(record.get(&name_col)) else {
                continue;
            };
            groups.entry(name).or_default().observe(
                record.number(&height_col),
                record.number(&reach_col),
                record.get(&stance_col),
                record.get("Gender"),
            );
        }
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(idx, (name, agg))| Fighter {
            fighter_id: idx as i64 + 1,
            fighter_name: name,
            height_cms: agg.mean_height(),
            reach_cms: agg.mean_reach(),
            stance: agg.modal_stance(),
            gender: agg.gender,
        })
        .collect()
}

/// De-duplicates (date, location) pairs by exact equality, no normalization.
/// Ids are dense 1..N in first-appearance order.
pub fn extract_events(table: &SourceTable) -> Vec<Event> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();
    for record in table.records() {
        let date = record.get("Date").map(str::to_string);
        let location = record.get("Location").map(str::to_string);
        if seen.insert((date.clone(), location.clone())) {
            events.push(Event {
                event_id: events.len() as i64 + 1,
                event_date: date,
                event_location: location,
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_fight_table() -> SourceTable {
        SourceTable::from_rows(
            &[
                "RedFighter",
                "BlueFighter",
                "RedHeightCms",
                "BlueHeightCms",
                "RedReachCms",
                "BlueReachCms",
                "RedStance",
                "BlueStance",
                "Gender",
                "Date",
                "Location",
            ],
            &[
                &[
                    "jon Jones",
                    "Ciryl Gane",
                    "193.04",
                    "193.04",
                    "213.36",
                    "206.0",
                    "Orthodox",
                    "Orthodox",
                    "MALE",
                    "2023-01-01",
                    "Vegas",
                ],
                &[
                    "Jon Jones",
                    "Tom Aspinall",
                    "193.06",
                    "196.0",
                    "",
                    "198.0",
                    "Switch",
                    "Orthodox",
                    "MALE",
                    "2023-06-01",
                    "London",
                ],
            ],
        )
    }

    #[test]
    fn fighters_dedup_across_case_and_corners() {
        let fighters = extract_fighters(&two_fight_table());
        let names = fighters
            .iter()
            .map(|f| f.fighter_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Ciryl Gane", "Jon Jones", "Tom Aspinall"]);
        assert_eq!(
            fighters.iter().map(|f| f.fighter_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn fighter_attributes_aggregate_over_appearances() {
        let fighters = extract_fighters(&two_fight_table());
        let jones = fighters
            .iter()
            .find(|f| f.fighter_name == "Jon Jones")
            .unwrap();
        // Mean of the two height observations, rounded to 2 decimals.
        assert_eq!(jones.height_cms, Some(193.05));
        // Single non-null reach observation.
        assert_eq!(jones.reach_cms, Some(213.36));
        // Frequency tie between Orthodox and Switch breaks to first seen.
        assert_eq!(jones.stance.as_deref(), Some("Orthodox"));
        assert_eq!(jones.gender.as_deref(), Some("MALE"));
    }

    #[test]
    fn events_dedup_exact_pairs_in_order() {
        let events = extract_events(&two_fight_table());
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_id, 1);
        assert_eq!(events[0].event_date.as_deref(), Some("2023-01-01"));
        assert_eq!(events[0].event_location.as_deref(), Some("Vegas"));
        assert_eq!(events[1].event_id, 2);
    }
}
