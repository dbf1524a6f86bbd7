use serde::Serialize;

use crate::keymap::KeyMaps;
use crate::source::{Corner, SourceTable};

/// Divisional and pound-for-pound rank snapshot for one corner of one fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterRanking {
    pub ranking_id: i64,
    pub fight_id: i64,
    pub fighter_id: Option<i64>,
    pub corner_color: String,
    pub weight_class_rank: Option<i64>,
    pub w_flyweight_rank: Option<i64>,
    pub w_featherweight_rank: Option<i64>,
    pub w_strawweight_rank: Option<i64>,
    pub w_bantamweight_rank: Option<i64>,
    pub heavyweight_rank: Option<i64>,
    pub light_heavyweight_rank: Option<i64>,
    pub middleweight_rank: Option<i64>,
    pub welterweight_rank: Option<i64>,
    pub lightweight_rank: Option<i64>,
    pub featherweight_rank: Option<i64>,
    pub bantamweight_rank: Option<i64>,
    pub flyweight_rank: Option<i64>,
    pub pfp_rank: Option<i64>,
    pub better_rank: Option<bool>,
}

/// Pure mapping from the per-record better-rank indicator to the
/// (red, blue) flag pair. An unrecognized indicator leaves both corners
/// undetermined.
pub fn better_rank_pair(indicator: Option<&str>) -> (Option<bool>, Option<bool>) {
    match indicator {
        Some("Red") => (Some(true), Some(false)),
        Some("Blue") => (Some(false), Some(true)),
        _ => (None, None),
    }
}

/// Unpivots the per-corner rank columns into two rows per record, red half
/// then blue half, both carrying the owning Fight's id. `ranking_id` is
/// dense over the concatenated set.
pub fn build_fighter_rankings(table: &SourceTable, maps: &KeyMaps) -> Vec<FighterRanking> {
    let mut rows = Vec::with_capacity(table.len() * 2);
    for corner in Corner::BOTH {
        let prefix = corner.rank_prefix();
        let col = |suffix: &str| format!("{prefix}{suffix}");
        for record in table.records() {
            let rank = |suffix: &str| record.integer(&col(suffix));
            let pair = better_rank_pair(record.get("BetterRank"));
            rows.push(FighterRanking {
                ranking_id: 0,
                fight_id: record.position() as i64 + 1,
                fighter_id: maps.fighter_id(record, corner),
                corner_color: corner.label().to_string(),
                weight_class_rank: rank("MatchWCRank"),
                w_flyweight_rank: rank("WFlyweightRank"),
                w_featherweight_rank: rank("WFeatherweightRank"),
                w_strawweight_rank: rank("WStrawweightRank"),
                w_bantamweight_rank: rank("WBantamweightRank"),
                heavyweight_rank: rank("HeavyweightRank"),
                light_heavyweight_rank: rank("LightHeavyweightRank"),
                middleweight_rank: rank("MiddleweightRank"),
                welterweight_rank: rank("WelterweightRank"),
                lightweight_rank: rank("LightweightRank"),
                featherweight_rank: rank("FeatherweightRank"),
                bantamweight_rank: rank("BantamweightRank"),
                flyweight_rank: rank("FlyweightRank"),
                pfp_rank: rank("PFPRank"),
                better_rank: match corner {
                    Corner::Red => pair.0,
                    Corner::Blue => pair.1,
                },
            });
        }
    }
    for (idx, row) in rows.iter_mut().enumerate() {
        row.ranking_id = idx as i64 + 1;
    }
    rows
}
