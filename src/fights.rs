use serde::Serialize;

use crate::keymap::KeyMaps;
use crate::normalize::parse_round_duration;
use crate::source::{Corner, SourceTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fight {
    pub fight_id: i64,
    pub red_fighter_id: Option<i64>,
    pub blue_fighter_id: Option<i64>,
    pub event_id: Option<i64>,
    pub title_bout: Option<bool>,
    pub num_rounds: Option<i64>,
    pub winner_color: Option<String>,
    pub weight_class: Option<String>,
    pub finish_method: Option<String>,
    pub finish_details: Option<String>,
    pub finish_round: Option<i64>,
    pub finish_round_time: Option<i64>,
    pub total_fight_time_seconds: Option<i64>,
}

/// One Fight per source record. `fight_id` is the 1-based source row
/// position; betting odds and differentials share the same positional key.
pub fn build_fights(table: &SourceTable, maps: &KeyMaps) -> Vec<Fight> {
    table
        .records()
        .map(|record| Fight {
            fight_id: record.position() as i64 + 1,
            red_fighter_id: maps.fighter_id(record, Corner::Red),
            blue_fighter_id: maps.fighter_id(record, Corner::Blue),
            event_id: maps.event_id(record),
            title_bout: record.boolean("TitleBout"),
            num_rounds: record.integer("NumberOfRounds"),
            winner_color: record.get("Winner").map(str::to_string),
            weight_class: record.get("WeightClass").map(str::to_string),
            finish_method: record.get("Finish").map(str::to_string),
            finish_details: record.get("FinishDetails").map(str::to_string),
            finish_round: record.integer("FinishRound"),
            finish_round_time: parse_round_duration(record.get("FinishRoundTime")),
            total_fight_time_seconds: record.integer("TotalFightTimeSecs"),
        })
        .collect()
}
