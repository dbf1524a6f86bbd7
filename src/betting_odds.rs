use serde::Serialize;

use crate::normalize::{round2, round4};
use crate::source::{SourceRecord, SourceTable};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BettingOdds {
    pub odds_id: i64,
    pub fight_id: i64,
    pub red_odds: Option<f64>,
    pub red_expected_value: Option<f64>,
    pub red_dec_odds: Option<f64>,
    pub red_submission_odds: Option<f64>,
    pub red_ko_odds: Option<f64>,
    pub blue_odds: Option<f64>,
    pub blue_expected_value: Option<f64>,
    pub blue_dec_odds: Option<f64>,
    pub blue_submission_odds: Option<f64>,
    pub blue_ko_odds: Option<f64>,
}

/// One row per record. Both `odds_id` and `fight_id` are the 1-based source
/// position, keeping the table positionally aligned with `fights`. Odds
/// round to 2 decimals, expected value to 4.
pub fn build_betting_odds(table: &SourceTable) -> Vec<BettingOdds> {
    table
        .records()
        .map(|record| {
            let id = record.position() as i64 + 1;
            BettingOdds {
                odds_id: id,
                fight_id: id,
                red_odds: money(record, "RedOdds"),
                red_expected_value: record.number("RedExpectedValue").map(round4),
                red_dec_odds: money(record, "RedDecOdds"),
                red_submission_odds: money(record, "RSubOdds"),
                red_ko_odds: money(record, "RKOOdds"),
                blue_odds: money(record, "BlueOdds"),
                blue_expected_value: record.number("BlueExpectedValue").map(round4),
                blue_dec_odds: money(record, "BlueDecOdds"),
                blue_submission_odds: money(record, "BSubOdds"),
                blue_ko_odds: money(record, "BKOOdds"),
            }
        })
        .collect()
}

fn money(record: SourceRecord<'_>, column: &str) -> Option<f64> {
    record.number(column).map(round2)
}
