use serde::Serialize;

use crate::normalize::round2;
use crate::source::{SourceRecord, SourceTable};

/// Red-minus-blue deltas of the paired numeric attributes for one fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightDifferential {
    pub differential_id: i64,
    pub fight_id: i64,
    pub lose_streak_diff: Option<f64>,
    pub win_streak_diff: Option<f64>,
    pub longest_win_streak_diff: Option<f64>,
    pub wins_diff: Option<f64>,
    pub losses_diff: Option<f64>,
    pub draws_diff: Option<f64>,
    pub total_rounds_diff: Option<f64>,
    pub total_title_bouts_diff: Option<f64>,
    pub ko_diff: Option<f64>,
    pub submission_diff: Option<f64>,
    pub height_cms_diff: Option<f64>,
    pub reach_cms_diff: Option<f64>,
    pub weight_lbs_diff: Option<f64>,
    pub age_diff: Option<f64>,
    pub sig_strikes_diff: Option<f64>,
    pub avg_submission_att_diff: Option<f64>,
    pub avg_takedown_landed_diff: Option<f64>,
}

/// One row per record, positionally keyed like `fights`. Physical and
/// rate-based deltas round to 2 decimals; count-based deltas stay as-is.
pub fn compute_differentials(table: &SourceTable) -> Vec<FightDifferential> {
    table
        .records()
        .map(|record| {
            let id = record.position() as i64 + 1;
            FightDifferential {
                differential_id: id,
                fight_id: id,
                lose_streak_diff: paired(record, "CurrentLoseStreak"),
                win_streak_diff: paired(record, "CurrentWinStreak"),
                longest_win_streak_diff: paired(record, "LongestWinStreak"),
                wins_diff: paired(record, "Wins"),
                losses_diff: paired(record, "Losses"),
                draws_diff: paired(record, "Draws"),
                total_rounds_diff: paired(record, "TotalRoundsFought"),
                total_title_bouts_diff: paired(record, "TotalTitleBouts"),
                ko_diff: paired(record, "WinsByKO"),
                submission_diff: paired(record, "WinsBySubmission"),
                height_cms_diff: paired(record, "HeightCms").map(round2),
                reach_cms_diff: paired(record, "ReachCms").map(round2),
                weight_lbs_diff: paired(record, "WeightLbs"),
                age_diff: paired(record, "Age"),
                sig_strikes_diff: paired(record, "AvgSigStrLanded").map(round2),
                avg_submission_att_diff: paired(record, "AvgSubAtt").map(round2),
                avg_takedown_landed_diff: paired(record, "AvgTDLanded").map(round2),
            }
        })
        .collect()
}

// Red minus blue for one paired column; either side missing makes the
// delta missing.
fn paired(record: SourceRecord<'_>, suffix: &str) -> Option<f64> {
    let red = record.number(&format!("Red{suffix}"))?;
    let blue = record.number(&format!("Blue{suffix}"))?;
    Some(red - blue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceTable;

    #[test]
    fn deltas_are_red_minus_blue_with_null_propagation() {
        let table = SourceTable::from_rows(
            &[
                "RedWins",
                "BlueWins",
                "RedHeightCms",
                "BlueHeightCms",
                "RedAvgTDLanded",
                "BlueAvgTDLanded",
                "RedAge",
                "BlueAge",
            ],
            &[
                &["10", "4", "193.04", "190.5", "1.91", "0.5", "35", "32"],
                &["3", "", "180.0", "garbage", "", "1.0", "28", "30"],
            ],
        );
        let diffs = compute_differentials(&table);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].differential_id, 1);
        assert_eq!(diffs[0].fight_id, 1);

        assert_eq!(diffs[0].wins_diff, Some(6.0));
        assert_eq!(diffs[0].height_cms_diff, Some(2.54));
        assert_eq!(diffs[0].avg_takedown_landed_diff, Some(1.41));
        assert_eq!(diffs[0].age_diff, Some(3.0));

        // Blank and unparseable cells null the delta, never abort.
        assert_eq!(diffs[1].wins_diff, None);
        assert_eq!(diffs[1].height_cms_diff, None);
        assert_eq!(diffs[1].avg_takedown_landed_diff, None);
        assert_eq!(diffs[1].age_diff, Some(-2.0));
        assert_eq!(diffs[1].fight_id, 2);
    }
}
