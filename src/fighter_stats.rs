use serde::Serialize;

use crate::keymap::KeyMaps;
use crate::normalize::round2;
use crate::source::{Corner, SourceTable};

/// Pre-fight career snapshot for one corner of one fight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FighterStat {
    pub stat_id: i64,
    pub fight_id: i64,
    pub fighter_id: Option<i64>,
    pub fighter_corner: String,
    pub weight_lbs: Option<f64>,
    pub age: Option<i64>,
    pub current_win_streak: Option<i64>,
    pub current_lose_streak: Option<i64>,
    pub longest_win_streak: Option<i64>,
    pub total_wins: Option<i64>,
    pub total_losses: Option<i64>,
    pub total_draws: Option<i64>,
    pub wins_by_ko: Option<i64>,
    pub wins_by_submission: Option<i64>,
    pub wins_by_tko_doctor_stoppage: Option<i64>,
    pub wins_by_decision_unanimous: Option<i64>,
    pub wins_by_decision_majority: Option<i64>,
    pub wins_by_decision_split: Option<i64>,
    pub avg_sig_strikes_landed: Option<f64>,
    pub avg_sig_strikes_pct: Option<f64>,
    pub avg_submission_attempts: Option<f64>,
    pub avg_takedowns_landed: Option<f64>,
    pub avg_takedowns_pct: Option<f64>,
}

/// Unpivots the per-corner stat columns into two rows per record, all red
/// rows first then all blue rows. Both halves of a record carry the owning
/// Fight's id (its 1-based source position); `stat_id` is dense over the
/// concatenated set.
pub fn build_fighter_stats(table: &SourceTable, maps: &KeyMaps) -> Vec<FighterStat> {
    let mut rows = Vec::with_capacity(table.len() * 2);
    for corner in Corner::BOTH {
        let prefix = corner.stat_prefix();
        let col = |suffix: &str| format!("{prefix}{suffix}");
        for record in table.records() {
            rows.push(FighterStat {
                stat_id: 0,
                fight_id: record.position() as i64 + 1,
                fighter_id: maps.fighter_id(record, corner),
                fighter_corner: corner.label().to_string(),
                weight_lbs: record.number(&col("WeightLbs")),
                age: record.integer(&col("Age")),
                current_win_streak: record.integer(&col("CurrentWinStreak")),
                current_lose_streak: record.integer(&col("CurrentLoseStreak")),
                longest_win_streak: record.integer(&col("LongestWinStreak")),
                total_wins: record.integer(&col("Wins")),
                total_losses: record.integer(&col("Losses")),
                total_draws: record.integer(&col("Draws")),
                wins_by_ko: record.integer(&col("WinsByKO")),
                wins_by_submission: record.integer(&col("WinsBySubmission")),
                wins_by_tko_doctor_stoppage: record.integer(&col("WinsByTKODoctorStoppage")),
                wins_by_decision_unanimous: record.integer(&col("WinsByDecisionUnanimous")),
                wins_by_decision_majority: record.integer(&col("WinsByDecisionMajority")),
                wins_by_decision_split: record.integer(&col("WinsByDecisionSplit")),
                avg_sig_strikes_landed: record.number(&col("AvgSigStrLanded")).map(round2),
                avg_sig_strikes_pct: record.number(&col("AvgSigStrPct")).map(round2),
                avg_submission_attempts: record.number(&col("AvgSubAtt")).map(round2),
                avg_takedowns_landed: record.number(&col("AvgTDLanded")).map(round2),
                avg_takedowns_pct: record.number(&col("AvgTDPct")).map(round2),
            });
        }
    }
    for (idx, row) in rows.iter_mut().enumerate() {
        row.stat_id = idx as i64 + 1;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceTable;

    #[test]
    fn two_rows_per_record_sharing_fight_id() {
        let table = SourceTable::from_rows(
            &[
                "RedFighter",
                "BlueFighter",
                "RedWins",
                "BlueWins",
                "RedAvgSigStrLanded",
                "BlueAvgSigStrLanded",
            ],
            &[
                &["A", "B", "10", "4", "4.266", "3.1"],
                &["C", "D", "2", "", "", "5.006"],
            ],
        );
        let maps = KeyMaps::build(&[], &[]);
        let rows = build_fighter_stats(&table, &maps);
        assert_eq!(rows.len(), 4);

        // Red half first, blue half second, stat_id dense over the whole set.
        assert_eq!(
            rows.iter().map(|r| r.stat_id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert_eq!(
            rows.iter().map(|r| r.fight_id).collect::<Vec<_>>(),
            vec![1, 2, 1, 2]
        );
        assert_eq!(rows[0].fighter_corner, "Red");
        assert_eq!(rows[2].fighter_corner, "Blue");

        assert_eq!(rows[0].total_wins, Some(10));
        assert_eq!(rows[3].total_wins, None);
        // Averages round to 2 decimals.
        assert_eq!(rows[0].avg_sig_strikes_landed, Some(4.27));
        assert_eq!(rows[3].avg_sig_strikes_landed, Some(5.01));
        assert_eq!(rows[1].avg_sig_strikes_landed, None);
    }
}
