use anyhow::{Context, Result};

use crate::betting_odds::{BettingOdds, build_betting_odds};
use crate::differentials::{FightDifferential, compute_differentials};
use crate::dimensions::{Event, Fighter, extract_events, extract_fighters};
use crate::fighter_stats::{FighterStat, build_fighter_stats};
use crate::fights::{Fight, build_fights};
use crate::keymap::KeyMaps;
use crate::rankings::{FighterRanking, build_fighter_rankings};
use crate::source::SourceTable;

/// Every source column the transform reads. A file missing any of these is
/// rejected before anything is computed or loaded.
pub const REQUIRED_COLUMNS: &[&str] = &[
    // Dimensions
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
    // Fights
    "TitleBout",
    "NumberOfRounds",
    "Winner",
    "WeightClass",
    "Finish",
    "FinishDetails",
    "FinishRound",
    "FinishRoundTime",
    "TotalFightTimeSecs",
    // Per-corner stats
    "RedWeightLbs",
    "BlueWeightLbs",
    "RedAge",
    "BlueAge",
    "RedCurrentWinStreak",
    "BlueCurrentWinStreak",
    "RedCurrentLoseStreak",
    "BlueCurrentLoseStreak",
    "RedLongestWinStreak",
    "BlueLongestWinStreak",
    "RedWins",
    "BlueWins",
    "RedLosses",
    "BlueLosses",
    "RedDraws",
    "BlueDraws",
    "RedWinsByKO",
    "BlueWinsByKO",
    "RedWinsBySubmission",
    "BlueWinsBySubmission",
    "RedWinsByTKODoctorStoppage",
    "BlueWinsByTKODoctorStoppage",
    "RedWinsByDecisionUnanimous",
    "BlueWinsByDecisionUnanimous",
    "RedWinsByDecisionMajority",
    "BlueWinsByDecisionMajority",
    "RedWinsByDecisionSplit",
    "BlueWinsByDecisionSplit",
    "RedAvgSigStrLanded",
    "BlueAvgSigStrLanded",
    "RedAvgSigStrPct",
    "BlueAvgSigStrPct",
    "RedAvgSubAtt",
    "BlueAvgSubAtt",
    "RedAvgTDLanded",
    "BlueAvgTDLanded",
    "RedAvgTDPct",
    "BlueAvgTDPct",
    // Betting odds
    "RedOdds",
    "RedExpectedValue",
    "RedDecOdds",
    "RSubOdds",
    "RKOOdds",
    "BlueOdds",
    "BlueExpectedValue",
    "BlueDecOdds",
    "BSubOdds",
    "BKOOdds",
    // Rankings
    "RMatchWCRank",
    "BMatchWCRank",
    "RWFlyweightRank",
    "BWFlyweightRank",
    "RWFeatherweightRank",
    "BWFeatherweightRank",
    "RWStrawweightRank",
    "BWStrawweightRank",
    "RWBantamweightRank",
    "BWBantamweightRank",
    "RHeavyweightRank",
    "BHeavyweightRank",
    "RLightHeavyweightRank",
    "BLightHeavyweightRank",
    "RMiddleweightRank",
    "BMiddleweightRank",
    "RWelterweightRank",
    "BWelterweightRank",
    "RLightweightRank",
    "BLightweightRank",
    "RFeatherweightRank",
    "BFeatherweightRank",
    "RBantamweightRank",
    "BBantamweightRank",
    "RFlyweightRank",
    "BFlyweightRank",
    "RPFPRank",
    "BPFPRank",
    "BetterRank",
    // Differentials only
    "RedTotalRoundsFought",
    "BlueTotalRoundsFought",
    "RedTotalTitleBouts",
    "BlueTotalTitleBouts",
];

/// All seven output tables, fully materialized before any load begins.
#[derive(Debug)]
pub struct EtlTables {
    pub fighters: Vec<Fighter>,
    pub events: Vec<Event>,
    pub fights: Vec<Fight>,
    pub fighter_stats: Vec<FighterStat>,
    pub betting_odds: Vec<BettingOdds>,
    pub fighter_rankings: Vec<FighterRanking>,
    pub fight_differentials: Vec<FightDifferential>,
}

/// Runs the whole reshape: schema check, dimension extraction, key maps,
/// then the fact builders. The four fact builders and the differential
/// calculator only read the source table and the key maps, so they fan out
/// across threads.
pub fn run_transform(table: &SourceTable) -> Result<EtlTables> {
    table
        .require_columns(REQUIRED_COLUMNS)
        .context("validate source schema")?;

    let fighters = extract_fighters(table);
    let events = extract_events(table);
    let maps = KeyMaps::build(&fighters, &events);

    let ((fights, fighter_stats), (betting_odds, (fighter_rankings, fight_differentials))) =
        rayon::join(
            || {
                rayon::join(
                    || build_fights(table, &maps),
                    || build_fighter_stats(table, &maps),
                )
            },
            || {
                rayon::join(
                    || build_betting_odds(table),
                    || {
                        rayon::join(
                            || build_fighter_rankings(table, &maps),
                            || compute_differentials(table),
                        )
                    },
                )
            },
        );

    Ok(EtlTables {
        fighters,
        events,
        fights,
        fighter_stats,
        betting_odds,
        fighter_rankings,
        fight_differentials,
    })
}
