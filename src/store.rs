use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};

use crate::betting_odds::BettingOdds;
use crate::differentials::FightDifferential;
use crate::dimensions::{Event, Fighter};
use crate::fighter_stats::FighterStat;
use crate::fights::Fight;
use crate::pipeline::EtlTables;
use crate::rankings::FighterRanking;

const DB_PATH_ENV: &str = "UFC_ETL_DB";
const DEFAULT_DB_FILE: &str = "ufc_relational.sqlite";

/// Destination store parameters, resolved once and passed explicitly to the
/// loader. Connection details never live in module state or source literals.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn resolve(cli_path: Option<PathBuf>) -> Self {
        let db_path = cli_path
            .or_else(|| {
                std::env::var(DB_PATH_ENV)
                    .ok()
                    .map(|raw| raw.trim().to_string())
                    .filter(|raw| !raw.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
        Self { db_path }
    }
}

pub fn open_store(config: &StoreConfig) -> Result<Connection> {
    open_at(&config.db_path)
}

fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).ok();
    }
    Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))
}

/// Bootstraps the destination relations. Kept apart from the load calls,
/// which only ever append.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        CREATE TABLE IF NOT EXISTS fighters (
            fighter_id INTEGER PRIMARY KEY,
            fighter_name TEXT NOT NULL,
            height_cms REAL NULL,
            reach_cms REAL NULL,
            stance TEXT NULL,
            gender TEXT NULL
        );
        CREATE TABLE IF NOT EXISTS events (
            event_id INTEGER PRIMARY KEY,
            event_date TEXT NULL,
            event_location TEXT NULL
        );
        CREATE TABLE IF NOT EXISTS fights (
            fight_id INTEGER PRIMARY KEY,
            red_fighter_id INTEGER NULL,
            blue_fighter_id INTEGER NULL,
            event_id INTEGER NULL,
            title_bout INTEGER NULL,
            num_rounds INTEGER NULL,
            winner_color TEXT NULL,
            weight_class TEXT NULL,
            finish_method TEXT NULL,
            finish_details TEXT NULL,
            finish_round INTEGER NULL,
            finish_round_time INTEGER NULL,
            total_fight_time_seconds INTEGER NULL
        );
        CREATE INDEX IF NOT EXISTS idx_fights_event ON fights(event_id);
        CREATE TABLE IF NOT EXISTS fighter_stats_per_fight (
            stat_id INTEGER PRIMARY KEY,
            fight_id INTEGER NOT NULL,
            fighter_id INTEGER NULL,
            fighter_corner TEXT NOT NULL,
            weight_lbs REAL NULL,
            age INTEGER NULL,
            current_win_streak INTEGER NULL,
            current_lose_streak INTEGER NULL,
            longest_win_streak INTEGER NULL,
            total_wins INTEGER NULL,
            total_losses INTEGER NULL,
            total_draws INTEGER NULL,
            wins_by_ko INTEGER NULL,
            wins_by_submission INTEGER NULL,
            wins_by_tko_doctor_stoppage INTEGER NULL,
            wins_by_decision_unanimous INTEGER NULL,
            wins_by_decision_majority INTEGER NULL,
            wins_by_decision_split INTEGER NULL,
            avg_sig_strikes_landed REAL NULL,
            avg_sig_strikes_pct REAL NULL,
            avg_submission_attempts REAL NULL,
            avg_takedowns_landed REAL NULL,
            avg_takedowns_pct REAL NULL
        );
        CREATE INDEX IF NOT EXISTS idx_stats_fight ON fighter_stats_per_fight(fight_id);
        CREATE TABLE IF NOT EXISTS betting_odds (
            odds_id INTEGER PRIMARY KEY,
            fight_id INTEGER NOT NULL,
            red_odds REAL NULL,
            red_expected_value REAL NULL,
            red_dec_odds REAL NULL,
            red_submission_odds REAL NULL,
            red_ko_odds REAL NULL,
            blue_odds REAL NULL,
            blue_expected_value REAL NULL,
            blue_dec_odds REAL NULL,
            blue_submission_odds REAL NULL,
            blue_ko_odds REAL NULL
        );
        CREATE TABLE IF NOT EXISTS fighter_rankings (
            ranking_id INTEGER PRIMARY KEY,
            fight_id INTEGER NOT NULL,
            fighter_id INTEGER NULL,
            corner_color TEXT NOT NULL,
            weight_class_rank INTEGER NULL,
            w_flyweight_rank INTEGER NULL,
            w_featherweight_rank INTEGER NULL,
            w_strawweight_rank INTEGER NULL,
            w_bantamweight_rank INTEGER NULL,
            heavyweight_rank INTEGER NULL,
            light_heavyweight_rank INTEGER NULL,
            middleweight_rank INTEGER NULL,
            welterweight_rank INTEGER NULL,
            lightweight_rank INTEGER NULL,
            featherweight_rank INTEGER NULL,
            bantamweight_rank INTEGER NULL,
            flyweight_rank INTEGER NULL,
            pfp_rank INTEGER NULL,
            better_rank INTEGER NULL
        );
        CREATE INDEX IF NOT EXISTS idx_rankings_fight ON fighter_rankings(fight_id);
        CREATE TABLE IF NOT EXISTS fight_differentials (
            differential_id INTEGER PRIMARY KEY,
            fight_id INTEGER NOT NULL,
            lose_streak_diff REAL NULL,
            win_streak_diff REAL NULL,
            longest_win_streak_diff REAL NULL,
            wins_diff REAL NULL,
            losses_diff REAL NULL,
            draws_diff REAL NULL,
            total_rounds_diff REAL NULL,
            total_title_bouts_diff REAL NULL,
            ko_diff REAL NULL,
            submission_diff REAL NULL,
            height_cms_diff REAL NULL,
            reach_cms_diff REAL NULL,
            weight_lbs_diff REAL NULL,
            age_diff REAL NULL,
            sig_strikes_diff REAL NULL,
            avg_submission_att_diff REAL NULL,
            avg_takedown_landed_diff REAL NULL
        );
        CREATE TABLE IF NOT EXISTS etl_runs (
            run_id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at TEXT NOT NULL,
            finished_at TEXT NULL,
            source_rows INTEGER NOT NULL,
            table_counts_json TEXT NOT NULL
        );
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct LoadSummary {
    pub run_id: i64,
    pub table_counts: Vec<(&'static str, usize)>,
}

/// Appends every produced table, dimensions strictly before the fact tables
/// that reference them. Each table commits independently; a failure aborts
/// the remaining sequence and leaves earlier tables in place.
pub fn load_all(
    conn: &mut Connection,
    source_rows: usize,
    tables: &EtlTables,
) -> Result<LoadSummary> {
    let started_at = Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO etl_runs(started_at, finished_at, source_rows, table_counts_json)
         VALUES (?1, NULL, ?2, '{}')",
        params![started_at, source_rows as i64],
    )
    .context("insert etl run")?;
    let run_id = conn.last_insert_rowid();

    let mut table_counts = Vec::new();
    table_counts.push(("fighters", load_fighters(conn, &tables.fighters)?));
    table_counts.push(("events", load_events(conn, &tables.events)?));
    table_counts.push(("fights", load_fights(conn, &tables.fights)?));
    table_counts.push((
        "fighter_stats_per_fight",
        load_fighter_stats(conn, &tables.fighter_stats)?,
    ));
    table_counts.push(("betting_odds", load_betting_odds(conn, &tables.betting_odds)?));
    table_counts.push((
        "fighter_rankings",
        load_fighter_rankings(conn, &tables.fighter_rankings)?,
    ));
    table_counts.push((
        "fight_differentials",
        load_differentials(conn, &tables.fight_differentials)?,
    ));

    let counts_json = serde_json::to_string(
        &table_counts
            .iter()
            .map(|(name, count)| (*name, *count))
            .collect::<std::collections::BTreeMap<_, _>>(),
    )
    .unwrap_or_else(|_| "{}".to_string());
    conn.execute(
        "UPDATE etl_runs SET finished_at = ?1, table_counts_json = ?2 WHERE run_id = ?3",
        params![Utc::now().to_rfc3339(), counts_json, run_id],
    )
    .context("finalize etl run")?;

    Ok(LoadSummary { run_id, table_counts })
}

fn load_fighters(conn: &mut Connection, rows: &[Fighter]) -> Result<usize> {
    let tx = conn.transaction().context("begin fighters load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fighters
                 (fighter_id, fighter_name, height_cms, reach_cms, stance, gender)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .context("prepare fighters insert")?;
        for row in rows {
            stmt.execute(params![
                row.fighter_id,
                row.fighter_name,
                row.height_cms,
                row.reach_cms,
                row.stance,
                row.gender,
            ])
            .context("insert fighter row")?;
        }
    }
    tx.commit().context("commit fighters load")?;
    Ok(rows.len())
}

fn load_events(conn: &mut Connection, rows: &[Event]) -> Result<usize> {
    let tx = conn.transaction().context("begin events load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO events (event_id, event_date, event_location)
                 VALUES (?1, ?2, ?3)",
            )
            .context("prepare events insert")?;
        for row in rows {
            stmt.execute(params![row.event_id, row.event_date, row.event_location])
                .context("insert event row")?;
        }
    }
    tx.commit().context("commit events load")?;
    Ok(rows.len())
}

fn load_fights(conn: &mut Connection, rows: &[Fight]) -> Result<usize> {
    let tx = conn.transaction().context("begin fights load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fights
                 (fight_id, red_fighter_id, blue_fighter_id, event_id, title_bout,
                  num_rounds, winner_color, weight_class, finish_method, finish_details,
                  finish_round, finish_round_time, total_fight_time_seconds)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )
            .context("prepare fights insert")?;
        for row in rows {
            stmt.execute(params![
                row.fight_id,
                row.red_fighter_id,
                row.blue_fighter_id,
                row.event_id,
                row.title_bout,
                row.num_rounds,
                row.winner_color,
                row.weight_class,
                row.finish_method,
                row.finish_details,
                row.finish_round,
                row.finish_round_time,
                row.total_fight_time_seconds,
            ])
            .context("insert fight row")?;
        }
    }
    tx.commit().context("commit fights load")?;
    Ok(rows.len())
}

fn load_fighter_stats(conn: &mut Connection, rows: &[FighterStat]) -> Result<usize> {
    let tx = conn.transaction().context("begin fighter stats load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fighter_stats_per_fight
                 (stat_id, fight_id, fighter_id, fighter_corner, weight_lbs, age,
                  current_win_streak, current_lose_streak, longest_win_streak,
                  total_wins, total_losses, total_draws, wins_by_ko, wins_by_submission,
                  wins_by_tko_doctor_stoppage, wins_by_decision_unanimous,
                  wins_by_decision_majority, wins_by_decision_split,
                  avg_sig_strikes_landed, avg_sig_strikes_pct, avg_submission_attempts,
                  avg_takedowns_landed, avg_takedowns_pct)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                         ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)",
            )
            .context("prepare fighter stats insert")?;
        for row in rows {
            stmt.execute(params![
                row.stat_id,
                row.fight_id,
                row.fighter_id,
                row.fighter_corner,
                row.weight_lbs,
                row.age,
                row.current_win_streak,
                row.current_lose_streak,
                row.longest_win_streak,
                row.total_wins,
                row.total_losses,
                row.total_draws,
                row.wins_by_ko,
                row.wins_by_submission,
                row.wins_by_tko_doctor_stoppage,
                row.wins_by_decision_unanimous,
                row.wins_by_decision_majority,
                row.wins_by_decision_split,
                row.avg_sig_strikes_landed,
                row.avg_sig_strikes_pct,
                row.avg_submission_attempts,
                row.avg_takedowns_landed,
                row.avg_takedowns_pct,
            ])
            .context("insert fighter stat row")?;
        }
    }
    tx.commit().context("commit fighter stats load")?;
    Ok(rows.len())
}

fn load_betting_odds(conn: &mut Connection, rows: &[BettingOdds]) -> Result<usize> {
    let tx = conn.transaction().context("begin betting odds load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO betting_odds
                 (odds_id, fight_id, red_odds, red_expected_value, red_dec_odds,
                  red_submission_odds, red_ko_odds, blue_odds, blue_expected_value,
                  blue_dec_odds, blue_submission_odds, blue_ko_odds)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )
            .context("prepare betting odds insert")?;
        for row in rows {
            stmt.execute(params![
                row.odds_id,
                row.fight_id,
                row.red_odds,
                row.red_expected_value,
                row.red_dec_odds,
                row.red_submission_odds,
                row.red_ko_odds,
                row.blue_odds,
                row.blue_expected_value,
                row.blue_dec_odds,
                row.blue_submission_odds,
                row.blue_ko_odds,
            ])
            .context("insert betting odds row")?;
        }
    }
    tx.commit().context("commit betting odds load")?;
    Ok(rows.len())
}

fn load_fighter_rankings(conn: &mut Connection, rows: &[FighterRanking]) -> Result<usize> {
    let tx = conn.transaction().context("begin fighter rankings load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fighter_rankings
                 (ranking_id, fight_id, fighter_id, corner_color, weight_class_rank,
                  w_flyweight_rank, w_featherweight_rank, w_strawweight_rank,
                  w_bantamweight_rank, heavyweight_rank, light_heavyweight_rank,
                  middleweight_rank, welterweight_rank, lightweight_rank,
                  featherweight_rank, bantamweight_rank, flyweight_rank, pfp_rank,
                  better_rank)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                         ?15, ?16, ?17, ?18, ?19)",
            )
            .context("prepare fighter rankings insert")?;
        for row in rows {
            stmt.execute(params![
                row.ranking_id,
                row.fight_id,
                row.fighter_id,
                row.corner_color,
                row.weight_class_rank,
                row.w_flyweight_rank,
                row.w_featherweight_rank,
                row.w_strawweight_rank,
                row.w_bantamweight_rank,
                row.heavyweight_rank,
                row.light_heavyweight_rank,
                row.middleweight_rank,
                row.welterweight_rank,
                row.lightweight_rank,
                row.featherweight_rank,
                row.bantamweight_rank,
                row.flyweight_rank,
                row.pfp_rank,
                row.better_rank,
            ])
            .context("insert fighter ranking row")?;
        }
    }
    tx.commit().context("commit fighter rankings load")?;
    Ok(rows.len())
}

fn load_differentials(conn: &mut Connection, rows: &[FightDifferential]) -> Result<usize> {
    let tx = conn.transaction().context("begin differentials load")?;
    {
        let mut stmt = tx
            .prepare(
                "INSERT INTO fight_differentials
                 (differential_id, fight_id, lose_streak_diff, win_streak_diff,
                  longest_win_streak_diff, wins_diff, losses_diff, draws_diff,
                  total_rounds_diff, total_title_bouts_diff, ko_diff, submission_diff,
                  height_cms_diff, reach_cms_diff, weight_lbs_diff, age_diff,
                  sig_strikes_diff, avg_submission_att_diff, avg_takedown_landed_diff)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                         ?15, ?16, ?17, ?18, ?19)",
            )
            .context("prepare differentials insert")?;
        for row in rows {
            stmt.execute(params![
                row.differential_id,
                row.fight_id,
                row.lose_streak_diff,
                row.win_streak_diff,
                row.longest_win_streak_diff,
                row.wins_diff,
                row.losses_diff,
                row.draws_diff,
                row.total_rounds_diff,
                row.total_title_bouts_diff,
                row.ko_diff,
                row.submission_diff,
                row.height_cms_diff,
                row.reach_cms_diff,
                row.weight_lbs_diff,
                row.age_diff,
                row.sig_strikes_diff,
                row.avg_submission_att_diff,
                row.avg_takedown_landed_diff,
            ])
            .context("insert differential row")?;
        }
    }
    tx.commit().context("commit differentials load")?;
    Ok(rows.len())
}
