use rusqlite::Connection;

use ufc_etl::pipeline::{self, REQUIRED_COLUMNS};
use ufc_etl::source::SourceTable;
use ufc_etl::store;

/// Builds a full-schema source table from sparse (column, value) rows; every
/// unmentioned cell is empty, i.e. missing.
fn table_from(rows: &[&[(&str, &str)]]) -> SourceTable {
    let mut csv_text = REQUIRED_COLUMNS.join(",");
    csv_text.push('\n');
    for row in rows {
        let mut cells = vec![""; REQUIRED_COLUMNS.len()];
        for &(column, value) in *row {
            let idx = REQUIRED_COLUMNS
                .iter()
                .position(|c| *c == column)
                .unwrap_or_else(|| panic!("unknown column {column}"));
            cells[idx] = value;
        }
        csv_text.push_str(&cells.join(","));
        csv_text.push('\n');
    }
    SourceTable::from_csv_reader(csv_text.as_bytes()).expect("csv should parse")
}

fn jones_gane_aspinall() -> SourceTable {
    table_from(&[
        &[
            ("RedFighter", "jon Jones"),
            ("BlueFighter", "Ciryl Gane"),
            ("Date", "2023-01-01"),
            ("Location", "Vegas"),
            ("Gender", "MALE"),
            ("Winner", "Red"),
            ("WeightClass", "Heavyweight"),
            ("FinishRoundTime", "2:04"),
            ("RedOdds", "-270"),
            ("BlueOdds", "220"),
            ("RedWins", "26"),
            ("BlueWins", "11"),
            ("BetterRank", "Red"),
        ],
        &[
            ("RedFighter", "Jon Jones"),
            ("BlueFighter", "Tom Aspinall"),
            ("Date", "2023-06-01"),
            ("Location", "London"),
            ("Gender", "MALE"),
            ("Winner", "Blue"),
            ("WeightClass", "Heavyweight"),
            ("RedWins", "27"),
            ("BlueWins", "14"),
        ],
    ])
}

#[test]
fn two_record_scenario_normalizes_dimensions() {
    let table = jones_gane_aspinall();
    let tables = pipeline::run_transform(&table).expect("transform should succeed");

    let names = tables
        .fighters
        .iter()
        .map(|f| f.fighter_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Ciryl Gane", "Jon Jones", "Tom Aspinall"]);
    assert_eq!(
        tables.fighters.iter().map(|f| f.fighter_id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(tables.events.len(), 2);

    // "jon Jones" and "Jon Jones" resolve to the same fighter.
    let jones_id = tables
        .fighters
        .iter()
        .find(|f| f.fighter_name == "Jon Jones")
        .map(|f| f.fighter_id);
    assert_eq!(tables.fights[0].red_fighter_id, jones_id);
    assert_eq!(tables.fights[1].red_fighter_id, jones_id);
    assert_eq!(tables.fights[0].event_id, Some(1));
    assert_eq!(tables.fights[1].event_id, Some(2));
}

#[test]
fn fact_tables_share_positional_fight_ids() {
    let table = jones_gane_aspinall();
    let tables = pipeline::run_transform(&table).expect("transform should succeed");

    let fight_ids = tables.fights.iter().map(|f| f.fight_id).collect::<Vec<_>>();
    assert_eq!(fight_ids, vec![1, 2]);
    assert_eq!(
        tables.betting_odds.iter().map(|o| o.fight_id).collect::<Vec<_>>(),
        fight_ids
    );
    assert_eq!(
        tables
            .fight_differentials
            .iter()
            .map(|d| d.fight_id)
            .collect::<Vec<_>>(),
        fight_ids
    );

    // Exactly two corner rows per source record, sharing the owning fight id.
    for fight_id in &fight_ids {
        let stat_corners = tables
            .fighter_stats
            .iter()
            .filter(|s| s.fight_id == *fight_id)
            .map(|s| s.fighter_corner.as_str())
            .collect::<Vec<_>>();
        assert_eq!(stat_corners, vec!["Red", "Blue"]);
        let rank_corners = tables
            .fighter_rankings
            .iter()
            .filter(|r| r.fight_id == *fight_id)
            .map(|r| r.corner_color.as_str())
            .collect::<Vec<_>>();
        assert_eq!(rank_corners, vec!["Red", "Blue"]);
    }

    assert_eq!(tables.fights[0].finish_round_time, Some(124));
    assert_eq!(tables.fight_differentials[0].wins_diff, Some(15.0));
    assert_eq!(tables.betting_odds[0].red_odds, Some(-270.0));
}

#[test]
fn missing_column_aborts_before_transform() {
    let headers = REQUIRED_COLUMNS
        .iter()
        .filter(|c| **c != "Winner")
        .copied()
        .collect::<Vec<_>>();
    let table = SourceTable::from_rows(&headers, &[]);
    let err = pipeline::run_transform(&table).unwrap_err();
    assert!(format!("{err:#}").contains("Winner"), "error was: {err:#}");
}

#[test]
fn transform_then_load_round_trips_through_sqlite() {
    let table = jones_gane_aspinall();
    let tables = pipeline::run_transform(&table).expect("transform should succeed");

    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    store::init_schema(&conn).expect("schema bootstrap");
    let summary = store::load_all(&mut conn, table.len(), &tables).expect("load");

    assert_eq!(summary.table_counts.len(), 7);
    for (name, expected) in [
        ("fighters", 3i64),
        ("events", 2),
        ("fights", 2),
        ("fighter_stats_per_fight", 4),
        ("betting_odds", 2),
        ("fighter_rankings", 4),
        ("fight_differentials", 2),
    ] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {name}"), [], |row| row.get(0))
            .expect("count query");
        assert_eq!(count, expected, "row count for {name}");
    }

    // Foreign keys resolve back to the de-duplicated dimension rows.
    let red_name: String = conn
        .query_row(
            "SELECT f.fighter_name
             FROM fights ft JOIN fighters f ON f.fighter_id = ft.red_fighter_id
             WHERE ft.fight_id = 2",
            [],
            |row| row.get(0),
        )
        .expect("join query");
    assert_eq!(red_name, "Jon Jones");

    let better_rank: Option<bool> = conn
        .query_row(
            "SELECT better_rank FROM fighter_rankings
             WHERE fight_id = 1 AND corner_color = 'Blue'",
            [],
            |row| row.get(0),
        )
        .expect("better rank query");
    assert_eq!(better_rank, Some(false));
}
