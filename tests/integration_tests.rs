// Integration tests for Tablemate

use std::collections::HashSet;
use chrono::{TimeZone, Utc};
use tablemate::core::{layout, match_respondents, SeatPlanner};
use tablemate::models::{
    BlockType, Participant, Respondent, SeatOrigin, SeatOverride, SeatPosition, TableLayout,
};
use tablemate::services::apply_overrides;

fn create_respondent(id: &str, q1: bool, q2: bool, q3: bool, q4: bool) -> Respondent {
    Respondent {
        id: id.to_string(),
        name: format!("Guest {}", id),
        q1,
        q2,
        q3,
        q4,
        q5: "Weekend hikes, sourdough baking and old jazz records".to_string(),
        q5_short: None,
    }
}

fn occupant_id(result: &TableLayout, table: usize, position: SeatPosition) -> Option<&str> {
    result.tables[table]
        .seat(position)
        .occupant
        .as_ref()
        .map(|o| o.id.as_str())
}

fn assert_layout_invariants(result: &TableLayout) {
    let mut seen = HashSet::new();
    let mut occupied = 0;

    for (i, table) in result.tables.iter().enumerate() {
        assert_eq!(table.table_no as usize, i + 1, "tables are numbered from 1");
        assert_eq!(table.seats.len(), 4);
        for (seat, position) in table.seats.iter().zip(SeatPosition::ALL) {
            assert_eq!(seat.position, position);
            if let Some(occupant) = &seat.occupant {
                occupied += 1;
                assert!(seen.insert(occupant.id.clone()), "{} seated twice", occupant.id);
                assert_eq!(result.id_to_table.get(&occupant.id), Some(&table.table_no));
            }
        }
        if table.occupants().any(|o| o.block_type == SeatOrigin::Triad) {
            assert!(table.seat(SeatPosition::BottomRight).occupant.is_none());
        }
    }

    assert_eq!(result.id_to_table.len(), occupied);
}

#[test]
fn test_integration_four_cautious_share_one_table() {
    let respondents = vec![
        create_respondent("a", true, true, false, false),
        create_respondent("b", false, false, false, false),
        create_respondent("c", true, true, false, true),
        create_respondent("d", false, false, false, true),
    ];

    let blocks = match_respondents(&respondents);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].ids().collect::<Vec<_>>(), vec!["a", "c"]);
    assert_eq!(blocks[1].ids().collect::<Vec<_>>(), vec!["b", "d"]);

    let result = layout(&respondents);
    assert_eq!(result.tables.len(), 1);
    assert_eq!(result.tables[0].occupied_count(), 4);
    assert_eq!(occupant_id(&result, 0, SeatPosition::BottomLeft), Some("b"));
    assert_layout_invariants(&result);
}

#[test]
fn test_integration_single_respondent_gets_solo_table() {
    let respondents = vec![create_respondent("only", true, false, true, true)];

    assert!(match_respondents(&respondents).is_empty());

    let result = layout(&respondents);
    assert_eq!(result.tables.len(), 1);
    assert_eq!(occupant_id(&result, 0, SeatPosition::TopLeft), Some("only"));
    assert_eq!(result.tables[0].occupied_count(), 1);
    assert_eq!(
        result.tables[0].seat(SeatPosition::TopLeft).occupant.as_ref().unwrap().block_type,
        SeatOrigin::Solo
    );
    assert_layout_invariants(&result);
}

#[test]
fn test_integration_five_respondents_triad_plus_pair() {
    let respondents = vec![
        create_respondent("1", true, true, false, false),
        create_respondent("2", true, true, false, true),
        create_respondent("3", false, false, false, false),
        create_respondent("4", true, false, true, false),
        create_respondent("5", false, true, true, true),
    ];

    let blocks = match_respondents(&respondents);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].block_type, BlockType::Triad);
    assert_eq!(blocks[0].ids().collect::<Vec<_>>(), vec!["1", "2", "3"]);
    assert_eq!(blocks[1].ids().collect::<Vec<_>>(), vec!["4", "5"]);

    let result = layout(&respondents);
    assert_eq!(result.tables.len(), 2);
    assert_eq!(result.tables[0].occupied_count(), 3);
    assert_eq!(occupant_id(&result, 0, SeatPosition::BottomRight), None);
    assert_eq!(result.tables[1].occupied_count(), 2);
    assert_eq!(occupant_id(&result, 1, SeatPosition::BottomLeft), None);
    assert_eq!(occupant_id(&result, 1, SeatPosition::BottomRight), None);
    assert_layout_invariants(&result);
}

#[test]
fn test_integration_empty_input() {
    assert!(match_respondents(&[]).is_empty());

    let result = layout(&[]);
    assert!(result.tables.is_empty());
    assert!(result.id_to_table.is_empty());
}

#[test]
fn test_layout_invariants_across_sizes() {
    for n in 0..50usize {
        let respondents: Vec<Respondent> = (0..n)
            .map(|i| {
                create_respondent(
                    &format!("p{}", i),
                    i % 2 == 0,
                    i % 3 == 0,
                    i % 5 < 2,
                    i % 7 < 3,
                )
            })
            .collect();

        let result = layout(&respondents);

        assert_layout_invariants(&result);
        assert_eq!(result.id_to_table.len(), n, "n = {}", n);
        // at most four seats per table, at least two people per table except a solo table
        assert!(result.tables.len() >= n.div_ceil(4));
        assert!(result.tables.len() <= n / 2 + 1);
    }
}

#[test]
fn test_precomputed_summary_used_on_seats() {
    let mut respondents = vec![
        create_respondent("a", true, true, true, false),
        create_respondent("b", false, false, true, false),
    ];
    respondents[0].q5_short = Some("Hikes & jazz".to_string());

    let result = SeatPlanner::new(12).layout(&respondents);
    let summaries: Vec<&str> = result.tables[0].occupants().map(|o| o.summary.as_str()).collect();

    assert_eq!(summaries, vec!["Hikes & jazz", "Weekend hik…"]);
}

#[test]
fn test_overrides_applied_after_layout() {
    let participants: Vec<Participant> = (1..=6u128)
        .map(|n| Participant {
            id: uuid::Uuid::from_u128(n),
            name: format!("Guest {}", n),
            q1: n % 2 == 0,
            q2: n % 3 == 0,
            q3: n > 2,
            q4: n % 4 == 0,
            q5: "Board games".to_string(),
            q5_short: None,
            absent: n == 6,
            created_at: Utc.timestamp_opt(1_700_000_000 + n as i64, 0).unwrap(),
        })
        .collect();

    let respondents: Vec<Respondent> = participants
        .iter()
        .filter(|p| !p.absent)
        .map(Participant::to_respondent)
        .collect();

    let planner = SeatPlanner::default();
    let base = planner.layout(&respondents);
    assert_eq!(base.id_to_table.len(), 5);

    let overrides = vec![SeatOverride {
        participant_id: uuid::Uuid::from_u128(1),
        table_no: 4,
        position: SeatPosition::TopRight,
        updated_at: Utc::now(),
    }];

    let result = apply_overrides(base, &overrides, &participants, &planner);

    assert_layout_invariants(&result);
    assert_eq!(result.tables.len(), 4);
    assert_eq!(
        result.id_to_table.get(&uuid::Uuid::from_u128(1).to_string()),
        Some(&4)
    );
    assert!(!result.id_to_table.contains_key(&uuid::Uuid::from_u128(6).to_string()));
}
