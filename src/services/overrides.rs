use std::collections::HashMap;
use uuid::Uuid;
use crate::core::SeatPlanner;
use crate::models::{Occupant, Participant, SeatOrigin, SeatOverride, Table, TableLayout};

/// Apply admin seat overrides on top of a computed layout
///
/// Overrides are applied in the given order, so a later override wins a
/// contested seat. The overridden participant is first removed from any
/// seat they already hold; whoever sat in the target seat loses it.
/// Overrides for unknown or absent participants are skipped.
pub fn apply_overrides(
    layout: TableLayout,
    overrides: &[SeatOverride],
    participants: &[Participant],
    planner: &SeatPlanner,
) -> TableLayout {
    if overrides.is_empty() {
        return layout;
    }

    let by_id: HashMap<Uuid, &Participant> = participants.iter().map(|p| (p.id, p)).collect();
    let mut tables = layout.tables;

    for seat_override in overrides {
        let Some(participant) = by_id.get(&seat_override.participant_id).copied() else {
            tracing::warn!("Skipping override for unknown participant {}", seat_override.participant_id);
            continue;
        };
        if participant.absent {
            tracing::warn!("Skipping override for absent participant {}", participant.id);
            continue;
        }
        if seat_override.table_no == 0 {
            tracing::warn!("Skipping override with table 0 for {}", participant.id);
            continue;
        }

        let id = participant.id.to_string();
        vacate(&mut tables, &id);

        while tables.len() < seat_override.table_no as usize {
            tables.push(Table::empty(tables.len() as u32 + 1));
        }

        let respondent = participant.to_respondent();
        let seat = tables[seat_override.table_no as usize - 1].seat_mut(seat_override.position);
        if let Some(displaced) = seat.occupant.take() {
            tracing::info!(
                "Override for {} displaces {} from table {}",
                id,
                displaced.id,
                seat_override.table_no
            );
        }
        seat.occupant = Some(Occupant {
            summary: planner.summary_for(&respondent),
            id: respondent.id,
            name: respondent.name,
            block_type: SeatOrigin::Manual,
        });
    }

    TableLayout::from_tables(tables)
}

fn vacate(tables: &mut [Table], id: &str) {
    for seat in tables.iter_mut().flat_map(|t| t.seats.iter_mut()) {
        if seat.occupant.as_ref().is_some_and(|o| o.id == id) {
            seat.occupant = None;
        }
    }
}
