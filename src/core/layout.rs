use crate::models::{Block, BlockType, Occupant, Respondent, SeatOrigin, SeatPosition, Table, TableLayout};
use crate::core::{
    matcher::match_respondents,
    summary::{truncate_summary, DEFAULT_SUMMARY_CHARS},
};

/// Packs matched blocks onto four-seat tables
///
/// # Packing rules
/// - A triad takes a table alone; bottom-right stays empty
/// - Two consecutive pairs share a table, top row then bottom row
/// - A trailing pair takes the top row of its own table
/// - A lone unmatched respondent gets a solo table at top-left
#[derive(Debug, Clone, Copy)]
pub struct SeatPlanner {
    summary_chars: usize,
}

impl SeatPlanner {
    pub fn new(summary_chars: usize) -> Self {
        Self { summary_chars }
    }

    pub fn summary_chars(&self) -> usize {
        self.summary_chars
    }

    /// Match respondents and lay the resulting blocks out on tables
    ///
    /// # Arguments
    /// * `respondents` - Active respondents only; absentees must already be filtered out
    ///
    /// # Returns
    /// Tables numbered from 1 plus the respondent id -> table number index
    pub fn layout(&self, respondents: &[Respondent]) -> TableLayout {
        let blocks = match_respondents(respondents);

        if blocks.is_empty() {
            // Only a single respondent can fail to produce a block
            return match respondents.first() {
                Some(lone) => {
                    let mut table = Table::empty(1);
                    self.seat(&mut table, SeatPosition::TopLeft, lone, SeatOrigin::Solo);
                    TableLayout::from_tables(vec![table])
                }
                None => TableLayout::default(),
            };
        }

        TableLayout::from_tables(self.pack(&blocks))
    }

    /// Pack blocks onto tables in block order
    pub fn pack(&self, blocks: &[Block<'_>]) -> Vec<Table> {
        let mut tables = Vec::with_capacity(blocks.len() / 2 + 1);
        let mut cursor = 0;

        while cursor < blocks.len() {
            let table_no = tables.len() as u32 + 1;
            let mut table = Table::empty(table_no);
            let block = &blocks[cursor];

            match (block.block_type, blocks.get(cursor + 1)) {
                (BlockType::Triad, _) => {
                    self.seat_block(&mut table, &SeatPosition::ALL[..3], block);
                    cursor += 1;
                }
                (BlockType::Pair, Some(next)) if next.block_type == BlockType::Pair => {
                    self.seat_block(&mut table, &SeatPosition::ALL[..2], block);
                    self.seat_block(&mut table, &SeatPosition::ALL[2..], next);
                    cursor += 2;
                }
                (BlockType::Pair, _) => {
                    self.seat_block(&mut table, &SeatPosition::ALL[..2], block);
                    cursor += 1;
                }
            }

            tables.push(table);
        }

        tables
    }

    fn seat_block(&self, table: &mut Table, positions: &[SeatPosition], block: &Block<'_>) {
        for (&position, member) in positions.iter().zip(&block.members) {
            self.seat(table, position, member, block.block_type.into());
        }
    }

    fn seat(&self, table: &mut Table, position: SeatPosition, respondent: &Respondent, origin: SeatOrigin) {
        table.seat_mut(position).occupant = Some(Occupant {
            id: respondent.id.clone(),
            name: respondent.name.clone(),
            summary: self.summary_for(respondent),
            block_type: origin,
        });
    }

    /// Precomputed short answer if present, otherwise the truncated raw answer
    pub fn summary_for(&self, respondent: &Respondent) -> String {
        match respondent.q5_short.as_deref() {
            Some(short) if !short.trim().is_empty() => short.to_string(),
            _ => truncate_summary(&respondent.q5, self.summary_chars),
        }
    }
}

impl Default for SeatPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_CHARS)
    }
}

/// Lay respondents out with the default summary length
pub fn layout(respondents: &[Respondent]) -> TableLayout {
    SeatPlanner::default().layout(respondents)
}
