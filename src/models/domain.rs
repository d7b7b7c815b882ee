use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validated survey answer record, the unit the matching core works on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    pub id: String,
    pub name: String,
    pub q1: bool,
    pub q2: bool,
    /// `false` marks someone who prefers a conversation partner like themselves
    pub q3: bool,
    /// `true` = listener, `false` = talker
    pub q4: bool,
    #[serde(default)]
    pub q5: String,
    #[serde(rename = "q5Short", default)]
    pub q5_short: Option<String>,
}

/// Kind of a matched block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Pair,
    Triad,
}

/// A matched seating unit of two or three respondents, in seating order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    pub block_type: BlockType,
    pub members: Vec<&'a Respondent>,
}

impl<'a> Block<'a> {
    pub(crate) fn from_members(members: Vec<&'a Respondent>) -> Self {
        let block_type = if members.len() == 3 {
            BlockType::Triad
        } else {
            BlockType::Pair
        };
        Self { block_type, members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|r| r.id.as_str())
    }
}

/// Fixed seat positions of a four-seat table, in fill order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SeatPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SeatPosition {
    pub const ALL: [SeatPosition; 4] = [
        SeatPosition::TopLeft,
        SeatPosition::TopRight,
        SeatPosition::BottomLeft,
        SeatPosition::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            SeatPosition::TopLeft => 0,
            SeatPosition::TopRight => 1,
            SeatPosition::BottomLeft => 2,
            SeatPosition::BottomRight => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeatPosition::TopLeft => "topLeft",
            SeatPosition::TopRight => "topRight",
            SeatPosition::BottomLeft => "bottomLeft",
            SeatPosition::BottomRight => "bottomRight",
        }
    }
}

impl std::str::FromStr for SeatPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeatPosition::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown seat position: {}", s))
    }
}

/// How an occupant came to sit in a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatOrigin {
    Pair,
    Triad,
    Solo,
    Manual,
}

impl From<BlockType> for SeatOrigin {
    fn from(value: BlockType) -> Self {
        match value {
            BlockType::Pair => SeatOrigin::Pair,
            BlockType::Triad => SeatOrigin::Triad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupant {
    pub id: String,
    pub name: String,
    pub summary: String,
    #[serde(rename = "blockType")]
    pub block_type: SeatOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub position: SeatPosition,
    pub occupant: Option<Occupant>,
}

/// Four-seat table; `seats` is always indexed by `SeatPosition::index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    #[serde(rename = "tableNo")]
    pub table_no: u32,
    pub seats: [Seat; 4],
}

impl Table {
    pub fn empty(table_no: u32) -> Self {
        Self {
            table_no,
            seats: SeatPosition::ALL.map(|position| Seat {
                position,
                occupant: None,
            }),
        }
    }

    pub fn seat(&self, position: SeatPosition) -> &Seat {
        &self.seats[position.index()]
    }

    pub fn seat_mut(&mut self, position: SeatPosition) -> &mut Seat {
        &mut self.seats[position.index()]
    }

    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> {
        self.seats.iter().filter_map(|s| s.occupant.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupants().count()
    }
}

/// Output of the table layout: tables plus the respondent id -> table number index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    pub tables: Vec<Table>,
    #[serde(rename = "idToTable")]
    pub id_to_table: HashMap<String, u32>,
}

impl TableLayout {
    /// Build a layout from tables, deriving the identity index from occupied seats
    pub fn from_tables(tables: Vec<Table>) -> Self {
        let id_to_table = tables
            .iter()
            .flat_map(|t| t.occupants().map(move |o| (o.id.clone(), t.table_no)))
            .collect();

        Self { tables, id_to_table }
    }

    /// Locate the table and seat a respondent occupies
    pub fn find_seat(&self, id: &str) -> Option<(&Table, SeatPosition)> {
        let table_no = *self.id_to_table.get(id)?;
        let table = self.tables.iter().find(|t| t.table_no == table_no)?;
        table
            .seats
            .iter()
            .find(|s| s.occupant.as_ref().is_some_and(|o| o.id == id))
            .map(|s| (table, s.position))
    }
}

/// Stored participant record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: uuid::Uuid,
    pub name: String,
    pub q1: bool,
    pub q2: bool,
    pub q3: bool,
    pub q4: bool,
    pub q5: String,
    #[serde(rename = "q5Short")]
    pub q5_short: Option<String>,
    pub absent: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Participant {
    pub fn to_respondent(&self) -> Respondent {
        Respondent {
            id: self.id.to_string(),
            name: self.name.clone(),
            q1: self.q1,
            q2: self.q2,
            q3: self.q3,
            q4: self.q4,
            q5: self.q5.clone(),
            q5_short: self.q5_short.clone(),
        }
    }
}

/// Participant fields accepted on submission
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: String,
    pub q1: bool,
    pub q2: bool,
    pub q3: bool,
    pub q4: bool,
    pub q5: String,
    pub q5_short: Option<String>,
}

/// Manual seat assignment set by an admin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatOverride {
    #[serde(rename = "participantId")]
    pub participant_id: uuid::Uuid,
    #[serde(rename = "tableNo")]
    pub table_no: u32,
    pub position: SeatPosition,
    #[serde(rename = "updatedAt")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Participants and overrides read together in one consistent view
#[derive(Debug, Clone, Default)]
pub struct SeatingSnapshot {
    pub participants: Vec<Participant>,
    pub overrides: Vec<SeatOverride>,
}

impl SeatingSnapshot {
    /// Attending participants as matching input, in registration order
    pub fn respondents(&self) -> Vec<Respondent> {
        self.participants
            .iter()
            .filter(|p| !p.absent)
            .map(Participant::to_respondent)
            .collect()
    }
}
