use crate::error::{KeyParetoError, KpResult};
use crate::geometry::{KeyboardGeometry, Position, COL_COUNT, MAIN_ROW_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Marks an unused cell in textual grids.
pub const EMPTY_CELL: char = '·';

/// The main 3x12 block, thumb row excluded.
pub type Grid = [[Option<char>; COL_COUNT as usize]; MAIN_ROW_COUNT as usize];

/// A character -> slot assignment.
///
/// Ordered by character so that iteration (and serialization) is stable
/// across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<char, Position>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I: IntoIterator<Item = (char, Position)>>(pairs: I) -> Self {
        Self {
            positions: pairs.into_iter().collect(),
        }
    }

    /// Parses three 12-character rows onto `geometry`. Fingers come from the
    /// geometry's slots; thumb anchors are carried over as-is.
    pub fn from_grid(rows: &[&str], geometry: &KeyboardGeometry) -> KpResult<Self> {
        if rows.len() != MAIN_ROW_COUNT as usize {
            return Err(KeyParetoError::Validation(format!(
                "Expected {} grid rows, got {}",
                MAIN_ROW_COUNT,
                rows.len()
            )));
        }

        let mut layout = Layout::new();
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != COL_COUNT as usize {
                return Err(KeyParetoError::Validation(format!(
                    "Grid row {} has {} cells, expected {}",
                    r,
                    cells.len(),
                    COL_COUNT
                )));
            }
            for (c, &key) in cells.iter().enumerate() {
                if key == EMPTY_CELL {
                    continue;
                }
                let pos = geometry.slot_at(r as u8, c as u8).ok_or_else(|| {
                    KeyParetoError::Validation(format!(
                        "Character {:?} sits on (row {}, col {}), which is not a slot",
                        key, r, c
                    ))
                })?;
                if layout.insert(key, pos).is_some() {
                    return Err(KeyParetoError::Validation(format!(
                        "Character {:?} appears twice in the grid",
                        key
                    )));
                }
            }
        }

        for anchor in geometry.anchors.iter().filter(|a| !a.position.is_main_row()) {
            layout.insert(anchor.key, anchor.position);
        }

        Ok(layout)
    }

    pub fn get(&self, key: char) -> Option<Position> {
        self.positions.get(&key).copied()
    }

    pub fn insert(&mut self, key: char, pos: Position) -> Option<Position> {
        self.positions.insert(key, pos)
    }

    /// Exchanges the slots of two mapped characters. Returns false (and
    /// leaves the layout untouched) if either is missing.
    pub fn swap(&mut self, a: char, b: char) -> bool {
        match (self.get(a), self.get(b)) {
            (Some(pa), Some(pb)) => {
                self.positions.insert(a, pb);
                self.positions.insert(b, pa);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Position)> + '_ {
        self.positions.iter().map(|(&k, &p)| (k, p))
    }

    pub fn grid(&self) -> Grid {
        let mut grid: Grid = [[None; COL_COUNT as usize]; MAIN_ROW_COUNT as usize];
        for (key, pos) in self.iter() {
            if pos.is_main_row() && pos.col < COL_COUNT {
                grid[pos.row as usize][pos.col as usize] = Some(key);
            }
        }
        grid
    }

    /// Row-major concatenation of the main block, empty cells skipped.
    pub fn typing_string(&self) -> String {
        self.grid().iter().flatten().flatten().collect()
    }

    /// True if the layout is a bijection between the geometry's characters
    /// and its slots, with every anchor in place.
    pub fn is_valid_for(&self, geometry: &KeyboardGeometry) -> bool {
        if self.len() != geometry.key_count() {
            return false;
        }
        if !geometry.all_chars().all(|c| self.positions.contains_key(&c)) {
            return false;
        }
        if !self.respects_anchors(geometry) {
            return false;
        }

        let expected: HashSet<Position> = geometry.all_slots().collect();
        let mut used = HashSet::with_capacity(self.len());
        self.positions
            .values()
            .all(|p| expected.contains(p) && used.insert(*p))
    }

    pub fn respects_anchors(&self, geometry: &KeyboardGeometry) -> bool {
        geometry
            .anchors
            .iter()
            .all(|a| self.get(a.key) == Some(a.position))
    }
}
