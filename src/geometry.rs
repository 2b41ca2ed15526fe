use crate::error::{KeyParetoError, KpResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Three main rows plus the thumb row.
pub const ROW_COUNT: u8 = 4;
pub const MAIN_ROW_COUNT: u8 = 3;
pub const THUMB_ROW: u8 = 3;
pub const COL_COUNT: u8 = 12;

/// Columns `0..=LEFT_HAND_LAST_COL` belong to the left hand, the rest to the right.
pub const LEFT_HAND_LAST_COL: u8 = 5;

/// Finger identifiers. Each index finger covers two adjacent columns,
/// each pinky covers the outer column as well.
pub mod finger {
    pub const LEFT_PINKY: u8 = 1;
    pub const LEFT_RING: u8 = 2;
    pub const LEFT_MIDDLE: u8 = 3;
    pub const LEFT_INDEX: u8 = 4;
    pub const THUMB: u8 = 6;
    pub const RIGHT_INDEX: u8 = 7;
    pub const RIGHT_MIDDLE: u8 = 8;
    pub const RIGHT_RING: u8 = 9;
    pub const RIGHT_PINKY: u8 = 10;

    pub fn is_pinky(f: u8) -> bool {
        f == LEFT_PINKY || f == RIGHT_PINKY
    }

    pub fn is_ring(f: u8) -> bool {
        f == LEFT_RING || f == RIGHT_RING
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8, // 0=Top, 1=Home, 2=Bottom, 3=Thumb
    pub col: u8, // 0..=11
    pub finger: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8, finger: u8) -> Self {
        Self { row, col, finger }
    }

    pub fn hand(&self) -> Hand {
        if self.col <= LEFT_HAND_LAST_COL {
            Hand::Left
        } else {
            Hand::Right
        }
    }

    pub fn is_main_row(&self) -> bool {
        self.row < MAIN_ROW_COUNT
    }

    /// Physical slot identity; the finger is an attribute of the slot.
    pub fn slot(&self) -> (u8, u8) {
        (self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub key: char,
    pub position: Position,
}

/// The fixed 3x12 + thumb board: anchored characters, the slots left for
/// the optimizer, and the characters it distributes over them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardGeometry {
    pub anchors: Vec<Anchor>,
    pub moveable_slots: Vec<Position>,
    pub moveable_chars: Vec<char>,
}

impl KeyboardGeometry {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KpResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            KeyParetoError::Config(format!(
                "Failed to read geometry file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let geometry: KeyboardGeometry = serde_json::from_str(&content)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Standard board: home-row anchors `nrst heai`, `uoy` above the right
    /// hand, space on the thumb, 24 moveable keys around them.
    pub fn standard() -> Self {
        use self::finger::*;

        let anchor = |key: char, row: u8, col: u8, finger: u8| Anchor {
            key,
            position: Position::new(row, col, finger),
        };

        let anchors = vec![
            anchor('n', 1, 1, LEFT_PINKY),
            anchor('r', 1, 2, LEFT_RING),
            anchor('s', 1, 3, LEFT_MIDDLE),
            anchor('t', 1, 4, LEFT_INDEX),
            anchor('h', 1, 7, RIGHT_INDEX),
            anchor('e', 1, 8, RIGHT_MIDDLE),
            anchor('a', 1, 9, RIGHT_RING),
            anchor('i', 1, 10, RIGHT_PINKY),
            anchor('u', 0, 8, RIGHT_MIDDLE),
            anchor('o', 0, 9, RIGHT_RING),
            anchor('y', 0, 10, RIGHT_PINKY),
            anchor(' ', THUMB_ROW, 6, THUMB),
        ];

        let moveable_slots = vec![
            // ROW 0 (Top)
            Position::new(0, 1, LEFT_PINKY),
            Position::new(0, 2, LEFT_RING),
            Position::new(0, 3, LEFT_MIDDLE),
            Position::new(0, 4, LEFT_INDEX),
            Position::new(0, 5, LEFT_INDEX),
            Position::new(0, 6, RIGHT_INDEX),
            Position::new(0, 7, RIGHT_INDEX),
            Position::new(0, 11, RIGHT_PINKY),
            // ROW 1 (Home)
            Position::new(1, 0, LEFT_PINKY),
            Position::new(1, 5, LEFT_INDEX),
            Position::new(1, 6, RIGHT_INDEX),
            Position::new(1, 11, RIGHT_PINKY),
            // ROW 2 (Bottom)
            Position::new(2, 0, LEFT_PINKY),
            Position::new(2, 1, LEFT_PINKY),
            Position::new(2, 2, LEFT_RING),
            Position::new(2, 3, LEFT_MIDDLE),
            Position::new(2, 4, LEFT_INDEX),
            Position::new(2, 5, LEFT_INDEX),
            Position::new(2, 6, RIGHT_INDEX),
            Position::new(2, 7, RIGHT_INDEX),
            Position::new(2, 8, RIGHT_MIDDLE),
            Position::new(2, 9, RIGHT_RING),
            Position::new(2, 10, RIGHT_PINKY),
            Position::new(2, 11, RIGHT_PINKY),
        ];

        let moveable_chars = vec![
            'q', 'l', 'c', 'm', 'k', '\'', 'f', 'ö', '-', 'w', 'p', 'ä', '\\', 'j', 'x', 'z', 'g',
            'v', 'b', 'd', ';', ',', '.', '/',
        ];

        KeyboardGeometry {
            anchors,
            moveable_slots,
            moveable_chars,
        }
    }

    /// Checks the permutation constraint over anchors and moveable slots.
    pub fn validate(&self) -> KpResult<()> {
        if self.moveable_chars.len() != self.moveable_slots.len() {
            return Err(KeyParetoError::Validation(format!(
                "{} moveable characters cannot fill {} moveable slots",
                self.moveable_chars.len(),
                self.moveable_slots.len()
            )));
        }

        let mut seen_chars = HashSet::new();
        let mut seen_slots = HashSet::new();

        let anchored = self.anchors.iter().map(|a| (a.key, a.position));
        for (key, pos) in anchored {
            if !seen_chars.insert(key) {
                return Err(KeyParetoError::Validation(format!(
                    "Character {:?} is anchored twice",
                    key
                )));
            }
            check_position(&pos)?;
            if !seen_slots.insert(pos.slot()) {
                return Err(KeyParetoError::Validation(format!(
                    "Slot (row {}, col {}) is used twice",
                    pos.row, pos.col
                )));
            }
        }

        for &key in &self.moveable_chars {
            if !seen_chars.insert(key) {
                return Err(KeyParetoError::Validation(format!(
                    "Character {:?} is listed twice",
                    key
                )));
            }
        }

        for pos in &self.moveable_slots {
            check_position(pos)?;
            if !seen_slots.insert(pos.slot()) {
                return Err(KeyParetoError::Validation(format!(
                    "Slot (row {}, col {}) is used twice",
                    pos.row, pos.col
                )));
            }
        }

        Ok(())
    }

    pub fn key_count(&self) -> usize {
        self.anchors.len() + self.moveable_chars.len()
    }

    pub fn is_anchor(&self, key: char) -> bool {
        self.anchors.iter().any(|a| a.key == key)
    }

    /// Every slot on the board, anchored ones first.
    pub fn all_slots(&self) -> impl Iterator<Item = Position> + '_ {
        self.anchors
            .iter()
            .map(|a| a.position)
            .chain(self.moveable_slots.iter().copied())
    }

    /// Every character placed on the board, anchored ones first.
    pub fn all_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.anchors
            .iter()
            .map(|a| a.key)
            .chain(self.moveable_chars.iter().copied())
    }

    /// Looks up the slot at a grid coordinate.
    pub fn slot_at(&self, row: u8, col: u8) -> Option<Position> {
        self.all_slots().find(|p| p.row == row && p.col == col)
    }
}

fn check_position(pos: &Position) -> KpResult<()> {
    if pos.row >= ROW_COUNT || pos.col >= COL_COUNT {
        return Err(KeyParetoError::Validation(format!(
            "Slot (row {}, col {}) lies outside the {}x{} grid",
            pos.row, pos.col, ROW_COUNT, COL_COUNT
        )));
    }
    Ok(())
}
