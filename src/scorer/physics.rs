use crate::geometry::{Hand, Position};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct KeyInteraction {
    pub is_same_hand: bool,

    // Interaction Types
    pub is_repeat: bool,
    pub is_sfb: bool,
    pub is_scissor: bool,
    /// Two rows apart on non-adjacent columns. Reported as a diagnostic only.
    pub is_wide_scissor: bool,
    /// 0.0, 0.5 or 1.0 of the bigram's weight.
    pub lateral_weight: f64,

    // Geometric Details
    pub row_diff: u8,
    pub col_diff: u8,
}

/// Lateral stretch pairs as (column, column, share of weight), both orders count.
const LEFT_LATERAL: [(u8, u8, f64); 2] = [(5, 3, 1.0), (5, 2, 0.5)];
const RIGHT_LATERAL: [(u8, u8, f64); 2] = [(6, 8, 1.0), (6, 9, 0.5)];

/// Classifies the motion between two keys typed in sequence.
///
/// `is_repeat` means the same character twice; repeats are never SFBs.
pub fn analyze_interaction(p1: &Position, p2: &Position, is_repeat: bool) -> KeyInteraction {
    let mut res = KeyInteraction {
        is_repeat,
        row_diff: p1.row.abs_diff(p2.row),
        col_diff: p1.col.abs_diff(p2.col),
        ..Default::default()
    };

    if p1.finger == p2.finger {
        res.is_same_hand = true;
        res.is_sfb = !is_repeat;
        return res;
    }

    if p1.hand() != p2.hand() || !p1.is_main_row() || !p2.is_main_row() {
        return res;
    }
    res.is_same_hand = true;

    if res.row_diff == 2 {
        if res.col_diff == 1 {
            res.is_scissor = true;
        } else {
            res.is_wide_scissor = true;
        }
    }

    let table = match p1.hand() {
        Hand::Left => &LEFT_LATERAL,
        Hand::Right => &RIGHT_LATERAL,
    };
    for &(a, b, share) in table {
        if (p1.col == a && p2.col == b) || (p1.col == b && p2.col == a) {
            res.lateral_weight += share;
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::finger::*;

    #[test]
    fn test_repeat_is_not_sfb() {
        let p = Position::new(1, 4, LEFT_INDEX);
        let res = analyze_interaction(&p, &p, true);
        assert!(res.is_repeat);
        assert!(!res.is_sfb);
    }

    #[test]
    fn test_cross_hand_is_inert() {
        let p1 = Position::new(0, 4, LEFT_INDEX);
        let p2 = Position::new(2, 7, RIGHT_INDEX);
        let res = analyze_interaction(&p1, &p2, false);
        assert_eq!(res, KeyInteraction { row_diff: 2, col_diff: 3, ..Default::default() });
    }

    #[test]
    fn test_scissor_and_lateral_can_coincide() {
        // Left middle top (col 3) -> left index bottom (col 5): wide + full lateral.
        let p1 = Position::new(0, 3, LEFT_MIDDLE);
        let p2 = Position::new(2, 5, LEFT_INDEX);
        let res = analyze_interaction(&p1, &p2, false);
        assert!(res.is_wide_scissor);
        assert!(!res.is_scissor);
        assert_eq!(res.lateral_weight, 1.0);
    }
}
