use crate::core_types::Layout;
use crate::error::KpResult;
use crate::geometry::KeyboardGeometry;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum KnownLayout {
    Baseline,
    Qwerty,
}

impl KnownLayout {
    /// Main 3x12 block, `·` where the board has no key.
    pub fn rows(&self) -> [&'static str; 3] {
        match self {
            // Home-row anchors with the moveable keys in their starting slots.
            Self::Baseline => ["·qlcmk'fuoyö", "-nrstwpheaiä", "\\jxzgvbd;,./"],

            // Row-stagger letters in columns 1-10, Finnish extras on the edges.
            Self::Qwerty => ["·qwertyuiopö", "-asdfghjkl;ä", "\\zxcvbnm,./'"],
        }
    }

    pub fn to_layout(&self, geom: &KeyboardGeometry) -> KpResult<Layout> {
        Layout::from_grid(&self.rows(), geom)
    }
}

pub fn get_all_layouts(geom: &KeyboardGeometry) -> KpResult<Vec<(KnownLayout, Layout)>> {
    KnownLayout::iter()
        .map(|k| Ok((k, k.to_layout(geom)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_baseline_is_a_valid_genome() {
        let geom = KeyboardGeometry::standard();
        let layout = KnownLayout::Baseline.to_layout(&geom).unwrap();
        assert!(layout.is_valid_for(&geom));
    }

    #[test]
    fn test_qwerty_covers_every_slot() {
        let geom = KeyboardGeometry::standard();
        let layout = KnownLayout::Qwerty.to_layout(&geom).unwrap();
        assert_eq!(layout.len(), geom.key_count());
        // Qwerty moves the anchors, so it is a reference, not a genome.
        assert!(!layout.respects_anchors(&geom));
    }

    #[test]
    fn test_names_parse() {
        assert_eq!(KnownLayout::from_str("qwerty").unwrap(), KnownLayout::Qwerty);
        assert_eq!(KnownLayout::Baseline.to_string(), "baseline");
        assert_eq!(get_all_layouts(&KeyboardGeometry::standard()).unwrap().len(), 2);
    }
}
