use crate::core_types::Layout;
use crate::geometry::KeyboardGeometry;
use fastrand::Rng;

/// Anchors in place, moveable characters dealt onto moveable slots by two
/// independent shuffles.
pub fn random_layout(rng: &mut Rng, geom: &KeyboardGeometry) -> Layout {
    let mut chars = geom.moveable_chars.clone();
    let mut slots = geom.moveable_slots.clone();
    rng.shuffle(&mut chars);
    rng.shuffle(&mut slots);

    let anchored = geom.anchors.iter().map(|a| (a.key, a.position));
    Layout::from_pairs(anchored.chain(chars.into_iter().zip(slots)))
}

/// Swaps the slots of two distinct moveable characters. With fewer than
/// two moveable characters on the layout the child equals the parent.
pub fn swap_mutation(rng: &mut Rng, parent: &Layout, geom: &KeyboardGeometry) -> Layout {
    let mut child = parent.clone();

    let present: Vec<char> = geom
        .moveable_chars
        .iter()
        .copied()
        .filter(|&c| parent.get(c).is_some())
        .collect();
    let n = present.len();
    if n < 2 {
        return child;
    }

    let i = rng.usize(0..n);
    let mut j = rng.usize(0..n - 1);
    if j >= i {
        j += 1;
    }

    child.swap(present[i], present[j]);
    child
}
