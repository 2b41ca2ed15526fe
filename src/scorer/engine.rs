use super::bigrams::{Bigram, BigramModel};
use super::physics::{analyze_interaction, KeyInteraction};
use super::types::{
    BigramBreakdown, BigramHit, CostVector, MetricBreakdown, MetricTally, ScoreDetails,
};
use crate::core_types::Layout;
use crate::error::{KeyParetoError, KpResult};
use crate::geometry::{finger, Position};

/// Classifies every bigram whose characters are both mapped, in table order.
fn for_each_interaction<F>(layout: &Layout, model: &BigramModel, mut visit: F)
where
    F: FnMut(&Bigram, &Position, &KeyInteraction),
{
    for b in model.bigrams() {
        let (Some(p1), Some(p2)) = (layout.get(b.first), layout.get(b.second)) else {
            continue;
        };
        let hit = analyze_interaction(&p1, &p2, b.first == b.second);
        visit(b, &p1, &hit);
    }
}

/// Accumulates weighted bigram counts per metric. Bigrams touching a
/// character the layout does not map are skipped.
pub fn tally(layout: &Layout, model: &BigramModel) -> MetricTally {
    let mut t = MetricTally::default();

    for_each_interaction(layout, model, |b, p1, hit| {
        let weight = b.count as f64;

        if hit.is_sfb {
            t.sfb += weight;
            if finger::is_pinky(p1.finger) {
                t.pinky_sfb += weight;
            }
            if finger::is_ring(p1.finger) {
                t.ring_sfb += weight;
            }
            return;
        }

        if hit.is_scissor {
            t.scissors += weight;
        }
        if hit.is_wide_scissor {
            t.wide_scissors += weight;
        }
        if hit.lateral_weight > 0.0 {
            t.lat_stretch += weight * hit.lateral_weight;
        }
    });

    t
}

/// Lists the `top` worst bigrams of each metric with their percentage of
/// the corpus length. Classification matches `tally`.
pub fn breakdown(layout: &Layout, model: &BigramModel, top: usize) -> KpResult<BigramBreakdown> {
    ensure_non_empty(model)?;
    let total = model.total_length() as f64;

    let mut sfb = Vec::new();
    let mut scissors = Vec::new();
    let mut lat_stretch = Vec::new();

    for_each_interaction(layout, model, |b, _, hit| {
        let charge = |multiplier: f64| BigramHit {
            bigram: [b.first, b.second].iter().collect(),
            count: b.count,
            multiplier,
            percentage: (b.count as f64 * multiplier * 100.0) / total,
        };

        if hit.is_sfb {
            sfb.push(charge(1.0));
            return;
        }
        if hit.is_scissor {
            scissors.push(charge(1.0));
        }
        if hit.lateral_weight > 0.0 {
            lat_stretch.push(charge(hit.lateral_weight));
        }
    });

    Ok(BigramBreakdown {
        sfb: worst_of(sfb, top),
        skip_bigrams: worst_of(scissors.clone(), top),
        scissors: worst_of(scissors, top),
        lat_stretch: worst_of(lat_stretch, top),
    })
}

fn worst_of(mut hits: Vec<BigramHit>, top: usize) -> MetricBreakdown {
    let total = hits.iter().map(|h| h.percentage).sum();
    hits.sort_by(|a, b| {
        b.percentage
            .total_cmp(&a.percentage)
            .then_with(|| a.bigram.cmp(&b.bigram))
    });
    hits.truncate(top);
    MetricBreakdown { total, worst: hits }
}

/// Converts raw sums to percentages. `total_length` must be non-zero.
pub(crate) fn to_costs(t: &MetricTally, total_length: u64) -> CostVector {
    let total = total_length as f64;
    let scissors = (t.scissors * 100.0) / total;
    CostVector {
        sfb: (t.sfb * 100.0) / total,
        scissors,
        lat_stretch: (t.lat_stretch * 100.0) / total,
        skip_bigrams: scissors,
    }
}

pub(crate) fn to_details(t: &MetricTally, total_length: u64) -> ScoreDetails {
    let total = total_length as f64;
    ScoreDetails {
        costs: to_costs(t, total_length),
        wide_scissors: (t.wide_scissors * 100.0) / total,
        pinky_sfb: (t.pinky_sfb * 100.0) / total,
        ring_sfb: (t.ring_sfb * 100.0) / total,
        total_length,
    }
}

fn ensure_non_empty(model: &BigramModel) -> KpResult<()> {
    if model.is_empty() {
        return Err(KeyParetoError::EmptyCorpus(model.name().to_string()));
    }
    Ok(())
}

/// Cost vector of `layout` for one language.
pub fn evaluate(layout: &Layout, model: &BigramModel) -> KpResult<CostVector> {
    ensure_non_empty(model)?;
    Ok(to_costs(&tally(layout, model), model.total_length()))
}

/// Cost vector plus diagnostic rates, for reporting.
pub fn evaluate_details(layout: &Layout, model: &BigramModel) -> KpResult<ScoreDetails> {
    ensure_non_empty(model)?;
    Ok(to_details(&tally(layout, model), model.total_length()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{finger::*, Position};

    fn pair_layout(pa: Position, pb: Position) -> Layout {
        Layout::from_pairs([
            ('a', pa),
            ('b', pb),
            (' ', Position::new(3, 6, THUMB)),
        ])
    }

    #[test]
    fn test_worked_example_sfb() {
        let model = BigramModel::from_words("en", [("ab", 1)]).unwrap();
        let layout = pair_layout(
            Position::new(0, 4, LEFT_INDEX),
            Position::new(2, 5, LEFT_INDEX),
        );

        let costs = evaluate(&layout, &model).unwrap();
        assert!((costs.sfb - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(costs.scissors, 0.0);
        assert_eq!(costs.lat_stretch, 0.0);
        assert_eq!(costs.skip_bigrams, 0.0);
    }

    #[test]
    fn test_unmapped_chars_are_ignored() {
        let model = BigramModel::from_words("en", [("ab", 1)]).unwrap();
        let layout = Layout::from_pairs([('a', Position::new(0, 4, LEFT_INDEX))]);

        let costs = evaluate(&layout, &model).unwrap();
        assert_eq!(costs, CostVector::default());
    }

    #[test]
    fn test_empty_model_fails_fast() {
        let model = BigramModel::from_words("empty", std::iter::empty()).unwrap();
        let layout = Layout::new();
        assert!(matches!(
            evaluate(&layout, &model),
            Err(KeyParetoError::EmptyCorpus(_))
        ));
    }

    #[test]
    fn test_skip_bigrams_mirror_scissors() {
        let model = BigramModel::from_words("en", [("ab", 3), ("ba", 1)]).unwrap();
        // Ring top, middle bottom: adjacent columns two rows apart.
        let layout = pair_layout(
            Position::new(0, 2, LEFT_RING),
            Position::new(2, 3, LEFT_MIDDLE),
        );

        let costs = evaluate(&layout, &model).unwrap();
        assert!(costs.scissors > 0.0);
        assert_eq!(costs.scissors, costs.skip_bigrams);
    }

    #[test]
    fn test_half_lateral_weight() {
        let model = BigramModel::from_words("en", [("ab", 2)]).unwrap();
        let layout = pair_layout(
            Position::new(1, 6, RIGHT_INDEX),
            Position::new(1, 9, RIGHT_RING),
        );

        let costs = evaluate(&layout, &model).unwrap();
        // "ab" weighs 2, half of it counts; total length is 3 * 2.
        assert!((costs.lat_stretch - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_pinky_diagnostic() {
        let model = BigramModel::from_words("en", [("ab", 1)]).unwrap();
        let layout = pair_layout(
            Position::new(0, 1, LEFT_PINKY),
            Position::new(2, 0, LEFT_PINKY),
        );

        let details = evaluate_details(&layout, &model).unwrap();
        assert_eq!(details.pinky_sfb, details.costs.sfb);
        assert_eq!(details.ring_sfb, 0.0);
        assert_eq!(details.total_length, 3);
    }

    #[test]
    fn test_breakdown_orders_and_truncates() {
        // 'a' and 'b' share a finger; 'c' sits two rows below 'a' one
        // column over.
        let layout = Layout::from_pairs([
            ('a', Position::new(0, 2, LEFT_RING)),
            ('b', Position::new(1, 2, LEFT_RING)),
            ('c', Position::new(2, 3, LEFT_MIDDLE)),
            (' ', Position::new(3, 6, THUMB)),
        ]);
        let model =
            BigramModel::from_words("en", [("ab", 5), ("ba", 2), ("ac", 3), ("ca", 1)]).unwrap();

        let report = breakdown(&layout, &model, 1).unwrap();
        let total = model.total_length() as f64;

        assert_eq!(report.sfb.worst.len(), 1);
        assert_eq!(report.sfb.worst[0].bigram, "ab");
        assert!((report.sfb.total - 700.0 / total).abs() < 1e-9);

        assert_eq!(report.scissors.worst[0].bigram, "ac");
        assert_eq!(report.scissors, report.skip_bigrams);

        let costs = evaluate(&layout, &model).unwrap();
        assert!((report.sfb.total - costs.sfb).abs() < 1e-9);
        assert!((report.scissors.total - costs.scissors).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_charges_half_stretches() {
        let model = BigramModel::from_words("en", [("ab", 2)]).unwrap();
        let layout = pair_layout(
            Position::new(1, 6, RIGHT_INDEX),
            Position::new(1, 9, RIGHT_RING),
        );

        let report = breakdown(&layout, &model, 10).unwrap();
        let hit = &report.lat_stretch.worst[0];
        assert_eq!(hit.bigram, "ab");
        assert_eq!(hit.count, 2);
        assert_eq!(hit.multiplier, 0.5);
        assert!((hit.percentage - 100.0 / 6.0).abs() < 1e-9);
        assert!(report.sfb.worst.is_empty());
    }
}
