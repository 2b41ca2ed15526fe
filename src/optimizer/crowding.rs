use rayon::prelude::*;

/// Crowding distance of every member of `front` (indices into
/// `objectives`), aligned with `front`.
///
/// Fronts of one or two members are all infinite. Otherwise, per
/// objective, the two boundary members get an infinite contribution and
/// interior members add the normalized gap between their neighbours. An
/// objective whose values are all equal adds nothing to the interior.
pub fn crowding_distances<const M: usize>(front: &[usize], objectives: &[[f64; M]]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let per_objective: Vec<Vec<f64>> = (0..M)
        .into_par_iter()
        .map(|m| objective_contribution(front, objectives, m))
        .collect();

    // Summed in objective order so the result does not depend on scheduling.
    let mut distances = vec![0.0; n];
    for contribution in &per_objective {
        for (d, c) in distances.iter_mut().zip(contribution) {
            *d += c;
        }
    }
    distances
}

fn objective_contribution<const M: usize>(
    front: &[usize],
    objectives: &[[f64; M]],
    m: usize,
) -> Vec<f64> {
    let n = front.len();
    let value = |k: usize| objectives[front[k]][m];

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

    let mut out = vec![0.0; n];
    out[order[0]] = f64::INFINITY;
    out[order[n - 1]] = f64::INFINITY;

    let range = value(order[n - 1]) - value(order[0]);
    if range > 0.0 {
        for w in order.windows(3) {
            out[w[1]] = (value(w[2]) - value(w[0])) / range;
        }
    }
    out
}
