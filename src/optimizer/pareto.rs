use rayon::prelude::*;

/// `a` dominates `b` if it is no worse on every objective and strictly
/// better on at least one. All objectives are minimized.
#[inline]
pub fn dominates<const M: usize>(a: &[f64; M], b: &[f64; M]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Per-generation bookkeeping for one population member, keyed by its index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DominationEntry {
    /// How many members dominate this one.
    pub domination_count: usize,
    /// Indices of the members this one dominates.
    pub dominated: Vec<usize>,
}

/// Pairwise domination over the whole population. Each row of the
/// comparison matrix is owned by one task, so no shared counters are needed.
pub fn domination_table<const M: usize>(objectives: &[[f64; M]]) -> Vec<DominationEntry> {
    objectives
        .par_iter()
        .enumerate()
        .map(|(i, oi)| {
            let mut entry = DominationEntry::default();
            for (j, oj) in objectives.iter().enumerate() {
                if i == j {
                    continue;
                }
                if dominates(oi, oj) {
                    entry.dominated.push(j);
                } else if dominates(oj, oi) {
                    entry.domination_count += 1;
                }
            }
            entry
        })
        .collect()
}

/// NSGA-II fast non-dominated sort. Returns fronts of population indices in
/// ascending rank; front 0 is non-dominated. Every index lands in exactly
/// one front.
pub fn fast_non_dominated_sort<const M: usize>(objectives: &[[f64; M]]) -> Vec<Vec<usize>> {
    let mut table = domination_table(objectives);

    let mut current: Vec<usize> = table
        .iter()
        .enumerate()
        .filter(|(_, e)| e.domination_count == 0)
        .map(|(i, _)| i)
        .collect();

    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            let dominated = std::mem::take(&mut table[i].dominated);
            for j in dominated {
                table[j].domination_count -= 1;
                if table[j].domination_count == 0 {
                    next.push(j);
                }
            }
        }
        fronts.push(current);
        current = next;
    }

    fronts
}

/// Rank (front index) of every member, aligned with `objectives`.
pub fn ranks<const M: usize>(objectives: &[[f64; M]]) -> Vec<usize> {
    let mut out = vec![0; objectives.len()];
    for (rank, front) in fast_non_dominated_sort(objectives).iter().enumerate() {
        for &i in front {
            out[i] = rank;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominates() {
        assert!(dominates(&[1.0, 2.0], &[1.0, 3.0]));
        assert!(!dominates(&[1.0, 2.0], &[1.0, 2.0]));
        assert!(!dominates(&[0.0, 4.0], &[1.0, 3.0]));
    }

    #[test]
    fn test_three_fronts() {
        let objs = [
            [3.0, 3.0], // 0: rank 2
            [1.0, 2.0], // 1: rank 0
            [2.0, 1.0], // 2: rank 0
            [2.0, 2.0], // 3: rank 1
            [1.0, 2.0], // 4: duplicate of 1, rank 0
        ];
        let fronts = fast_non_dominated_sort(&objs);

        assert_eq!(fronts.len(), 3);
        let mut f0 = fronts[0].clone();
        f0.sort();
        assert_eq!(f0, vec![1, 2, 4]);
        assert_eq!(fronts[1], vec![3]);
        assert_eq!(fronts[2], vec![0]);
        assert_eq!(ranks(&objs), vec![2, 0, 0, 1, 0]);
    }

    #[test]
    fn test_empty_population() {
        let objs: [[f64; 2]; 0] = [];
        assert!(fast_non_dominated_sort(&objs).is_empty());
    }
}
