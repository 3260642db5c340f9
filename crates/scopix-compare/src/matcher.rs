//! Brute-force descriptor matching
//!
//! Exhaustive Hamming-distance matching with cross-checking: a pair is
//! kept only when each descriptor is the other's nearest neighbor.
//! Distance ties resolve to the candidate at the searcher's own index
//! when it is among the tied set, otherwise to the lowest index. This
//! keeps matching deterministic and lets duplicate descriptors survive
//! the cross-check on self-comparison instead of collapsing to one
//! representative.

use crate::descriptor::Descriptor;

/// A cross-checked correspondence between two descriptor sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Index into the first descriptor set
    pub query: usize,
    /// Index into the second descriptor set
    pub train: usize,
    /// Hamming distance in bits
    pub distance: u32,
}

/// Number of differing bits between two descriptors.
pub fn hamming(a: &Descriptor, b: &Descriptor) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x ^ y).count_ones())
        .sum()
}

/// Index and distance of the nearest descriptor in `candidates`.
///
/// `prefer` breaks exact-distance ties: when that index is among the
/// tied candidates it wins, otherwise the lowest tied index does.
fn nearest(desc: &Descriptor, candidates: &[Descriptor], prefer: usize) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (i, cand) in candidates.iter().enumerate() {
        let d = hamming(desc, cand);
        best = match best {
            None => Some((i, d)),
            Some((_, bd)) if d < bd => Some((i, d)),
            Some((bi, bd)) if d == bd && i == prefer && bi != prefer => Some((i, d)),
            other => other,
        };
    }
    best
}

/// Match two descriptor sets with mutual nearest-neighbor filtering.
///
/// Results are sorted by ascending distance, then by query index.
pub fn match_descriptors(query: &[Descriptor], train: &[Descriptor]) -> Vec<Match> {
    if query.is_empty() || train.is_empty() {
        return Vec::new();
    }

    let reverse: Vec<Option<(usize, u32)>> = train
        .iter()
        .enumerate()
        .map(|(ti, d)| nearest(d, query, ti))
        .collect();

    let mut matches = Vec::new();
    for (qi, qd) in query.iter().enumerate() {
        if let Some((ti, dist)) = nearest(qd, train, qi)
            && reverse[ti].map(|(back, _)| back) == Some(qi)
        {
            matches.push(Match {
                query: qi,
                train: ti,
                distance: dist,
            });
        }
    }

    matches.sort_by_key(|m| (m.distance, m.query));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DESCRIPTOR_BYTES;

    fn desc(fill: u8) -> Descriptor {
        [fill; DESCRIPTOR_BYTES]
    }

    #[test]
    fn test_hamming_basics() {
        assert_eq!(hamming(&desc(0), &desc(0)), 0);
        assert_eq!(hamming(&desc(0), &desc(0xFF)), 256);
        assert_eq!(hamming(&desc(0b0000_0001), &desc(0b0000_0011)), 32);
    }

    #[test]
    fn test_self_matching_is_identity() {
        let set = vec![desc(0x00), desc(0x0F), desc(0xF0), desc(0xFF)];
        let matches = match_descriptors(&set, &set);
        assert_eq!(matches.len(), 4);
        for m in &matches {
            assert_eq!(m.query, m.train);
            assert_eq!(m.distance, 0);
        }
    }

    #[test]
    fn test_cross_check_drops_one_sided_pairs() {
        // Both queries are nearest to train 0, but train 0 prefers query 0
        let query = vec![desc(0b0000_0000), desc(0b0000_0001)];
        let train = vec![desc(0b0000_0000)];
        let matches = match_descriptors(&query, &train);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0], Match {
            query: 0,
            train: 0,
            distance: 0
        });
    }

    #[test]
    fn test_sorted_by_distance_then_query() {
        let query = vec![desc(0b0000_0111), desc(0b0000_0001)];
        let train = vec![desc(0b0000_0011), desc(0b1111_1111)];
        let matches = match_descriptors(&query, &train);
        for pair in matches.windows(2) {
            assert!(
                (pair[0].distance, pair[0].query) <= (pair[1].distance, pair[1].query)
            );
        }
    }

    #[test]
    fn test_empty_sets() {
        assert!(match_descriptors(&[], &[desc(0)]).is_empty());
        assert!(match_descriptors(&[desc(0)], &[]).is_empty());
        assert!(match_descriptors(&[], &[]).is_empty());
    }

    #[test]
    fn test_duplicate_descriptors_self_match_in_place() {
        // Periodic content yields byte-identical descriptors; on
        // self-comparison each must still match its own index
        let set = vec![desc(0xAA), desc(0xAA), desc(0x33), desc(0xAA)];
        let matches = match_descriptors(&set, &set);
        assert_eq!(matches.len(), set.len());
        for m in &matches {
            assert_eq!(m.query, m.train);
            assert_eq!(m.distance, 0);
        }
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        // Two identical train descriptors; the lower index wins
        let query = vec![desc(0x55)];
        let train = vec![desc(0x55), desc(0x55)];
        let matches = match_descriptors(&query, &train);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].train, 0);
    }
}
