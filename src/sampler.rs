//! Sampling-without-replacement card fill.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::corpus::Corpus;
use crate::grid::{Card, GridGeometry};

/// Fill a card using the thread-local generator.
pub fn fill(corpus: &Corpus, grid: &GridGeometry) -> Card {
    fill_with(corpus, grid, &mut rand::rng())
}

/// Fill a card from `corpus`, drawing each open cell uniformly from the
/// entries not yet placed. Cells are visited in row-major order; reserved
/// cells stay empty, and once the pool runs dry the remaining cells do too.
///
/// Duplicate corpus lines are collapsed first so no value can land on the
/// card twice.
pub fn fill_with<R: Rng>(corpus: &Corpus, grid: &GridGeometry, rng: &mut R) -> Card {
    let mut seen = HashSet::new();
    let mut pool: Vec<&str> = corpus
        .entries()
        .iter()
        .map(String::as_str)
        .filter(|entry| seen.insert(*entry))
        .collect();

    if pool.len() < grid.open_cells() {
        debug!(
            available = pool.len(),
            needed = grid.open_cells(),
            "corpus smaller than card; some cells stay empty"
        );
    }

    let mut card = Card::blank(grid);
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            if grid.is_reserved(row, col) || pool.is_empty() {
                continue;
            }
            let idx = rng.random_range(0..pool.len());
            card.set(row, col, pool.swap_remove(idx));
        }
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn numbered(n: usize) -> Corpus {
        Corpus::from_entries((1..=n).map(|i| format!("entry {}", i)))
    }

    #[test]
    fn values_are_unique_and_reserved_cell_is_empty() {
        let grid = GridGeometry::default();
        let corpus = numbered(40);
        for seed in 0..50 {
            let card = fill_with(&corpus, &grid, &mut StdRng::seed_from_u64(seed));
            let values: Vec<&str> = card.values().collect();
            let unique: HashSet<&str> = values.iter().copied().collect();
            assert_eq!(values.len(), 24);
            assert_eq!(unique.len(), 24);
            assert_eq!(card.get(2, 2), "");
        }
    }

    #[test]
    fn duplicate_lines_never_repeat_on_a_card() {
        let grid = GridGeometry::default();
        let corpus = Corpus::from_entries(["same", "same", "same", "other"]);
        let card = fill_with(&corpus, &grid, &mut StdRng::seed_from_u64(7));
        let mut values: Vec<&str> = card.values().collect();
        values.sort();
        assert_eq!(values, vec!["other", "same"]);
    }

    #[test]
    fn empty_corpus_gives_blank_card() {
        let grid = GridGeometry::default();
        let card = fill(&Corpus::default(), &grid);
        assert_eq!(card, Card::blank(&grid));
    }

    #[test]
    fn corpus_is_left_untouched() {
        let corpus = numbered(30);
        let before = corpus.clone();
        let _ = fill(&corpus, &GridGeometry::default());
        assert_eq!(corpus, before);
    }

    #[test]
    fn same_seed_same_card() {
        let grid = GridGeometry::default();
        let corpus = numbered(60);
        let a = fill_with(&corpus, &grid, &mut StdRng::seed_from_u64(42));
        let b = fill_with(&corpus, &grid, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn every_reserved_cell_is_skipped() {
        let grid = GridGeometry::new(3, 3, [(0, 0), (2, 2), (1, 1)]).unwrap();
        let card = fill_with(&numbered(20), &grid, &mut StdRng::seed_from_u64(3));
        for &(r, c) in grid.reserved() {
            assert_eq!(card.get(r, c), "");
        }
        assert_eq!(card.values().count(), 6);
    }
}
