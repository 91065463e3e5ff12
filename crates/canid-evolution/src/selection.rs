//! Elite selection.
//!
//! Each generation keeps E elites and singles out the fittest of them as
//! the top performer. Elites are held in population-index order and ties go
//! to the lowest index, so selection is deterministic for a given
//! population order.

use canid_core::config::SelectionStrategy;
use canid_core::population::Population;

/// Outcome of selection, as indices into the scored population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// The fittest elite.
    pub top: usize,
    /// The remaining E - 1 elites, in population-index order.
    pub elites: Vec<usize>,
}

/// Trait for elite selection strategies.
pub trait EliteSelector {
    /// Pick `elite_count` elites from a scored population.
    ///
    /// Returns None for an empty population.
    fn select(&self, population: &Population, elite_count: usize) -> Option<Selection>;
}

/// Elitist truncation with tournament backfill.
///
/// The first E wolves seed the elite set. Every later wolf challenges the
/// weakest elite and replaces it when strictly fitter.
pub struct TournamentBackfill;

impl EliteSelector for TournamentBackfill {
    fn select(&self, population: &Population, elite_count: usize) -> Option<Selection> {
        let wolves = population.wolves();
        let seeded = elite_count.min(wolves.len());
        let mut elites: Vec<usize> = (0..seeded).collect();

        for candidate in seeded..wolves.len() {
            let (slot, weakest) = weakest_slot(population, &elites)?;
            if wolves[candidate].fitness() > weakest {
                // Candidates arrive in index order, so pushing keeps `elites` sorted.
                elites.remove(slot);
                elites.push(candidate);
            }
        }

        split_top(population, elites)
    }
}

/// Keep the first E wolves regardless of fitness.
///
/// Matches runs where the minimum lookup compared whole records instead of
/// scores, so no challenger ever won a slot.
pub struct FirstCome;

impl EliteSelector for FirstCome {
    fn select(&self, population: &Population, elite_count: usize) -> Option<Selection> {
        let seeded = elite_count.min(population.len());
        split_top(population, (0..seeded).collect())
    }
}

pub fn selector_for(strategy: SelectionStrategy) -> Box<dyn EliteSelector> {
    match strategy {
        SelectionStrategy::TournamentBackfill => Box::new(TournamentBackfill),
        SelectionStrategy::FirstCome => Box::new(FirstCome),
    }
}

/// (position in `elites`, fitness) of the least fit elite. First found wins ties.
fn weakest_slot(population: &Population, elites: &[usize]) -> Option<(usize, f64)> {
    let wolves = population.wolves();
    let mut weakest: Option<(usize, f64)> = None;
    for (slot, &index) in elites.iter().enumerate() {
        let fitness = wolves[index].fitness();
        match weakest {
            Some((_, min)) if fitness >= min => {}
            _ => weakest = Some((slot, fitness)),
        }
    }
    weakest
}

/// Remove the fittest elite (first found wins ties) and return it as the top performer.
fn split_top(population: &Population, mut elites: Vec<usize>) -> Option<Selection> {
    let wolves = population.wolves();
    let mut best: Option<(usize, f64)> = None;
    for (slot, &index) in elites.iter().enumerate() {
        let fitness = wolves[index].fitness();
        match best {
            Some((_, max)) if fitness <= max => {}
            _ => best = Some((slot, fitness)),
        }
    }

    let (slot, _) = best?;
    let top = elites.remove(slot);
    Some(Selection { top, elites })
}
