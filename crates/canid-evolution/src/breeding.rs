//! Crossover between the top performer and the remaining elites.
//!
//! Traits split into two lines: the disposition line (pack affinity, fear,
//! plasticity) and the temperament line (aggression, playfulness). Every
//! pairing yields one pup per orientation, and the whole pass over the
//! elites runs twice, so each elite contributes four pups.

use crate::selection::Selection;
use canid_core::population::Population;
use canid_core::types::Wolf;

/// Full passes over the elites per generation.
pub const BREEDING_PASSES: usize = 2;

/// Pup with `disposition`'s pack affinity, fear and plasticity and
/// `temperament`'s aggression and playfulness. Unscored.
pub fn cross(disposition: &Wolf, temperament: &Wolf) -> Wolf {
    Wolf::new(
        disposition.pack_affinity,
        temperament.aggression,
        disposition.fear,
        disposition.plasticity,
        temperament.playfulness,
    )
}

/// Breed the next generation. Output size is `4 * selection.elites.len()`.
pub fn breed(population: &Population, selection: &Selection) -> Population {
    let wolves = population.wolves();
    let top = &wolves[selection.top];

    let mut pups = Vec::with_capacity(2 * BREEDING_PASSES * selection.elites.len());
    for _ in 0..BREEDING_PASSES {
        for &index in &selection.elites {
            let mate = &wolves[index];
            pups.push(cross(top, mate));
            pups.push(cross(mate, top));
        }
    }

    Population::from_wolves(pups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn population() -> Population {
        (0..6)
            .map(|i| {
                let v = i as f64 / 10.0;
                let mut w = Wolf::new(v, v + 0.01, v + 0.02, v + 0.03, v + 0.04);
                w.food = Some(v);
                w
            })
            .collect()
    }

    #[test]
    fn offspring_count_is_four_per_elite() {
        let pop = population();
        let selection = Selection { top: 5, elites: vec![1, 2, 3, 4] };
        let next = breed(&pop, &selection);
        assert_eq!(next.len(), 16);
    }

    #[test]
    fn orientations_swap_trait_lines() {
        let pop = population();
        let selection = Selection { top: 5, elites: vec![2] };
        let next = breed(&pop, &selection);
        let top = &pop.wolves()[5];
        let mate = &pop.wolves()[2];

        let a = &next.wolves()[0];
        assert_eq!(a.pack_affinity, top.pack_affinity);
        assert_eq!(a.fear, top.fear);
        assert_eq!(a.plasticity, top.plasticity);
        assert_eq!(a.aggression, mate.aggression);
        assert_eq!(a.playfulness, mate.playfulness);

        let b = &next.wolves()[1];
        assert_eq!(b.pack_affinity, mate.pack_affinity);
        assert_eq!(b.fear, mate.fear);
        assert_eq!(b.plasticity, mate.plasticity);
        assert_eq!(b.aggression, top.aggression);
        assert_eq!(b.playfulness, top.playfulness);
    }

    #[test]
    fn second_pass_repeats_first() {
        let pop = population();
        let selection = Selection { top: 0, elites: vec![3, 1, 4] };
        let next = breed(&pop, &selection);
        let (first, second) = next.wolves().split_at(6);
        assert_eq!(first, second);
    }

    #[test]
    fn pups_are_unscored() {
        let pop = population();
        let selection = Selection { top: 0, elites: vec![1] };
        assert!(breed(&pop, &selection).iter().all(|w| w.food.is_none()));
    }

    #[test]
    fn default_sizes_preserve_population() {
        // N = 20 -> E = 6 -> 5 mates -> 20 pups.
        let pop: Population = (0..20).map(|_| Wolf::new(0.5, 0.5, 0.5, 0.5, 0.5)).collect();
        let selection = Selection { top: 0, elites: vec![1, 2, 3, 4, 5] };
        assert_eq!(breed(&pop, &selection).len(), pop.len());
    }
}
