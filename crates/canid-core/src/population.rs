//! One generation of wolves.
//!
//! A population is replaced wholesale every generation. Wolves are
//! identified by their index, which only means something within one
//! generation.

use crate::types::Wolf;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Population {
    wolves: Vec<Wolf>,
}

impl Population {
    pub fn from_wolves(wolves: Vec<Wolf>) -> Self {
        Self { wolves }
    }

    /// Generation 0: wild wolves. Pack-leaning, aggressive and fearful,
    /// with little plasticity or playfulness.
    pub fn seed<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let wolves = (0..size)
            .map(|_| {
                Wolf::new(
                    0.25 * rng.gen::<f64>() + 0.45,
                    0.1 * rng.gen::<f64>() + 0.6,
                    0.2 * rng.gen::<f64>() + 0.75,
                    0.1 * rng.gen::<f64>() + 0.05,
                    0.15 * rng.gen::<f64>() + 0.05,
                )
            })
            .collect();
        Self { wolves }
    }

    pub fn len(&self) -> usize {
        self.wolves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wolves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Wolf> {
        self.wolves.get(index)
    }

    pub fn wolves(&self) -> &[Wolf] {
        &self.wolves
    }

    pub fn wolves_mut(&mut self) -> &mut [Wolf] {
        &mut self.wolves
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wolf> {
        self.wolves.iter()
    }

    pub fn into_wolves(self) -> Vec<Wolf> {
        self.wolves
    }

    /// First domesticated wolf in index order, if any.
    pub fn first_domesticated(&self) -> Option<(usize, &Wolf)> {
        self.wolves
            .iter()
            .enumerate()
            .find(|(_, wolf)| wolf.is_domesticated())
    }

    /// Mean of `f` over the population, 0.0 when empty.
    pub fn mean_by(&self, f: impl Fn(&Wolf) -> f64) -> f64 {
        if self.wolves.is_empty() {
            return 0.0;
        }
        self.wolves.iter().map(f).sum::<f64>() / self.wolves.len() as f64
    }
}

impl FromIterator<Wolf> for Population {
    fn from_iter<I: IntoIterator<Item = Wolf>>(iter: I) -> Self {
        Self {
            wolves: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Wolf;
    type IntoIter = std::slice::Iter<'a, Wolf>;

    fn into_iter(self) -> Self::IntoIter {
        self.wolves.iter()
    }
}
