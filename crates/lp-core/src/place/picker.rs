//! Random pick over ranked places

use super::model::RankedPlace;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Source of uniform random indices.
///
/// Injected so picks can be made deterministic in tests.
pub trait RandomSource {
    /// Uniform index in `0..len`; `len` is never zero
    fn next_index(&mut self, len: usize) -> usize;
}

/// Adapter from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Unseeded thread-local generator
    pub fn thread() -> Self {
        RngSource(rand::rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Outcome of a random pick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pick<'a> {
    Chosen(&'a RankedPlace),
    NoCandidates,
}

impl<'a> Pick<'a> {
    pub fn chosen(self) -> Option<&'a RankedPlace> {
        match self {
            Pick::Chosen(place) => Some(place),
            Pick::NoCandidates => None,
        }
    }
}

/// Pick one place uniformly at random
pub fn pick_random<'a>(ranked: &'a [RankedPlace], source: &mut dyn RandomSource) -> Pick<'a> {
    if ranked.is_empty() {
        return Pick::NoCandidates;
    }
    let index = source.next_index(ranked.len());
    ranked.get(index).map_or(Pick::NoCandidates, Pick::Chosen)
}
