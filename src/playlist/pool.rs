use rand::Rng;

use super::metadata::GeneratedEntry;

/// Working set of candidates eligible for weighted drawing
///
/// Built fresh for every generation run. Candidates are never spliced out;
/// a no-repeat candidate that has been drawn is flagged ineligible by its
/// position, so duplicate ids across sources stay unambiguous.
#[derive(Debug)]
pub struct CandidatePool {
    candidates: Vec<GeneratedEntry>,
    eligible: Vec<bool>,
    remaining: usize,
}

impl CandidatePool {
    /// Candidates must already have positive, finite weights
    pub fn new(candidates: Vec<GeneratedEntry>) -> Self {
        let remaining = candidates.len();
        Self {
            eligible: vec![true; remaining],
            candidates,
            remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Number of candidates that can still be drawn
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Cumulative-weight selection; returns `None` only when the pool is empty
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<GeneratedEntry> {
        let index = self.select_index(rng)?;
        let entry = self.candidates[index].clone();

        if !entry.track.allow_repeated {
            self.eligible[index] = false;
            self.remaining -= 1;
        }

        Some(entry)
    }

    fn select_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        // Weights are taken relative to the heaviest candidate, so the total
        // stays finite (and at least 1) however large the raw weights are.
        let heaviest = self
            .eligible_candidates()
            .map(|(_, entry)| entry.track.weight)
            .reduce(f64::max)?;
        let relative = |entry: &GeneratedEntry| entry.track.weight / heaviest;

        let total_weight: f64 = self
            .eligible_candidates()
            .map(|(_, entry)| relative(entry))
            .sum();
        let mut remainder = rng.gen_range(0.0..total_weight);

        let mut last_eligible = None;
        for (index, entry) in self.eligible_candidates() {
            remainder -= relative(entry);
            if remainder <= 0.0 {
                return Some(index);
            }
            last_eligible = Some(index);
        }

        // Rounding left a sliver of weight unclaimed
        last_eligible
    }

    fn eligible_candidates(&self) -> impl Iterator<Item = (usize, &GeneratedEntry)> {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(index, _)| self.eligible[*index])
    }
}
