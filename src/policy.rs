use rand::{rngs::StdRng, Rng, SeedableRng};
use strum::VariantArray;

use crate::{action::Action, agent::Observation};

/// Supplies one action per step, from a trained policy, a human, or anything in between
pub trait ActionSource {
    fn next_action(&mut self, observation: &Observation) -> Action;
}

impl<F> ActionSource for F
where
    F: FnMut(&Observation) -> Action,
{
    fn next_action(&mut self, observation: &Observation) -> Action {
        self(observation)
    }
}

/// Manual control: maps a raw horizontal input axis to actions with [`Action::from_axis`]
pub struct Heuristic<F: FnMut() -> f32> {
    axis: F,
}

impl<F: FnMut() -> f32> Heuristic<F> {
    /// `axis` is polled once per step and should yield `-1`, `0`, or `+1`
    pub fn new(axis: F) -> Self {
        Self { axis }
    }
}

impl<F: FnMut() -> f32> ActionSource for Heuristic<F> {
    fn next_action(&mut self, _observation: &Observation) -> Action {
        Action::from_axis((self.axis)())
    }
}

/// Picks every action with equal probability, ignoring the observation
pub struct RandomPolicy<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPolicy {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ActionSource for RandomPolicy<R> {
    fn next_action(&mut self, _observation: &Observation) -> Action {
        Action::VARIANTS[self.rng.gen_range(0..Action::VARIANTS.len())]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn heuristic_maps_axis() {
        let mut inputs = [-1.0, 0.0, 1.0, 0.3].into_iter();
        let mut heuristic = Heuristic::new(move || inputs.next().unwrap_or(0.0));

        let actions = (0..4)
            .map(|_| heuristic.next_action(&[0.0; 3]))
            .collect::<Vec<_>>();
        assert_eq!(
            actions,
            [Action::Left, Action::Nothing, Action::Right, Action::Nothing],
            "Axis values mapped to actions"
        );
    }

    #[test]
    fn random_policy_covers_actions() {
        let mut policy = RandomPolicy::seeded(42);
        let seen = (0..200)
            .map(|_| policy.next_action(&[0.0; 3]))
            .collect::<HashSet<_>>();
        assert_eq!(seen.len(), 3, "Every action is eventually chosen");
    }

    #[test]
    fn closure_policy() {
        let mut policy = |obs: &Observation| if obs[0] > 0.0 { Action::Left } else { Action::Right };
        assert_eq!(policy.next_action(&[2.0, 0.0, 0.0]), Action::Left);
        assert_eq!(policy.next_action(&[-2.0, 0.0, 0.0]), Action::Right);
    }
}
