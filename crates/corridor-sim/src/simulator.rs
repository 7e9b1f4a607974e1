use corridor_core::{Action, CorridorConfig, CorridorModel, StateIndex, TransitionModel};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::SimError;

#[derive(Debug, Clone)]
/// Samples stochastic corridor moves from the transition model.
///
/// All randomness in the workspace lives here; the RNG is injectable so the
/// solver side never needs to know about it.
pub struct CorridorSimulator<R = ChaCha8Rng> {
    model: CorridorModel,
    rng: R,
}

impl CorridorSimulator<ChaCha8Rng> {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(config: &CorridorConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> CorridorSimulator<R> {
    /// Create a simulator driven by a caller-supplied RNG.
    pub fn with_rng(config: &CorridorConfig, rng: R) -> Self {
        Self {
            model: CorridorModel::new(config),
            rng,
        }
    }

    /// Borrow the underlying transition/reward model.
    pub fn model(&self) -> &CorridorModel {
        &self.model
    }

    /// Borrow the config the model was built from.
    pub fn config(&self) -> &CorridorConfig {
        self.model.config()
    }

    /// Pick a uniformly random non-terminal start cell.
    pub fn random_start(&mut self) -> Result<StateIndex, SimError> {
        let starts: Vec<StateIndex> = self.config().non_terminal_states().collect();
        if starts.is_empty() {
            return Err(SimError::NoStartState);
        }
        let pick = self.rng.gen_range(0..starts.len());
        Ok(starts[pick])
    }

    /// Sample the cell reached after taking `action` in `state`.
    pub fn sample_next_state(
        &mut self,
        state: StateIndex,
        action: Action,
    ) -> Result<StateIndex, SimError> {
        let num_states = self.config().num_states;
        if state.index() >= num_states {
            return Err(SimError::StateOutOfRange { state, num_states });
        }

        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        let next = self.next_state_for_sample(state, action, sample);
        trace!(%state, %action, sample, %next, "sampled corridor move");
        Ok(next)
    }

    /// Invert the transition CDF at a uniform sample in `[0, 1)`.
    pub(crate) fn next_state_for_sample(
        &self,
        state: StateIndex,
        action: Action,
        sample: f64,
    ) -> StateIndex {
        let mut cumulative = 0.0_f64;
        let mut last_reachable = state;

        for next in self.config().states() {
            let p = self.model.probability(next, state, action);
            if p <= 0.0 {
                continue;
            }
            cumulative += p;
            last_reachable = next;
            if sample < cumulative {
                return next;
            }
        }

        // Rounding can leave the CDF a hair below 1.
        last_reachable
    }
}
