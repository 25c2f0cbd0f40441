//! Duplex sponge over the width-3 Poseidon permutation.
//!
//! State layout is `[capacity, rate_0, rate_1]`. Absorbing adds into the
//! next free rate slot and permutes once a full block is pending; the first
//! squeeze after absorbing permutes, later squeezes walk the rate slots and
//! permute again when exhausted. Two absorbs per permutation is what the
//! cipher's pairwise absorb schedule is tuned for.

use ark_ff::{Field, Zero};
use light_poseidon::parameters::bn254_x5::get_poseidon_parameters;
use light_poseidon::PoseidonParameters;

use crate::algebra::FieldElement;
use crate::error::{PreError, PreResult};

/// Number of field elements in the permutation state.
pub const SPONGE_WIDTH: usize = 3;

/// Field elements absorbed or squeezed per permutation.
pub const SPONGE_RATE: usize = SPONGE_WIDTH - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Absorbing { next: usize },
    Squeezing { next: usize },
}

/// Poseidon duplex sponge exposing `absorb` and `squeeze`.
pub struct PoseidonSponge {
    params: PoseidonParameters<FieldElement>,
    state: [FieldElement; SPONGE_WIDTH],
    mode: Mode,
}

impl std::fmt::Debug for PoseidonSponge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // State is keyed material once a key has been absorbed.
        f.debug_struct("PoseidonSponge")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl PoseidonSponge {
    /// Start a fresh sponge with an all-zero state.
    pub fn new() -> PreResult<Self> {
        let params = get_poseidon_parameters::<FieldElement>(SPONGE_WIDTH as u8)
            .map_err(|err| PreError::HashError(err.to_string()))?;
        Ok(Self {
            params,
            state: [FieldElement::zero(); SPONGE_WIDTH],
            mode: Mode::Absorbing { next: 0 },
        })
    }

    pub fn absorb(&mut self, input: FieldElement) {
        match self.mode {
            Mode::Absorbing { next } if next == SPONGE_RATE => {
                self.permute();
                self.state[1] += input;
                self.mode = Mode::Absorbing { next: 1 };
            }
            Mode::Absorbing { next } => {
                self.state[1 + next] += input;
                self.mode = Mode::Absorbing { next: next + 1 };
            }
            Mode::Squeezing { .. } => {
                self.state[1] += input;
                self.mode = Mode::Absorbing { next: 1 };
            }
        }
    }

    pub fn absorb_all(&mut self, inputs: &[FieldElement]) {
        for input in inputs {
            self.absorb(*input);
        }
    }

    pub fn squeeze(&mut self) -> FieldElement {
        match self.mode {
            Mode::Squeezing { next } if next < SPONGE_RATE => {
                self.mode = Mode::Squeezing { next: next + 1 };
                self.state[1 + next]
            }
            _ => {
                self.permute();
                self.mode = Mode::Squeezing { next: 1 };
                self.state[1]
            }
        }
    }

    fn permute(&mut self) {
        let width = self.params.width;
        let half_full = self.params.full_rounds / 2;
        let total = self.params.full_rounds + self.params.partial_rounds;
        let alpha = [self.params.alpha];

        for round in 0..total {
            for (i, element) in self.state.iter_mut().enumerate() {
                *element += self.params.ark[round * width + i];
            }

            if round < half_full || round >= half_full + self.params.partial_rounds {
                for element in self.state.iter_mut() {
                    *element = element.pow(alpha);
                }
            } else {
                self.state[0] = self.state[0].pow(alpha);
            }

            let mut mixed = [FieldElement::zero(); SPONGE_WIDTH];
            for (i, out) in mixed.iter_mut().enumerate() {
                for (j, element) in self.state.iter().enumerate() {
                    *out += *element * self.params.mds[i][j];
                }
            }
            self.state = mixed;
        }
    }
}
