use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::debug;

use crate::pan::{PanDirection, PanSelection};

/// Assigns a pan direction to each slide
///
/// Random picks come from a small seedable RNG so a reel can be reproduced
/// exactly by fixing the seed.
pub struct PanPlanner {
    rng: SmallRng,
    allow_vertical: bool,
}

impl PanPlanner {
    pub fn new(seed: Option<u64>, allow_vertical: bool) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Self { rng, allow_vertical }
    }

    /// Direction for the next slide under `selection`
    pub fn choose(&mut self, selection: PanSelection) -> PanDirection {
        if let Some(direction) = selection.fixed_direction() {
            return direction;
        }

        let pool: &[PanDirection] = if self.allow_vertical {
            &PanDirection::ALL
        } else {
            &PanDirection::HORIZONTAL
        };

        let direction = pool[self.rng.gen_range(0..pool.len())];
        debug!("Chose pan direction: {}", direction);
        direction
    }
}
