use rand::prelude::*;

use crate::engine::Engine;
use crate::game::Square;

/// An actor that produces moves for the side whose turn it is. Players may
/// refresh the engine's candidate list and, for search, mutate the engine
/// as long as it is restored before returning. `None` means no move is
/// available.
pub trait GamePlayer {
    fn next_move(&mut self, engine: &mut Engine) -> Option<Square>;
}

pub struct PlayerRand {
    rand: StdRng,
}
impl Default for PlayerRand {
    fn default() -> Self {
        Self::new()
    }
}
impl PlayerRand {
    pub fn new() -> Self {
        Self::from_seed(rand::rng().random())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rand: StdRng::seed_from_u64(seed),
        }
    }
}

impl GamePlayer for PlayerRand {
    fn next_move(&mut self, engine: &mut Engine) -> Option<Square> {
        engine.generate_moves();
        let moves = engine.candidates();
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rand.random_range(0..moves.len())])
        }
    }
}
