//! Exhaustive negamax search over the remaining game tree. The state space
//! is small enough (at most 9! terminal paths) that unpruned full-depth
//! search is sufficient; the search mutates the one shared board and
//! backtracks through the engine's history stack.

use crate::engine::Engine;
use crate::game::player::GamePlayer;
use crate::game::{Mark, Square};

impl Engine {
    /// Score of the current position from the perspective of the mark to
    /// move: +1 a forced win, -1 a forced loss, 0 a draw (or undecided
    /// within `depth` plies). `depth` must equal the number of empty
    /// squares for the search to bottom out exactly when the board fills.
    pub(crate) fn negamax(&mut self, depth: usize) -> i32 {
        /* The signed mark encoding turns "who won" into "did the mover
         * win" with a single multiplication */
        let position_score = self.to_move.signed() * Mark::to_signed(self.evaluate());
        if depth == 0 {
            return position_score;
        }
        /* Someone already completed a line, no point recursing further */
        if position_score != 0 {
            return position_score;
        }

        self.generate_moves();
        /* The recursion below trashes the shared candidate list, iterate
         * over a local snapshot */
        let move_list = self.candidates.clone();

        let mut max = -1;
        for m in move_list {
            self.make_move(m);
            let score = -self.negamax(depth - 1);
            if max < score {
                max = score;
            }
            self.unmake_move();
        }
        max
    }

    /// Choose a move for the mark to move by searching every candidate to
    /// the end of the game, keeping the first candidate (in ascending
    /// index order) that attains the maximal score. Callers must have
    /// refreshed the candidate list with `generate_moves`; a fresh list is
    /// left behind on return, and the rest of the engine state is exactly
    /// as it was. Returns `None` when there are no candidates.
    pub fn select_move(&mut self) -> Option<Square> {
        let move_list = self.candidates.clone();
        if move_list.is_empty() {
            return None;
        }
        /* Search to the end of the game: exactly as many plies as there
         * are empty squares */
        let depth = move_list.len();

        let mut max = -1;
        let mut max_index = 0;
        for (i, m) in move_list.iter().enumerate() {
            self.make_move(*m);
            let score = -self.negamax(depth - 1);
            if max < score {
                max = score;
                max_index = i;
            }
            self.unmake_move();
        }

        /* The recursion consumed the candidate list, leave a fresh one */
        self.generate_moves();

        let chosen = move_list[max_index];
        log::debug!("selected {} with score {}", chosen, max);
        Some(chosen)
    }
}

/// Automated player backed by the exhaustive search. Unbeatable: it never
/// loses a game from any position it has played into.
pub struct PlayerNegamax;

impl GamePlayer for PlayerNegamax {
    fn next_move(&mut self, engine: &mut Engine) -> Option<Square> {
        engine.generate_moves();
        engine.select_move()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use rand::rngs::StdRng;
    use rand::{Rng, RngCore, SeedableRng};

    use crate::engine::Engine;
    use crate::game::player::PlayerRand;
    use crate::game::{Mark, SQUARES};
    use crate::search::PlayerNegamax;

    #[test]
    fn known_endgame() {
        /* o x o
         * _ o x   with noughts to move: 8 completes the 0-4-8 diagonal
         * x x _   immediately, while 3 lets crosses finish the bottom row */
        let mut engine = Engine::from_fixture("oxo_oxxx_o");
        assert_eq!(engine.evaluate(), None);
        assert_eq!(
            engine.candidates().iter().map(|s| s.to_idx()).collect_vec(),
            vec![3, 8]
        );

        let chosen = engine.select_move().unwrap();
        assert_eq!(chosen.to_idx(), 8);

        engine.apply_move(chosen).unwrap();
        assert_eq!(engine.evaluate(), Some(Mark::Nought));
    }

    #[test]
    fn known_endgame_root_score() {
        let mut engine = Engine::from_fixture("oxo_oxxx_o");
        engine.generate_moves();
        let depth = engine.candidates().len();
        assert_eq!(engine.negamax(depth), 1);
    }

    #[test]
    fn empty_board_is_drawn() {
        let mut engine = Engine::new();
        engine.generate_moves();
        assert_eq!(engine.negamax(SQUARES), 0);
    }

    #[test]
    fn decided_positions_stop_the_search() {
        /* Noughts already won: the score comes back immediately even with
         * depth far beyond the three remaining empties */
        let mut engine = Engine::from_fixture("ooox_xx__x");
        assert_eq!(engine.negamax(SQUARES), -1);

        /* A full board terminates for any depth */
        let mut engine = Engine::from_fixture("oxooxxxoox");
        assert_eq!(engine.negamax(0), 0);
        engine.negamax(5);
    }

    #[test]
    fn select_move_is_deterministic_and_restoring() {
        let mut engine = Engine::from_fixture("ox__o____x");
        engine.generate_moves();
        let snapshot = engine.clone();

        let first = engine.select_move();
        assert_eq!(engine, snapshot);
        let second = engine.select_move();
        assert_eq!(first, second);
    }

    #[test]
    fn select_move_on_full_board_is_none() {
        let mut engine = Engine::from_fixture("oxooxxxoox");
        engine.generate_moves();
        assert_eq!(engine.select_move(), None);
    }

    #[test]
    fn perfect_play_is_undefeated() {
        let seed: u64 = rand::rng().random();
        println!(
            "[{}] Using seed {}",
            stringify!(perfect_play_is_undefeated),
            seed
        );
        let mut rand = StdRng::seed_from_u64(seed);

        let games_num = 10;
        for _ in 0..games_num {
            let mut rand_player = PlayerRand::from_seed(rand.next_u64());
            let mut machine = PlayerNegamax;
            let mut engine = Engine::new();

            /* Machine plays crosses, the random noughts player never wins */
            let winner = engine
                .play_until_over(&mut rand_player, &mut machine)
                .unwrap();
            assert_ne!(winner, Some(Mark::Nought));
        }
        for _ in 0..games_num {
            let mut rand_player = PlayerRand::from_seed(rand.next_u64());
            let mut machine = PlayerNegamax;
            let mut engine = Engine::new();

            /* Machine plays noughts, the random crosses player never wins */
            let winner = engine
                .play_until_over(&mut machine, &mut rand_player)
                .unwrap();
            assert_ne!(winner, Some(Mark::Cross));
        }
    }
}
