use thiserror::Error;

use crate::game::player::GamePlayer;
use crate::game::{Bitboard, GameStatus, Mark, Square, BOARD_SIZE, SQUARES};

/// Bit patterns of the eight completed lines, row-major bit order (bit 0 is
/// the top-left square).
const LINE_MASKS: [u16; 8] = [
    0b000000111, // top row
    0b000111000, // middle row
    0b111000000, // bottom row
    0b001001001, // left column
    0b010010010, // middle column
    0b100100100, // right column
    0b100010001, // diagonal
    0b001010100, // anti-diagonal
];

/// One snapshot of the grid, as pushed on the history stack.
pub(crate) type Grid = [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("square index {index} is out of range (must be 0-8)")]
    OutOfRange { index: usize },

    #[error("square {0} is already occupied")]
    OccupiedSquare(Square),

    #[error("no move to undo")]
    HistoryUnderflow,

    #[error("player produced no move in an ongoing position")]
    NoMoveChosen,
}

/// The whole game state: grid, derived occupancy bitboards, move history
/// and candidate list. The grid is the source of truth; the bitboards are a
/// cache rebuilt after every mutation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Engine {
    pub(crate) board: Grid,
    pub(crate) history: Vec<Grid>,
    pub(crate) noughts: Bitboard,
    pub(crate) crosses: Bitboard,
    pub(crate) candidates: Vec<Square>,
    pub(crate) to_move: Mark,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            board: [[None; BOARD_SIZE]; BOARD_SIZE],
            history: Vec::new(),
            noughts: Bitboard::EMPTY,
            crosses: Bitboard::EMPTY,
            candidates: Vec::new(),
            to_move: Mark::Nought,
        }
    }

    pub fn current_player(&self) -> Mark {
        self.to_move
    }

    /// Empty squares as of the last `generate_moves` call, ascending. Not
    /// refreshed by `apply_move`/`undo_move`.
    pub fn candidates(&self) -> &[Square] {
        &self.candidates
    }

    pub fn cell(&self, sq: Square) -> Option<Mark> {
        self.board[sq.row()][sq.column()]
    }

    /// Rebuild both occupancy bitboards from the grid, scanning all nine
    /// cells in row-major order.
    pub fn recompute_bitboards(&mut self) {
        self.noughts = Bitboard::EMPTY;
        self.crosses = Bitboard::EMPTY;
        for idx in 0..SQUARES {
            match self.board[idx / BOARD_SIZE][idx % BOARD_SIZE] {
                Some(Mark::Nought) => self.noughts.set(idx, true),
                Some(Mark::Cross) => self.crosses.set(idx, true),
                None => {}
            }
        }
    }

    /// Refresh the candidate list with the currently empty squares, in
    /// ascending index order.
    pub fn generate_moves(&mut self) {
        self.candidates.clear();

        let available = Bitboard::FULL.raw() ^ (self.noughts.raw() | self.crosses.raw());
        for idx in 0..SQUARES {
            if available & (1u16 << idx) != 0 {
                self.candidates.push(Square::new(idx / BOARD_SIZE, idx % BOARD_SIZE));
            }
        }
    }

    /// Winner of the current position, if any: a mark wins iff its
    /// occupancy set contains every square of some line. Noughts are
    /// checked first.
    pub fn evaluate(&self) -> Option<Mark> {
        for mask in LINE_MASKS {
            if self.noughts.raw() & mask == mask {
                return Some(Mark::Nought);
            }
        }
        for mask in LINE_MASKS {
            if self.crosses.raw() & mask == mask {
                return Some(Mark::Cross);
            }
        }
        None
    }

    pub fn status(&self) -> GameStatus {
        if let Some(winner) = self.evaluate() {
            return GameStatus::Finished(Some(winner));
        }
        if (self.noughts.raw() | self.crosses.raw()) == Bitboard::FULL.raw() {
            return GameStatus::Finished(None);
        }
        GameStatus::Ongoing
    }

    /// Place the current player's mark on `sq` and flip the turn. Fails
    /// without touching any state if the square is occupied.
    pub fn apply_move(&mut self, sq: Square) -> Result<(), EngineError> {
        if self.cell(sq).is_some() {
            return Err(EngineError::OccupiedSquare(sq));
        }
        self.make_move(sq);
        Ok(())
    }

    /// Restore the position before the last applied move and flip the turn
    /// back. Fails without touching any state if there is nothing to undo.
    pub fn undo_move(&mut self) -> Result<(), EngineError> {
        if self.history.is_empty() {
            return Err(EngineError::HistoryUnderflow);
        }
        self.unmake_move();
        Ok(())
    }

    /// Unchecked write used by `apply_move` and the search, which only
    /// plays squares taken from the candidate list.
    pub(crate) fn make_move(&mut self, sq: Square) {
        self.history.push(self.board);
        self.board[sq.row()][sq.column()] = Some(self.to_move);
        self.recompute_bitboards();
        self.to_move = self.to_move.opposite();
    }

    /// Inverse of `make_move`; the caller guarantees a matching move was
    /// applied.
    pub(crate) fn unmake_move(&mut self) {
        let prev = self
            .history
            .pop()
            .expect("unmake_move without a matching make_move");
        self.board = prev;
        self.recompute_bitboards();
        self.to_move = self.to_move.opposite();
    }

    /// Alternate turns between the two players until the game is decided
    /// or drawn, returning the winner.
    pub fn play_until_over<'a>(
        &mut self,
        noughts: &'a mut dyn GamePlayer,
        crosses: &'a mut dyn GamePlayer,
    ) -> Result<Option<Mark>, EngineError> {
        loop {
            if let GameStatus::Finished(winner) = self.status() {
                return Ok(winner);
            }
            let player = match self.to_move {
                Mark::Nought => &mut *noughts,
                Mark::Cross => &mut *crosses,
            };
            let next_move = player.next_move(self).ok_or(EngineError::NoMoveChosen)?;
            self.apply_move(next_move)?;
        }
    }
}

#[cfg(test)]
impl Engine {
    /// Build a position from a 10-char fixture: nine cells ('o', 'x', '_')
    /// in row-major order followed by the mark to move.
    pub(crate) fn from_fixture(s: &str) -> Engine {
        assert_eq!(s.chars().count(), SQUARES + 1, "unexpected fixture length");
        let mut engine = Engine::new();
        for (idx, c) in s.chars().enumerate() {
            if idx < SQUARES {
                engine.board[idx / BOARD_SIZE][idx % BOARD_SIZE] = match c {
                    'o' => Some(Mark::Nought),
                    'x' => Some(Mark::Cross),
                    '_' => None,
                    _ => panic!("unknown board char: {:?}", c),
                };
            } else {
                engine.to_move = match c {
                    'o' => Mark::Nought,
                    'x' => Mark::Cross,
                    _ => panic!("unknown turn char: {:?}", c),
                };
            }
        }
        engine.recompute_bitboards();
        engine.generate_moves();
        engine
    }
}
