use std::io;

use itertools::Itertools;

use crate::engine::Engine;
use crate::game::player::GamePlayer;
use crate::game::{Mark, Square, BOARD_SIZE};

pub fn mark_to_str(m: Option<Mark>) -> String {
    match m {
        None => String::from("None"),
        Some(Mark::Nought) => String::from("O"),
        Some(Mark::Cross) => String::from("X"),
    }
}

pub fn print_board(engine: &Engine) {
    for r in 0..BOARD_SIZE {
        let row = (0..BOARD_SIZE)
            .map(|c| match engine.cell(Square::new(r, c)) {
                None => "_",
                Some(Mark::Nought) => "O",
                Some(Mark::Cross) => "X",
            })
            .join(" ");
        println!("{}", row);
    }
}

/// Human player reading a square index (row * 3 + column, 0-based) from
/// standard input. Invalid input is re-prompted, never passed on.
pub struct PlayerCmd;

impl GamePlayer for PlayerCmd {
    fn next_move(&mut self, engine: &mut Engine) -> Option<Square> {
        let read_usize = || -> Option<usize> {
            let mut line = String::new();
            io::stdin()
                .read_line(&mut line)
                .expect("failed to read input");
            match line.trim().parse::<usize>() {
                Err(e) => {
                    println!("invalid number: {}", e);
                    None
                }
                Ok(x) => Some(x),
            }
        };

        println!("Current position:");
        print_board(engine);

        engine.generate_moves();
        println!("Available squares:");
        for sq in engine.candidates() {
            println!("[{}]: ({}, {})", sq.to_idx(), sq.row(), sq.column());
        }

        loop {
            println!("Waiting for input move...");
            let idx = match read_usize() {
                None => continue,
                Some(x) => x,
            };
            match Square::from_idx(idx) {
                Ok(sq) if engine.candidates().contains(&sq) => return Some(sq),
                _ => println!("invalid move"),
            }
        }
    }
}
