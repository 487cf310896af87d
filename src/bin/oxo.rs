use clap::Parser;
use oxo::cli::{mark_to_str, print_board, PlayerCmd};
use oxo::engine::Engine;
use oxo::search::PlayerNegamax;

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    /// Play crosses (second to move) instead of noughts
    #[clap(long)]
    crosses: bool,
}

fn main() {
    oxo::util::init_globals();

    let args = Args::parse();

    let mut human = PlayerCmd;
    let mut machine = PlayerNegamax;

    let mut engine = Engine::new();
    let winner = if args.crosses {
        engine.play_until_over(&mut machine, &mut human)
    } else {
        engine.play_until_over(&mut human, &mut machine)
    }
    .expect("game loop failed");

    println!("The winner is: {}, details below:", mark_to_str(winner));
    print_board(&engine);
}
