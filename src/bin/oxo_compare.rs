use std::time::Instant;

use clap::Parser;
use oxo::engine::Engine;
use oxo::game::player::PlayerRand;
use oxo::game::Mark;
use oxo::search::PlayerNegamax;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

#[derive(Parser, Debug)]
#[clap(about, long_about = None)]
struct Args {
    #[clap(short, long, default_value_t = 10)]
    repeat: usize,
    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    oxo::util::init_globals();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rand = StdRng::seed_from_u64(seed);

    log::info!("Comparing negamax against a random player:");
    log::info!("\tnumber of games: {}", args.repeat);
    log::info!("\tseed: {}", seed);

    let run_time = Instant::now();
    let mut negamax_wins = 0;
    let mut rand_wins = 0;
    let mut draws = 0;
    for game_idx in 0..args.repeat {
        let mut machine = PlayerNegamax;
        let mut rand_player = PlayerRand::from_seed(rand.next_u64());

        /* Alternate which side the machine plays */
        let machine_mark = match game_idx % 2 == 0 {
            true => Mark::Nought,
            false => Mark::Cross,
        };

        let mut engine = Engine::new();
        let winner = match machine_mark {
            Mark::Nought => engine.play_until_over(&mut machine, &mut rand_player),
            Mark::Cross => engine.play_until_over(&mut rand_player, &mut machine),
        }
        .expect("game loop failed");

        match winner {
            None => draws += 1,
            Some(w) if w == machine_mark => negamax_wins += 1,
            Some(_) => rand_wins += 1,
        }
    }

    log::info!("Comparison results:");
    log::info!("\t{}/{} : negamax", negamax_wins, args.repeat);
    log::info!("\t{}/{} : random", rand_wins, args.repeat);
    log::info!("\t{}/{} : draws", draws, args.repeat);
    log::info!("\tRunning time: {}s", run_time.elapsed().as_secs());
}
