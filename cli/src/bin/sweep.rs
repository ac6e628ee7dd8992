use clap::Parser;
use engine::{
    play_match, DamageLeaderboard, Dice, MatchConfig, RoundObserver, RoundReport,
};
use skirmish_cli::assignments::AssignmentDir;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skirmish-sweep")]
#[command(about = "Monte Carlo sweep: the same assignments over many seeds")]
struct Args {
    /// Directory with your team files (1.json, 2.json, ...)
    #[arg(long, default_value = "./your_assignments")]
    your_assignments: PathBuf,

    /// Directory with the opponent's team files
    #[arg(long, default_value = "./opponent_assignments")]
    opponent_assignments: PathBuf,

    /// Number of matches
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// More log output on stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Round-level tallies gathered through the observer hook.
#[derive(Default)]
struct Tally {
    rounds: u32,
    round_wins: u32,
    double_knockouts: u32,
    damage: DamageLeaderboard,
}

impl RoundObserver for Tally {
    fn round_finished(&mut self, report: &RoundReport<'_>) {
        self.rounds += 1;
        if report.your_win {
            self.round_wins += 1;
        }
        if report.is_double_knockout() {
            self.double_knockouts += 1;
        }
        self.damage.round_finished(report);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    skirmish_cli::init_tracing(args.verbose);

    let yours = AssignmentDir::new(&args.your_assignments);
    let theirs = AssignmentDir::new(&args.opponent_assignments);
    let config = MatchConfig::default();

    let mut match_wins = 0u32;
    let mut tally = Tally::default();

    for i in 0..args.trials {
        let mut dice = Dice::from_seed(args.seed.wrapping_add(i as u64));
        let outcome = play_match(&config, &yours, &theirs, &mut dice, &mut tally)?;
        if outcome.your_win {
            match_wins += 1;
        }
    }

    let trials_f = f64::from(args.trials.max(1));
    let rounds_f = f64::from(tally.rounds.max(1));

    println!("skirmish-sweep results");
    println!("----------------------");
    println!("trials:             {}", args.trials);
    println!("match win rate:     {:.1}%", f64::from(match_wins) / trials_f * 100.0);
    println!("round win rate:     {:.1}%", f64::from(tally.round_wins) / rounds_f * 100.0);
    println!("avg rounds/match:   {:.2}", f64::from(tally.rounds) / trials_f);
    println!("double knockouts:   {}", tally.double_knockouts);
    println!();
    println!("avg damage per round (your side):");
    for (id, total) in tally.damage.your_ranking() {
        println!("  #{:<4} {:>10.2}", id, total / rounds_f);
    }
    println!("avg damage per round (opponent):");
    for (id, total) in tally.damage.opponent_ranking() {
        println!("  #{:<4} {:>10.2}", id, total / rounds_f);
    }

    Ok(())
}
