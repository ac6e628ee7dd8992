use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use engine::content::BuiltinTeam;
use engine::{play_match, Dice, MatchConfig, TeamSource};
use skirmish_cli::assignments::{read_text_auto, AssignmentDir};
use std::{fs, path::PathBuf};

#[derive(Args)]
struct RunOpts {
    /// RNG seed for determinism (omit for a random seed)
    #[arg(long)]
    seed: Option<u64>,
    /// Write the play-by-play here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Match settings as JSON (rounds, wins_needed, max_turns_per_round)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum number of rounds
    #[arg(long)]
    rounds: Option<u32>,
    /// Round wins needed to take the match
    #[arg(long)]
    wins: Option<u32>,
    /// Safety cap on turns per round
    #[arg(long)]
    max_turns: Option<u32>,
    /// Emit seed, config and outcome as JSON instead of the play-by-play
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Cmd {
    /// Play a match between two directories of per-round team files
    Match {
        /// Directory with your team files (1.json, 2.json, ...)
        #[arg(long, default_value = "./your_assignments")]
        your_assignments: PathBuf,
        /// Directory with the opponent's team files
        #[arg(long, default_value = "./opponent_assignments")]
        opponent_assignments: PathBuf,
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Play a match between two built-in teams
    Demo {
        /// Built-in team for your side
        #[arg(long, default_value = "vanguard")]
        yours: String,
        /// Built-in team for the opponent
        #[arg(long, default_value = "arcanists")]
        theirs: String,
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Print a built-in team as JSON, ready to drop into an assignments directory
    TeamDump {
        /// Built-in team name
        #[arg(long, default_value = "vanguard")]
        name: String,
        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Deterministic turn-based team combat simulator")]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn load_config(opts: &RunOpts) -> anyhow::Result<MatchConfig> {
    let mut config = match &opts.config {
        Some(path) => {
            let text = read_text_auto(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MatchConfig::default(),
    };
    if let Some(rounds) = opts.rounds {
        config.rounds = rounds;
    }
    if let Some(wins) = opts.wins {
        config.wins_needed = wins;
    }
    if let Some(max_turns) = opts.max_turns {
        config.max_turns_per_round = max_turns;
    }
    config.validate()?;
    Ok(config)
}

fn run(opts: &RunOpts, yours: &impl TeamSource, theirs: &impl TeamSource) -> anyhow::Result<()> {
    let config = load_config(opts)?;
    let mut dice = match opts.seed {
        Some(seed) => Dice::from_seed(seed),
        None => Dice::from_entropy(),
    };
    tracing::info!(seed = dice.seed(), ?config, "starting match");

    let outcome = play_match(&config, yours, theirs, &mut dice, &mut ())?;
    let text = if opts.json {
        serde_json::to_string_pretty(&serde_json::json!({
            "seed": dice.seed(),
            "config": config,
            "outcome": outcome,
        }))?
    } else {
        outcome.log.join("\n")
    };
    write_output(text, opts.out.as_ref())?;

    eprintln!(
        "{} {}-{} (seed {})",
        if outcome.your_win { "WIN" } else { "LOSS" },
        outcome.your_wins,
        outcome.opponent_wins,
        dice.seed()
    );
    Ok(())
}

fn write_output(text: String, out: Option<&PathBuf>) -> anyhow::Result<()> {
    match out {
        Some(path) => fs::write(path, text + "\n")
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => println!("{}", text),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    skirmish_cli::init_tracing(cli.verbose);
    match cli.cmd {
        Cmd::Match {
            your_assignments,
            opponent_assignments,
            opts,
        } => {
            let yours = AssignmentDir::new(your_assignments);
            let theirs = AssignmentDir::new(opponent_assignments);
            run(&opts, &yours, &theirs)?;
        }
        Cmd::Demo { yours, theirs, opts } => {
            let yours = BuiltinTeam::named(&yours)?;
            let theirs = BuiltinTeam::named(&theirs)?;
            run(&opts, &yours, &theirs)?;
        }
        Cmd::TeamDump { name, compact } => {
            let team = BuiltinTeam::named(&name)?.load_round(1)?;
            if compact {
                println!("{}", serde_json::to_string(&team)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&team)?);
            }
        }
    }
    Ok(())
}
