use engine::content::{builtin_teams, BuiltinTeam};
use engine::{play_match, Dice, MatchConfig, TeamSource};

#[test]
fn builtin_teams_parse_and_validate() {
    for name in builtin_teams().keys() {
        let team = BuiltinTeam::named(name).unwrap().load_round(1).unwrap();
        assert!(!team.is_empty(), "{name}");
        for c in &team {
            c.validate().unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }
}

#[test]
fn unknown_builtin_is_an_error() {
    assert!(BuiltinTeam::named("nobody").is_err());
}

#[test]
fn builtin_match_runs_and_scores_consistently() {
    let yours = BuiltinTeam::named("vanguard").unwrap();
    let theirs = BuiltinTeam::named("arcanists").unwrap();
    let config = MatchConfig::default();

    for seed in 0..50 {
        let mut dice = Dice::from_seed(seed);
        let res = play_match(&config, &yours, &theirs, &mut dice, &mut ()).unwrap();
        assert!(res.rounds_played >= config.wins_needed && res.rounds_played <= config.rounds);
        assert_eq!(res.your_wins + res.opponent_wins, res.rounds_played);
        assert_eq!(res.your_win, res.your_wins > res.opponent_wins);
        assert!(res.your_wins == config.wins_needed || res.opponent_wins == config.wins_needed);
    }
}

#[test]
fn same_seed_same_match_log() {
    let yours = BuiltinTeam::named("vanguard").unwrap();
    let theirs = BuiltinTeam::named("arcanists").unwrap();
    let config = MatchConfig::default();

    let a = play_match(&config, &yours, &theirs, &mut Dice::from_seed(2025), &mut ()).unwrap();
    let b = play_match(&config, &yours, &theirs, &mut Dice::from_seed(2025), &mut ()).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.your_win, b.your_win);
}
