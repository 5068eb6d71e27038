use capitaly::config::GameConfig;
use capitaly::game::kernel::{Game, Session};
use capitaly::input::Scenario;

fn load(text: &str) -> Scenario {
    text.parse().unwrap()
}

fn simulate(scenario: Scenario) -> Session {
    let rolls = scenario.rolls.unwrap();
    let game = Game::start(scenario.tiles, scenario.players, GameConfig::default())
        .unwrap()
        .unwrap();
    match game.speed_play(rolls) {
        Ok(update) => update.into(),
        Err((_, invalid)) => panic!("unexpected error: {invalid}"),
    }
}

#[test]
fn purchase() {
    let session = simulate(load(include_str!("../scenarios/purchase.txt")));
    assert!(!session.is_finished());

    let standings = session.get_standings();
    let summary: Vec<_> = standings.iter()
        .map(|s| (s.place, s.player_name.as_ref(), s.capital, s.properties.len()))
        .collect();
    assert_eq!(summary, [(1, "A", 9700, 1), (2, "B", 9000, 0)]);
}

#[test]
fn strategies() {
    let Session::Running(game) = simulate(load(include_str!("../scenarios/strategies.txt"))) else {
        panic!("nobody should have gone bankrupt");
    };

    // Strategic takes every other offer, Careful snaps up the rest.
    let owned: Vec<_> = game.active_players()
        .map(|p| (p.name(), p.capital(), p.properties().iter().map(|t| t.index()).collect::<Vec<_>>()))
        .collect();
    assert_eq!(owned, [("S", 9000, vec![0, 2]), ("C", 7000, vec![1, 3])]);
}

#[test]
fn elimination() {
    let session = simulate(load(include_str!("../scenarios/elimination.txt")));

    // The leftover rolls are never played.
    assert_eq!(session.history().len(), 7);
    assert!(session.history()[6].eliminated);

    let report = session.report();
    assert_eq!(report.winner.as_deref(), Some("B"));
    assert_eq!(report.standings[0].capital, 3000);
    assert!(report.standings[1].bankrupt);
    assert!(report.standings[1].properties.is_empty());

    let Session::Finished(game) = session else { unreachable!() };
    assert!(game.track().tiles()[0].as_real_estate().unwrap().owner().is_none());
}

#[test]
fn manual() {
    let scenario = load(include_str!("../scenarios/manual.txt"));
    assert_eq!(scenario.players.len(), 3);
    assert!(scenario.rolls.is_none());
}
