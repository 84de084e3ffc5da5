use pokemon_combat_sim::battle::{simulate_battle, Battle, Combatant, Outcome, Phase, Side, MAX_ROUNDS};
use pokemon_combat_sim::catalog::StaticCatalog;
use pokemon_combat_sim::model::{CreatureProfile, DamageClass, MoveProfile, Stats};
use rand::rngs::mock::StepRng;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn make_move(name: &str, move_type: &str, class: DamageClass, power: u32, accuracy: u32) -> MoveProfile {
    MoveProfile {
        name: name.to_string(),
        power: Some(power),
        accuracy: Some(accuracy),
        move_type: move_type.to_string(),
        damage_class: class,
    }
}

fn make_mon(name: &str, types: &[&str], hp: u32, speed: u32) -> CreatureProfile {
    CreatureProfile {
        name: name.to_string(),
        sprite: None,
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: Stats {
            hp,
            attack: 120,
            defense: 80,
            special_attack: 120,
            special_defense: 80,
            speed,
        },
        moves: Vec::new(),
    }
}

#[test]
fn knockout_by_first_attacker_ends_the_round() {
    let catalog = StaticCatalog::new();
    let strike = make_move("mega-strike", "normal", DamageClass::Physical, 200, 100);
    let fast = make_mon("fastmon", &["normal"], 100, 120);
    let slow = make_mon("slowmon", &["normal"], 100, 60);
    let report = simulate_battle(
        &catalog,
        Combatant::new(&fast, &strike),
        Combatant::new(&slow, &strike),
        &mut StepRng::new(0, 0),
    );
    assert_eq!(report.log().len(), 1);
    let event = &report.log()[0];
    assert_eq!(event.attacker, "Fastmon");
    assert_eq!(event.move_name, "Mega Strike");
    assert_eq!(event.defender_hp, 0);
    assert_eq!(
        report.outcome,
        Outcome::Winner {
            side: Side::A,
            name: "Fastmon".to_string()
        }
    );
    assert_eq!(report.winner, "Fastmon");
    assert_eq!(report.hp_trace().len(), 4);
    assert_eq!(report.hp_trace()[3].hp, 0);
    assert_eq!(report.hp_trace()[2].hp, 100);
}

#[test]
fn mutual_immunity_runs_to_the_round_cap() {
    let catalog = StaticCatalog::new();
    let lick = make_move("lick", "ghost", DamageClass::Physical, 30, 100);
    let tackle = make_move("tackle", "normal", DamageClass::Physical, 40, 100);
    let plain = make_mon("plain", &["normal"], 100, 50);
    let spooky = make_mon("spooky", &["ghost"], 100, 50);
    let mut rng = SmallRng::seed_from_u64(9);
    let report = simulate_battle(
        &catalog,
        Combatant::new(&plain, &tackle),
        Combatant::new(&spooky, &lick),
        &mut rng,
    );
    assert_eq!(report.outcome, Outcome::Timeout);
    assert_eq!(report.rounds(), MAX_ROUNDS);
    assert_eq!(report.log().len(), 2 * MAX_ROUNDS as usize);
    assert_eq!(report.hp_trace().len(), 2 * (MAX_ROUNDS as usize + 1));
    for event in report.log() {
        assert_eq!(event.damage, 0);
        assert_eq!(event.effectiveness, 0.0);
        assert_eq!(event.note, "No effect!");
    }
    assert_eq!(report.winner, "Draw — 100-round limit reached!");
}

#[test]
fn missed_attacks_are_noted() {
    let catalog = StaticCatalog::new();
    let wild = make_move("wild-swing", "normal", DamageClass::Physical, 80, 50);
    let a = make_mon("alpha", &["normal"], 100, 90);
    let b = make_mon("beta", &["normal"], 100, 30);
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut battle = Battle::new(
        &catalog,
        Combatant::new(&a, &wild),
        Combatant::new(&b, &wild),
        &mut rng,
    );
    assert_eq!(battle.phase(), Phase::Setup);
    battle.run_round();
    assert_eq!(battle.phase(), Phase::InRound);
    let state = battle.state();
    assert_eq!(state.log.len(), 2);
    assert!(state.log.iter().all(|e| e.note == "Missed!" && e.damage == 0));
    assert_eq!(state.hp, [100, 100]);
}

#[test]
fn fainted_at_start_is_a_draw() {
    let catalog = StaticCatalog::new();
    let tackle = make_move("tackle", "normal", DamageClass::Physical, 40, 100);
    let a = make_mon("husk", &["normal"], 0, 50);
    let b = make_mon("shell", &["normal"], 0, 40);
    let report = simulate_battle(
        &catalog,
        Combatant::new(&a, &tackle),
        Combatant::new(&b, &tackle),
        &mut StepRng::new(0, 0),
    );
    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(report.winner, "It's a draw!");
    assert_eq!(report.log().len(), 1);
}

#[test]
fn speed_ties_let_either_side_strike_first() {
    let catalog = StaticCatalog::new();
    let strike = make_move("strike", "normal", DamageClass::Physical, 200, 100);
    let a = make_mon("mono-a", &["normal"], 100, 80);
    let b = make_mon("mono-b", &["normal"], 100, 80);
    let trials = 400;
    let mut a_wins = 0;
    for seed in 0..trials {
        let mut rng = SmallRng::seed_from_u64(seed);
        let report = simulate_battle(
            &catalog,
            Combatant::new(&a, &strike),
            Combatant::new(&b, &strike),
            &mut rng,
        );
        assert_eq!(report.log().len(), 1);
        if matches!(report.outcome, Outcome::Winner { side: Side::A, .. }) {
            a_wins += 1;
        }
    }
    let rate = a_wins as f64 / trials as f64;
    assert!((rate - 0.5).abs() < 0.1, "expected ~0.5, got {rate}");
}

#[test]
fn hp_trace_never_increases_and_battles_terminate() {
    let catalog = StaticCatalog::new();
    let jab = make_move("jab", "fighting", DamageClass::Physical, 20, 70);
    let gust = make_move("gust", "flying", DamageClass::Special, 25, 90);
    let a = make_mon("brawler", &["normal"], 250, 70);
    let b = make_mon("glider", &["bug", "grass"], 250, 70);
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let report = simulate_battle(
            &catalog,
            Combatant::new(&a, &jab),
            Combatant::new(&b, &gust),
            &mut rng,
        );
        assert!(report.rounds() <= MAX_ROUNDS);
        let trace = report.hp_trace();
        for side in 0..2 {
            let series: Vec<u32> = trace.iter().skip(side).step_by(2).map(|s| s.hp).collect();
            assert!(series.windows(2).all(|w| w[1] <= w[0]), "seed {seed}: {series:?}");
        }
        for round in 1..=report.rounds() {
            let events: Vec<_> = report.log().iter().filter(|e| e.round == round).collect();
            assert!(!events.is_empty() && events.len() <= 2);
            if events[0].defender_hp == 0 {
                assert_eq!(events.len(), 1, "no turn after a knockout");
            }
        }
        if report.outcome == Outcome::Timeout {
            assert_eq!(report.rounds(), MAX_ROUNDS);
        }
    }
}

#[test]
fn hyphenated_creature_names_survive_in_log_and_winner() {
    let catalog = StaticCatalog::new();
    let strike = make_move("sacred-fire", "fire", DamageClass::Physical, 200, 100);
    let phoenix = make_mon("ho-oh", &["fire", "flying"], 100, 90);
    let mime = make_mon("mr-mime", &["psychic", "fairy"], 100, 60);
    let report = simulate_battle(
        &catalog,
        Combatant::new(&phoenix, &strike),
        Combatant::new(&mime, &strike),
        &mut StepRng::new(0, 0),
    );
    assert_eq!(report.log()[0].attacker, "Ho-Oh");
    assert_eq!(report.log()[0].move_name, "Sacred Fire");
    assert_eq!(report.winner, "Ho-Oh");
}
