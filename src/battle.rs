use crate::catalog::Catalog;
use crate::damage::calculate_damage;
use crate::model::{CreatureProfile, MoveProfile};
use crate::types::effectiveness_label;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Hard cap on rounds before a battle is called a timeout.
pub const MAX_ROUNDS: u32 = 100;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// A creature together with the one move it uses for the whole battle.
#[derive(Copy, Clone, Debug)]
pub struct Combatant<'a> {
    pub profile: &'a CreatureProfile,
    pub chosen_move: &'a MoveProfile,
}

impl<'a> Combatant<'a> {
    pub fn new(profile: &'a CreatureProfile, chosen_move: &'a MoveProfile) -> Self {
        Self {
            profile,
            chosen_move,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnEvent {
    pub round: u32,
    pub attacker: String,
    #[serde(rename = "move")]
    pub move_name: String,
    pub damage: u32,
    pub effectiveness: f64,
    pub note: String,
    pub defender_hp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HpSample {
    pub round: u32,
    pub creature: String,
    pub hp: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Winner { side: Side, name: String },
    /// Both sides fainted.
    Draw,
    /// Neither side fainted within `MAX_ROUNDS`.
    Timeout,
}

impl Outcome {
    pub fn is_decisive(&self) -> bool {
        matches!(self, Outcome::Winner { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Winner { name, .. } => f.write_str(name),
            Outcome::Draw => f.write_str("It's a draw!"),
            Outcome::Timeout => {
                write!(f, "Draw — {MAX_ROUNDS}-round limit reached!")
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Setup,
    InRound,
    Resolved,
}

/// Mutable state of a single battle, owned by whoever runs it.
#[derive(Debug, Clone, Serialize)]
pub struct BattleState {
    pub hp: [u32; 2],
    pub round: u32,
    pub log: Vec<TurnEvent>,
    pub hp_trace: Vec<HpSample>,
}

impl BattleState {
    pub fn hp(&self, side: Side) -> u32 {
        self.hp[side.index()]
    }

    fn any_fainted(&self) -> bool {
        self.hp.iter().any(|hp| *hp == 0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub outcome: Outcome,
    pub winner: String,
    pub state: BattleState,
}

impl BattleReport {
    pub fn log(&self) -> &[TurnEvent] {
        &self.state.log
    }

    pub fn hp_trace(&self) -> &[HpSample] {
        &self.state.hp_trace
    }

    pub fn rounds(&self) -> u32 {
        self.state.round
    }
}

/// Faster side acts first; equal speed is a fresh coin flip every round.
pub fn turn_order<R: Rng + ?Sized>(speed_a: u32, speed_b: u32, rng: &mut R) -> [Side; 2] {
    if speed_a > speed_b {
        [Side::A, Side::B]
    } else if speed_b > speed_a {
        [Side::B, Side::A]
    } else if rng.gen::<f64>() < 0.5 {
        [Side::A, Side::B]
    } else {
        [Side::B, Side::A]
    }
}

pub struct Battle<'a, C: ?Sized, R: ?Sized> {
    sides: [Combatant<'a>; 2],
    state: BattleState,
    phase: Phase,
    catalog: &'a C,
    rng: &'a mut R,
}

impl<'a, C, R> Battle<'a, C, R>
where
    C: Catalog + ?Sized,
    R: Rng + ?Sized,
{
    pub fn new(catalog: &'a C, a: Combatant<'a>, b: Combatant<'a>, rng: &'a mut R) -> Self {
        let hp = [a.profile.stats.hp, b.profile.stats.hp];
        let hp_trace = vec![
            HpSample {
                round: 0,
                creature: a.profile.name.clone(),
                hp: hp[0],
            },
            HpSample {
                round: 0,
                creature: b.profile.name.clone(),
                hp: hp[1],
            },
        ];
        Battle {
            sides: [a, b],
            state: BattleState {
                hp,
                round: 0,
                log: Vec::new(),
                hp_trace,
            },
            phase: Phase::Setup,
            catalog,
            rng,
        }
    }

    fn side(&self, side: Side) -> &Combatant<'a> {
        &self.sides[side.index()]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Plays one round. Does nothing once the battle is resolved.
    pub fn run_round(&mut self) {
        if self.phase == Phase::Resolved {
            return;
        }
        self.phase = Phase::InRound;
        self.state.round += 1;
        let round = self.state.round;
        let order = turn_order(
            self.side(Side::A).profile.stats.speed,
            self.side(Side::B).profile.stats.speed,
            &mut *self.rng,
        );
        for attacker in order {
            let defender_hp = self.execute_turn(round, attacker);
            if defender_hp == 0 {
                break;
            }
        }
        for side in [Side::A, Side::B] {
            self.state.hp_trace.push(HpSample {
                round,
                creature: self.side(side).profile.name.clone(),
                hp: self.state.hp(side),
            });
        }
        if self.state.any_fainted() || round >= MAX_ROUNDS {
            self.phase = Phase::Resolved;
        }
    }

    fn execute_turn(&mut self, round: u32, side: Side) -> u32 {
        let attacker = *self.side(side);
        let defender = *self.side(side.opponent());
        let hit = calculate_damage(
            self.catalog,
            &attacker.profile.stats,
            &defender.profile.stats,
            &defender.profile.types,
            attacker.chosen_move,
            &mut *self.rng,
        );
        let slot = &mut self.state.hp[side.opponent().index()];
        *slot = slot.saturating_sub(hit.damage);
        let defender_hp = *slot;
        let note = if hit.missed {
            "Missed!".to_string()
        } else {
            effectiveness_label(hit.effectiveness).to_string()
        };
        debug!(
            round,
            attacker = attacker.profile.name.as_str(),
            damage = hit.damage,
            effectiveness = hit.effectiveness,
            defender_hp,
            "turn resolved"
        );
        self.state.log.push(TurnEvent {
            round,
            attacker: attacker.profile.display_name(),
            move_name: attacker.chosen_move.display_name(),
            damage: hit.damage,
            effectiveness: hit.effectiveness,
            note,
            defender_hp,
        });
        defender_hp
    }

    /// Outcome of the battle; only meaningful once resolved.
    pub fn outcome(&self) -> Outcome {
        match (self.state.hp(Side::A), self.state.hp(Side::B)) {
            (0, 0) => Outcome::Draw,
            (0, _) => Outcome::Winner {
                side: Side::B,
                name: self.side(Side::B).profile.display_name(),
            },
            (_, 0) => Outcome::Winner {
                side: Side::A,
                name: self.side(Side::A).profile.display_name(),
            },
            _ => Outcome::Timeout,
        }
    }

    pub fn into_report(self) -> BattleReport {
        let outcome = self.outcome();
        BattleReport {
            winner: outcome.to_string(),
            outcome,
            state: self.state,
        }
    }
}

/// Runs a full battle between two fixed move choices.
pub fn simulate_battle<C, R>(
    catalog: &C,
    a: Combatant<'_>,
    b: Combatant<'_>,
    rng: &mut R,
) -> BattleReport
where
    C: Catalog + ?Sized,
    R: Rng + ?Sized,
{
    let mut battle = Battle::new(catalog, a, b, rng);
    while battle.phase() != Phase::Resolved {
        battle.run_round();
    }
    let report = battle.into_report();
    info!(
        rounds = report.rounds(),
        events = report.log().len(),
        winner = report.winner.as_str(),
        "battle resolved"
    );
    report
}
