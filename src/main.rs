//! Console skirmish runner
//!
//! Loads converted stat records, walks two players through roster selection,
//! and drives the turn loop with stdin prompts and text narration.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zoid_skirmish::combat::{AttackOutcome, CircleDirection};
use zoid_skirmish::core::{Environment, Result, SkirmishError};
use zoid_skirmish::dice::SeededRolls;
use zoid_skirmish::encounter::{
    eligible_units, roster_order, AttackRequest, BlindMovementChoice, BlindMovementRequest,
    DazedAction, DazedActionRequest, DecisionProvider, Encounter, MovementChoice, MovementKind,
    MovementRequest, NarrationEvent, NarrationSink, ToggleChoice, ToggleRequest, TurnEngine,
};
use zoid_skirmish::unit::{load_records, Zoid, ZoidRecord};

#[derive(Parser, Debug)]
#[command(name = "zoid-skirmish")]
#[command(about = "Two-party turn-based zoid combat")]
struct Args {
    /// Path to the converted stats JSON
    #[arg(long, default_value = "data/zoid_stats.json")]
    stats: PathBuf,

    /// Battle environment: land, water, or air
    #[arg(long, default_value = "land")]
    environment: String,

    /// First unit by name (prompted when omitted)
    #[arg(long)]
    first: Option<String>,

    /// Second unit by name (prompted when omitted)
    #[arg(long)]
    second: Option<String>,

    /// Starting distance in meters
    #[arg(long, default_value_t = 1000.0)]
    distance: f64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum turns before calling the fight a draw
    #[arg(long)]
    max_turns: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let environment = parse_environment(&args.environment)?;
    let records = load_records(&args.stats)?;

    let eligible = eligible_units(&records, environment);
    let roster = roster_order(&eligible);
    if roster.len() < 2 {
        eprintln!("not enough units can fight on {environment}");
        std::process::exit(1);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    let first = pick_unit(&roster, args.first.as_deref(), "first", &mut input)?;
    let second = pick_unit(&roster, args.second.as_deref(), "second", &mut input)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "rolling with seed");
    let mut rolls = SeededRolls::new(seed);

    let mut encounter = Encounter::new(
        Zoid::from_record(first)?,
        Zoid::from_record(second)?,
        environment,
        args.distance,
        &mut rolls,
    )?;

    let mut provider = ConsolePrompt { input };
    let mut narrator = ConsoleNarrator;
    let result =
        TurnEngine::new(&mut encounter, &mut provider, &mut narrator, &mut rolls).run(args.max_turns);

    if result.winner.is_none() {
        println!("No winner after {} turns.", result.turns);
    }
    Ok(())
}

fn parse_environment(raw: &str) -> Result<Environment> {
    match raw.to_ascii_lowercase().as_str() {
        "land" => Ok(Environment::Land),
        "water" => Ok(Environment::Water),
        "air" => Ok(Environment::Air),
        other => Err(SkirmishError::IoError(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unknown environment {other:?}"),
        ))),
    }
}

/// Resolve a unit by name, or prompt against the printed roster.
fn pick_unit<'a>(
    roster: &[&'a ZoidRecord],
    requested: Option<&str>,
    label: &str,
    input: &mut impl BufRead,
) -> Result<&'a ZoidRecord> {
    if let Some(name) = requested {
        return roster
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| SkirmishError::UnknownUnit(name.to_string()));
    }

    println!("Available zoids:");
    for (index, record) in roster.iter().enumerate() {
        println!(
            "  {:>3}. {} (PL {})",
            index + 1,
            record.name,
            record.power_level
        );
    }
    loop {
        let line = prompt(input, &format!("Pick the {label} zoid (number or name): "));
        if let Ok(index) = line.trim().parse::<usize>() {
            if index >= 1 && index <= roster.len() {
                return Ok(roster[index - 1]);
            }
        }
        if let Some(record) = roster
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(line.trim()))
        {
            return Ok(record);
        }
        println!("No such zoid.");
    }
}

fn prompt(input: &mut impl BufRead, message: &str) -> String {
    print!("{message}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if input.read_line(&mut line).unwrap_or(0) == 0 {
        // EOF on stdin; nothing sensible left to do interactively
        std::process::exit(1);
    }
    line
}

/// Blocking stdin prompts for every decision point.
struct ConsolePrompt<R: BufRead> {
    input: R,
}

impl<R: BufRead> DecisionProvider for ConsolePrompt<R> {
    fn movement(&mut self, request: &MovementRequest) -> MovementChoice {
        loop {
            let line = prompt(
                &mut self.input,
                &format!(
                    "{} at {:.0}m (speed {:.0}): [c]lose, [r]etreat, circle [l]eft/[ri]ght, [s]tand? ",
                    request.unit, request.distance, request.speed
                ),
            );
            match line.trim().to_ascii_lowercase().as_str() {
                "c" | "close" => return MovementChoice::Close,
                "r" | "retreat" => return MovementChoice::Retreat,
                "s" | "stand" => return MovementChoice::StandStill,
                direction @ ("l" | "left" | "ri" | "right") => {
                    let degrees = loop {
                        let raw = prompt(
                            &mut self.input,
                            &format!("Degrees (0 to {:.1}): ", request.max_circle_degrees),
                        );
                        if let Ok(value) = raw.trim().parse::<f64>() {
                            break value;
                        }
                        println!("Not a number.");
                    };
                    let direction = if matches!(direction, "l" | "left") {
                        CircleDirection::Left
                    } else {
                        CircleDirection::Right
                    };
                    return MovementChoice::Circle { direction, degrees };
                }
                _ => println!("Unrecognized choice."),
            }
        }
    }

    fn blind_movement(&mut self, request: &BlindMovementRequest) -> BlindMovementChoice {
        loop {
            let line = prompt(
                &mut self.input,
                &format!(
                    "{} cannot see the enemy. [p]robe at {:.0}m/turn or [s]tand still? ",
                    request.unit, request.probe_speed
                ),
            );
            match line.trim().to_ascii_lowercase().as_str() {
                "p" | "probe" => return BlindMovementChoice::Probe,
                "s" | "stand" => return BlindMovementChoice::StandStill,
                _ => println!("Unrecognized choice."),
            }
        }
    }

    fn dazed_action(&mut self, request: &DazedActionRequest) -> DazedAction {
        loop {
            let line = prompt(
                &mut self.input,
                &format!("{} is dazed. [m]ove, [a]ttack, or s[k]ip? ", request.unit),
            );
            match line.trim().to_ascii_lowercase().as_str() {
                "m" | "move" => return DazedAction::Move,
                "a" | "attack" => return DazedAction::Attack,
                "k" | "skip" => return DazedAction::Skip,
                _ => println!("Unrecognized choice."),
            }
        }
    }

    fn toggles(&mut self, request: &ToggleRequest) -> ToggleChoice {
        let mut choice = ToggleChoice::default();
        if request.shield_available {
            let state = if request.shield_active { "up" } else { "down" };
            choice.toggle_shield = self.yes_no(&format!(
                "{}'s shield is {state}. Toggle it? [y/n] ",
                request.unit
            ));
        }
        if request.stealth_available {
            let state = if request.stealth_active { "on" } else { "off" };
            choice.toggle_stealth = self.yes_no(&format!(
                "{}'s concealment is {state}. Toggle it? [y/n] ",
                request.unit
            ));
        }
        choice
    }

    fn attack(&mut self, request: &AttackRequest) -> bool {
        let warning = if request.target_unlocated {
            " (firing blind!)"
        } else {
            ""
        };
        self.yes_no(&format!(
            "{} can attack {} at {} range{warning}. Attack? [y/n] ",
            request.unit, request.target, request.band
        ))
    }
}

impl<R: BufRead> ConsolePrompt<R> {
    fn yes_no(&mut self, message: &str) -> bool {
        loop {
            let line = prompt(&mut self.input, message);
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer y or n."),
            }
        }
    }
}

/// Renders narration events as plain text.
struct ConsoleNarrator;

impl NarrationSink for ConsoleNarrator {
    fn emit(&mut self, event: NarrationEvent) {
        match event {
            NarrationEvent::EncounterStarted {
                first_mover,
                second_mover,
                environment,
                distance,
            } => println!(
                "\n{first_mover} vs {second_mover} on {environment}, starting at {distance:.0}m. {first_mover} moves first."
            ),
            NarrationEvent::TurnBegan {
                turn_index,
                active,
                distance,
            } => println!("\n-- Turn {} : {active} ({distance:.0}m apart) --", turn_index + 1),
            NarrationEvent::OpponentConcealed { unit } => {
                println!("{unit} is hidden somewhere out there.")
            }
            NarrationEvent::SearchResolved {
                searcher, check, ..
            } => {
                let verdict = if check.detected { "spots it" } else { "finds nothing" };
                println!(
                    "{searcher} searches: {} + {} = {} vs DC {} ... {verdict}.",
                    check.roll, check.awareness, check.total, check.dc
                );
            }
            NarrationEvent::StunnedNoAction { unit } => {
                println!("{unit} is stunned and can only manage its systems.")
            }
            NarrationEvent::DazedRestriction { unit } => {
                println!("{unit} is dazed: move or attack, not both.")
            }
            NarrationEvent::Moved {
                unit,
                kind,
                distance_after,
            } => {
                let verb = match kind {
                    MovementKind::Closed => "closes in",
                    MovementKind::Retreated => "falls back",
                };
                println!("{unit} {verb}; the gap is now {distance_after:.0}m.");
            }
            NarrationEvent::Circled {
                unit,
                direction,
                degrees,
                facing_after,
            } => {
                let way = match direction {
                    CircleDirection::Left => "left",
                    CircleDirection::Right => "right",
                };
                println!("{unit} circles {way} {degrees:.1} degrees, now facing {facing_after:.1}.");
            }
            NarrationEvent::HeldPosition { unit } => println!("{unit} holds position."),
            NarrationEvent::BlindProbe {
                unit,
                kind,
                distance_after,
            } => {
                let verb = match kind {
                    MovementKind::Closed => "forward",
                    MovementKind::Retreated => "backward",
                };
                println!("{unit} probes {verb} carefully; the gap is now {distance_after:.0}m.");
            }
            NarrationEvent::ShieldToggled { unit, active } => {
                let state = if active { "raises" } else { "drops" };
                println!("{unit} {state} its shield.");
            }
            NarrationEvent::StealthToggled { unit, active } => {
                let state = if active { "engages" } else { "disengages" };
                println!("{unit} {state} concealment.");
            }
            NarrationEvent::AttackForbiddenByShield { unit } => {
                println!("{unit} cannot fire through its own raised shield.")
            }
            NarrationEvent::AttackSpentOnMovement { unit } => {
                println!("{unit} already used its action to move.")
            }
            NarrationEvent::OutOfReach { unit, band } => {
                println!("{unit} has nothing that reaches {band} range.")
            }
            NarrationEvent::AttackDeclined { unit } => println!("{unit} holds fire."),
            NarrationEvent::AttackLaunched {
                attacker,
                target,
                band,
            } => println!("{attacker} attacks {target} at {band} range!"),
            NarrationEvent::AttackResolved { target, outcome, .. } => {
                print_outcome(&target, outcome)
            }
            NarrationEvent::StatusRecovered { unit, to, .. } => {
                println!("{unit} steadies itself and is now {to}.")
            }
            NarrationEvent::DecisionRejected { reason, .. } => println!("Rejected: {reason}."),
            NarrationEvent::TurnEnded { .. } => {}
            NarrationEvent::EncounterEnded { winner, turns } => match winner {
                Some(_) => println!("\nThe battle is over after {turns} turns."),
                None => println!("\nThe battle ends without a victor after {turns} turns."),
            },
        }
    }
}

fn print_outcome(target: &str, outcome: AttackOutcome) {
    match outcome {
        AttackOutcome::BlindMiss => {
            println!("The shot tears into empty ground. {target} was never there.")
        }
        AttackOutcome::Miss { hit_roll } => println!(
            "Attack roll {} + {} = {} vs defense {}: a miss.",
            hit_roll.roll, hit_roll.attack_score, hit_roll.total, hit_roll.defense
        ),
        AttackOutcome::ShieldIntercepted {
            hit_roll,
            damage_rank,
            shield_roll,
            shield_total,
            shield_disabled,
        } => {
            println!(
                "Attack roll {} + {} = {} vs defense {}: a hit, but {target}'s shield takes it.",
                hit_roll.roll, hit_roll.attack_score, hit_roll.total, hit_roll.defense
            );
            if shield_disabled {
                println!(
                    "Shield check {shield_roll} for {shield_total} against damage {damage_rank}: the shield shatters!"
                );
            } else {
                println!("Shield check {shield_roll} for {shield_total}: the shield holds.");
            }
        }
        AttackOutcome::HullHit {
            hit_roll,
            toughness_roll,
            toughness_total,
            damage_difference,
            severity,
            dents_after,
            status_after,
            ..
        } => {
            println!(
                "Attack roll {} + {} = {} vs defense {}: a hit!",
                hit_roll.roll, hit_roll.attack_score, hit_roll.total, hit_roll.defense
            );
            println!(
                "{target} soaks with {toughness_roll} for {toughness_total} (margin {damage_difference}): {severity}."
            );
            if damage_difference > 0 {
                println!("{target} now carries {dents_after} dents and is {status_after}.");
            }
        }
    }
}
