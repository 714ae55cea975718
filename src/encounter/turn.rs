//! Turn orchestration
//!
//! One turn walks the active unit through detection, movement, toggles, and
//! the attack phase, in that order, then applies end-of-turn recovery and
//! advances the turn index. Every roll and outcome is narrated; every choice
//! is pulled from the decision provider; invalid answers re-issue the same
//! request. The loop stops when a unit is defeated, checked before each
//! turn, or when an optional external turn limit runs out.

use serde::{Deserialize, Serialize};

use crate::combat::attack::resolve_attack;
use crate::combat::constants::BLIND_PROBE_SPEED_FACTOR;
use crate::combat::detection::search_check;
use crate::combat::range::{circled_facing, close_in, max_circling_angle, range_band, retreat};
use crate::combat::status::{end_of_turn_recovery, Status};
use crate::core::{Environment, Side};
use crate::dice::RollSource;
use crate::encounter::decision::{
    AttackRequest, BlindMovementChoice, BlindMovementRequest, DazedAction, DazedActionRequest,
    DecisionProvider, MovementChoice, MovementRequest, ToggleRequest,
};
use crate::encounter::events::{MovementKind, NarrationEvent, NarrationSink};
use crate::encounter::Encounter;
use crate::unit::Zoid;

/// Final tally of a finished (or turn-limited) encounter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EncounterResult {
    pub winner: Option<Side>,
    pub turns: u64,
}

/// Drives an encounter against a decision provider and narration sink.
///
/// Owns nothing: the encounter, provider, sink, and roll source all belong
/// to the caller, so a UI can keep them across its own event loop and call
/// `play_turn` whenever its provider is ready to answer.
pub struct TurnEngine<'a> {
    encounter: &'a mut Encounter,
    provider: &'a mut dyn DecisionProvider,
    sink: &'a mut dyn NarrationSink,
    rolls: &'a mut dyn RollSource,
}

impl<'a> TurnEngine<'a> {
    pub fn new(
        encounter: &'a mut Encounter,
        provider: &'a mut dyn DecisionProvider,
        sink: &'a mut dyn NarrationSink,
        rolls: &'a mut dyn RollSource,
    ) -> Self {
        Self {
            encounter,
            provider,
            sink,
            rolls,
        }
    }

    /// Run turns until a unit is defeated or the turn limit runs out.
    ///
    /// Two units that cannot damage each other never terminate on their
    /// own; callers that cannot rule that out should pass a limit.
    pub fn run(&mut self, max_turns: Option<u64>) -> EncounterResult {
        let first = self.encounter.first_mover();
        self.sink.emit(NarrationEvent::EncounterStarted {
            first_mover: self.encounter.unit(first).name().to_string(),
            second_mover: self.encounter.unit(first.opponent()).name().to_string(),
            environment: self.encounter.environment(),
            distance: self.encounter.distance(),
        });

        let mut turns_played = 0u64;
        while !self.encounter.is_over() {
            if let Some(limit) = max_turns {
                if turns_played >= limit {
                    break;
                }
            }
            self.play_turn();
            turns_played += 1;
        }

        let winner = self.encounter.winner();
        let turns = self.encounter.turn_index();
        tracing::debug!(?winner, turns, "encounter finished");
        self.sink.emit(NarrationEvent::EncounterEnded { winner, turns });
        EncounterResult { winner, turns }
    }

    /// Play exactly one turn for the active side.
    pub fn play_turn(&mut self) {
        let side = self.encounter.active_side();
        let Encounter {
            units,
            environment,
            distance,
            turn_index,
            ..
        } = &mut *self.encounter;
        let environment = *environment;

        let (active, opponent) = {
            let (first, second) = units.split_at_mut(1);
            match side {
                Side::First => (&mut first[0], &mut second[0]),
                Side::Second => (&mut second[0], &mut first[0]),
            }
        };

        let active_name = active.name().to_string();
        let opponent_name = opponent.name().to_string();
        let status_at_start = active.status();

        tracing::debug!(turn = *turn_index, unit = %active_name, status = %status_at_start, "turn start");
        self.sink.emit(NarrationEvent::TurnBegan {
            turn_index: *turn_index,
            active: active_name.clone(),
            distance: *distance,
        });

        // Re-evaluate detection when the opponent entered the turn concealed
        let mut located = true;
        if opponent.concealed() {
            self.sink.emit(NarrationEvent::OpponentConcealed {
                unit: opponent_name.clone(),
            });
            let check = search_check(active, opponent, &mut *self.rolls);
            self.sink.emit(NarrationEvent::SearchResolved {
                searcher: active_name.clone(),
                target: opponent_name.clone(),
                check,
            });
            located = check.detected;
        }

        if status_at_start == Status::Stunned {
            // Stunned: shield/stealth toggles only
            self.sink.emit(NarrationEvent::StunnedNoAction {
                unit: active_name.clone(),
            });
            toggle_phase(active, &mut *self.provider, &mut *self.sink);
        } else {
            let mut did_move = false;

            if status_at_start == Status::Dazed {
                self.sink.emit(NarrationEvent::DazedRestriction {
                    unit: active_name.clone(),
                });
                let action = self.provider.dazed_action(&DazedActionRequest {
                    unit: active_name.clone(),
                    distance: *distance,
                });
                if action == DazedAction::Move {
                    did_move = movement_phase(
                        active,
                        opponent,
                        distance,
                        environment,
                        &mut located,
                        &mut *self.provider,
                        &mut *self.sink,
                        &mut *self.rolls,
                    );
                }
            } else {
                did_move = movement_phase(
                    active,
                    opponent,
                    distance,
                    environment,
                    &mut located,
                    &mut *self.provider,
                    &mut *self.sink,
                    &mut *self.rolls,
                );
            }

            toggle_phase(active, &mut *self.provider, &mut *self.sink);

            if active.shield_ready() {
                self.sink.emit(NarrationEvent::AttackForbiddenByShield {
                    unit: active_name.clone(),
                });
            } else if status_at_start == Status::Dazed && did_move {
                self.sink.emit(NarrationEvent::AttackSpentOnMovement {
                    unit: active_name.clone(),
                });
            } else {
                let band = range_band(*distance);
                match active.capabilities.attack_rank(band) {
                    None => {
                        // Unreachable range is a defined no-op, not an error
                        self.sink.emit(NarrationEvent::OutOfReach {
                            unit: active_name.clone(),
                            band,
                        });
                    }
                    Some(damage_rank) => {
                        let wants_attack = self.provider.attack(&AttackRequest {
                            unit: active_name.clone(),
                            target: opponent_name.clone(),
                            band,
                            target_unlocated: opponent.concealed() && !located,
                        });
                        if wants_attack {
                            self.sink.emit(NarrationEvent::AttackLaunched {
                                attacker: active_name.clone(),
                                target: opponent_name.clone(),
                                band,
                            });
                            let outcome = resolve_attack(
                                active,
                                opponent,
                                band,
                                damage_rank,
                                located,
                                &mut *self.rolls,
                            );
                            self.sink.emit(NarrationEvent::AttackResolved {
                                attacker: active_name.clone(),
                                target: opponent_name.clone(),
                                outcome,
                            });
                        } else {
                            self.sink.emit(NarrationEvent::AttackDeclined {
                                unit: active_name.clone(),
                            });
                        }
                    }
                }
            }
        }

        // End-of-turn recovery, unless an attack outcome already overrode it
        if let Some(next) = end_of_turn_recovery(status_at_start, active.status()) {
            active.set_status(next);
            self.sink.emit(NarrationEvent::StatusRecovered {
                unit: active_name,
                from: status_at_start,
                to: next,
            });
        }

        self.sink.emit(NarrationEvent::TurnEnded {
            turn_index: *turn_index,
        });
        *turn_index += 1;
    }
}

/// Shield/stealth toggles, always available regardless of status.
fn toggle_phase(
    active: &mut Zoid,
    provider: &mut dyn DecisionProvider,
    sink: &mut dyn NarrationSink,
) {
    let request = ToggleRequest {
        unit: active.name().to_string(),
        shield_available: active.has_shield(),
        shield_active: active.shield_active(),
        stealth_available: active.has_concealment(),
        stealth_active: active.concealment_active(),
    };
    let choice = provider.toggles(&request);

    if choice.toggle_shield && active.has_shield() {
        active.toggle_shield();
        sink.emit(NarrationEvent::ShieldToggled {
            unit: active.name().to_string(),
            active: active.shield_active(),
        });
    }
    if choice.toggle_stealth && active.has_concealment() {
        active.toggle_concealment();
        sink.emit(NarrationEvent::StealthToggled {
            unit: active.name().to_string(),
            active: active.concealment_active(),
        });
    }
}

/// Movement phase. Returns whether the unit actually moved, and updates
/// `located` if a blind probe earned a fresh search check.
#[allow(clippy::too_many_arguments)]
fn movement_phase(
    active: &mut Zoid,
    opponent: &Zoid,
    distance: &mut f64,
    environment: Environment,
    located: &mut bool,
    provider: &mut dyn DecisionProvider,
    sink: &mut dyn NarrationSink,
    rolls: &mut dyn RollSource,
) -> bool {
    let speed = active.speed(environment);
    let unit = active.name().to_string();

    if !*located {
        let request = BlindMovementRequest {
            unit: unit.clone(),
            distance: *distance,
            probe_speed: speed * BLIND_PROBE_SPEED_FACTOR,
        };
        return match provider.blind_movement(&request) {
            BlindMovementChoice::Probe => {
                let kind = if rolls.coin_flip() {
                    *distance = close_in(*distance, request.probe_speed);
                    MovementKind::Closed
                } else {
                    *distance = retreat(*distance, request.probe_speed);
                    MovementKind::Retreated
                };
                sink.emit(NarrationEvent::BlindProbe {
                    unit: unit.clone(),
                    kind,
                    distance_after: *distance,
                });
                let check = search_check(active, opponent, rolls);
                sink.emit(NarrationEvent::SearchResolved {
                    searcher: unit,
                    target: opponent.name().to_string(),
                    check,
                });
                *located = check.detected;
                true
            }
            BlindMovementChoice::StandStill => {
                sink.emit(NarrationEvent::HeldPosition { unit });
                false
            }
        };
    }

    loop {
        let max_circle_degrees = max_circling_angle(speed, *distance);
        let request = MovementRequest {
            unit: unit.clone(),
            distance: *distance,
            speed,
            max_circle_degrees,
        };
        match provider.movement(&request) {
            MovementChoice::Close => {
                *distance = close_in(*distance, speed);
                sink.emit(NarrationEvent::Moved {
                    unit,
                    kind: MovementKind::Closed,
                    distance_after: *distance,
                });
                return true;
            }
            MovementChoice::Retreat => {
                *distance = retreat(*distance, speed);
                sink.emit(NarrationEvent::Moved {
                    unit,
                    kind: MovementKind::Retreated,
                    distance_after: *distance,
                });
                return true;
            }
            MovementChoice::Circle { direction, degrees } => {
                if !degrees.is_finite() || degrees < 0.0 || degrees > max_circle_degrees {
                    sink.emit(NarrationEvent::DecisionRejected {
                        unit: unit.clone(),
                        reason: format!(
                            "circling angle {degrees} outside 0..={max_circle_degrees:.1}"
                        ),
                    });
                    continue;
                }
                active.set_facing(circled_facing(active.facing(), degrees, direction));
                sink.emit(NarrationEvent::Circled {
                    unit,
                    direction,
                    degrees,
                    facing_after: active.facing(),
                });
                return true;
            }
            MovementChoice::StandStill => {
                sink.emit(NarrationEvent::HeldPosition { unit });
                return false;
            }
        }
    }
}
