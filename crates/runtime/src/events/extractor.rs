//! Event extraction from engine step output.
//!
//! Converts the low-level [`StepEvent`]s and [`MoveResolution`]s returned by
//! game-core into topic events for the bus.

use game_core::{Interaction, MoveOutcome, MoveResolution, StepEvent};

use super::bus::Event;
use super::types::{GameStateEvent, LevelEvent, TurnEvent};

/// Events describing a single resolved move.
///
/// The move itself comes first, followed by whatever the mover's policy did
/// in reaction to it.
pub fn resolution_events(resolution: &MoveResolution) -> Vec<GameStateEvent> {
    let mut events = vec![GameStateEvent::from_resolution(resolution)];

    match resolution.interaction {
        Interaction::None | Interaction::ExitReached => {}
        Interaction::WallChopped { wall, remaining } => {
            events.push(GameStateEvent::WallDamaged { wall, remaining });
        }
        Interaction::PickupConsumed { pickup, gained } => {
            if let MoveOutcome::Moved { to, .. } = resolution.outcome {
                events.push(GameStateEvent::PickupConsumed {
                    pickup,
                    position: to,
                    gained,
                    food: resolution.food_after,
                });
            }
        }
        Interaction::PlayerAttacked { damage } => {
            events.push(GameStateEvent::PlayerAttacked {
                enemy: resolution.actor,
                damage,
                food: resolution.food_after,
            });
        }
    }

    events
}

/// Maps engine step events onto bus events, preserving order.
pub fn extract_events(steps: &[StepEvent]) -> Vec<Event> {
    let mut events = Vec::with_capacity(steps.len());

    for step in steps {
        match step {
            StepEvent::PhaseChanged { from, to, round } => {
                events.push(Event::Turn(TurnEvent::PhaseChanged {
                    from: *from,
                    to: *to,
                    round: *round,
                }));
            }
            StepEvent::EnemyActed(resolution) => {
                events.extend(
                    resolution_events(resolution)
                        .into_iter()
                        .map(Event::GameState),
                );
            }
            StepEvent::RoundStarted { round } => {
                events.push(Event::Level(LevelEvent::RoundStarted { round: *round }));
            }
            StepEvent::LevelCompleted { round } => {
                events.push(Event::Level(LevelEvent::LevelCompleted { round: *round }));
            }
            StepEvent::GameOver { round, food } => {
                events.push(Event::Level(LevelEvent::GameOver {
                    round: *round,
                    food: *food,
                }));
            }
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use game_core::{Direction, EntityId, Obstacle, Pickup, Position, TurnState};

    use super::*;
    use crate::events::Topic;

    #[test]
    fn pickup_follows_the_player_move() {
        let resolution = MoveResolution {
            actor: EntityId::PLAYER,
            direction: Direction::Up,
            outcome: MoveOutcome::Moved {
                from: Position::new(1, 1),
                to: Position::new(1, 2),
            },
            interaction: Interaction::PickupConsumed {
                pickup: Pickup::Food,
                gained: 10,
            },
            food_after: 19,
        };

        let events = resolution_events(&resolution);

        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], GameStateEvent::PlayerMoved { food: 19, .. }));
        assert_eq!(
            events[1],
            GameStateEvent::PickupConsumed {
                pickup: Pickup::Food,
                position: Position::new(1, 2),
                gained: 10,
                food: 19,
            }
        );
    }

    #[test]
    fn enemy_attack_is_reported_after_the_step() {
        let enemy = EntityId(4);
        let steps = vec![
            StepEvent::EnemyActed(MoveResolution {
                actor: enemy,
                direction: Direction::Left,
                outcome: MoveOutcome::Blocked(Obstacle::Actor(EntityId::PLAYER)),
                interaction: Interaction::PlayerAttacked { damage: 10 },
                food_after: 5,
            }),
            StepEvent::PhaseChanged {
                from: TurnState::ActorsActing,
                to: TurnState::PlayerTurn,
                round: 3,
            },
        ];

        let events = extract_events(&steps);

        let topics: Vec<_> = events.iter().map(Event::topic).collect();
        assert_eq!(topics, vec![Topic::GameState, Topic::GameState, Topic::Turn]);
        assert!(matches!(
            &events[1],
            Event::GameState(GameStateEvent::PlayerAttacked { damage: 10, food: 5, .. })
        ));
        assert!(matches!(
            &events[2],
            Event::Turn(TurnEvent::PhaseChanged { round: 3, .. })
        ));
    }

    #[test]
    fn level_milestones_map_to_level_topic() {
        let steps = vec![
            StepEvent::LevelCompleted { round: 2 },
            StepEvent::RoundStarted { round: 3 },
            StepEvent::GameOver { round: 3, food: 0 },
        ];

        let events = extract_events(&steps);

        assert!(events.iter().all(|event| event.topic() == Topic::Level));
        assert_eq!(
            events[2],
            Event::Level(LevelEvent::GameOver { round: 3, food: 0 })
        );
    }
}
