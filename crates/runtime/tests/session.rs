//! Session scenarios driven through the runtime handle under virtual time.
use std::time::Duration;

use game_core::{
    Direction, EnemyState, GameConfig, MoveError, MoveOutcome, Position, TurnError, TurnState,
};
use runtime::{
    Event, GameStateEvent, LayoutBoard, LevelEvent, Runtime, RuntimeError, RuntimeHandle, Topic,
    TurnEvent,
};
use tokio::sync::broadcast;

fn game_config() -> GameConfig {
    GameConfig::default()
        .with_level_start_delay(Duration::from_millis(200))
        .with_turn_delay(Duration::from_millis(100))
        .with_restart_level_delay(Duration::from_millis(300))
}

async fn start(layout: &str, config: GameConfig) -> Runtime {
    let board = LayoutBoard::parse(layout)
        .expect("layout should parse")
        .with_enemy_pace(Duration::from_millis(50));

    Runtime::builder()
        .game_config(config)
        .tick_interval(Duration::from_millis(10))
        .board_setup(board)
        .build()
        .await
        .expect("runtime should build")
}

async fn wait_for_turn(handle: &RuntimeHandle, expected: TurnState) {
    tokio::time::timeout(Duration::from_secs(30), async {
        loop {
            if handle.current_turn_state().await.unwrap() == expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for turn state");
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test(start_paused = true)]
async fn player_and_enemies_alternate_turns() {
    let runtime = start(".....\nP...e\n", game_config()).await;
    let handle = runtime.handle();
    let mut game_rx = handle.subscribe(Topic::GameState);
    let mut turn_rx = handle.subscribe(Topic::Turn);

    wait_for_turn(&handle, TurnState::PlayerTurn).await;

    let report = handle.attempt_player_move(Direction::Up).await.unwrap();
    assert_eq!(
        report.resolution.outcome,
        MoveOutcome::Moved {
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        }
    );
    assert_eq!(
        handle.current_turn_state().await.unwrap(),
        TurnState::ActorsActing
    );

    let stale = handle.attempt_player_move(Direction::Up).await.unwrap_err();
    assert!(stale.is_stale_turn());

    wait_for_turn(&handle, TurnState::PlayerTurn).await;

    let state = handle.query_state().await.unwrap();
    assert_eq!(state.player.position(), Position::new(0, 1));
    assert_eq!(state.player.food, 99);
    assert_eq!(state.round.registry[0].position(), Position::new(3, 0));

    let game_events = drain(&mut game_rx);
    assert!(matches!(
        game_events.as_slice(),
        [
            Event::GameState(GameStateEvent::PlayerMoved { food: 99, .. }),
            Event::GameState(GameStateEvent::AttemptRejected {
                state: TurnState::ActorsActing,
                ..
            }),
            Event::GameState(GameStateEvent::EnemyActed { .. }),
        ]
    ));

    let phases: Vec<_> = drain(&mut turn_rx)
        .into_iter()
        .filter_map(|event| match event {
            Event::Turn(TurnEvent::PhaseChanged { to, .. }) => Some(to),
            _ => None,
        })
        .collect();
    assert_eq!(
        phases,
        vec![
            TurnState::PlayerTurn,
            TurnState::ActorsActing,
            TurnState::PlayerTurn
        ]
    );

    drop(game_rx);
    drop(turn_rx);
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn starving_ends_the_session() {
    let runtime = start("P..\n", game_config().with_starting_food(1)).await;
    let handle = runtime.handle();
    let mut level_rx = handle.subscribe(Topic::Level);

    wait_for_turn(&handle, TurnState::PlayerTurn).await;
    handle.attempt_player_move(Direction::Right).await.unwrap();

    assert!(handle.is_game_over().await.unwrap());
    assert_eq!(handle.player_food().await.unwrap(), 0);
    assert_eq!(
        drain(&mut level_rx),
        vec![Event::Level(LevelEvent::GameOver { round: 1, food: 0 })]
    );

    let error = handle.attempt_player_move(Direction::Left).await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Turn(TurnError::StaleTurnAttempt {
            state: TurnState::GameOver,
            ..
        })
    ));

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(
        handle.current_turn_state().await.unwrap(),
        TurnState::GameOver
    );
    assert_eq!(handle.current_round().await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn reaching_the_exit_starts_the_next_round() {
    let runtime = start("PX\n", game_config()).await;
    let handle = runtime.handle();
    let mut level_rx = handle.subscribe(Topic::Level);

    wait_for_turn(&handle, TurnState::PlayerTurn).await;
    handle.attempt_player_move(Direction::Right).await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        while handle.current_round().await.unwrap() < 2 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("level should reload");
    wait_for_turn(&handle, TurnState::PlayerTurn).await;

    let status = handle.status().await.unwrap();
    assert_eq!(status.round, 2);
    assert_eq!(status.food, 99);
    assert!(!status.game_over);
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.player.position(), Position::new(0, 0));
    assert!(state.player.enabled);

    assert_eq!(
        drain(&mut level_rx),
        vec![
            Event::Level(LevelEvent::LevelCompleted { round: 1 }),
            Event::Level(LevelEvent::RoundStarted { round: 2 }),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn registering_enemies_through_the_handle() {
    let runtime = start("P...\n....\n", game_config()).await;
    let handle = runtime.handle();

    let id = handle
        .register_enemy(EnemyState::new(
            Position::new(3, 1),
            5,
            Duration::from_millis(20),
        ))
        .await
        .unwrap();
    let error = handle
        .register_enemy(EnemyState::new(Position::new(9, 9), 5, Duration::ZERO))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Turn(TurnError::InvalidMove(MoveError::OutOfBounds { .. }))
    ));
    let occupied = handle
        .register_enemy(EnemyState::new(Position::new(0, 1), 5, Duration::ZERO))
        .await
        .unwrap_err();
    assert!(matches!(
        occupied,
        RuntimeError::Turn(TurnError::CellTaken { position }) if position == Position::new(0, 1)
    ));
    let registry = handle.query_state().await.unwrap().round.registry;
    assert_eq!(registry.len(), 1);
    assert_eq!(registry[0].id(), id);
}

#[tokio::test(start_paused = true)]
async fn manual_reload_advances_the_round() {
    let runtime = start("P.\n\n.P\n", game_config()).await;
    let handle = runtime.handle();
    wait_for_turn(&handle, TurnState::PlayerTurn).await;

    handle.reload_level().await.unwrap();

    assert_eq!(handle.current_round().await.unwrap(), 2);
    assert_eq!(handle.current_turn_state().await.unwrap(), TurnState::Setup);
    let state = handle.query_state().await.unwrap();
    assert_eq!(state.player.position(), Position::new(1, 0));
}

#[tokio::test]
async fn build_requires_a_board_setup() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingBoardSetup)));
}
