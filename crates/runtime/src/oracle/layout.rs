//! Text board layouts served through [`game_core::BoardSetup`].
//!
//! One character per cell, top line is the highest row:
//!
//! | char | cell |
//! |------|------|
//! | `#`  | outer wall (impassable, indestructible) |
//! | `.`  | floor |
//! | `W`  | damageable wall |
//! | `P`  | player spawn |
//! | `e`  | enemy (light attack) |
//! | `E`  | enemy (heavy attack) |
//! | `F`  | food |
//! | `S`  | soda |
//! | `X`  | exit |
//!
//! Levels are separated by blank lines. Round `n` uses level `(n - 1) % count`.
use std::time::Duration;

use game_core::{
    BoardSetup, EnemyState, GameConfig, LevelBuilder, MapDimensions, Pickup, Position,
    SetupError, SetupStatus, TerrainKind,
};
use thiserror::Error;

/// Two small arenas used when no layout file is configured.
pub const DEFAULT_LAYOUT: &str = "\
##########
#......FX#
#.W..E...#
#...W..S.#
#.e......#
#..W..W..#
#......e.#
#.F..W...#
#P.......#
##########

##########
#.....W.X#
#.E..W...#
#..F...e.#
#.W..S...#
#....W.W.#
#.e......#
#..W..F..#
#P...W...#
##########
";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout contains no levels")]
    Empty,

    #[error("level {level}, line {line}: expected {expected} cells, found {found}")]
    Ragged {
        level: usize,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("level {level}, line {line}, column {column}: unknown tile {tile:?}")]
    UnknownTile {
        level: usize,
        line: usize,
        column: usize,
        tile: char,
    },

    #[error("level {level} must have exactly one player spawn, found {found}")]
    PlayerSpawn { level: usize, found: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cell {
    Floor,
    OuterWall,
    Wall,
    Player,
    Enemy { heavy: bool },
    Pickup(Pickup),
    Exit,
}

impl Cell {
    fn parse(tile: char) -> Option<Self> {
        let cell = match tile {
            '.' => Cell::Floor,
            '#' => Cell::OuterWall,
            'W' => Cell::Wall,
            'P' => Cell::Player,
            'e' => Cell::Enemy { heavy: false },
            'E' => Cell::Enemy { heavy: true },
            'F' => Cell::Pickup(Pickup::Food),
            'S' => Cell::Pickup(Pickup::Soda),
            'X' => Cell::Exit,
            _ => return None,
        };
        Some(cell)
    }
}

#[derive(Clone, Debug)]
struct LevelLayout {
    dimensions: MapDimensions,
    cells: Vec<(Position, Cell)>,
}

/// BoardSetup implementation backed by parsed text layouts.
///
/// Layouts are immutable once parsed; every reload rebuilds the level from
/// scratch.
#[derive(Clone, Debug)]
pub struct LayoutBoard {
    levels: Vec<LevelLayout>,
    light_attack: i32,
    heavy_attack: i32,
    enemy_pace: Duration,
}

impl LayoutBoard {
    pub const DEFAULT_WALL_INTEGRITY: u32 = 3;
    pub const DEFAULT_LIGHT_ATTACK: i32 = 10;
    pub const DEFAULT_HEAVY_ATTACK: i32 = 20;

    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut levels = Vec::new();
        let mut block: Vec<&str> = Vec::new();

        for line in text.lines().map(str::trim_end) {
            if line.is_empty() {
                if !block.is_empty() {
                    levels.push(parse_level(levels.len(), &block)?);
                    block.clear();
                }
            } else {
                block.push(line);
            }
        }
        if !block.is_empty() {
            levels.push(parse_level(levels.len(), &block)?);
        }

        if levels.is_empty() {
            return Err(LayoutError::Empty);
        }

        Ok(Self {
            levels,
            light_attack: Self::DEFAULT_LIGHT_ATTACK,
            heavy_attack: Self::DEFAULT_HEAVY_ATTACK,
            enemy_pace: GameConfig::DEFAULT_ENEMY_PACE,
        })
    }

    /// The built-in two-level layout.
    pub fn default_layout() -> Result<Self, LayoutError> {
        Self::parse(DEFAULT_LAYOUT)
    }

    pub fn with_enemy_pace(mut self, pace: Duration) -> Self {
        self.enemy_pace = pace;
        self
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Dimensions of the first level, used to size the initial board.
    pub fn dimensions(&self) -> MapDimensions {
        self.levels
            .first()
            .map(|level| level.dimensions)
            .unwrap_or_default()
    }

    fn level_for_round(&self, round: u32) -> Option<&LevelLayout> {
        if self.levels.is_empty() {
            return None;
        }
        let index = round.saturating_sub(1) as usize % self.levels.len();
        self.levels.get(index)
    }
}

fn parse_level(level: usize, lines: &[&str]) -> Result<LevelLayout, LayoutError> {
    let width = lines.first().map_or(0, |line| line.chars().count());
    let height = lines.len();
    let mut cells = Vec::new();
    let mut spawns = 0;

    for (line_index, line) in lines.iter().enumerate() {
        let found = line.chars().count();
        if found != width {
            return Err(LayoutError::Ragged {
                level,
                line: line_index + 1,
                expected: width,
                found,
            });
        }

        let y = (height - 1 - line_index) as i32;
        for (column, tile) in line.chars().enumerate() {
            let cell = Cell::parse(tile).ok_or(LayoutError::UnknownTile {
                level,
                line: line_index + 1,
                column: column + 1,
                tile,
            })?;
            if cell == Cell::Player {
                spawns += 1;
            }
            if cell != Cell::Floor {
                cells.push((Position::new(column as i32, y), cell));
            }
        }
    }

    if spawns != 1 {
        return Err(LayoutError::PlayerSpawn {
            level,
            found: spawns,
        });
    }

    Ok(LevelLayout {
        dimensions: MapDimensions::new(width as u32, height as u32),
        cells,
    })
}

impl BoardSetup for LayoutBoard {
    fn setup_board(
        &self,
        round: u32,
        level: &mut LevelBuilder<'_>,
    ) -> Result<SetupStatus, SetupError> {
        let layout = self
            .level_for_round(round)
            .ok_or_else(|| SetupError::Collaborator {
                round,
                reason: "layout has no levels".to_string(),
            })?;

        level.resize(layout.dimensions)?;
        for &(position, cell) in &layout.cells {
            match cell {
                Cell::Floor => {}
                Cell::OuterWall => level.set_terrain(position, TerrainKind::OuterWall)?,
                Cell::Wall => {
                    level.place_wall(position, Self::DEFAULT_WALL_INTEGRITY)?;
                }
                Cell::Player => level.place_player(position)?,
                Cell::Enemy { heavy } => {
                    let damage = if heavy {
                        self.heavy_attack
                    } else {
                        self.light_attack
                    };
                    level.register_enemy(EnemyState::new(position, damage, self.enemy_pace))?;
                }
                Cell::Pickup(pickup) => level.place_pickup(position, pickup)?,
                Cell::Exit => level.place_exit(position)?,
            }
        }

        Ok(SetupStatus::Ready)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{GameState, LevelLifecycle, TurnState};

    use super::*;

    #[test]
    fn default_layout_parses_two_levels() {
        let board = LayoutBoard::default_layout().unwrap();

        assert_eq!(board.level_count(), 2);
        assert_eq!(board.dimensions(), MapDimensions::new(10, 10));
    }

    #[test]
    fn top_line_is_the_highest_row() {
        let board = LayoutBoard::parse("X.\n.P\n").unwrap();
        let mut state = GameState::new(GameConfig::default(), board.dimensions());

        LevelLifecycle::new(&mut state).begin_level(&board).unwrap();

        assert_eq!(state.player.position(), Position::new(1, 0));
        assert_eq!(state.board.exit(), Some(Position::new(0, 1)));
    }

    #[test]
    fn layout_populates_board_and_registry_in_reading_order() {
        let board = LayoutBoard::parse("#####\n#E.e#\n#PWF#\n#####\n")
            .unwrap()
            .with_enemy_pace(Duration::from_millis(40));
        let mut state = GameState::new(GameConfig::default(), board.dimensions());

        LevelLifecycle::new(&mut state).begin_level(&board).unwrap();

        let enemies: Vec<_> = state
            .round
            .registry
            .iter()
            .map(|enemy| (enemy.position(), enemy.attack_damage, enemy.actor.move_pace))
            .collect();
        assert_eq!(
            enemies,
            vec![
                (Position::new(1, 2), 20, Duration::from_millis(40)),
                (Position::new(3, 2), 10, Duration::from_millis(40)),
            ]
        );
        assert_eq!(
            state.board.wall_at(Position::new(2, 1)).map(|wall| wall.integrity),
            Some(LayoutBoard::DEFAULT_WALL_INTEGRITY)
        );
        assert_eq!(state.board.pickup_at(Position::new(3, 1)), Some(Pickup::Food));
        assert_eq!(
            state.board.terrain(Position::new(0, 0)),
            Some(TerrainKind::OuterWall)
        );
        assert_eq!(state.turn.state, TurnState::Setup);
    }

    #[test]
    fn rounds_cycle_through_levels() {
        let board = LayoutBoard::parse("P.\n\n.P\n").unwrap();
        let mut state = GameState::new(GameConfig::default(), board.dimensions());
        let mut lifecycle = LevelLifecycle::new(&mut state);

        lifecycle.begin_level(&board).unwrap();
        lifecycle.reload_level(&board).unwrap();
        lifecycle.reload_level(&board).unwrap();

        assert_eq!(state.round.round_number, 3);
        assert_eq!(state.player.position(), Position::new(0, 0));
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        assert_eq!(LayoutBoard::parse("\n\n").unwrap_err(), LayoutError::Empty);
        assert_eq!(
            LayoutBoard::parse("P..\n..\n").unwrap_err(),
            LayoutError::Ragged {
                level: 0,
                line: 2,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            LayoutBoard::parse("P?\n").unwrap_err(),
            LayoutError::UnknownTile {
                level: 0,
                line: 1,
                column: 2,
                tile: '?'
            }
        );
        assert_eq!(
            LayoutBoard::parse("P.\n\n..\n").unwrap_err(),
            LayoutError::PlayerSpawn { level: 1, found: 0 }
        );
    }
}
