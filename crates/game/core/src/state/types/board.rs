//! Runtime board contents: terrain, damageable walls, pickups, and the exit.
use std::collections::BTreeMap;

use super::{EntityId, Position};
use crate::env::{MapDimensions, TerrainKind};

/// Damageable wall. Removed from the board once integrity reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallState {
    pub id: EntityId,
    pub integrity: u32,
}

/// Consumable lying on a floor cell. Never blocks movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Pickup {
    Food,
    Soda,
}

/// Board layout for the current level.
///
/// Cells without an explicit terrain entry are floor. Anything outside
/// [`MapDimensions`] reads as `None`, which movement treats like solid terrain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    dimensions: MapDimensions,
    terrain: BTreeMap<Position, TerrainKind>,
    walls: BTreeMap<Position, WallState>,
    pickups: BTreeMap<Position, Pickup>,
    exit: Option<Position>,
}

impl Board {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    /// Terrain at `position`, or `None` outside the board.
    pub fn terrain(&self, position: Position) -> Option<TerrainKind> {
        if !self.contains(position) {
            return None;
        }
        Some(
            self.terrain
                .get(&position)
                .copied()
                .unwrap_or(TerrainKind::Floor),
        )
    }

    pub fn set_terrain(&mut self, position: Position, kind: TerrainKind) {
        match kind {
            TerrainKind::Floor => {
                self.terrain.remove(&position);
            }
            _ => {
                self.terrain.insert(position, kind);
            }
        }
    }

    pub fn place_wall(&mut self, position: Position, wall: WallState) {
        self.walls.insert(position, wall);
    }

    pub fn wall_at(&self, position: Position) -> Option<&WallState> {
        self.walls.get(&position)
    }

    /// Looks a wall up by handle.
    pub fn wall(&self, id: EntityId) -> Option<(Position, &WallState)> {
        self.walls
            .iter()
            .find(|(_, wall)| wall.id == id)
            .map(|(position, wall)| (*position, wall))
    }

    /// Applies `amount` damage to the wall and returns its remaining integrity.
    ///
    /// A wall that reaches zero is removed in the same call. Returns `None`
    /// when no wall carries `id`.
    pub fn damage_wall(&mut self, id: EntityId, amount: u32) -> Option<u32> {
        let (position, _) = self.wall(id)?;
        let wall = self.walls.get_mut(&position)?;
        wall.integrity = wall.integrity.saturating_sub(amount);
        let remaining = wall.integrity;
        if remaining == 0 {
            self.walls.remove(&position);
        }
        Some(remaining)
    }

    pub fn place_pickup(&mut self, position: Position, pickup: Pickup) {
        self.pickups.insert(position, pickup);
    }

    pub fn pickup_at(&self, position: Position) -> Option<Pickup> {
        self.pickups.get(&position).copied()
    }

    /// Removes and returns the pickup at `position`.
    pub fn take_pickup(&mut self, position: Position) -> Option<Pickup> {
        self.pickups.remove(&position)
    }

    pub fn set_exit(&mut self, position: Position) {
        self.exit = Some(position);
    }

    pub fn exit(&self) -> Option<Position> {
        self.exit
    }

    pub fn is_exit(&self, position: Position) -> bool {
        self.exit == Some(position)
    }

    /// Whether anything static already occupies the cell.
    pub fn is_cell_taken(&self, position: Position) -> bool {
        self.walls.contains_key(&position)
            || self.pickups.contains_key(&position)
            || self.is_exit(position)
            || self
                .terrain(position)
                .is_some_and(|terrain| !terrain.is_passable())
    }
}
