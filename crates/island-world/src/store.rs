//! The world store: the single in-memory aggregate of every entity.
//!
//! [`World`] owns the canonical collections and exposes lookups and
//! mutation primitives. It enforces no business rules of its own; the
//! command processor and the scheduler validate before they mutate.
//!
//! `World` serializes to exactly the payload observers receive:
//! `creatures`, `tiles`, `fountains`, `pinkTrees`, `privateGardens`,
//! `messages`.

use std::collections::HashMap;

use island_types::{
    ChatMessage, Creature, CreatureId, Fountain, OwnerId, PinkTree, PrivateGarden, Tile,
};
use serde::Serialize;

use crate::error::WorldError;

/// The aggregate root holding all world state.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    /// Every creature, in creation order.
    creatures: Vec<Creature>,
    /// Terrain, generated once.
    tiles: Vec<Tile>,
    /// Fountains, addressed by index.
    fountains: Vec<Fountain>,
    /// Pink trees, addressed by index.
    pink_trees: Vec<PinkTree>,
    /// Claimed parcels, in claim order.
    private_gardens: Vec<PrivateGarden>,
    /// Recent speech bubble lines, oldest first.
    messages: Vec<ChatMessage>,
    /// Tile position lookup: `(x, y)` -> index into `tiles`.
    #[serde(skip)]
    tile_index: HashMap<(i32, i32), usize>,
}

impl World {
    /// Create a world from generated terrain and its starting creatures.
    pub fn new(tiles: Vec<Tile>, creatures: Vec<Creature>) -> Self {
        let tile_index = tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| ((tile.x, tile.y), i))
            .collect();
        Self {
            creatures,
            tiles,
            tile_index,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------
    // Creatures
    // -------------------------------------------------------------------

    /// All creatures.
    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// All creatures, mutably.
    pub fn creatures_mut(&mut self) -> &mut [Creature] {
        &mut self.creatures
    }

    /// Look up a creature by id.
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Look up a creature by id, mutably.
    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.id == id)
    }

    /// Borrow two distinct creatures mutably at once.
    ///
    /// Returns `None` if either is missing or both ids are the same.
    pub fn creature_pair_mut(
        &mut self,
        a: CreatureId,
        b: CreatureId,
    ) -> Option<(&mut Creature, &mut Creature)> {
        let i = self.creatures.iter().position(|c| c.id == a)?;
        let j = self.creatures.iter().position(|c| c.id == b)?;
        if i == j {
            return None;
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (left, right) = self.creatures.split_at_mut(hi);
        let low = left.get_mut(lo)?;
        let high = right.first_mut()?;
        if i < j {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    /// All creatures mutably, alongside the parcels that fence them in.
    pub fn creatures_and_gardens_mut(&mut self) -> (&mut [Creature], &[PrivateGarden]) {
        (&mut self.creatures, &self.private_gardens)
    }

    /// Add a creature.
    pub fn add_creature(&mut self, creature: Creature) {
        self.creatures.push(creature);
    }

    /// Remove a creature, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::CreatureNotFound`] if no creature has that id.
    pub fn remove_creature(&mut self, id: CreatureId) -> Result<Creature, WorldError> {
        let index = self
            .creatures
            .iter()
            .position(|c| c.id == id)
            .ok_or(WorldError::CreatureNotFound(id))?;
        Ok(self.creatures.remove(index))
    }

    // -------------------------------------------------------------------
    // Tiles
    // -------------------------------------------------------------------

    /// All terrain tiles.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The tile at `(x, y)`, if the island covers that cell.
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        let index = *self.tile_index.get(&(x, y))?;
        self.tiles.get(index)
    }

    /// The tile at `(x, y)`, mutably.
    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        let index = *self.tile_index.get(&(x, y))?;
        self.tiles.get_mut(index)
    }

    // -------------------------------------------------------------------
    // Fountains
    // -------------------------------------------------------------------

    /// All fountains.
    pub fn fountains(&self) -> &[Fountain] {
        &self.fountains
    }

    /// The fountain at `index`, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::FountainNotFound`] if the index is out of range.
    pub fn fountain_mut(&mut self, index: usize) -> Result<&mut Fountain, WorldError> {
        self.fountains
            .get_mut(index)
            .ok_or(WorldError::FountainNotFound(index))
    }

    /// Add a fountain.
    pub fn add_fountain(&mut self, fountain: Fountain) {
        self.fountains.push(fountain);
    }

    /// Remove the fountain at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::FountainNotFound`] if the index is out of range.
    pub fn remove_fountain(&mut self, index: usize) -> Result<Fountain, WorldError> {
        if index >= self.fountains.len() {
            return Err(WorldError::FountainNotFound(index));
        }
        Ok(self.fountains.remove(index))
    }

    // -------------------------------------------------------------------
    // Pink trees
    // -------------------------------------------------------------------

    /// All pink trees.
    pub fn pink_trees(&self) -> &[PinkTree] {
        &self.pink_trees
    }

    /// Add a pink tree.
    pub fn add_pink_tree(&mut self, tree: PinkTree) {
        self.pink_trees.push(tree);
    }

    /// Remove the pink tree at `index`, returning it.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::PinkTreeNotFound`] if the index is out of range.
    pub fn remove_pink_tree(&mut self, index: usize) -> Result<PinkTree, WorldError> {
        if index >= self.pink_trees.len() {
            return Err(WorldError::PinkTreeNotFound(index));
        }
        Ok(self.pink_trees.remove(index))
    }

    // -------------------------------------------------------------------
    // Gardens
    // -------------------------------------------------------------------

    /// All claimed gardens.
    pub fn gardens(&self) -> &[PrivateGarden] {
        &self.private_gardens
    }

    /// Add a claimed garden.
    pub fn add_garden(&mut self, garden: PrivateGarden) {
        self.private_gardens.push(garden);
    }

    /// The first garden claimed by `owner`, mutably.
    pub fn garden_owned_by_mut(&mut self, owner: &OwnerId) -> Option<&mut PrivateGarden> {
        self.private_gardens
            .iter_mut()
            .find(|g| &g.owner_id == owner)
    }

    // -------------------------------------------------------------------
    // Messages
    // -------------------------------------------------------------------

    /// The message log, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a message, dropping the oldest entries beyond `cap`.
    pub fn push_message(&mut self, message: ChatMessage, cap: usize) {
        self.messages.push(message);
        if self.messages.len() > cap {
            let drain_count = self.messages.len().saturating_sub(cap);
            self.messages.drain(..drain_count);
        }
    }
}
