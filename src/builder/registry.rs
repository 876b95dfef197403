//! Block Registry
//!
//! Tracks, for the page currently being edited, which block instance lives in
//! which placeholder zone and at what position. The order of a zone's
//! sequence is the visual top-to-bottom order, and it is the sole source of
//! truth for sort order: callers re-derive positions from the sequence at the
//! moment of a move instead of tracking them independently.
//!
//! Invariants:
//! - zone membership is exclusive: an `instance_id` never appears in two
//!   zones at once, so a cross-zone placement removes the id from its old
//!   zone in the same operation that inserts it into the new one
//! - removing an absent id is a no-op, never an error

use crate::shared::blocks::BlockInstance;

/// One named drop target holding an ordered list of block instances
#[derive(Debug, Clone, Default)]
pub struct Zone {
    pub id: String,
    pub blocks: Vec<BlockInstance>,
}

/// How a drag-end gesture changed the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Dropped back where it started; no structural change, no remote call
    Unchanged,
    /// Same zone, new index
    Reordered { zone: String, new_index: usize },
    /// Different zone
    Relocated {
        from: String,
        to: String,
        new_index: usize,
    },
    /// The instance was not in the source zone; nothing moved
    NotFound,
}

impl MoveOutcome {
    /// Whether the gesture requires a position update at the remote store
    pub fn needs_persist(&self) -> bool {
        matches!(self, Self::Reordered { .. } | Self::Relocated { .. })
    }

    /// Destination zone and index, when the gesture changed anything
    pub fn destination(&self) -> Option<(&str, usize)> {
        match self {
            Self::Reordered { zone, new_index } => Some((zone.as_str(), *new_index)),
            Self::Relocated { to, new_index, .. } => Some((to.as_str(), *new_index)),
            Self::Unchanged | Self::NotFound => None,
        }
    }
}

/// In-memory registry of zone contents for the open page
#[derive(Debug, Default)]
pub struct BlockRegistry {
    zones: Vec<Zone>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given zones, in layout order
    pub fn with_zones(zone_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            zones: zone_ids
                .into_iter()
                .map(|id| Zone {
                    id: id.into(),
                    blocks: Vec::new(),
                })
                .collect(),
        }
    }

    /// Drop all zones and their contents (page switch)
    pub fn reset(&mut self, zone_ids: impl IntoIterator<Item = impl Into<String>>) {
        *self = Self::with_zones(zone_ids);
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Blocks of one zone in visual order
    pub fn zone_blocks(&self, zone_id: &str) -> Option<&[BlockInstance]> {
        self.zones
            .iter()
            .find(|z| z.id == zone_id)
            .map(|z| z.blocks.as_slice())
    }

    fn zone_mut(&mut self, zone_id: &str) -> &mut Zone {
        // Zones normally come from the layout; an unknown id still gets a
        // zone so a drop into it is never lost.
        if let Some(pos) = self.zones.iter().position(|z| z.id == zone_id) {
            return &mut self.zones[pos];
        }
        self.zones.push(Zone {
            id: zone_id.to_string(),
            blocks: Vec::new(),
        });
        let last = self.zones.len() - 1;
        &mut self.zones[last]
    }

    /// Locate an instance anywhere in the registry
    ///
    /// Returns the zone id and the instance's current index within it.
    pub fn find(&self, instance_id: i64) -> Option<(&str, usize, &BlockInstance)> {
        for zone in &self.zones {
            if let Some(index) = zone.blocks.iter().position(|b| b.instance_id == instance_id) {
                return Some((zone.id.as_str(), index, &zone.blocks[index]));
            }
        }
        None
    }

    /// Mutable access to an instance by identity
    pub fn get_mut(&mut self, instance_id: i64) -> Option<&mut BlockInstance> {
        self.zones
            .iter_mut()
            .flat_map(|z| z.blocks.iter_mut())
            .find(|b| b.instance_id == instance_id)
    }

    /// Insert a block into a zone at `at_index` (end when `None`).
    ///
    /// If the instance already lives anywhere in the registry it is removed
    /// first, in the same operation, so the exclusivity invariant can never
    /// be observed broken.
    pub fn place_block(&mut self, zone_id: &str, block: BlockInstance, at_index: Option<usize>) {
        let instance_id = block.instance_id;
        for zone in &mut self.zones {
            zone.blocks.retain(|b| b.instance_id != instance_id);
        }
        let zone = self.zone_mut(zone_id);
        let index = at_index.unwrap_or(zone.blocks.len()).min(zone.blocks.len());
        zone.blocks.insert(index, block);
    }

    /// Remove a block by identity.
    ///
    /// Absent ids are a no-op; duplicate delete clicks must not error.
    pub fn remove_block(&mut self, zone_id: &str, instance_id: i64) -> Option<BlockInstance> {
        let zone = self.zones.iter_mut().find(|z| z.id == zone_id)?;
        let index = zone.blocks.iter().position(|b| b.instance_id == instance_id)?;
        Some(zone.blocks.remove(index))
    }

    /// Current `(instance_id, sort_order)` pairs for a zone.
    ///
    /// Sort order is the 0-based position in the sequence; this is what gets
    /// persisted remotely after a structural change.
    pub fn reindex(&self, zone_id: &str) -> Vec<(i64, usize)> {
        self.zone_blocks(zone_id)
            .map(|blocks| {
                blocks
                    .iter()
                    .enumerate()
                    .map(|(index, block)| (block.instance_id, index))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Apply a drag-end gesture and classify it.
    ///
    /// `to_index` is the index among the destination zone's children after
    /// the drop. A same-zone drop onto the current index is `Unchanged` and
    /// leaves the registry untouched.
    pub fn move_block(
        &mut self,
        from_zone: &str,
        to_zone: &str,
        instance_id: i64,
        to_index: usize,
    ) -> MoveOutcome {
        let from_index = match self
            .zone_blocks(from_zone)
            .and_then(|blocks| blocks.iter().position(|b| b.instance_id == instance_id))
        {
            Some(index) => index,
            None => return MoveOutcome::NotFound,
        };

        if from_zone == to_zone {
            let len = self
                .zone_blocks(to_zone)
                .map(|b| b.len())
                .unwrap_or_default();
            let new_index = to_index.min(len.saturating_sub(1));
            if new_index == from_index {
                return MoveOutcome::Unchanged;
            }
            let block = match self.remove_block(from_zone, instance_id) {
                Some(block) => block,
                None => return MoveOutcome::NotFound,
            };
            self.place_block(to_zone, block, Some(new_index));
            return MoveOutcome::Reordered {
                zone: to_zone.to_string(),
                new_index,
            };
        }

        let block = match self.remove_block(from_zone, instance_id) {
            Some(block) => block,
            None => return MoveOutcome::NotFound,
        };
        let len = self
            .zone_blocks(to_zone)
            .map(|b| b.len())
            .unwrap_or_default();
        let new_index = to_index.min(len);
        self.place_block(to_zone, block, Some(new_index));
        MoveOutcome::Relocated {
            from: from_zone.to_string(),
            to: to_zone.to_string(),
            new_index,
        }
    }

    /// Instance ids of every local block referencing a shared block
    pub fn instances_of_shared(&self, shared_block_id: i64) -> Vec<i64> {
        self.zones
            .iter()
            .flat_map(|z| z.blocks.iter())
            .filter(|b| b.shared_block_id == Some(shared_block_id))
            .map(|b| b.instance_id)
            .collect()
    }

    /// Run `apply` on every block referencing a shared block, returning the
    /// touched instance ids
    pub fn for_each_shared_mut(
        &mut self,
        shared_block_id: i64,
        mut apply: impl FnMut(&mut BlockInstance),
    ) -> Vec<i64> {
        let mut touched = Vec::new();
        for zone in &mut self.zones {
            for block in &mut zone.blocks {
                if block.shared_block_id == Some(shared_block_id) {
                    apply(block);
                    touched.push(block.instance_id);
                }
            }
        }
        touched
    }

    /// Total number of placed blocks across all zones
    pub fn len(&self) -> usize {
        self.zones.iter().map(|z| z.blocks.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
