//! Registry invariants under arbitrary gesture sequences
//!
//! Drives the registry with random place, move and remove gestures and
//! checks the zone invariants that every other layer relies on: an instance
//! lives in at most one zone, and derived sort orders are always the gapless
//! 0..n of the zone's visual order.

use pagecanvas::builder::BlockRegistry;
use pagecanvas::shared::{BlockInstance, BlockType};
use proptest::prelude::*;
use std::collections::HashSet;

const ZONES: [&str; 3] = ["zone-A", "zone-B", "zone-C"];

#[derive(Debug, Clone)]
enum Gesture {
    Place {
        zone: usize,
        instance_id: i64,
        index: usize,
    },
    Move {
        from: usize,
        to: usize,
        instance_id: i64,
        index: usize,
    },
    Remove {
        zone: usize,
        instance_id: i64,
    },
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        (0..3usize, 1..20i64, 0..8usize).prop_map(|(zone, instance_id, index)| Gesture::Place {
            zone,
            instance_id,
            index,
        }),
        (0..3usize, 0..3usize, 1..20i64, 0..8usize).prop_map(
            |(from, to, instance_id, index)| Gesture::Move {
                from,
                to,
                instance_id,
                index,
            }
        ),
        (0..3usize, 1..20i64).prop_map(|(zone, instance_id)| Gesture::Remove {
            zone,
            instance_id,
        }),
    ]
}

fn block(instance_id: i64) -> BlockInstance {
    BlockInstance {
        instance_id,
        template_id: Some(9),
        block_type: BlockType::Template,
        shared_block_id: None,
        html_content: String::new(),
        css_content: String::new(),
        js_content: String::new(),
        instance_name: format!("Block {}", instance_id),
    }
}

fn apply(registry: &mut BlockRegistry, gestures: &[Gesture]) {
    for gesture in gestures {
        match gesture {
            Gesture::Place {
                zone,
                instance_id,
                index,
            } => {
                registry.place_block(ZONES[*zone], block(*instance_id), Some(*index));
            }
            Gesture::Move {
                from,
                to,
                instance_id,
                index,
            } => {
                registry.move_block(ZONES[*from], ZONES[*to], *instance_id, *index);
            }
            Gesture::Remove { zone, instance_id } => {
                registry.remove_block(ZONES[*zone], *instance_id);
            }
        }
    }
}

proptest! {
    #[test]
    fn test_no_instance_ever_appears_in_two_zones(gestures in prop::collection::vec(gesture(), 0..40)) {
        let mut registry = BlockRegistry::with_zones(ZONES);
        apply(&mut registry, &gestures);

        let mut seen = HashSet::new();
        for zone in ZONES {
            for block in registry.zone_blocks(zone).unwrap() {
                prop_assert!(
                    seen.insert(block.instance_id),
                    "instance {} appears in more than one zone",
                    block.instance_id
                );
            }
        }
        prop_assert_eq!(seen.len(), registry.len());
    }

    #[test]
    fn test_reindex_is_always_gapless_and_ordered(gestures in prop::collection::vec(gesture(), 0..40)) {
        let mut registry = BlockRegistry::with_zones(ZONES);
        apply(&mut registry, &gestures);

        for zone in ZONES {
            let blocks = registry.zone_blocks(zone).unwrap();
            let reindexed = registry.reindex(zone);
            prop_assert_eq!(reindexed.len(), blocks.len());
            for (position, (instance_id, sort_order)) in reindexed.iter().enumerate() {
                prop_assert_eq!(*sort_order, position);
                prop_assert_eq!(*instance_id, blocks[position].instance_id);
            }
        }
    }

    #[test]
    fn test_find_agrees_with_zone_contents(gestures in prop::collection::vec(gesture(), 0..40)) {
        let mut registry = BlockRegistry::with_zones(ZONES);
        apply(&mut registry, &gestures);

        for zone in ZONES {
            for (index, block) in registry.zone_blocks(zone).unwrap().iter().enumerate() {
                let (found_zone, found_index, _) = registry.find(block.instance_id).unwrap();
                prop_assert_eq!(found_zone, zone);
                prop_assert_eq!(found_index, index);
            }
        }
    }
}
