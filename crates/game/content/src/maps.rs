//! Hunting-ground catalog.

/// A map a character can hunt on. `min_level` gates entry; the
/// recommended level is advisory only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapInfo {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub min_level: u8,
    pub recommended_level: u8,
}

pub const MAPS: [MapInfo; 6] = [
    MapInfo {
        id: 1,
        name: "The Forest of Eldoria",
        description: "A lush forest teeming with life, where ancient trees and mystical creatures dwell.",
        min_level: 1,
        recommended_level: 1,
    },
    MapInfo {
        id: 2,
        name: "The Desert of Kalandra",
        description: "A vast desert with endless sand dunes and towering sand giants.",
        min_level: 2,
        recommended_level: 4,
    },
    MapInfo {
        id: 3,
        name: "The Mountains of Aethel",
        description: "A towering mountain range with snow-capped peaks and icy winds.",
        min_level: 5,
        recommended_level: 8,
    },
    MapInfo {
        id: 4,
        name: "The Swamp of Mire",
        description: "A swampland filled with mud and mosquitoes, where the air is thick with humidity.",
        min_level: 10,
        recommended_level: 12,
    },
    MapInfo {
        id: 5,
        name: "The Plains of Arathia",
        description: "A vast plain with rolling hills and scattered trees, where the air is clear and the sky is blue.",
        min_level: 12,
        recommended_level: 15,
    },
    MapInfo {
        id: 6,
        name: "The City of Eldoria",
        description: "A bustling city filled with people and buildings, where the air is filled with the smell of smoke and the sound of traffic.",
        min_level: 17,
        recommended_level: 20,
    },
];

/// Look a map up by id.
pub fn map(id: u32) -> Option<&'static MapInfo> {
    MAPS.iter().find(|map| map.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_are_ordered_by_difficulty() {
        for pair in MAPS.windows(2) {
            assert!(pair[0].min_level <= pair[1].min_level);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(map(3).unwrap().name, "The Mountains of Aethel");
        assert!(map(42).is_none());
    }
}
