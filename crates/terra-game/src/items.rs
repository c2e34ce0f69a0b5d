//! Item definitions.

use terra_player::WeaponStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemId {
    Wood,
    /// Seed of unknown origin; grows into a carrot.
    UnknownSeed,
    Carrot,
    Axe,
}

/// What an item does when held or used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemKind {
    Material,
    /// Plantable in a field; `crop` is the harvest it grows into.
    Seed { crop: ItemId },
    Food { hunger_restore: f32, health_restore: f32 },
    Weapon(WeaponStats),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ItemKind,
}

impl ItemId {
    pub const ALL: [ItemId; 4] = [ItemId::Wood, ItemId::UnknownSeed, ItemId::Carrot, ItemId::Axe];

    pub fn def(self) -> ItemDef {
        match self {
            ItemId::Wood => ItemDef {
                id: self,
                name: "Wood",
                description: "Basic building material.",
                kind: ItemKind::Material,
            },
            ItemId::UnknownSeed => ItemDef {
                id: self,
                name: "Mysterious Seed",
                description: "Nobody knows what will grow from it.",
                kind: ItemKind::Seed {
                    crop: ItemId::Carrot,
                },
            },
            ItemId::Carrot => ItemDef {
                id: self,
                name: "Space Carrot",
                description: "A nutritious space carrot.",
                kind: ItemKind::Food {
                    hunger_restore: 20.0,
                    health_restore: 5.0,
                },
            },
            ItemId::Axe => ItemDef {
                id: self,
                name: "Stone Axe",
                description: "A tool that can fell trees.",
                kind: ItemKind::Weapon(WeaponStats {
                    damage: 20.0,
                    attack_speed: 0.5,
                    range: 5.0,
                }),
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn weapon_stats(self) -> Option<WeaponStats> {
        match self.def().kind {
            ItemKind::Weapon(stats) => Some(stats),
            _ => None,
        }
    }

    /// Only axes can fell trees.
    pub fn fells_trees(self) -> bool {
        self == ItemId::Axe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axe_is_weapon() {
        let stats = ItemId::Axe.weapon_stats().unwrap();
        assert_eq!(stats.damage, 20.0);
        assert_eq!(stats.attack_speed, 0.5);
        assert_eq!(stats.range, 5.0);
        assert!(ItemId::Axe.fells_trees());
        assert_eq!(ItemId::Axe.name(), "Stone Axe");
        assert!(!ItemId::Wood.fells_trees());
    }

    #[test]
    fn test_only_weapons_have_stats() {
        for id in ItemId::ALL {
            let is_weapon = matches!(id.def().kind, ItemKind::Weapon(_));
            assert_eq!(id.weapon_stats().is_some(), is_weapon);
            assert_eq!(id.def().id, id);
        }
    }

    #[test]
    fn test_seed_grows_carrot() {
        assert_eq!(
            ItemId::UnknownSeed.def().kind,
            ItemKind::Seed {
                crop: ItemId::Carrot
            }
        );
        assert!(matches!(
            ItemId::Carrot.def().kind,
            ItemKind::Food { hunger_restore, .. } if hunger_restore == 20.0
        ));
    }
}
