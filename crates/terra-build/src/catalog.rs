//! Placeable structure definitions.

use std::fmt;

use terra_physics::DEFAULT_BUILDING_RADIUS;

/// Identifier of a placeable structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuildingId {
    House,
    DecorativeTree,
    Field,
}

/// Build menu tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Category {
    #[default]
    Housing,
    Farming,
    Deco,
}

impl Category {
    /// The tab after this one: Housing → Farming → Deco → Housing.
    pub fn next(self) -> Self {
        match self {
            Category::Housing => Category::Farming,
            Category::Farming => Category::Deco,
            Category::Deco => Category::Housing,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Housing => "Housing",
            Category::Farming => "Farming",
            Category::Deco => "Decoration",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BuildingDef {
    pub id: BuildingId,
    pub name: String,
    pub category: Category,
    /// Wood consumed on placement.
    pub wood_cost: u32,
    /// Footprint radius used for both collision and placement spacing.
    pub radius: f32,
}

/// All structures the player can build, in menu order.
#[derive(Clone, Debug)]
pub struct BuildingCatalog {
    defs: Vec<BuildingDef>,
}

impl BuildingCatalog {
    pub fn new(defs: Vec<BuildingDef>) -> Self {
        Self { defs }
    }

    pub fn get(&self, id: BuildingId) -> Option<&BuildingDef> {
        self.defs.iter().find(|def| def.id == id)
    }

    /// Ids in `category`, in menu order.
    pub fn ids_in(&self, category: Category) -> Vec<BuildingId> {
        self.defs
            .iter()
            .filter(|def| def.category == category)
            .map(|def| def.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingDef> {
        self.defs.iter()
    }
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        Self::new(vec![
            BuildingDef {
                id: BuildingId::House,
                name: "House".to_string(),
                category: Category::Housing,
                wood_cost: 5,
                radius: DEFAULT_BUILDING_RADIUS,
            },
            BuildingDef {
                id: BuildingId::DecorativeTree,
                name: "Decorative Tree".to_string(),
                category: Category::Deco,
                wood_cost: 2,
                radius: 0.8,
            },
            BuildingDef {
                id: BuildingId::Field,
                name: "Field".to_string(),
                category: Category::Farming,
                wood_cost: 1,
                radius: 2.0,
            },
        ])
    }
}
