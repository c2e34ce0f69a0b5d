//! Fields and crop growth.

use glam::{Quat, Vec3};

use crate::items::ItemId;

/// Fields farther than this cannot be worked.
pub const FIELD_REACH: f32 = 4.0;
/// Growth stage at which a crop can be harvested.
pub const HARVEST_STAGE: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crop {
    /// Item yielded at harvest.
    pub yields: ItemId,
    /// Seed returned when the crop is pulled before it is ripe.
    pub seed: ItemId,
    pub stage: u8,
    /// Seconds spent in the current stage.
    pub timer: f32,
}

impl Crop {
    pub fn planted(seed: ItemId, yields: ItemId) -> Self {
        Self {
            yields,
            seed,
            stage: 0,
            timer: 0.0,
        }
    }

    pub fn is_ripe(&self) -> bool {
        self.stage >= HARVEST_STAGE
    }

    /// Grow by `dt` seconds. Returns `true` when the crop reached a new stage.
    pub fn grow(&mut self, dt: f32, stage_seconds: f32) -> bool {
        if self.is_ripe() || dt <= 0.0 {
            return false;
        }
        self.timer += dt;
        if self.timer > stage_seconds {
            self.stage += 1;
            self.timer = 0.0;
            return true;
        }
        false
    }
}

/// A placed farming plot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub position: Vec3,
    pub rotation: Quat,
    pub crop: Option<Crop>,
}

impl Field {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            crop: None,
        }
    }
}

/// Index of the closest field within [`FIELD_REACH`] of `position`.
pub fn nearest_field(fields: &[Field], position: Vec3) -> Option<usize> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| (i, field.position.distance(position)))
        .filter(|(_, d)| *d < FIELD_REACH)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Grow every planted crop. Returns the indices of fields whose crop advanced.
pub fn update_crops(fields: &mut [Field], dt: f32, stage_seconds: f32) -> Vec<usize> {
    fields
        .iter_mut()
        .enumerate()
        .filter_map(|(i, field)| {
            let crop = field.crop.as_mut()?;
            crop.grow(dt, stage_seconds).then_some(i)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_at(z: f32) -> Field {
        Field::new(Vec3::new(0.0, 40.0, z), Quat::IDENTITY)
    }

    #[test]
    fn test_crop_ripens_in_two_stages() {
        let mut crop = Crop::planted(ItemId::UnknownSeed, ItemId::Carrot);
        assert!(!crop.grow(10.0, 10.0));
        assert!(crop.grow(0.5, 10.0));
        assert_eq!(crop.stage, 1);
        assert!(crop.grow(10.5, 10.0));
        assert!(crop.is_ripe());
        assert!(!crop.grow(100.0, 10.0));
        assert_eq!(crop.stage, HARVEST_STAGE);
    }

    #[test]
    fn test_nearest_field_within_reach() {
        let fields = [field_at(3.5), field_at(1.0), field_at(-10.0)];
        let player = Vec3::new(0.0, 40.0, 0.0);
        assert_eq!(nearest_field(&fields, player), Some(1));
        assert_eq!(nearest_field(&fields[2..], player), None);
        assert_eq!(nearest_field(&[], player), None);
    }

    #[test]
    fn test_update_only_planted_fields() {
        let mut fields = [field_at(0.0), field_at(5.0)];
        fields[1].crop = Some(Crop::planted(ItemId::UnknownSeed, ItemId::Carrot));
        assert!(update_crops(&mut fields, 5.0, 10.0).is_empty());
        assert_eq!(update_crops(&mut fields, 6.0, 10.0), vec![1]);
        assert!(fields[0].crop.is_none());
    }
}
