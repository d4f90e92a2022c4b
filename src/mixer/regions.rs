// Region board: form state for the four drawable selection rectangles
use crate::models::{MixingMode, Region, RegionKind, REGION_SLOTS};

/// Tracks the rectangle drawn on each component slot and the active mixing
/// mode. Switching back to basic mode discards every drawn rectangle, so a
/// later basic-mode mix always submits the full-frame default.
pub struct RegionBoard {
    regions: [Region; REGION_SLOTS as usize],
    drawn: [bool; REGION_SLOTS as usize],
    mode: MixingMode,
}

impl Default for RegionBoard {
    fn default() -> Self {
        Self {
            regions: [Region::full_frame(); REGION_SLOTS as usize],
            drawn: [false; REGION_SLOTS as usize],
            mode: MixingMode::Basic,
        }
    }
}

impl RegionBoard {
    pub fn mode(&self) -> MixingMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MixingMode) {
        self.mode = mode;
        if mode == MixingMode::Basic {
            self.reset_all();
        }
    }

    pub fn reset_all(&mut self) {
        self.regions = [Region::full_frame(); REGION_SLOTS as usize];
        self.drawn = [false; REGION_SLOTS as usize];
    }

    /// Replaces the rectangle for a slot with freshly drawn coordinates
    /// (percentages; clamped). The inner/outer choice of the slot survives.
    pub fn update(
        &mut self,
        slot: u8,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<Region, String> {
        let index = slot_index(slot)?;
        let kind = self.regions[index].kind;
        let region = Region::from_drawn(kind, x, y, width, height);
        self.regions[index] = region;
        self.drawn[index] = true;
        Ok(region)
    }

    /// Flips a slot between inner and outer selection. Only possible once a
    /// rectangle has been drawn there; returns `None` otherwise.
    pub fn toggle_kind(&mut self, slot: u8) -> Result<Option<RegionKind>, String> {
        let index = slot_index(slot)?;
        if !self.drawn[index] {
            return Ok(None);
        }
        let kind = self.regions[index].kind.toggled();
        self.regions[index].kind = kind;
        Ok(Some(kind))
    }

    pub fn snapshot(&self) -> [Region; REGION_SLOTS as usize] {
        self.regions
    }

    pub fn is_drawn(&self, slot: u8) -> Result<bool, String> {
        Ok(self.drawn[slot_index(slot)?])
    }
}

fn slot_index(slot: u8) -> Result<usize, String> {
    if (1..=REGION_SLOTS).contains(&slot) {
        Ok((slot - 1) as usize)
    } else {
        Err(format!("Invalid region slot: {}", slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_to_basic_discards_drawn_rectangles() {
        let mut board = RegionBoard::default();
        board.set_mode(MixingMode::Region);
        board.update(2, 10.0, 10.0, 40.0, 40.0).unwrap();
        board.toggle_kind(2).unwrap();

        board.set_mode(MixingMode::Basic);
        assert_eq!(board.snapshot()[1], Region::full_frame());
        assert!(!board.is_drawn(2).unwrap());
    }

    #[test]
    fn test_toggle_requires_a_drawn_rectangle() {
        let mut board = RegionBoard::default();
        assert_eq!(board.toggle_kind(1).unwrap(), None);

        board.update(1, 0.0, 0.0, 50.0, 50.0).unwrap();
        assert_eq!(board.toggle_kind(1).unwrap(), Some(RegionKind::Outer));
        assert_eq!(board.toggle_kind(1).unwrap(), Some(RegionKind::Inner));
    }

    #[test]
    fn test_update_preserves_the_inner_outer_choice() {
        let mut board = RegionBoard::default();
        board.update(3, 0.0, 0.0, 50.0, 50.0).unwrap();
        board.toggle_kind(3).unwrap();

        let region = board.update(3, 5.0, 5.0, 20.0, 20.0).unwrap();
        assert_eq!(region.kind, RegionKind::Outer);
    }

    #[test]
    fn test_slots_outside_one_to_four_are_rejected() {
        let mut board = RegionBoard::default();
        assert!(board.update(0, 0.0, 0.0, 10.0, 10.0).is_err());
        assert!(board.update(5, 0.0, 0.0, 10.0, 10.0).is_err());
        assert!(board.toggle_kind(9).is_err());
    }
}
