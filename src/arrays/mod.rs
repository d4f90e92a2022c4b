// Client-side roster of configured phased arrays (array-manager variant).
// The backend owns the computation; this mirrors what the user has created
// so commands can address arrays by index.

use crate::models::ArrayConfig;

#[derive(Default)]
pub struct ArrayRoster {
    arrays: Vec<ArrayConfig>,
    selected: Option<usize>,
}

impl ArrayRoster {
    pub fn push(&mut self, config: ArrayConfig) {
        self.arrays.push(config);
    }

    pub fn replace(&mut self, index: usize, config: ArrayConfig) -> Result<(), String> {
        let slot = self
            .arrays
            .get_mut(index)
            .ok_or_else(|| format!("No array at index {}", index))?;
        *slot = config;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<(), String> {
        if index >= self.arrays.len() {
            return Err(format!("No array at index {}", index));
        }
        self.arrays.remove(index);
        // Selection follows the removal
        self.selected = match self.selected {
            Some(sel) if sel == index => None,
            Some(sel) if sel > index => Some(sel - 1),
            other => other,
        };
        Ok(())
    }

    pub fn select(&mut self, index: usize) -> Result<ArrayConfig, String> {
        let config = self
            .arrays
            .get(index)
            .cloned()
            .ok_or_else(|| format!("No array at index {}", index))?;
        self.selected = Some(index);
        Ok(config)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ArrayConfig> {
        self.selected.and_then(|index| self.arrays.get(index))
    }

    pub fn all(&self) -> Vec<ArrayConfig> {
        self.arrays.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArrayKind;

    #[test]
    fn test_select_returns_the_config_and_sticks() {
        let mut roster = ArrayRoster::default();
        roster.push(ArrayConfig::default());
        roster.push(ArrayConfig {
            kind: ArrayKind::Curved,
            ..ArrayConfig::default()
        });

        let selected = roster.select(1).unwrap();
        assert_eq!(selected.kind, ArrayKind::Curved);
        assert_eq!(roster.selected_index(), Some(1));
        assert!(roster.select(5).is_err());
    }

    #[test]
    fn test_removal_adjusts_the_selection() {
        let mut roster = ArrayRoster::default();
        for _ in 0..3 {
            roster.push(ArrayConfig::default());
        }
        roster.select(2).unwrap();

        roster.remove(0).unwrap();
        assert_eq!(roster.selected_index(), Some(1));

        roster.remove(1).unwrap();
        assert_eq!(roster.selected_index(), None);
        assert_eq!(roster.all().len(), 1);
    }

    #[test]
    fn test_replace_rejects_out_of_range_indices() {
        let mut roster = ArrayRoster::default();
        roster.push(ArrayConfig::default());
        assert!(roster.replace(0, ArrayConfig::default()).is_ok());
        assert!(roster.replace(1, ArrayConfig::default()).is_err());
    }
}
