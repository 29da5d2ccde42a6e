use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::DeploymentType;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: deployment type → Color32
// ---------------------------------------------------------------------------

/// Maps the deployment types present in a dataset to distinct colours.
#[derive(Debug, Clone)]
pub struct TypeColors {
    mapping: BTreeMap<DeploymentType, Color32>,
    default_color: Color32,
}

impl TypeColors {
    pub fn new(types: &BTreeSet<DeploymentType>) -> Self {
        let palette = generate_palette(types.len());
        let mapping = types.iter().cloned().zip(palette).collect();
        TypeColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, kind: &DeploymentType) -> Color32 {
        self.mapping
            .get(kind)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        let unique: BTreeSet<[u8; 4]> = colors.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_type_falls_back_to_grey() {
        let types: BTreeSet<DeploymentType> =
            [DeploymentType::Shaft, DeploymentType::Tower].into_iter().collect();
        let colors = TypeColors::new(&types);
        assert_ne!(colors.color_for(&DeploymentType::Shaft), Color32::GRAY);
        assert_ne!(
            colors.color_for(&DeploymentType::Shaft),
            colors.color_for(&DeploymentType::Tower)
        );
        assert_eq!(colors.color_for(&DeploymentType::Mine), Color32::GRAY);
    }
}
