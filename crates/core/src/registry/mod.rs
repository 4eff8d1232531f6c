use std::fmt;

use serde::{Deserialize, Serialize};

use crate::frame::GridSpec;
use crate::generator::band::Band;
use crate::generator::blink::Blink;
use crate::generator::bounce::Bounce;
use crate::generator::drops::{ColorPulse, Rain};
use crate::generator::figures::{AngledLines, Disk, Heart, Lighthouse, Metronome};
use crate::generator::noise_field::{Shimmer, Stars};
use crate::generator::ring::Ring;
use crate::generator::spiral::Spiral;
use crate::generator::sweep::{Line, Sweep};
use crate::generator::Generator;

/// Public identity of a mode, as served to the command surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDescriptor {
    pub id: usize,
    pub name: String,
}

/// Static catalog of every available mode.
///
/// Built once at startup; each entry owns its generator instance for the
/// process lifetime, so a mode's internal state (leading points, particle
/// lists) survives switching away and back. Ids are dense and stable:
/// position in the construction list.
pub struct ModeRegistry {
    entries: Vec<Box<dyn Generator>>,
}

impl ModeRegistry {
    /// The full built-in catalog.
    pub fn with_defaults(grid: GridSpec) -> Self {
        Self::from_generators(vec![
            Box::new(Blink::new(grid)),
            Box::new(Sweep::new(grid)),
            Box::new(Line::new(grid)),
            Box::new(Band::new(grid)),
            Box::new(Ring::new(grid)),
            Box::new(Rain::new(grid)),
            Box::new(ColorPulse::new(grid)),
            Box::new(Bounce::new(grid)),
            Box::new(Spiral::new(grid)),
            Box::new(Shimmer::new(grid)),
            Box::new(Stars::new(grid)),
            Box::new(Heart::new(grid)),
            Box::new(Lighthouse::new(grid)),
            Box::new(Disk::new(grid)),
            Box::new(Metronome::new(grid)),
            Box::new(AngledLines::new(grid)),
        ])
    }

    /// Builds a registry from an explicit generator list. Ids follow the
    /// list order.
    pub fn from_generators(entries: Vec<Box<dyn Generator>>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        id < self.entries.len()
    }

    pub fn get_mut(&mut self, id: usize) -> Option<&mut dyn Generator> {
        Some(self.entries.get_mut(id)?.as_mut())
    }

    /// Snapshot of `{id, name}` pairs for the `listModes` command.
    pub fn descriptors(&self) -> Vec<ModeDescriptor> {
        self.entries
            .iter()
            .enumerate()
            .map(|(id, generator)| ModeDescriptor {
                id,
                name: generator.name().to_string(),
            })
            .collect()
    }
}

impl fmt::Debug for ModeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("modes", &self.descriptors())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ModeRegistry {
        ModeRegistry::with_defaults(GridSpec::new(14, 14, 1.0 / 60.0))
    }

    #[test]
    fn ids_are_dense_and_stable() {
        let registry = registry();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors.len(), registry.len());
        for (expected, descriptor) in descriptors.iter().enumerate() {
            assert_eq!(descriptor.id, expected);
        }
    }

    #[test]
    fn names_are_unique() {
        let descriptors = registry().descriptors();
        for (i, a) in descriptors.iter().enumerate() {
            for b in &descriptors[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn lookup_outside_range_is_none() {
        let mut registry = registry();
        let len = registry.len();
        assert!(registry.get_mut(len).is_none());
        assert!(registry.get_mut(0).is_some());
    }

    #[test]
    fn descriptors_serialize_for_the_command_surface() {
        let descriptors = registry().descriptors();
        let json = serde_json::to_string(&descriptors).unwrap();
        assert!(json.contains("\"Rain\""));
        assert!(json.contains("\"id\":0"));
    }

    #[test]
    fn every_mode_generates_a_full_valid_frame() {
        let mut registry = registry();
        for id in 0..registry.len() {
            let generator = registry.get_mut(id).unwrap();
            for it in 0..10_u64 {
                let frame = generator.generate(it as f32 / 60.0, it);
                assert_eq!(frame.len(), 196, "mode {id} produced a short frame");
                for cell in frame.cells() {
                    assert!(
                        (0.0..=1.0).contains(&cell.intensity),
                        "mode {id} produced intensity {}",
                        cell.intensity
                    );
                }
            }
        }
    }
}
