//! One-axis box size resolution.

use layout::{BlockSize, SizeValue};

#[derive(Clone, Debug)]
struct AxisEntry {
    /// Size before grow/shrink distribution.
    base: f32,
    /// Grow factor (the sizing rule's ratio).
    grow: f32,
    /// Shrink factor, weighted by base size when distributing deficit.
    shrink: f32,
    min: f32,
    max: f32,
    /// Target size after distribution.
    target: f32,
    /// Frozen entries no longer participate in distribution.
    frozen: bool,
}

impl AxisEntry {
    fn new(size: &BlockSize) -> Self {
        let base = size.base_size.px();
        // A zero or auto max bound means unconstrained.
        let max = if size.max_size.is_zero_or_auto() {
            f32::INFINITY
        } else {
            size.max_size.px()
        };
        Self {
            base,
            grow: size.ratio.max(0.0),
            shrink: size.shrink.unwrap_or(1.0).max(0.0),
            min: size.min_size.px(),
            max,
            target: base,
            frozen: false,
        }
    }
}

/// Resolve children sizes along one axis of `extent` pixels. Free
/// space beyond the base sizes is distributed by grow factor; a
/// deficit is taken back proportionally to shrink-weighted base sizes.
/// Entries violating their min/max bound are clamped and frozen, and
/// the remainder redistributed.
pub fn solve_axis(extent: f32, sizes: &[BlockSize]) -> Vec<f32> {
    let mut entries: Vec<AxisEntry> = sizes.iter().map(AxisEntry::new).collect();
    if entries.is_empty() {
        return Vec::new();
    }

    loop {
        let used: f32 = entries
            .iter()
            .map(|e| if e.frozen { e.target } else { e.base })
            .sum();
        let free = extent - used;

        let unfrozen: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.frozen)
            .map(|(i, _)| i)
            .collect();
        if unfrozen.is_empty() {
            break;
        }

        if free >= 0.0 {
            let total_grow: f32 = unfrozen.iter().map(|&i| entries[i].grow).sum();
            for &i in &unfrozen {
                let entry = &mut entries[i];
                entry.target = entry.base
                    + if total_grow > 0.0 {
                        free * entry.grow / total_grow
                    } else {
                        0.0
                    };
            }
        } else {
            let total_scaled: f32 = unfrozen
                .iter()
                .map(|&i| entries[i].shrink * entries[i].base)
                .sum();
            for &i in &unfrozen {
                let entry = &mut entries[i];
                entry.target = entry.base
                    + if total_scaled > 0.0 {
                        free * (entry.shrink * entry.base) / total_scaled
                    } else {
                        0.0
                    };
            }
        }

        // Clamp bound violations and freeze them; redistribute until a
        // pass completes without violations.
        let mut violated = false;
        for &i in &unfrozen {
            let entry = &mut entries[i];
            let clamped = entry.target.clamp(entry.min, entry.max.max(entry.min));
            if (clamped - entry.target).abs() > f32::EPSILON {
                entry.target = clamped;
                entry.base = clamped;
                entry.frozen = true;
                violated = true;
            }
        }
        if !violated {
            break;
        }
    }

    entries.iter().map(|e| e.target.max(0.0)).collect()
}
