//! Render-time override layers.
//!
//! Callers pass extra variables as a list of layers, highest precedence first.
//! `[cli_pairs, settings_file]` means values from `cli_pairs` win over values from
//! `settings_file`, and both win over the active profile.

use crate::settings::{MergeStrategy, Settings};

/// Layer `layers` on top of `base`, with `layers[0]` taking precedence.
///
/// Layers are applied from lowest to highest precedence so each one overwrites
/// what came before. `base` is not modified.
pub fn merge_override_layers(
    base: &Settings,
    layers: &[Settings],
    strategy: MergeStrategy,
) -> Settings {
    let mut merged = base.clone();
    for layer in layers.iter().rev() {
        merged.merge(layer, strategy);
    }
    merged
}
