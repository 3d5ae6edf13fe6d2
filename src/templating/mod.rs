//! Submission script rendering.
//!
//! Templates are plain text with `{UPPERCASE_KEY}` placeholders. Rendering takes the
//! active profile's settings, layers any render-time overrides on top (see
//! [`merge_override_layers`]), and substitutes every placeholder in a single pass.
//!
//! ```text
//! #!/bin/bash
//! #SBATCH --job-name='{JOBNAME}'
//! #SBATCH --mem='{MEM}'
//! {CODE}
//! ```
//!
//! Placeholders with no value are left in the output and reported in
//! [`RenderOutcome::unresolved`]; they never make rendering fail.

pub mod layers;
pub mod renderer;

pub use layers::merge_override_layers;
pub use renderer::{RenderOutcome, TemplateRenderer, UnresolvedPlaceholders};
