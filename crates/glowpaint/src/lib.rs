pub mod api;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::context::{AmbientModes, DrawingContext, StudioConfig};
pub use api::settings::Settings;
pub use api::studio::Studio;
pub use crate::core::color::{Color, Paint};
pub use crate::core::rng::Rng;
pub use crate::core::time::FramePacer;
pub use error::{StudioError, StudioResult};
pub use input::queue::{InputEvent, InputQueue};
pub use input::trace::{TracePoint, TraceQueue};
pub use renderer::raster::{PixelSurface, Rgba};
pub use renderer::recording::{DrawCall, RecordingSurface};
pub use renderer::traits::{composite_for_dark_mode, CompositeMode, Surface};
pub use systems::effects::{Effect, EffectRegistry};
pub use systems::pens::{pen_for, Pen, PenKind};
pub use systems::symmetry::Symmetry;
