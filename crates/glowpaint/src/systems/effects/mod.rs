//! Animated effects spawned by the generative pens.
//!
//! Every effect follows the same contract: `advance` once per frame (which
//! may spawn children), `render` with the result, and die for good once its
//! own termination rule fires. The [`EffectRegistry`] owns the live set.

mod bloom;
mod collatz;
mod life;
mod orbit;
mod pulse;
mod rain;
mod registry;
mod snow;
mod spiral;
mod trail;
mod walker;
mod wave;

pub use bloom::Bloom;
pub use collatz::CollatzCircle;
pub use life::{LifeGrid, LifePainter};
pub use orbit::Orbit;
pub use pulse::Vein;
pub use rain::RainDrop;
pub use registry::EffectRegistry;
pub use snow::Snow;
pub use spiral::{SpiralKind, SpiralLine};
pub use trail::Trail;
pub use walker::{Steering, Walker};
pub use wave::Wave;

use crate::api::context::DrawingContext;
use crate::renderer::traits::Surface;

/// Children produced during an `advance` call. They join the registry only
/// after the current pass, so they are first advanced on the next frame.
pub type Spawned = Vec<Box<dyn Effect>>;

pub trait Effect {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Step the simulation by one frame.
    fn advance(&mut self, ctx: &mut DrawingContext, spawned: &mut Spawned);

    /// Draw the current state. May mark the effect dead when it has faded
    /// below visibility, but never moves it.
    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface);

    /// Mark dead. Irreversible.
    fn kill(&mut self);

    fn is_dead(&self) -> bool;
}
