//! Pen tools: what happens at each input point.
//!
//! Direct pens paint straight onto the surface. Generative pens hand the point
//! to one or more new effects and let the render loop animate them.

mod direct;
mod emitter;

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use direct::{Bubble, DarkCircle, Fur, Ink, Normal, Spray};
pub use emitter::Emitter;

use crate::api::context::DrawingContext;
use crate::error::StudioError;
use crate::renderer::traits::Surface;
use crate::systems::effects::EffectRegistry;

pub trait Pen {
    /// Apply the pen at `p`. `copy` identifies which symmetry copy this point
    /// belongs to so stateful pens can keep one stroke per copy.
    fn draw(
        &mut self,
        p: Vec2,
        copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        effects: &mut EffectRegistry,
    );

    /// End the current stroke.
    fn lift(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenKind {
    #[default]
    Normal,
    Ink,
    Fur,
    Spray,
    Bubble,
    DarkCircle,
    Blood,
    Snow,
    Star,
    Feather,
    Wave,
    Collatz,
    Digital,
    Life,
    Orbit,
    Bloom,
    Rain,
    Vein,
}

impl PenKind {
    pub const ALL: [PenKind; 18] = [
        PenKind::Normal,
        PenKind::Ink,
        PenKind::Fur,
        PenKind::Spray,
        PenKind::Bubble,
        PenKind::DarkCircle,
        PenKind::Blood,
        PenKind::Snow,
        PenKind::Star,
        PenKind::Feather,
        PenKind::Wave,
        PenKind::Collatz,
        PenKind::Digital,
        PenKind::Life,
        PenKind::Orbit,
        PenKind::Bloom,
        PenKind::Rain,
        PenKind::Vein,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PenKind::Normal => "normal",
            PenKind::Ink => "ink",
            PenKind::Fur => "fur",
            PenKind::Spray => "spray",
            PenKind::Bubble => "bubble",
            PenKind::DarkCircle => "dark_circle",
            PenKind::Blood => "blood",
            PenKind::Snow => "snow",
            PenKind::Star => "star",
            PenKind::Feather => "feather",
            PenKind::Wave => "wave",
            PenKind::Collatz => "collatz",
            PenKind::Digital => "digital",
            PenKind::Life => "life",
            PenKind::Orbit => "orbit",
            PenKind::Bloom => "bloom",
            PenKind::Rain => "rain",
            PenKind::Vein => "vein",
        }
    }

    /// True for pens that only spawn effects and never touch the surface.
    pub fn is_generative(self) -> bool {
        !matches!(
            self,
            PenKind::Normal
                | PenKind::Ink
                | PenKind::Fur
                | PenKind::Spray
                | PenKind::Bubble
                | PenKind::DarkCircle
        )
    }
}

impl fmt::Display for PenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PenKind {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PenKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| StudioError::UnknownPen(s.to_string()))
    }
}

/// Fresh pen instance for `kind`.
pub fn pen_for(kind: PenKind) -> Box<dyn Pen> {
    match kind {
        PenKind::Normal => Box::new(Normal),
        PenKind::Ink => Box::new(Ink::default()),
        PenKind::Fur => Box::new(Fur),
        PenKind::Spray => Box::new(Spray),
        PenKind::Bubble => Box::new(Bubble),
        PenKind::DarkCircle => Box::new(DarkCircle),
        generative => Box::new(Emitter::new(generative)),
    }
}
