use glam::Vec2;
use log::debug;

use super::{Pen, PenKind};
use crate::api::context::DrawingContext;
use crate::renderer::traits::Surface;
use crate::systems::effects::{
    Bloom, CollatzCircle, Effect, EffectRegistry, LifePainter, Orbit, RainDrop, Snow, SpiralKind,
    SpiralLine, Vein, Walker, Wave,
};

fn single(effect: impl Effect + 'static) -> Vec<Box<dyn Effect>> {
    let boxed: Box<dyn Effect> = Box::new(effect);
    vec![boxed]
}

/// Generative pen: each point becomes one or more live effects.
pub struct Emitter {
    kind: PenKind,
}

impl Emitter {
    pub fn new(kind: PenKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> PenKind {
        self.kind
    }

    fn spawn(&self, p: Vec2, ctx: &mut DrawingContext) -> Vec<Box<dyn Effect>> {
        match self.kind {
            PenKind::Blood => single(Walker::blood(p, ctx)),
            PenKind::Digital => single(Walker::digital(p, ctx)),
            PenKind::Snow => Snow::burst(p, ctx)
                .into_iter()
                .map(|flake| Box::new(flake) as Box<dyn Effect>)
                .collect(),
            PenKind::Star => single(SpiralLine::new(p, SpiralKind::Star, ctx)),
            PenKind::Feather => single(SpiralLine::new(p, SpiralKind::Feather, ctx)),
            PenKind::Wave => single(Wave::new(p, ctx)),
            PenKind::Collatz => single(CollatzCircle::new(p, ctx)),
            PenKind::Life => single(LifePainter::new(p, ctx)),
            PenKind::Orbit => single(Orbit::new(p, ctx)),
            PenKind::Bloom => single(Bloom::new(p, ctx)),
            PenKind::Rain => single(RainDrop::new(p, ctx)),
            PenKind::Vein => single(Vein::new(p, ctx)),
            direct => {
                debug!("emitter has no effect for direct pen {direct}");
                Vec::new()
            }
        }
    }
}

impl Pen for Emitter {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        _surface: &mut dyn Surface,
        effects: &mut EffectRegistry,
    ) {
        for effect in self.spawn(p, ctx) {
            if !effect.is_dead() {
                effects.push(effect);
            }
        }
    }
}
