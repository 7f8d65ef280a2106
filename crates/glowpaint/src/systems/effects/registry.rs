use log::debug;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::renderer::traits::Surface;

/// Ordered collection of live effects.
///
/// Children spawned during a pass are staged and merged after compaction,
/// so a pass only ever visits the entries that existed when it started.
pub struct EffectRegistry {
    effects: Vec<Box<dyn Effect>>,
    staged: Spawned,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self {
            effects: Vec::with_capacity(256),
            staged: Vec::new(),
        }
    }

    /// Add an effect. It is first advanced on the next `step`.
    pub fn push(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    /// Advance and render every live effect in order, drop the dead ones,
    /// then append this pass's children. Returns the number of children.
    pub fn step(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) -> usize {
        let mut staged = std::mem::take(&mut self.staged);
        for effect in self.effects.iter_mut() {
            if effect.is_dead() {
                continue;
            }
            effect.advance(ctx, &mut staged);
            if !effect.is_dead() {
                effect.render(ctx, surface);
            }
        }
        self.effects.retain(|e| !e.is_dead());

        let spawned = staged.len();
        self.effects.extend(staged.drain(..).filter(|e| !e.is_dead()));
        self.staged = staged;
        if spawned > 0 {
            debug!("effects: {} spawned, {} live", spawned, self.effects.len());
        }
        spawned
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Effect> {
        self.effects.iter().map(|e| e.as_ref())
    }

    pub fn clear(&mut self) {
        self.effects.clear();
        self.staged.clear();
    }
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
