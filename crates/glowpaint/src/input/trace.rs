use std::collections::VecDeque;

use log::warn;

use crate::error::{StudioError, StudioResult};

/// One sample from a path tracer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub x: f32,
    pub y: f32,
    pub pen_down: bool,
}

/// Traced samples waiting to be drawn, a few per frame.
#[derive(Debug, Default)]
pub struct TraceQueue {
    points: VecDeque<TracePoint>,
}

impl TraceQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: TracePoint) {
        self.points.push_back(point);
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = TracePoint>) {
        self.points.extend(points);
    }

    /// Queue a flat `[x, y, pen, x, y, pen, ...]` buffer, where a non-zero
    /// `pen` means the pen is down. Nothing is queued if the buffer is ragged.
    pub fn extend_flat(&mut self, flat: &[f32]) -> StudioResult<usize> {
        let points = parse_flat(flat)?;
        let n = points.len();
        self.points.extend(points);
        Ok(n)
    }

    /// Up to `max` samples from the front of the queue.
    pub fn take(&mut self, max: usize) -> Vec<TracePoint> {
        let n = max.min(self.points.len());
        self.points.drain(..n).collect()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn parse_flat(flat: &[f32]) -> StudioResult<Vec<TracePoint>> {
    if flat.len() % 3 != 0 {
        warn!("rejecting trace buffer of length {}", flat.len());
        return Err(StudioError::MalformedTrace { len: flat.len() });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| TracePoint {
            x: c[0],
            y: c[1],
            pen_down: c[2] != 0.0,
        })
        .collect())
}
