//! Kurvenauswertung über einer nach X sortierten Breakpoint-Liste.
//!
//! Jedes Segment zwischen zwei Breakpoints wird mit der Krümmung des
//! *rechten* Punkts exponentiell verformt. Die beiden Randsegmente vor dem
//! ersten und nach dem letzten Punkt sind "geclippt": flach und nicht krümmbar.

use super::breakpoint::{Breakpoint, DEFAULT_CURVATURE};
use super::math;
use glam::Vec2;

/// Pegel einer Hüllkurve ohne Breakpoints.
pub const EMPTY_LEVEL: f32 = 0.0;

/// Umschließendes Breakpoint-Paar für eine X-Position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// Index des linken Punkts
    pub prior: usize,
    /// Index des rechten Punkts (Besitzer der Segment-Krümmung)
    pub next: usize,
    /// `true` für die Randsegmente vor dem ersten bzw. nach dem letzten Punkt
    pub clipped: bool,
}

/// Index des ersten Breakpoints mit `x > target` (= Anzahl der Punkte mit `x <= target`).
///
/// Setzt eine sortierte Liste voraus, daher O(log n).
pub fn index_from_x(nodes: &[Breakpoint], target: f32) -> usize {
    nodes.partition_point(|node| node.x() <= target)
}

/// Ermittelt das umschließende Paar für `x`; `None` bei leerer Liste.
pub fn find_neighbors(nodes: &[Breakpoint], x: f32) -> Option<Neighbors> {
    if nodes.is_empty() {
        return None;
    }

    let mut next = index_from_x(nodes, x);
    let mut clipped = false;

    let prior = match next.checked_sub(1) {
        Some(prior) => prior,
        None => {
            clipped = true;
            0
        }
    };
    if next >= nodes.len() {
        next = nodes.len() - 1;
        clipped = true;
    }

    Some(Neighbors {
        prior,
        next,
        clipped,
    })
}

/// Wendet die richtungsabhängige Exponentialkurve zwischen zwei Punkten an.
///
/// Fallende Segmente nutzen `(1 - loc)^exp`, steigende `loc^exp`, damit eine
/// Krümmung unabhängig von der Richtung gleich "ausbaucht". Ein Paar ohne
/// X-Ausdehnung liefert den Pegel des linken Punkts.
pub fn apply_exp_curve(x: f32, prior: Vec2, next: Vec2, exp: f32) -> f32 {
    let loc = math::clip(math::normalize(x, prior.x, next.x), 0.0, 1.0);
    if next.y < prior.y {
        math::interp((1.0 - loc).powf(exp), next.y, prior.y)
    } else {
        math::interp(loc.powf(exp), prior.y, next.y)
    }
}

/// Pegel der Hüllkurve an der normalisierten Position `x`.
pub fn level_at(nodes: &[Breakpoint], x: f32) -> f32 {
    let Some(neighbors) = find_neighbors(nodes, x) else {
        return EMPTY_LEVEL;
    };

    let prior = &nodes[neighbors.prior];
    let next = &nodes[neighbors.next];
    let exp = if neighbors.clipped {
        DEFAULT_CURVATURE
    } else {
        next.curvature()
    };

    apply_exp_curve(x, prior.position(), next.position(), exp)
}
