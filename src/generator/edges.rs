//! Edge resolution: sign tests, zero refinement, normal estimation.
//!
//! Only interior edges are resolved: those whose four sharing cells all
//! exist inside the grid. Boundary edges stay `None`, which is what lets the
//! face emitter index neighbouring cells without bounds checks.

use glam::Vec3A;

use crate::expr::Expression;

use super::grid::{self, EdgeDir, IntersectKind};
use super::{MeshGenerator, GRADIENT_DELTA, ZERO_TOLERANCE};

/// Surface normal from a forward-difference gradient of the field.
///
/// A degenerate gradient normalizes to zero; downstream math tolerates it,
/// and on a true iso-surface it is vanishingly rare.
pub(crate) fn estimate_normal(sdf: &Expression, position: Vec3A) -> Vec3A {
  let value = sdf.evaluate(position);
  let gradient = Vec3A::new(
    sdf.evaluate(position + Vec3A::new(GRADIENT_DELTA, 0.0, 0.0)) - value,
    sdf.evaluate(position + Vec3A::new(0.0, GRADIENT_DELTA, 0.0)) - value,
    sdf.evaluate(position + Vec3A::new(0.0, 0.0, GRADIENT_DELTA)) - value,
  );
  gradient.normalize_or_zero()
}

impl MeshGenerator {
  /// Flags and refines every interior edge with a sign change.
  pub(crate) fn resolve_edges(&mut self) {
    for edge in &mut self.edges {
      edge.kind = IntersectKind::None;
    }
    // Edges leaving the last sample row would exit the grid, so each axis
    // iterates cell indices only; the interiority guards do the rest.
    let cells = self.subdivisions;
    for z in 0..cells {
      for y in 0..cells {
        for x in 0..cells {
          if y > 0 && z > 0 && self.check_edge(x, y, z, EdgeDir::X) {
            self.refine_edge(x, y, z, EdgeDir::X);
          }
          if x > 0 && z > 0 && self.check_edge(x, y, z, EdgeDir::Y) {
            self.refine_edge(x, y, z, EdgeDir::Y);
          }
          if x > 0 && y > 0 && self.check_edge(x, y, z, EdgeDir::Z) {
            self.refine_edge(x, y, z, EdgeDir::Z);
          }
        }
      }
    }
  }

  /// Sign test: flags the edge when its endpoint samples straddle the
  /// threshold.
  ///
  /// Comparisons are strict, so a NaN sample reads as "not above" on both
  /// sides and suppresses the intersection rather than corrupting the mesh.
  fn check_edge(&mut self, x: usize, y: usize, z: usize, dir: EdgeDir) -> bool {
    let stride = self.subdivisions + 1;
    let (dx, dy, dz) = dir.offset();
    let a = self.samples[grid::sample_index(stride, x, y, z)] - self.threshold;
    let b = self.samples[grid::sample_index(stride, x + dx, y + dy, z + dz)] - self.threshold;

    let crossing = (a > 0.0) != (b > 0.0);
    if crossing {
      self.edges[grid::edge_index(stride, x, y, z, dir)].kind = if a > b {
        IntersectKind::Neg
      } else {
        IntersectKind::Pos
      };
    }
    crossing
  }

  /// Locates the threshold crossing on a flagged edge by iterated linear
  /// interpolation, then records position and normal.
  fn refine_edge(&mut self, x: usize, y: usize, z: usize, dir: EdgeDir) {
    let Some(sdf) = self.sdf.as_ref() else {
      return;
    };
    let subdivisions = self.subdivisions;
    let stride = subdivisions + 1;
    let threshold = self.threshold;
    let (dx, dy, dz) = dir.offset();

    let mut a = grid::sample_position(&self.window, subdivisions, x, y, z);
    let mut b = grid::sample_position(&self.window, subdivisions, x + dx, y + dy, z + dz);
    let mut value_a = self.samples[grid::sample_index(stride, x, y, z)];
    let mut value_b = self.samples[grid::sample_index(stride, x + dx, y + dy, z + dz)];

    // Shrink the bracket until it spans under 1% of the edge. Each step
    // replaces whichever endpoint the new point agrees with in sign.
    let mut range = 1.0f32;
    let mut iterations = 0;
    while range > 0.01 && iterations < 5 {
      let t = (threshold - value_a) / (value_b - value_a);
      let midpoint = a.lerp(b, t);
      let value = sdf.evaluate(midpoint);
      if (value - threshold).abs() < ZERO_TOLERANCE {
        break;
      }
      if (value > threshold) == (value_a > threshold) {
        value_a = value;
        a = midpoint;
        range *= 1.0 - t;
      } else {
        value_b = value;
        b = midpoint;
        range *= t;
      }
      iterations += 1;
    }

    let t = (threshold - value_a) / (value_b - value_a);
    let position = a.lerp(b, t);
    let normal = estimate_normal(sdf, position);

    let edge = &mut self.edges[grid::edge_index(stride, x, y, z, dir)];
    edge.position = position;
    edge.normal = normal;
  }
}

#[cfg(test)]
#[path = "edges_test.rs"]
mod edges_test;
