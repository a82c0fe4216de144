//! Flat grid buffers and linear indexing.
//!
//! All three grids are contiguous arrays indexed `(z * stride + y) * stride
//! + x`; flat layout beats nested structures in the sampling hot loop and
//! keeps the phases trivially parallelizable. The edge grid stores a fixed
//! stride of 3 directions per sample even though boundary entries are always
//! `None`; the redundancy is cheaper than bounds-specific indexing.

use glam::Vec3A;

use super::Window;

/// Axis of an edge leaving a sample towards its positive neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EdgeDir {
  X = 0,
  Y = 1,
  Z = 2,
}

impl EdgeDir {
  pub(crate) const ALL: [EdgeDir; 3] = [EdgeDir::X, EdgeDir::Y, EdgeDir::Z];

  /// Grid offset of the edge's far endpoint.
  pub(crate) fn offset(self) -> (usize, usize, usize) {
    match self {
      EdgeDir::X => (1, 0, 0),
      EdgeDir::Y => (0, 1, 0),
      EdgeDir::Z => (0, 0, 1),
    }
  }
}

/// Direction of the field crossing along an edge, fixing quad winding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum IntersectKind {
  /// Field rises along the edge (far endpoint above the threshold).
  Pos,
  /// Field falls along the edge.
  Neg,
  /// No sign change; position and normal are meaningless.
  #[default]
  None,
}

/// One record of the edge grid.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Edge {
  pub kind: IntersectKind,
  pub position: Vec3A,
  pub normal: Vec3A,
}

/// Linear index into the sample grid; `stride` is the per-axis sample count.
#[inline(always)]
pub(crate) fn sample_index(stride: usize, x: usize, y: usize, z: usize) -> usize {
  (z * stride + y) * stride + x
}

/// Linear index into the edge grid (three directions per sample).
#[inline(always)]
pub(crate) fn edge_index(stride: usize, x: usize, y: usize, z: usize, dir: EdgeDir) -> usize {
  ((z * stride + y) * stride + x) * 3 + dir as usize
}

/// Linear index into the vertex grid; `cells` is the subdivision count.
#[inline(always)]
pub(crate) fn cell_index(cells: usize, x: usize, y: usize, z: usize) -> usize {
  (z * cells + y) * cells + x
}

/// World-space position of sample (x, y, z) on an N-subdivided window.
#[inline]
pub(crate) fn sample_position(
  window: &Window,
  subdivisions: usize,
  x: usize,
  y: usize,
  z: usize,
) -> Vec3A {
  let unit = Vec3A::new(x as f32, y as f32, z as f32) / subdivisions as f32;
  window.min + unit * (window.max - window.min)
}

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;
