//! Per-cell vertex placement.
//!
//! Each active cell gets one vertex, found by minimizing a quadratic error
//! over the cell's edge intersections: mean squared distance to the
//! intersection planes, plus a mass-point penalty that keeps the solution
//! from wandering when the plane normals are nearly coplanar. Minimization is
//! plain gradient descent seeded at the mass point; the result is not clamped
//! to the cell box, which lets sharp features settle slightly outside it.

use glam::Vec3A;
use smallvec::SmallVec;

use super::grid::{self, Edge, EdgeDir, IntersectKind};
use super::{MeshGenerator, GRADIENT_DELTA, MASS_BIAS, MIN_MOVE_FRAC, STEP_SIZE};

/// Borrowed intersection records of one active cell.
pub(crate) type CellIntersections<'a> = SmallVec<[&'a Edge; 12]>;

/// Edge-grid indices of the 12 edges bounding cell (x, y, z).
fn cell_edge_indices(stride: usize, x: usize, y: usize, z: usize) -> [usize; 12] {
  [
    grid::edge_index(stride, x, y, z, EdgeDir::X),
    grid::edge_index(stride, x, y, z + 1, EdgeDir::X),
    grid::edge_index(stride, x, y + 1, z, EdgeDir::X),
    grid::edge_index(stride, x, y + 1, z + 1, EdgeDir::X),
    grid::edge_index(stride, x, y, z, EdgeDir::Y),
    grid::edge_index(stride, x, y, z + 1, EdgeDir::Y),
    grid::edge_index(stride, x + 1, y, z, EdgeDir::Y),
    grid::edge_index(stride, x + 1, y, z + 1, EdgeDir::Y),
    grid::edge_index(stride, x, y, z, EdgeDir::Z),
    grid::edge_index(stride, x, y + 1, z, EdgeDir::Z),
    grid::edge_index(stride, x + 1, y, z, EdgeDir::Z),
    grid::edge_index(stride, x + 1, y + 1, z, EdgeDir::Z),
  ]
}

/// Quadratic error of candidate point `point` against the cell's
/// intersection planes and mass point.
pub(crate) fn vertex_error(point: Vec3A, cell: &[&Edge], mass_point: Vec3A) -> f32 {
  let mut face_error = 0.0;
  for edge in cell {
    let plane_distance = (point - edge.position).dot(edge.normal);
    face_error += plane_distance * plane_distance;
  }
  face_error /= cell.len() as f32;
  face_error + point.distance_squared(mass_point) * MASS_BIAS
}

/// Descent direction from one-sided differences of the error around `point`.
pub(crate) fn descent_step(point: Vec3A, cell: &[&Edge], mass_point: Vec3A) -> Vec3A {
  let value = vertex_error(point, cell, mass_point);
  let differences = Vec3A::new(
    vertex_error(point + Vec3A::new(GRADIENT_DELTA, 0.0, 0.0), cell, mass_point) - value,
    vertex_error(point + Vec3A::new(0.0, GRADIENT_DELTA, 0.0), cell, mass_point) - value,
    vertex_error(point + Vec3A::new(0.0, 0.0, GRADIENT_DELTA), cell, mass_point) - value,
  );
  differences / -GRADIENT_DELTA
}

fn solve_one_vertex(
  edges: &[Edge],
  vertices: &mut [Vec3A],
  stride: usize,
  cells: usize,
  x: usize,
  y: usize,
  z: usize,
  min_move: f32,
) {
  let mut cell = CellIntersections::new();
  for index in cell_edge_indices(stride, x, y, z) {
    let edge = &edges[index];
    if edge.kind != IntersectKind::None {
      cell.push(edge);
    }
  }
  // Inactive cell: the vertex slot stays dead and no face may reference it.
  if cell.is_empty() {
    return;
  }

  let mass_point =
    cell.iter().fold(Vec3A::ZERO, |sum, edge| sum + edge.position) / cell.len() as f32;

  let mut point = mass_point;
  let mut iterations = 0;
  loop {
    let step = descent_step(point, &cell, mass_point);
    point += step * STEP_SIZE;
    iterations += 1;
    if iterations >= 10 || step.length_squared() <= min_move * min_move {
      break;
    }
  }
  vertices[grid::cell_index(cells, x, y, z)] = point;
}

impl MeshGenerator {
  /// Solves a vertex for every active cell.
  pub(crate) fn solve_vertices(&mut self) {
    let cells = self.subdivisions;
    if cells == 0 {
      return;
    }
    let stride = cells + 1;
    let extent = self.window.max - self.window.min;
    let min_move = extent.length() / cells as f32 * MIN_MOVE_FRAC;

    let Self {
      edges, vertices, ..
    } = self;
    for z in 0..cells {
      for y in 0..cells {
        for x in 0..cells {
          solve_one_vertex(edges, vertices, stride, cells, x, y, z, min_move);
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "vertex_solve_test.rs"]
mod vertex_solve_test;
