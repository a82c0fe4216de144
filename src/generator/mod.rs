//! Dual contouring mesh generation.
//!
//! One generation pass runs four phases over the grid buffers:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ 1. Samples   f evaluated at all (N+1)³ grid points           │
//! │ 2. Edges     sign test per interior edge, zero refinement,   │
//! │              surface normal from the field gradient          │
//! │ 3. Vertices  one point per active cell, descending a         │
//! │              face-distance + mass-point error                │
//! │ 4. Faces     one quad per crossing edge, dual to the edge,   │
//! │              winding fixed by the crossing direction         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The scalar field and the threshold feed every phase except the last.
//! Everything is synchronous and deterministic; the sampling phase fans out
//! over planes with rayon but writes disjoint chunks, so output is identical
//! to the serial loop.

mod edges;
mod faces;
pub(crate) mod grid;
mod sampler;
mod vertex_solve;

use glam::Vec3A;

use crate::expr::Expression;
use crate::mesh::MeshSink;
use grid::Edge;

/// Numerical gradient step, shared by normal estimation and vertex descent.
pub(crate) const GRADIENT_DELTA: f32 = 0.01;
/// Scale applied to the descent direction each vertex-solve iteration.
pub(crate) const STEP_SIZE: f32 = 0.3;
/// Weight of the mass-point penalty in the vertex error.
pub(crate) const MASS_BIAS: f32 = 0.1;
/// Descent terminates once the step shrinks below this fraction of a cell
/// diagonal.
pub(crate) const MIN_MOVE_FRAC: f32 = 1.0 / 20.0;
/// Edge refinement stops when the field is this close to the threshold.
pub(crate) const ZERO_TOLERANCE: f32 = 0.001;

/// Axis-aligned sampling window in world space.
///
/// `min` must be componentwise below `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window {
  pub min: Vec3A,
  pub max: Vec3A,
}

impl Window {
  pub fn new(min: Vec3A, max: Vec3A) -> Self {
    Self { min, max }
  }
}

impl Default for Window {
  fn default() -> Self {
    Self {
      min: Vec3A::splat(-1.0),
      max: Vec3A::splat(1.0),
    }
  }
}

/// Iso-surface mesh generator.
///
/// Owns the sample, edge and vertex grids; they are reallocated only when the
/// subdivision count changes and reused across regenerations otherwise. The
/// output mesh is owned by the caller and only ever driven through
/// [`MeshSink`].
pub struct MeshGenerator {
  /// Number of cells along each axis.
  subdivisions: usize,
  window: Window,
  sdf: Option<Expression>,
  threshold: f32,
  samples: Vec<f32>,
  edges: Vec<Edge>,
  vertices: Vec<Vec3A>,
}

impl MeshGenerator {
  /// Creates a generator with no grid sizing; call
  /// [`set_subdivisions`](Self::set_subdivisions) before generating.
  pub fn new() -> Self {
    Self {
      subdivisions: 0,
      window: Window::default(),
      sdf: None,
      threshold: 0.0,
      samples: Vec::new(),
      edges: Vec::new(),
      vertices: Vec::new(),
    }
  }

  /// Resizes the grid buffers for `subdivisions` cells per axis. A no-op when
  /// the count is unchanged, so regenerations reuse the allocations.
  pub fn set_subdivisions(&mut self, subdivisions: usize) {
    if subdivisions == self.subdivisions {
      return;
    }
    self.subdivisions = subdivisions;
    // Samples sit on every cell corner: (N + 1)³ of them, and up to three
    // edges lead out of each. Vertices exist per cell: N³.
    let stride = subdivisions + 1;
    self.samples.resize(stride * stride * stride, 0.0);
    self.edges.resize(stride * stride * stride * 3, Edge::default());
    self
      .vertices
      .resize(subdivisions * subdivisions * subdivisions, Vec3A::ZERO);
  }

  pub fn set_window(&mut self, window: Window) {
    self.window = window;
  }

  /// Sets the scalar field. The expression should have passed
  /// [`Expression::validate`]; evaluation of an unbalanced stream panics.
  pub fn set_sdf(&mut self, sdf: Expression) {
    self.sdf = Some(sdf);
  }

  /// Sets the iso-value τ; the mesh approximates { p : f(p) = τ }.
  pub fn set_threshold(&mut self, threshold: f32) {
    self.threshold = threshold;
  }

  /// Runs all four phases and writes the result into `mesh`.
  ///
  /// The mesh is cleared first. With no field set, or zero subdivisions, the
  /// result is an empty mesh. Identical inputs produce byte-identical output.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "generator::generate")
  )]
  pub fn generate(&mut self, mesh: &mut impl MeshSink, invert_normals: bool) {
    mesh.clear();
    if self.sdf.is_none() || self.subdivisions == 0 {
      return;
    }

    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("sample_pass").entered();
      self.generate_samples();
    }
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("edge_pass").entered();
      self.resolve_edges();
    }
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("vertex_pass").entered();
      self.solve_vertices();
    }
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("face_pass").entered();
      self.emit_faces(mesh, invert_normals);
    }
  }
}

impl Default for MeshGenerator {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
