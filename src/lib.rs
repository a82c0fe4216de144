//! isomesh - Dual contouring for user-defined implicit surfaces
//!
//! This crate meshes the iso-surface { p : f(p) = τ } of a scalar field
//! described by a runtime expression over `x`, `y`, `z`. The field is sampled
//! over an axis-aligned window on a cubic grid; one vertex is solved per
//! sign-crossed cell by minimizing a quadratic error over edge intersections,
//! and quads are emitted dual to the crossing edges.
//!
//! # Features
//!
//! - **Expression pipeline**: shunting-yard parser, stack-balance validator
//!   and fixed-stack postfix evaluator with deterministic gradient noise
//! - **Dual Contouring**: edge refinement with field-gradient normals and
//!   mass-point-biased vertex placement
//! - **Pluggable output**: the generator drives any [`MeshSink`];
//!   [`TriangleMesh`] is the bundled vertex-list implementation with OBJ
//!   export
//!
//! # Example
//!
//! ```
//! use isomesh::{parse, MeshGenerator, TriangleMesh, Window};
//! use glam::Vec3A;
//!
//! let sdf = parse("x^2 + y^2 + z^2").unwrap();
//! sdf.validate().unwrap();
//!
//! let mut generator = MeshGenerator::new();
//! generator.set_subdivisions(32);
//! generator.set_window(Window::new(Vec3A::splat(-1.5), Vec3A::splat(1.5)));
//! generator.set_sdf(sdf);
//! generator.set_threshold(1.0);
//!
//! let mut mesh = TriangleMesh::new();
//! generator.generate(&mut mesh, false);
//! assert!(!mesh.is_empty());
//! ```

pub mod expr;
pub mod generator;
pub mod mesh;

// Re-export commonly used items
pub use expr::{parse, ExprError, Expression, Token, TokenClass, EVAL_STACK_SIZE};
pub use generator::{MeshGenerator, Window};
pub use mesh::{MeshSink, MeshVertex, TriangleMesh};
