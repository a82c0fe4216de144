use glam::Vec3A;

use super::*;
use crate::expr::parse;
use crate::mesh::TriangleMesh;

fn sphere_generator() -> MeshGenerator {
  let mut generator = MeshGenerator::new();
  generator.set_subdivisions(32);
  generator.set_window(Window::new(Vec3A::splat(-1.5), Vec3A::splat(1.5)));
  let sdf = parse("x^2 + y^2 + z^2").expect("field parses");
  sdf.validate().expect("field validates");
  generator.set_sdf(sdf);
  generator.set_threshold(1.0);
  generator
}

#[test]
fn constant_field_yields_an_empty_mesh() {
  let mut generator = MeshGenerator::new();
  generator.set_subdivisions(8);
  generator.set_window(Window::default());
  generator.set_sdf(parse("1").expect("field parses"));
  generator.set_threshold(0.0);

  let mut mesh = TriangleMesh::new();
  generator.generate(&mut mesh, false);
  assert!(mesh.is_empty());
  assert!(generator
    .edges
    .iter()
    .all(|e| e.kind == grid::IntersectKind::None));
}

#[test]
fn generation_without_a_field_clears_the_mesh() {
  let mut generator = MeshGenerator::new();
  generator.set_subdivisions(4);
  let mut mesh = TriangleMesh::new();
  // Pre-populate so clearing is observable.
  use crate::mesh::MeshSink;
  mesh.add_quad(Vec3A::ZERO, Vec3A::X, Vec3A::X + Vec3A::Y, Vec3A::Y, false);
  generator.generate(&mut mesh, false);
  assert!(mesh.is_empty());
}

#[test]
fn sphere_mesh_hugs_the_iso_surface() {
  let mut generator = sphere_generator();
  let mut mesh = TriangleMesh::new();
  generator.generate(&mut mesh, false);

  assert!(mesh.quad_count() >= 1000, "quads: {}", mesh.quad_count());
  for vertex in mesh.vertices() {
    let radius = Vec3A::from_array(vertex.position).length();
    assert!(
      (0.85..=1.15).contains(&radius),
      "vertex off the sphere: {:?} (radius {radius})",
      vertex.position
    );
  }
}

#[test]
fn sphere_normals_point_outward() {
  let mut generator = sphere_generator();
  let mut mesh = TriangleMesh::new();
  generator.generate(&mut mesh, false);

  for vertex in mesh.vertices() {
    let normal = Vec3A::from_array(vertex.normal);
    assert!(normal.length_squared() > 0.0);
    let outward = normal.normalize().dot(Vec3A::from_array(vertex.position));
    assert!(outward > 0.0, "inward normal at {:?}", vertex.position);
  }
}

#[test]
fn inverted_normals_reverse_the_winding() {
  let mut generator = sphere_generator();
  let mut mesh = TriangleMesh::new();
  let mut inverted = TriangleMesh::new();
  generator.generate(&mut mesh, false);
  generator.generate(&mut inverted, true);

  assert_eq!(mesh.vertex_count(), inverted.vertex_count());
  let straight = mesh.vertices();
  let flipped = inverted.vertices();
  for quad in (0..straight.len()).step_by(6) {
    // Corner a leads both windings; its normal is negated.
    assert_eq!(flipped[quad].position, straight[quad].position);
    let n = Vec3A::from_array(straight[quad].normal);
    let m = Vec3A::from_array(flipped[quad].normal);
    assert!((n + m).length() < 1e-4 * n.length().max(1.0));
    // Corners b and d trade places.
    assert_eq!(flipped[quad + 1].position, straight[quad + 2].position);
    assert_eq!(flipped[quad + 2].position, straight[quad + 1].position);
  }
}

#[test]
fn generation_is_idempotent() {
  let mut generator = sphere_generator();
  let mut first = TriangleMesh::new();
  let mut second = TriangleMesh::new();
  generator.generate(&mut first, false);
  generator.generate(&mut second, false);
  assert_eq!(first.vertex_count(), second.vertex_count());
  assert_eq!(first.vertices(), second.vertices());
}

#[test]
fn planar_vertices_converge_to_the_plane() {
  let mut generator = MeshGenerator::new();
  generator.set_subdivisions(16);
  generator.set_window(Window::new(Vec3A::splat(-1.0), Vec3A::splat(1.0)));
  generator.set_sdf(parse("x").expect("field parses"));
  generator.set_threshold(0.0);

  let mut mesh = TriangleMesh::new();
  generator.generate(&mut mesh, false);
  assert!(!mesh.is_empty());
  for vertex in mesh.vertices() {
    assert!(
      vertex.position[0].abs() < 0.02,
      "vertex strayed from the plane: {:?}",
      vertex.position
    );
  }
}

#[test]
fn subdivision_changes_resize_the_grids() {
  let mut generator = MeshGenerator::new();
  generator.set_subdivisions(8);
  assert_eq!(generator.samples.len(), 9 * 9 * 9);
  assert_eq!(generator.edges.len(), 9 * 9 * 9 * 3);
  assert_eq!(generator.vertices.len(), 8 * 8 * 8);

  // Unchanged count keeps the buffers as they are.
  generator.set_subdivisions(8);
  assert_eq!(generator.samples.len(), 9 * 9 * 9);

  generator.set_subdivisions(4);
  assert_eq!(generator.samples.len(), 5 * 5 * 5);
  assert_eq!(generator.vertices.len(), 4 * 4 * 4);
}

#[test]
fn regeneration_follows_threshold_changes() {
  let mut generator = sphere_generator();
  let mut unit = TriangleMesh::new();
  generator.generate(&mut unit, false);

  // A smaller level set of the same field.
  generator.set_threshold(0.25);
  let mut small = TriangleMesh::new();
  generator.generate(&mut small, false);
  assert!(!small.is_empty());
  for vertex in small.vertices() {
    let radius = Vec3A::from_array(vertex.position).length();
    assert!((0.35..=0.65).contains(&radius), "radius {radius}");
  }
}
