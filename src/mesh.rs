//! Mesh collaborator: the quad seam and an in-memory triangle mesh.
//!
//! The generator only ever clears a mesh and appends quads, so that is the
//! whole seam: [`MeshSink`]. [`TriangleMesh`] is the bundled implementation,
//! an interleaved position+normal vertex list ready for upload to any
//! renderer, with Wavefront OBJ export.

use std::io::{self, Write};

use glam::Vec3A;

/// Receiver for generated quads.
///
/// Implement this over GPU buffers, file writers or anything else to stream
/// generator output somewhere other than [`TriangleMesh`].
pub trait MeshSink {
  fn clear(&mut self);

  /// Appends the quad `a b c d`. `invert_normals` flips both the winding and
  /// the corner normals.
  fn add_quad(&mut self, a: Vec3A, b: Vec3A, c: Vec3A, d: Vec3A, invert_normals: bool);
}

/// Interleaved mesh vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshVertex {
  pub position: [f32; 3],
  pub normal: [f32; 3],
}

/// Triangle-list mesh accumulating six vertices per quad.
///
/// Normals are computed per corner from the adjoining quad edges, so corners
/// of one quad may carry different normals; that preserves creases instead of
/// averaging them away.
#[derive(Clone, Debug, Default)]
pub struct TriangleMesh {
  vertices: Vec<MeshVertex>,
}

impl TriangleMesh {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn vertices(&self) -> &[MeshVertex] {
    &self.vertices
  }

  pub fn vertex_count(&self) -> usize {
    self.vertices.len()
  }

  pub fn triangle_count(&self) -> usize {
    self.vertices.len() / 3
  }

  pub fn quad_count(&self) -> usize {
    self.vertices.len() / 6
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  fn push_vertex(&mut self, position: Vec3A, normal: Vec3A) {
    self.vertices.push(MeshVertex {
      position: position.to_array(),
      normal: normal.to_array(),
    });
  }

  /// Writes the mesh as Wavefront OBJ, one quad face per six-vertex block.
  /// Positions only.
  pub fn write_obj<W: Write>(&self, writer: &mut W) -> io::Result<()> {
    let mut face_index = 1;
    for quad in self.vertices.chunks_exact(6) {
      // The six-vertex block holds four distinct corners at 0, 1, 5, 2.
      for corner in [0, 1, 5, 2] {
        let [px, py, pz] = quad[corner].position;
        writeln!(writer, "v {px} {py} {pz}")?;
      }
      writeln!(
        writer,
        "f {} {} {} {}",
        face_index,
        face_index + 1,
        face_index + 2,
        face_index + 3
      )?;
      face_index += 4;
    }
    Ok(())
  }
}

impl MeshSink for TriangleMesh {
  fn clear(&mut self) {
    self.vertices.clear();
  }

  fn add_quad(&mut self, a: Vec3A, b: Vec3A, c: Vec3A, d: Vec3A, invert_normals: bool) {
    let ab = b - a;
    let bc = c - b;
    let cd = d - c;
    let da = a - d;

    let mut normal_a = da.cross(ab);
    let mut normal_b = ab.cross(bc);
    let mut normal_c = bc.cross(cd);
    let mut normal_d = cd.cross(da);

    if invert_normals {
      normal_a = -normal_a;
      normal_b = -normal_b;
      normal_c = -normal_c;
      normal_d = -normal_d;
    }

    // Two triangles per quad, winding reversed when inverted.
    if !invert_normals {
      self.push_vertex(a, normal_a);
      self.push_vertex(b, normal_b);
      self.push_vertex(d, normal_d);
      self.push_vertex(d, normal_d);
      self.push_vertex(b, normal_b);
      self.push_vertex(c, normal_c);
    } else {
      self.push_vertex(a, normal_a);
      self.push_vertex(d, normal_d);
      self.push_vertex(b, normal_b);
      self.push_vertex(b, normal_b);
      self.push_vertex(d, normal_d);
      self.push_vertex(c, normal_c);
    }
  }
}

#[cfg(test)]
#[path = "mesh_test.rs"]
mod mesh_test;
