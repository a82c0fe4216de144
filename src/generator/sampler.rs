//! Field sampling pass.

use rayon::prelude::*;

use super::grid;
use super::MeshGenerator;

impl MeshGenerator {
  /// Evaluates the field at every grid point, filling the sample buffer.
  ///
  /// Planes of constant z are independent chunks, so they evaluate in
  /// parallel without changing the output.
  pub(crate) fn generate_samples(&mut self) {
    let Some(sdf) = self.sdf.as_ref() else {
      return;
    };
    let subdivisions = self.subdivisions;
    let stride = subdivisions + 1;
    let window = self.window;

    self
      .samples
      .par_chunks_mut(stride * stride)
      .enumerate()
      .for_each(|(z, plane)| {
        for y in 0..stride {
          for x in 0..stride {
            let point = grid::sample_position(&window, subdivisions, x, y, z);
            plane[y * stride + x] = sdf.evaluate(point);
          }
        }
      });
  }
}
