use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3A;
use isomesh::{parse, MeshGenerator, TriangleMesh, Window};

fn bench_generate(c: &mut Criterion) {
  let mut group = c.benchmark_group("generate");

  for subdivisions in [16, 32, 64] {
    group.bench_with_input(
      BenchmarkId::new("sphere", subdivisions),
      &subdivisions,
      |b, &subdivisions| {
        let sdf = parse("x^2 + y^2 + z^2").expect("field parses");
        sdf.validate().expect("field validates");
        let mut generator = MeshGenerator::new();
        generator.set_subdivisions(subdivisions);
        generator.set_window(Window::new(Vec3A::splat(-1.5), Vec3A::splat(1.5)));
        generator.set_sdf(sdf);
        generator.set_threshold(1.0);
        let mut mesh = TriangleMesh::new();

        b.iter(|| {
          generator.generate(&mut mesh, false);
          mesh.vertex_count()
        });
      },
    );
  }

  group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
  let sdf = parse("noise(x, y, z) + x^2 + y^2 + z^2").expect("field parses");
  sdf.validate().expect("field validates");

  c.bench_function("evaluate", |b| {
    let mut t = 0.0f32;
    b.iter(|| {
      t += 0.01;
      sdf.evaluate(Vec3A::new(t, -t, t * 0.5))
    });
  });
}

criterion_group!(benches, bench_generate, bench_evaluate);
criterion_main!(benches);
