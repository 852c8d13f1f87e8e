//! Criterion benchmarks for the full conversion pipeline and the writer.
//! Sizes: icosphere levels {2, 3, 4}; periodic hex grids {16², 32², 64²}.
//! Results land under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use meshconv::io::{GridAttributes, InputMeta};
use meshconv::special::{icosphere, periodic_hex};
use meshconv::{convert, ConvertCfg};

fn bench_convert(c: &mut Criterion) {
    let cfg = ConvertCfg::default();
    let mut group = c.benchmark_group("convert");
    for &level in &[2u32, 3, 4] {
        let input = icosphere(level);
        group.bench_with_input(BenchmarkId::new("icosphere", level), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |input| {
                    let _mesh = convert(input, &cfg).unwrap();
                },
                BatchSize::LargeInput,
            )
        });
    }
    for &n in &[16usize, 32, 64] {
        let input = periodic_hex(n, n);
        group.bench_with_input(BenchmarkId::new("periodic_hex", n), &input, |b, input| {
            b.iter_batched(
                || input.clone(),
                |input| {
                    let _mesh = convert(input, &cfg).unwrap();
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let mesh = convert(icosphere(3), &ConvertCfg::default()).unwrap();
    let attrs = GridAttributes::new(&InputMeta::default(), "bench", "bench", "0".repeat(40));
    c.bench_function("write_mesh/icosphere3", |b| {
        b.iter_batched(
            || mesh.clone(),
            |mesh| {
                let _file = meshconv::io::write_mesh(mesh, &attrs).unwrap();
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_convert, bench_write);
criterion_main!(benches);
