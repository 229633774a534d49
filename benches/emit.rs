use criterion::{criterion_group, criterion_main, Criterion};
use imgembed_image::emitter::render_literal;
use imgembed_image::{Color, Image, MaxDim, ResizeFilter};
use std::hint::black_box;

fn checkerboard(size: u32) -> Image {
    let pixels = (0..size * size)
        .map(|i| {
            if (i / size + i % size) % 2 == 0 {
                Color::new(255, 255, 255)
            } else {
                Color::new(20, 40, 60)
            }
        })
        .collect();
    Image::new(size, size, pixels).unwrap()
}

fn emit_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("Emitter");
    group.significance_level(0.1).sample_size(200);

    let image = checkerboard(64);
    group.bench_function("render 64x64 literal", |b| {
        b.iter(|| render_literal(black_box(&image), "bench.png"))
    });

    group.finish();
}

fn resize_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resizer");
    group.significance_level(0.1).sample_size(100);

    let image = checkerboard(512);
    let max_dim = MaxDim::default();
    for filter in [ResizeFilter::Nearest, ResizeFilter::CatmullRom] {
        group.bench_function(format!("512x512 to 64x64 ({filter})"), |b| {
            b.iter(|| imgembed_image::resizer::resize(black_box(image.clone()), max_dim, filter))
        });
    }

    group.finish();
}

criterion_group!(benches, emit_literal, resize_image);
criterion_main!(benches);
