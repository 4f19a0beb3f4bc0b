use std::hint::black_box;

use bytepusher_core::{BytePusher, Keys, image};
use criterion::{Criterion, criterion_group, criterion_main};

fn criterion_benchmark(c: &mut Criterion) {
    let mut machine = BytePusher::new();
    machine.load(&image::demo_image()).unwrap();

    c.bench_function("demo_frame", |b| {
        b.iter(|| {
            machine.tick(black_box(Keys::KEY_3));
            black_box(machine.video_frame()[0])
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
