use criterion::{criterion_group, criterion_main, Criterion};
use sverta::raw::FontRef;

fn rasterize(c: &mut Criterion) {
    let bytes = ttf_test_data::sample_ttf();
    let font = FontRef::new(&bytes).unwrap();
    for height in [16u32, 64, 256] {
        c.bench_function(&format!("rasterize_glyphs_{height}px"), |b| {
            b.iter(|| {
                for ch in ['A', 'B', 'C'] {
                    std::hint::black_box(sverta::rasterize_glyph(&font, ch, height));
                }
            })
        });
    }
}

criterion_group!(benches, rasterize);
criterion_main!(benches);
