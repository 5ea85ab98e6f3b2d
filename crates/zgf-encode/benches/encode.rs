use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use zgf_core::config::GraphicType;
use zgf_core::frame::FrameBuffer;
use zgf_encode::field::convert_to_graphic_field;
use zgf_encode::rle::compress_row;

/// Étiquette 4x6" à 203 dpi : bandes, texte simulé, marges blanches.
fn label() -> FrameBuffer {
    let (w, h) = (812u32, 1218u32);
    let mut fb = FrameBuffer::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let ink = match y {
                0..=99 => x % 40 < 20,
                100..=599 => (x / 3 + y / 7) % 11 == 0,
                600..=899 => (x * 7 + y * 13) % 255 < 128,
                _ => false,
            };
            let v = if ink { 0 } else { 255 };
            fb.set_pixel(x, y, (v, v, v, 255));
        }
    }
    fb
}

fn bench_field(c: &mut Criterion) {
    let fb = label();
    for t in [GraphicType::Ascii, GraphicType::Binary, GraphicType::CompressedAscii] {
        c.bench_function(&format!("field_812x1218_{t}"), |b| {
            b.iter(|| convert_to_graphic_field(black_box(&fb), t));
        });
    }
}

fn bench_rle(c: &mut Criterion) {
    let row = format!("{}{}{}", "F".repeat(60), "0A".repeat(40), "0".repeat(1000));
    c.bench_function("compress_row_1140", |b| {
        b.iter(|| compress_row(black_box(&row)));
    });
}

criterion_group!(benches, bench_field, bench_rle);
criterion_main!(benches);
