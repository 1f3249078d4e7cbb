use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gc_ascii::renderer::render;
use gc_core::config::ConversionSettings;
use gc_core::frame::PixelBuffer;
use gc_core::glyph::{CharBrightness, DisplayChar};

/// Synthetic 230-entry set, close to the size of the full charset.
fn candidates() -> Vec<DisplayChar> {
    (0..230u32)
        .map(|i| {
            let v = |k: u32| f64::from((i * 37 + k * 91) % 256);
            DisplayChar::new(
                char::from_u32(0x2500 + i).unwrap_or('?'),
                CharBrightness::new(v(0), v(1), v(2), v(3)),
            )
        })
        .collect()
}

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut fb = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) * 255 / (width + height)) as u8;
            fb.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    fb
}

fn bench_render(c: &mut Criterion) {
    let set = candidates();
    let settings = ConversionSettings {
        width: 128,
        height: 64,
        ..ConversionSettings::default()
    };
    let buffer = gradient(256, 128);
    c.bench_function("render_128x64", |b| {
        b.iter(|| render(black_box(&buffer), black_box(&set), black_box(&settings)));
    });
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
