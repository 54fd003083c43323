use criterion::{criterion_group, criterion_main, Criterion};
use pixveil_core::{decode, encode, Engine, Key, LsbEngine, PixelBuffer};

fn carrier_image() -> PixelBuffer {
    PixelBuffer::from_fn(512, 512, |x, y| {
        [(x ^ y) as u8, (x * 3) as u8, (y * 7) as u8, 255]
    })
}

pub fn lsb_encoding(c: &mut Criterion) {
    let cover = carrier_image();
    let engine: Engine = LsbEngine::new(Key::parse("S4T4H1P2CRGB").expect("valid key")).into();
    let secret_message = [42u8; 4096];

    c.bench_function("LSB Encoding", |b| {
        b.iter(|| encode(&cover, &secret_message, &engine).expect("Cannot hide message"))
    });
}

pub fn lsb_decoding(c: &mut Criterion) {
    let engine: Engine = LsbEngine::new(Key::parse("S4T4H1P2CRGB").expect("valid key")).into();
    let stego = encode(&carrier_image(), &[42u8; 4096], &engine).expect("Cannot hide message");

    c.bench_function("LSB Decoding", |b| {
        b.iter(|| decode(&stego, &engine).expect("Cannot unveil message"))
    });
}

criterion_group!(benches, lsb_encoding, lsb_decoding);
criterion_main!(benches);
