use criterion::{criterion_group, criterion_main, Criterion};
use pixveil_core::{decode, encode, BpcsEngine, Engine, PixelBuffer};

fn noisy_carrier_image() -> PixelBuffer {
    let mut state: u32 = 0x1234_5678;
    PixelBuffer::from_fn(512, 512, move |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let [r, g, b, _] = state.to_le_bytes();
        [r, g, b, 255]
    })
}

pub fn bpcs_encoding(c: &mut Criterion) {
    let cover = noisy_carrier_image();
    let engine: Engine = BpcsEngine::default().into();
    let secret_message = [42u8; 4096];

    c.bench_function("BPCS Encoding", |b| {
        b.iter(|| encode(&cover, &secret_message, &engine).expect("Cannot hide message"))
    });
}

pub fn bpcs_decoding(c: &mut Criterion) {
    let engine: Engine = BpcsEngine::default().into();
    let stego = encode(&noisy_carrier_image(), &[42u8; 4096], &engine).expect("Cannot hide message");

    c.bench_function("BPCS Decoding", |b| {
        b.iter(|| decode(&stego, &engine).expect("Cannot unveil message"))
    });
}

criterion_group!(benches, bpcs_encoding, bpcs_decoding);
criterion_main!(benches);
