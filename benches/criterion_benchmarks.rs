use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use bgsplice::scan;
use bgsplice::splice::splice;

fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.push((s >> 33) as u8);
    }
    out
}

fn qoi_blob(body: &[u8]) -> Vec<u8> {
    let mut v = b"qoif".to_vec();
    v.extend_from_slice(body);
    v.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1]);
    v
}

// Container with `chunks` embedded payloads spread through opaque filler.
fn gen_container(size: usize, chunks: usize) -> Vec<u8> {
    let filler = gen_data(size / (chunks + 1), 42);
    // Keep filler free of magic-start bytes so scan cost is the raw skip.
    let filler: Vec<u8> = filler
        .iter()
        .map(|&b| if b == b'q' || b == 0x89 { 0 } else { b })
        .collect();
    let body = gen_data(2048, 7)
        .iter()
        .map(|&b| if b == 0 { 0x55 } else { b })
        .collect::<Vec<u8>>();

    let mut out = Vec::new();
    for _ in 0..chunks {
        out.extend_from_slice(&filler);
        out.extend_from_slice(&qoi_blob(&body));
    }
    out.extend_from_slice(&filler);
    out
}

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");
    for &size in &[64 * 1024, 1024 * 1024, 8 * 1024 * 1024] {
        let data = gen_container(size, 4);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| scan::locate(black_box(data)));
        });
    }

    // Adversarial tail: an unterminated magic forces a full end-marker
    // search over the remainder; must stay linear.
    let mut adversarial = vec![0x55u8; 4 * 1024 * 1024];
    adversarial[0..4].copy_from_slice(b"qoif");
    group.throughput(Throughput::Bytes(adversarial.len() as u64));
    group.bench_with_input(
        BenchmarkId::new("unterminated", adversarial.len()),
        &adversarial,
        |b, data| {
            b.iter(|| scan::locate(black_box(data)));
        },
    );
    group.finish();
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice");
    for &size in &[1024 * 1024, 8 * 1024 * 1024] {
        let data = gen_container(size, 8);
        let chunks = scan::locate(&data);
        let replacements: Vec<Vec<u8>> = chunks.iter().map(|_| qoi_blob(&[0x33; 512])).collect();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| splice(black_box(data), &chunks, &replacements));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_locate, bench_splice);
criterion_main!(benches);
