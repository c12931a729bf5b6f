//! Profile parsing and curve evaluation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use icc_core::{Curve, Parametric, Profile};

fn header_only_profile() -> Vec<u8> {
    let mut buf = vec![0u8; 132];
    buf[0..4].copy_from_slice(&132u32.to_be_bytes());
    buf[36..40].copy_from_slice(b"acsp");
    buf[68..72].copy_from_slice(&0x0000F6D6i32.to_be_bytes());
    buf[72..76].copy_from_slice(&0x00010000i32.to_be_bytes());
    buf[76..80].copy_from_slice(&0x0000D32Di32.to_be_bytes());
    buf
}

fn profile_with_gamma_trc_triple() -> Vec<u8> {
    let mut buf = header_only_profile();
    buf[128..132].copy_from_slice(&3u32.to_be_bytes());
    buf.resize(132 + 3 * 12, 0);

    let mut push_curv = |buf: &mut Vec<u8>| -> (u32, u32) {
        let offset = buf.len() as u32;
        buf.extend_from_slice(b"curv");
        buf.extend_from_slice(&[0, 0, 0, 0]);
        buf.extend_from_slice(&1u32.to_be_bytes());
        buf.extend_from_slice(&0x0233u16.to_be_bytes());
        (offset, (buf.len() as u32) - offset)
    };

    let sigs = [*b"rTRC", *b"gTRC", *b"bTRC"];
    for (i, sig) in sigs.iter().enumerate() {
        let (offset, size) = push_curv(&mut buf);
        let e = 132 + i * 12;
        buf[e..e + 4].copy_from_slice(sig);
        buf[e + 4..e + 8].copy_from_slice(&offset.to_be_bytes());
        buf[e + 8..e + 12].copy_from_slice(&size.to_be_bytes());
    }
    buf[0..4].copy_from_slice(&(buf.len() as u32).to_be_bytes());
    buf
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile_parse");

    let header_only = header_only_profile();
    group.throughput(Throughput::Bytes(header_only.len() as u64));
    group.bench_function("header_only", |b| {
        b.iter(|| Profile::parse(black_box(&header_only)).unwrap())
    });

    let with_trc = profile_with_gamma_trc_triple();
    group.throughput(Throughput::Bytes(with_trc.len() as u64));
    group.bench_function("rgb_trc_triple", |b| {
        b.iter(|| Profile::parse(black_box(&with_trc)).unwrap())
    });

    group.finish();
}

fn bench_curve_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("curve_eval");

    let parametric = Curve::Parametric(Parametric {
        g: 2.2,
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 0.0,
        f: 0.0,
    });
    group.bench_function("parametric", |b| {
        b.iter(|| parametric.eval(black_box(0.42)))
    });

    let table: Vec<u8> = (0..=255u16).map(|v| (v / 256) as u8).collect();
    let table_16: Vec<u8> = (0u32..256)
        .flat_map(|i| ((i * 257) as u16).to_be_bytes())
        .collect();
    let sampled_8 = Curve::Sampled8 {
        entries: table.len() as u32,
        table: &table,
    };
    let sampled_16 = Curve::Sampled16 {
        entries: 256,
        table: &table_16,
    };
    group.bench_function("sampled_8", |b| b.iter(|| sampled_8.eval(black_box(0.42))));
    group.bench_function("sampled_16", |b| {
        b.iter(|| sampled_16.eval(black_box(0.42)))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_curve_eval);
criterion_main!(benches);
