use criterion::{Criterion, criterion_group, criterion_main};
use fastqident::{FastqReader, IdentifierConfig, ReaderOptions};
use std::io::Cursor;

fn illumina_like(records: usize) -> String {
    let mut data = String::new();
    for i in 0..records {
        let q: String = (0..100).map(|j| (b'B' + ((i + j) % 30) as u8) as char).collect();
        data.push_str(&format!("@r{i}\n{}\n+\n{q}\n", "ACGT".repeat(25)));
    }
    data
}

fn bench_detect(c: &mut Criterion) {
    let data = illumina_like(5000);

    c.bench_function("parse_5000_records", |b| {
        b.iter(|| {
            let fq = FastqReader::from_bufread(Cursor::new(data.clone()), ReaderOptions::default());
            fq.map(|r| r.unwrap().len()).sum::<usize>()
        })
    });

    let unbounded = IdentifierConfig {
        nucleotide_budget: 0,
        stride: 0,
        ..IdentifierConfig::default()
    }
    .build()
    .unwrap();
    c.bench_function("detect_5000_records_unbounded", |b| {
        b.iter(|| {
            unbounded
                .detect_reader("bench", Cursor::new(data.clone()))
                .unwrap()
        })
    });

    let sampled = IdentifierConfig::default().build().unwrap();
    c.bench_function("detect_5000_records_default_budget", |b| {
        b.iter(|| {
            sampled
                .detect_reader("bench", Cursor::new(data.clone()))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
