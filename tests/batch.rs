use fastqident::{Encoding, IdentError, IdentifierConfig, detect_encodings, detect_encodings_serial};
use std::fs;
use tempfile::tempdir;

#[test]
fn failures_stay_with_their_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.fastq");
    let sanger = dir.path().join("sanger.fastq");
    let ambiguous = dir.path().join("ambiguous.fastq");
    fs::write(&sanger, "@a\nACGT\n+\n#III\n@b\nACGT\n+\nhhhh\n").unwrap();
    // '#' is too low for solexa/illumina, 'h' too high for sanger.
    fs::write(&ambiguous, "@a\nAC\n+\n#h\n").unwrap();

    let id = IdentifierConfig::default().build().unwrap();
    let paths = vec![missing.clone(), sanger.clone(), ambiguous.clone()];
    let report = detect_encodings(&id, &paths);

    assert_eq!(report.len(), 3);
    assert_eq!(report.failures(), 2);
    assert!(matches!(
        report.get(&missing),
        Some(Err(IdentError::UnreadableFile { .. }))
    ));
    let d = report.get(&sanger).unwrap().as_ref().unwrap();
    assert_eq!(d.encoding, Encoding::Sanger);
    assert_eq!(d.samples_seen, 1);
    assert!(matches!(
        report.get(&ambiguous),
        Some(Err(IdentError::AmbiguousEncoding { .. }))
    ));
}

#[test]
fn parallel_and_serial_agree() {
    let dir = tempdir().unwrap();
    let bodies = [
        "@a\nACGT\n+\nIIII\n",
        "@a\nACGT\n+\n;;;h\n",
        "@a\nACGT\n+\n!!!!\n",
        "@a\nACGT\n+\nJJJJ\n@b\nACGT\n+\nBBBB\n",
    ];
    let paths: Vec<_> = bodies
        .iter()
        .enumerate()
        .map(|(i, body)| {
            let p = dir.path().join(format!("f{i}.fq"));
            fs::write(&p, body).unwrap();
            p
        })
        .collect();

    let id = IdentifierConfig {
        stride: 0,
        ..IdentifierConfig::default()
    }
    .build()
    .unwrap();
    let par = detect_encodings(&id, &paths);
    let ser = detect_encodings_serial(&id, &paths);

    let labels = |r: &fastqident::BatchReport| -> Vec<String> {
        r.iter()
            .map(|(_, v)| match v {
                Ok(d) => d.encoding.to_string(),
                Err(e) => e.marker().to_string(),
            })
            .collect()
    };
    assert_eq!(labels(&par), labels(&ser));
    assert_eq!(labels(&par), vec!["illumina", "solexa", "sanger", "illumina"]);
}

#[test]
fn each_path_reported_once() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("x.fastq");
    fs::write(&p, "@a\nA\n+\n#\n").unwrap();
    let id = IdentifierConfig::default().build().unwrap();
    let report = detect_encodings(&id, &[&p, &p]);
    assert_eq!(report.len(), 1);
}

#[test]
fn empty_batch_is_empty() {
    let id = IdentifierConfig::default().build().unwrap();
    let none: [&str; 0] = [];
    assert!(detect_encodings(&id, &none).is_empty());
}
