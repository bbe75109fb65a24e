use fastqident::{ErrorPolicy, FastqError, FastqReader, FormatError, LineMode, ReaderOptions};
use std::io::BufReader;

const SAMPLE: &str = "\
@read1 desc
ACGTN
+
!!!!!
@read2
ACGT
+
I#h~";

fn strict(line_mode: LineMode) -> ReaderOptions {
    ReaderOptions {
        error_policy: ErrorPolicy::Return,
        line_mode,
    }
}

#[test]
fn qualities_are_sanger_decoded() {
    let rdr = BufReader::new(SAMPLE.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, strict(LineMode::Single));

    let r1 = fq.next().unwrap().unwrap();
    assert_eq!(r1.id, "read1");
    assert_eq!(r1.desc.as_deref(), Some("desc"));
    assert_eq!(r1.seq, b"ACGTN");
    assert_eq!(r1.qual, vec![0; 5]);

    let r2 = fq.next().unwrap().unwrap();
    assert_eq!(r2.id, "read2");
    assert_eq!(r2.desc, None);
    assert_eq!(r2.qual, vec![40, 2, 71, 93]);

    assert!(fq.next().is_none());
}

#[test]
fn multi_line_records_are_joined() {
    let wrapped = "\
@r1
ACG
T
+
@@@
@
@r2
A
+
J
";
    let rdr = BufReader::new(wrapped.as_bytes());
    let recs: Vec<_> = FastqReader::from_bufread(rdr, strict(LineMode::Multi))
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0].seq, b"ACGT");
    assert_eq!(recs[0].qual, vec![31; 4]);
    assert_eq!(recs[1].id, "r2");
    assert_eq!(recs[1].qual, vec![41]);
}

#[test]
fn multi_line_rejected_in_single_mode() {
    let bad = "\
@r1
ACG
T
+
####
";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, strict(LineMode::Single));
    match fq.next().unwrap().unwrap_err() {
        FastqError::Format {
            source: FormatError::MissingPlus,
            ctx,
        } => assert_eq!(ctx.line_num, 3),
        other => panic!("expected missing '+', got {other}"),
    }
}

#[test]
fn non_printable_quality_is_rejected() {
    let bad = "@r1\nACGT\n+\n## #\n";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, strict(LineMode::Single));
    match fq.next().unwrap().unwrap_err() {
        FastqError::Format {
            source: FormatError::InvalidQuality { byte, pos },
            ..
        } => {
            assert_eq!(byte, b' ');
            assert_eq!(pos, 2);
        }
        other => panic!("expected invalid quality, got {other}"),
    }
}

#[test]
fn fasta_input_is_reported() {
    let rdr = BufReader::new(">chr1\nACGT\n".as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, ReaderOptions::default());
    assert!(matches!(
        fq.next(),
        Some(Err(FastqError::Format {
            source: FormatError::FastaHeaderDetected,
            ..
        }))
    ));
}

#[test]
fn length_mismatch_skipped_in_skip_mode() {
    let bad = "\
@r1
ACGT
+
###
@r2
A
+
#";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(
        rdr,
        ReaderOptions {
            error_policy: ErrorPolicy::Skip,
            line_mode: LineMode::Single,
        },
    );

    // r1 malformed -> resync to @r2
    let r = fq.next().unwrap().unwrap();
    assert_eq!(r.id, "r2");
    assert_eq!(r.seq, b"A");
    assert_eq!(r.qual, vec![2]);
    assert!(fq.next().is_none());
}

#[test]
fn blank_quality_line_is_reported_as_such() {
    let bad = "@a\nACGT\n+\n\n@b\nACGT\n+\nIIII\n";
    let rdr = BufReader::new(bad.as_bytes());
    let mut fq = FastqReader::from_bufread(rdr, strict(LineMode::Multi));
    let err = fq.next().unwrap().unwrap_err();
    assert_eq!(err.context().line_num, 4);
    assert!(matches!(
        err,
        FastqError::Format {
            source: FormatError::EmptyQuality,
            ..
        }
    ));
}
