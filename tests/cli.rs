use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn fastqident(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fastqident"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run fastqident")
}

fn stdout_lines(out: &Output) -> Vec<String> {
    String::from_utf8(out.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_fixtures(dir: &Path) {
    fs::write(dir.join("s.fq"), "@a\nACGT\n+\n#III\n").unwrap();
    fs::write(dir.join("amb.fq"), "@a\nAC\n+\n#h\n").unwrap();
    fs::write(dir.join("z.fq"), "@a\nACGT\n+\nIIII\n").unwrap();
}

fn arg(dir: &Path, name: &str) -> String {
    dir.join(name).display().to_string()
}

#[test]
fn prints_one_sorted_line_per_file() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let (s, amb, z, missing) = (
        arg(dir.path(), "s.fq"),
        arg(dir.path(), "amb.fq"),
        arg(dir.path(), "z.fq"),
        arg(dir.path(), "missing.fq"),
    );

    let out = fastqident(&[&z, &s, &missing, &amb]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&out),
        vec![
            format!("{amb}\tINVALID"),
            format!("{missing}\tUNREADABLE"),
            format!("{s}\tsanger"),
            format!("{z}\tillumina"),
        ]
    );
}

#[test]
fn format_names_option() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let (s, z) = (arg(dir.path(), "s.fq"), arg(dir.path(), "z.fq"));

    let out = fastqident(&["--format-names", &s, &z]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&out),
        vec![format!("{s}\tfastq-sanger"), format!("{z}\tfastq-illumina")]
    );
}

#[test]
fn empty_file_list_needs_flag() {
    let out = fastqident(&[]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("need at least one fastq file"));

    let out = fastqident(&["-z"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
fn bad_configuration_aborts_before_output() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let s = arg(dir.path(), "s.fq");

    let out = fastqident(&["-e", "sanger,foo", &s]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("unknown: foo"));

    let out = fastqident(&["-x", "ab", &s]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn character_offsets_are_accepted() {
    let dir = tempdir().unwrap();
    write_fixtures(dir.path());
    let z = arg(dir.path(), "z.fq");

    let out = fastqident(&["-g", "!", "-x", ";", "-l", "@", &z]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout_lines(&out), vec![format!("{z}\tillumina")]);
}
