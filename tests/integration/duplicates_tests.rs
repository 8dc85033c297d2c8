use clap::Parser;
use mediadupe::cli::Cli;
use mediadupe::console::{Console, SharedBuffer};
use mediadupe::error::ExitCode;
use mediadupe::output::csv::UTF8_BOM;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

struct Libraries {
    _root: TempDir,
    movies: PathBuf,
    series: PathBuf,
    output: PathBuf,
}

fn write_video(dir: &Path, folder: &str, name: &str, size: usize) {
    let folder = dir.join(folder);
    fs::create_dir_all(&folder).unwrap();
    File::create(folder.join(name))
        .unwrap()
        .write_all(&vec![b'v'; size])
        .unwrap();
}

fn libraries() -> Libraries {
    let root = tempdir().unwrap();
    let movies = root.path().join("Movies");
    let series = root.path().join("TV");
    let output = root.path().join("reports");
    fs::create_dir(&movies).unwrap();
    fs::create_dir(&series).unwrap();
    Libraries {
        _root: root,
        movies,
        series,
        output,
    }
}

fn run(libs: &Libraries, extra: &[&str]) -> (anyhow::Result<ExitCode>, String) {
    let mut argv: Vec<String> = vec![
        "mediadupe".into(),
        "duplicates".into(),
        "--movies".into(),
        libs.movies.display().to_string(),
        "--series".into(),
        libs.series.display().to_string(),
        "--output-dir".into(),
        libs.output.display().to_string(),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));

    let cli = Cli::try_parse_from(argv).unwrap();
    let buffer = SharedBuffer::new();
    let mut console = Console::buffered(buffer.clone());
    let result = mediadupe::run_app_with_console(cli, &mut console);
    (result, buffer.contents())
}

#[test]
fn test_duplicates_across_libraries() {
    let libs = libraries();
    write_video(&libs.movies, "Alien (1979)", "Alien.mkv", 100);
    write_video(&libs.movies, "Heat (1995)", "Heat.avi", 10);
    write_video(&libs.series, "Extras", "ALIEN.MKV", 50);
    write_video(&libs.series, "Lost", "S01E01.mkv", 10);

    let (result, console) = run(&libs, &[]);

    assert_eq!(result.unwrap(), ExitCode::Success);

    let text = fs::read_to_string(libs.output.join("lista_duplicados.txt")).unwrap();
    assert!(text.contains("Duplicate groups by name: 1"));
    assert!(text.contains("1. alien.mkv"));
    assert!(text.contains("   • Alien (1979) / Alien.mkv"));
    assert!(text.contains("   • Extras / ALIEN.MKV"));
    assert!(text.contains("   Total copies: 2"));
    assert!(text.contains("   Wasted space: 50.00 B"));
    assert!(!text.contains("Heat.avi"));
    let movie_pos = text.find("Alien (1979) / Alien.mkv").unwrap();
    let series_pos = text.find("Extras / ALIEN.MKV").unwrap();
    assert!(movie_pos < series_pos, "movies are listed before series");

    let csv = fs::read(libs.output.join("lista_duplicados.csv")).unwrap();
    assert!(csv.starts_with(UTF8_BOM));
    let csv = String::from_utf8(csv[UTF8_BOM.len()..].to_vec()).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("\"By Name\";\"Name-1\";\"Alien.mkv\";"));
    assert!(csv.contains("\"By Name\";\"Name-1\";\"ALIEN.MKV\";"));

    let pdf_path = libs.output.join("lista_duplicados.pdf");
    if cfg!(feature = "pdf") {
        assert!(fs::read(&pdf_path).unwrap().starts_with(b"%PDF-"));
    } else {
        assert!(!pdf_path.exists());
    }

    assert!(console.contains("[1/4] Scanning files..."));
    assert!(console.contains("[2/4] Looking for duplicates by name..."));
    assert!(console.contains("[3/4] Exporting results..."));
    assert!(console.contains("Total files scanned: 4"));
    assert!(console.contains("1 duplicated name(s) found"));
}

#[test]
fn test_duplicates_within_one_library() {
    let libs = libraries();
    write_video(&libs.movies, "Dune (1984)", "Dune.mkv", 30);
    write_video(&libs.movies, "Dune (2021)", "dune.mkv", 40);
    write_video(&libs.series, "Lost", "S01E01.mkv", 10);

    let (result, _) = run(&libs, &["--format", "txt"]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    let text = fs::read_to_string(libs.output.join("lista_duplicados.txt")).unwrap();
    assert!(text.contains("1. dune.mkv"));
    assert!(text.contains("   Total copies: 2"));
}

#[test]
fn test_no_duplicates_still_writes_reports() {
    let libs = libraries();
    write_video(&libs.movies, "Heat (1995)", "Heat.mkv", 10);
    write_video(&libs.series, "Lost", "S01E01.mkv", 10);

    let (result, _) = run(&libs, &["--format", "txt,csv"]);

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    let text = fs::read_to_string(libs.output.join("lista_duplicados.txt")).unwrap();
    assert!(text.contains("No duplicate files found by name."));
    let csv = fs::read_to_string(libs.output.join("lista_duplicados.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_empty_libraries_write_nothing() {
    let libs = libraries();
    fs::create_dir(libs.movies.join("Empty Folder")).unwrap();

    let (result, console) = run(&libs, &[]);

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(console.contains("No video files found"));
    assert!(!libs.output.exists());
}

#[test]
fn test_only_requested_formats_are_written() {
    let libs = libraries();
    write_video(&libs.movies, "A", "same.mp4", 1);
    write_video(&libs.series, "B", "same.mp4", 1);

    let (result, _) = run(&libs, &["--format", "csv"]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(libs.output.join("lista_duplicados.csv").exists());
    assert!(!libs.output.join("lista_duplicados.txt").exists());
    assert!(!libs.output.join("lista_duplicados.pdf").exists());
}

#[test]
fn test_existing_reports_are_replaced() {
    let libs = libraries();
    write_video(&libs.movies, "A", "same.mp4", 1);
    write_video(&libs.series, "B", "same.mp4", 1);
    fs::create_dir_all(&libs.output).unwrap();
    fs::write(libs.output.join("lista_duplicados.txt"), "stale report").unwrap();

    let (result, _) = run(&libs, &["--format", "txt"]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    let text = fs::read_to_string(libs.output.join("lista_duplicados.txt")).unwrap();
    assert!(!text.contains("stale report"));
    assert!(text.contains("1. same.mp4"));
}

#[test]
fn test_missing_library_aborts_before_writing() {
    let libs = libraries();
    write_video(&libs.movies, "A", "same.mp4", 1);
    fs::remove_dir(&libs.series).unwrap();

    let (result, console) = run(&libs, &[]);

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::MissingInput);
    assert!(err.to_string().contains("Series directory not found"));
    assert!(!console.contains("[1/4]"));
    assert!(!libs.output.exists());
}

#[test]
fn test_unlistable_library_is_skipped_with_a_warning() {
    let libs = libraries();
    fs::remove_dir(&libs.movies).unwrap();
    File::create(&libs.movies).unwrap();
    write_video(&libs.series, "Lost", "same.mkv", 10);
    write_video(&libs.series, "Lost Extras", "same.mkv", 20);

    let (result, console) = run(&libs, &["--format", "txt"]);

    assert_eq!(result.unwrap(), ExitCode::PartialSuccess);
    assert!(console.contains("[WARN] Cannot read directory"));
    let text = fs::read_to_string(libs.output.join("lista_duplicados.txt")).unwrap();
    assert!(text.contains("same.mkv"));
    assert!(text.contains("Lost Extras"));
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_limits_from_command_line() {
    let libs = libraries();
    for i in 0..5 {
        write_video(&libs.movies, &format!("M{i}"), &format!("title {i}.mkv"), 1);
        write_video(&libs.series, &format!("S{i}"), &format!("Title {i}.mkv"), 1);
    }

    let (result, _) = run(
        &libs,
        &["--format", "pdf", "--pdf-max-groups", "2", "--pdf-max-examples", "1"],
    );

    assert_eq!(result.unwrap(), ExitCode::Success);
    let bytes = fs::read(libs.output.join("lista_duplicados.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}
