use clap::Parser;
use mediadupe::cli::Cli;
use mediadupe::console::{Console, SharedBuffer};
use mediadupe::error::ExitCode;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, folder: &str, name: &str) {
    let folder = dir.join(folder);
    fs::create_dir_all(&folder).unwrap();
    File::create(folder.join(name)).unwrap();
}

fn run(argv: &[&str]) -> (anyhow::Result<ExitCode>, String) {
    let cli = Cli::try_parse_from(argv).unwrap();
    let buffer = SharedBuffer::new();
    let mut console = Console::buffered(buffer.clone());
    let result = mediadupe::run_app_with_console(cli, &mut console);
    (result, buffer.contents())
}

#[test]
fn test_movie_listing() {
    let library = tempdir().unwrap();
    let out = tempdir().unwrap();
    touch(library.path(), "Zodiac (2007)", "Zodiac.mkv");
    touch(library.path(), "Alien (1979)", "Alien.mkv");
    touch(library.path(), "Alien (1979)", "Alien.srt");
    touch(library.path(), "Artwork", "poster.jpg");

    let dir = library.path().display().to_string();
    let out_dir = out.path().display().to_string();
    let (result, console) = run(&["mediadupe", "movies", "--dir", &dir, "-o", &out_dir]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(console.contains("Total movies found: 2"));

    let text = fs::read_to_string(out.path().join("lista_filmes.txt")).unwrap();
    assert!(text.contains("LIST OF MOVIES"));
    assert!(text.contains("Total movies: 2"));
    assert!(!text.contains("Artwork"));
    assert!(!text.contains("Alien.srt"));
    let alien = text.find("1. Alien (1979)").unwrap();
    let zodiac = text.find("2. Zodiac (2007)").unwrap();
    assert!(alien < zodiac);

    assert_eq!(
        out.path().join("lista_filmes.pdf").exists(),
        cfg!(feature = "pdf")
    );
}

#[test]
fn test_series_listing_counts_episodes() {
    let library = tempdir().unwrap();
    let out = tempdir().unwrap();
    touch(library.path(), "Lost", "S01E02.mkv");
    touch(library.path(), "Lost", "S01E01.mkv");
    touch(library.path(), "Dark", "S01E01.mp4");

    let dir = library.path().display().to_string();
    let out_dir = out.path().display().to_string();
    let (result, console) = run(&[
        "mediadupe", "series", "--dir", &dir, "-o", &out_dir, "--format", "txt",
    ]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(console.contains("Total episodes: 3"));
    assert!(!out.path().join("lista_series.pdf").exists());

    let text = fs::read_to_string(out.path().join("lista_series.txt")).unwrap();
    assert!(text.contains("LIST OF SERIES"));
    assert!(text.contains("Total series: 2"));
    assert!(text.contains("Total episodes: 3"));
    assert!(text.contains("1. Dark (1 episode(s))"));
    assert!(text.contains("2. Lost (2 episode(s))"));
    assert!(text.contains("   • S01E01.mkv\n   • S01E02.mkv\n"));
}

#[test]
fn test_listing_missing_directory_is_an_error() {
    let root = tempdir().unwrap();
    let missing = root.path().join("not-mounted").display().to_string();
    let out_dir = root.path().join("out");
    let out = out_dir.display().to_string();

    let (result, _) = run(&["mediadupe", "series", "--dir", &missing, "-o", &out]);

    let err = result.unwrap_err();
    assert_eq!(ExitCode::for_error(&err), ExitCode::MissingInput);
    assert!(format!("{:#}", err).contains("Directory not found"));
    assert!(!out_dir.exists());
}

#[test]
fn test_empty_listing_writes_nothing() {
    let library = tempdir().unwrap();
    let out = tempdir().unwrap();
    touch(library.path(), "Artwork", "poster.jpg");

    let dir = library.path().display().to_string();
    let out_dir = out.path().display().to_string();
    let (result, console) = run(&["mediadupe", "movies", "--dir", &dir, "-o", &out_dir]);

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(console.contains("No movies found"));
    assert!(!out.path().join("lista_filmes.txt").exists());
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_only_listing() {
    let library = tempdir().unwrap();
    let out = tempdir().unwrap();
    touch(library.path(), "Heat (1995)", "Heat.mkv");

    let dir = library.path().display().to_string();
    let out_dir = out.path().display().to_string();
    let (result, _) = run(&[
        "mediadupe", "movies", "--dir", &dir, "-o", &out_dir, "-f", "pdf",
    ]);

    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(!out.path().join("lista_filmes.txt").exists());
    let bytes = fs::read(out.path().join("lista_filmes.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}
