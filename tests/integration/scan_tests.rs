use mediadupe::scanner::{
    MissingDirectoryPolicy, ScanError, ScanWarning, Scanner, ScannerConfig,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &[u8]) {
    File::create(path).unwrap().write_all(content).unwrap();
}

fn scan(base: &Path) -> mediadupe::scanner::ScanOutcome {
    Scanner::new(ScannerConfig::default()).scan(base).unwrap()
}

fn sorted_names(outcome: &mediadupe::scanner::ScanOutcome) -> Vec<String> {
    let mut names: Vec<String> = outcome.records.iter().map(|r| r.file_name.clone()).collect();
    names.sort();
    names
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();

    let outcome = scan(dir.path());

    assert!(outcome.is_empty());
    assert_eq!(outcome.folders_scanned, 0);
    assert!(!outcome.has_warnings());
}

#[test]
fn test_scan_title_folders() {
    let dir = tempdir().unwrap();
    let alien = dir.path().join("Alien (1979)");
    let heat = dir.path().join("Heat (1995)");
    fs::create_dir(&alien).unwrap();
    fs::create_dir(&heat).unwrap();

    write_file(&alien.join("Alien.mkv"), b"0123456789");
    write_file(&alien.join("Alien.srt"), b"subs");
    write_file(&heat.join("Heat.AVI"), b"12345");
    write_file(&heat.join("poster.jpg"), b"jpg");

    let outcome = scan(dir.path());

    assert_eq!(sorted_names(&outcome), vec!["Alien.mkv", "Heat.AVI"]);
    assert_eq!(outcome.folders_scanned, 2);
    assert_eq!(outcome.total_size(), 15);

    let alien_record = outcome
        .records
        .iter()
        .find(|r| r.file_name == "Alien.mkv")
        .unwrap();
    assert_eq!(alien_record.parent_folder, "Alien (1979)");
    assert_eq!(alien_record.full_path, alien.join("Alien.mkv"));
    assert_eq!(alien_record.size_bytes, 10);
}

#[test]
fn test_scan_is_exactly_one_level_deep() {
    let dir = tempdir().unwrap();
    let show = dir.path().join("Lost");
    let season = show.join("Season 1");
    fs::create_dir_all(&season).unwrap();

    write_file(&dir.path().join("loose.mkv"), b"base level");
    write_file(&show.join("Pilot.mkv"), b"pilot");
    write_file(&season.join("S01E02.mkv"), b"too deep");

    let outcome = scan(dir.path());

    assert_eq!(sorted_names(&outcome), vec!["Pilot.mkv"]);
    assert_eq!(outcome.folders_scanned, 1);
}

#[test]
fn test_scan_folders_without_videos_are_counted_but_empty() {
    let dir = tempdir().unwrap();
    let extras = dir.path().join("Extras");
    fs::create_dir(&extras).unwrap();
    write_file(&extras.join("readme.txt"), b"nothing to see");

    let outcome = scan(dir.path());

    assert!(outcome.is_empty());
    assert_eq!(outcome.folders_scanned, 1);
}

#[test]
fn test_missing_directory_skip_policy() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-mounted");

    let outcome = scan(&missing);

    assert!(outcome.is_empty());
    assert_eq!(
        outcome.warnings,
        vec![ScanWarning::MissingDirectory(missing.clone())]
    );
}

#[test]
fn test_missing_directory_fail_policy() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("not-mounted");
    let config = ScannerConfig::default().with_missing_directory(MissingDirectoryPolicy::Fail);

    let result = Scanner::new(config).scan(&missing);

    match result {
        Err(ScanError::NotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_base_is_a_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("movie.mkv");
    write_file(&file, b"x");

    let config = ScannerConfig::default().with_missing_directory(MissingDirectoryPolicy::Fail);
    let result = Scanner::new(config).scan(&file);
    assert!(matches!(result, Err(ScanError::NotADirectory(_))));

    let outcome = scan(&file);
    assert!(outcome.is_empty());
    assert!(matches!(
        outcome.warnings.as_slice(),
        [ScanWarning::BaseUnreadable { path, .. }] if *path == file
    ));
}

#[test]
fn test_unicode_folder_and_file_names() {
    let dir = tempdir().unwrap();
    let folder = dir.path().join("Amélie (2001)");
    fs::create_dir(&folder).unwrap();
    write_file(&folder.join("O Fabuloso Destino de Amélie Poulain.mkv"), b"x");

    let outcome = scan(dir.path());

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.records[0].parent_folder, "Amélie (2001)");
    assert_eq!(
        outcome.records[0].file_name,
        "O Fabuloso Destino de Amélie Poulain.mkv"
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_title_folder_is_scanned() {
    let library = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let real = elsewhere.path().join("Dark");
    fs::create_dir(&real).unwrap();
    write_file(&real.join("S01E01.mkv"), b"episode");

    std::os::unix::fs::symlink(&real, library.path().join("Dark")).unwrap();

    let outcome = scan(library.path());

    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.records[0].parent_folder, "Dark");
}

#[cfg(unix)]
#[test]
fn test_unreadable_folder_is_a_warning() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let locked = dir.path().join("Locked");
    let open = dir.path().join("Open");
    fs::create_dir(&locked).unwrap();
    fs::create_dir(&open).unwrap();
    write_file(&locked.join("hidden.mkv"), b"secret");
    write_file(&open.join("visible.mkv"), b"public");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Root ignores permission bits, nothing to observe then.
    let still_readable = fs::read_dir(&locked).is_ok();

    let outcome = scan(dir.path());

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if still_readable {
        return;
    }
    assert_eq!(sorted_names(&outcome), vec!["visible.mkv"]);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, ScanWarning::FolderUnreadable { path, .. } if path == &locked)));
}
