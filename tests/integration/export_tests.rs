use mediadupe::duplicates::group_by_name;
use mediadupe::output::csv::{CSV_HEADER, UTF8_BOM};
use mediadupe::output::{
    write_report, OutputError, ReportFormat, ReportMeta, ReportOptions, ReportRegistry,
};
use mediadupe::scanner::FileRecord;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn record(root: &str, folder: &str, name: &str, size: u64) -> FileRecord {
    FileRecord::new(PathBuf::from(format!("/{root}/{folder}/{name}")), folder, size)
}

fn sample_records() -> (Vec<FileRecord>, Vec<FileRecord>) {
    let movies = vec![
        record("movies", "Dune (2021)", "Dune.mkv", 4_700_000_000),
        record("movies", "Heat; Director's Cut", "Heat.mkv", 2_000),
    ];
    let series = vec![
        record("tv", "Extras", "DUNE.mkv", 1_000),
        record("tv", "Extras", "heat.MKV", 3_000),
        record("tv", "Lost", "S01E01.mkv", 10),
    ];
    (movies, series)
}

#[test]
fn test_csv_export_round_trips_through_a_csv_reader() {
    let (movies, series) = sample_records();
    let index = group_by_name(&[&movies, &series]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("lista_duplicados.csv");

    let registry = ReportRegistry::available(&ReportOptions::default());
    write_report(
        registry.get(ReportFormat::Csv).unwrap(),
        &index,
        &ReportMeta::now(),
        &path,
    )
    .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_reader(&bytes[UTF8_BOM.len()..]);

    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, CSV_HEADER);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 4);

    // dune.mkv sorts before heat.mkv
    assert_eq!(&rows[0][1], "Name-1");
    assert_eq!(&rows[0][2], "Dune.mkv");
    assert_eq!(&rows[0][5], "4700000000");
    assert_eq!(&rows[0][6], "4.38 GB");
    assert_eq!(&rows[0][7], "2");
    assert_eq!(&rows[1][2], "DUNE.mkv");
    assert_eq!(&rows[2][1], "Name-2");
    assert_eq!(&rows[2][4], "Heat; Director's Cut");
    assert_eq!(&rows[3][3], "/tv/Extras/heat.MKV");
    assert!(rows.iter().all(|r| &r[0] == "By Name"));
}

#[test]
fn test_every_registered_format_writes_a_file() {
    let (movies, series) = sample_records();
    let index = group_by_name(&[&movies, &series]);
    let dir = tempdir().unwrap();
    let registry = ReportRegistry::available(&ReportOptions::default());
    let meta = ReportMeta::now();

    for format in registry.formats() {
        let path = dir.path().join(format.default_file_name());
        write_report(registry.get(format).unwrap(), &index, &meta, &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0, "{format} report is empty");
    }

    let expected = if cfg!(feature = "pdf") { 3 } else { 2 };
    assert_eq!(registry.formats().len(), expected);
}

#[test]
fn test_write_into_missing_directory_reports_the_path() {
    let index = group_by_name(&[]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone").join("lista_duplicados.txt");
    let registry = ReportRegistry::available(&ReportOptions::default());

    let err = write_report(
        registry.get(ReportFormat::Text).unwrap(),
        &index,
        &ReportMeta::now(),
        &path,
    )
    .unwrap_err();

    assert!(matches!(err, OutputError::Write { .. }));
    assert!(err.to_string().contains("lista_duplicados.txt"));
}
