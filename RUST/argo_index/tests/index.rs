use argo_index::summary::{summarize, write_summary};
use argo_index::*;
use tempfile::TempDir;
use std::{fs, path::Path};

const INDEX: &str = "\
# Title : Profile directory file of the Argo Global Data Assembly Center
# Description : The directory file describes all individual profile files of the argo GDAC ftp site.
# Project : ARGO
# Format version : 2.0
# Date of update : 20170411080404
# FTP root number 1 : ftp://ftp.ifremer.fr/ifremer/argo/dac
# FTP root number 2 : ftp://usgodae.org/pub/outgoing/argo/dac
# GDAC node : CORIOLIS
file,date,latitude,longitude,ocean,profiler_type,institution,date_update,profile_temp_qc,profile_psal_qc,profile_doxy_qc,ad_psal_adjustment_mean,ad_psal_adjustment_deviation,gdac_date_creation,gdac_date_update,n_levels
aoml/13857/profiles/R13857_001.nc,19970729200300,0.267,-16.032,A,845,AO,20080918131927,A,,,,,20030101000000,20080918131927,67
coriolis/6900697/profiles/D6900697_005.nc,20100101120000,45.1,-30.2,A,846,IF,20150101000000,A,A,,0.012,0.004,20100102000000,20150101000000,102
csio/2901552/profiles/R2901552_372.nc,,,,I,846,HZ,20170101000000,B,B,,,,20170101000000,20170101000000,
coriolis/6900697/profiles/D6900697_006.nc,20100111120000,45.3,-30.1,A,846,IF,20150101000000,A,A,,,,20100112000000,20150101000000,98
";

fn write_index(dir: &Path) {
    fs::write(dir.join(DEFAULT_INDEX), INDEX).unwrap();
}

#[test]
fn read_parses_typed_columns() {
    let dir = TempDir::new().unwrap();
    write_index(dir.path());

    let rows = read(&dir.path().join(DEFAULT_INDEX)).unwrap();
    assert_eq!(rows.len(), 4);

    let first = &rows[0];
    assert_eq!(first.file, "aoml/13857/profiles/R13857_001.nc");
    assert_eq!(first.dac(), Some("aoml"));
    assert_eq!(first.date.unwrap().to_string(), "1997-07-29 20:03:00");
    assert_eq!(first.latitude, Some(0.267));
    assert_eq!(first.profiler_type, "845");
    assert_eq!(first.institution, "AO");
    assert_eq!(first.profile_psal_qc, "");
    assert_eq!(first.ad_psal_adjustment_mean, None);
    assert_eq!(first.n_levels, Some(67));

    let blank = &rows[2];
    assert_eq!(blank.date, None);
    assert_eq!(blank.latitude, None);
    assert_eq!(blank.n_levels, None);
    assert_eq!(rows[1].ad_psal_adjustment_mean, Some(0.012));
}

#[test]
fn cache_path_strips_separators() {
    let p = cache_path(Path::new("/data/argo-gdac"), "argo_profile_detailled_index.txt", Path::new("/tmp/cache"));
    assert_eq!(p, Path::new("/tmp/cache/dataargogdacargoprofiledetailledindex.json"));
}

#[test]
fn load_then_reload_from_cache() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_index(data.path());
    let opts = LoadOptions { cache: true, cache_dir: cache.path().to_path_buf() };

    let store = cache_path(data.path(), DEFAULT_INDEX, cache.path());
    assert!(!store.exists());

    let parsed = load(data.path(), DEFAULT_INDEX, &opts).unwrap();
    assert!(store.is_file());

    // Remove the source: the second load must come from the cache.
    fs::remove_file(data.path().join(DEFAULT_INDEX)).unwrap();
    let cached = load(data.path(), DEFAULT_INDEX, &opts).unwrap();
    assert_eq!(parsed, cached);
}

#[test]
fn leftover_partial_cache_is_replaced() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_index(data.path());
    let opts = LoadOptions { cache: true, cache_dir: cache.path().to_path_buf() };

    // what an interrupted cache write leaves behind
    let store = cache_path(data.path(), DEFAULT_INDEX, cache.path());
    let partial = partial_cache_path(&store);
    fs::write(&partial, "[{\"file\": \"aoml/13857/prof").unwrap();

    let parsed = load(data.path(), DEFAULT_INDEX, &opts).unwrap();
    assert!(store.is_file());
    assert!(!partial.exists());
    assert_eq!(load(data.path(), DEFAULT_INDEX, &opts).unwrap(), parsed);
}

#[test]
fn failed_cache_write_leaves_no_file() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_index(data.path());
    let opts = LoadOptions { cache: true, cache_dir: cache.path().to_path_buf() };

    // a directory squatting on the cache path makes the final rename fail
    let store = cache_path(data.path(), DEFAULT_INDEX, cache.path());
    fs::create_dir(&store).unwrap();
    fs::write(store.join("keep"), "x").unwrap();

    assert!(matches!(load(data.path(), DEFAULT_INDEX, &opts), Err(IndexError::Io(_))));
    assert!(!partial_cache_path(&store).exists());
}

#[test]
fn load_without_cache_reads_source() {
    let data = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();
    write_index(data.path());
    let opts = LoadOptions { cache: false, cache_dir: cache.path().to_path_buf() };

    let rows = load(data.path(), DEFAULT_INDEX, &opts).unwrap();
    assert_eq!(rows.len(), 4);
    assert!(!cache_path(data.path(), DEFAULT_INDEX, cache.path()).exists());
}

#[test]
fn missing_index_is_an_error() {
    let data = TempDir::new().unwrap();
    let opts = LoadOptions { cache: true, cache_dir: data.path().to_path_buf() };
    assert!(matches!(load(data.path(), DEFAULT_INDEX, &opts), Err(IndexError::Io(_))));
}

#[test]
fn identity_traverse_keeps_rows() {
    let data = TempDir::new().unwrap();
    write_index(data.path());
    let rows = read(&data.path().join(DEFAULT_INDEX)).unwrap();

    for n in 1..=6 {
        let out = par_traverse(rows.clone(), Ok::<_, std::convert::Infallible>, Jobs::Fixed(n)).unwrap();
        assert_eq!(out, rows, "{n} partitions");
    }
}

#[test]
fn traverse_keeps_order_of_large_input() {
    let input: Vec<u64> = (0..10_007).collect();
    let out = par_traverse(input.clone(), |x| Ok::<_, String>(x * 2), Jobs::Fixed(7)).unwrap();
    assert_eq!(out, input.iter().map(|x| x * 2).collect::<Vec<_>>());
}

#[test]
fn traverse_aborts_on_row_failure() {
    let err = par_traverse(
        (0..100).collect::<Vec<u32>>(),
        |x| if x == 42 { Err(format!("bad row {x}")) } else { Ok(x) },
        Jobs::Fixed(4),
    )
    .unwrap_err();
    assert!(matches!(err, IndexError::Transform(_)));
    assert!(err.to_string().contains("bad row 42"));
}

#[test]
fn summary_counts_institutions_and_dacs() {
    let data = TempDir::new().unwrap();
    write_index(data.path());
    let rows = read(&data.path().join(DEFAULT_INDEX)).unwrap();

    let s = summarize(&rows, Jobs::Fixed(2)).unwrap();
    assert_eq!(s.rows, 4);
    assert_eq!(s.by_institution["IF"], 2);
    assert_eq!(s.by_dac["coriolis"], 2);
    assert_eq!(s.by_dac["csio"], 1);
    assert_eq!(s.by_dac.values().sum::<usize>(), 4);
    assert_eq!(s.first_date.unwrap().to_string(), "1997-07-29 20:03:00");
    assert_eq!(s.last_date.unwrap().to_string(), "2010-01-11 12:00:00");

    let mut buf = Vec::new();
    write_summary(&mut buf, &s).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("PROFILES: 4\n   DATES: 1997-07-29 to 2010-01-11\n"));
    assert!(text.contains("coriolis"));
    assert!(text.contains("\n    DACS:\n    aoml                  1\n"));
    assert!(text.contains("Ifremer, France"));
}
