use indicatif::ProgressBar;
use seqbank::pipeline::{IngestConfig, Pipeline, SequenceFilter};
use seqbank::source::Source;
use seqbank::{codec, SeqBank};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

fn write_fasta(dir: &tempfile::TempDir, name: &str, records: &[(&str, &str)]) -> PathBuf {
    let mut text = String::new();
    for (accession, sequence) in records {
        text.push_str(&format!(">{accession}\n{sequence}\n"));
    }
    let path = dir.path().join(name);
    std::fs::write(&path, text).expect("write fasta");
    path
}

fn ingest(
    bank: &SeqBank,
    sources: &[Source],
    filter: &SequenceFilter,
    config: IngestConfig,
) -> seqbank::IngestReport {
    let cancel = AtomicBool::new(false);
    Pipeline::new(config)
        .run(bank, sources, filter, &cancel, &ProgressBar::hidden())
        .expect("pipeline run")
}

#[test]
fn end_to_end_two_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("ABC123", "ACGTN"), ("DEF456", "acgtacgt")]);

    let config = IngestConfig {
        workers: 2,
        ..Default::default()
    };
    let report = ingest(
        &bank,
        &[Source::LocalFile(fasta)],
        &SequenceFilter::default(),
        config,
    );

    assert_eq!(report.written, 2);
    assert_eq!(report.failed.len(), 0);
    assert_eq!(bank.count().expect("count"), 2);

    let stored = bank.get("ABC123").expect("get").expect("present");
    assert_eq!(codec::decode(&stored).expect("decode"), "ACGTN");
    let stored = bank.get("DEF456").expect("get").expect("present");
    assert_eq!(codec::decode(&stored).expect("decode"), "ACGTACGT");
}

#[test]
fn second_ingest_is_all_duplicates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("A1", "ACGT"), ("A2", "GGCC")]);
    let sources = [Source::LocalFile(fasta)];

    let first = ingest(&bank, &sources, &SequenceFilter::default(), IngestConfig::default());
    assert_eq!(first.written, 2);

    let second = ingest(&bank, &sources, &SequenceFilter::default(), IngestConfig::default());
    assert_eq!(second.written, 0);
    assert_eq!(second.skipped_duplicate, 2);
    assert_eq!(bank.count().expect("count"), 2);
}

#[test]
fn duplicate_accession_within_one_run_writes_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let a = write_fasta(&dir, "a.fasta", &[("SAME", "ACGT")]);
    let b = write_fasta(&dir, "b.fasta", &[("SAME", "TTTT")]);

    let config = IngestConfig {
        workers: 4,
        ..Default::default()
    };
    let report = ingest(
        &bank,
        &[Source::LocalFile(a), Source::LocalFile(b)],
        &SequenceFilter::default(),
        config,
    );

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_duplicate, 1);
    assert_eq!(bank.count().expect("count"), 1);
}

#[test]
fn min_length_filter_rejects_short_sequences() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(
        &dir,
        "in.fasta",
        &[("SHORT1", "AC"), ("LONG1", "ACGTACGT"), ("SHORT2", "G")],
    );

    let filter = SequenceFilter {
        min_length: Some(4),
        ..Default::default()
    };
    let report = ingest(&bank, &[Source::LocalFile(fasta)], &filter, IngestConfig::default());

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_filter, 2);
    assert!(bank.contains("LONG1").expect("contains"));
    assert!(!bank.contains("SHORT1").expect("contains"));
}

#[test]
fn empty_sequences_are_filtered_by_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("EMPTY", ""), ("OK", "ACGT")]);

    let report = ingest(
        &bank,
        &[Source::LocalFile(fasta)],
        &SequenceFilter::default(),
        IngestConfig::default(),
    );

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_filter, 1);
}

#[test]
fn allow_list_restricts_accessions() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("KEEP", "ACGT"), ("DROP", "ACGT")]);

    let filter = SequenceFilter {
        allow: Some(["KEEP".to_string()].into_iter().collect()),
        ..Default::default()
    };
    let report = ingest(&bank, &[Source::LocalFile(fasta)], &filter, IngestConfig::default());

    assert_eq!(report.written, 1);
    assert_eq!(report.skipped_filter, 1);
    assert!(bank.contains("KEEP").expect("contains"));
}

#[test]
fn cap_is_never_exceeded() {
    for workers in [1, 2, 8] {
        let dir = tempfile::tempdir().expect("tempdir");
        let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
        let records: Vec<(String, String)> = (0..20)
            .map(|i| (format!("ACC{i}"), "ACGTACGT".to_string()))
            .collect();
        let borrowed: Vec<(&str, &str)> = records
            .iter()
            .map(|(a, s)| (a.as_str(), s.as_str()))
            .collect();
        let fasta = write_fasta(&dir, "in.fasta", &borrowed);

        let config = IngestConfig {
            workers,
            max_additions: Some(3),
            ..Default::default()
        };
        let report = ingest(
            &bank,
            &[Source::LocalFile(fasta)],
            &SequenceFilter::default(),
            config,
        );

        assert_eq!(report.written, 3, "workers={workers}");
        assert_eq!(bank.count().expect("count"), 3, "workers={workers}");
    }
}

#[test]
fn invalid_symbol_fails_item_and_leaves_store_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("BAD", "ACGTX")]);

    let report = ingest(
        &bank,
        &[Source::LocalFile(fasta)],
        &SequenceFilter::default(),
        IngestConfig::default(),
    );

    assert_eq!(report.written, 0);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].label, "BAD");
    assert!(report.failed[0].error.contains("position 4"));
    assert!(report.failed[0].error.contains('X'));
    assert_eq!(bank.count().expect("count"), 0);
}

#[test]
fn one_bad_item_does_not_abort_the_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(
        &dir,
        "in.fasta",
        &[("GOOD1", "ACGT"), ("BAD", "ACGTX"), ("GOOD2", "TTAA")],
    );

    let report = ingest(
        &bank,
        &[Source::LocalFile(fasta)],
        &SequenceFilter::default(),
        IngestConfig::default(),
    );

    assert_eq!(report.written, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(bank.count().expect("count"), 2);
}

#[test]
fn missing_source_is_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let good = write_fasta(&dir, "good.fasta", &[("OK", "ACGT")]);

    let report = ingest(
        &bank,
        &[
            Source::LocalFile(dir.path().join("nope.fasta")),
            Source::LocalFile(good),
        ],
        &SequenceFilter::default(),
        IngestConfig::default(),
    );

    assert_eq!(report.written, 1);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].label.ends_with("nope.fasta"));
    // Only the readable file counts as fully ingested.
    assert_eq!(report.completed_sources.len(), 1);
    assert!(report.completed_sources[0].ends_with("good.fasta"));
}

#[test]
fn clean_run_completes_every_source() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let a = write_fasta(&dir, "a.fasta", &[("A1", "ACGT"), ("A2", "GGCC")]);
    let b = write_fasta(&dir, "b.fasta", &[("B1", "TTAA")]);

    let report = ingest(
        &bank,
        &[Source::LocalFile(a.clone()), Source::LocalFile(b.clone())],
        &SequenceFilter::default(),
        IngestConfig::default(),
    );

    assert_eq!(report.written, 3);
    let mut completed = report.completed_sources.clone();
    completed.sort();
    let mut expected = vec![a.display().to_string(), b.display().to_string()];
    expected.sort();
    assert_eq!(completed, expected);
}

#[test]
fn capped_run_does_not_complete_unfinished_sources() {
    // Two sources of ten records each under a cap of one: the first source
    // loses records to the cap and the second is never dispatched, so neither
    // may be reported as fully ingested (and later remembered as seen).
    let records: Vec<(String, String)> = (0..10)
        .map(|i| (format!("R{i}"), "ACGTACGT".to_string()))
        .collect();
    let borrowed: Vec<(&str, &str)> = records
        .iter()
        .map(|(a, s)| (a.as_str(), s.as_str()))
        .collect();
    let more: Vec<(String, String)> = (10..20)
        .map(|i| (format!("R{i}"), "ACGTACGT".to_string()))
        .collect();
    let more_borrowed: Vec<(&str, &str)> = more
        .iter()
        .map(|(a, s)| (a.as_str(), s.as_str()))
        .collect();

    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let first = write_fasta(&dir, "first.fasta", &borrowed);
    let second = write_fasta(&dir, "second.fasta", &more_borrowed);

    let config = IngestConfig {
        workers: 1,
        max_additions: Some(1),
        ..Default::default()
    };
    let report = ingest(
        &bank,
        &[Source::LocalFile(first), Source::LocalFile(second)],
        &SequenceFilter::default(),
        config,
    );

    assert_eq!(report.written, 1);
    assert!(report.completed_sources.is_empty());
}

#[test]
fn cap_on_the_source_boundary_completes_only_what_fit() {
    // First source holds exactly the cap's worth of records, so it goes in
    // whole; the second must stay incomplete.
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let first = write_fasta(&dir, "first.fasta", &[("F1", "ACGT"), ("F2", "GGCC")]);
    let second = write_fasta(&dir, "second.fasta", &[("S1", "TTAA"), ("S2", "CCGG")]);

    let config = IngestConfig {
        workers: 1,
        max_additions: Some(2),
        ..Default::default()
    };
    let report = ingest(
        &bank,
        &[Source::LocalFile(first), Source::LocalFile(second)],
        &SequenceFilter::default(),
        config,
    );

    assert_eq!(report.written, 2);
    assert!(bank.contains("F1").expect("contains"));
    assert!(bank.contains("F2").expect("contains"));
    assert!(report
        .completed_sources
        .iter()
        .any(|label| label.ends_with("first.fasta")));
    assert!(!report
        .completed_sources
        .iter()
        .any(|label| label.ends_with("second.fasta")));
}

#[test]
fn worker_count_does_not_change_final_content() {
    let records: Vec<(String, String)> = (0..50)
        .map(|i| (format!("SEQ{i}"), format!("ACGT{}", "N".repeat(i % 7 + 1))))
        .collect();
    let borrowed: Vec<(&str, &str)> = records
        .iter()
        .map(|(a, s)| (a.as_str(), s.as_str()))
        .collect();

    let mut contents = Vec::new();
    for workers in [1, 8] {
        let dir = tempfile::tempdir().expect("tempdir");
        let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
        let fasta = write_fasta(&dir, "in.fasta", &borrowed);

        let config = IngestConfig {
            workers,
            ..Default::default()
        };
        ingest(
            &bank,
            &[Source::LocalFile(fasta)],
            &SequenceFilter::default(),
            config,
        );

        let mut snapshot: Vec<(String, Vec<u8>)> = bank
            .accessions()
            .map(|a| {
                let accession = a.expect("accession");
                let value = bank.get(&accession).expect("get").expect("present");
                (accession, value)
            })
            .collect();
        snapshot.sort();
        contents.push(snapshot);
    }

    assert_eq!(contents[0], contents[1]);
    assert_eq!(contents[0].len(), 50);
}

#[test]
fn cancellation_stops_dispatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bank = SeqBank::create(dir.path().join("bank")).expect("create bank");
    let fasta = write_fasta(&dir, "in.fasta", &[("A1", "ACGT"), ("A2", "ACGT")]);

    let cancel = AtomicBool::new(true);
    let report = Pipeline::new(IngestConfig::default())
        .run(
            &bank,
            &[Source::LocalFile(fasta)],
            &SequenceFilter::default(),
            &cancel,
            &ProgressBar::hidden(),
        )
        .expect("pipeline run");

    assert_eq!(report.written, 0);
    assert_eq!(bank.count().expect("count"), 0);
    assert!(report.completed_sources.is_empty());
}
