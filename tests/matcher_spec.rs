use std::fs;
use std::io::Cursor;

use tempfile::TempDir;
use voctrain::{find_entries, Dictionary};

const DICT: &str = "\
# Ding-style sample, one record per line
gehen | gehen :: to go | to walk
Haus {n} | Häuser :: house | houses
bekannt :: well-known
Vorgang :: process; procedure
laufen :: to run
";

type MatchCase = (&'static str, &'static str, &'static str);

/// (query, dictionary, expected output)
const MATCH_CASES: &[MatchCase] = &[
    // First sense hit: header line only, built from sense 0 of each side.
    ("go", "gehen | gehen :: to go | to walk\n", "to go: gehen\n"),
    // Later sense hit: header plus an indented line for the hit sense.
    (
        "walk",
        "gehen | gehen :: to go | to walk\n",
        "to go: gehen\n\tto walk: gehen\n",
    ),
    // Spacing around the delimiters is optional.
    ("go", "gehen|gehen::go|walk\n", "go: gehen\n"),
    ("walk", "gehen|gehen::go|walk\n", "go: gehen\n\twalk: gehen\n"),
    // Hits in several senses collect one indented line each.
    (
        "Weg",
        "Weg | Wege | Weg :: way | Weg | path or Weg\n",
        "way: Weg\n\tWeg: Wege\n\tpath or Weg: Weg\n",
    ),
    // Hyphens split into tokens, so both halves match exactly.
    ("known", "bekannt :: well-known\n", "well-known: bekannt\n"),
    ("well", "bekannt :: well-known\n", "well-known: bekannt\n"),
    // Semicolon-separated alternatives within one sense.
    (
        "procedure",
        "Vorgang :: process; procedure\n",
        "process; procedure: Vorgang\n",
    ),
    // Substring without a token match is filtered out.
    ("roc", "Vorgang :: process; procedure\n", ""),
    ("go", "gehen :: going\n", ""),
    // Matching is case-sensitive and exact.
    ("House", "Haus :: house\n", ""),
    // Comment lines and structurally broken lines contribute nothing.
    ("go", "# gehen :: to go\n", ""),
    ("go", "to go without delimiter\n", ""),
    ("go", "a :: b :: to go\n", ""),
    // Sense lists of unequal length are rejected as malformed.
    ("walk", "gehen :: go | walk\n", ""),
    // Whitespace around senses is trimmed before formatting.
    (
        "walk",
        "gehen |  laufen  ::  to go |  to walk \n",
        "to go: gehen\n\tto walk: laufen\n",
    ),
    // Windows line endings are tolerated.
    (
        "walk",
        "gehen | gehen :: to go | to walk\r\n",
        "to go: gehen\n\tto walk: gehen\n",
    ),
];

fn lookup(word: &str, dict: &str) -> String {
    find_entries(word, Cursor::new(dict))
        .unwrap_or_else(|e| panic!("lookup of {:?} failed: {}", word, e))
}

#[test]
fn single_record_matching() {
    for (word, dict, expected) in MATCH_CASES {
        assert_eq!(
            &lookup(word, dict),
            expected,
            "query {:?} against {:?}",
            word,
            dict
        );
    }
}

#[test]
fn blocks_concatenate_in_file_order() {
    let dict = "\
gehen | gehen :: to go | to walk
# walk :: kommentiert
laufen :: to walk
";
    assert_eq!(
        lookup("walk", dict),
        "to go: gehen\n\tto walk: gehen\nto walk: laufen\n"
    );
}

#[test]
fn no_match_yields_empty_output() {
    assert_eq!(lookup("fehlt", DICT), "");
    assert_eq!(lookup("", DICT), "", "the empty query matches no token");
}

#[test]
fn comments_and_broken_lines_alone_yield_nothing() {
    let dict = "\
# go :: gehen
go without delimiter
a :: go :: c
gehen :: go | walk
";
    assert_eq!(
        lookup("go", dict),
        "",
        "comments, malformed and misaligned lines contribute nothing"
    );
}

#[test]
fn annotations_stay_part_of_the_sense_text() {
    // Grammar annotations are not stripped; they ride along verbatim.
    assert_eq!(lookup("house", DICT), "house: Haus {n}\n");
    assert_eq!(lookup("houses", DICT), "house: Haus {n}\n\thouses: Häuser\n");
}

#[test]
fn undecodable_bytes_do_not_abort_the_scan() {
    let mut dict = Vec::new();
    dict.extend_from_slice(b"kaputt :: br\xff0ken\n");
    dict.extend_from_slice(b"laufen :: to run\n");
    assert_eq!(
        find_entries("run", Cursor::new(dict)).expect("lossy scan"),
        "to run: laufen\n"
    );
}

#[test]
fn dictionary_reads_from_a_file() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("de-en");
    fs::write(&path, DICT).expect("write dictionary");

    let dict = Dictionary::new(&path);
    assert_eq!(dict.lookup("run").expect("lookup"), "to run: laufen\n");
    assert_eq!(dict.lookup("fehlt").expect("lookup"), "");

    let missing = Dictionary::new(dir.path().join("missing")).lookup("run");
    assert!(
        missing.is_err(),
        "a missing dictionary file must be an error, not an empty result"
    );
}
