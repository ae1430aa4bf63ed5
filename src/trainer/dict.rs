//! Bilingual dictionary lookup in the Ding line format.
//!
//! A data record is a single line of the form `source :: target`, where
//! each side is a `|`-separated list of senses and the lists align by
//! position:
//!
//! ```text
//! # comment lines start with a hash
//! gehen | gehen :: to go | to walk
//! Haus {n} | Häuser :: house | houses
//! ```
//!
//! Lookup collects, per matching record, a block of `target: source`
//! translation lines: the first matched sense produces the header line
//! built from sense 0 of both sides, and every further matched sense
//! adds an indented line. Blocks of multiple matching records are
//! concatenated in file order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use log::{debug, warn};

use super::error::Result;

/// A configured dictionary file. The file is opened per lookup; there
/// is no index and no caching, a lookup is one sequential scan.
#[derive(Debug, Clone)]
pub struct Dictionary {
    path: PathBuf,
}

impl Dictionary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Extract all entry blocks matching `word` from the dictionary.
    ///
    /// Returns the empty string when nothing matches. A missing
    /// dictionary file is an error.
    pub fn lookup(&self, word: &str) -> Result<String> {
        debug!("looking up {:?} in {}", word, self.path.display());
        let file = File::open(&self.path)?;
        find_entries(word, BufReader::new(file))
    }
}

/// Scan a dictionary stream and collect the entry blocks for `word`.
///
/// Lines are decoded lossily so a stray undecodable byte cannot abort
/// the whole lookup; trailing `\r` is tolerated.
pub fn find_entries(word: &str, mut reader: impl BufRead) -> Result<String> {
    let mut out = String::new();
    let mut buf = Vec::new();
    let mut line_no = 0u64;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        if let Some(block) = match_record(word, line.trim_end_matches(['\r', '\n']), line_no) {
            out.push_str(&block);
        }
    }
    Ok(out)
}

/// Match one raw line against `word` and format its entry block.
fn match_record(word: &str, line: &str, line_no: u64) -> Option<String> {
    if line.starts_with('#') {
        return None;
    }
    let (source, target) = split_record(line)?;
    // Cheap substring pre-filter; the token comparison below decides.
    if !target.contains(word) {
        return None;
    }

    let source_senses: Vec<&str> = source.split('|').map(str::trim).collect();
    let target_senses: Vec<&str> = target.split('|').map(str::trim).collect();
    if source_senses.len() != target_senses.len() {
        warn!(
            "line {}: rejecting record with {} source senses but {} target senses",
            line_no,
            source_senses.len(),
            target_senses.len()
        );
        return None;
    }

    let mut block = String::new();
    let mut matched = false;
    for (i, target_sense) in target_senses.iter().enumerate() {
        if !sense_contains(target_sense, word) {
            continue;
        }
        if !matched {
            block.push_str(&format!("{}: {}\n", target_senses[0], source_senses[0]));
            matched = true;
        }
        if i > 0 {
            block.push_str(&format!("\t{}: {}\n", target_sense, source_senses[i]));
        }
    }
    matched.then_some(block)
}

/// Split a data line into its `source` and `target` halves.
///
/// Returns `None` unless the line contains the `::` delimiter exactly
/// once; anything else is not a record.
fn split_record(line: &str) -> Option<(&str, &str)> {
    let mut halves = line.split("::");
    let source = halves.next()?;
    let target = halves.next()?;
    if halves.next().is_some() {
        return None;
    }
    Some((source, target))
}

/// True if any token of a target sense equals `word` exactly.
///
/// Tokens are produced by splitting on `;`, then whitespace, then `-`,
/// so `well-known` yields the tokens `well` and `known`. There is no
/// substring matching and no case folding.
fn sense_contains(sense: &str, word: &str) -> bool {
    sense
        .split(';')
        .flat_map(str::split_whitespace)
        .flat_map(|part| part.split('-'))
        .any(|token| token == word)
}
