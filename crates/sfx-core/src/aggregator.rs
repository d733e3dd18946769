//! Line ingestion into a suffix trie.

use std::io::BufRead;

use crate::error::{Result, SfxError};
use crate::labels::{normalize_line, reversed_labels};
use crate::report::{self, ReportOptions, SortOrder, Suffix};
use crate::trie::SuffixTrie;

/// Initial capacity of the reusable line buffer.
const LINE_BUFFER_CAPACITY: usize = 4096;

/// Counters for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Logical lines seen, blank ones included.
    pub lines_read: u64,
    /// Lines that were blank after trimming.
    pub lines_skipped: u64,
    /// Labels inserted across all non-blank lines.
    pub labels_inserted: u64,
}

impl IngestStats {
    /// Lines that reached the trie.
    pub fn lines_ingested(&self) -> u64 {
        self.lines_read - self.lines_skipped
    }
}

/// Owns the trie while input is consumed.
#[derive(Debug, Default)]
pub struct Aggregator {
    trie: SuffixTrie,
    stats: IngestStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one raw line. Returns `false` if the line was blank.
    pub fn ingest_line(&mut self, line: &[u8]) -> bool {
        self.stats.lines_read += 1;

        let domain = match normalize_line(line) {
            Some(domain) => domain,
            None => {
                self.stats.lines_skipped += 1;
                log::trace!("skipping blank line {}", self.stats.lines_read);
                return false;
            }
        };

        let depth = self.trie.insert(reversed_labels(&domain));
        self.stats.labels_inserted += depth as u64;
        true
    }

    /// Ingest every line of `reader` until end of input.
    ///
    /// Lines have no length limit. A last line without a newline is still
    /// ingested. Returns the stats accumulated by this call only.
    pub fn ingest_reader<R: BufRead>(&mut self, mut reader: R) -> Result<IngestStats> {
        let before = self.stats;
        let mut buf = Vec::with_capacity(LINE_BUFFER_CAPACITY);

        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(SfxError::Read)?;
            if n == 0 {
                break;
            }
            self.ingest_line(&buf);
        }

        let run = IngestStats {
            lines_read: self.stats.lines_read - before.lines_read,
            lines_skipped: self.stats.lines_skipped - before.lines_skipped,
            labels_inserted: self.stats.labels_inserted - before.labels_inserted,
        };
        log::debug!(
            "ingested {} lines ({} blank), {} labels, {} trie nodes",
            run.lines_read,
            run.lines_skipped,
            run.labels_inserted,
            self.trie.node_count()
        );
        Ok(run)
    }

    /// Totals since construction.
    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    pub fn trie(&self) -> &SuffixTrie {
        &self.trie
    }

    /// Give up ownership of the trie.
    pub fn into_trie(self) -> SuffixTrie {
        self.trie
    }

    /// Suffixes with count ≥ `threshold`, in `sort` order.
    pub fn report(&self, threshold: u64, sort: SortOrder) -> Vec<Suffix> {
        report::collect_suffixes(&self.trie, threshold, sort)
    }

    /// Write the report described by `opts`. Returns the number of suffixes
    /// written.
    pub fn write_report<W: std::io::Write>(&self, opts: &ReportOptions, writer: &mut W) -> Result<usize> {
        report::write_report(&self.trie, opts, writer)
    }
}
