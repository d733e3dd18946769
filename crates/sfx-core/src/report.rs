//! Threshold reporting over a finished suffix trie
//!
//! Traversal is depth-first with an explicit stack. A node below the
//! threshold is not descended into: counts never grow with depth, so nothing
//! underneath it can qualify.

use std::borrow::Cow;
use std::fmt;
use std::io::Write;

use serde::{Serialize, Serializer};

use crate::error::{Result, SfxError};
use crate::labels::join_reversed;
use crate::trie::{SuffixTrie, TrieNode};

/// Default minimum occurrence count.
pub const DEFAULT_THRESHOLD: u64 = 2;

// =============================================================================
// Options
// =============================================================================

/// Order of reported suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Traversal order. Sibling order is arbitrary.
    #[default]
    Unordered,
    /// Byte order of the suffix text.
    Lexical,
    /// Highest count first, ties in byte order.
    Count,
}

/// Line format of a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One suffix per line.
    #[default]
    Plain,
    /// `suffix<TAB>count` per line.
    Counts,
    /// A single JSON array of objects.
    Json,
}

/// Reporting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub threshold: u64,
    pub sort: SortOrder,
    pub format: OutputFormat,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sort: SortOrder::default(),
            format: OutputFormat::default(),
        }
    }
}

// =============================================================================
// Suffix
// =============================================================================

/// A reported suffix in conventional order (`mail.example.com`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suffix {
    #[serde(rename = "suffix", serialize_with = "serialize_lossy")]
    pub name: Vec<u8>,
    pub count: u64,
    pub depth: usize,
}

impl Suffix {
    /// Suffix text, with invalid UTF-8 replaced.
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}

fn serialize_lossy<S: Serializer>(name: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&String::from_utf8_lossy(name))
}

// =============================================================================
// Traversal
// =============================================================================

/// Iterator over every non-root node whose count reaches the threshold.
pub struct Qualifying<'a> {
    stack: Vec<(usize, &'a [u8], &'a TrieNode)>,
    path: Vec<&'a [u8]>,
    threshold: u64,
}

impl<'a> Iterator for Qualifying<'a> {
    type Item = Suffix;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, label, node)) = self.stack.pop() {
            self.path.truncate(depth - 1);
            self.path.push(label);

            if node.count() < self.threshold {
                continue;
            }

            self.stack
                .extend(node.children().map(|(child_label, child)| (depth + 1, child_label, child)));

            return Some(Suffix {
                name: join_reversed(&self.path),
                count: node.count(),
                depth,
            });
        }
        None
    }
}

/// Walk `trie` and yield each suffix with count ≥ `threshold`.
///
/// A threshold of 0 or 1 yields every node.
pub fn qualifying(trie: &SuffixTrie, threshold: u64) -> Qualifying<'_> {
    let stack = trie
        .root()
        .children()
        .map(|(label, node)| (1, label, node))
        .collect();

    Qualifying {
        stack,
        path: Vec::new(),
        threshold,
    }
}

/// Collect qualifying suffixes in the requested order.
pub fn collect_suffixes(trie: &SuffixTrie, threshold: u64, sort: SortOrder) -> Vec<Suffix> {
    let mut suffixes: Vec<Suffix> = qualifying(trie, threshold).collect();
    sort_suffixes(&mut suffixes, sort);
    log::debug!(
        "report: {} of {} suffixes reach threshold {}",
        suffixes.len(),
        trie.node_count(),
        threshold
    );
    suffixes
}

/// Sort in place. `Unordered` leaves the slice as is.
pub fn sort_suffixes(suffixes: &mut [Suffix], sort: SortOrder) {
    match sort {
        SortOrder::Unordered => {}
        SortOrder::Lexical => suffixes.sort_unstable_by(|a, b| a.name.cmp(&b.name)),
        SortOrder::Count => {
            suffixes.sort_unstable_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)))
        }
    }
}

// =============================================================================
// Output
// =============================================================================

fn write_line<W: Write>(writer: &mut W, suffix: &Suffix, format: OutputFormat) -> std::io::Result<()> {
    writer.write_all(&suffix.name)?;
    if format == OutputFormat::Counts {
        write!(writer, "\t{}", suffix.count)?;
    }
    writer.write_all(b"\n")
}

/// Write the report for `trie` to `writer`. Returns the number of suffixes
/// written.
///
/// Unsorted line output streams straight from the traversal. Sorted or JSON
/// output is collected first.
pub fn write_report<W: Write>(trie: &SuffixTrie, opts: &ReportOptions, writer: &mut W) -> Result<usize> {
    if opts.sort == SortOrder::Unordered && opts.format != OutputFormat::Json {
        let mut written = 0usize;
        for suffix in qualifying(trie, opts.threshold) {
            write_line(writer, &suffix, opts.format).map_err(SfxError::Write)?;
            written += 1;
        }
        log::debug!("report: streamed {} suffixes", written);
        return Ok(written);
    }

    let suffixes = collect_suffixes(trie, opts.threshold, opts.sort);
    write_suffixes(&suffixes, opts.format, writer)?;
    Ok(suffixes.len())
}

/// Write already collected suffixes.
pub fn write_suffixes<W: Write>(suffixes: &[Suffix], format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_vec_pretty(suffixes)?;
            json.push(b'\n');
            writer.write_all(&json).map_err(SfxError::Write)
        }
        OutputFormat::Plain | OutputFormat::Counts => {
            for suffix in suffixes {
                write_line(writer, suffix, format).map_err(SfxError::Write)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{reversed_labels, split_labels};

    fn trie_of(domains: &[&str]) -> SuffixTrie {
        let mut trie = SuffixTrie::new();
        for domain in domains {
            trie.insert(reversed_labels(domain.as_bytes()));
        }
        trie
    }

    fn names(trie: &SuffixTrie, threshold: u64) -> Vec<String> {
        collect_suffixes(trie, threshold, SortOrder::Lexical)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_shared_parent() {
        let trie = trie_of(&["a.b.c", "x.b.c", "y.b.c"]);
        assert_eq!(names(&trie, 2), vec!["b.c", "c"]);
    }

    #[test]
    fn test_duplicates() {
        let trie = trie_of(&["foo.com", "foo.com", "bar.com"]);
        let suffixes = collect_suffixes(&trie, 2, SortOrder::Count);
        assert_eq!(suffixes.len(), 2);
        assert_eq!(suffixes[0].to_string(), "com");
        assert_eq!(suffixes[0].count, 3);
        assert_eq!(suffixes[1].to_string(), "foo.com");
        assert_eq!(suffixes[1].count, 2);
    }

    #[test]
    fn test_empty_trie_reports_nothing() {
        let trie = SuffixTrie::new();
        for threshold in [0, 1, 2, 100] {
            assert!(qualifying(&trie, threshold).next().is_none());
        }
    }

    #[test]
    fn test_single_label() {
        let trie = trie_of(&["localhost"]);
        assert_eq!(names(&trie, 1), vec!["localhost"]);
    }

    #[test]
    fn test_leading_dot() {
        let trie = trie_of(&[".example.com"]);
        assert_eq!(names(&trie, 1), vec![".example.com", "com", "example.com"]);
    }

    #[test]
    fn test_threshold_boundary() {
        let trie = trie_of(&["a.com", "a.com", "a.com", "b.com"]);
        assert!(names(&trie, 3).contains(&"a.com".to_string()));
        assert!(!names(&trie, 4).contains(&"a.com".to_string()));
        assert_eq!(names(&trie, 4), vec!["com"]);
        assert_eq!(names(&trie, 5), Vec::<String>::new());
    }

    #[test]
    fn test_threshold_zero_equals_one() {
        let trie = trie_of(&["a.b.c", "d.e"]);
        assert_eq!(names(&trie, 0), names(&trie, 1));
        assert_eq!(names(&trie, 1).len(), 5);
    }

    #[test]
    fn test_each_suffix_once() {
        let trie = trie_of(&["a.b.c", "a.b.c", "b.c", "z.a.b.c"]);
        let mut all = names(&trie, 1);
        let before = all.len();
        all.dedup();
        assert_eq!(all.len(), before);
        assert_eq!(before, trie.node_count());
    }

    #[test]
    fn test_round_trip_through_splitter() {
        let trie = trie_of(&["mail.example.com", "x..y.org", "."]);
        for suffix in qualifying(&trie, 1) {
            let path: Vec<&[u8]> = reversed_labels(&suffix.name).collect();
            assert_eq!(path.len(), suffix.depth);
            assert_eq!(trie.count_of(path), suffix.count);
            assert_eq!(split_labels(&suffix.name).count(), suffix.depth);
        }
    }

    #[test]
    fn test_write_plain_and_counts() {
        let trie = trie_of(&["foo.com", "foo.com", "bar.com"]);

        let mut out = Vec::new();
        let opts = ReportOptions { sort: SortOrder::Lexical, ..Default::default() };
        assert_eq!(write_report(&trie, &opts, &mut out).unwrap(), 2);
        assert_eq!(out, b"com\nfoo.com\n");

        let mut out = Vec::new();
        let opts = ReportOptions {
            sort: SortOrder::Count,
            format: OutputFormat::Counts,
            ..Default::default()
        };
        write_report(&trie, &opts, &mut out).unwrap();
        assert_eq!(out, b"com\t3\nfoo.com\t2\n");
    }

    #[test]
    fn test_write_unordered_streams_all() {
        let trie = trie_of(&["a.b.c", "x.b.c", "y.b.c"]);
        let mut out = Vec::new();
        let written = write_report(&trie, &ReportOptions::default(), &mut out).unwrap();
        assert_eq!(written, 2);

        let mut lines: Vec<&str> = std::str::from_utf8(&out).unwrap().lines().collect();
        lines.sort_unstable();
        assert_eq!(lines, vec!["b.c", "c"]);
    }

    #[test]
    fn test_write_json() {
        let trie = trie_of(&["foo.com", "foo.com"]);
        let mut out = Vec::new();
        let opts = ReportOptions {
            sort: SortOrder::Lexical,
            format: OutputFormat::Json,
            ..Default::default()
        };
        write_report(&trie, &opts, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "suffix": "com", "count": 2, "depth": 1 },
                { "suffix": "foo.com", "count": 2, "depth": 2 },
            ])
        );
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let trie = trie_of(&["foo.com", "foo.com"]);
        for format in [OutputFormat::Plain, OutputFormat::Counts, OutputFormat::Json] {
            for sort in [SortOrder::Unordered, SortOrder::Lexical] {
                let opts = ReportOptions { sort, format, ..Default::default() };
                let err = write_report(&trie, &opts, &mut FailingWriter).unwrap_err();
                assert!(matches!(err, SfxError::Write(_)), "{:?} {:?}: {:?}", format, sort, err);
            }
        }
    }

    #[test]
    fn test_default_options() {
        let opts = ReportOptions::default();
        assert_eq!(opts.threshold, 2);
        assert_eq!(opts.sort, SortOrder::Unordered);
        assert_eq!(opts.format, OutputFormat::Plain);
    }
}
