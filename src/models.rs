use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single marker keyword found inside a line comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMatch {
    /// Marker label as configured (e.g. "FIXME"), regardless of the case in the source
    pub marker: String,

    /// Path to the file containing the comment
    pub file_path: PathBuf,

    /// Line number where the comment was found (1-indexed)
    pub line_number: usize,

    /// Comment text after the prefix, trimmed
    pub comment: String,
}

/// Matches found in one scanned file, in line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileScan {
    pub path: PathBuf,
    pub matches: Vec<CommentMatch>,
}

/// Final tally for one marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerCount {
    pub marker: String,
    pub count: usize,
}

/// The file whose read stopped the scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// How a run ends, and therefore which exit status it gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Scan completed and no fail-set marker was found
    Clean,
    /// Scan completed but at least one fail-set marker was found
    PolicyViolation,
    /// Scan stopped early on an unreadable file
    Aborted,
}

impl Verdict {
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Clean => 0,
            Verdict::PolicyViolation => 1,
            Verdict::Aborted => 2,
        }
    }
}

/// Result of one scan run: every file scanned, its matches and the counts per marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Root directory that was scanned
    pub scan_path: PathBuf,

    /// When the scan was performed
    pub scan_time: DateTime<Utc>,

    /// Scanned files in scan order
    pub files: Vec<FileScan>,

    /// Count per configured marker, in configured order
    pub counts: Vec<MarkerCount>,

    /// Total number of matches
    pub total_count: usize,

    /// Set when the scan stopped before every discovered file was read
    pub failure: Option<ScanFailure>,

    /// Whether marker labels were compared with exact case
    pub case_sensitive: bool,
}

impl ScanReport {
    /// Create an empty report with a zero count for every marker
    pub fn new(markers: &[String], case_sensitive: bool, scan_path: PathBuf) -> Self {
        Self {
            scan_path,
            scan_time: Utc::now(),
            files: Vec::new(),
            counts: markers
                .iter()
                .map(|marker| MarkerCount {
                    marker: marker.clone(),
                    count: 0,
                })
                .collect(),
            total_count: 0,
            failure: None,
            case_sensitive,
        }
    }

    /// Add a scanned file and bump the counters for its matches
    pub fn record_file(&mut self, file: FileScan) {
        for found in &file.matches {
            match self.counts.iter_mut().find(|c| c.marker == found.marker) {
                Some(entry) => entry.count += 1,
                None => self.counts.push(MarkerCount {
                    marker: found.marker.clone(),
                    count: 1,
                }),
            }
            self.total_count += 1;
        }
        self.files.push(file);
    }

    /// Record the file that stopped the scan
    pub fn abort(&mut self, path: PathBuf, reason: String) {
        self.failure = Some(ScanFailure { path, reason });
    }

    /// Count for a marker label (0 for unknown markers)
    pub fn count(&self, marker: &str) -> usize {
        self.counts
            .iter()
            .find(|c| c.marker == marker)
            .map_or(0, |c| c.count)
    }

    /// All matches across all files, in scan order
    pub fn matches(&self) -> impl Iterator<Item = &CommentMatch> {
        self.files.iter().flat_map(|file| file.matches.iter())
    }

    /// Fail-set markers that were found at least once
    pub fn violations(&self, fail_on: &[String]) -> Vec<&MarkerCount> {
        self.counts
            .iter()
            .filter(|c| {
                c.count > 0
                    && fail_on
                        .iter()
                        .any(|f| same_marker(f, &c.marker, self.case_sensitive))
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    pub fn verdict(&self, fail_on: &[String]) -> Verdict {
        if !self.is_complete() {
            Verdict::Aborted
        } else if !self.violations(fail_on).is_empty() {
            Verdict::PolicyViolation
        } else {
            Verdict::Clean
        }
    }
}

/// Compare two marker labels under the configured case rule
pub fn same_marker(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

/// Configuration for a scan run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Directory to scan
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File-name suffixes to include (e.g. ".go")
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Marker keywords to detect
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,

    /// Markers that fail the gate when found
    #[serde(default = "default_fail_on")]
    pub fail_on: Vec<String>,

    /// Match markers with exact case
    #[serde(default)]
    pub case_sensitive: bool,

    /// Prefix that starts a line comment
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,

    /// Also accept comments that follow code on the same line
    #[serde(default)]
    pub trailing_comments: bool,

    /// Directory names pruned from the walk
    #[serde(default)]
    pub ignored_dirs: Vec<String>,

    /// Skip files excluded by .gitignore and hidden files
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            extensions: default_extensions(),
            markers: default_markers(),
            fail_on: default_fail_on(),
            case_sensitive: false,
            comment_prefix: default_comment_prefix(),
            trailing_comments: false,
            ignored_dirs: Vec::new(),
            respect_gitignore: false,
        }
    }
}

impl Config {
    /// The configured marker that `name` refers to, if any
    pub fn find_marker(&self, name: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| same_marker(m, name, self.case_sensitive))
            .map(String::as_str)
    }

    /// Rewrite fail-set entries in the spelling of the marker they refer to
    pub fn resolve_fail_on(&mut self) {
        let resolved: Vec<String> = self
            .fail_on
            .iter()
            .map(|f| self.find_marker(f).unwrap_or(f).to_string())
            .collect();
        self.fail_on = resolved;
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_extensions() -> Vec<String> {
    vec![".go".to_string()]
}

fn default_markers() -> Vec<String> {
    vec!["FIXME".to_string(), "TODO".to_string()]
}

fn default_fail_on() -> Vec<String> {
    vec!["FIXME".to_string()]
}

fn default_comment_prefix() -> String {
    "//".to_string()
}
