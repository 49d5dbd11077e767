use crate::discovery::discover_files;
use crate::error::ScanError;
use crate::models::{CommentMatch, Config, FileScan, ScanReport};
use regex::{RegexSet, RegexSetBuilder};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// Scan every matching file under the configured root
///
/// Discovery failures are returned as errors. A file that cannot be read or
/// decoded stops the scan, but the files scanned before it are kept in the
/// returned report together with the failure.
pub fn scan_directory(config: &Config) -> Result<ScanReport, ScanError> {
    let scanner = Scanner::from_config(config)?;
    let files = discover_files(config)?;

    let mut report = ScanReport::new(
        &config.markers,
        config.case_sensitive,
        config.root.clone(),
    );

    for path in files {
        log::debug!("Scanning {}", path.display());

        match scanner.scan_file(&path) {
            Ok(matches) => report.record_file(FileScan { path, matches }),
            Err(err) => {
                log::warn!("Stopping scan: {}", err);
                report.abort(path, err.to_string());
                break;
            }
        }
    }

    log::debug!(
        "Scanned {} file(s), found {} marker(s)",
        report.files.len(),
        report.total_count
    );

    Ok(report)
}

/// Case-(in)sensitive substring matcher over the configured markers
#[derive(Debug)]
pub struct MarkerMatcher {
    markers: Vec<String>,
    set: RegexSet,
}

impl MarkerMatcher {
    pub fn new(markers: &[String], case_sensitive: bool) -> Result<Self, ScanError> {
        let set = RegexSetBuilder::new(markers.iter().map(|m| regex::escape(m)))
            .case_insensitive(!case_sensitive)
            .build()?;

        Ok(Self {
            markers: markers.to_vec(),
            set,
        })
    }

    /// Markers contained anywhere in `text`, each at most once, in configured order
    pub fn matching<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a str> + 'a {
        let hits = self.set.matches(text);
        hits.into_iter().map(move |idx| self.markers[idx].as_str())
    }
}

/// Return the comment text of a line, or `None` if the line is not a comment
///
/// The line is trimmed first. Without `trailing`, only lines that start with
/// the prefix count; with it, the first occurrence of the prefix anywhere in
/// the line starts the comment.
pub fn extract_comment<'a>(line: &'a str, prefix: &str, trailing: bool) -> Option<&'a str> {
    let trimmed = line.trim();
    if trailing {
        trimmed
            .find(prefix)
            .map(|idx| &trimmed[idx + prefix.len()..])
    } else {
        trimmed.strip_prefix(prefix)
    }
}

/// Line scanner configured with a marker matcher and a comment prefix
#[derive(Debug)]
pub struct Scanner {
    matcher: MarkerMatcher,
    comment_prefix: String,
    trailing_comments: bool,
}

impl Scanner {
    pub fn from_config(config: &Config) -> Result<Self, ScanError> {
        Ok(Self {
            matcher: MarkerMatcher::new(&config.markers, config.case_sensitive)?,
            comment_prefix: config.comment_prefix.clone(),
            trailing_comments: config.trailing_comments,
        })
    }

    /// Scan a single file for markers in its line comments
    pub fn scan_file(&self, path: &Path) -> Result<Vec<CommentMatch>, ScanError> {
        let file = File::open(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        self.scan_lines(path, BufReader::new(file))
    }

    /// Scan lines from any reader, reporting matches against `path`
    pub fn scan_lines<R: BufRead>(
        &self,
        path: &Path,
        reader: R,
    ) -> Result<Vec<CommentMatch>, ScanError> {
        let mut matches = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line_number = line_num + 1;

            let line = line_result.map_err(|source| match source.kind() {
                ErrorKind::InvalidData => ScanError::Decode {
                    path: path.to_path_buf(),
                    line: line_number,
                },
                _ => ScanError::Read {
                    path: path.to_path_buf(),
                    source,
                },
            })?;

            let Some(comment) = extract_comment(&line, &self.comment_prefix, self.trailing_comments)
            else {
                continue;
            };

            for marker in self.matcher.matching(comment) {
                matches.push(CommentMatch {
                    marker: marker.to_string(),
                    file_path: path.to_path_buf(),
                    line_number,
                    comment: comment.trim().to_string(),
                });
            }
        }

        Ok(matches)
    }
}
