//! Scan orchestrator with progress tracking.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::features::extract;
use crate::inference::{load_model_config, UrlClassifier};
use crate::report::UrlScanResult;

/// Configuration for a scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub model_path: PathBuf,
    pub config_path: PathBuf,
    pub urls: Vec<String>,
}

/// Atomic progress tracking — safe to poll from another thread.
pub struct ScanProgress {
    pub total_urls: AtomicUsize,
    pub scanned_urls: AtomicUsize,
    pub malicious_count: AtomicUsize,
    pub error_count: AtomicUsize,
    pub cancel: AtomicBool,
}

impl ScanProgress {
    pub fn new() -> Self {
        Self {
            total_urls: AtomicUsize::new(0),
            scanned_urls: AtomicUsize::new(0),
            malicious_count: AtomicUsize::new(0),
            error_count: AtomicUsize::new(0),
            cancel: AtomicBool::new(false),
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a URL list file: one URL per line, blank lines and `#` comments
/// skipped, surrounding whitespace trimmed.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("cannot read URL list {}", path.display()))?;

    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}

/// Run a full scan with progress tracking. Blocking — call from a
/// background thread if the caller needs to stay responsive.
///
/// Feature extraction is total, so per-URL failures can only come from
/// inference; they are captured in the result instead of aborting the batch.
pub fn run_scan(config: &ScanConfig, progress: &Arc<ScanProgress>) -> Result<Vec<UrlScanResult>> {
    let classifier = Arc::new(UrlClassifier::load(&config.model_path)?);
    let model_config = load_model_config(&config.config_path)?;
    model_config.validate()?;

    progress.total_urls.store(config.urls.len(), Ordering::Relaxed);

    if config.urls.is_empty() {
        return Ok(Vec::new());
    }

    let results: Vec<UrlScanResult> = config
        .urls
        .par_iter()
        .filter_map(|url| {
            if progress.cancel.load(Ordering::Relaxed) {
                return None;
            }

            let features = extract(url);
            let result = match classifier.predict(&features) {
                Ok(verdict) => {
                    if verdict.is_malicious() {
                        progress.malicious_count.fetch_add(1, Ordering::Relaxed);
                    }
                    debug!(%url, malicious = verdict.is_malicious(), "classified");
                    UrlScanResult {
                        url: url.clone(),
                        is_malicious: verdict.is_malicious(),
                        features: Some(features),
                        error: None,
                    }
                }
                Err(e) => {
                    progress.error_count.fetch_add(1, Ordering::Relaxed);
                    UrlScanResult {
                        url: url.clone(),
                        is_malicious: false,
                        features: Some(features),
                        error: Some(format!("inference error: {e}")),
                    }
                }
            };

            progress.scanned_urls.fetch_add(1, Ordering::Relaxed);
            Some(result)
        })
        .collect();

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_list_skips_blanks_and_comments() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "# scan targets").unwrap();
        writeln!(tmp).unwrap();
        writeln!(tmp, "https://www.google.com").unwrap();
        writeln!(tmp, "  http://bit.ly/xyz123  ").unwrap();
        writeln!(tmp, "   ").unwrap();
        tmp.flush().unwrap();

        let urls = read_url_list(tmp.path()).unwrap();
        assert_eq!(
            urls,
            vec!["https://www.google.com", "http://bit.ly/xyz123"]
        );
    }

    #[test]
    fn url_list_missing_file_errors() {
        assert!(read_url_list(Path::new("/nonexistent/urls.txt")).is_err());
    }

    #[test]
    fn progress_starts_at_zero() {
        let progress = ScanProgress::new();
        assert_eq!(progress.total_urls.load(Ordering::Relaxed), 0);
        assert_eq!(progress.scanned_urls.load(Ordering::Relaxed), 0);
        assert_eq!(progress.malicious_count.load(Ordering::Relaxed), 0);
        assert_eq!(progress.error_count.load(Ordering::Relaxed), 0);
        assert!(!progress.cancel.load(Ordering::Relaxed));
    }

    #[test]
    fn scan_with_missing_model_errors_up_front() {
        let config = ScanConfig {
            model_path: PathBuf::from("/nonexistent/model.onnx"),
            config_path: PathBuf::from("/nonexistent/config.json"),
            urls: vec!["https://www.google.com".into()],
        };
        let progress = Arc::new(ScanProgress::new());
        assert!(run_scan(&config, &progress).is_err());
    }
}
