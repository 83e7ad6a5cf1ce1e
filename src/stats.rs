use std::collections::HashSet;

use crate::scanner::ScanReport;

/// Stores statistics about a scan
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total number of documents
    pub total_documents: usize,

    /// Number of distinct directories holding documents
    pub total_directories: usize,

    /// Matching files left out as binary or unreadable
    pub skipped: usize,
}

/// Collect statistics about the given scan
pub fn collect_stats(report: &ScanReport) -> ScanStats {
    let directories: HashSet<_> = report
        .documents
        .iter()
        .filter_map(|doc| doc.path.parent())
        .collect();

    ScanStats {
        total_documents: report.documents.len(),
        total_directories: directories.len(),
        skipped: report.skipped,
    }
}
