use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ignore::{DirEntry, Walk, WalkBuilder};
use ptree::{PrintConfig, TreeBuilder};
use regex::Regex;

use crate::config::Language;
use crate::error::{MakeSumError, Result};

/// A file belonging to the scanned language
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative: PathBuf,
}

#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,
    pub documents: Vec<Document>,
    /// Matching files left out because they look binary or could not be read
    pub skipped: usize,
}

/// Find every document of `language` below `root`
pub fn scan(root: &Path, language: &Language, exclude_patterns: &[String]) -> Result<ScanReport> {
    let extension = Regex::new(language.extension).map_err(|source| MakeSumError::Pattern {
        language: language.id.to_string(),
        source,
    })?;

    let mut report = ScanReport {
        root: root.to_path_buf(),
        documents: Vec::new(),
        skipped: 0,
    };

    for result in build_walker(root, exclude_patterns) {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Failed to access entry: {err}");
                continue;
            }
        };

        if !is_candidate(&entry, &extension) {
            continue;
        }

        let path = entry.path();
        let buffer = match std::fs::read(path) {
            Ok(buffer) => buffer,
            Err(err) => {
                log::warn!("Failed to read {}: {err}", path.display());
                report.skipped += 1;
                continue;
            }
        };

        if is_binary(&buffer) {
            log::debug!("Skipping binary file {}", path.display());
            report.skipped += 1;
            continue;
        }

        log::debug!("Found {}", path.display());
        report.documents.push(Document {
            path: path.to_path_buf(),
            relative: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
        });
    }

    Ok(report)
}

/// Build a walker that skips hidden entries and excluded patterns
fn build_walker(root: &Path, exclude_patterns: &[String]) -> Walk {
    let mut builder = WalkBuilder::new(root);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    let patterns: Vec<glob::Pattern> = exclude_patterns
        .iter()
        .filter_map(|pattern| match glob::Pattern::new(pattern) {
            Ok(compiled) => Some(compiled),
            Err(err) => {
                log::warn!("Ignoring invalid exclude pattern `{pattern}`: {err}");
                None
            }
        })
        .collect();

    let base = root.to_path_buf();
    builder.filter_entry(move |entry| {
        let hidden = entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.') && s != "." && s != "..");
        if hidden && entry.depth() > 0 {
            return false;
        }

        let relative = entry.path().strip_prefix(&base).unwrap_or(entry.path());
        let excluded = patterns.iter().any(|pattern| {
            pattern.matches_path(relative)
                || entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| pattern.matches(name))
        });
        if excluded {
            log::debug!("Excluding {}", entry.path().display());
        }
        !excluded
    });

    builder.build()
}

fn is_candidate(entry: &DirEntry, extension: &Regex) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| extension.is_match(name))
}

/// Check if file content is binary
fn is_binary(buffer: &[u8]) -> bool {
    if infer::get(buffer).is_some_and(|kind| !matches!(kind.matcher_type(), infer::MatcherType::Text)) {
        return true;
    }

    // Null bytes also indicate binary content
    buffer.iter().take(8000).any(|byte| *byte == 0)
}

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
}

/// Write a tree of the documents in `report`
pub fn write_tree(writer: &mut dyn Write, report: &ScanReport) -> io::Result<()> {
    let mut root = Node::default();
    for doc in &report.documents {
        let mut node = &mut root;
        for component in doc.relative.components() {
            let name = component.as_os_str().to_string_lossy().to_string();
            node = node.children.entry(name).or_default();
        }
    }

    let mut tree = TreeBuilder::new(report.root.to_string_lossy().to_string());
    add_children(&mut tree, &root);

    ptree::write_tree_with(&tree.build(), writer, &PrintConfig::default())
}

fn add_children(tree: &mut TreeBuilder, node: &Node) {
    for (name, child) in &node.children {
        if child.children.is_empty() {
            tree.add_empty_child(name.clone());
        } else {
            tree.begin_child(name.clone());
            add_children(tree, child);
            tree.end_child();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG;
    use std::fs;
    use tempfile::tempdir;

    fn markdown() -> &'static Language {
        CONFIG.language("markdown").unwrap()
    }

    #[test]
    fn scan_collects_matching_files_in_name_order() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("guide")).unwrap();
        fs::write(dir.path().join("README.md"), "[](MakeSummary)\n").unwrap();
        fs::write(dir.path().join("guide/intro.md"), "# Intro\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "[](MakeSummary)\n").unwrap();

        let report = scan(dir.path(), markdown(), &[]).unwrap();

        let found: Vec<_> = report.documents.iter().map(|doc| doc.relative.clone()).collect();
        assert_eq!(
            found,
            vec![PathBuf::from("README.md"), PathBuf::from("guide/intro.md")]
        );
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn scan_skips_hidden_and_excluded_entries() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join(".cache/old.md"), "[](MakeSummary)\n").unwrap();
        fs::write(dir.path().join("drafts/wip.md"), "[](MakeSummary)\n").unwrap();
        fs::write(dir.path().join("CHANGELOG.md"), "[](MakeSummary)\n").unwrap();
        fs::write(dir.path().join("index.md"), "[](MakeSummary)\n").unwrap();

        let excludes = vec!["drafts".to_string(), "CHANGE*".to_string()];
        let report = scan(dir.path(), markdown(), &excludes).unwrap();

        let names: Vec<_> = report.documents.iter().map(|doc| doc.relative.clone()).collect();
        assert_eq!(names, vec![PathBuf::from("index.md")]);
    }

    #[test]
    fn scan_skips_binary_content() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("image.md"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR").unwrap();
        fs::write(dir.path().join("text.md"), "hello\n").unwrap();

        let report = scan(dir.path(), markdown(), &[]).unwrap();

        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn scan_ignores_document_content() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("open.md"), "[](BeginSummary)\n").unwrap();
        fs::write(dir.path().join("plain.md"), "nothing\n").unwrap();

        let report = scan(dir.path(), markdown(), &[]).unwrap();

        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn tree_lists_documents_under_their_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("book")).unwrap();
        fs::write(dir.path().join("book/chapter.md"), "[](MakeSummary)\n").unwrap();
        fs::write(dir.path().join("plain.md"), "nothing\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "nothing\n").unwrap();

        let report = scan(dir.path(), markdown(), &[]).unwrap();
        let mut rendered = Vec::new();
        write_tree(&mut rendered, &report).unwrap();
        let rendered = String::from_utf8(rendered).unwrap();

        assert!(rendered.contains("book"));
        assert!(rendered.contains("chapter.md"));
        assert!(rendered.contains("plain.md"));
        assert!(!rendered.contains("notes.txt"));
    }
}
