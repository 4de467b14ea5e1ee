//! Groups changed files by extension and measures how mixed the change is.

use super::types::FileTypeInfo;
use crate::github::types::PrFile;

/// Sentinel key for files without an extension (e.g., "Makefile", ".gitignore").
const NO_EXTENSION: &str = "no-extension";

/// Group PR files by extension, preserving first-encounter order.
///
/// Each distinct extension appears exactly once, with file count and
/// summed additions/deletions. The file list is small (GitHub caps a
/// page at 100 files), so a Vec with a linear scan keeps the ordering
/// guarantee obvious.
pub fn analyze_file_types(files: &[PrFile]) -> Vec<FileTypeInfo> {
    let mut groups: Vec<FileTypeInfo> = Vec::new();

    for file in files {
        let extension = file_extension(&file.filename);
        match groups.iter_mut().find(|g| g.extension == extension) {
            Some(group) => {
                group.count += 1;
                group.additions += file.additions;
                group.deletions += file.deletions;
            }
            None => groups.push(FileTypeInfo {
                extension,
                count: 1,
                additions: file.additions,
                deletions: file.deletions,
            }),
        }
    }

    groups
}

/// File-type diversity as normalized Shannon entropy in [0, 1].
///
/// Entropy of the per-extension file-count distribution, divided by the
/// maximum possible entropy log2(k) for k distinct extensions. Defined as
/// 0 for an empty PR or a single extension (the 0/0 and single-category
/// degenerate cases).
pub fn file_type_diversity(file_types: &[FileTypeInfo], total_files: usize) -> f64 {
    if total_files == 0 || file_types.len() <= 1 {
        return 0.0;
    }

    let total = total_files as f64;
    let entropy: f64 = file_types
        .iter()
        .map(|ft| {
            let p = ft.count as f64 / total;
            -p * p.log2()
        })
        .sum();

    entropy / (file_types.len() as f64).log2()
}

/// Lower-cased last `.`-suffix of the basename, including the dot.
/// Dotfiles (".gitignore") and names without a dot map to the sentinel.
fn file_extension(filename: &str) -> String {
    let basename = filename.rsplit('/').next().unwrap_or(filename);
    match basename.char_indices().rev().find(|&(_, c)| c == '.') {
        Some((idx, _)) if idx > 0 => basename[idx..].to_lowercase(),
        _ => NO_EXTENSION.to_string(),
    }
}
