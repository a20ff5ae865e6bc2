use std::collections::HashMap;
use std::path::PathBuf;

use log::info;

use crate::scanner::HashResult;

/// Two or more paths whose contents share one digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub digest: String,
    pub paths: Vec<PathBuf>,
}

/// Groups successfully hashed paths by digest and keeps the groups with more
/// than one member. Results with an absent digest are ignored.
///
/// Paths within a group are sorted lexically and groups are ordered by their
/// first member, so repeated scans of an unmodified tree report identically.
pub fn find_duplicates(results: &[HashResult]) -> Vec<DuplicateGroup> {
    info!("Analyzing {} hash results for duplicates", results.len());

    let mut hash_groups: HashMap<&str, Vec<PathBuf>> = HashMap::new();
    for result in results {
        if let Some(digest) = result.digest.as_deref() {
            hash_groups.entry(digest).or_default().push(result.path.clone());
        }
    }

    let total_hashes = hash_groups.len();

    // Filter out groups with only one file (no duplicates)
    hash_groups.retain(|_, group| group.len() > 1);

    let mut groups: Vec<DuplicateGroup> = hash_groups
        .into_iter()
        .map(|(digest, mut paths)| {
            paths.sort();
            DuplicateGroup {
                digest: digest.to_string(),
                paths,
            }
        })
        .collect();
    groups.sort_by(|a, b| a.paths[0].cmp(&b.paths[0]));

    let total_duplicates: usize = groups.iter().map(|group| group.paths.len() - 1).sum();
    info!(
        "Duplicate analysis complete: {} unique hashes, {} duplicate groups, {} duplicate files",
        total_hashes,
        groups.len(),
        total_duplicates
    );

    groups
}
