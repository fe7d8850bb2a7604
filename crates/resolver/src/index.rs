//! Reverse-index construction (§4.4, C4): `byPath`/`byStem` plus the Java
//! FQN map and package-directory map the walker consults for same-package
//! linking.

use deadcode_core::{FileMetadata, FileRecord, Language, ReverseIndex};

/// Builds the reverse index from a set of parsed file records.
///
/// Java/Kotlin files contribute to the FQN map preferentially using the
/// parser-extracted `packageName` plus the class name inferred from the
/// filename; when `packageName` is absent, the path is matched against
/// `java_source_roots` to derive an FQN instead (§4.4).
pub fn build_reverse_index(records: Vec<FileRecord>, java_source_roots: &[String]) -> ReverseIndex {
    let mut index = ReverseIndex::new();

    for record in &records {
        if !matches!(record.language, Language::Java | Language::Kotlin) {
            continue;
        }
        let Some(class_name) = class_name_from_path(&record.relative_path) else {
            continue;
        };

        let fqn = match &record.metadata {
            FileMetadata::Java {
                package_name: Some(pkg),
                ..
            } if !pkg.is_empty() => Some(format!("{pkg}.{class_name}")),
            _ => fqn_from_source_roots(&record.relative_path, java_source_roots),
        };

        if let Some(fqn) = fqn {
            let package_dir = fqn
                .rsplit_once('.')
                .map(|(pkg, _)| pkg.replace('.', "/"))
                .unwrap_or_default();
            index.insert_java_fqn(fqn, record.relative_path.clone());
            index.insert_java_package_member(package_dir, record.relative_path.clone());
        }
    }

    for record in records {
        index.insert(record);
    }

    index
}

fn class_name_from_path(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next()?;
    let stem = file_name.rsplit_once('.').map(|(s, _)| s).unwrap_or(file_name);
    Some(stem.to_string())
}

fn fqn_from_source_roots(path: &str, java_source_roots: &[String]) -> Option<String> {
    for root in java_source_roots {
        let prefix = format!("{root}/");
        if let Some(rest) = path.strip_prefix(&prefix) {
            let stem = rest.rsplit_once('.').map(|(s, _)| s).unwrap_or(rest);
            return Some(stem.replace('/', "."));
        }
    }
    None
}
