//! Entry-point source 6 (§4.3): parser-metadata hints from `FileMetadata`.

use deadcode_core::{FileMetadata, FileRecord};

/// True if the parser-extracted metadata on this record, by itself, makes
/// the file a root.
pub fn is_metadata_root(record: &FileRecord) -> bool {
    match &record.metadata {
        FileMetadata::Python { has_main_block } => *has_main_block,
        FileMetadata::Java {
            has_main_method,
            is_spring_component,
            ..
        } => *has_main_method || *is_spring_component,
        FileMetadata::Go {
            is_main_package,
            has_main_function,
            has_init_function,
            is_test_file,
        } => (*is_main_package && *has_main_function) || *has_init_function || *is_test_file,
        FileMetadata::Rust {
            is_binary_crate,
            is_library_crate,
        } => *is_binary_crate || *is_library_crate,
        FileMetadata::JavaScript | FileMetadata::CSharp | FileMetadata::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deadcode_core::Language;

    fn with_metadata(metadata: FileMetadata) -> FileRecord {
        FileRecord {
            metadata,
            ..FileRecord::empty("f", Language::Other)
        }
    }

    #[test]
    fn python_main_block_is_a_root() {
        assert!(is_metadata_root(&with_metadata(FileMetadata::Python { has_main_block: true })));
    }

    #[test]
    fn go_main_package_requires_both_flags() {
        assert!(!is_metadata_root(&with_metadata(FileMetadata::Go {
            is_main_package: true,
            has_main_function: false,
            has_init_function: false,
            is_test_file: false,
        })));
        assert!(is_metadata_root(&with_metadata(FileMetadata::Go {
            is_main_package: true,
            has_main_function: true,
            has_init_function: false,
            is_test_file: false,
        })));
    }

    #[test]
    fn go_test_file_is_a_root_regardless_of_main() {
        assert!(is_metadata_root(&with_metadata(FileMetadata::Go {
            is_main_package: false,
            has_main_function: false,
            has_init_function: false,
            is_test_file: true,
        })));
    }

    #[test]
    fn rust_library_crate_root_is_a_root() {
        assert!(is_metadata_root(&with_metadata(FileMetadata::Rust {
            is_binary_crate: false,
            is_library_crate: true,
        })));
    }

    #[test]
    fn javascript_metadata_is_never_a_root_on_its_own() {
        assert!(!is_metadata_root(&with_metadata(FileMetadata::JavaScript)));
    }
}
