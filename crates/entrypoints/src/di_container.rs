//! Entry-point source 8 (§4.3): DI container references. Every file's text
//! is scanned with configurable patterns whose capture group names a class;
//! the file declaring that class becomes a root.

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Compiles the configured `diContainerPatterns`, skipping (and warning on)
/// any pattern that fails to compile rather than failing the whole scan.
pub fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(pattern = %p, error = %e, "invalid diContainerPatterns entry, skipping");
                None
            }
        })
        .collect()
}

/// Scans `source` with the compiled patterns, collecting every class name
/// captured, and resolves each against `class_to_file` (e.g. the Java FQN
/// map's class-name index, or a simple basename map for other languages).
pub fn roots_from_container_references<'a>(
    source: &str,
    patterns: &[Regex],
    class_to_file: &HashMap<&str, &'a str>,
) -> HashSet<&'a str> {
    let mut roots = HashSet::new();
    for pattern in patterns {
        for caps in pattern.captures_iter(source) {
            if let Some(class_name) = caps.get(1) {
                if let Some(file) = class_to_file.get(class_name.as_str()) {
                    roots.insert(*file);
                }
            }
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_container_get_and_resolves_class_name() {
        let patterns = compile_patterns(&[r"Container\.get<(\w+)>\(".to_string()]);
        let source = "const svc = Container.get<UserService>();";
        let map: HashMap<&str, &str> = [("UserService", "src/UserService.ts")].into_iter().collect();
        let roots = roots_from_container_references(source, &patterns, &map);
        assert!(roots.contains("src/UserService.ts"));
    }

    #[test]
    fn invalid_pattern_is_skipped_not_fatal() {
        let patterns = compile_patterns(&["(unclosed".to_string()]);
        assert!(patterns.is_empty());
    }
}
