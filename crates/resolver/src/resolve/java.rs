//! Java/Kotlin resolution (§4.5): a six-strategy pipeline, terminating on
//! first success. Ordering matters: the framework filter (strategy 4) must
//! come after the FQN/wildcard/static-import strategies (§9), or a
//! repository that *is* the framework would have its own internal edges
//! discarded.

use deadcode_core::{is_anti_entry, Import, ImportKind, ResolutionContext, ReverseIndex};
use once_cell::sync::Lazy;

static EXTERNAL_FRAMEWORK_PREFIXES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "java.", "javax.", "jakarta.", "org.springframework.", "org.hibernate.", "kotlin.",
        "kotlinx.", "android.", "androidx.", "com.google.", "org.junit.", "org.slf4j.",
        "org.apache.", "com.fasterxml.",
    ]
});

pub fn resolve(ctx: &ResolutionContext, index: &ReverseIndex, import: &Import) -> Vec<String> {
    let module = &import.module;

    // 1. Direct FQN lookup.
    if let Some(path) = index.java_fqn(module) {
        return vec![path.to_string()];
    }

    // 2. Wildcard expansion, limited to direct children of the package dir.
    if import.kind == ImportKind::JavaWildcard || module.ends_with(".*") {
        let package = module.trim_end_matches(".*");
        let package_dir = package.replace('.', "/");
        let members: Vec<String> = index
            .java_package_members(&package_dir)
            .iter()
            .filter(|p| !is_anti_entry(p))
            .cloned()
            .collect();
        if !members.is_empty() {
            return members;
        }
    }

    // 3. Static-import reduction: strip the trailing member, retry strategy 1.
    if import.kind == ImportKind::JavaStatic {
        if let Some((class_fqn, _member)) = module.rsplit_once('.') {
            if let Some(path) = index.java_fqn(class_fqn) {
                return vec![path.to_string()];
            }
        }
    }

    // 4. Framework filter.
    if EXTERNAL_FRAMEWORK_PREFIXES.iter().any(|prefix| module.starts_with(prefix)) {
        return Vec::new();
    }

    // 5. Source-root path resolution.
    let package_path = module.replace('.', "/");
    for root in &ctx.java_source_roots {
        for ext in ["java", "kt"] {
            let candidate = format!("{root}/{package_path}.{ext}");
            if index.contains_path(&candidate) {
                return vec![candidate];
            }
        }
    }

    // 6. Class-name fallback: match any file whose basename equals the
    // last segment, excluding anti-entry paths.
    let last_segment = module.rsplit('.').next().unwrap_or(module);
    let matches: Vec<String> = index
        .by_stem(last_segment)
        .iter()
        .chain(
            index
                .iter()
                .filter(|r| r.relative_path.rsplit('/').next().map(|n| n.trim_end_matches(".java").trim_end_matches(".kt")) == Some(last_segment))
                .map(|r| &r.relative_path),
        )
        .filter(|p| !is_anti_entry(p))
        .cloned()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();
    matches
}
