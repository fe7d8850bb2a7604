//! The resolution context (§3): derived once by C1/C2, read-only for the
//! rest of a scan.

use std::collections::HashMap;

/// An ordered alias table: alias-prefix -> target-directory-prefix, both
/// project-relative. Sorted by prefix length descending so the most specific
/// alias always wins (§9: "Aliases as longest-prefix match is essential").
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    /// Invariant: sorted by `entries[i].0.len()` descending.
    entries: Vec<(String, String)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an alias, re-sorting by prefix length.
    ///
    /// A later insert of the same prefix overrides the earlier one, which is
    /// how child tsconfigs override parent entries with the same alias
    /// prefix (§4.1).
    pub fn insert(&mut self, prefix: impl Into<String>, target: impl Into<String>) {
        let prefix = prefix.into();
        let target = target.into();
        if let Some(existing) = self.entries.iter_mut().find(|(p, _)| *p == prefix) {
            existing.1 = target;
        } else {
            self.entries.push((prefix, target));
        }
        self.entries
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    }

    pub fn merge_over(&self, base: &AliasTable) -> AliasTable {
        let mut merged = base.clone();
        for (prefix, target) in &self.entries {
            merged.insert(prefix.clone(), target.clone());
        }
        merged
    }

    /// Try every alias longest-prefix-first, returning the first match's
    /// rewritten target plus the remaining subpath.
    pub fn resolve<'a>(&self, specifier: &'a str) -> Option<(String, &'a str)> {
        for (prefix, target) in &self.entries {
            if let Some(rest) = specifier.strip_prefix(prefix.as_str()) {
                return Some((target.clone(), rest));
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.entries.iter()
    }
}

/// A discovered workspace package: `name -> { dir, entryPoint, exportsMap, binFiles }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkspacePackage {
    pub dir: String,
    pub entry_point: Option<String>,
    /// subpath (e.g. "./sub") -> resolved, extensionless source target.
    pub exports_map: HashMap<String, String>,
    pub bin_files: Vec<String>,
    /// Names of other workspace packages this package depends on, used by
    /// the abandoned-workspace rule (§4.3).
    pub internal_dependencies: Vec<String>,
}

/// Resolution context: derived once per scan by C1/C2, immutable afterward.
#[derive(Debug, Clone, Default)]
pub struct ResolutionContext {
    pub global_aliases: AliasTable,
    /// package-directory -> alias table that overrides globals for files
    /// inside that directory.
    pub package_aliases: HashMap<String, AliasTable>,
    /// package-directory (empty string = project root) -> baseUrl prefix.
    pub package_base_urls: HashMap<String, String>,
    pub workspace_packages: HashMap<String, WorkspacePackage>,
    pub go_module_path: Option<String>,
    /// Ordered list of Java/Kotlin source roots, project-relative.
    pub java_source_roots: Vec<String>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most-specific package alias table for a directory, merged over
    /// globals, per §4.5 ("the most-specific packageAliases for the
    /// directory containing fromFile is merged over globalAliases").
    pub fn aliases_for_dir(&self, dir: &str) -> AliasTable {
        let mut best: Option<&AliasTable> = None;
        let mut best_len = -1i64;
        for (pkg_dir, table) in &self.package_aliases {
            let matches = pkg_dir.is_empty() || dir == pkg_dir || dir.starts_with(&format!("{pkg_dir}/"));
            if matches {
                let len = pkg_dir.len() as i64;
                if len > best_len {
                    best_len = len;
                    best = Some(table);
                }
            }
        }
        match best {
            Some(table) => table.merge_over(&self.global_aliases),
            None => self.global_aliases.clone(),
        }
    }

    /// The baseUrl declared for the package containing `dir`, using
    /// longest-prefix matching over `package_base_urls` (empty key = root).
    pub fn base_url_for_dir(&self, dir: &str) -> Option<&str> {
        let mut best: Option<(&str, &str)> = None;
        for (pkg_dir, base_url) in &self.package_base_urls {
            let matches = pkg_dir.is_empty() || dir == pkg_dir || dir.starts_with(&format!("{pkg_dir}/"));
            if matches {
                let len = pkg_dir.len();
                if best.map(|(d, _)| d.len() < len).unwrap_or(true) {
                    best = Some((pkg_dir, base_url));
                }
            }
        }
        best.map(|(_, url)| url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_table_matches_longest_prefix_first() {
        let mut table = AliasTable::new();
        table.insert("@/", "src/");
        table.insert("@site/", "site-src/");
        let (target, rest) = table.resolve("@site/util").unwrap();
        assert_eq!(target, "site-src/");
        assert_eq!(rest, "util");
    }

    #[test]
    fn later_insert_overrides_same_prefix() {
        let mut table = AliasTable::new();
        table.insert("@/", "src/");
        table.insert("@/", "app/src/");
        let (target, _) = table.resolve("@/x").unwrap();
        assert_eq!(target, "app/src/");
    }

    #[test]
    fn package_aliases_override_globals_for_nested_dir() {
        let mut ctx = ResolutionContext::new();
        ctx.global_aliases.insert("@/", "src/");
        let mut pkg_table = AliasTable::new();
        pkg_table.insert("@/", "packages/app/src/");
        ctx.package_aliases
            .insert("packages/app".to_string(), pkg_table);

        let merged = ctx.aliases_for_dir("packages/app/components");
        let (target, _) = merged.resolve("@/Button").unwrap();
        assert_eq!(target, "packages/app/src/");
    }

    #[test]
    fn root_tsconfig_aliases_apply_to_every_subdirectory() {
        let mut ctx = ResolutionContext::new();
        let mut root_table = AliasTable::new();
        root_table.insert("@/", "src/");
        ctx.package_aliases.insert(String::new(), root_table);

        let resolved = ctx.aliases_for_dir("src/components");
        let (target, rest) = resolved.resolve("@/util").unwrap();
        assert_eq!(target, "src/");
        assert_eq!(rest, "util");
    }
}
