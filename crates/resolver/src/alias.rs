//! Path-alias extraction (§4.1, C1): tsconfig `extends` chains, Vite
//! `resolve.alias` entries, and workspace discovery feeding a
//! [`ResolutionContext`].

use deadcode_core::{AliasTable, ResolutionContext};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[allow(clippy::unwrap_used)]
static VITE_ALIAS_RESOLVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"['"]([^'"]+)['"]\s*:\s*resolve\(__dirname,\s*['"]([^'"]+)['"]\)"#).unwrap()
});

#[allow(clippy::unwrap_used)]
static VITE_ALIAS_LITERAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]\s*:\s*['"](\./[^'"]+)['"]"#).unwrap());

/// Strips `//` and `/* */` comments from JSONC text without corrupting
/// string literals that happen to contain those sequences (§4.1).
pub fn strip_jsonc_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.char_indices().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some((_, c)) = chars.next() {
        if in_string {
            out.push(c);
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }

        if c == '/' {
            match chars.peek() {
                Some((_, '/')) => {
                    for (_, next) in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                    continue;
                }
                Some((_, '*')) => {
                    chars.next();
                    let mut prev = '\0';
                    for (_, next) in chars.by_ref() {
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                    continue;
                }
                _ => out.push(c),
            }
            continue;
        }

        out.push(c);
    }

    out
}

/// Loads and parses a tsconfig, following `extends` (string or array, §4.1)
/// with cycle protection, contributing `paths` entries re-rooted to the
/// project and a `baseUrl` per package directory.
///
/// Any config that fails to parse is silently skipped (§4.1 failure
/// semantics): this returns `Ok(())` and leaves `ctx` untouched for it.
pub fn load_tsconfig_chain(
    project_root: &Path,
    tsconfig_path: &Path,
    ctx: &mut ResolutionContext,
    package_dir: &str,
) {
    let mut visited = HashSet::new();
    let mut table = AliasTable::new();
    let mut base_url: Option<String> = None;
    collect_tsconfig(project_root, tsconfig_path, &mut visited, &mut table, &mut base_url);

    if !table.is_empty() {
        ctx.package_aliases
            .entry(package_dir.to_string())
            .and_modify(|existing| *existing = table.merge_over(existing))
            .or_insert(table);
    }
    if let Some(base_url) = base_url {
        ctx.package_base_urls
            .insert(package_dir.to_string(), base_url);
    }
}

fn collect_tsconfig(
    project_root: &Path,
    config_path: &Path,
    visited: &mut HashSet<PathBuf>,
    table: &mut AliasTable,
    base_url: &mut Option<String>,
) {
    let Ok(canonical) = config_path.canonicalize() else {
        return;
    };
    if !visited.insert(canonical) {
        tracing::debug!(path = %config_path.display(), "tsconfig extends cycle detected, truncating");
        return;
    }

    let Ok(raw) = std::fs::read_to_string(config_path) else {
        return;
    };
    let stripped = strip_jsonc_comments(&raw);
    let Ok(json): Result<Value, _> = serde_json::from_str(&stripped) else {
        tracing::warn!(path = %config_path.display(), "failed to parse tsconfig, skipping");
        return;
    };

    let config_dir = config_path.parent().unwrap_or(project_root);

    // Parent configs contribute first so the child's entries override them.
    if let Some(extends) = json.get("extends") {
        let parents: Vec<String> = match extends {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        for parent in parents {
            let parent_path = resolve_extends_target(config_dir, &parent);
            if let Some(parent_path) = parent_path {
                collect_tsconfig(project_root, &parent_path, visited, table, base_url);
            }
        }
    }

    let compiler_options = json.get("compilerOptions");
    let this_base_url = compiler_options
        .and_then(|c| c.get("baseUrl"))
        .and_then(Value::as_str)
        .unwrap_or(".");
    let resolved_base_dir = normalize_rel(&config_dir.join(this_base_url), project_root);
    *base_url = Some(resolved_base_dir.clone());

    if let Some(paths) = compiler_options.and_then(|c| c.get("paths")).and_then(Value::as_object) {
        for (prefix, targets) in paths {
            let Some(first_target) = targets.as_array().and_then(|a| a.first()).and_then(Value::as_str) else {
                continue;
            };
            let alias_prefix = prefix.trim_end_matches('*').to_string();
            let target_suffix = first_target.trim_end_matches('*');
            let full_target = if resolved_base_dir.is_empty() {
                target_suffix.to_string()
            } else {
                format!("{resolved_base_dir}/{target_suffix}")
            };
            table.insert(alias_prefix, full_target);
        }
    }
}

fn resolve_extends_target(config_dir: &Path, target: &str) -> Option<PathBuf> {
    let mut path = config_dir.join(target);
    if path.extension().is_none() {
        path.set_extension("json");
    }
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Extracts `resolve.alias` entries from a `vite.config.*` source (§4.1):
/// `{ '@': resolve(__dirname, './src') }` and `{ '@': './src' }` forms.
pub fn extract_vite_aliases(source: &str, config_dir_rel: &str) -> AliasTable {
    let mut table = AliasTable::new();
    for caps in VITE_ALIAS_RESOLVE_RE.captures_iter(source) {
        let prefix = caps[1].to_string();
        let target = join_rel(config_dir_rel, &caps[2]);
        table.insert(prefix, target);
    }
    for caps in VITE_ALIAS_LITERAL_RE.captures_iter(source) {
        let prefix = caps[1].to_string();
        let target = join_rel(config_dir_rel, &caps[2]);
        table.insert(prefix, target);
    }
    table
}

fn join_rel(base: &str, rel: &str) -> String {
    let rel = rel.trim_start_matches("./");
    if base.is_empty() {
        rel.to_string()
    } else {
        format!("{base}/{rel}")
    }
}

fn normalize_rel(path: &Path, project_root: &Path) -> String {
    let rel = path.strip_prefix(project_root).unwrap_or(path);
    let s = rel.to_string_lossy().replace('\\', "/");
    s.trim_end_matches('/').trim_start_matches("./").to_string()
}
