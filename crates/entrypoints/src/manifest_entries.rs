//! Entry-point source 1 (§4.3): manifest `main`/`module`/`source`/`exports`
//! (every subpath and every conditional target) and `bin`, root and per
//! workspace package.

use deadcode_core::ResolutionContext;
use std::collections::HashSet;

/// Every manifest-declared entry across the root and all workspace
/// packages, union'd together. `exports_map` values are already resolved,
/// extensionless targets (§4.2) so they are included as-is; `entry_point`
/// and `bin_files` are likewise pre-resolved.
pub fn manifest_roots(ctx: &ResolutionContext) -> HashSet<String> {
    let mut roots = HashSet::new();
    for pkg in ctx.workspace_packages.values() {
        if let Some(entry) = &pkg.entry_point {
            roots.insert(entry.clone());
        }
        for target in pkg.exports_map.values() {
            roots.insert(target.clone());
        }
        for bin in &pkg.bin_files {
            roots.insert(bin.clone());
        }
    }
    roots
}
