//! Entry-point source 7 (§4.3): decorator/annotation hints, including the
//! `providedIn` special case for a parameterized injectable marker.

use deadcode_core::FileRecord;
use std::collections::HashSet;

/// The `providedIn` argument values that make an `@Injectable({ providedIn: ... })`
/// class a root on its own, independent of `diDecorators` membership.
const PROVIDED_IN_ROOT_VALUES: &[&str] = &["root", "platform", "any"];

/// True if any top-level class in `record` carries a decorator/annotation
/// from `decorator_names`, or the `providedIn` special case fires.
pub fn is_decorator_root(record: &FileRecord, decorator_names: &HashSet<&str>) -> bool {
    for class in &record.classes {
        for decorator in &class.decorators {
            if decorator_names.contains(decorator.name.as_str()) {
                return true;
            }
            if let Some(args) = &decorator.args {
                if PROVIDED_IN_ROOT_VALUES
                    .iter()
                    .any(|value| args.contains(&format!("providedIn: '{value}'")) || args.contains(&format!("providedIn: \"{value}\"")))
                {
                    return true;
                }
            }
        }
    }
    for annotation in &record.annotations {
        if decorator_names.contains(annotation.name.as_str()) {
            return true;
        }
    }
    false
}
