//! A line-oriented import/export scraper. Not a real parser for any of the
//! six supported languages — a token-matching stand-in so `deadcode scan`
//! produces a non-trivial graph without shelling out to an external parser
//! (§6's parser contract is the real interface; anything implementing it
//! can replace this).

use deadcode_core::{Export, FileMetadata, FileRecord, Import, ImportKind, Language, ModDecl};
use deadcode_engine::FileParser;
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)]
static ES_FROM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:import|export)\s+(?:[\w*{}\s,]+from\s+)?['"]([^'"]+)['"]"#).unwrap());
#[allow(clippy::unwrap_used)]
static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());
#[allow(clippy::unwrap_used)]
static EXPORT_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+(?:default\s+)?(?:const|function|class|interface|type)\s+(\w+)").unwrap());
#[allow(clippy::unwrap_used)]
static PY_FROM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^from\s+(\.*[\w.]*)\s+import\s+(\w+)").unwrap());
#[allow(clippy::unwrap_used)]
static PY_IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^import\s+([\w.]+)").unwrap());
#[allow(clippy::unwrap_used)]
static JAVA_IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;").unwrap());
#[allow(clippy::unwrap_used)]
static JAVA_PACKAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^package\s+([\w.]+)\s*;").unwrap());
#[allow(clippy::unwrap_used)]
static GO_IMPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^\s*"([^"]+)"\s*$"#).unwrap());
#[allow(clippy::unwrap_used)]
static RUST_USE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^use\s+([\w:]+)").unwrap());
#[allow(clippy::unwrap_used)]
static RUST_MOD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:pub\s+)?mod\s+(\w+)\s*;").unwrap());
#[allow(clippy::unwrap_used)]
static CSHARP_USING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^using\s+([\w.]+)\s*;").unwrap());

/// A toy [`FileParser`] dispatching on file extension.
pub struct ToyParser;

impl FileParser for ToyParser {
    fn parse(&self, relative_path: &str, contents: &[u8]) -> FileRecord {
        let text = String::from_utf8_lossy(contents);
        let language = language_from_extension(relative_path);
        match language {
            Language::JavaScript | Language::TypeScript => scrape_js(relative_path, &text, language),
            Language::Python => scrape_python(relative_path, &text),
            Language::Java | Language::Kotlin => scrape_java(relative_path, &text, language),
            Language::Go => scrape_go(relative_path, &text),
            Language::Rust => scrape_rust(relative_path, &text),
            Language::CSharp => scrape_csharp(relative_path, &text),
            Language::Other => FileRecord::empty(relative_path, language),
        }
    }
}

fn language_from_extension(path: &str) -> Language {
    match path.rsplit('.').next().unwrap_or("") {
        "kt" | "kts" => Language::Kotlin,
        ext => Language::from_extension(ext),
    }
}

fn scrape_js(path: &str, text: &str, language: Language) -> FileRecord {
    let mut record = FileRecord::empty(path, language);
    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no as u32 + 1;
        if let Some(caps) = ES_FROM_RE.captures(line) {
            let module = caps[1].to_string();
            let is_reexport = line.trim_start().starts_with("export");
            if is_reexport {
                record.exports.push(Export {
                    name: "*".to_string(),
                    export_type: "reexport".to_string(),
                    line: line_no,
                    end_line: line_no,
                    is_default: false,
                    source_module: Some(module.clone()),
                });
            } else {
                record.imports.push(Import {
                    module,
                    kind: ImportKind::EsFrom,
                    name: None,
                    is_glob: line.contains("import *"),
                    line: line_no,
                });
            }
        }
        if let Some(caps) = REQUIRE_RE.captures(line) {
            record.imports.push(Import {
                module: caps[1].to_string(),
                kind: ImportKind::CommonjsRequire,
                name: None,
                is_glob: false,
                line: line_no,
            });
        }
        if let Some(caps) = EXPORT_NAME_RE.captures(line) {
            record.exports.push(Export {
                name: caps[1].to_string(),
                export_type: "named".to_string(),
                line: line_no,
                end_line: line_no,
                is_default: line.contains("default"),
                source_module: None,
            });
        }
    }
    record
}

fn scrape_python(path: &str, text: &str) -> FileRecord {
    let mut record = FileRecord::empty(path, Language::Python);
    let mut has_main_block = false;
    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no as u32 + 1;
        let trimmed = line.trim_start();
        if let Some(caps) = PY_FROM_RE.captures(trimmed) {
            record.imports.push(Import {
                module: caps[1].to_string(),
                kind: ImportKind::PythonFrom,
                name: Some(caps[2].to_string()),
                is_glob: trimmed.contains("import *"),
                line: line_no,
            });
        } else if let Some(caps) = PY_IMPORT_RE.captures(trimmed) {
            record.imports.push(Import {
                module: caps[1].to_string(),
                kind: ImportKind::PythonDotted,
                name: None,
                is_glob: false,
                line: line_no,
            });
        }
        if trimmed.starts_with("if __name__") && trimmed.contains("__main__") {
            has_main_block = true;
        }
    }
    record.metadata = FileMetadata::Python { has_main_block };
    record
}

fn scrape_java(path: &str, text: &str, language: Language) -> FileRecord {
    let mut record = FileRecord::empty(path, language);
    let mut package_name = None;
    let mut has_main_method = false;
    let mut is_spring_component = false;
    for line in text.lines() {
        let trimmed = line.trim_start();
        if let Some(caps) = JAVA_PACKAGE_RE.captures(trimmed) {
            package_name = Some(caps[1].to_string());
        }
        if let Some(caps) = JAVA_IMPORT_RE.captures(trimmed) {
            let fqn = caps[1].to_string();
            record.imports.push(Import {
                module: fqn.clone(),
                kind: if fqn.ends_with(".*") {
                    ImportKind::JavaWildcard
                } else if trimmed.contains("static") {
                    ImportKind::JavaStatic
                } else {
                    ImportKind::JavaClass
                },
                name: None,
                is_glob: fqn.ends_with(".*"),
                line: 0,
            });
        }
        if trimmed.contains("static void main(") {
            has_main_method = true;
        }
        if trimmed.starts_with('@')
            && ["@Component", "@Service", "@Controller", "@RestController", "@Repository", "@SpringBootApplication"]
                .iter()
                .any(|a| trimmed.starts_with(a))
        {
            is_spring_component = true;
        }
    }
    record.metadata = FileMetadata::Java { package_name, has_main_method, is_spring_component };
    record
}

fn scrape_go(path: &str, text: &str) -> FileRecord {
    let mut record = FileRecord::empty(path, Language::Go);
    let mut is_main_package = false;
    let mut has_main_function = false;
    let mut has_init_function = false;
    let mut in_import_block = false;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed == "package main" {
            is_main_package = true;
        }
        if trimmed.starts_with("import (") {
            in_import_block = true;
            continue;
        }
        if in_import_block {
            if trimmed == ")" {
                in_import_block = false;
                continue;
            }
            if let Some(caps) = GO_IMPORT_RE.captures(trimmed) {
                record.imports.push(Import {
                    module: caps[1].to_string(),
                    kind: ImportKind::Go,
                    name: None,
                    is_glob: false,
                    line: 0,
                });
            }
        } else if trimmed.starts_with("import ") {
            if let Some(caps) = GO_IMPORT_RE.captures(trimmed.trim_start_matches("import").trim()) {
                record.imports.push(Import {
                    module: caps[1].to_string(),
                    kind: ImportKind::Go,
                    name: None,
                    is_glob: false,
                    line: 0,
                });
            }
        }
        if trimmed.starts_with("func main(") {
            has_main_function = true;
        }
        if trimmed.starts_with("func init(") {
            has_init_function = true;
        }
    }
    let is_test_file = path.ends_with("_test.go");
    record.metadata = FileMetadata::Go { is_main_package, has_main_function, has_init_function, is_test_file };
    record
}

fn scrape_rust(path: &str, text: &str) -> FileRecord {
    let mut record = FileRecord::empty(path, Language::Rust);
    for (line_no, line) in text.lines().enumerate() {
        let line_no = line_no as u32 + 1;
        let trimmed = line.trim();
        if let Some(caps) = RUST_MOD_RE.captures(trimmed) {
            record.mods.push(ModDecl { name: caps[1].to_string(), line: line_no });
        } else if let Some(caps) = RUST_USE_RE.captures(trimmed) {
            record.imports.push(Import {
                module: caps[1].to_string(),
                kind: ImportKind::RustUse,
                name: None,
                is_glob: trimmed.ends_with("::*;"),
                line: line_no,
            });
        }
    }
    let is_binary_crate = path.ends_with("main.rs");
    let is_library_crate = path.ends_with("lib.rs");
    record.metadata = FileMetadata::Rust { is_binary_crate, is_library_crate };
    record
}

fn scrape_csharp(path: &str, text: &str) -> FileRecord {
    let mut record = FileRecord::empty(path, Language::CSharp);
    for line in text.lines() {
        if let Some(caps) = CSHARP_USING_RE.captures(line.trim()) {
            record.imports.push(Import {
                module: caps[1].to_string(),
                kind: ImportKind::CsharpUsing,
                name: None,
                is_glob: false,
                line: 0,
            });
        }
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrapes_an_es_from_import() {
        let parser = ToyParser;
        let record = parser.parse("src/a.ts", br#"import { x } from "./b";"#);
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "./b");
    }

    #[test]
    fn scrapes_python_main_block() {
        let parser = ToyParser;
        let record = parser.parse("main.py", b"if __name__ == \"__main__\":\n    run()\n");
        assert_eq!(record.metadata, FileMetadata::Python { has_main_block: true });
    }

    #[test]
    fn scrapes_rust_mod_declaration() {
        let parser = ToyParser;
        let record = parser.parse("src/lib.rs", b"pub mod widgets;\n");
        assert_eq!(record.mods.len(), 1);
        assert_eq!(record.mods[0].name, "widgets");
    }
}
