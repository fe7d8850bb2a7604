//! The parser contract (§3, §6): every file the discovery collaborator
//! hands us is parsed, by an external collaborator, into one of these
//! records. The core never parses source text itself.

use serde::{Deserialize, Serialize};

/// Source language tag attached to every file record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    Kotlin,
    Go,
    Rust,
    CSharp,
    Other,
}

impl Language {
    /// Best-effort guess from a file extension, used only by the CLI's
    /// demonstration discovery path. The real parser contract is expected to
    /// tag records itself; this is never consulted by the resolver or walker.
    pub fn from_extension(ext: &str) -> Language {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "py" | "pyi" => Language::Python,
            "java" => Language::Java,
            "kt" | "kts" => Language::Kotlin,
            "go" => Language::Go,
            "rs" => Language::Rust,
            "cs" => Language::CSharp,
            _ => Language::Other,
        }
    }
}

/// The kind of import/include reference a language can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    EsImport,
    EsFrom,
    CommonjsRequire,
    DynamicImport,
    PythonFrom,
    PythonDotted,
    JavaClass,
    JavaStatic,
    JavaWildcard,
    Go,
    RustUse,
    RustMod,
    CsharpUsing,
}

/// A single import/include reference extracted from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// The raw module specifier as written in source (e.g. `"./util"`,
    /// `"com.foo.Bar"`, `"github.com/x/y/z"`).
    pub module: String,
    pub kind: ImportKind,
    /// The imported symbol name, when the import form names one
    /// (`from X import Y`, `import { Y } from "./x"`).
    pub name: Option<String>,
    /// True for glob-style imports (`from x import *`, `use x::*`,
    /// `import "./globbed/**"` style dynamic-glob specifiers).
    #[serde(default)]
    pub is_glob: bool,
    pub line: u32,
}

/// A single exported symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub name: String,
    pub export_type: String,
    pub line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub is_default: bool,
    /// Non-null marks this export as a re-export: `export { x } from "./y"`
    /// or `export * from "./y"`.
    #[serde(default)]
    pub source_module: Option<String>,
}

impl Export {
    pub fn is_reexport(&self) -> bool {
        self.source_module.is_some()
    }
}

/// A Rust `mod` declaration (Rust files only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModDecl {
    pub name: String,
    pub line: u32,
}

/// A decorator/annotation attached to a class, e.g. `@Injectable()`,
/// `@Component({ providedIn: "root" })`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorator {
    pub name: String,
    /// Raw argument text, when present, used by the `providedIn` special
    /// case in entry-point detection (§4.3.7).
    #[serde(default)]
    pub args: Option<String>,
}

/// A top-level class/struct/interface declaration, carrying its decorators
/// for the entry-point detector's DI/framework heuristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
}

/// A Java/Kotlin annotation, e.g. `@SpringBootApplication`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
}

/// Language-specific flags. Modeled as a tagged enum rather than one flat
/// struct of optional fields per language: nothing downstream depends on an
/// untyped bag, and the per-language variant makes illegal states (a Go
/// file with `has_main_block` set) unrepresentable. See DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "language", rename_all = "kebab-case")]
pub enum FileMetadata {
    JavaScript,
    Python {
        #[serde(default)]
        has_main_block: bool,
    },
    Java {
        #[serde(default)]
        package_name: Option<String>,
        #[serde(default)]
        has_main_method: bool,
        #[serde(default)]
        is_spring_component: bool,
    },
    Go {
        #[serde(default)]
        is_main_package: bool,
        #[serde(default)]
        has_main_function: bool,
        #[serde(default)]
        has_init_function: bool,
        #[serde(default)]
        is_test_file: bool,
    },
    Rust {
        #[serde(default)]
        is_binary_crate: bool,
        #[serde(default)]
        is_library_crate: bool,
    },
    CSharp,
    Other,
}

impl Default for FileMetadata {
    fn default() -> Self {
        FileMetadata::Other
    }
}

/// A fully parsed source file, as handed to the core by the (external)
/// per-language parser. This is the core's entire input contract (§6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Forward-slash-normalized path rooted at the project root.
    pub relative_path: String,
    pub language: Language,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    #[serde(default)]
    pub mods: Vec<ModDecl>,
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub metadata: FileMetadata,
    /// True when the parser could not produce a real record (§7: "Parse
    /// failure on a source file"). A parse-failed file still occupies a slot
    /// in `byPath`; it is simply treated as live with no outgoing edges.
    #[serde(default)]
    pub parse_failed: bool,
}

impl FileRecord {
    /// Construct an empty, successfully-parsed record for a file with no
    /// imports/exports (e.g. a plain asset or a parser that legitimately
    /// found nothing).
    pub fn empty(relative_path: impl Into<String>, language: Language) -> Self {
        FileRecord {
            relative_path: relative_path.into(),
            language,
            imports: Vec::new(),
            exports: Vec::new(),
            mods: Vec::new(),
            classes: Vec::new(),
            annotations: Vec::new(),
            metadata: FileMetadata::Other,
            parse_failed: false,
        }
    }

    /// Construct the "opaque live file" record §7 mandates for a parse
    /// failure: no edges in, no edges derivable out, never reportable dead.
    pub fn parse_failure(relative_path: impl Into<String>, language: Language) -> Self {
        FileRecord {
            parse_failed: true,
            ..FileRecord::empty(relative_path, language)
        }
    }

    pub fn extension(&self) -> Option<&str> {
        self.relative_path.rsplit('.').next()
    }

    pub fn stem(&self) -> &str {
        match self.relative_path.rfind('.') {
            Some(idx) if idx > self.relative_path.rfind('/').unwrap_or(0) => {
                &self.relative_path[..idx]
            }
            _ => &self.relative_path,
        }
    }
}
