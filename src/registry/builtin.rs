//! Built-in signature tables
//!
//! Two tables ship with the crate: the standard table used by default and a
//! compact table with fewer, looser rules. Both are compiled lazily, once per
//! process, and shared behind an `Arc`.

use super::{RegistryBuilder, RegistryError, SignatureRegistry};
use crate::domain::Profile;
use once_cell::sync::Lazy;
use std::sync::Arc;

static STANDARD: Lazy<Result<Arc<SignatureRegistry>, RegistryError>> =
    Lazy::new(|| standard_builder().build().map(Arc::new));

static COMPACT: Lazy<Result<Arc<SignatureRegistry>, RegistryError>> =
    Lazy::new(|| compact_builder().build().map(Arc::new));

pub(crate) fn shared(profile: Profile) -> Result<Arc<SignatureRegistry>, RegistryError> {
    match profile {
        Profile::Standard => STANDARD.clone(),
        Profile::Compact => COMPACT.clone(),
    }
}

/// Fresh builder pre-loaded with a profile's table.
pub fn builder(profile: Profile) -> RegistryBuilder {
    match profile {
        Profile::Standard => standard_builder(),
        Profile::Compact => compact_builder(),
    }
}

/// The standard table. Languages declared earlier win ties.
pub fn standard_builder() -> RegistryBuilder {
    SignatureRegistry::builder()
        .language(
            "javascript",
            &[
                r"\bfunction\s+\w+\s*\(",
                r"\bconst\s+\w+\s*=",
                r"\blet\s+\w+\s*=",
                r"\bvar\s+\w+\s*=",
                r"\bconsole\.log\s*\(",
                r"\bdocument\.",
                r"=>\s*\{",
            ],
        )
        .language(
            "typescript",
            &[
                r"\binterface\s+\w+\s*\{",
                r"\btype\s+\w+\s*=",
                r":\s*string\b",
                r":\s*number\b",
                r":\s*boolean\b",
                r"<\w+>",
            ],
        )
        .language(
            "python",
            &[
                r"\bdef\s+\w+\s*\(\s*\w*\s*\):",
                r"\bimport\s+\w+",
                r"\bfrom\s+\w+\s+import",
                r"\bclass\s+\w+\s*:",
                r#"\bif\s+__name__\s*==\s*('|")__main__('|")\s*:"#,
            ],
        )
        .language(
            "java",
            &[
                r"\bpublic\s+class\s+\w+",
                r"\bprivate\s+\w+\s+\w+\s*;",
                r"\bpublic\s+static\s+void\s+main\s*\(",
                r"\bSystem\.out\.println\s*\(",
            ],
        )
        .language(
            "csharp",
            &[
                r"\bnamespace\s+\w+",
                r"\busing\s+\w+\s*;",
                r"\bpublic\s+class\s+\w+",
                r"\bConsole\.WriteLine\s*\(",
            ],
        )
        .language(
            "cpp",
            &[
                r"#include\s*<\w+(\.\w+)?>",
                r"\bstd::",
                r"\bint\s+main\s*\(\s*(?:void|int\s+argc,\s*char\s*\*\s*argv\[\s*\])\s*\)",
                r"\busing\s+namespace\s+std\s*;",
            ],
        )
        .language("php", &[r"<\?php", r"\becho\s+", r"\bfunction\s+\w+\s*\(", r"\$\w+\s*="])
        .language(
            "ruby",
            &[
                r"\bdef\s+\w+",
                r"\bclass\s+\w+\s*<",
                r"\bmodule\s+\w+",
                r"\bend\b",
                r"\battr_accessor\s+:",
            ],
        )
        .language(
            "go",
            &[
                r"\bpackage\s+\w+",
                r"\bimport\s+\(",
                r"\bfunc\s+\w+\s*\(",
                r"\btype\s+\w+\s+struct\s*\{",
            ],
        )
        .language(
            "rust",
            &[
                r"\bfn\s+\w+\s*\(",
                r"\blet\s+mut\s+\w+",
                r"\buse\s+\w+::",
                r"\bpub\s+struct\s+\w+",
                r"\bimpl\s+\w+\s+for\s+\w+",
            ],
        )
        .language(
            "swift",
            &[
                r"\bfunc\s+\w+\s*\(",
                r"\bvar\s+\w+\s*:",
                r"\blet\s+\w+\s*:",
                r"\bclass\s+\w+\s*:",
                r"\bimport\s+\w+",
            ],
        )
        .language(
            "kotlin",
            &[
                r"\bfun\s+\w+\s*\(",
                r"\bval\s+\w+\s*:",
                r"\bvar\s+\w+\s*:",
                r"\bclass\s+\w+\s*\(",
                r"\bimport\s+\w+",
            ],
        )
        .language("html", &[r"<!DOCTYPE\s+html>", r"<html>", r"<head>", r"<body>", r"<div>"])
        .language(
            "css",
            &[
                r"\.\w+\s*\{",
                r"#\w+\s*\{",
                r"@media\s+",
                r"\bmargin\s*:",
                r"\bpadding\s*:",
                r"\bcolor\s*:",
            ],
        )
        .language(
            "sql",
            &[
                r"\bSELECT\s+\w+\s+FROM\s+\w+",
                r"\bINSERT\s+INTO\s+\w+",
                r"\bUPDATE\s+\w+\s+SET\s+",
                r"\bDELETE\s+FROM\s+\w+",
                r"\bCREATE\s+TABLE\s+\w+",
            ],
        )
        // Extension-only languages
        .language("shell", &[])
        .language("powershell", &[])
        .language("perl", &[])
        .language("r", &[])
        .language("matlab", &[])
        .language("c", &[])
        .extension(".js", "javascript")
        .extension(".jsx", "javascript")
        .extension(".ts", "typescript")
        .extension(".tsx", "typescript")
        .extension(".py", "python")
        .extension(".java", "java")
        .extension(".cs", "csharp")
        .extension(".cpp", "cpp")
        .extension(".c", "c")
        .extension(".php", "php")
        .extension(".rb", "ruby")
        .extension(".go", "go")
        .extension(".rs", "rust")
        .extension(".swift", "swift")
        .extension(".kt", "kotlin")
        .extension(".html", "html")
        .extension(".css", "css")
        .extension(".sql", "sql")
        .extension(".sh", "shell")
        .extension(".ps1", "powershell")
        .extension(".pl", "perl")
        .extension(".r", "r")
        .extension(".m", "matlab")
}

/// The compact table: a handful of broad rules for the most common
/// languages and no extension map.
pub fn compact_builder() -> RegistryBuilder {
    SignatureRegistry::builder()
        .language(
            "javascript",
            &[
                r"\bfunction\s+\w+\s*\(",
                r"\bconst\s+\w+\s*=",
                r"\blet\s+\w+\s*=",
                r"\bconsole\.log\s*\(",
            ],
        )
        .language("typescript", &[r"\binterface\s+\w+", r"\btype\s+\w+\s*=", r":\s*\w+"])
        .language(
            "python",
            &[
                r"\bdef\s+\w+\s*\(",
                r"\bimport\s+\w+",
                r#"\bif\s+__name__\s*==\s*('|")__main__('|")"#,
            ],
        )
        .language("html", &[r"<!DOCTYPE\s+html>", r"<html>", r"<body>"])
        .language("css", &[r"\.\w+\s*\{", r"#\w+\s*\{", r"@media\s+"])
        .language("java", &[r"\bpublic\s+class\s+\w+", r"\bprivate\s+\w+\s+\w+"])
        .language("csharp", &[r"\bnamespace\s+\w+", r"\bpublic\s+class\s+\w+"])
}
