//! Unit extraction: locate the type declaration and its testable methods
//! in Java source text using structural patterns.
//!
//! This is not a parser. Comments and literals are masked out first, then
//! declarations are matched line by line. Exception detection is textual:
//! every `throw new X` in a method body is reported, whether or not it is
//! reachable or caught.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::debug;

use crate::core::java_text::{find_matching_brace, mask_non_code, split_top_level};
use crate::error::ExtractionError;
use crate::models::{MethodDescriptor, Parameter, SourceUnit, Visibility};

static TYPE_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?:(?:public|protected|private|abstract|final|static|sealed|non-sealed|strictfp)\s+)*(?:class|enum|record)\s+([\w$]+)",
    )
    .unwrap()
});

/// Any type declaration, interfaces included, used to step over nested types
static NESTED_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?:(?:public|protected|private|abstract|final|static|sealed|non-sealed|strictfp)\s+)*(?:class|interface|@interface|enum|record)\s+[\w$]+",
    )
    .unwrap()
});

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*package\s+([\w.]+)\s*;").unwrap());

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+(static\s+)?([\w.*]+)\s*;").unwrap());

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?P<mods>(?:(?:public|protected|private|static|final|synchronized|abstract|native|strictfp|default)\s+)*)(?:<[^{};()=]*?>\s+)?(?P<ret>[\w.$]+(?:\s*<[^(){};=]*>)?(?:\s*\[\s*\])*)\s+(?P<name>[\w$]+)\s*\((?P<params>[^()]*)\)\s*(?:throws\s+[\w.$,\s]+?\s*)?\{",
    )
    .unwrap()
});

static THROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bthrow\s+new\s+([\w.$]+)").unwrap());

static ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[\w.]+(?:\([^)]*\))?\s*").unwrap());

/// Words that can precede `(...) {` at the start of a line without being a
/// method declaration
const NON_METHOD_WORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "catch", "try", "finally",
    "synchronized", "return", "new", "throw", "class", "interface", "enum", "record",
];

const MODIFIERS: &[&str] = &[
    "public", "protected", "private", "static", "final", "abstract", "native", "strictfp",
    "default",
];

fn is_non_method_word(word: &str) -> bool {
    NON_METHOD_WORDS.contains(&word) || MODIFIERS.contains(&word)
}

/// Extract the type name, package, imports and testable methods from source text.
///
/// Fails only when no class, enum or record declaration can be located.
/// Individual methods that cannot be delimited are skipped.
pub fn extract(source: &str) -> Result<SourceUnit, ExtractionError> {
    let masked = mask_non_code(source);

    let decl = TYPE_DECL_RE
        .captures(&masked)
        .ok_or(ExtractionError::NoTypeDeclaration)?;
    let (Some(decl_match), Some(name)) = (decl.get(0), decl.get(1)) else {
        return Err(ExtractionError::NoTypeDeclaration);
    };
    let class_name = name.as_str().to_string();
    let body = type_body(&masked, decl_match.end());

    let package = PACKAGE_RE
        .captures(&masked)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let imports = IMPORT_RE
        .captures_iter(&masked)
        .filter(|c| c.get(1).is_none())
        .filter_map(|c| c.get(2).map(|m| m.as_str().to_string()))
        .collect();

    let methods = extract_methods(source, &masked, body);
    debug!("Extracted {} methods from {}", methods.len(), class_name);

    Ok(SourceUnit {
        class_name,
        package,
        imports,
        methods,
    })
}

/// Byte range between the braces of the type declared just before
/// `after`. An unclosed body runs to the end of the text.
fn type_body(masked: &str, after: usize) -> Range<usize> {
    let Some(open) = masked[after..].find('{').map(|offset| after + offset) else {
        return masked.len()..masked.len();
    };
    let close = find_matching_brace(masked, open).unwrap_or(masked.len());
    open + 1..close
}

/// Spans of nested type declarations inside `body`, from the declaration
/// line through the closing brace
fn nested_types(masked: &str, body: &Range<usize>) -> Vec<Range<usize>> {
    NESTED_TYPE_RE
        .find_iter(&masked[..body.end])
        .filter(|m| m.start() >= body.start)
        .map(|m| m.start()..type_body(masked, m.end()).end)
        .collect()
}

fn extract_methods(source: &str, masked: &str, body: Range<usize>) -> Vec<MethodDescriptor> {
    let nested = nested_types(masked, &body);
    let mut methods = Vec::new();
    let haystack = &masked[..body.end];
    let mut pos = body.start;

    while pos <= haystack.len() {
        let Some(caps) = METHOD_RE.captures_at(haystack, pos) else {
            break;
        };
        let (Some(whole), Some(ret), Some(name)) = (caps.get(0), caps.name("ret"), caps.name("name")) else {
            break;
        };

        if let Some(inner) = nested.iter().find(|r| r.contains(&whole.start())) {
            debug!("Skipping nested type body at byte {}", inner.start);
            pos = (inner.end + 1).max(whole.end());
            continue;
        }

        let open = whole.end() - 1;

        let Some(close) = find_matching_brace(masked, open) else {
            debug!("Skipping '{}': body never closes", name.as_str());
            pos = whole.end();
            continue;
        };
        pos = close + 1;

        // Constructors match with a modifier in the return type slot
        if is_non_method_word(ret.as_str()) || is_non_method_word(name.as_str()) {
            continue;
        }

        let modifiers: Vec<&str> = caps
            .name("mods")
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();

        if modifiers.contains(&"private") || modifiers.contains(&"protected") {
            debug!("Skipping non-visible method '{}'", name.as_str());
            continue;
        }

        let visibility = if modifiers.contains(&"public") {
            Visibility::Public
        } else {
            Visibility::Package
        };

        let parameters = caps
            .name("params")
            .map(|p| parse_parameters(p.as_str()))
            .unwrap_or_default();

        let declared_exceptions = detect_thrown_exceptions(&masked[open + 1..close]);

        methods.push(MethodDescriptor {
            name: name.as_str().to_string(),
            visibility,
            return_type: collapse_whitespace(ret.as_str()),
            parameters,
            declared_exceptions,
            is_static: modifiers.contains(&"static"),
            signature: collapse_whitespace(&source[whole.start()..open]),
        });
    }

    methods
}

/// Types named by `throw new` in a body, first occurrence order, de-duplicated
pub fn detect_thrown_exceptions(body: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in THROW_RE.captures_iter(body) {
        if let Some(m) = caps.get(1) {
            let ty = m.as_str().to_string();
            if !found.contains(&ty) {
                found.push(ty);
            }
        }
    }
    found
}

fn parse_parameters(params: &str) -> Vec<Parameter> {
    split_top_level(params, ',')
        .into_iter()
        .filter_map(parse_parameter)
        .collect()
}

fn parse_parameter(raw: &str) -> Option<Parameter> {
    let cleaned = ANNOTATION_RE.replace_all(raw, "");
    let mut tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| *t != "final")
        .collect();

    let last = tokens.pop()?;
    if tokens.is_empty() {
        return None;
    }
    let mut ty = tokens.join(" ");
    let mut name = last.to_string();

    if let Some(stripped) = name.strip_prefix("...") {
        ty.push_str("...");
        name = stripped.to_string();
    }
    while let Some(stripped) = name.strip_suffix("[]") {
        ty.push_str("[]");
        name = stripped.to_string();
    }

    Some(Parameter::new(name, ty))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
