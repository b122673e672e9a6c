//! Turning a free-form backend reply into one clean `@Test` method.

use regex::{NoExpand, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::core::java_text::{braces_balanced, find_matching_brace, mask_non_code};
use crate::error::SanitizationError;

/// `@Test` opening its own line; mentions inside prose do not count
static TEST_ANNOTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*@Test\b").unwrap());

static TEST_METHOD_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"void\s+[\w$]+\s*\(").unwrap());

/// Indentation of a member inside the test class
const MEMBER_INDENT: &str = "    ";

/// Extract the first `@Test` method from a backend reply.
///
/// Markdown fence lines and any prose around the method are dropped, the
/// method is renamed to `test_name`, and the result is re-indented as a
/// class member.
pub fn sanitize_reply(reply: &str, test_name: &str) -> Result<String, SanitizationError> {
    if reply.trim().is_empty() {
        return Err(SanitizationError::EmptyReply);
    }

    let unfenced = strip_fence_lines(reply);
    let line_start = TEST_ANNOTATION_RE
        .find(&unfenced)
        .map(|m| m.start())
        .ok_or(SanitizationError::MissingTestAnnotation)?;

    // Prose before the annotation is never masked, so stray quotes in it
    // cannot swallow the method
    let code = &unfenced[line_start..];
    let masked = mask_non_code(code);

    let open = masked.find('{').ok_or(SanitizationError::MissingBody)?;
    let close = find_matching_brace(&masked, open).ok_or(SanitizationError::UnbalancedBraces)?;

    let header = &code[..open];
    let body = &code[open..=close];

    let replacement = format!("void {}(", test_name);
    let renamed = TEST_METHOD_NAME_RE.replace(header, NoExpand(&replacement));
    let method = format!("{}{}", renamed, body);

    if !braces_balanced(&method) {
        return Err(SanitizationError::UnbalancedBraces);
    }

    debug!("Sanitized reply to {} lines", method.lines().count());
    Ok(reindent(&method, MEMBER_INDENT))
}

/// Drop markdown code fence lines, keeping everything between them
pub fn strip_fence_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove the common leading indentation and prefix every line with `indent`
pub fn reindent(code: &str, indent: &str) -> String {
    let expanded: Vec<String> = code.lines().map(|l| l.replace('\t', "    ")).collect();

    let common = expanded
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    expanded
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, l[common..].trim_end())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
