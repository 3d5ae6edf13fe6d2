//! Placeholder substitution for submission templates.

use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use strsim::levenshtein;

use crate::constants::SIMILARITY_THRESHOLD_PERCENT;
use crate::core::{DivvyError, Result};
use crate::settings::{Settings, value_to_string};
use crate::utils::fs::write_text_file;

/// Brace groups that count as placeholders when left unresolved.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Placeholders left in the output because no variable matched them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPlaceholders {
    /// Number of distinct unresolved names.
    pub count: usize,
    /// Distinct unresolved names, in order of first appearance.
    pub names: Vec<String>,
}

/// Result of rendering one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub content: String,
    /// Where the content was written, if it was persisted.
    pub path: Option<PathBuf>,
    /// Set when placeholders remained after substitution.
    pub unresolved: Option<UnresolvedPlaceholders>,
}

/// Substitutes `{KEY}` placeholders with setting values.
///
/// Each setting `k` provides the token `{` + uppercase(`k`) + `}`, whatever
/// characters the key holds: an empty key gives `{}` and `a}b` gives `{A}B}`. The
/// template is scanned once for all tokens, longest first at each position. Values
/// inserted for one token are never rescanned, so a value that itself looks like
/// `{OTHER}` appears literally in the output.
///
/// Brace groups that do not name a setting are left untouched. Those that look like
/// placeholders (uppercase letters, digits and underscores) are reported as
/// unresolved; rendering still succeeds. Shell parameter expansions such as
/// `${HOME}` are never reported.
///
/// If two settings uppercase to the same token, the first in key order wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render `template` with `variables` without persisting the result.
    ///
    /// # Errors
    ///
    /// [`DivvyError::Other`] if the token set is too large to compile into a
    /// matcher.
    pub fn render(&self, template: &str, variables: &Settings) -> Result<RenderOutcome> {
        let tokens = token_table(variables);
        let mut content = String::with_capacity(template.len());
        let mut unresolved: Vec<String> = Vec::new();
        let mut last = 0;

        if let Some(matcher) = token_matcher(&tokens)? {
            for m in matcher.find_iter(template) {
                collect_unresolved(template, last, m.start(), &mut unresolved);
                content.push_str(&template[last..m.start()]);
                if let Some(value) = tokens.get(m.as_str()) {
                    content.push_str(value);
                }
                last = m.end();
            }
        }
        collect_unresolved(template, last, template.len(), &mut unresolved);
        content.push_str(&template[last..]);

        let unresolved = if unresolved.is_empty() {
            None
        } else {
            let available: Vec<&str> =
                tokens.keys().map(|token| &token[1..token.len() - 1]).collect();
            for name in &unresolved {
                let similar = find_similar_tokens(name, &available);
                if similar.is_empty() {
                    tracing::warn!("Template placeholder {{{}}} has no value", name);
                } else {
                    tracing::warn!(
                        "Template placeholder {{{}}} has no value (did you mean {}?)",
                        name,
                        similar.join(", ")
                    );
                }
            }
            Some(UnresolvedPlaceholders {
                count: unresolved.len(),
                names: unresolved,
            })
        };

        Ok(RenderOutcome {
            content,
            path: None,
            unresolved,
        })
    }

    /// Render `template` and write it to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// IO errors from creating directories or writing the file, and the errors of
    /// [`TemplateRenderer::render`].
    pub fn render_to_file(
        &self,
        template: &str,
        variables: &Settings,
        path: &Path,
    ) -> Result<RenderOutcome> {
        let mut outcome = self.render(template, variables)?;
        tracing::info!("Writing script to {}", path.display());
        write_text_file(path, &outcome.content)?;
        outcome.path = Some(path.to_path_buf());
        Ok(outcome)
    }
}

/// Map of full token (`{KEY}`) to its substituted text.
fn token_table(variables: &Settings) -> HashMap<String, String> {
    let mut tokens = HashMap::with_capacity(variables.len());
    for (key, value) in variables {
        tokens
            .entry(format!("{{{}}}", key.to_uppercase()))
            .or_insert_with(|| value_to_string(value));
    }
    tokens
}

/// One alternation over every token, longest first so the longest token wins at
/// any position. `None` when there is nothing to substitute.
fn token_matcher(tokens: &HashMap<String, String>) -> Result<Option<Regex>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut ordered: Vec<&str> = tokens.keys().map(String::as_str).collect();
    ordered.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let pattern = ordered.into_iter().map(regex::escape).collect::<Vec<_>>().join("|");

    Regex::new(&pattern).map(Some).map_err(|e| DivvyError::Other {
        message: format!("Failed to build template matcher: {e}"),
    })
}

/// Record placeholder names in `template[start..end]`, a span no token replaced.
fn collect_unresolved(template: &str, start: usize, end: usize, unresolved: &mut Vec<String>) {
    for caps in PLACEHOLDER.captures_iter(&template[start..end]) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let is_shell_expansion = template[..start + whole.start()].ends_with('$');
        let name = name.as_str();
        if !is_shell_expansion && !unresolved.iter().any(|n| n == name) {
            unresolved.push(name.to_string());
        }
    }
}

/// Up to three known token names close enough to `target` to be a likely typo.
fn find_similar_tokens(target: &str, available: &[&str]) -> Vec<String> {
    let mut scored: Vec<_> = available
        .iter()
        .map(|name| (*name, levenshtein(target, name)))
        .collect();

    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    scored
        .into_iter()
        .filter(|(_, dist)| *dist <= target.len() * SIMILARITY_THRESHOLD_PERCENT / 100)
        .take(3)
        .map(|(name, _)| name.to_string())
        .collect()
}
