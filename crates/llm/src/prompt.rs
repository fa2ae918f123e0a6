//! Prompt templates bundled with the crate.
//!
//! Templates use `{{name}}` placeholders, filled in a single pass over the
//! template. Substituted values (the document, model-suggested subtopics)
//! are never rescanned, so placeholder-like text inside them stays literal.

pub const COMPRESS_TEMPLATE: &str = include_str!("../prompts/compress.md");
pub const THEMES_TEMPLATE: &str = include_str!("../prompts/themes.md");
pub const SUMMARY_TEMPLATE: &str = include_str!("../prompts/summary.md");

/// Fill `vars` and the document into `template`. Unknown placeholders are
/// left as written.
pub fn render(template: &str, vars: &[(&str, &str)], document: &str) -> String {
    let mut out = String::with_capacity(template.len() + document.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        match after.find("}}").and_then(|close| lookup(&after[..close], vars, document).map(|v| (close, v))) {
            Some((close, value)) => {
                out.push_str(value);
                rest = &after[close + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn lookup<'a>(name: &str, vars: &[(&str, &'a str)], document: &'a str) -> Option<&'a str> {
    if name == "document" {
        return Some(document);
    }
    vars.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}
