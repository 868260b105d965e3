//! Template compiler: turns a persisted template into a standalone HTML
//! document by substituting into its captured layout skeleton.

use std::fmt;

use crate::models::section::SectionKind;
use crate::models::style::StylePatch;
use crate::models::template::TemplateRecord;

/// Compiler fault. The HTTP boundary converts this into a generic render
/// error, logging the cause; callers never see structured detail.
#[derive(Debug)]
pub enum RenderError {
    MissingLayout,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingLayout => write!(f, "template has no layout"),
        }
    }
}

/// Insert a hyphen before each uppercase letter, then lowercase it:
/// "textAlign" becomes "text-align".
fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Serialize the present style fields into a CSS declaration string,
/// `key: value` pairs joined with "; ".
fn css_declarations(styles: &StylePatch) -> String {
    styles
        .entries()
        .iter()
        .map(|(key, value)| format!("{}: {}", camel_to_kebab(key), value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Replace only the first literal occurrence of `token`. A layout that
/// repeats a token keeps every later occurrence as literal text; this
/// matches the original processor and is pinned by a regression test.
fn replace_first(haystack: &str, token: &str, replacement: &str) -> String {
    match haystack.find(token) {
        Some(at) => {
            let mut out =
                String::with_capacity(haystack.len() - token.len() + replacement.len());
            out.push_str(&haystack[..at]);
            out.push_str(replacement);
            out.push_str(&haystack[at + token.len()..]);
            out
        }
        None => haystack.to_string(),
    }
}

/// Compile a template into final HTML.
///
/// Pure: deterministic for identical input and never mutates its argument.
/// Text sections become styled divs with raw, unescaped content; image
/// sections render as empty strings, with images emitted instead from the
/// template's flat `images` list.
pub fn compile(template: &TemplateRecord) -> Result<String, RenderError> {
    if template.layout.is_empty() {
        return Err(RenderError::MissingLayout);
    }

    let sections_html = template
        .content
        .iter()
        .map(|section| match section.kind {
            SectionKind::Text => format!(
                "<div style=\"{}\">{}</div>",
                css_declarations(&section.styles),
                section.content
            ),
            SectionKind::Image => String::new(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let images_html = template
        .images
        .iter()
        .map(|url| format!("<img src=\"{url}\" style=\"max-width: 100%;\">"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut html = replace_first(&template.layout, "{{maintitle}}", &template.title);
    html = replace_first(&html, "{{title}}", &template.title);
    html = replace_first(&html, "{{content}}", &sections_html);
    html = replace_first(&html, "{{#each images}}{{/each}}", &images_html);

    Ok(html)
}
