//! Compiler tests — CSS serialization, placeholder substitution semantics,
//! purity, and the image-section asymmetry.

use mailforge::models::section::{SectionKind, SectionRecord};
use mailforge::models::style::StylePatch;
use mailforge::models::template::TemplateRecord;
use mailforge::render::compile;

fn record(title: &str, layout: &str) -> TemplateRecord {
    TemplateRecord {
        id: 1,
        title: title.to_string(),
        content: Vec::new(),
        images: Vec::new(),
        styles: StylePatch::default(),
        layout: layout.to_string(),
        created_at: "2026-01-01T00:00:00".to_string(),
    }
}

fn text_section(content: &str, styles: StylePatch) -> SectionRecord {
    SectionRecord {
        kind: SectionKind::Text,
        content: content.to_string(),
        styles,
    }
}

#[test]
fn test_compile_worked_example() {
    let mut template = record("T", "<html>{{title}}{{content}}</html>");
    template.content.push(text_section(
        "Hi",
        StylePatch {
            color: Some("#fff".to_string()),
            ..StylePatch::default()
        },
    ));

    let html = compile(&template).expect("compile");
    assert_eq!(html, "<html>T<div style=\"color: #fff\">Hi</div></html>");
}

#[test]
fn test_compile_is_pure_and_deterministic() {
    let mut template = record("Newsletter", "<body>{{content}}</body>");
    template.content.push(text_section(
        "Hello",
        StylePatch {
            font_size: Some("18px".to_string()),
            text_align: Some("center".to_string()),
            ..StylePatch::default()
        },
    ));

    let first = compile(&template).expect("compile");
    let second = compile(&template).expect("compile again");
    assert_eq!(first, second);
}

#[test]
fn test_camel_case_keys_become_kebab_case() {
    let mut template = record("", "{{content}}");
    template.content.push(text_section(
        "x",
        StylePatch {
            text_align: Some("right".to_string()),
            font_weight: Some("bold".to_string()),
            text_decoration: Some("underline".to_string()),
            line_height: Some("1.5".to_string()),
            ..StylePatch::default()
        },
    ));

    let html = compile(&template).expect("compile");
    assert_eq!(
        html,
        "<div style=\"text-align: right; font-weight: bold; \
text-decoration: underline; line-height: 1.5\">x</div>"
    );
}

#[test]
fn test_only_first_placeholder_occurrence_is_replaced() {
    let template = record("T", "{{title}} and {{title}}");
    let html = compile(&template).expect("compile");
    assert_eq!(html, "T and {{title}}");
}

#[test]
fn test_maintitle_and_title_both_substituted() {
    let template = record("Launch", "<h1>{{maintitle}}</h1><h2>{{title}}</h2>");
    let html = compile(&template).expect("compile");
    assert_eq!(html, "<h1>Launch</h1><h2>Launch</h2>");
}

#[test]
fn test_empty_title_substitutes_empty_string() {
    let template = record("", "[{{title}}]");
    let html = compile(&template).expect("compile");
    assert_eq!(html, "[]");
}

#[test]
fn test_sections_joined_with_newline_in_order() {
    let mut template = record("", "{{content}}");
    template
        .content
        .push(text_section("first", StylePatch::default()));
    template
        .content
        .push(text_section("second", StylePatch::default()));

    let html = compile(&template).expect("compile");
    assert_eq!(html, "<div style=\"\">first</div>\n<div style=\"\">second</div>");
}

#[test]
fn test_image_sections_render_empty() {
    // Per-section image styling is intentionally not rendered inline; the
    // flat image list below is the only image output.
    let mut template = record("", "{{content}}|{{#each images}}{{/each}}");
    template.content.push(SectionRecord {
        kind: SectionKind::Image,
        content: "/uploads/a.img".to_string(),
        styles: StylePatch {
            text_align: Some("center".to_string()),
            ..StylePatch::default()
        },
    });
    template.images.push("/uploads/a.img".to_string());

    let html = compile(&template).expect("compile");
    assert_eq!(
        html,
        "|<img src=\"/uploads/a.img\" style=\"max-width: 100%;\">"
    );
}

#[test]
fn test_image_list_renders_one_tag_per_url_in_order() {
    let mut template = record("", "{{#each images}}{{/each}}");
    template.images.push("/uploads/a.img".to_string());
    template.images.push("/uploads/b.img".to_string());

    let html = compile(&template).expect("compile");
    assert_eq!(
        html,
        "<img src=\"/uploads/a.img\" style=\"max-width: 100%;\">\n\
<img src=\"/uploads/b.img\" style=\"max-width: 100%;\">"
    );
}

#[test]
fn test_empty_image_list_substitutes_empty_string() {
    let template = record("", "a{{#each images}}{{/each}}b");
    let html = compile(&template).expect("compile");
    assert_eq!(html, "ab");
}

#[test]
fn test_content_is_raw_and_unescaped() {
    let mut template = record("", "{{content}}");
    template
        .content
        .push(text_section("<b>bold & raw</b>", StylePatch::default()));

    let html = compile(&template).expect("compile");
    assert_eq!(html, "<div style=\"\"><b>bold & raw</b></div>");
}

#[test]
fn test_missing_layout_is_a_compiler_fault() {
    let template = record("T", "");
    assert!(compile(&template).is_err());
}

#[test]
fn test_layout_without_placeholders_passes_through() {
    let template = record("T", "<html>static</html>");
    let html = compile(&template).expect("compile");
    assert_eq!(html, "<html>static</html>");
}
