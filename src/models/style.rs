use serde::{Deserialize, Serialize};

/// Fully resolved presentation attributes for a section.
///
/// Every field is always populated; partial input goes through [`resolve`]
/// before it is stored on a section. Field names serialize in camelCase to
/// match the wire format (`fontSize`, `textAlign`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSet {
    pub font_size: String,
    pub color: String,
    pub text_align: String,
    pub font_weight: String,
    pub font_style: String,
    pub text_decoration: String,
    pub line_height: String,
}

impl Default for StyleSet {
    fn default() -> Self {
        StyleSet {
            font_size: "16px".to_string(),
            color: "#000000".to_string(),
            text_align: "left".to_string(),
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            text_decoration: "none".to_string(),
            line_height: "1.5".to_string(),
        }
    }
}

/// Partial style input as submitted by the editor or read back from a
/// persisted record. Absent fields fall back during [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
}

impl StylePatch {
    /// Present fields with their wire (camelCase) keys, in declaration order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        fn push<'a>(
            out: &mut Vec<(&'static str, &'a str)>,
            key: &'static str,
            value: &'a Option<String>,
        ) {
            if let Some(v) = value.as_deref() {
                out.push((key, v));
            }
        }
        push(&mut out, "fontSize", &self.font_size);
        push(&mut out, "color", &self.color);
        push(&mut out, "textAlign", &self.text_align);
        push(&mut out, "fontWeight", &self.font_weight);
        push(&mut out, "fontStyle", &self.font_style);
        push(&mut out, "textDecoration", &self.text_decoration);
        push(&mut out, "lineHeight", &self.line_height);
        out
    }
}

impl From<&StyleSet> for StylePatch {
    fn from(s: &StyleSet) -> Self {
        StylePatch {
            font_size: Some(s.font_size.clone()),
            color: Some(s.color.clone()),
            text_align: Some(s.text_align.clone()),
            font_weight: Some(s.font_weight.clone()),
            font_style: Some(s.font_style.clone()),
            text_decoration: Some(s.text_decoration.clone()),
            line_height: Some(s.line_height.clone()),
        }
    }
}

impl From<StyleSet> for StylePatch {
    fn from(s: StyleSet) -> Self {
        StylePatch::from(&s)
    }
}

/// Append a `px` unit to bare numeric font sizes ("20" becomes "20px").
/// Values that already carry a unit pass through unchanged.
fn canonical_font_size(value: &str) -> String {
    let bare = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit() || c == '.');
    if bare {
        format!("{value}px")
    } else {
        value.to_string()
    }
}

fn pick(over: Option<&str>, base: Option<&str>, default: &str) -> String {
    over.or(base).unwrap_or(default).to_string()
}

/// Merge `overrides` onto `base` with deterministic per-field precedence:
/// override wins when present, then base, then the process-wide default.
/// The result always has all seven fields populated. Only an override
/// `fontSize` is unit-canonicalized; base and default values are trusted.
pub fn resolve(base: &StylePatch, overrides: &StylePatch) -> StyleSet {
    let d = StyleSet::default();
    StyleSet {
        font_size: overrides
            .font_size
            .as_deref()
            .map(canonical_font_size)
            .or_else(|| base.font_size.clone())
            .unwrap_or(d.font_size),
        color: pick(overrides.color.as_deref(), base.color.as_deref(), &d.color),
        text_align: pick(
            overrides.text_align.as_deref(),
            base.text_align.as_deref(),
            &d.text_align,
        ),
        font_weight: pick(
            overrides.font_weight.as_deref(),
            base.font_weight.as_deref(),
            &d.font_weight,
        ),
        font_style: pick(
            overrides.font_style.as_deref(),
            base.font_style.as_deref(),
            &d.font_style,
        ),
        text_decoration: pick(
            overrides.text_decoration.as_deref(),
            base.text_decoration.as_deref(),
            &d.text_decoration,
        ),
        line_height: pick(
            overrides.line_height.as_deref(),
            base.line_height.as_deref(),
            &d.line_height,
        ),
    }
}
