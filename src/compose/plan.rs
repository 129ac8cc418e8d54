//! Measure pass: place every element and total the canvas height.
//!
//! The draw pass only reads the offsets recorded here, so the canvas can
//! never be shorter than what gets drawn on it.

use serde::Serialize;

use crate::content::ContentBundle;
use crate::font::FontHandle;
use crate::input::FormValues;
use crate::layout::wrap;
use crate::page::PageConfig;

/// What occupies a band of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum ElementKind {
    Logo,
    Heading(String),
    Separator,
    RuleLine(String),
    Declaration(String),
    /// A labeled form value, pre-formatted as `label: value`
    Field(String),
    SignatureLabel(String),
    Signature,
}

/// An element and the band `[y, y + height)` reserved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedElement {
    pub kind: ElementKind,
    pub y: u32,
    pub height: u32,
}

impl ElementKind {
    /// The text drawn for this element, if it is a text element.
    pub fn text(&self) -> Option<&str> {
        match self {
            ElementKind::Heading(text)
            | ElementKind::RuleLine(text)
            | ElementKind::Declaration(text)
            | ElementKind::Field(text)
            | ElementKind::SignatureLabel(text) => Some(text),
            ElementKind::Logo | ElementKind::Separator | ElementKind::Signature => None,
        }
    }
}

impl PlacedElement {
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Result of the measure pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub elements: Vec<PlacedElement>,
    /// Total canvas height, bottom margin included
    pub height: u32,
}

impl LayoutPlan {
    /// Elements matching `predicate`, in page order.
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&ElementKind) -> bool + 'a,
    ) -> impl Iterator<Item = &'a PlacedElement> + 'a {
        self.elements.iter().filter(move |el| predicate(&el.kind))
    }

    pub fn signature(&self) -> Option<&PlacedElement> {
        self.filter(|k| matches!(k, ElementKind::Signature)).next()
    }

    pub fn logo(&self) -> Option<&PlacedElement> {
        self.filter(|k| matches!(k, ElementKind::Logo)).next()
    }

    pub fn rule_line_count(&self) -> usize {
        self.filter(|k| matches!(k, ElementKind::RuleLine(_))).count()
    }
}

/// The vertical offset while planning. Owned by one planning pass.
struct LayoutCursor {
    y: u32,
    elements: Vec<PlacedElement>,
}

impl LayoutCursor {
    fn new(top_margin: u32) -> Self {
        Self {
            y: top_margin,
            elements: Vec::new(),
        }
    }

    fn place(&mut self, kind: ElementKind, height: u32) {
        self.elements.push(PlacedElement {
            kind,
            y: self.y,
            height,
        });
        self.y += height;
    }

    fn skip(&mut self, height: u32) {
        self.y += height;
    }

    fn finish(self, bottom_margin: u32) -> LayoutPlan {
        LayoutPlan {
            elements: self.elements,
            height: self.y + bottom_margin,
        }
    }
}

/// Lay out the document top to bottom.
///
/// Title, rules and declaration wrap at the content width. Form fields are
/// single lines and never wrap: an over-long name or organization runs past
/// the right margin and is clipped at the canvas edge, leaving the page
/// height unchanged.
pub fn plan(
    config: &PageConfig,
    bundle: &ContentBundle,
    form: &FormValues,
    font: &FontHandle,
    has_logo: bool,
) -> LayoutPlan {
    let max_width = config.content_width() as f32;
    let heading = font.at_size(config.heading_px);
    let body = font.at_size(config.body_px);

    let mut cursor = LayoutCursor::new(config.top_margin);

    if has_logo {
        cursor.place(ElementKind::Logo, config.logo_block_height);
    }

    for line in wrap(&bundle.title, &heading, max_width) {
        cursor.place(ElementKind::Heading(line), config.heading_line_height);
    }
    cursor.place(ElementKind::Separator, config.separator_height);

    for line in wrap(&bundle.rules, &body, max_width) {
        cursor.place(ElementKind::RuleLine(line), config.line_height);
    }
    cursor.skip(config.paragraph_spacing);
    cursor.place(ElementKind::Separator, config.separator_height);

    for line in wrap(&bundle.declaration, &body, max_width) {
        cursor.place(ElementKind::Declaration(line), config.line_height);
    }
    cursor.skip(config.paragraph_spacing);

    let fields = [
        (&bundle.name_label, form.name.trim().to_string()),
        (&bundle.organization_label, form.organization.trim().to_string()),
        (&bundle.date_label, bundle.locale.format_date(form.date)),
    ];
    for (label, value) in fields {
        cursor.place(
            ElementKind::Field(format!("{}: {}", label, value)),
            config.field_line_height,
        );
    }

    cursor.place(
        ElementKind::SignatureLabel(format!("{}:", bundle.signature_label)),
        config.field_line_height,
    );
    cursor.place(ElementKind::Signature, config.signature_block_height);

    cursor.finish(config.bottom_margin)
}
