//! Template catalog — maps a template identifier to its visual configuration.
//!
//! Both the preview tree and the exported PDF read colors and sizes from the
//! same `TemplateStyle`, so a template looks the same on screen and on paper.
//! Lookup is total: unknown identifiers resolve to `DEFAULT_TEMPLATE_ID`.

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::layout::font_metrics::{FontFace, FontFamily};

// ────────────────────────────────────────────────────────────────────────────
// Color
// ────────────────────────────────────────────────────────────────────────────

/// 8-bit sRGB color. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Components scaled to 0.0–1.0, as PDF color operators expect.
    pub fn to_unit(&self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Which palette slot a piece of content is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Body,
    HeaderText,
}

// ────────────────────────────────────────────────────────────────────────────
// Style record
// ────────────────────────────────────────────────────────────────────────────

/// A stroked rule: section-title underline or page frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleStyle {
    /// Stroke width in points.
    pub width: f32,
    pub color: Rgb,
}

/// Font sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    pub name: f32,
    pub section: f32,
    /// Entry title lines ("Engineer at Acme").
    pub entry: f32,
    pub text: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateStyle {
    pub id: &'static str,
    pub display_name: &'static str,
    pub family: FontFamily,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub body: Rgb,
    /// Filled header band. Header text switches to `header_text` when set.
    pub header_background: Option<Rgb>,
    pub header_text: Rgb,
    /// Underline under section titles; `None` opts out of decoration.
    pub title_rule: Option<RuleStyle>,
    /// Frame drawn around every page.
    pub page_border: Option<RuleStyle>,
    pub font_sizes: FontSizes,
}

impl TemplateStyle {
    pub fn color(&self, role: ColorRole) -> Rgb {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Body => self.body,
            ColorRole::HeaderText => self.header_text,
        }
    }

    /// Role used for the name and contact line.
    pub fn header_role(&self) -> ColorRole {
        if self.header_background.is_some() {
            ColorRole::HeaderText
        } else {
            ColorRole::Primary
        }
    }

    pub fn regular_face(&self) -> FontFace {
        FontFace::regular(self.family)
    }

    pub fn bold_face(&self) -> FontFace {
        FontFace::bold(self.family)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_TEMPLATE_ID: &str = "professional";

const STANDARD_SIZES: FontSizes = FontSizes {
    name: 20.0,
    section: 14.0,
    entry: 12.0,
    text: 10.0,
};

static CATALOG: [TemplateStyle; 9] = [
    TemplateStyle {
        id: "modern",
        display_name: "Modern",
        family: FontFamily::Helvetica,
        primary: Rgb(0x1e, 0x40, 0xaf),
        secondary: Rgb(0x6b, 0x72, 0x80),
        accent: Rgb(0x3b, 0x82, 0xf6),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 1.0,
            color: Rgb(0x3b, 0x82, 0xf6),
        }),
        page_border: None,
        font_sizes: FontSizes {
            name: 22.0,
            ..STANDARD_SIZES
        },
    },
    TemplateStyle {
        id: "professional",
        display_name: "Professional",
        family: FontFamily::Helvetica,
        primary: Rgb(0x11, 0x18, 0x27),
        secondary: Rgb(0x4b, 0x55, 0x63),
        accent: Rgb(0x1f, 0x29, 0x37),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 0.75,
            color: Rgb(0x9c, 0xa3, 0xaf),
        }),
        page_border: None,
        font_sizes: STANDARD_SIZES,
    },
    TemplateStyle {
        id: "creative",
        display_name: "Creative",
        family: FontFamily::Helvetica,
        primary: Rgb(0x7e, 0x22, 0xce),
        secondary: Rgb(0x86, 0x19, 0x8f),
        accent: Rgb(0xa8, 0x55, 0xf7),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 2.0,
            color: Rgb(0xec, 0x48, 0x99),
        }),
        page_border: None,
        font_sizes: FontSizes {
            name: 24.0,
            section: 15.0,
            ..STANDARD_SIZES
        },
    },
    TemplateStyle {
        id: "minimal",
        display_name: "Minimal",
        family: FontFamily::Helvetica,
        primary: Rgb(0x37, 0x41, 0x51),
        secondary: Rgb(0x9c, 0xa3, 0xaf),
        accent: Rgb(0x37, 0x41, 0x51),
        body: Rgb(0x37, 0x41, 0x51),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: None,
        page_border: None,
        font_sizes: FontSizes {
            name: 18.0,
            section: 12.0,
            entry: 11.0,
            text: 10.0,
        },
    },
    TemplateStyle {
        id: "executive",
        display_name: "Executive",
        family: FontFamily::Helvetica,
        primary: Rgb(0x11, 0x18, 0x27),
        secondary: Rgb(0x6b, 0x72, 0x80),
        accent: Rgb(0xb4, 0x53, 0x09),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: Some(Rgb(0x1f, 0x29, 0x37)),
        header_text: Rgb(0xf9, 0xfa, 0xfb),
        title_rule: Some(RuleStyle {
            width: 1.0,
            color: Rgb(0xb4, 0x53, 0x09),
        }),
        page_border: None,
        font_sizes: FontSizes {
            name: 22.0,
            ..STANDARD_SIZES
        },
    },
    TemplateStyle {
        id: "tech",
        display_name: "Tech",
        family: FontFamily::Helvetica,
        primary: Rgb(0x15, 0x80, 0x3d),
        secondary: Rgb(0x25, 0x63, 0xeb),
        accent: Rgb(0x22, 0xc5, 0x5e),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 1.5,
            color: Rgb(0x22, 0xc5, 0x5e),
        }),
        page_border: None,
        font_sizes: STANDARD_SIZES,
    },
    TemplateStyle {
        id: "elegant",
        display_name: "Elegant",
        family: FontFamily::Times,
        primary: Rgb(0x1c, 0x19, 0x17),
        secondary: Rgb(0x78, 0x71, 0x6c),
        accent: Rgb(0x92, 0x40, 0x0e),
        body: Rgb(0x29, 0x25, 0x24),
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 0.5,
            color: Rgb(0x92, 0x40, 0x0e),
        }),
        page_border: None,
        font_sizes: FontSizes {
            name: 24.0,
            section: 14.0,
            entry: 12.0,
            text: 10.5,
        },
    },
    TemplateStyle {
        id: "bold",
        display_name: "Bold",
        family: FontFamily::Helvetica,
        primary: Rgb::BLACK,
        secondary: Rgb(0x37, 0x41, 0x51),
        accent: Rgb::BLACK,
        body: Rgb::BLACK,
        header_background: None,
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 2.0,
            color: Rgb::BLACK,
        }),
        page_border: Some(RuleStyle {
            width: 3.0,
            color: Rgb::BLACK,
        }),
        font_sizes: FontSizes {
            name: 24.0,
            section: 15.0,
            ..STANDARD_SIZES
        },
    },
    TemplateStyle {
        id: "analysis",
        display_name: "Analysis Report",
        family: FontFamily::Helvetica,
        primary: Rgb(0x1e, 0x3a, 0x8a),
        secondary: Rgb(0x6b, 0x72, 0x80),
        accent: Rgb(0x25, 0x63, 0xeb),
        body: Rgb(0x1f, 0x29, 0x37),
        header_background: Some(Rgb(0x1e, 0x3a, 0x8a)),
        header_text: Rgb::WHITE,
        title_rule: Some(RuleStyle {
            width: 1.0,
            color: Rgb(0x25, 0x63, 0xeb),
        }),
        page_border: None,
        font_sizes: FontSizes {
            name: 16.0,
            ..STANDARD_SIZES
        },
    },
];

/// Every template, in catalog order.
pub fn catalog() -> &'static [TemplateStyle] {
    &CATALOG
}

/// Resolves a template identifier to its style. Never fails.
pub fn resolve_style(template_id: &str) -> &'static TemplateStyle {
    let wanted = template_id.trim();
    if let Some(style) = CATALOG.iter().find(|s| s.id.eq_ignore_ascii_case(wanted)) {
        return style;
    }
    debug!(template_id = wanted, "Unknown template, using default style");
    default_style()
}

pub fn default_style() -> &'static TemplateStyle {
    CATALOG
        .iter()
        .find(|s| s.id == DEFAULT_TEMPLATE_ID)
        .unwrap_or(&CATALOG[0])
}
