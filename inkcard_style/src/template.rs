// Copyright 2026 the Inkcard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use inkcard_decor::{
    Border, Corner, Decoration, DecorationKind, Pattern, QuoteMarks, Texture, Watermark,
};
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, StyleConfig};

/// Named starting points for a style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Dark gray Arial on white.
    #[default]
    Simple,
    /// Georgia on off-white with a quote mark and a border.
    Literary,
    /// Compact sans-serif on light gray with a watermark.
    Business,
    /// Large handwriting face on paper with a line texture.
    Handwriting,
}

struct Look {
    family: &'static str,
    size: f32,
    text: Color,
    background: Color,
    padding: f32,
    line_height: f32,
    radius: f32,
    decorations: &'static [DecorationKind],
}

impl Template {
    /// Every template, in display order.
    pub const ALL: [Self; 4] = [Self::Simple, Self::Literary, Self::Business, Self::Handwriting];

    /// Identifier used in JSON and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Literary => "literary",
            Self::Business => "business",
            Self::Handwriting => "handwriting",
        }
    }

    fn look(self) -> Look {
        match self {
            Self::Simple => Look {
                family: "Arial",
                size: 24.0,
                text: Color::from_rgb8(0x33, 0x33, 0x33),
                background: Color::WHITE,
                padding: 40.0,
                line_height: 1.5,
                radius: 0.0,
                decorations: &[],
            },
            Self::Literary => Look {
                family: "Georgia",
                size: 28.0,
                text: Color::from_rgb8(0x2c, 0x3e, 0x50),
                background: Color::from_rgb8(0xf8, 0xf9, 0xfa),
                padding: 60.0,
                line_height: 1.8,
                radius: 8.0,
                decorations: &[DecorationKind::QuoteMarks, DecorationKind::Border],
            },
            Self::Business => Look {
                family: "Microsoft YaHei",
                size: 22.0,
                text: Color::from_rgb8(0x1a, 0x1a, 0x1a),
                background: Color::from_rgb8(0xf0, 0xf2, 0xf5),
                padding: 50.0,
                line_height: 1.6,
                radius: 4.0,
                decorations: &[DecorationKind::Watermark],
            },
            Self::Handwriting => Look {
                family: "FZKTJW",
                size: 32.0,
                text: Color::from_rgb8(0x44, 0x44, 0x44),
                background: Color::from_rgb8(0xfd, 0xfb, 0xf7),
                padding: 45.0,
                line_height: 2.0,
                radius: 0.0,
                decorations: &[DecorationKind::Texture],
            },
        }
    }

    /// Applies the template on top of `base`.
    ///
    /// Typography, colors, padding and corner radius are replaced. The enabled
    /// decorations become exactly the template's, each with default options;
    /// background image, filters and alignment are kept from `base`.
    pub fn apply(self, base: &StyleConfig) -> StyleConfig {
        let look = self.look();
        let mut style = base.clone();
        style.font_family = look.family.to_owned();
        style.font_size = look.size;
        style.text_color = look.text;
        style.background.color = look.background;
        style.padding = look.padding;
        style.line_height = look.line_height;
        style.border_radius = look.radius;

        for kind in DecorationKind::ALL {
            style.decorations.disable(kind);
        }
        for kind in look.decorations {
            style.decorations.set(default_decoration(*kind));
        }
        style
    }
}

fn default_decoration(kind: DecorationKind) -> Decoration {
    match kind {
        DecorationKind::QuoteMarks => Decoration::QuoteMarks(QuoteMarks::default()),
        DecorationKind::Border => Decoration::Border(Border::default()),
        DecorationKind::Watermark => Decoration::Watermark(Watermark::default()),
        DecorationKind::Texture => Decoration::Texture(Texture::default()),
        DecorationKind::Corner => Decoration::Corner(Corner::default()),
        DecorationKind::Pattern => Decoration::Pattern(Pattern::default()),
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Template {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownTemplate(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextAlign;

    #[test]
    fn names_round_trip() {
        for t in Template::ALL {
            assert_eq!(t.name().parse::<Template>().unwrap(), t);
            assert_eq!(t.to_string(), t.name());
        }
        assert_eq!(" Literary ".parse::<Template>().unwrap(), Template::Literary);
        assert!(matches!(
            "gothic".parse::<Template>(),
            Err(ConfigError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn literary_enables_quote_and_border() {
        let style = Template::Literary.apply(&StyleConfig::default());
        assert_eq!(style.font_family, "Georgia");
        assert_eq!(style.font_size, 28.0);
        assert_eq!(style.border_radius, 8.0);
        let kinds: Vec<_> = style.decorations.active().map(|d| d.kind()).collect();
        assert_eq!(kinds, [DecorationKind::QuoteMarks, DecorationKind::Border]);
    }

    #[test]
    fn switching_templates_replaces_decorations() {
        let base = StyleConfig {
            text_align: TextAlign::Center,
            ..StyleConfig::default()
        };
        let literary = Template::Literary.apply(&base);
        let business = Template::Business.apply(&literary);
        let kinds: Vec<_> = business.decorations.active().map(|d| d.kind()).collect();
        assert_eq!(kinds, [DecorationKind::Watermark]);
        assert_eq!(business.text_align, TextAlign::Center, "alignment is kept");
        assert_eq!(business.background.color, Color::from_rgb8(0xf0, 0xf2, 0xf5));

        let simple = Template::Simple.apply(&business);
        assert!(simple.decorations.is_empty());
    }

    #[test]
    fn templates_are_already_in_range() {
        for t in Template::ALL {
            let style = t.apply(&StyleConfig::default());
            assert_eq!(style.sanitized(), style, "{t} needs clamping");
        }
    }
}
