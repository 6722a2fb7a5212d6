//! Text shaping backend built on harfrust
//!
//! Harfrust is a pure Rust port of HarfBuzz, which makes it the natural
//! shaper for a fully auditable Rust dependency tree. The backend feeds
//! it one run at a time: the run's code points become the buffer
//! contents, the rest of the paragraph becomes pre/post context so
//! cursive joining and mark placement survive run boundaries, and glyph
//! clusters come back as absolute code point indices.
//!
//! Fonts whose data is missing or unparseable degrade to simple
//! per-character advancement instead of failing the layout.

use std::ops::Range;
use std::str::FromStr;
use std::sync::Arc;

use harfrust::{
    Direction as HrDirection, Feature as HrFeature, FontRef as HrFontRef, GlyphBuffer, Language,
    Script as HrScript, ShaperData, Tag, UnicodeBuffer,
};
use icu_properties::props::Script;
use icu_properties::PropertyNamesShort;

use khatt_core::{
    error::Result,
    traits::{FontRef, ShapeBackend},
    types::{Direction, FeatureSetting, Glyph, RunParams},
};

/// Pure Rust text shaping powered by harfrust
pub struct HarfrustShaper;

impl HarfrustShaper {
    /// Creates a new harfrust shaper ready to handle any script
    pub fn new() -> Self {
        Self
    }
}

impl Default for HarfrustShaper {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses a single OpenType feature string in the HarfBuzz feature
/// syntax, e.g. `dlig`, `-liga`, `ss01=2`, or `kern[3:5]`.
pub fn parse_feature(feature: &str) -> Option<FeatureSetting> {
    let parsed = HrFeature::from_str(feature).ok()?;
    Some(FeatureSetting {
        tag: parsed.tag.to_be_bytes(),
        value: parsed.value,
        start: parsed.start,
        end: parsed.end,
    })
}

fn to_hr_feature(setting: &FeatureSetting) -> HrFeature {
    HrFeature {
        tag: Tag::new(&setting.tag),
        value: setting.value,
        start: setting.start,
        end: setting.end,
    }
}

fn to_hr_direction(direction: Direction) -> HrDirection {
    match direction {
        Direction::LeftToRight => HrDirection::LeftToRight,
        Direction::RightToLeft => HrDirection::RightToLeft,
        Direction::TopToBottom => HrDirection::TopToBottom,
    }
}

/// Translates a resolved script into harfrust's representation via its
/// ISO 15924 tag. When the lookup fails the buffer script is left unset
/// and the shaper classifies the text itself.
fn to_hr_script(script: Script) -> Option<HrScript> {
    let names = PropertyNamesShort::<Script>::new();
    let name = names.get(script)?;
    let bytes = name.as_bytes();
    if bytes.len() != 4 {
        return None;
    }
    let tag = Tag::new(&[bytes[0], bytes[1], bytes[2], bytes[3]]);
    HrScript::from_iso15924_tag(tag)
}

/// Basic per-character shaping for fonts whose data cannot be used.
/// Glyphs still come out in visual order with correct clusters, so a
/// broken font degrades layout quality rather than dropping text.
fn fallback_shape(
    text: &[char],
    window: Range<usize>,
    params: &RunParams,
    font: &dyn FontRef,
) -> Vec<Glyph> {
    let mut glyphs = Vec::with_capacity(window.len());
    let mut emit = |i: usize| {
        if let Some(glyph_id) = font.glyph_id(text[i]) {
            let advance = font.advance_width(glyph_id) as i32;
            let (x_advance, y_advance) = match params.direction {
                Direction::TopToBottom => (0, -advance),
                _ => (advance, 0),
            };
            glyphs.push(Glyph {
                index: glyph_id,
                cluster: i as u32,
                x_advance,
                y_advance,
                x_offset: 0,
                y_offset: 0,
            });
        }
    };

    if params.direction.is_backward() {
        for i in window.rev() {
            emit(i);
        }
    } else {
        for i in window {
            emit(i);
        }
    }

    glyphs
}

fn convert_glyphs(buffer: &GlyphBuffer) -> Vec<Glyph> {
    let infos = buffer.glyph_infos();
    let positions = buffer.glyph_positions();

    infos
        .iter()
        .zip(positions.iter())
        .map(|(info, pos)| Glyph {
            index: info.glyph_id,
            cluster: info.cluster,
            x_advance: pos.x_advance,
            y_advance: pos.y_advance,
            x_offset: pos.x_offset,
            y_offset: pos.y_offset,
        })
        .collect()
}

impl ShapeBackend for HarfrustShaper {
    fn name(&self) -> &'static str {
        "harfrust"
    }

    fn shape_run(
        &self,
        text: &[char],
        window: Range<usize>,
        params: &RunParams,
        font: Arc<dyn FontRef>,
        features: &[FeatureSetting],
    ) -> Result<Vec<Glyph>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let font_data = font.data();
        if font_data.is_empty() {
            return Ok(fallback_shape(text, window, params, font.as_ref()));
        }

        let hr_font = match HrFontRef::new(font_data) {
            Ok(f) => f,
            Err(_) => {
                log::debug!("font data did not parse, falling back to basic shaping");
                return Ok(fallback_shape(text, window, params, font.as_ref()));
            }
        };

        // ShaperData caches font tables and is the expensive part
        let shaper_data = ShaperData::new(&hr_font);
        let shaper = shaper_data.shaper(&hr_font).build();

        let mut buffer = UnicodeBuffer::new();
        for (i, &ch) in text[window.clone()].iter().enumerate() {
            buffer.add(ch, (window.start + i) as u32);
        }
        // the rest of the paragraph participates in joining decisions
        let pre_context: String = text[..window.start].iter().collect();
        let post_context: String = text[window.end..].iter().collect();
        buffer.set_pre_context(&pre_context);
        buffer.set_post_context(&post_context);

        buffer.set_direction(to_hr_direction(params.direction));
        if let Some(script) = to_hr_script(params.script) {
            buffer.set_script(script);
        }
        if let Some(lang) = params.language.as_deref() {
            if let Ok(language) = Language::from_str(lang) {
                buffer.set_language(language);
            }
        }

        let hr_features: Vec<HrFeature> = features.iter().map(to_hr_feature).collect();
        let output = shaper.shape(buffer, &hr_features);

        Ok(convert_glyphs(&output))
    }
}
