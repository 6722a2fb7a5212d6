//! The layout session: one paragraph from code points to glyphs

use std::sync::Arc;

use icu_properties::props::Script;
use log::debug;

use khatt_core::error::{KhattError, Result};
use khatt_core::traits::{FontRef, ShapeBackend};
use khatt_core::types::{BaseDirection, FeatureSetting, Glyph, Run, RunParams};
use khatt_shape_hr::HarfrustShaper;
use khatt_unicode::{level_runs, resolve_scripts, split_runs};

/// A single paragraph of text and everything derived from it.
///
/// The paragraph owns its code point array, the resolved script array,
/// the shaping-ready run list, and the glyph array. Setting new text
/// clears the derived state; [`Paragraph::layout`] rebuilds all of it
/// from scratch, so re-laying-out after further mutations is always
/// safe. A `Paragraph` is not meant for concurrent mutation, but
/// distinct paragraphs can be laid out in parallel.
pub struct Paragraph {
    text: Vec<char>,
    base_dir: BaseDirection,
    features: Vec<FeatureSetting>,
    language: Option<String>,
    font: Option<Arc<dyn FontRef>>,
    backend: Arc<dyn ShapeBackend>,

    // derived by layout()
    scripts: Vec<Script>,
    runs: Vec<Run>,
    glyphs: Vec<Glyph>,
}

impl Paragraph {
    /// Creates an empty paragraph shaping with the default harfrust
    /// backend.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(HarfrustShaper::new()))
    }

    /// Creates an empty paragraph shaping with a caller-provided
    /// backend.
    pub fn with_backend(backend: Arc<dyn ShapeBackend>) -> Self {
        Self {
            text: Vec::new(),
            base_dir: BaseDirection::Default,
            features: Vec::new(),
            language: None,
            font: None,
            backend,
            scripts: Vec::new(),
            runs: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    /// Replaces the paragraph text with a UTF-32 code point sequence.
    ///
    /// Invalid scalar values are replaced with U+FFFD. The text should be
    /// a full paragraph: laying out fragments separately loses the
    /// context that bidi and cursive shaping depend on.
    pub fn set_text(&mut self, text: &[u32]) {
        self.text = text
            .iter()
            .map(|&unit| char::from_u32(unit).unwrap_or('\u{fffd}'))
            .collect();
        self.clear_derived();
    }

    /// Sets the paragraph base direction.
    ///
    /// [`BaseDirection::Default`] detects the direction from the first
    /// character with a strong bidi type, which is good enough for most
    /// text but guesses wrong when a mainly-RTL paragraph opens with a
    /// Latin word; pass an explicit direction in that case.
    pub fn set_base_direction(&mut self, direction: BaseDirection) {
        self.base_dir = direction;
    }

    /// Sets the language the shaper should assume, as a BCP 47 tag.
    pub fn set_language(&mut self, language: &str) {
        self.language = Some(language.to_string());
    }

    /// Appends one font feature in the shaper's textual syntax, e.g.
    /// `dlig` or `ss01=2`. Later entries can override earlier ones. On a
    /// parse error the feature list is left unchanged.
    pub fn add_feature(&mut self, feature: &str) -> Result<()> {
        match khatt_shape_hr::parse_feature(feature) {
            Some(setting) => {
                self.features.push(setting);
                Ok(())
            }
            None => Err(KhattError::InvalidFeature(feature.to_string())),
        }
    }

    /// Binds a font to a range of code points starting at `start`.
    ///
    /// Only single-font layout is supported: the range is validated
    /// against the current text and the last successful call binds the
    /// whole paragraph. Out-of-range calls are no-ops.
    pub fn set_font(&mut self, font: Arc<dyn FontRef>, start: usize, _len: usize) {
        if self.text.is_empty() || start >= self.text.len() {
            return;
        }
        self.font = Some(font);
    }

    /// Runs the layout process: script resolution, bidi itemization,
    /// script splitting, and shaping. Derived state from any previous
    /// layout is discarded first, so the call is idempotent with respect
    /// to the inputs.
    pub fn layout(&mut self) -> Result<()> {
        if self.text.is_empty() {
            return Err(KhattError::EmptyText);
        }
        let font = self.font.clone().ok_or(KhattError::MissingFont)?;

        self.clear_derived();

        self.scripts = resolve_scripts(&self.text);
        let bidi_runs = level_runs(&self.text, self.base_dir);
        debug!("{} level runs before script itemization", bidi_runs.len());
        self.runs = split_runs(&self.scripts, &bidi_runs, self.base_dir);
        debug!("{} runs after script itemization", self.runs.len());

        let mut shaped: Vec<Vec<Glyph>> = Vec::with_capacity(self.runs.len());
        for run in &self.runs {
            let params = RunParams {
                script: run.script,
                direction: run.direction,
                language: self.language.clone(),
            };
            shaped.push(self.backend.shape_run(
                &self.text,
                run.range(),
                &params,
                font.clone(),
                &self.features,
            )?);
        }
        self.glyphs = collect_glyphs(shaped);

        Ok(())
    }

    /// The shaped glyphs in visual order. Empty until [`Paragraph::layout`]
    /// has run.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// The shaping-ready runs in visual order. Empty until
    /// [`Paragraph::layout`] has run.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The resolved script of every code point. Empty until
    /// [`Paragraph::layout`] has run.
    pub fn scripts(&self) -> &[Script] {
        &self.scripts
    }

    /// The feature settings accumulated so far.
    pub fn features(&self) -> &[FeatureSetting] {
        &self.features
    }

    fn clear_derived(&mut self) {
        self.scripts.clear();
        self.runs.clear();
        self.glyphs.clear();
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates per-run shaper output into the final glyph array, in
/// run-list order.
fn collect_glyphs(per_run: Vec<Vec<Glyph>>) -> Vec<Glyph> {
    let total: usize = per_run.iter().map(Vec::len).sum();
    let mut glyphs = Vec::with_capacity(total);
    for run_glyphs in per_run {
        glyphs.extend(run_glyphs);
    }
    glyphs
}
