use nalja_core::{
    Clock, Error, ExtractedMatch, LocalInstant, MemoDates, Recognizer, Result, SystemClock,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::english::EnglishRecognizer;
use crate::korean::KoreanRecognizer;
use crate::merge::dedup_by_offset;

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Hour used by the Korean rules when the text has no 오전/오후 phrase.
    pub default_hour: u32,
    pub default_minute: u32,
    pub english_enabled: bool,
    pub korean_enabled: bool,
    /// Largest input, in bytes, accepted by the checked entry points.
    pub max_input_len: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            default_hour: 9,
            default_minute: 0,
            english_enabled: true,
            korean_enabled: true,
            max_input_len: 64 * 1024,
        }
    }
}

/// Runs the enabled recognizers and merges their output.
///
/// The reference instant comes from the clock once per call, so every
/// recognizer in a call resolves against the same "now".
#[derive(Debug, Clone)]
pub struct DateExtractor<C: Clock = SystemClock> {
    config: ExtractorConfig,
    english: EnglishRecognizer,
    korean: KoreanRecognizer,
    clock: C,
}

impl DateExtractor<SystemClock> {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for DateExtractor<SystemClock> {
    fn default() -> Self {
        Self {
            config: ExtractorConfig::default(),
            english: EnglishRecognizer::new(),
            korean: KoreanRecognizer::new(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> DateExtractor<C> {
    pub fn with_clock(config: ExtractorConfig, clock: C) -> Result<Self> {
        let korean = KoreanRecognizer::with_default_time(config.default_hour, config.default_minute)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "default time {:02}:{:02} is not a valid time of day",
                    config.default_hour, config.default_minute
                ))
            })?;
        Ok(Self {
            config,
            english: EnglishRecognizer::new(),
            korean,
            clock,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub fn now(&self) -> LocalInstant {
        self.clock.now()
    }

    /// Enabled recognizers in priority order: English first.
    fn recognizers(&self) -> Vec<&dyn Recognizer> {
        let mut enabled: Vec<&dyn Recognizer> = Vec::with_capacity(2);
        if self.config.english_enabled {
            enabled.push(&self.english);
        }
        if self.config.korean_enabled {
            enabled.push(&self.korean);
        }
        enabled
    }

    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<ExtractedMatch> {
        self.extract_at(text, self.clock.now())
    }

    /// All date references in `text`, resolved against `reference`.
    ///
    /// English matches come first in their own order, followed by Korean
    /// matches at offsets English did not already claim.
    #[must_use]
    pub fn extract_at(&self, text: &str, reference: LocalInstant) -> Vec<ExtractedMatch> {
        let matches = dedup_by_offset(
            self.recognizers()
                .into_iter()
                .map(|r| r.candidates(text, reference)),
        );
        debug!("Extracted {} date(s) at {}", matches.len(), reference);
        matches
    }

    #[must_use]
    pub fn has_date_references(&self, text: &str) -> bool {
        self.has_date_references_at(text, self.clock.now())
    }

    /// True exactly when [`DateExtractor::extract_at`] would return matches.
    #[must_use]
    pub fn has_date_references_at(&self, text: &str, reference: LocalInstant) -> bool {
        self.recognizers()
            .into_iter()
            .any(|r| r.detects(text, reference))
    }

    /// [`DateExtractor::extract`] for untrusted input, rejecting text over
    /// the configured length.
    pub fn extract_checked(&self, text: &str) -> Result<Vec<ExtractedMatch>> {
        self.check_len(text.len())?;
        Ok(self.extract(text))
    }

    /// [`DateExtractor::has_date_references`] under the same length limit as
    /// [`DateExtractor::extract_checked`].
    pub fn has_date_references_checked(&self, text: &str) -> Result<bool> {
        self.check_len(text.len())?;
        Ok(self.has_date_references(text))
    }

    /// Extract from raw bytes, which must be UTF-8 and within the length
    /// limit. Nothing is extracted from invalid input.
    pub fn extract_bytes(&self, raw: &[u8]) -> Result<Vec<ExtractedMatch>> {
        self.check_len(raw.len())?;
        let text = std::str::from_utf8(raw)?;
        Ok(self.extract(text))
    }

    /// Extract from many notes in parallel, one result list per note.
    ///
    /// All notes share one reference instant.
    #[must_use]
    pub fn extract_batch(&self, texts: &[&str]) -> Vec<Vec<ExtractedMatch>> {
        let reference = self.clock.now();
        texts
            .par_iter()
            .map(|text| self.extract_at(text, reference))
            .collect()
    }

    /// [`DateExtractor::extract_batch`] that rejects the whole batch when any
    /// note is over the length limit.
    pub fn extract_batch_checked(&self, texts: &[&str]) -> Result<Vec<Vec<ExtractedMatch>>> {
        for text in texts {
            self.check_len(text.len())?;
        }
        Ok(self.extract_batch(texts))
    }

    /// Build the date record stored with a note.
    pub fn annotate_memo(&self, content: &str) -> Result<MemoDates> {
        let content = MemoDates::require_content(content)?;
        self.check_len(content.len())?;

        let reference = self.clock.now();
        let has_date = self.has_date_references_at(content, reference);
        let matches = self.extract_at(content, reference);
        Ok(MemoDates::new(content, has_date, matches))
    }

    const fn check_len(&self, len: usize) -> Result<()> {
        if len > self.config.max_input_len {
            return Err(Error::InputTooLong {
                len,
                limit: self.config.max_input_len,
            });
        }
        Ok(())
    }
}
