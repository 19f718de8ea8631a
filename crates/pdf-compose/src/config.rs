//! Decoration configuration: watermark and page numbers.
//!
//! Configs are validated eagerly, before any page is touched; a malformed
//! template or out-of-range opacity is a `Config` error, never silently
//! coerced.

use std::collections::BTreeSet;

use crate::types::{ComposeError, Result};

/// RGB color, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor { r: 0, g: 0, b: 0 };
    pub const GRAY: RgbColor = RgbColor {
        r: 128,
        g: 128,
        b: 128,
    };

    /// Channel values in the 0..1 range used by PDF `rg` operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Watermark placement on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WatermarkPosition {
    /// Centered at the page midpoint, rotated by the configured angle.
    #[default]
    Diagonal,
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Page-number placement, six-way grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    #[default]
    BottomCenter,
    BottomRight,
}

/// Which pages a decoration is drawn on.
///
/// `Odd`/`Even` are evaluated against the zero-based page index with the
/// first page counting as odd (index 0 is displayed page 1).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageRule {
    #[default]
    All,
    Odd,
    Even,
    /// Explicit zero-based page indices.
    Pages(BTreeSet<usize>),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WatermarkConfig {
    pub enabled: bool,
    pub text: String,
    /// 0–100.
    pub opacity: u8,
    /// Rotation for the `Diagonal` position, degrees counter-clockwise.
    pub angle_degrees: f32,
    pub color: RgbColor,
    pub font_size: f32,
    /// Registry font name; `None` selects by script analysis.
    pub font: Option<String>,
    pub position: WatermarkPosition,
    pub pages: PageRule,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            text: String::new(),
            opacity: 30,
            angle_degrees: 45.0,
            color: RgbColor::GRAY,
            font_size: 48.0,
            font: None,
            position: WatermarkPosition::Diagonal,
            pages: PageRule::All,
        }
    }
}

impl WatermarkConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.text.is_empty() {
            return Err(ComposeError::Config("Watermark text is empty".to_string()));
        }
        if self.opacity > 100 {
            return Err(ComposeError::Config(format!(
                "Watermark opacity must be 0-100, got {}",
                self.opacity
            )));
        }
        if self.font_size <= 0.0 {
            return Err(ComposeError::Config(format!(
                "Watermark font size must be positive, got {}",
                self.font_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageNumberConfig {
    pub enabled: bool,
    /// Label template; `{n}` is the page number, `{total}` the page count.
    pub format: String,
    pub position: NumberPosition,
    pub font_size: f32,
    pub color: RgbColor,
    /// Number assigned to the first page.
    pub start_number: usize,
    pub pages: PageRule,
}

impl Default for PageNumberConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            format: "{n}".to_string(),
            position: NumberPosition::BottomCenter,
            font_size: 12.0,
            color: RgbColor::BLACK,
            start_number: 1,
            pages: PageRule::All,
        }
    }
}

/// Decoration configuration for a full composition run.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecorationOptions {
    pub watermark: WatermarkConfig,
    pub page_numbers: PageNumberConfig,
    /// Explicit page selection for the watermark. Takes precedence over
    /// the watermark's page rule; page numbering always follows its own
    /// rule and never honors a selection.
    pub watermark_selection: Option<BTreeSet<usize>>,
}

impl DecorationOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ComposeError::Config(format!("Failed to parse config: {e}")))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ComposeError::Config(format!("Failed to serialize config: {e}")))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.watermark.validate()?;
        self.page_numbers.validate()
    }
}

impl PageNumberConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if self.font_size <= 0.0 {
            return Err(ComposeError::Config(format!(
                "Page number font size must be positive, got {}",
                self.font_size
            )));
        }
        // Braces may only appear as part of the two known placeholders.
        let stripped = self.format.replace("{n}", "").replace("{total}", "");
        if stripped.contains('{') || stripped.contains('}') {
            return Err(ComposeError::Config(format!(
                "Unresolved placeholder in page number format {:?}",
                self.format
            )));
        }
        Ok(())
    }
}
