//! Page layout settings exposed as CSS custom properties.

use std::path::Path;

use proposal_core::Substitution;
use proposal_core::theme::ensure_root_var;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::template::write_atomic;

pub const SETTINGS_FILE: &str = "proposal_settings.json";

/// Spacing and sizing knobs of the proposal template, in whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub page_padding_mm: u32,
    pub page_gap_px: u32,
    pub img_box_height_px: u32,
    pub img_margin_v_px: u32,
    pub highlight_margin_v_px: u32,
    pub table_margin_top_px: u32,
    pub table_cell_padding_px: u32,
    pub user_block_gap_px: u32,
    pub img_h_300_px: u32,
    pub img_h_250_px: u32,
    pub img_h_180_px: u32,
    pub img_h_150_px: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_padding_mm: 20,
            page_gap_px: 20,
            img_box_height_px: 220,
            img_margin_v_px: 10,
            highlight_margin_v_px: 15,
            table_margin_top_px: 10,
            table_cell_padding_px: 7,
            user_block_gap_px: 12,
            img_h_300_px: 300,
            img_h_250_px: 250,
            img_h_180_px: 180,
            img_h_150_px: 150,
        }
    }
}

/// Setting key, CSS variable, unit.
static CSS_VARS: [(&str, &str, &str); 12] = [
    ("page_padding_mm", "--page-padding", "mm"),
    ("page_gap_px", "--page-gap", "px"),
    ("img_box_height_px", "--img-box-height", "px"),
    ("img_margin_v_px", "--img-box-margin-v", "px"),
    ("highlight_margin_v_px", "--highlight-margin-v", "px"),
    ("table_margin_top_px", "--table-margin-top", "px"),
    ("table_cell_padding_px", "--table-cell-padding", "px"),
    ("user_block_gap_px", "--user-block-gap", "px"),
    ("img_h_300_px", "--img-h-300", "px"),
    ("img_h_250_px", "--img-h-250", "px"),
    ("img_h_180_px", "--img-h-180", "px"),
    ("img_h_150_px", "--img-h-150", "px"),
];

#[derive(Serialize)]
struct SettingsFile<'a> {
    layout: &'a LayoutSettings,
}

impl LayoutSettings {
    pub fn keys() -> impl Iterator<Item = &'static str> {
        CSS_VARS.iter().map(|(key, _, _)| *key)
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        let mut copy = *self;
        copy.field_mut(key).map(|v| *v)
    }

    pub fn set(&mut self, key: &str, value: u32) -> Result<(), ExportError> {
        let slot = self
            .field_mut(key)
            .ok_or_else(|| ExportError::UnknownSetting(key.to_string()))?;
        *slot = value;
        Ok(())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut u32> {
        Some(match key {
            "page_padding_mm" => &mut self.page_padding_mm,
            "page_gap_px" => &mut self.page_gap_px,
            "img_box_height_px" => &mut self.img_box_height_px,
            "img_margin_v_px" => &mut self.img_margin_v_px,
            "highlight_margin_v_px" => &mut self.highlight_margin_v_px,
            "table_margin_top_px" => &mut self.table_margin_top_px,
            "table_cell_padding_px" => &mut self.table_cell_padding_px,
            "user_block_gap_px" => &mut self.user_block_gap_px,
            "img_h_300_px" => &mut self.img_h_300_px,
            "img_h_250_px" => &mut self.img_h_250_px,
            "img_h_180_px" => &mut self.img_h_180_px,
            "img_h_150_px" => &mut self.img_h_150_px,
            _ => return None,
        })
    }

    /// CSS variable name and value for every setting, e.g. `("--page-gap", "20px")`.
    pub fn css_vars(&self) -> Vec<(&'static str, String)> {
        CSS_VARS
            .iter()
            .filter_map(|(key, var, unit)| self.get(key).map(|v| (*var, format!("{v}{unit}"))))
            .collect()
    }

    /// Write every setting into the document's `:root` block.
    pub fn apply(&self, html: &str) -> Substitution {
        self.css_vars()
            .into_iter()
            .fold(Substitution::unchanged(html), |acc, (var, value)| {
                acc.then(|current| ensure_root_var(current, var, &value))
            })
    }

    /// Load settings saved as `{"layout": {...}}`.
    ///
    /// A missing file gives the defaults. Unknown keys and values that are
    /// not non-negative integers are skipped with a warning.
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let mut settings = Self::default();
        if !path.exists() {
            return Ok(settings);
        }

        let raw = std::fs::read(path).map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let json: serde_json::Value = serde_json::from_slice(&raw)?;

        let Some(layout) = json.get("layout").and_then(|v| v.as_object()) else {
            return Ok(settings);
        };

        for (key, value) in layout {
            let parsed = match value {
                serde_json::Value::Number(n) => n.as_u64(),
                serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            }
            .and_then(|n| u32::try_from(n).ok());

            let applied = parsed.is_some_and(|n| settings.set(key, n).is_ok());
            if !applied {
                tracing::warn!(key = %key, value = %value, "ignoring layout setting");
            }
        }

        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ExportError> {
        let json = serde_json::to_vec_pretty(&SettingsFile { layout: self })?;
        write_atomic(path, &json)?;
        tracing::info!(path = %path.display(), "layout settings saved");
        Ok(())
    }
}
