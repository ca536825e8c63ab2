//! Working directory layout of a proposal session.
//!
//! ```text
//! <base>/proposal_assets/
//!     proposal_template.html
//!     proposal_settings.json
//!     images/<slot placeholder files>
//! ```

use std::path::{Path, PathBuf};

use crate::error::ExportError;
use crate::layout::{LayoutSettings, SETTINGS_FILE};
use crate::resolve::DirectoryResolver;
use crate::template::{TEMPLATE_FILE, load_template, write_atomic};

/// A replaceable image in the template, addressed by its placeholder file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSlot {
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

pub static IMAGE_SLOTS: [ImageSlot; 8] = [
    ImageSlot {
        key: "hospital_view",
        label: "병원 전경",
        placeholder: "placeholder_hospital_view.jpg",
    },
    ImageSlot {
        key: "cert_mark",
        label: "인증마크 모음",
        placeholder: "placeholder_cert_mark.jpg",
    },
    ImageSlot {
        key: "center_interior",
        label: "검진센터 내부",
        placeholder: "placeholder_center_interior.jpg",
    },
    ImageSlot {
        key: "mri",
        label: "MRI 장비",
        placeholder: "placeholder_mri.jpg",
    },
    ImageSlot {
        key: "ct",
        label: "CT 장비",
        placeholder: "placeholder_ct.jpg",
    },
    ImageSlot {
        key: "mobile_app",
        label: "모바일 예약시스템",
        placeholder: "placeholder_mobile_app.jpg",
    },
    ImageSlot {
        key: "bus",
        label: "출장검진 버스",
        placeholder: "placeholder_bus.jpg",
    },
    ImageSlot {
        key: "program_a",
        label: "검진 진행 모습",
        placeholder: "placeholder_program_a.jpg",
    },
];

/// Find a slot by key or by display label.
pub fn find_slot(key: &str) -> Option<&'static ImageSlot> {
    IMAGE_SLOTS
        .iter()
        .find(|slot| slot.key == key || slot.label == key)
}

#[derive(Debug, Clone)]
pub struct ProposalAssets {
    pub assets_dir: PathBuf,
    pub images_dir: PathBuf,
    pub template_path: PathBuf,
    pub settings_path: PathBuf,
}

impl ProposalAssets {
    pub fn new(base_dir: &Path) -> Self {
        let assets_dir = base_dir.join("proposal_assets");
        Self {
            images_dir: assets_dir.join("images"),
            template_path: assets_dir.join(TEMPLATE_FILE),
            settings_path: assets_dir.join(SETTINGS_FILE),
            assets_dir,
        }
    }

    /// Like [`ProposalAssets::new`], creating the directories as well.
    pub fn create(base_dir: &Path) -> Result<Self, ExportError> {
        let assets = Self::new(base_dir);
        std::fs::create_dir_all(&assets.images_dir).map_err(|source| ExportError::Write {
            path: assets.images_dir.clone(),
            source,
        })?;
        Ok(assets)
    }

    /// Use `template` instead of the template inside the assets directory.
    pub fn with_template(mut self, template: PathBuf) -> Self {
        self.template_path = template;
        self
    }

    pub fn load_template(&self) -> Result<String, ExportError> {
        load_template(&self.template_path)
    }

    pub fn load_layout(&self) -> Result<LayoutSettings, ExportError> {
        LayoutSettings::load(&self.settings_path)
    }

    pub fn save_layout(&self, layout: &LayoutSettings) -> Result<(), ExportError> {
        layout.save(&self.settings_path)
    }

    /// Store uploaded bytes as the slot's placeholder image.
    pub fn save_slot_image(&self, key: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let slot = find_slot(key).ok_or_else(|| ExportError::UnknownSlot(key.to_string()))?;
        let path = self.images_dir.join(slot.placeholder);
        write_atomic(&path, bytes)?;
        tracing::info!(slot = slot.key, path = %path.display(), "slot image saved");
        Ok(path)
    }

    /// Every slot with the path of its stored image, if one was uploaded.
    pub fn slot_images(&self) -> Vec<(&'static ImageSlot, Option<PathBuf>)> {
        IMAGE_SLOTS
            .iter()
            .map(|slot| {
                let path = self.images_dir.join(slot.placeholder);
                (slot, path.is_file().then_some(path))
            })
            .collect()
    }

    /// Uploaded slot images first, then files next to the template.
    pub fn resolver(&self) -> DirectoryResolver {
        let mut roots = vec![self.images_dir.clone()];
        if let Some(dir) = self.template_path.parent() {
            roots.push(dir.to_path_buf());
        }
        DirectoryResolver::new(roots)
    }
}
