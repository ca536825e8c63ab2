//! End-to-end proposal build.
//!
//! Order of passes: layout variables, basic fields, theme colours, image
//! inlining, attachment pages. Each pass works on the text the previous
//! one produced; the template file itself is never modified.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use proposal_core::attachments::{append_to_container, ensure_attachment_css, render_attachment_pages};
use proposal_core::rules::DeclarationRule;
use proposal_core::{
    BasicFields, ImageReplacement, ThemeBindings, apply_basic_fields, apply_theme_vars,
    ensure_root_var, list_image_srcs, replace_images,
};
use serde::{Deserialize, Serialize};

use crate::assets::ProposalAssets;
use crate::attachments::{embed_attachments, list_attachment_images};
use crate::error::ExportError;
use crate::layout::LayoutSettings;
use crate::resolve::ImageResolver;

pub const PRIMARY_VAR: &str = "--primary-purple";
pub const ACCENT_VAR: &str = "--accent-gold";

/// Caller-supplied content of one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalInputs {
    pub fields: BasicFields,
    pub primary: String,
    pub accent: String,
    /// Additional style variables, applied alongside the two theme colours.
    #[serde(default)]
    pub extra_theme: ThemeBindings,
}

impl ProposalInputs {
    /// Theme colours plus extra bindings. The named colours win over an
    /// extra binding for the same variable.
    pub fn theme(&self) -> ThemeBindings {
        let mut theme = self.extra_theme.clone();
        theme.insert(PRIMARY_VAR, self.primary.clone());
        theme.insert(ACCENT_VAR, self.accent.clone());
        theme
    }

    /// Field values with markup characters escaped.
    pub fn escaped_fields(&self) -> BasicFields {
        let escape = |s: &str| html_escape::encode_quoted_attribute(s).into_owned();
        BasicFields {
            recipient: escape(&self.fields.recipient),
            proposer: escape(&self.fields.proposer),
            tel: escape(&self.fields.tel),
        }
    }
}

/// Finished document and what each pass did.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub html: String,
    pub layout: usize,
    pub fields: usize,
    pub theme: usize,
    /// References that were inlined.
    pub images: Vec<String>,
    /// References no resolver could supply; left as they were.
    pub unresolved: Vec<String>,
    pub attachments: usize,
}

/// Run every pass over `template`.
pub fn build_proposal(
    template: &str,
    inputs: &ProposalInputs,
    layout: &LayoutSettings,
    resolver: &dyn ImageResolver,
    attachments: &[PathBuf],
) -> Result<BuildReport, ExportError> {
    let mut report = BuildReport::default();

    let laid_out = layout.apply(template);
    report.layout = laid_out.count;

    let filled = apply_basic_fields(&laid_out.html, &inputs.escaped_fields());
    report.fields = filled.count;

    let themed = apply_theme(&filled.html, &inputs.theme());
    report.theme = themed.count;

    let mut replacements = Vec::new();
    for src in list_image_srcs(&themed.html) {
        match resolver.resolve(&src)? {
            Some(image) => replacements.push(ImageReplacement::new(src, &image.bytes, image.mime)),
            None => {
                tracing::debug!(src = %src, "image reference unresolved, left as is");
                report.unresolved.push(src);
            }
        }
    }
    let inlined = replace_images(&themed.html, &replacements);
    let remaining: HashSet<String> = list_image_srcs(&inlined.html).into_iter().collect();
    for replacement in replacements {
        if remaining.contains(&replacement.original) {
            tracing::debug!(src = %replacement.original, "resolved image was not inlined");
            report.unresolved.push(replacement.original);
        } else {
            report.images.push(replacement.original);
        }
    }

    let mut html = inlined.into_html();
    if !attachments.is_empty() {
        let embedded = embed_attachments(attachments)?;
        html = ensure_attachment_css(&html).into_html();
        html = append_to_container(&html, &render_attachment_pages(&embedded));
        report.attachments = embedded.len();
    }
    report.html = html;

    tracing::info!(
        layout = report.layout,
        fields = report.fields,
        theme = report.theme,
        images = report.images.len(),
        unresolved = report.unresolved.len(),
        attachments = report.attachments,
        "proposal built"
    );

    Ok(report)
}

/// Replace declared theme variables; variables the document never
/// declares are added to its `:root` block.
fn apply_theme(html: &str, theme: &ThemeBindings) -> proposal_core::Substitution {
    let mut themed = apply_theme_vars(html, theme);
    for (name, value) in theme.ordered() {
        if DeclarationRule::new(name).find_all(&themed.html).is_empty() {
            themed = themed.then(|current| ensure_root_var(current, name, value));
        }
    }
    themed
}

impl ProposalAssets {
    /// Build from the assets directory: its template, saved layout, slot
    /// images and the attachment pages found in `attachments_dir`.
    ///
    /// Nothing is written; the caller decides where the document goes.
    pub fn build(
        &self,
        inputs: &ProposalInputs,
        attachments_dir: Option<&Path>,
    ) -> Result<BuildReport, ExportError> {
        let template = self.load_template()?;
        let layout = self.load_layout()?;
        let attachments = match attachments_dir {
            Some(dir) => list_attachment_images(dir)?,
            None => Vec::new(),
        };
        build_proposal(&template, inputs, &layout, &self.resolver(), &attachments)
    }
}
