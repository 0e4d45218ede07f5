//! Registration command handler

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};

use crate::models::{EventCategory, PersonalInfo, ProofImage, RecordId};
use crate::state::AppContext;
use crate::utils::errors::Result;

/// Arguments of `register`
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// open-class, seminar or webinar
    #[arg(long)]
    pub category: EventCategory,
    /// Event to attend; must belong to the category
    #[arg(long)]
    pub event_id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub university: String,
    /// Proof photo (JPG/PNG, at most 10 MB by default)
    #[arg(long)]
    pub photo: PathBuf,
}

/// Handle `register` - walk the registration form and submit it
pub async fn handle_register(ctx: &AppContext, args: RegisterArgs) -> Result<String> {
    let mut wizard = ctx.registration_wizard();

    let events = ctx.services.event_service.list_public(args.category).await?;
    wizard.select_category(args.category, events)?;
    wizard.select_event(&RecordId::new(args.event_id.trim()))?;
    wizard.set_personal_info(PersonalInfo {
        name: args.name,
        email: args.email,
        phone: args.phone,
        university: args.university,
    })?;

    let photo = ProofImage::from_path(&args.photo).await?;
    debug!(file = %photo.file_name, bytes = photo.bytes.len(), "Proof photo loaded");
    wizard.attach_photo(photo)?;

    let submission = wizard.build_submission()?;
    let receipt = ctx.services.registration_service.submit(&submission).await?;

    info!(category = %submission.category, "Registration accepted");

    let mut out = String::from("Pendaftaran Berhasil!\n");
    out.push_str("Terima kasih telah mendaftar untuk kegiatan COCONUT.\n");
    out.push_str("Informasi berikutnya akan disampaikan melalui nomor WhatsApp dan email Anda.");
    if let Some(message) = receipt.message.filter(|m| !m.is_empty()) {
        out.push_str(&format!("\n\nServer: {}", message));
    }
    Ok(out)
}
