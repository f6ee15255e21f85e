//! Public form submissions: contact form and careers application.

use agency_core::{ApplicationRequest, Command as CoreCommand, ContactRequest, Site};

use crate::cli::{ApplyArgs, ContactFormArgs, GlobalOpts};
use crate::error::CliError;

use super::util;

pub async fn contact(site: &Site, args: ContactFormArgs) -> Result<(), CliError> {
    let request = ContactRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        subject: args.subject,
        message: args.message,
    };
    site.execute(CoreCommand::SubmitContact(request)).await?;
    Ok(())
}

pub async fn apply(site: &Site, args: ApplyArgs, global: &GlobalOpts) -> Result<(), CliError> {
    util::check_upload(site, Some(&args.resume), global)?;
    let request = ApplicationRequest {
        name: args.name,
        email: args.email,
        phone: args.phone,
        position: args.position,
        cover_letter: args.cover_letter,
        resume: Some(args.resume),
    };
    site.execute(CoreCommand::SubmitApplication(request)).await?;
    Ok(())
}
