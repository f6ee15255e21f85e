//! Shared helpers for command handlers.

use std::path::Path;

use tracing::warn;

use agency_core::{
    CollectionItem, FilterState, ItemId, ListView, PageState, Resource, Site,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Prompt(e.to_string()))
}

/// Fetch a collection into `view` behind a spinner.
///
/// A failed fetch surfaces the typed error (for exit codes) instead of
/// leaving it in the view's error state.
pub async fn load<T: Resource>(
    site: &Site,
    view: &mut ListView<T>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let spinner = output::spinner(global, &format!("Loading {}...", T::COLLECTION));
    let ticket = view.restart_fetch();
    let result = site.fetch::<T>().await;
    spinner.finish_and_clear();

    let items = result?;
    view.finish_fetch(ticket, Ok(items));
    Ok(())
}

/// Apply a `--category` / `--status` label. Accepted labels are the
/// filter bar's options plus any label a loaded item carries (e.g. the
/// `Uncategorized` fallback).
pub fn apply_filter<T: CollectionItem>(
    view: &mut ListView<T>,
    label: Option<&str>,
) -> Result<(), CliError> {
    let Some(label) = label else {
        return Ok(());
    };
    let options = view.filter_options();
    let known = options.iter().any(|option| option == label)
        || view.items().any(|item| item.label() == label);
    if !known {
        return Err(CliError::Validation {
            field: "category".into(),
            reason: format!("unknown label '{label}'. Options: {}", options.join(", ")),
        });
    }
    view.set_filter(FilterState::from_label::<T>(label));
    Ok(())
}

/// Jump to a 1-based page. A page outside the filtered result leaves the
/// view on its current page.
pub fn apply_page<T: CollectionItem>(view: &mut ListView<T>, page: usize) {
    let current = view.pager().page().unwrap_or(1);
    if page != current && !view.go_to_page(page) {
        let total = view.total_pages().unwrap_or(1).max(1);
        warn!("page {page} is out of range (1-{total}); showing page {current}");
    }
}

/// "Page 2 of 3 · 14 posts" or "Showing 6 of 10 · 4 more".
pub fn footer<T: CollectionItem>(view: &ListView<T>) -> String {
    let matching = view.filtered().len();
    match *view.pager() {
        PageState::Fixed { page, .. } => {
            let total = view.total_pages().unwrap_or(0).max(1);
            format!("Page {page} of {total} · {matching} matching")
        }
        PageState::Reveal { .. } => {
            let shown = view.visible().len();
            if view.has_more() {
                format!(
                    "Showing {shown} of {matching} · {} more (use --more)",
                    matching - shown
                )
            } else {
                format!("Showing {shown} of {matching}")
            }
        }
    }
}

/// Look an item up in a loaded view.
pub fn find<'a, T: CollectionItem>(
    view: &'a ListView<T>,
    id: &str,
    list_command: &str,
) -> Result<&'a T, CliError> {
    view.get(&ItemId::new(id))
        .ok_or_else(|| CliError::not_found(T::NOUN, id, list_command))
}

/// Read a text file argument (e.g. `--content-file`).
pub fn read_text(path: &Path) -> Result<String, CliError> {
    Ok(std::fs::read_to_string(path)?)
}

/// Validate a local upload by acquiring a preview, logging what will be sent.
/// The preview is released when this returns.
pub fn check_upload(site: &Site, path: Option<&Path>, global: &GlobalOpts) -> Result<(), CliError> {
    let Some(path) = path else {
        return Ok(());
    };
    let mut slot = site.preview_slot();
    let preview = slot.select(path)?;
    if !global.quiet {
        eprintln!(
            "Attaching {} ({}, {} bytes)",
            preview.path().display(),
            preview.media_type(),
            preview.size()
        );
    }
    Ok(())
}
