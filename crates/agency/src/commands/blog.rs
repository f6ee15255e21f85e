//! Blog command handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use agency_core::convert::{self, EXCERPT_LEN};
use agency_core::{
    BlogPost, BlogPostRequest, Command as CoreCommand, FilterState, ItemId, ListQuery, Site,
};

use crate::cli::{BlogArgs, BlogCommand, BlogPostArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

const DETAIL_BODY_LEN: usize = 1200;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BlogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Read")]
    read_time: String,
    #[tabled(rename = "Published")]
    published: String,
}

impl From<&BlogPost> for BlogRow {
    fn from(p: &BlogPost) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            category: p.category.clone(),
            author: p.author.clone(),
            read_time: format!("{} min", p.read_time),
            published: p
                .published_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

fn detail(p: &BlogPost) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", p.title);
    let _ = writeln!(out, "{}", "─".repeat(p.title.chars().count().min(72)));
    let _ = writeln!(out, "ID:        {}", p.id);
    let _ = writeln!(out, "Slug:      {}", p.slug);
    let _ = writeln!(out, "Category:  {}", p.category);
    let _ = writeln!(out, "Author:    {}", p.author);
    let _ = writeln!(out, "Read time: {} min", p.read_time);
    if let Some(published) = p.published_at {
        let _ = writeln!(out, "Published: {}", published.format("%Y-%m-%d %H:%M UTC"));
    }
    if !p.tags.is_empty() {
        let _ = writeln!(out, "Tags:      {}", p.tags.join(", "));
    }
    if let Some(ref image) = p.image {
        let _ = writeln!(out, "Image:     {image}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", p.excerpt);
    let _ = writeln!(out);
    let _ = write!(out, "{}", convert::derive_excerpt(&p.content, DETAIL_BODY_LEN));
    out
}

fn request(args: BlogPostArgs) -> Result<BlogPostRequest, CliError> {
    let content = match (args.content, args.content_file) {
        (Some(content), _) => content,
        (None, Some(path)) => util::read_text(&path)?,
        (None, None) => String::new(),
    };
    let read_time = args
        .read_time
        .or_else(|| (!content.trim().is_empty()).then(|| convert::estimate_read_time(&content)));
    let excerpt = args.excerpt.or_else(|| {
        (!content.trim().is_empty()).then(|| convert::derive_excerpt(&content, EXCERPT_LEN))
    });
    Ok(BlogPostRequest {
        title: args.title,
        content,
        category: args.category,
        excerpt,
        author: args.author,
        tags: args.tags,
        read_time,
        image: args.image,
    })
}

// ── Listing ─────────────────────────────────────────────────────────

async fn list_page(
    site: &Site,
    query: &ListQuery,
    search: Option<&str>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut view = site.blog_view(&ListQuery::default());
    util::load(site, &mut view, global).await?;

    if let FilterState::Label(ref label) = query.filter {
        util::apply_filter(&mut view, Some(label))?;
    }
    if let Some(search) = search {
        view.set_search(search);
    }
    util::apply_page(&mut view, query.page);

    let visible = view.visible();
    let out = output::render_list(
        &global.output,
        &visible,
        |p| BlogRow::from(*p),
        |p| p.id.to_string(),
    );
    output::print_output(&out, global.quiet);

    let shared = ListQuery {
        filter: view.filter().clone(),
        page: view.pager().page().unwrap_or(1),
    };
    let mut footer = util::footer(&view);
    if let Ok(address) = site.blog_address(&shared) {
        let _ = write!(footer, " · {address}");
    }
    output::print_footer(global, &footer);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(site: &Site, args: BlogArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        BlogCommand::List { category, list } => {
            let query = ListQuery {
                filter: category
                    .as_deref()
                    .map_or(FilterState::All, FilterState::from_label::<BlogPost>),
                page: list.page,
            };
            list_page(site, &query, list.search.as_deref(), global).await
        }

        BlogCommand::Open { address } => {
            let query = ListQuery::from_address::<BlogPost>(&address);
            list_page(site, &query, None, global).await
        }

        BlogCommand::Url { category, page } => {
            let filter = category
                .as_deref()
                .map_or(FilterState::All, FilterState::from_label::<BlogPost>);
            let address = site.blog_address(&ListQuery {
                filter,
                page: page.max(1),
            })?;
            output::print_output(address.as_str(), false);
            Ok(())
        }

        BlogCommand::Show { key } => {
            let spinner = output::spinner(global, "Loading post...");
            let post = site.find_blog(&key).await;
            spinner.finish_and_clear();
            let post = post?;
            let out = output::render_single(&global.output, &post, detail, |p| p.id.to_string());
            output::print_output(&out, global.quiet);
            Ok(())
        }

        BlogCommand::Create(args) => {
            util::check_upload(site, args.image.as_deref(), global)?;
            site.execute(CoreCommand::CreateBlogPost(request(args)?))
                .await?;
            Ok(())
        }

        BlogCommand::Update { id, post } => {
            util::check_upload(site, post.image.as_deref(), global)?;
            site.execute(CoreCommand::UpdateBlogPost {
                id: ItemId::new(id),
                request: request(post)?,
            })
            .await?;
            Ok(())
        }

        BlogCommand::Delete { id } => {
            if !util::confirm(&format!("Delete blog post '{id}'?"), global.yes)? {
                return Ok(());
            }
            let mut view = site.admin_view::<BlogPost>();
            util::load(site, &mut view, global).await?;
            util::find(&view, &id, "blog list")?;
            site.delete(&mut view, &ItemId::new(id)).await?;
            Ok(())
        }
    }
}
