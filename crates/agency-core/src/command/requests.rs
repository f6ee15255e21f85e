// ── Typed request structs for Command payloads ──
//
// Admin create/update forms and public submissions. Each request
// validates itself before anything touches the network and converts into
// the matching `agency_api` form.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::BLOG_CATEGORIES;

// ── Validation helpers ─────────────────────────────────────────────

fn require(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::ValidationFailed {
            message: format!("{field} is required"),
        })
    } else {
        Ok(())
    }
}

/// An `@` with a non-empty local part and a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn require_email(email: &str) -> Result<(), CoreError> {
    require("Email", email)?;
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(CoreError::ValidationFailed {
            message: format!("{email:?} is not a valid email address"),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ── Blog ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl BlogPostRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("Title", &self.title)?;
        require("Content", &self.content)?;
        require("Category", &self.category)?;
        if !BLOG_CATEGORIES.contains(&self.category.as_str()) {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "unknown category {:?} (expected one of: {})",
                    self.category,
                    BLOG_CATEGORIES.join(", ")
                ),
            });
        }
        Ok(())
    }
}

impl From<BlogPostRequest> for agency_api::BlogPostForm {
    fn from(r: BlogPostRequest) -> Self {
        Self {
            title: r.title.trim().to_owned(),
            slug: None,
            excerpt: non_empty(r.excerpt),
            content: r.content,
            category: r.category,
            author: non_empty(r.author),
            tags: r.tags,
            read_time: r.read_time,
            image: r.image,
        }
    }
}

// ── Portfolio ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioRequest {
    pub title: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl PortfolioRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("Title", &self.title)?;
        require("Category", &self.category)
    }
}

impl From<PortfolioRequest> for agency_api::PortfolioForm {
    fn from(r: PortfolioRequest) -> Self {
        Self {
            title: r.title.trim().to_owned(),
            category: r.category,
            description: non_empty(r.description),
            client: non_empty(r.client),
            technologies: r.technologies,
            link: non_empty(r.link),
            image: r.image,
        }
    }
}

// ── Services ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<PathBuf>,
}

impl ServiceRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("Title", &self.title)
    }
}

impl From<ServiceRequest> for agency_api::ServiceForm {
    fn from(r: ServiceRequest) -> Self {
        Self {
            title: r.title.trim().to_owned(),
            category: non_empty(r.category),
            description: non_empty(r.description),
            icon: non_empty(r.icon),
            features: r.features,
            image: r.image,
        }
    }
}

// ── Public forms ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("Name", &self.name)?;
        require_email(&self.email)?;
        require("Message", &self.message)
    }
}

impl From<ContactRequest> for agency_api::ContactSubmission {
    fn from(r: ContactRequest) -> Self {
        Self {
            name: r.name.trim().to_owned(),
            email: r.email.trim().to_owned(),
            phone: non_empty(r.phone),
            subject: non_empty(r.subject),
            message: r.message,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub resume: Option<PathBuf>,
}

impl ApplicationRequest {
    pub fn validate(&self) -> Result<(), CoreError> {
        require("Name", &self.name)?;
        require_email(&self.email)?;
        require("Position", &self.position)?;
        if self.resume.is_none() {
            return Err(CoreError::ValidationFailed {
                message: "Resume is required".into(),
            });
        }
        Ok(())
    }
}

impl From<ApplicationRequest> for agency_api::ApplicationSubmission {
    fn from(r: ApplicationRequest) -> Self {
        Self {
            name: r.name.trim().to_owned(),
            email: r.email.trim().to_owned(),
            phone: non_empty(r.phone),
            position: r.position,
            cover_letter: non_empty(r.cover_letter),
            resume: r.resume,
        }
    }
}
