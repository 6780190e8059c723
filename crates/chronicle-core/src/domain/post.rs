use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slug::slugify;
use crate::error::DomainError;

/// Category applied when the author does not pick one.
pub const DEFAULT_CATEGORY: &str = "More";

const MAX_TITLE_LEN: usize = 200;

/// Publication status. Disabled posts are invisible to the public surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Published,
    Disabled,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Published => "published",
            PostStatus::Disabled => "disabled",
        }
    }

    /// Parses a caller-supplied status, rejecting anything outside the enum.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        match raw {
            "published" => Ok(PostStatus::Published),
            "disabled" => Ok(PostStatus::Disabled),
            _ => Err(DomainError::validation(
                r#"Status must be either "published" or "disabled""#,
            )),
        }
    }
}

/// Blog post entity.
///
/// The slug is derived from the title and re-derived whenever the title
/// changes; `likes` always equals the cardinality of `liked_by`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub status: PostStatus,
    pub category: String,
    pub views: i64,
    pub likes: i64,
    pub liked_by: Vec<Uuid>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` means "not sent, keep the old value"; the nested
/// option on `thumbnail` lets an explicit null clear it.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub thumbnail: Option<Option<String>>,
    pub status: Option<PostStatus>,
    pub category: Option<String>,
}

impl Post {
    /// Create a new post for `author_id`, deriving the slug from the title.
    pub fn new(
        author_id: Uuid,
        title: &str,
        content: &str,
        thumbnail: Option<String>,
        status: PostStatus,
        category: Option<String>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        validate_fields(title, content)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slugify(title),
            content: content.to_string(),
            thumbnail,
            status,
            category: category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            views: 0,
            likes: 0,
            liked_by: Vec::new(),
            author_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update. Fields present in the payload overwrite,
    /// absent fields are retained; a title change re-derives the slug.
    pub fn apply_update(&mut self, update: PostUpdate) -> Result<(), DomainError> {
        let next_title = update
            .title
            .as_deref()
            .map(str::trim)
            .unwrap_or(&self.title);
        let next_content = update.content.as_deref().unwrap_or(&self.content);
        validate_fields(next_title, next_content)?;

        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title != self.title {
                self.slug = slugify(&title);
            }
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = thumbnail;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Only the creating admin may mutate or delete a post.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Idempotent per-user like toggle. Returns whether the caller's like is
    /// now active. The Postgres repository performs the same transition in a
    /// single atomic statement; this is the reference semantics.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        if let Some(pos) = self.liked_by.iter().position(|u| *u == user_id) {
            self.liked_by.remove(pos);
            self.likes = (self.likes - 1).max(0);
            false
        } else {
            self.liked_by.push(user_id);
            self.likes += 1;
            true
        }
    }
}

fn validate_fields(title: &str, content: &str) -> Result<(), DomainError> {
    let mut errors = Vec::new();
    if title.is_empty() {
        errors.push("Please provide a blog title".to_string());
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push("Title cannot be more than 200 characters".to_string());
    }
    if content.is_empty() {
        errors.push("Please provide blog content".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

/// The author fields embedded in post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// List read model: everything but the body text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPreview {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub thumbnail: Option<String>,
    pub status: PostStatus,
    pub category: String,
    pub views: i64,
    pub likes: i64,
    pub author: AuthorRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
