//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A user's public information. The password hash never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Payload of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPayload {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub user: UserDto,
}

/// The author reference embedded in blog responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// A full blog document as returned by detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub thumbnail: Option<String>,
    pub status: String,
    pub category: String,
    pub views: i64,
    pub likes: i64,
    pub liked_by: Vec<Uuid>,
    pub author: AuthorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A blog as returned by list endpoints. No `content` field: list views
/// return metadata only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPreviewDto {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub thumbnail: Option<String>,
    pub status: String,
    pub category: String,
    pub views: i64,
    pub likes: i64,
    pub author: AuthorDto,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPayload {
    pub blog: BlogDto,
}

/// Payload of a like toggle: the updated blog plus whether the caller's
/// like is now active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikePayload {
    pub blog: BlogDto,
    pub liked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogListPayload {
    pub blogs: Vec<BlogPreviewDto>,
    pub pagination: Pagination,
}

/// Offset pagination summary computed against the request's filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            limit,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// Request to create a blog. Omitted `status` defaults to published,
/// omitted `category` to "More".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update: a field present in the payload overwrites, an absent
/// field keeps its prior value. `thumbnail` is nullable, so an explicit
/// JSON `null` clears it; the double `Option` distinguishes absent from
/// null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Query string accepted by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
}

/// Maps a present-but-null JSON value to `Some(None)` so callers can tell
/// "clear the field" apart from "field not sent".
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_absent_thumbnail() {
        let absent: UpdateBlogRequest = serde_json::from_str(r#"{"title":"New"}"#).unwrap();
        assert_eq!(absent.thumbnail, None);

        let null: UpdateBlogRequest = serde_json::from_str(r#"{"thumbnail":null}"#).unwrap();
        assert_eq!(null.thumbnail, Some(None));

        let set: UpdateBlogRequest =
            serde_json::from_str(r#"{"thumbnail":"https://cdn/img.png"}"#).unwrap();
        assert_eq!(set.thumbnail, Some(Some("https://cdn/img.png".into())));
    }

    #[test]
    fn pagination_rounds_pages_up() {
        assert_eq!(Pagination::new(25, 1, 12).pages, 3);
        assert_eq!(Pagination::new(24, 1, 12).pages, 2);
        assert_eq!(Pagination::new(0, 1, 12).pages, 0);
    }
}
