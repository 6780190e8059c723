use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PageRequest, Post, PostFilter, PostPreview, ProfileUpdate, User};
use crate::error::RepoError;

/// User persistence. Together with [`super::PasswordService`] this forms the
/// credential store: lookups are case-insensitive on email, hashes go in,
/// hashes stay in.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Lookup by login key; the email is normalized to lowercase first.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user. Fails with `Constraint("email")` on a duplicate.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Administrative password reset. `NotFound` if no such email.
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), RepoError>;

    /// Administrative profile update; returns the updated record.
    async fn update_profile(&self, email: &str, changes: ProfileUpdate) -> Result<User, RepoError>;
}

/// Post persistence. The two counter operations are atomic single-statement
/// updates; that is the only concurrency-sensitive contract in the system.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post. Fails with `Constraint("slug")` on a duplicate.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Any status, no side effects. Admin edit flows use this.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Public lookup by slug, restricted to published posts. Increments the
    /// view counter atomically with the read.
    async fn find_published_by_slug_and_bump_views(
        &self,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Published posts matching the filter, newest first by default.
    /// Previews only: the body text is not fetched.
    async fn list_published(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError>;

    /// An author's own posts regardless of status; same pagination contract.
    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError>;

    /// Persist a domain-modified post. Slug collisions surface as
    /// `Constraint("slug")`.
    async fn update(&self, post: &Post) -> Result<Post, RepoError>;

    /// Atomic per-user like toggle; `None` if the post does not exist.
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Hard delete. `NotFound` if the post is already gone.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
