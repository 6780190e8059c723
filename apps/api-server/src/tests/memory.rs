//! In-memory implementations of the repository ports.
//!
//! Counter operations take the store lock for the whole read-modify-write,
//! matching the atomicity the Postgres statements provide.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use chronicle_core::domain::{
    AuthorRef, PageRequest, Post, PostFilter, PostPreview, PostStatus, ProfileUpdate, SortKey,
    SortOrder, User, normalize_email,
};
use chronicle_core::error::RepoError;
use chronicle_core::ports::{PostRepository, UserRepository};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = normalize_email(email);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email".to_string()));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<(), RepoError> {
        let email = normalize_email(email);
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(RepoError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn update_profile(&self, email: &str, changes: ProfileUpdate) -> Result<User, RepoError> {
        let email = normalize_email(email);
        let mut users = self.users.lock().unwrap();

        let idx = users
            .iter()
            .position(|u| u.email == email)
            .ok_or(RepoError::NotFound)?;

        if let Some(new_email) = &changes.email {
            let new_email = normalize_email(new_email);
            if users.iter().any(|u| u.email == new_email && u.email != email) {
                return Err(RepoError::Constraint("email".to_string()));
            }
            users[idx].email = new_email;
        }
        if let Some(name) = changes.name {
            users[idx].name = name;
        }
        if let Some(is_active) = changes.is_active {
            users[idx].is_active = is_active;
        }
        users[idx].updated_at = chrono::Utc::now();

        Ok(users[idx].clone())
    }
}

pub struct MemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    users: Arc<MemoryUserRepository>,
}

impl MemoryPostRepository {
    pub fn new(users: Arc<MemoryUserRepository>) -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            users,
        }
    }

    fn author_ref(&self, id: Uuid) -> Result<AuthorRef, RepoError> {
        let user = self
            .users
            .get(id)
            .ok_or_else(|| RepoError::Query("author record missing".to_string()))?;
        Ok(AuthorRef {
            id: user.id,
            name: user.name,
            email: user.email,
        })
    }

    fn page(
        &self,
        mut matches: Vec<Post>,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        sort_posts(&mut matches, page);
        let total = matches.len() as u64;

        let previews = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|post| {
                let author = self.author_ref(post.author_id)?;
                Ok(PostPreview {
                    id: post.id,
                    title: post.title,
                    slug: post.slug,
                    thumbnail: post.thumbnail,
                    status: post.status,
                    category: post.category,
                    views: post.views,
                    likes: post.likes,
                    author,
                    created_at: post.created_at,
                    updated_at: post.updated_at,
                })
            })
            .collect::<Result<Vec<_>, RepoError>>()?;

        Ok((previews, total))
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint("slug".to_string()));
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn find_published_by_slug_and_bump_views(
        &self,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.slug == slug && p.status == PostStatus::Published);

        Ok(post.map(|p| {
            p.views += 1;
            p.clone()
        }))
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        let matches: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|category| &p.category == category)
            })
            .filter(|p| {
                filter.search.as_ref().is_none_or(|q| {
                    let q = q.to_lowercase();
                    p.title.to_lowercase().contains(&q)
                        || p.content.to_lowercase().contains(&q)
                        || p.category.to_lowercase().contains(&q)
                })
            })
            .cloned()
            .collect();

        self.page(matches, page)
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        let matches: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();

        self.page(matches, page)
    }

    async fn update(&self, post: &Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.lock().unwrap();

        if posts.iter().any(|p| p.slug == post.slug && p.id != post.id) {
            return Err(RepoError::Constraint("slug".to_string()));
        }

        let slot = posts
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post.clone())
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let post = posts.iter_mut().find(|p| p.id == id);

        Ok(post.map(|p| {
            p.toggle_like(user_id);
            p.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

fn sort_posts(posts: &mut [Post], page: &PageRequest) {
    posts.sort_by(|a, b| {
        let ord = match page.sort.key {
            SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
            SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            SortKey::Views => a.views.cmp(&b.views),
            SortKey::Likes => a.likes.cmp(&b.likes),
            SortKey::Title => a.title.cmp(&b.title),
        };
        match page.sort.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
