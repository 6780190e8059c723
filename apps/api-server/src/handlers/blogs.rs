//! Blog handlers: public reads and the admin-gated mutations.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use chronicle_core::domain::{
    PageRequest, Post, PostFilter, PostPreview, PostStatus, PostUpdate, User,
};
use chronicle_shared::Envelope;
use chronicle_shared::dto::{
    AuthorDto, BlogDto, BlogListPayload, BlogListQuery, BlogPayload, BlogPreviewDto,
    CreateBlogRequest, LikePayload, Pagination, UpdateBlogRequest, UpdateStatusRequest,
};

use crate::middleware::auth::{AdminUser, Identity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const PUBLIC_PAGE_SIZE: u64 = 12;
// the admin dashboard fetches everything at once
const ADMIN_PAGE_SIZE: u64 = 999;

/// POST /api/blogs (admin)
pub async fn create_blog(
    state: web::Data<AppState>,
    admin: AdminUser,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let status = match req.status.as_deref() {
        Some(raw) => PostStatus::parse(raw)?,
        None => PostStatus::Published,
    };

    let post = Post::new(
        admin.0.id,
        &req.title,
        &req.content,
        req.thumbnail,
        status,
        req.category,
    )?;
    let post = state.posts.insert(post).await?;

    Ok(HttpResponse::Created().json(Envelope::ok_with_message(
        "Blog created successfully",
        BlogPayload {
            blog: blog_dto(post, author_dto(&admin.0)),
        },
    )))
}

/// GET /api/blogs - published only, searchable, paginated
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<BlogListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let page = PageRequest::new(q.page, q.limit, PUBLIC_PAGE_SIZE, q.sort.as_deref());
    let filter = PostFilter {
        category: q.category,
        search: q.q,
    };

    let (previews, total) = state.posts.list_published(&filter, &page).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok(list_payload(previews, total, &page))))
}

/// GET /api/blogs/admin/my-blogs - the caller's own posts, any status
pub async fn my_blogs(
    state: web::Data<AppState>,
    admin: AdminUser,
    query: web::Query<BlogListQuery>,
) -> AppResult<HttpResponse> {
    let q = query.into_inner();
    let page = PageRequest::new(q.page, q.limit, ADMIN_PAGE_SIZE, q.sort.as_deref());

    let (previews, total) = state.posts.list_by_author(admin.0.id, &page).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok(list_payload(previews, total, &page))))
}

/// GET /api/blogs/{slug} - published only; increments the view counter
pub async fn get_blog_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();

    let post = state
        .posts
        .find_published_by_slug_and_bump_views(&slug)
        .await?
        .ok_or_else(blog_not_found)?;

    let author = author_of(&state, &post).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(BlogPayload {
        blog: blog_dto(post, author),
    })))
}

/// GET /api/blogs/id/{id} - any status, no view increment (edit flows)
pub async fn get_blog_by_id(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(blog_not_found)?;

    let author = author_of(&state, &post).await?;
    Ok(HttpResponse::Ok().json(Envelope::ok(BlogPayload {
        blog: blog_dto(post, author),
    })))
}

/// POST /api/blogs/{id}/like - any authenticated caller, idempotent toggle
pub async fn like_blog(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .toggle_like(path.into_inner(), identity.user_id)
        .await?
        .ok_or_else(blog_not_found)?;

    let liked = post.liked_by.contains(&identity.user_id);
    let author = author_of(&state, &post).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok(LikePayload {
        blog: blog_dto(post, author),
        liked,
    })))
}

/// PUT /api/blogs/{id} (admin, owner only)
pub async fn update_blog(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBlogRequest>,
) -> AppResult<HttpResponse> {
    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(blog_not_found)?;

    if !post.is_owned_by(admin.0.id) {
        return Err(AppError::Forbidden(
            "Not authorized to update this blog".to_string(),
        ));
    }

    let req = body.into_inner();
    let status = req.status.as_deref().map(PostStatus::parse).transpose()?;

    post.apply_update(PostUpdate {
        title: req.title,
        content: req.content,
        thumbnail: req.thumbnail,
        status,
        category: req.category,
    })?;

    let post = state.posts.update(&post).await?;

    Ok(HttpResponse::Ok().json(Envelope::ok_with_message(
        "Blog updated successfully",
        BlogPayload {
            blog: blog_dto(post, author_dto(&admin.0)),
        },
    )))
}

/// PATCH /api/blogs/{id}/status (admin, owner only)
pub async fn update_blog_status(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> AppResult<HttpResponse> {
    let status = PostStatus::parse(&body.status)?;

    let mut post = state
        .posts
        .find_by_id(path.into_inner())
        .await?
        .ok_or_else(blog_not_found)?;

    if !post.is_owned_by(admin.0.id) {
        return Err(AppError::Forbidden(
            "Not authorized to update this blog".to_string(),
        ));
    }

    post.apply_update(PostUpdate {
        status: Some(status),
        ..Default::default()
    })?;
    let post = state.posts.update(&post).await?;

    let message = match status {
        PostStatus::Published => "Blog published successfully",
        PostStatus::Disabled => "Blog disabled successfully",
    };

    Ok(HttpResponse::Ok().json(Envelope::ok_with_message(
        message,
        BlogPayload {
            blog: blog_dto(post, author_dto(&admin.0)),
        },
    )))
}

/// DELETE /api/blogs/{id} (admin, owner only)
pub async fn delete_blog(
    state: web::Data<AppState>,
    admin: AdminUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state.posts.find_by_id(id).await?.ok_or_else(blog_not_found)?;

    if !post.is_owned_by(admin.0.id) {
        return Err(AppError::Forbidden(
            "Not authorized to delete this blog".to_string(),
        ));
    }

    state.posts.delete(id).await?;

    Ok(HttpResponse::Ok().json(Envelope::message_only("Blog deleted successfully")))
}

fn blog_not_found() -> AppError {
    AppError::NotFound("Blog not found".to_string())
}

/// Resolve the author reference for a post. The foreign key guarantees the
/// row exists; a miss here is a data integrity problem, not a 404.
async fn author_of(state: &AppState, post: &Post) -> AppResult<AuthorDto> {
    let user = state
        .users
        .find_by_id(post.author_id)
        .await?
        .ok_or_else(|| AppError::Internal("blog author record missing".to_string()))?;

    Ok(author_dto(&user))
}

fn author_dto(user: &User) -> AuthorDto {
    AuthorDto {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

fn blog_dto(post: Post, author: AuthorDto) -> BlogDto {
    BlogDto {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        thumbnail: post.thumbnail,
        status: post.status.as_str().to_string(),
        category: post.category,
        views: post.views,
        likes: post.likes,
        liked_by: post.liked_by,
        author,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn preview_dto(preview: PostPreview) -> BlogPreviewDto {
    BlogPreviewDto {
        id: preview.id,
        title: preview.title,
        slug: preview.slug,
        thumbnail: preview.thumbnail,
        status: preview.status.as_str().to_string(),
        category: preview.category,
        views: preview.views,
        likes: preview.likes,
        author: AuthorDto {
            id: preview.author.id,
            name: preview.author.name,
            email: preview.author.email,
        },
        created_at: preview.created_at,
        updated_at: preview.updated_at,
    }
}

fn list_payload(previews: Vec<PostPreview>, total: u64, page: &PageRequest) -> BlogListPayload {
    BlogListPayload {
        blogs: previews.into_iter().map(preview_dto).collect(),
        pagination: Pagination::new(total, page.page, page.limit),
    }
}
