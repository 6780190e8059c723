use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbBackend, DbConn, DbErr, EntityTrait,
    FromQueryResult, JoinType, Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Statement,
};
use uuid::Uuid;

use chronicle_core::domain::{
    AuthorRef, PageRequest, Post, PostFilter, PostPreview, PostStatus, Sort, SortKey, SortOrder,
};
use chronicle_core::error::RepoError;
use chronicle_core::ports::PostRepository;

use super::map_db_err;
use crate::database::entity::{
    post::{self, Entity as PostEntity},
    user,
};

/// Postgres post repository.
///
/// The view and like counters are maintained with single-statement updates
/// so concurrent requests never lose increments.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Fetch a page of previews plus the total for the same condition.
    /// The body text is never selected; author fields come from a join.
    async fn previews(
        &self,
        cond: Condition,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        let (column, order) = sort_column(page.sort);

        let rows = PostEntity::find()
            .select_only()
            .columns([
                post::Column::Id,
                post::Column::Title,
                post::Column::Slug,
                post::Column::Thumbnail,
                post::Column::Status,
                post::Column::Category,
                post::Column::Views,
                post::Column::Likes,
                post::Column::AuthorId,
                post::Column::CreatedAt,
                post::Column::UpdatedAt,
            ])
            .column_as(user::Column::Name, "author_name")
            .column_as(user::Column::Email, "author_email")
            .join(JoinType::InnerJoin, post::Relation::User.def())
            .filter(cond.clone())
            .order_by(column, order)
            .offset(page.offset())
            .limit(page.limit)
            .into_model::<PreviewRow>()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let total = PostEntity::find()
            .filter(cond)
            .count(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((rows.into_iter().map(PreviewRow::into_preview).collect(), total))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_by_slug_and_bump_views(
        &self,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        // increment and read in one statement; no lost updates under
        // concurrent requests
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"UPDATE posts SET views = views + 1 WHERE slug = $1 AND status = 'published' RETURNING *"#,
            [slug.into()],
        );

        let result = PostEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_published(
        &self,
        filter: &PostFilter,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        self.previews(published_condition(filter), page).await
    }

    async fn list_by_author(
        &self,
        author_id: Uuid,
        page: &PageRequest,
    ) -> Result<(Vec<PostPreview>, u64), RepoError> {
        let cond = Condition::all().add(post::Column::AuthorId.eq(author_id));
        self.previews(cond, page).await
    }

    async fn update(&self, post: &Post) -> Result<Post, RepoError> {
        let result = post::ActiveModel::from(post.clone()).update(&self.db).await;

        match result {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::NotFound),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Post>, RepoError> {
        // membership test, array mutation and counter move in one atomic
        // statement; the counter is floored at zero
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            UPDATE posts
            SET liked_by = CASE WHEN $2 = ANY(liked_by)
                                THEN array_remove(liked_by, $2)
                                ELSE array_append(liked_by, $2) END,
                likes    = CASE WHEN $2 = ANY(liked_by)
                                THEN GREATEST(likes - 1, 0)
                                ELSE likes + 1 END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            [id.into(), user_id.into()],
        );

        let result = PostEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Flat row shape for the preview query.
#[derive(Debug, FromQueryResult)]
struct PreviewRow {
    id: Uuid,
    title: String,
    slug: String,
    thumbnail: Option<String>,
    status: String,
    category: String,
    views: i64,
    likes: i64,
    author_id: Uuid,
    author_name: String,
    author_email: String,
    created_at: sea_orm::prelude::DateTimeWithTimeZone,
    updated_at: sea_orm::prelude::DateTimeWithTimeZone,
}

impl PreviewRow {
    fn into_preview(self) -> PostPreview {
        PostPreview {
            id: self.id,
            title: self.title,
            slug: self.slug,
            thumbnail: self.thumbnail,
            status: PostStatus::parse(&self.status).unwrap_or(PostStatus::Published),
            category: self.category,
            views: self.views,
            likes: self.likes,
            author: AuthorRef {
                id: self.author_id,
                name: self.author_name,
                email: self.author_email,
            },
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}

fn published_condition(filter: &PostFilter) -> Condition {
    let mut cond = Condition::all().add(post::Column::Status.eq(PostStatus::Published.as_str()));

    if let Some(category) = &filter.category {
        cond = cond.add(post::Column::Category.eq(category.clone()));
    }
    if let Some(q) = filter.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        let pattern = like_pattern(q);
        cond = cond.add(
            Condition::any()
                .add(Expr::col((PostEntity, post::Column::Title)).ilike(pattern.clone()))
                .add(Expr::col((PostEntity, post::Column::Content)).ilike(pattern.clone()))
                .add(Expr::col((PostEntity, post::Column::Category)).ilike(pattern)),
        );
    }

    cond
}

/// `%q%` with LIKE wildcards in the needle escaped.
fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn sort_column(sort: Sort) -> (post::Column, Order) {
    let column = match sort.key {
        SortKey::CreatedAt => post::Column::CreatedAt,
        SortKey::UpdatedAt => post::Column::UpdatedAt,
        SortKey::Views => post::Column::Views,
        SortKey::Likes => post::Column::Likes,
        SortKey::Title => post::Column::Title,
    };
    let order = match sort.order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    };
    (column, order)
}
