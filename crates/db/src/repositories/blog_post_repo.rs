//! Repository for the `blog_posts` table.

use sqlx::PgPool;
use vowreel_core::types::DbId;

use super::{lock_slug, slug_taken};
use crate::error::RepoError;
use crate::models::blog_post::{BlogPost, BlogPostInput};
use crate::models::Updated;

/// Column list for the `blog_posts` table.
const COLUMNS: &str = "id, slug, title, excerpt, content, image, category, post_date, \
    published, featured, meta_title, meta_description, created_at, updated_at";

/// Blog listing order: featured first, then newest.
const LISTING_ORDER: &str = "featured DESC, post_date DESC, id ASC";

const ENTITY: &str = "BlogPost";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new blog post. `post_date` defaults to today.
    pub async fn create(pool: &PgPool, input: &BlogPostInput) -> Result<BlogPost, RepoError> {
        let mut tx = pool.begin().await?;

        if slug_taken(&mut tx, "blog_posts", &input.slug, None).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let insert_query = format!(
            "INSERT INTO blog_posts \
                (slug, title, excerpt, content, image, category, post_date, published, \
                 featured, meta_title, meta_description) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE), $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&insert_query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.category)
            .bind(input.post_date)
            .bind(input.published)
            .bind(input.featured)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        tx.commit().await?;
        Ok(post)
    }

    /// Find a blog post by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a blog post by slug, whatever its published state.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List every blog post in listing order.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts ORDER BY {LISTING_ORDER}");
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// List published blog posts, optionally restricted to one category.
    pub async fn list_published(
        pool: &PgPool,
        category: Option<&str>,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts \
             WHERE published = true AND ($1::TEXT IS NULL OR category = $1) \
             ORDER BY {LISTING_ORDER}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Replace every field of a blog post.
    ///
    /// An omitted `post_date` keeps the stored one. Returns `None` if no row
    /// with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BlogPostInput,
    ) -> Result<Option<Updated<BlogPost>>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(previous_slug) = lock_slug(&mut tx, "blog_posts", id).await? else {
            return Ok(None);
        };

        if slug_taken(&mut tx, "blog_posts", &input.slug, Some(id)).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let update_query = format!(
            "UPDATE blog_posts SET \
                slug = $2, title = $3, excerpt = $4, content = $5, image = $6, \
                category = $7, post_date = COALESCE($8, post_date), published = $9, \
                featured = $10, meta_title = $11, meta_description = $12, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.image)
            .bind(&input.category)
            .bind(input.post_date)
            .bind(input.published)
            .bind(input.featured)
            .bind(&input.meta_title)
            .bind(&input.meta_description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        tx.commit().await?;
        Ok(Some(Updated {
            row: post,
            previous_slug,
        }))
    }

    /// Delete a blog post, returning the deleted row.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("DELETE FROM blog_posts WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `published` and bump `updated_at`.
    pub async fn toggle_published(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET published = NOT published, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `featured` and bump `updated_at`.
    pub async fn toggle_featured(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET featured = NOT featured, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
