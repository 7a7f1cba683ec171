use sea_orm::sea_query::{Expr, Func, LikeExpr, NullOrdering, Order, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, LoaderTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::content::kind::ContentKind;
use crate::content::pagination::PageRequest;
use crate::entities::{author, comment, post, post_tag, tag};

/// Optional narrowing of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Exact, case-sensitive tag slug.
    pub tag_slug: Option<String>,
    /// Case-insensitive substring matched against title, content and summary.
    pub search: Option<String>,
}

impl ListFilter {
    pub fn new(tag_slug: Option<String>, search: Option<String>) -> Self {
        Self {
            tag_slug: tag_slug.filter(|t| !t.is_empty()),
            search: search.filter(|s| !s.is_empty()),
        }
    }
}

/// Result of the summary query: a post with its author and tags, no comments.
#[derive(Debug, Clone, PartialEq)]
pub struct PostRecord {
    pub post: post::Model,
    pub author: Option<author::Model>,
    pub tags: Vec<tag::Model>,
}

/// Result of the detail query: the summary plus the post's comments.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDetailRecord {
    pub record: PostRecord,
    pub comments: Vec<comment::Model>,
}

/// Escapes LIKE wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_ci(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col((post::Entity, column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

/// Published posts of one kind, filtered and in listing order.
pub fn listing_select(kind: ContentKind, filter: &ListFilter) -> Select<post::Entity> {
    let mut select = post::Entity::find()
        .filter(post::Column::IsPublished.eq(true))
        .filter(post::Column::IsEssay.eq(kind.is_essay()));

    if let Some(tag_slug) = filter.tag_slug.as_deref() {
        select = select
            .inner_join(tag::Entity)
            .filter(tag::Column::Slug.eq(tag_slug));
    }

    if let Some(term) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        select = select.filter(
            Condition::any()
                .add(contains_ci(post::Column::Title, &pattern))
                .add(contains_ci(post::Column::Content, &pattern))
                .add(contains_ci(post::Column::Summary, &pattern)),
        );
    }

    // undated posts go last; id keeps pages disjoint when dates tie
    select
        .order_by_with_nulls(post::Column::PublishDate, Order::Desc, NullOrdering::Last)
        .order_by_desc(post::Column::Id)
}

/// One page of a listing plus the number of rows matching before pagination.
pub async fn list_content<C>(
    db: &C,
    kind: ContentKind,
    page: PageRequest,
    filter: &ListFilter,
) -> Result<(Vec<PostRecord>, u64), DbErr>
where
    C: ConnectionTrait,
{
    let paginator = listing_select(kind, filter).paginate(db, page.page_size());
    let total = paginator.num_items().await?;
    if !page.starts_within(total) {
        return Ok((Vec::new(), total));
    }
    let posts = paginator.fetch_page(page.index()).await?;
    tracing::debug!(%kind, page = page.page(), total, fetched = posts.len(), "listed content");

    let records = load_summaries(db, posts).await?;
    Ok((records, total))
}

/// Resolves authors and tags for a batch of posts in two extra queries.
pub async fn load_summaries<C>(db: &C, posts: Vec<post::Model>) -> Result<Vec<PostRecord>, DbErr>
where
    C: ConnectionTrait,
{
    if posts.is_empty() {
        return Ok(Vec::new());
    }
    let authors = posts.load_one(author::Entity, db).await?;
    let tags = posts.load_many_to_many(tag::Entity, post_tag::Entity, db).await?;

    Ok(posts
        .into_iter()
        .zip(authors)
        .zip(tags)
        .map(|((post, author), tags)| PostRecord { post, author, tags })
        .collect())
}

/// Looks a post up by slug within one kind.
pub async fn find_by_slug<C>(db: &C, slug: &str, kind: ContentKind) -> Result<Option<post::Model>, DbErr>
where
    C: ConnectionTrait,
{
    post::Entity::find()
        .filter(post::Column::Slug.eq(slug))
        .filter(post::Column::IsEssay.eq(kind.is_essay()))
        .one(db)
        .await
}

/// Whether any post, of either kind, other than `except` already uses `slug`.
pub async fn slug_taken<C>(db: &C, slug: &str, except: Option<i32>) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let mut select = post::Entity::find().filter(post::Column::Slug.eq(slug));
    if let Some(id) = except {
        select = select.filter(post::Column::Id.ne(id));
    }
    Ok(select.count(db).await? > 0)
}

/// Loads the post's author and tags.
pub async fn load_summary<C>(db: &C, post: post::Model) -> Result<PostRecord, DbErr>
where
    C: ConnectionTrait,
{
    let author = post.find_related(author::Entity).one(db).await?;
    let tags = post
        .find_related(tag::Entity)
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?;
    Ok(PostRecord { post, author, tags })
}

/// The detail query: one lookup by `(slug, kind)`, then author, tags and comments.
pub async fn find_detail<C>(db: &C, slug: &str, kind: ContentKind) -> Result<Option<PostDetailRecord>, DbErr>
where
    C: ConnectionTrait,
{
    let Some(post) = find_by_slug(db, slug, kind).await? else {
        return Ok(None);
    };
    let comments = post
        .find_related(comment::Entity)
        .order_by_asc(comment::Column::CreatedAt)
        .order_by_asc(comment::Column::Id)
        .all(db)
        .await?;
    let record = load_summary(db, post).await?;
    Ok(Some(PostDetailRecord { record, comments }))
}
