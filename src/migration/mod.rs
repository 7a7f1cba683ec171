pub use sea_orm_migration::prelude::*;

mod m20250501_000001_create_content_tables;
mod m20250502_000001_add_portuguese_text_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250501_000001_create_content_tables::Migration),
            Box::new(m20250502_000001_add_portuguese_text_fields::Migration),
        ]
    }
}

#[derive(DeriveIden)]
pub(crate) enum Posts {
    Table,
    Id,
    Title,
    Slug,
    Content,
    Summary,
    IsPublished,
    IsEssay,
    CreatedAt,
    UpdatedAt,
    PublishDate,
    FeaturedImage,
    AuthorId,
    TitlePt,
    ContentPt,
    SummaryPt,
}
