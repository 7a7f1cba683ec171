use poem_openapi::types::MaybeUndefined;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveValue, Value};

use crate::content::models::PostPatch;
use crate::entities::post;

/// Writes a tri-state patch value into a nullable column.
pub fn apply_nullable<T>(target: &mut ActiveValue<Option<T>>, value: MaybeUndefined<T>)
where
    Option<T>: Into<Value>,
{
    match value {
        MaybeUndefined::Undefined => {}
        MaybeUndefined::Null => *target = Set(None),
        MaybeUndefined::Value(v) => *target = Set(Some(v)),
    }
}

pub fn apply_required<T>(target: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(v) = value {
        *target = Set(v);
    }
}

impl PostPatch {
    /// Applies the patch field by field. `current` is the row as loaded; it
    /// decides whether publishing now should stamp a publish date.
    pub fn apply(self, active: &mut post::ActiveModel, current: &post::Model, now: DateTimeWithTimeZone) {
        apply_required(&mut active.title, self.title);
        apply_required(&mut active.slug, self.slug);
        apply_required(&mut active.content, self.content);
        apply_nullable(&mut active.summary, self.summary);
        apply_nullable(&mut active.featured_image, self.featured_image);
        apply_required(&mut active.author_id, self.author_id);
        apply_nullable(&mut active.title_pt, self.title_pt);
        apply_nullable(&mut active.content_pt, self.content_pt);
        apply_nullable(&mut active.summary_pt, self.summary_pt);

        if let Some(published) = self.is_published {
            active.is_published = Set(published);
            if published && current.publish_date.is_none() {
                active.publish_date = Set(Some(now));
            }
        }
        active.updated_at = Set(now);
    }
}
