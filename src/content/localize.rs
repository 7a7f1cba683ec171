use crate::content::models::{PostDetail, PostSummary};
use crate::i18n::Language;

/// Presentation-time translation of already-fetched content.
///
/// Implementations work on an owned copy and keep the overlay fields, so
/// applying the same language twice is a no-op.
pub trait Localize: Sized {
    fn localized(self, lang: Language) -> Self;
}

/// Returns the localized view of `item`, leaving `item` itself untouched.
pub fn localize<T: Localize + Clone>(item: &T, lang: Language) -> T {
    item.clone().localized(lang)
}

fn overlay(base: String, translated: Option<&String>) -> String {
    match translated {
        Some(text) if !text.is_empty() => text.clone(),
        _ => base,
    }
}

impl Localize for PostSummary {
    fn localized(mut self, lang: Language) -> Self {
        if lang == Language::Pt {
            self.title = overlay(self.title, self.title_pt.as_ref());
            self.content = overlay(self.content, self.content_pt.as_ref());
            self.summary = match self.summary_pt.as_ref() {
                Some(text) if !text.is_empty() => Some(text.clone()),
                _ => self.summary,
            };
        }
        self
    }
}

impl Localize for PostDetail {
    fn localized(mut self, lang: Language) -> Self {
        self.post = self.post.localized(lang);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample() -> PostSummary {
        let now = Utc::now().fixed_offset();
        PostSummary {
            id: 1,
            title: "Hello".into(),
            slug: "hello".into(),
            content: "English body".into(),
            summary: Some("English summary".into()),
            is_published: true,
            is_essay: false,
            created_at: now,
            updated_at: now,
            publish_date: Some(now),
            featured_image: None,
            author_id: 1,
            title_pt: Some("Olá".into()),
            content_pt: Some(String::new()),
            summary_pt: None,
            author: None,
            tags: vec![],
        }
    }

    #[test]
    fn english_is_identity() {
        let post = sample();
        assert_eq!(localize(&post, Language::En), post);
    }

    #[test]
    fn portuguese_overlays_only_non_empty_fields() {
        let view = localize(&sample(), Language::Pt);
        assert_eq!(view.title, "Olá");
        assert_eq!(view.content, "English body");
        assert_eq!(view.summary.as_deref(), Some("English summary"));
    }

    #[test]
    fn localizing_twice_is_stable_and_source_is_untouched() {
        let post = sample();
        let once = localize(&post, Language::Pt);
        let twice = localize(&once, Language::Pt);
        assert_eq!(once, twice);
        assert_eq!(post.title, "Hello");
    }

    #[test]
    fn summary_overlay_fills_missing_base_summary() {
        let mut post = sample();
        post.summary = None;
        post.summary_pt = Some("Resumo".into());
        assert_eq!(localize(&post, Language::Pt).summary.as_deref(), Some("Resumo"));
    }
}
