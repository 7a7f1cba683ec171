use std::fmt;

/// Which listing a post belongs to. Both kinds share the `posts` table and
/// differ only in the `is_essay` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Blog,
    Essay,
}

impl ContentKind {
    pub fn is_essay(self) -> bool {
        matches!(self, ContentKind::Essay)
    }

    pub fn from_is_essay(is_essay: bool) -> Self {
        if is_essay { ContentKind::Essay } else { ContentKind::Blog }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Blog => "blog post",
            ContentKind::Essay => "essay",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
