use std::fmt;

use poem_openapi::Object;

/// Languages content can be served in. English is the base language stored
/// in the main columns; Portuguese lives in the `_pt` overlay columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Pt,
}

/// Display metadata for a supported language.
#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub rtl: bool,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Pt];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Pt => "pt",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Portuguese",
        }
    }

    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pt => "Português",
        }
    }

    /// Case-insensitive lookup by code; anything unknown falls back to the default.
    pub fn from_code(code: &str) -> Language {
        match code.trim().to_ascii_lowercase().as_str() {
            "pt" => Language::Pt,
            "en" => Language::En,
            other => {
                tracing::debug!("unsupported language {other:?}, using {}", Language::default());
                Language::default()
            }
        }
    }

    /// Same as [`Language::from_code`] for an optional query parameter.
    pub fn from_param(code: Option<&str>) -> Language {
        code.map(Language::from_code).unwrap_or_default()
    }

    pub fn info(self) -> LanguageInfo {
        LanguageInfo {
            code: self.code().to_string(),
            name: self.name().to_string(),
            native_name: self.native_name().to_string(),
            rtl: false,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub fn available() -> Vec<LanguageInfo> {
    Language::ALL.iter().map(|lang| lang.info()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(Language::from_code("PT"), Language::Pt);
        assert_eq!(Language::from_code(" en "), Language::En);
    }

    #[test]
    fn unknown_codes_fall_back_to_english() {
        assert_eq!(Language::from_code("es"), Language::En);
        assert_eq!(Language::from_param(None), Language::En);
    }

    #[test]
    fn available_lists_both_languages() {
        let langs = available();
        assert_eq!(langs.len(), 2);
        assert_eq!(langs[1].native_name, "Português");
    }
}
