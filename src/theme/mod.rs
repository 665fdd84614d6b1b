//! Theme metadata model
//!
//! A WordPress theme declares its metadata in the leading comment block of
//! its `style.css`, one `Label: value` header per line. This module holds
//! the ordered label table and the record built from it.

mod metadata;

pub use metadata::{split_tags, ThemeMetadata};

/// Header labels recognized in a theme stylesheet, in extraction order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeHeader {
    ThemeName,
    ThemeUri,
    Description,
    Author,
    AuthorUri,
    Version,
    License,
    LicenseUri,
    Tags,
    TextDomain,
    IncludedTranslations,
    Template,
    Status,
}

impl ThemeHeader {
    /// Every header, in the order they are searched for
    pub const ALL: [ThemeHeader; 13] = [
        Self::ThemeName,
        Self::ThemeUri,
        Self::Description,
        Self::Author,
        Self::AuthorUri,
        Self::Version,
        Self::License,
        Self::LicenseUri,
        Self::Tags,
        Self::TextDomain,
        Self::IncludedTranslations,
        Self::Template,
        Self::Status,
    ];

    /// Label as written in the stylesheet
    pub fn label(&self) -> &'static str {
        match self {
            Self::ThemeName => "Theme Name",
            Self::ThemeUri => "Theme URI",
            Self::Description => "Description",
            Self::Author => "Author",
            Self::AuthorUri => "Author URI",
            Self::Version => "Version",
            Self::License => "License",
            Self::LicenseUri => "License URI",
            Self::Tags => "Tags",
            Self::TextDomain => "Text Domain",
            Self::IncludedTranslations => "Included Translations",
            Self::Template => "Template",
            Self::Status => "Status",
        }
    }
}
