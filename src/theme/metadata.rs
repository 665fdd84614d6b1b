use crate::theme::ThemeHeader;
use serde::{Serialize, Serializer};

/// Metadata of one discovered theme
///
/// Every field is optional. `None` means the header was absent from the
/// stylesheet, while `Some("")` means it was present with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeMetadata {
    pub theme_name: Option<String>,
    pub theme_uri: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub author_uri: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub license_uri: Option<String>,
    /// Raw comma separated `Tags` header; rendered as a list
    #[serde(serialize_with = "serialize_tags")]
    pub tags: Option<String>,
    pub text_domain: Option<String>,
    pub included_translations: Option<String>,
    pub template: Option<String>,
    pub status: Option<String>,
    /// URL of the theme screenshot, if one was found
    pub featured_image: Option<String>,
}

impl ThemeMetadata {
    /// Returns the value recorded for a header
    pub fn get(&self, header: ThemeHeader) -> Option<&str> {
        self.slot(header).as_deref()
    }

    /// Records the value of a header, replacing any previous one
    pub fn set(&mut self, header: ThemeHeader, value: impl Into<String>) {
        *self.slot_mut(header) = Some(value.into());
    }

    /// Attaches the screenshot URL
    pub fn set_featured_image(&mut self, url: impl Into<String>) {
        self.featured_image = Some(url.into());
    }

    /// Tags as a list of trimmed, non-empty strings
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(split_tags).unwrap_or_default()
    }

    /// Returns true if no header was recorded
    pub fn is_empty(&self) -> bool {
        ThemeHeader::ALL.iter().all(|h| self.get(*h).is_none())
    }

    fn slot(&self, header: ThemeHeader) -> &Option<String> {
        match header {
            ThemeHeader::ThemeName => &self.theme_name,
            ThemeHeader::ThemeUri => &self.theme_uri,
            ThemeHeader::Description => &self.description,
            ThemeHeader::Author => &self.author,
            ThemeHeader::AuthorUri => &self.author_uri,
            ThemeHeader::Version => &self.version,
            ThemeHeader::License => &self.license,
            ThemeHeader::LicenseUri => &self.license_uri,
            ThemeHeader::Tags => &self.tags,
            ThemeHeader::TextDomain => &self.text_domain,
            ThemeHeader::IncludedTranslations => &self.included_translations,
            ThemeHeader::Template => &self.template,
            ThemeHeader::Status => &self.status,
        }
    }

    fn slot_mut(&mut self, header: ThemeHeader) -> &mut Option<String> {
        match header {
            ThemeHeader::ThemeName => &mut self.theme_name,
            ThemeHeader::ThemeUri => &mut self.theme_uri,
            ThemeHeader::Description => &mut self.description,
            ThemeHeader::Author => &mut self.author,
            ThemeHeader::AuthorUri => &mut self.author_uri,
            ThemeHeader::Version => &mut self.version,
            ThemeHeader::License => &mut self.license,
            ThemeHeader::LicenseUri => &mut self.license_uri,
            ThemeHeader::Tags => &mut self.tags,
            ThemeHeader::TextDomain => &mut self.text_domain,
            ThemeHeader::IncludedTranslations => &mut self.included_translations,
            ThemeHeader::Template => &mut self.template,
            ThemeHeader::Status => &mut self.status,
        }
    }
}

/// Splits a raw `Tags` header on commas, dropping empty entries
///
/// # Examples
///
/// ```
/// use wpoke::theme::split_tags;
///
/// assert_eq!(split_tags("hacking, programming  , devops,"), vec!["hacking", "programming", "devops"]);
/// ```
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn serialize_tags<S>(tags: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let list = tags.as_deref().map(split_tags).unwrap_or_default();
    serializer.collect_seq(list)
}
