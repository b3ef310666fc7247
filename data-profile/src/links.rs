use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cap on visible entries, enforced by the aggregate before `add`.
pub const MAX_LINKS: usize = 10;

pub const MAX_LINK_LEN: usize = 200;

/// A (label, URL) pair pointing at an external reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkEntry {
    pub site_name: String,
    pub link: String,
}

/// The two editable fields of a [`LinkEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    SiteName,
    Url,
}

/// Advisory warning produced when a link loses focus.
/// The value is retained uncorrected either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkWarning {
    #[error("Link should start with http:// or https://")]
    InvalidScheme,
    #[error("Link should be at most {MAX_LINK_LEN} characters")]
    TooLong,
}

/// An ordered list of external links with unvalidated keystroke
/// updates and an advisory check on blur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkList(Vec<LinkEntry>);

impl LinkList {
    /// Append an empty entry.
    pub fn add(&mut self) {
        self.0.push(LinkEntry::default());
    }

    /// Set one field unconditionally; no-op when out of bounds.
    pub fn update_field(&mut self, index: usize, field: LinkField, value: &str) {
        if let Some(entry) = self.0.get_mut(index) {
            match field {
                LinkField::SiteName => entry.site_name = value.to_owned(),
                LinkField::Url => entry.link = value.to_owned(),
            }
        }
    }

    /// Advisory URL-shape check, fired when the link field loses focus.
    ///
    /// An empty link produces no warning. A non-empty link without an
    /// `http(s)://` prefix, or one longer than [`MAX_LINK_LEN`], warns
    /// without blocking anything.
    pub fn commit_link(&self, index: usize) -> Option<LinkWarning> {
        let entry = self.0.get(index)?;
        if entry.link.is_empty() {
            return None;
        }
        if !entry.link.starts_with("http://")
            && !entry.link.starts_with("https://")
        {
            return Some(LinkWarning::InvalidScheme);
        }
        if entry.link.chars().count() > MAX_LINK_LEN {
            return Some(LinkWarning::TooLong);
        }
        None
    }

    /// Remove the entry at `index`; no-op when out of bounds.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[LinkEntry] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", None)]
    #[case("https://x.com", None)]
    #[case("http://x.com", None)]
    #[case("ftp://x.com", Some(LinkWarning::InvalidScheme))]
    #[case("x.com", Some(LinkWarning::InvalidScheme))]
    fn commit_link_is_advisory(
        #[case] url: &str,
        #[case] expected: Option<LinkWarning>,
    ) {
        let mut links = LinkList::default();
        links.add();
        links.update_field(0, LinkField::Url, url);

        assert_eq!(links.commit_link(0), expected);
        // the value is never corrected, only warned about
        assert_eq!(links.as_slice()[0].link, url);
    }

    #[test]
    fn overlong_link_warns() {
        let mut links = LinkList::default();
        links.add();
        let url = format!("https://x.com/{}", "a".repeat(MAX_LINK_LEN));
        links.update_field(0, LinkField::Url, &url);
        assert_eq!(links.commit_link(0), Some(LinkWarning::TooLong));
    }

    #[test]
    fn update_and_remove() {
        let mut links = LinkList::default();
        links.add();
        links.update_field(0, LinkField::SiteName, "Example");
        links.update_field(0, LinkField::Url, "https://example.com");
        assert_eq!(
            links.as_slice(),
            [LinkEntry {
                site_name: "Example".to_owned(),
                link: "https://example.com".to_owned(),
            }]
        );

        links.remove(5); // out of bounds, silent
        assert_eq!(links.len(), 1);
        links.remove(0);
        assert!(links.is_empty());
    }
}
