//! Topic groups posts may be filed under.
//!
//! Groups are managed out of band; the API only reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage-assigned group identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(i64);

impl GroupId {
    /// Wrap a raw storage identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw storage identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a group title.
pub const GROUP_TITLE_MAX: usize = 200;

/// Validation errors raised when building a [`NewGroup`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupValidationError {
    #[error("group title must not be empty")]
    EmptyTitle,
    #[error("group title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("group slug must not be empty")]
    EmptySlug,
    #[error("group slug may only contain letters, digits, hyphens and underscores")]
    InvalidSlug,
}

/// Stored group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: GroupId,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Group to be created by the seeding path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    title: String,
    slug: String,
    description: String,
}

impl NewGroup {
    /// Validate the title and slug of a group about to be stored.
    ///
    /// # Examples
    /// ```
    /// use yatube_api::domain::NewGroup;
    ///
    /// let group = NewGroup::new("Cats", "cats", "All about cats").expect("valid group");
    /// assert_eq!(group.slug(), "cats");
    /// assert!(NewGroup::new("Cats", "no spaces", "").is_err());
    /// ```
    pub fn new(
        title: &str,
        slug: &str,
        description: &str,
    ) -> Result<Self, GroupValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(GroupValidationError::EmptyTitle);
        }
        if title.chars().count() > GROUP_TITLE_MAX {
            return Err(GroupValidationError::TitleTooLong {
                max: GROUP_TITLE_MAX,
            });
        }
        let slug = slug.trim();
        if slug.is_empty() {
            return Err(GroupValidationError::EmptySlug);
        }
        if !slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(GroupValidationError::InvalidSlug);
        }
        Ok(Self {
            title: title.to_owned(),
            slug: slug.to_owned(),
            description: description.to_owned(),
        })
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unique URL-safe key.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Attach the identifier assigned by storage.
    #[must_use]
    pub fn into_group(self, id: GroupId) -> Group {
        Group {
            id,
            title: self.title,
            slug: self.slug,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "cats", GroupValidationError::EmptyTitle)]
    #[case("Cats", "  ", GroupValidationError::EmptySlug)]
    #[case("Cats", "cats!", GroupValidationError::InvalidSlug)]
    fn rejects_invalid_groups(
        #[case] title: &str,
        #[case] slug: &str,
        #[case] expected: GroupValidationError,
    ) {
        assert_eq!(NewGroup::new(title, slug, ""), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_titles() {
        let title = "t".repeat(GROUP_TITLE_MAX + 1);
        assert_eq!(
            NewGroup::new(&title, "slug", ""),
            Err(GroupValidationError::TitleTooLong {
                max: GROUP_TITLE_MAX
            })
        );
    }

    #[rstest]
    fn into_group_keeps_fields() {
        let group = NewGroup::new(" Cats ", "cats_and-dogs", "desc")
            .expect("valid group")
            .into_group(GroupId::new(3));
        assert_eq!(group.id, GroupId::new(3));
        assert_eq!(group.title, "Cats");
        assert_eq!(group.slug, "cats_and-dogs");
        assert_eq!(group.description, "desc");
    }
}
