//! Shared validation helpers for inbound HTTP adapters.

use tracing::debug;

use crate::domain::{CommentId, Error, GroupId, PostId, ResourceKind};

/// Parse a numeric path segment. Anything that is not an integer cannot
/// name a stored record, so it is reported as not found.
fn parse_path_id(raw: &str, kind: ResourceKind) -> Result<i64, Error> {
    raw.parse::<i64>().map_err(|_| {
        debug!(resource = %kind, segment = raw, "non-numeric path identifier");
        Error::not_found(format!("{kind} not found"))
    })
}

pub(crate) fn group_id(raw: &str) -> Result<GroupId, Error> {
    parse_path_id(raw, ResourceKind::Group).map(GroupId::new)
}

pub(crate) fn post_id(raw: &str) -> Result<PostId, Error> {
    parse_path_id(raw, ResourceKind::Post).map(PostId::new)
}

pub(crate) fn comment_id(raw: &str) -> Result<CommentId, Error> {
    parse_path_id(raw, ResourceKind::Comment).map(CommentId::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("7", Some(7))]
    #[case("-3", Some(-3))]
    #[case("abc", None)]
    #[case("1.5", None)]
    #[case("", None)]
    fn parses_integer_segments(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(post_id(raw).ok().map(PostId::get), expected);
    }

    #[rstest]
    fn non_numeric_segment_names_the_resource() {
        let error = comment_id("first").expect_err("not numeric");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "comment not found");
    }
}
