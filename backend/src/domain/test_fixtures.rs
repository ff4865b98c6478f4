//! Shared fixtures for controller tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Caller, Comment, CommentId, GroupId, GroupRef, Identity, Post, PostId, UserId, Username,
};

pub(crate) const AUTHOR_ID: i64 = 1;
pub(crate) const STRANGER_ID: i64 = 2;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn identity(id: i64, name: &str) -> Identity {
    Identity::new(UserId::new(id), Username::new(name).expect("valid username"))
}

pub(crate) fn author() -> Caller {
    Caller::Authenticated(identity(AUTHOR_ID, "author"))
}

pub(crate) fn stranger() -> Caller {
    Caller::Authenticated(identity(STRANGER_ID, "stranger"))
}

pub(crate) fn post(id: i64, group: Option<(i64, &str)>) -> Post {
    Post {
        id: PostId::new(id),
        text: "Original text".to_owned(),
        author: identity(AUTHOR_ID, "author"),
        group: group.map(|(group_id, title)| GroupRef {
            id: GroupId::new(group_id),
            title: title.to_owned(),
        }),
        pub_date: fixture_timestamp(),
    }
}

pub(crate) fn comment(id: i64, post: i64) -> Comment {
    Comment {
        id: CommentId::new(id),
        text: "First!".to_owned(),
        author: identity(AUTHOR_ID, "author"),
        post: PostId::new(post),
        created: fixture_timestamp(),
    }
}
