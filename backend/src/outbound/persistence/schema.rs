//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// User accounts. `password` holds an encoded salted digest.
    users (id) {
        id -> Int8,
        username -> Varchar,
        password -> Text,
    }
}

diesel::table! {
    /// One API token per user.
    tokens (key) {
        key -> Varchar,
        user_id -> Int8,
        created -> Timestamptz,
    }
}

diesel::table! {
    /// Read-only communities posts may belong to.
    groups (id) {
        id -> Int8,
        title -> Varchar,
        slug -> Text,
        description -> Text,
    }
}

diesel::table! {
    posts (id) {
        id -> Int8,
        text -> Text,
        pub_date -> Timestamptz,
        author_id -> Int8,
        group_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Comments cascade away with their post.
    comments (id) {
        id -> Int8,
        text -> Text,
        created -> Timestamptz,
        author_id -> Int8,
        post_id -> Int8,
    }
}

diesel::joinable!(tokens -> users (user_id));
diesel::joinable!(posts -> users (author_id));
diesel::joinable!(posts -> groups (group_id));
diesel::joinable!(comments -> users (author_id));
diesel::joinable!(comments -> posts (post_id));

diesel::allow_tables_to_appear_in_same_query!(users, tokens, groups, posts, comments);
