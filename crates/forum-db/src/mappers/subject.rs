//! Subject kind -> storage partition
//!
//! Every SQL statement touching reactions is selected here by kind, so the two
//! partitions share one code path. Statements are static strings; no table name
//! is ever formatted from input.

use forum_core::entities::SubjectKind;

/// SQL statements for one reaction partition
#[derive(Debug)]
pub struct ReactionTable {
    pub select_one: &'static str,
    pub insert: &'static str,
    pub update_sign: &'static str,
    pub delete: &'static str,
    pub count_by_sign: &'static str,
    pub subject_exists: &'static str,
}

const POSTS: ReactionTable = ReactionTable {
    select_one: "SELECT user_id, post_id AS subject_id, sign FROM posts_reactions \
                 WHERE user_id = $1 AND post_id = $2",
    insert: "INSERT INTO posts_reactions (user_id, post_id, sign) VALUES ($1, $2, $3)",
    update_sign: "UPDATE posts_reactions SET sign = $3 WHERE user_id = $1 AND post_id = $2",
    delete: "DELETE FROM posts_reactions WHERE user_id = $1 AND post_id = $2",
    count_by_sign: "SELECT COUNT(*) FILTER (WHERE sign = 1) AS likes, \
                    COUNT(*) FILTER (WHERE sign = -1) AS dislikes \
                    FROM posts_reactions WHERE post_id = $1",
    subject_exists: "SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)",
};

const COMMENTS: ReactionTable = ReactionTable {
    select_one: "SELECT user_id, comment_id AS subject_id, sign FROM comments_reactions \
                 WHERE user_id = $1 AND comment_id = $2",
    insert: "INSERT INTO comments_reactions (user_id, comment_id, sign) VALUES ($1, $2, $3)",
    update_sign: "UPDATE comments_reactions SET sign = $3 WHERE user_id = $1 AND comment_id = $2",
    delete: "DELETE FROM comments_reactions WHERE user_id = $1 AND comment_id = $2",
    count_by_sign: "SELECT COUNT(*) FILTER (WHERE sign = 1) AS likes, \
                    COUNT(*) FILTER (WHERE sign = -1) AS dislikes \
                    FROM comments_reactions WHERE comment_id = $1",
    subject_exists: "SELECT EXISTS (SELECT 1 FROM comments WHERE id = $1)",
};

impl ReactionTable {
    pub fn for_kind(kind: SubjectKind) -> &'static ReactionTable {
        match kind {
            SubjectKind::Post => &POSTS,
            SubjectKind::Comment => &COMMENTS,
        }
    }
}
