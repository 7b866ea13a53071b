//! Gossip domain types, vote kinds, and feed views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use grapevine_core::{GossipId, UserId};

use super::ANONYMOUS_AUTHOR;
use super::comment::CommentView;

/// A stored gossip (domain type). Votes live in their own relation and are
/// aggregated into [`GossipWithVotes`] when read.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Gossip {
    pub id: GossipId,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a gossip.
#[derive(Debug, Clone)]
pub struct NewGossip {
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub is_anonymous: bool,
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    /// Parse the wire form of a vote. Only `"up"` and `"down"` exist; there
    /// is deliberately no retraction kind.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            _ => None,
        }
    }

    /// The form stored in the `gossip_vote.vote` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// Feed ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Creation time, newest first.
    #[default]
    Newest,
    /// Upvote count, highest first.
    Popular,
    /// Downvote count, highest first.
    Controversial,
}

impl SortKey {
    /// Parse the `sortBy` query parameter. Anything unrecognized falls back
    /// to newest-first rather than failing the request.
    #[must_use]
    pub fn from_query(param: Option<&str>) -> Self {
        match param {
            Some("popular") => Self::Popular,
            Some("controversial") => Self::Controversial,
            _ => Self::Newest,
        }
    }
}

/// Up/down counts for one gossip.
#[derive(Debug, Clone, Copy, Serialize, sqlx::FromRow)]
pub struct VoteTally {
    pub upvotes: i64,
    pub downvotes: i64,
}

/// A gossip with its vote sets aggregated.
#[derive(Debug, Clone)]
pub struct GossipWithVotes {
    pub gossip: Gossip,
    pub upvotes: i64,
    pub downvotes: i64,
    pub upvoted_by: Vec<UserId>,
    pub downvoted_by: Vec<UserId>,
}

impl GossipWithVotes {
    /// A freshly created gossip: empty vote sets.
    #[must_use]
    pub const fn fresh(gossip: Gossip) -> Self {
        Self {
            gossip,
            upvotes: 0,
            downvotes: 0,
            upvoted_by: Vec::new(),
            downvoted_by: Vec::new(),
        }
    }
}

/// Wire view of a gossip as served in the feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GossipView {
    pub id: GossipId,
    pub content: String,
    /// Display name; `"Anonymous"` whenever the gossip is anonymous,
    /// regardless of who is asking.
    pub author: String,
    pub author_id: UserId,
    pub is_anonymous: bool,
    pub upvotes: i64,
    pub downvotes: i64,
    pub upvoted_by: Vec<UserId>,
    pub downvoted_by: Vec<UserId>,
    pub comments: Vec<CommentView>,
    pub created_at: DateTime<Utc>,
}

impl GossipView {
    /// Build the wire view, attaching comments and redacting the author of
    /// anonymous gossips.
    #[must_use]
    pub fn assemble(record: GossipWithVotes, comments: Vec<CommentView>) -> Self {
        let GossipWithVotes {
            gossip,
            upvotes,
            downvotes,
            upvoted_by,
            downvoted_by,
        } = record;

        let author = if gossip.is_anonymous {
            ANONYMOUS_AUTHOR.to_string()
        } else {
            gossip.author_username
        };

        Self {
            id: gossip.id,
            content: gossip.content,
            author,
            author_id: gossip.author_id,
            is_anonymous: gossip.is_anonymous,
            upvotes,
            downvotes,
            upvoted_by,
            downvoted_by,
            comments,
            created_at: gossip.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gossip(is_anonymous: bool) -> Gossip {
        Gossip {
            id: GossipId::generate(),
            content: "hello".to_string(),
            author_id: UserId::generate(),
            author_username: "alice".to_string(),
            is_anonymous,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sort_key_from_query() {
        assert_eq!(SortKey::from_query(None), SortKey::Newest);
        assert_eq!(SortKey::from_query(Some("newest")), SortKey::Newest);
        assert_eq!(SortKey::from_query(Some("popular")), SortKey::Popular);
        assert_eq!(
            SortKey::from_query(Some("controversial")),
            SortKey::Controversial
        );
        // Unknown values fall back instead of erroring
        assert_eq!(SortKey::from_query(Some("spiciest")), SortKey::Newest);
    }

    #[test]
    fn test_vote_kind_from_param() {
        assert_eq!(VoteKind::from_param("up"), Some(VoteKind::Up));
        assert_eq!(VoteKind::from_param("down"), Some(VoteKind::Down));
        assert_eq!(VoteKind::from_param("none"), None);
        assert_eq!(VoteKind::from_param(""), None);
    }

    #[test]
    fn test_view_redacts_anonymous_author() {
        let view = GossipView::assemble(GossipWithVotes::fresh(gossip(true)), Vec::new());
        assert_eq!(view.author, "Anonymous");
        assert_eq!(view.upvotes, 0);
        assert_eq!(view.downvotes, 0);
    }

    #[test]
    fn test_view_keeps_attributed_author() {
        let view = GossipView::assemble(GossipWithVotes::fresh(gossip(false)), Vec::new());
        assert_eq!(view.author, "alice");
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = GossipView::assemble(GossipWithVotes::fresh(gossip(true)), Vec::new());
        let json = serde_json::to_value(&view).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("authorId"));
        assert!(object.contains_key("isAnonymous"));
        assert!(object.contains_key("upvotedBy"));
        assert!(object.contains_key("downvotedBy"));
        assert!(object.contains_key("createdAt"));
    }
}
