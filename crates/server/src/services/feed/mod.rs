//! Feed service: the gossip lifecycle.
//!
//! Lists gossips with their comments attached, creates gossips and comments,
//! applies votes, and deletes gossips (author or administrator only, with
//! the comment cascade). Every mutation that viewers can observe is
//! announced on the broadcast channel; creation deliberately is not, which
//! mirrors the system this one replaces.

mod error;

pub use error::FeedError;

use std::collections::HashMap;

use sqlx::PgPool;

use grapevine_core::{GossipId, UserId};

use crate::db::{CommentRepository, GossipRepository, RepositoryError};
use crate::models::{
    CommentView, GossipView, GossipWithVotes, NewComment, NewGossip, Principal, SortKey, VoteKind,
    VoteTally,
};
use crate::realtime::{EventBroadcaster, FeedEvent};

/// Feed service.
pub struct FeedService<'a> {
    gossips: GossipRepository<'a>,
    comments: CommentRepository<'a>,
    events: &'a EventBroadcaster,
}

impl<'a> FeedService<'a> {
    /// Create a new feed service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, events: &'a EventBroadcaster) -> Self {
        Self {
            gossips: GossipRepository::new(pool),
            comments: CommentRepository::new(pool),
            events,
        }
    }

    /// List every gossip, sorted, with comments attached newest-first.
    ///
    /// The whole feed is materialized in one response; there is no
    /// pagination.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Repository` if the store fails.
    pub async fn list_gossips(&self, sort: SortKey) -> Result<Vec<GossipView>, FeedError> {
        let records = self.gossips.list_with_votes(sort).await?;

        let ids: Vec<GossipId> = records.iter().map(|r| r.gossip.id).collect();
        let mut comments_by_gossip: HashMap<GossipId, Vec<CommentView>> = HashMap::new();
        for comment in self.comments.list_for_gossips(&ids).await? {
            comments_by_gossip
                .entry(comment.gossip_id)
                .or_default()
                .push(CommentView::from(comment));
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let comments = comments_by_gossip
                    .remove(&record.gossip.id)
                    .unwrap_or_default();
                GossipView::assemble(record, comments)
            })
            .collect())
    }

    /// Create a gossip with empty vote sets.
    ///
    /// No event is broadcast for creation.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::EmptyContent` if the content trims to nothing.
    pub async fn create_gossip(&self, new: NewGossip) -> Result<GossipView, FeedError> {
        let content = new.content.trim().to_owned();
        if content.is_empty() {
            return Err(FeedError::EmptyContent);
        }

        let gossip = self
            .gossips
            .create(&NewGossip { content, ..new })
            .await?;

        Ok(GossipView::assemble(
            GossipWithVotes::fresh(gossip),
            Vec::new(),
        ))
    }

    /// Cast or flip a vote.
    ///
    /// Replace semantics: whatever vote the user held on this gossip is
    /// replaced by `kind`. Repeating the same vote is a no-op that still
    /// writes and still broadcasts. The updated counts are announced to all
    /// connected clients.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::GossipNotFound` if the gossip does not exist.
    pub async fn vote(
        &self,
        gossip_id: GossipId,
        user_id: UserId,
        kind: VoteKind,
    ) -> Result<VoteTally, FeedError> {
        self.gossips
            .apply_vote(gossip_id, user_id, kind)
            .await
            .map_err(not_found_as_missing_gossip)?;

        let tally = self.gossips.tally(gossip_id).await?;

        self.events.publish(&FeedEvent::GossipUpdated {
            gossip_id,
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
        });

        Ok(tally)
    }

    /// Add a comment to a gossip.
    ///
    /// The insert is guarded by the gossip foreign key, so commenting on a
    /// gossip deleted in the meantime fails instead of creating an orphan.
    /// Clients are told only which gossip changed; they refetch.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::EmptyContent` if the content trims to nothing.
    /// Returns `FeedError::GossipNotFound` if the gossip does not exist.
    pub async fn add_comment(
        &self,
        gossip_id: GossipId,
        new: NewComment,
    ) -> Result<CommentView, FeedError> {
        let content = new.content.trim().to_owned();
        if content.is_empty() {
            return Err(FeedError::EmptyContent);
        }

        let comment = self
            .comments
            .create(gossip_id, &NewComment { content, ..new })
            .await
            .map_err(not_found_as_missing_gossip)?;

        self.events
            .publish(&FeedEvent::GossipCommentAdded { gossip_id });

        Ok(CommentView::from(comment))
    }

    /// Delete a gossip and all of its comments.
    ///
    /// Only the author or the administrator may delete; the check is the
    /// principal's `can_delete` capability. The cascade is one transaction.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::GossipNotFound` if the gossip does not exist.
    /// Returns `FeedError::NotAuthorized` if the principal may not delete it.
    pub async fn delete_gossip(
        &self,
        gossip_id: GossipId,
        principal: &Principal,
    ) -> Result<(), FeedError> {
        let gossip = self
            .gossips
            .get_by_id(gossip_id)
            .await?
            .ok_or(FeedError::GossipNotFound)?;

        if !principal.can_delete(&gossip) {
            tracing::warn!(
                gossip = %gossip_id,
                requester = %principal.id(),
                "refused gossip deletion"
            );
            return Err(FeedError::NotAuthorized);
        }

        self.gossips.delete_with_comments(gossip_id).await?;

        tracing::info!(gossip = %gossip_id, requester = %principal.id(), "gossip deleted");

        self.events.publish(&FeedEvent::GossipDeleted { gossip_id });

        Ok(())
    }
}

fn not_found_as_missing_gossip(e: RepositoryError) -> FeedError {
    match e {
        RepositoryError::NotFound => FeedError::GossipNotFound,
        other => FeedError::Repository(other),
    }
}
