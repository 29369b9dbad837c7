//! Generic traversal over query trees.
//!
//! [`Walker`] requires one handler per node variant, so an incomplete walker
//! is rejected at compile time. [`TryWalker`] is the fallible counterpart for
//! walkers that only understand part of the tree: every handler defaults to
//! [`WalkError::MissingHandler`].

use crate::ast::{
    And, FromUser, Hashtag, MentionUser, MinFavorites, MinReplies, MinRetweets, Negate, NodeKind,
    Phrase, QueryNode, Sequence, SinceId, SinceTime, UntilId, UntilTime, Word,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("no handler for node variant '{kind}'")]
    MissingHandler { kind: NodeKind },
}

/// Double dispatch from a node variant to the matching `visit_*` handler.
pub trait Walker<R> {
    /// Dispatch `node` to its handler and return the handler's result.
    fn walk(&mut self, node: &QueryNode) -> R {
        match node {
            QueryNode::Word(n) => self.visit_word(n),
            QueryNode::Phrase(n) => self.visit_phrase(n),
            QueryNode::Hashtag(n) => self.visit_hashtag(n),
            QueryNode::FromUser(n) => self.visit_from_user(n),
            QueryNode::MentionUser(n) => self.visit_mention_user(n),
            QueryNode::Sequence(n) => self.visit_sequence(n),
            QueryNode::Negate(n) => self.visit_negate(n),
            QueryNode::And(n) => self.visit_and(n),
            QueryNode::MinRetweets(n) => self.visit_min_retweets(n),
            QueryNode::MinFavorites(n) => self.visit_min_favorites(n),
            QueryNode::MinReplies(n) => self.visit_min_replies(n),
            QueryNode::SinceId(n) => self.visit_since_id(n),
            QueryNode::UntilId(n) => self.visit_until_id(n),
            QueryNode::SinceTime(n) => self.visit_since_time(n),
            QueryNode::UntilTime(n) => self.visit_until_time(n),
        }
    }

    fn visit_word(&mut self, node: &Word) -> R;
    fn visit_phrase(&mut self, node: &Phrase) -> R;
    fn visit_hashtag(&mut self, node: &Hashtag) -> R;
    fn visit_from_user(&mut self, node: &FromUser) -> R;
    fn visit_mention_user(&mut self, node: &MentionUser) -> R;
    fn visit_sequence(&mut self, node: &Sequence) -> R;
    fn visit_negate(&mut self, node: &Negate) -> R;
    fn visit_and(&mut self, node: &And) -> R;
    fn visit_min_retweets(&mut self, node: &MinRetweets) -> R;
    fn visit_min_favorites(&mut self, node: &MinFavorites) -> R;
    fn visit_min_replies(&mut self, node: &MinReplies) -> R;
    fn visit_since_id(&mut self, node: &SinceId) -> R;
    fn visit_until_id(&mut self, node: &UntilId) -> R;
    fn visit_since_time(&mut self, node: &SinceTime) -> R;
    fn visit_until_time(&mut self, node: &UntilTime) -> R;
}

fn missing<R>(kind: NodeKind) -> Result<R, WalkError> {
    Err(WalkError::MissingHandler { kind })
}

/// Fallible walker where any handler may be left out.
///
/// Reaching a variant without an overridden handler fails the whole walk;
/// composite handlers are expected to propagate child errors with `?`.
pub trait TryWalker<R> {
    fn try_walk(&mut self, node: &QueryNode) -> Result<R, WalkError> {
        match node {
            QueryNode::Word(n) => self.try_visit_word(n),
            QueryNode::Phrase(n) => self.try_visit_phrase(n),
            QueryNode::Hashtag(n) => self.try_visit_hashtag(n),
            QueryNode::FromUser(n) => self.try_visit_from_user(n),
            QueryNode::MentionUser(n) => self.try_visit_mention_user(n),
            QueryNode::Sequence(n) => self.try_visit_sequence(n),
            QueryNode::Negate(n) => self.try_visit_negate(n),
            QueryNode::And(n) => self.try_visit_and(n),
            QueryNode::MinRetweets(n) => self.try_visit_min_retweets(n),
            QueryNode::MinFavorites(n) => self.try_visit_min_favorites(n),
            QueryNode::MinReplies(n) => self.try_visit_min_replies(n),
            QueryNode::SinceId(n) => self.try_visit_since_id(n),
            QueryNode::UntilId(n) => self.try_visit_until_id(n),
            QueryNode::SinceTime(n) => self.try_visit_since_time(n),
            QueryNode::UntilTime(n) => self.try_visit_until_time(n),
        }
    }

    fn try_visit_word(&mut self, _node: &Word) -> Result<R, WalkError> {
        missing(NodeKind::Word)
    }

    fn try_visit_phrase(&mut self, _node: &Phrase) -> Result<R, WalkError> {
        missing(NodeKind::Phrase)
    }

    fn try_visit_hashtag(&mut self, _node: &Hashtag) -> Result<R, WalkError> {
        missing(NodeKind::Hashtag)
    }

    fn try_visit_from_user(&mut self, _node: &FromUser) -> Result<R, WalkError> {
        missing(NodeKind::FromUser)
    }

    fn try_visit_mention_user(&mut self, _node: &MentionUser) -> Result<R, WalkError> {
        missing(NodeKind::MentionUser)
    }

    fn try_visit_sequence(&mut self, _node: &Sequence) -> Result<R, WalkError> {
        missing(NodeKind::Sequence)
    }

    fn try_visit_negate(&mut self, _node: &Negate) -> Result<R, WalkError> {
        missing(NodeKind::Negate)
    }

    fn try_visit_and(&mut self, _node: &And) -> Result<R, WalkError> {
        missing(NodeKind::And)
    }

    fn try_visit_min_retweets(&mut self, _node: &MinRetweets) -> Result<R, WalkError> {
        missing(NodeKind::MinRetweets)
    }

    fn try_visit_min_favorites(&mut self, _node: &MinFavorites) -> Result<R, WalkError> {
        missing(NodeKind::MinFavorites)
    }

    fn try_visit_min_replies(&mut self, _node: &MinReplies) -> Result<R, WalkError> {
        missing(NodeKind::MinReplies)
    }

    fn try_visit_since_id(&mut self, _node: &SinceId) -> Result<R, WalkError> {
        missing(NodeKind::SinceId)
    }

    fn try_visit_until_id(&mut self, _node: &UntilId) -> Result<R, WalkError> {
        missing(NodeKind::UntilId)
    }

    fn try_visit_since_time(&mut self, _node: &SinceTime) -> Result<R, WalkError> {
        missing(NodeKind::SinceTime)
    }

    fn try_visit_until_time(&mut self, _node: &UntilTime) -> Result<R, WalkError> {
        missing(NodeKind::UntilTime)
    }
}
