//! Query builder that compiles a query tree into TweetScout search syntax.

use crate::ast::{
    And, FromUser, Hashtag, MentionUser, MinFavorites, MinReplies, MinRetweets, Negate, Phrase,
    QueryNode, Sequence, SinceId, SinceTime, UntilId, UntilTime, Word,
};
use crate::walker::Walker;
use std::fmt;

/// Walker that emits the TweetScout query string for a tree.
///
/// Values are emitted verbatim: nothing is escaped or reordered.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl Walker<String> for QueryBuilder {
    fn visit_word(&mut self, node: &Word) -> String {
        node.value.clone()
    }

    fn visit_phrase(&mut self, node: &Phrase) -> String {
        format!("\"{}\"", node.value)
    }

    fn visit_hashtag(&mut self, node: &Hashtag) -> String {
        format!("#{}", self.visit_word(&node.value))
    }

    fn visit_from_user(&mut self, node: &FromUser) -> String {
        format!("from:{}", node.from_user.value)
    }

    fn visit_mention_user(&mut self, node: &MentionUser) -> String {
        format!("@{}", node.mention.value)
    }

    /// Juxtaposition is an implicit AND; an empty sequence yields `""`.
    fn visit_sequence(&mut self, node: &Sequence) -> String {
        node.operands
            .iter()
            .map(|op| self.walk(op))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn visit_negate(&mut self, node: &Negate) -> String {
        format!("-({})", self.walk(&node.operand))
    }

    fn visit_and(&mut self, node: &And) -> String {
        let left = self.walk(&node.left);
        let right = self.walk(&node.right);
        format!("({}) AND ({})", left, right)
    }

    fn visit_min_retweets(&mut self, node: &MinRetweets) -> String {
        format!("min_retweets:{}", node.value)
    }

    fn visit_min_favorites(&mut self, node: &MinFavorites) -> String {
        format!("min_faves:{}", node.value)
    }

    fn visit_min_replies(&mut self, node: &MinReplies) -> String {
        format!("min_replies:{}", node.value)
    }

    fn visit_since_id(&mut self, node: &SinceId) -> String {
        format!("since_id:{}", node.tweet_id)
    }

    fn visit_until_id(&mut self, node: &UntilId) -> String {
        format!("until_id:{}", node.tweet_id)
    }

    fn visit_since_time(&mut self, node: &SinceTime) -> String {
        format!("since_time:{}", node.timestamp)
    }

    fn visit_until_time(&mut self, node: &UntilTime) -> String {
        format!("until_time:{}", node.timestamp)
    }
}

/// Compile a query tree into the TweetScout query string.
pub fn build_query(root: &QueryNode) -> String {
    QueryBuilder::new().walk(root)
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&build_query(self))
    }
}
