//! Request payload for the TweetScout `search-tweets` endpoint.

use crate::ast::QueryNode;
use crate::config::TweetScoutConfig;
use crate::query_builder::build_query;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SEARCH_TWEETS_PATH: &str = "search-tweets";

/// Header carrying the API key on every TweetScout request
pub const API_KEY_HEADER: &str = "ApiKey";

/// JSON body of `POST search-tweets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTweetsRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

impl SearchTweetsRequest {
    /// Compile `root` and wrap the query string in a request body.
    pub fn new(root: &QueryNode) -> Self {
        let query = build_query(root);
        debug!(kind = %root.kind(), query = %query, "built search request");
        Self {
            query,
            next_cursor: None,
        }
    }

    /// Continue a previous search from the cursor it returned.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.next_cursor = Some(cursor.into());
        self
    }

    pub fn url(&self, config: &TweetScoutConfig) -> String {
        config.endpoint(SEARCH_TWEETS_PATH)
    }

    /// The header pair the HTTP client must attach.
    pub fn auth_header(config: &TweetScoutConfig) -> (&'static str, &str) {
        (API_KEY_HEADER, config.api_key.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> QueryNode {
        QueryNode::sequence(vec![
            QueryNode::hashtag("ai"),
            QueryNode::negate(QueryNode::from_user("spambot")),
            QueryNode::min_favorites(10),
        ])
    }

    #[test]
    fn test_request_carries_compiled_query() {
        let request = SearchTweetsRequest::new(&sample_tree());
        assert_eq!(request.query, "#ai -(from:spambot) min_faves:10");
        assert_eq!(request.next_cursor, None);
    }

    #[test]
    fn test_json_omits_missing_cursor() {
        let json = SearchTweetsRequest::new(&QueryNode::word("btc")).to_json().unwrap();
        assert_eq!(json, r#"{"query":"btc"}"#);
    }

    #[test]
    fn test_json_with_cursor() {
        let request = SearchTweetsRequest::new(&QueryNode::phrase("to the moon")).with_cursor("abc");
        let value: serde_json::Value = serde_json::from_str(&request.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"query": "\"to the moon\"", "next_cursor": "abc"})
        );
    }

    #[test]
    fn test_url_and_header() {
        let config = TweetScoutConfig::new("key-123");
        let request = SearchTweetsRequest::new(&QueryNode::word("eth"));
        assert_eq!(request.url(&config), "https://api.tweetscout.io/v2/search-tweets");
        assert_eq!(SearchTweetsRequest::auth_header(&config), ("ApiKey", "key-123"));
    }
}
