//! 查询树的节点定义
//!
//! 每种节点都是一个独立的结构体, `QueryNode` 是它们的封闭枚举。
//! 子节点通过 `Box` / `Vec` 独占持有, 树构建后不再修改。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 查询树中的任意节点
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryNode {
    Word(Word),
    Phrase(Phrase),
    Hashtag(Hashtag),
    FromUser(FromUser),
    MentionUser(MentionUser),
    Sequence(Sequence),
    Negate(Negate),
    And(And),
    MinRetweets(MinRetweets),
    MinFavorites(MinFavorites),
    MinReplies(MinReplies),
    SinceId(SinceId),
    UntilId(UntilId),
    SinceTime(SinceTime),
    UntilTime(UntilTime),
}

/// 可以作为组合节点子节点的任意节点
pub type Operand = QueryNode;

/// 单个搜索词, 例如：`bitcoin`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Word {
    pub value: String,
}

/// 带引号的短语, 例如：`"hello world"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Phrase {
    pub value: String,
}

/// 话题标签, 子节点只能是 `Word`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hashtag {
    pub value: Word,
}

/// 限定作者, 例如：`from:elonmusk`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FromUser {
    pub from_user: Word,
}

/// 限定被提及的用户, 例如：`@elonmusk`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MentionUser {
    pub mention: Word,
}

/// 按顺序并列的多个操作数 (隐式 AND)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sequence {
    pub operands: Vec<Operand>,
}

/// 逻辑非
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Negate {
    pub operand: Box<Operand>,
}

/// 显式的逻辑与
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct And {
    pub left: Box<Operand>,
    pub right: Box<Operand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinRetweets {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinFavorites {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MinReplies {
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinceId {
    pub tweet_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UntilId {
    pub tweet_id: String,
}

/// 时间下界 (unix 秒)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SinceTime {
    pub timestamp: i64,
}

/// 时间上界 (unix 秒)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UntilTime {
    pub timestamp: i64,
}

/// 节点种类, 用于错误信息和日志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Word,
    Phrase,
    Hashtag,
    FromUser,
    MentionUser,
    Sequence,
    Negate,
    And,
    MinRetweets,
    MinFavorites,
    MinReplies,
    SinceId,
    UntilId,
    SinceTime,
    UntilTime,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Word => "word",
            NodeKind::Phrase => "phrase",
            NodeKind::Hashtag => "hashtag",
            NodeKind::FromUser => "from_user",
            NodeKind::MentionUser => "mention_user",
            NodeKind::Sequence => "sequence",
            NodeKind::Negate => "negate",
            NodeKind::And => "and",
            NodeKind::MinRetweets => "min_retweets",
            NodeKind::MinFavorites => "min_favorites",
            NodeKind::MinReplies => "min_replies",
            NodeKind::SinceId => "since_id",
            NodeKind::UntilId => "until_id",
            NodeKind::SinceTime => "since_time",
            NodeKind::UntilTime => "until_time",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Word {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

impl QueryNode {
    /// 返回节点的种类
    pub fn kind(&self) -> NodeKind {
        match self {
            QueryNode::Word(_) => NodeKind::Word,
            QueryNode::Phrase(_) => NodeKind::Phrase,
            QueryNode::Hashtag(_) => NodeKind::Hashtag,
            QueryNode::FromUser(_) => NodeKind::FromUser,
            QueryNode::MentionUser(_) => NodeKind::MentionUser,
            QueryNode::Sequence(_) => NodeKind::Sequence,
            QueryNode::Negate(_) => NodeKind::Negate,
            QueryNode::And(_) => NodeKind::And,
            QueryNode::MinRetweets(_) => NodeKind::MinRetweets,
            QueryNode::MinFavorites(_) => NodeKind::MinFavorites,
            QueryNode::MinReplies(_) => NodeKind::MinReplies,
            QueryNode::SinceId(_) => NodeKind::SinceId,
            QueryNode::UntilId(_) => NodeKind::UntilId,
            QueryNode::SinceTime(_) => NodeKind::SinceTime,
            QueryNode::UntilTime(_) => NodeKind::UntilTime,
        }
    }

    pub fn word(value: impl Into<String>) -> Self {
        QueryNode::Word(Word::new(value))
    }

    pub fn phrase(value: impl Into<String>) -> Self {
        QueryNode::Phrase(Phrase { value: value.into() })
    }

    pub fn hashtag(value: impl Into<String>) -> Self {
        QueryNode::Hashtag(Hashtag { value: Word::new(value) })
    }

    pub fn from_user(handle: impl Into<String>) -> Self {
        QueryNode::FromUser(FromUser { from_user: Word::new(handle) })
    }

    pub fn mention(handle: impl Into<String>) -> Self {
        QueryNode::MentionUser(MentionUser { mention: Word::new(handle) })
    }

    pub fn sequence(operands: Vec<Operand>) -> Self {
        QueryNode::Sequence(Sequence { operands })
    }

    pub fn negate(operand: Operand) -> Self {
        QueryNode::Negate(Negate { operand: Box::new(operand) })
    }

    pub fn and(left: Operand, right: Operand) -> Self {
        QueryNode::And(And {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn min_retweets(value: i64) -> Self {
        QueryNode::MinRetweets(MinRetweets { value })
    }

    pub fn min_favorites(value: i64) -> Self {
        QueryNode::MinFavorites(MinFavorites { value })
    }

    pub fn min_replies(value: i64) -> Self {
        QueryNode::MinReplies(MinReplies { value })
    }

    pub fn since_id(tweet_id: impl Into<String>) -> Self {
        QueryNode::SinceId(SinceId { tweet_id: tweet_id.into() })
    }

    pub fn until_id(tweet_id: impl Into<String>) -> Self {
        QueryNode::UntilId(UntilId { tweet_id: tweet_id.into() })
    }

    pub fn since_time(timestamp: i64) -> Self {
        QueryNode::SinceTime(SinceTime { timestamp })
    }

    pub fn until_time(timestamp: i64) -> Self {
        QueryNode::UntilTime(UntilTime { timestamp })
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for QueryNode {
                fn from(node: $variant) -> Self {
                    QueryNode::$variant(node)
                }
            }
        )*
    };
}

impl_from_variant!(
    Word,
    Phrase,
    Hashtag,
    FromUser,
    MentionUser,
    Sequence,
    Negate,
    And,
    MinRetweets,
    MinFavorites,
    MinReplies,
    SinceId,
    UntilId,
    SinceTime,
    UntilTime,
);
