pub mod ast;
pub mod walker;
pub mod query_builder;
pub mod config;
pub mod request;

pub use ast::{NodeKind, Operand, QueryNode};
pub use query_builder::{build_query, QueryBuilder};
pub use walker::{TryWalker, WalkError, Walker};
