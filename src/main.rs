use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweetscout_query::config::{TweetScoutConfig, DEFAULT_BASE_URL};
use tweetscout_query::request::{SearchTweetsRequest, API_KEY_HEADER, SEARCH_TWEETS_PATH};
use tweetscout_query::{build_query, QueryNode};

const CONFIG_FILE: &str = "tweetscout.json";

const HELP: &str = r#"输入一行 JSON 查询树，输出 TweetScout 查询字符串。
例如: {"type": "sequence", "operands": [{"type": "hashtag", "value": {"value": "ai"}}, {"type": "min_favorites", "value": 10}]}

命令:
  :request <json>   输出 search-tweets 请求体和地址
  :cursor [value]   设置 (或清除) :request 使用的分页游标
  :help             显示帮助
  :quit             退出"#;

/// REPL 单行输入的执行结果
#[derive(Debug, PartialEq)]
enum Outcome {
    Print(String),
    Quit,
    Nothing,
}

/// REPL 会话状态
struct Session {
    config: Option<TweetScoutConfig>,
    cursor: Option<String>,
}

impl Session {
    fn new(config: Option<TweetScoutConfig>) -> Self {
        Self { config, cursor: None }
    }

    fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Outcome::Nothing);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            ":quit" | ":q" => Ok(Outcome::Quit),
            ":help" => Ok(Outcome::Print(HELP.to_string())),
            ":cursor" => {
                self.cursor = (!rest.is_empty()).then(|| rest.to_string());
                Ok(Outcome::Print(match &self.cursor {
                    Some(cursor) => format!("游标: {}", cursor),
                    None => "游标已清除".to_string(),
                }))
            }
            ":request" => self.render_request(&parse_tree(rest)?).map(Outcome::Print),
            c if c.starts_with(':') => anyhow::bail!("未知命令: {} (输入 :help 查看帮助)", c),
            _ => Ok(Outcome::Print(build_query(&parse_tree(line)?))),
        }
    }

    fn render_request(&self, tree: &QueryNode) -> Result<String> {
        let mut request = SearchTweetsRequest::new(tree);
        if let Some(cursor) = &self.cursor {
            request = request.with_cursor(cursor.clone());
        }
        let body = request.to_json().context("无法序列化请求体")?;

        let (url, key_status) = match &self.config {
            Some(config) => (request.url(config), "<已配置>"),
            None => (
                format!("{}{}", DEFAULT_BASE_URL, SEARCH_TWEETS_PATH),
                "<未配置>",
            ),
        };

        Ok(format!(
            "POST {}\n{}: {}\n{}",
            url, API_KEY_HEADER, key_status, body
        ))
    }
}

fn parse_tree(json: &str) -> Result<QueryNode> {
    serde_json::from_str(json).context("无法解析 JSON 查询树")
}

/// 读取 JSON 查询树文件并编译
fn compile_file(path: &str) -> Result<String> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("无法读取文件 {}", path))?;
    Ok(build_query(&parse_tree(&content)?))
}

fn run_file(path: &str) -> Result<()> {
    println!("{}", compile_file(path)?);
    Ok(())
}

fn run_repl(config: Option<TweetScoutConfig>) -> Result<()> {
    println!("--- TweetScout 查询编译器 (输入 :help 查看帮助) ---");

    let mut session = Session::new(config);
    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                match session.execute(&line) {
                    Ok(Outcome::Print(text)) => println!("{}", text),
                    Ok(Outcome::Quit) => break,
                    Ok(Outcome::Nothing) => {}
                    Err(e) => println!("✗ {:#}", e),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tweetscout_query=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = std::env::args().nth(1) {
        return run_file(&path);
    }

    // 编译查询不依赖配置, 只有 :request 需要
    let config = match TweetScoutConfig::load(CONFIG_FILE) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "no TweetScout config, :request will use defaults");
            None
        }
    };

    run_repl(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn print(outcome: Outcome) -> String {
        match outcome {
            Outcome::Print(text) => text,
            other => panic!("Expected printed output, got {:?}", other),
        }
    }

    #[test]
    fn test_compiles_json_line() {
        let mut session = Session::new(None);
        let line = r#"{"type": "and", "left": {"type": "word", "value": "a"}, "right": {"type": "mention_user", "mention": {"value": "b"}}}"#;
        assert_eq!(print(session.execute(line).unwrap()), "(a) AND (@b)");
    }

    #[test]
    fn test_request_uses_config_and_cursor() {
        let mut session = Session::new(Some(TweetScoutConfig::new("k")));
        session.execute(":cursor next-page").unwrap();

        let output = print(
            session
                .execute(r#":request {"type": "min_replies", "value": 3}"#)
                .unwrap(),
        );
        assert_eq!(
            output,
            "POST https://api.tweetscout.io/v2/search-tweets\nApiKey: <已配置>\n{\"query\":\"min_replies:3\",\"next_cursor\":\"next-page\"}"
        );
    }

    #[test]
    fn test_request_without_config() {
        let mut session = Session::new(None);
        let output = print(
            session
                .execute(r#":request {"type": "word", "value": "x"}"#)
                .unwrap(),
        );
        assert!(output.contains("<未配置>"));
        assert!(output.starts_with("POST https://api.tweetscout.io/v2/search-tweets"));
    }

    #[test]
    fn test_control_commands() {
        let mut session = Session::new(None);
        assert_eq!(session.execute("   ").unwrap(), Outcome::Nothing);
        assert_eq!(session.execute(":quit").unwrap(), Outcome::Quit);
        assert_eq!(print(session.execute(":cursor").unwrap()), "游标已清除");
        assert!(session.execute(":unknown").is_err());
    }

    #[test]
    fn test_compile_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"type": "sequence", "operands": [
                {{"type": "hashtag", "value": {{"value": "ai"}}}},
                {{"type": "negate", "operand": {{"type": "word", "value": "spam"}}}},
                {{"type": "min_favorites", "value": 10}}
            ]}}"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        assert_eq!(compile_file(path).unwrap(), "#ai -(spam) min_faves:10");
    }

    #[test]
    fn test_compile_file_errors() {
        assert!(compile_file("non_existent_tree.json").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"type":"hashtag","value":{{"type":"phrase","value":"to the moon"}}}}"#
        )
        .unwrap();
        assert!(compile_file(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_non_word_child_is_rejected() {
        let mut session = Session::new(None);
        let line = r#"{"type":"hashtag","value":{"type":"phrase","value":"to the moon"}}"#;
        assert!(session.execute(line).is_err());
        assert!(session.execute(&format!(":request {}", line)).is_err());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut session = Session::new(None);
        assert!(session.execute("{not json").is_err());
        assert!(session.execute(r#"{"type": "or"}"#).is_err());
    }
}
