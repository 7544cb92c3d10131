use clap::{Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(name = "pathway")]
#[command(about = "Client for the pathway processing service", long_about = None)]
pub struct Args {
    /// Service base URL
    #[arg(long, env = "PATHWAY_API_URL", default_value = "http://localhost:8080")]
    pub service_url: String,

    /// API key sent as `Authorization: Bearer`
    #[arg(long, env = "PATHWAY_API_KEY")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check service health
    Health,
    /// Submit data for processing
    Process {
        /// Input as JSON; anything that does not parse is sent as a string
        #[arg(long)]
        input: String,

        /// Pipeline label
        #[arg(long)]
        pipeline: Option<String>,
    },
    /// Run a query
    Query {
        query: String,

        /// Context object as JSON
        #[arg(long, value_parser = parse_object)]
        context: Option<Map<String, Value>>,

        /// Query parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, Value)>,
    },
}

/// Parse a JSON literal, falling back to a plain string.
pub fn parse_loose_json(s: &str) -> Value {
    serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.to_string()))
}

fn parse_object(s: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(s) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn parse_key_value(s: &str) -> Result<(String, Value), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err("parameter key must not be empty".to_string());
    }
    Ok((k.to_string(), parse_loose_json(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_loose_json() {
        assert_eq!(parse_loose_json("[1,2]"), json!([1, 2]));
        assert_eq!(parse_loose_json("3"), json!(3));
        assert_eq!(parse_loose_json("plain text"), json!("plain text"));
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("limit=5").unwrap(),
            ("limit".to_string(), json!(5))
        );
        assert_eq!(
            parse_key_value("tag=a=b").unwrap(),
            ("tag".to_string(), json!("a=b"))
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=1").is_err());
    }

    #[test]
    fn test_query_command() {
        let args = Args::try_parse_from([
            "pathway",
            "--service-url",
            "http://svc:9000",
            "query",
            "hello",
            "--context",
            r#"{"doc": 1}"#,
            "--param",
            "k=v",
        ])
        .unwrap();

        assert_eq!(args.service_url, "http://svc:9000");
        match args.command {
            Command::Query {
                query,
                context,
                params,
            } => {
                assert_eq!(query, "hello");
                assert_eq!(context.unwrap().get("doc"), Some(&json!(1)));
                assert_eq!(params, vec![("k".to_string(), json!("v"))]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_context_must_be_object() {
        assert!(Args::try_parse_from(["pathway", "query", "q", "--context", "[1]"]).is_err());
    }
}
