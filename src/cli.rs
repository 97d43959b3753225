use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Label given to request envelopes that omit `filename`
pub const DEFAULT_REQUEST_FILENAME: &str = "file.py";

#[derive(Parser, Debug)]
#[command(name = "debtlens")]
#[command(about = "Python code smell, quality score and refactoring analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity on stderr (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect function metrics, smells and quality scores
    Analyze {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Suggest extract-function refactorings
    Suggest {
        #[command(flatten)]
        input: InputArgs,

        /// Maximum number of suggestions (overrides the config file)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Python file to read (defaults to stdin)
    pub path: Option<PathBuf>,

    /// Display label used in parse error messages
    #[arg(long)]
    pub label: Option<String>,

    /// Config file (defaults to the nearest .debtlens.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read a JSON request envelope {"code": ..., "filename": ...} instead of raw source
    #[arg(long)]
    pub request: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl InputArgs {
    /// `--label` wins, then the envelope filename, then the input path.
    pub fn resolve_label(&self, envelope_filename: Option<&str>) -> Option<String> {
        self.label
            .clone()
            .or_else(|| envelope_filename.map(str::to_string))
            .or_else(|| self.path.as_ref().map(|p| p.display().to_string()))
    }
}

/// Request payload accepted with `--request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(default)]
    pub code: String,

    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    DEFAULT_REQUEST_FILENAME.to_string()
}

impl RequestEnvelope {
    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_defaults_filename() {
        let envelope = RequestEnvelope::parse(r#"{"code": "x = 1"}"#).unwrap();
        assert_eq!(envelope.code, "x = 1");
        assert_eq!(envelope.filename, DEFAULT_REQUEST_FILENAME);
    }

    #[test]
    fn test_envelope_rejects_non_json() {
        assert!(RequestEnvelope::parse("def f(): pass").is_err());
    }

    #[test]
    fn test_label_precedence() {
        let mut args = InputArgs {
            path: Some(PathBuf::from("src/app.py")),
            ..Default::default()
        };
        assert_eq!(args.resolve_label(None).as_deref(), Some("src/app.py"));
        assert_eq!(args.resolve_label(Some("req.py")).as_deref(), Some("req.py"));

        args.label = Some("custom".to_string());
        assert_eq!(args.resolve_label(Some("req.py")).as_deref(), Some("custom"));
    }

    #[test]
    fn test_cli_parses_suggest_with_limit() {
        let cli = Cli::try_parse_from(["debtlens", "suggest", "app.py", "--limit", "5", "--pretty"])
            .unwrap();
        match cli.command {
            Commands::Suggest { input, limit } => {
                assert_eq!(limit, Some(5));
                assert!(input.pretty);
                assert_eq!(input.path, Some(PathBuf::from("app.py")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
