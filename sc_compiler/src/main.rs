//! `sc` - interactive front end for integer arithmetic expressions
//!
//! Reads one line at a time after a prompt and prints either its tokens or
//! its expression tree with diagnostics. A blank line or end of input ends
//! the session.

use clap::Parser as ClapParser;
use sc_compiler::config::runtime::{parse_log_level, LogLevel, RuntimeConfig};
use sc_compiler::logging::{self, codes};
use sc_compiler::pipeline::{self, OutputMode, PipelineError, PipelineOptions};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(name = "sc", version, about, long_about = None)]
struct Args {
    /// Initial output mode: tokens or tree
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<OutputMode>,

    /// Print each result as a JSON document
    #[arg(long)]
    json: bool,

    /// Minimum log level written to stderr (error, warn, info, debug)
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LogLevel>,

    /// TOML file with runtime preferences
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn parse_mode(value: &str) -> Result<OutputMode, String> {
    value.parse()
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    parse_log_level(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

/// Mutable session settings
#[derive(Debug)]
struct ReplState {
    prompt: String,
    options: PipelineOptions,
    json: bool,
    render_source_context: bool,
}

impl ReplState {
    fn from_config(config: &RuntimeConfig, args: &Args) -> Self {
        let mut options = PipelineOptions::from_runtime_config(config);
        if let Some(mode) = args.mode {
            options.mode = mode;
        }

        Self {
            prompt: config.repl.prompt.clone(),
            options,
            json: args.json || config.repl.json_output,
            render_source_context: config.syntax.render_source_context,
        }
    }
}

/// Inputs the session answers itself instead of passing to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaCommand {
    Mode(OutputMode),
    Help,
}

impl MetaCommand {
    fn parse(line: &str) -> Option<Self> {
        match line {
            "#tokens" => Some(MetaCommand::Mode(OutputMode::Tokens)),
            "#tree" => Some(MetaCommand::Mode(OutputMode::Tree)),
            "#help" => Some(MetaCommand::Help),
            _ => None,
        }
    }
}

const HELP: &str = "\
Enter an expression using integers, + - * / and parentheses.
  #tokens   show the tokens of each line
  #tree     show the expression tree and diagnostics
  #help     show this message
An empty line or end of input exits.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RuntimeConfig::load(path).map_err(|error| {
            logging::safe_log_error(error.error_code(), &error.to_string());
            error
        })?,
        None => RuntimeConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.logging.min_log_level = level;
    }

    if let Err(error) = logging::config::init_runtime_preferences(config.logging.clone())
        .and_then(|_| logging::init_global_logging())
        .and_then(|_| sc_compiler::lexical::init_lexical_analysis_logging())
        .and_then(|_| sc_compiler::syntax::init_syntax_logging())
    {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &error);
        return Err(error.into());
    }

    let mut state = ReplState::from_config(&config, &args);
    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(error) = run_repl(stdin.lock(), stdout.lock(), &mut state) {
        logging::safe_log_error(error.error_code(), &error.to_string());
        return Err(error.into());
    }

    Ok(())
}

/// Prompt, read and answer lines until a blank line or end of input
fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    state: &mut ReplState,
) -> Result<(), PipelineError> {
    let mut line = String::new();

    loop {
        write!(output, "{}", state.prompt)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let text = line.trim_end_matches(&['\n', '\r'][..]);
        if text.trim().is_empty() {
            break;
        }

        match MetaCommand::parse(text) {
            Some(MetaCommand::Mode(mode)) => {
                state.options.mode = mode;
                writeln!(output, "Showing {}.", mode)?;
            }
            Some(MetaCommand::Help) => writeln!(output, "{}", HELP)?,
            None => answer_line(text, &mut output, state)?,
        }
    }

    Ok(())
}

fn answer_line<W: Write>(text: &str, output: &mut W, state: &ReplState) -> Result<(), PipelineError> {
    match pipeline::process_line(text, &state.options) {
        Ok(result) if state.json => writeln!(output, "{}", result.to_json()?)?,
        Ok(result) => {
            for rendered in result.render(state.render_source_context) {
                writeln!(output, "{}", rendered)?;
            }
        }
        // Limit violations end the line, not the session
        Err(PipelineError::LexicalAnalysis(error)) => writeln!(output, "ERROR: {}", error)?,
        Err(error) => return Err(error),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_compiler::config::compile_time::lexical::MAX_SOURCE_LENGTH;

    fn state(mode: OutputMode) -> ReplState {
        ReplState {
            prompt: "> ".to_string(),
            options: PipelineOptions::new(mode),
            json: false,
            render_source_context: true,
        }
    }

    fn run(input: &str, state: &mut ReplState) -> String {
        let mut output = Vec::new();
        run_repl(input.as_bytes(), &mut output, state).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_tokens_session() {
        let output = run("1+2\n", &mut state(OutputMode::Tokens));
        assert_eq!(
            output,
            "> NumberToken: '1' 1\nPlusToken: '+'\nNumberToken: '2' 2\n> "
        );
    }

    #[test]
    fn test_blank_line_ends_session() {
        let output = run("   \n1\n", &mut state(OutputMode::Tokens));
        assert_eq!(output, "> ");
    }

    #[test]
    fn test_mode_switching() {
        let mut session = state(OutputMode::Tokens);
        let output = run("#tree\n(3)\n", &mut session);

        assert_eq!(session.options.mode, OutputMode::Tree);
        assert!(output.contains("Showing tree."));
        assert!(output.contains("└──ParenthesizedExpression"));
    }

    #[test]
    fn test_tree_errors_are_reported() {
        let output = run("1 + $\n", &mut state(OutputMode::Tree));
        assert!(output.contains("ERROR: bad character input: '$' at position 4"));
        assert!(output.contains('^'));
    }

    #[test]
    fn test_limit_violation_continues_session() {
        let input = format!("{}\n2\n", "1".repeat(MAX_SOURCE_LENGTH + 1));
        let output = run(&input, &mut state(OutputMode::Tokens));

        assert!(output.contains("ERROR: Source too long"));
        assert!(output.contains("NumberToken: '2' 2"));
    }

    #[test]
    fn test_padded_meta_command_is_lexed() {
        let output = run(" #tree\n", &mut state(OutputMode::Tokens));
        assert!(!output.contains("Showing tree."));
        assert!(output.contains("BadToken: '#'"));
    }

    #[test]
    fn test_json_output() {
        let mut session = state(OutputMode::Tree);
        session.json = true;
        let output = run("4\n", &mut session);

        let document = output
            .trim_start_matches("> ")
            .lines()
            .next()
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(document).unwrap();
        assert_eq!(json["tree"]["root"]["kind"], "Number");
    }

    #[test]
    fn test_meta_command_parsing() {
        assert_eq!(MetaCommand::parse("#help"), Some(MetaCommand::Help));
        assert_eq!(MetaCommand::parse(" #help "), None);
        assert_eq!(MetaCommand::parse("#tree "), None);
        assert_eq!(
            MetaCommand::parse("#tokens"),
            Some(MetaCommand::Mode(OutputMode::Tokens))
        );
        assert_eq!(MetaCommand::parse("#trees"), None);
    }

    #[test]
    fn test_argument_parsing() {
        let args = Args::try_parse_from(["sc", "--mode", "tree", "--json", "--log-level", "warn"])
            .unwrap();
        assert_eq!(args.mode, Some(OutputMode::Tree));
        assert!(args.json);
        assert_eq!(args.log_level, Some(LogLevel::Warning));

        assert!(Args::try_parse_from(["sc", "--mode", "forest"]).is_err());
    }
}
