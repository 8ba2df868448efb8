use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use argsparser::{first_bundle, Opt, ParseOutcome, Parser};

use crate::error::{DemoError, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cmdline {
    pub verbose: bool,
    pub strict: bool,
    pub name: Option<String>,
    pub range: Option<(i64, i64)>,
    pub tags: Vec<String>,
    pub out: Option<PathBuf>,
    pub words: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Cmdline),
    Help,
}

const PROGRAM_INFO: &str = concat!("argsdemo ", env!("CARGO_PKG_VERSION"));
const USAGE: &str = "Usage: argsdemo [OPTION]... [WORD]...";
const PREAMBLE: &str = "Collect options and words and print what was understood.";
const CONCLUSION: &str = "Short flags may be bundled: -vs is -v -s.";

// Lower runs first. Whether --name is required is settled before the parse,
// in wants_strict.
const PRIORITY_STRICT: i32 = 0;
const PRIORITY_VERBOSE: i32 = 1;
const PRIORITY_NAME: i32 = 2;
const PRIORITY_RANGE: i32 = 3;
const PRIORITY_TAGS: i32 = 4;
const PRIORITY_OUT: i32 = 5;

/// State shared between the option handlers during one parse.
#[derive(Default)]
struct Collected {
    cmdline: Cmdline,
    stray: Option<String>,
}

fn build_parser(state: &Rc<RefCell<Collected>>) -> Parser {
    let verbose = state.clone();
    let strict = state.clone();
    let name = state.clone();
    let range = state.clone();
    let tags = state.clone();
    let out = state.clone();
    let words = state.clone();

    Parser::builder("argsdemo")
        .program_info(PROGRAM_INFO)
        .usage(USAGE)
        .preamble(PREAMBLE)
        .conclusion(CONCLUSION)
        .description_indent(16)
        .positional(move |rest: &[String]| {
            let mut st = words.borrow_mut();
            if let Some(unknown) = rest.iter().find(|w| w.starts_with('-')) {
                st.stray = Some(unknown.clone());
                return false;
            }
            st.cmdline.words = rest.to_vec();
            true
        })
        .option(
            Opt::flag("-s", "--strict", move || {
                strict.borrow_mut().cmdline.strict = true;
                true
            })
            .description("Require --name")
            .priority(PRIORITY_STRICT),
        )
        .option(
            Opt::flag("-v", "--verbose", move || {
                verbose.borrow_mut().cmdline.verbose = true;
                true
            })
            .description("Print every field, even empty ones")
            .priority(PRIORITY_VERBOSE),
        )
        .option(
            Opt::single("-n", "--name", move |value| {
                if value.is_empty() {
                    return false;
                }
                name.borrow_mut().cmdline.name = Some(value.to_string());
                true
            })
            .description("Name to report")
            .usage("Usage: --name NAME")
            .priority(PRIORITY_NAME),
        )
        .option(
            Opt::fixed("-r", "--range", 2, move |params: &[String]| {
                match parse_range(&params[0], &params[1]) {
                    Some(r) => {
                        range.borrow_mut().cmdline.range = Some(r);
                        true
                    }
                    None => false,
                }
            })
            .description("Inclusive integer range FROM TO")
            .usage("Usage: --range FROM TO (integers, FROM <= TO)")
            .priority(PRIORITY_RANGE),
        )
        .option(
            Opt::variable("-t", "--tags", move |params: &[String]| {
                tags.borrow_mut().cmdline.tags.extend_from_slice(params);
                true
            })
            .description("Tags, up to the next option")
            .priority(PRIORITY_TAGS),
        )
        .option(
            Opt::single("-o", "--out", move |value| {
                out.borrow_mut().cmdline.out = Some(PathBuf::from(value));
                true
            })
            .description("Write the report to FILE")
            .usage("Usage: --out FILE")
            .priority(PRIORITY_OUT),
        )
        .build()
}

fn parse_range(from: &str, to: &str) -> Option<(i64, i64)> {
    let from: i64 = from.parse().ok()?;
    let to: i64 = to.parse().ok()?;
    if from > to {
        return None;
    }
    Some((from, to))
}

/// `--strict` turns `--name` into a required option. Decided on the raw
/// arguments, before any option runs, so only the bundle the parser will
/// actually expand counts.
fn wants_strict(args: &[String]) -> bool {
    let literal = args.iter().any(|a| a == "-s" || a == "--strict");
    let bundled = first_bundle(args).is_some_and(|b| b[1..].contains('s'));
    literal || bundled
}

pub fn parse(args: Vec<String>) -> Result<Command> {
    let state = Rc::new(RefCell::new(Collected::default()));
    let mut parser = build_parser(&state);

    if wants_strict(&args) {
        if let Some(opt) = parser.option_mut("--name") {
            opt.set_required(true);
        }
    }

    let outcome = parser.parse_args(args);
    match outcome {
        ParseOutcome::Ok => {
            let collected = state.replace(Collected::default());
            Ok(Command::Run(collected.cmdline))
        }
        ParseOutcome::HelpRequested => Ok(Command::Help),
        _ => Err(usage_error(&parser, outcome, state.borrow().stray.as_deref())),
    }
}

fn usage_error(parser: &Parser, outcome: ParseOutcome, stray: Option<&str>) -> DemoError {
    let message = match (outcome, parser.bad_option()) {
        (ParseOutcome::MissingRequiredOptions, Some(opt)) => {
            format!("{}: missing required option {}", parser.name(), opt.name())
        }
        (ParseOutcome::InvalidOptionParams, Some(opt)) => opt.error_message(&format!(
            "{}: not enough parameters",
            parser.name()
        )),
        (ParseOutcome::InvalidOption, Some(opt)) => opt.error_message(&format!(
            "{}: invalid parameters",
            parser.name()
        )),
        (ParseOutcome::InvalidParams, _) => match stray {
            Some(token) => format!("{}: unknown option {}", parser.name(), token),
            None => format!("{}: {}", parser.name(), outcome),
        },
        _ => format!("{}: {}", parser.name(), outcome),
    };
    DemoError::Usage { outcome, message }
}

/// Report of a parsed command line, one `key: value` per line.
pub fn render(cmdline: &Cmdline) -> String {
    let mut out = String::new();
    let verbose = cmdline.verbose;

    let mut line = |key: &str, value: String| {
        if verbose || !value.is_empty() {
            out.push_str(&format!("{}: {}\n", key, value));
        }
    };
    line("strict", if cmdline.strict { "yes".into() } else { String::new() });
    line("name", cmdline.name.clone().unwrap_or_default());
    line(
        "range",
        cmdline
            .range
            .map(|(a, b)| format!("{}..={}", a, b))
            .unwrap_or_default(),
    );
    line("tags", cmdline.tags.join(", "));
    line("words", cmdline.words.join(" "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn run(s: &str) -> Cmdline {
        match parse(argv(s)).unwrap() {
            Command::Run(c) => c,
            Command::Help => panic!("unexpected help"),
        }
    }

    fn usage_outcome(s: &str) -> (ParseOutcome, String) {
        match parse(argv(s)).unwrap_err() {
            DemoError::Usage { outcome, message } => (outcome, message),
            other => panic!("unexpected error {other}"),
        }
    }

    // -- success paths --

    #[test]
    fn collects_everything() {
        let c = run("w1 -n alice -r 1 5 w2 -t a b c -v");
        assert_eq!(
            c,
            Cmdline {
                verbose: true,
                strict: false,
                name: Some("alice".into()),
                range: Some((1, 5)),
                tags: argv("a b c"),
                out: None,
                words: argv("w1 w2"),
            }
        );
    }

    #[test]
    fn empty_command_line_is_fine() {
        assert_eq!(run(""), Cmdline::default());
    }

    #[test]
    fn bundled_flags() {
        let c = run("-vs --name bob");
        assert!(c.verbose);
        assert!(c.strict);
        assert_eq!(c.name.as_deref(), Some("bob"));
    }

    #[test]
    fn tags_may_be_empty() {
        let c = run("-t -v");
        assert!(c.tags.is_empty());
        assert!(c.verbose);
    }

    #[test]
    fn help_wins_over_words() {
        assert_eq!(parse(argv("word --help")).unwrap(), Command::Help);
    }

    // -- failures --

    #[test]
    fn strict_requires_name() {
        let (outcome, message) = usage_outcome("--strict w");
        assert_eq!(outcome, ParseOutcome::MissingRequiredOptions);
        assert_eq!(message, "argsdemo: missing required option --name");
    }

    #[test]
    fn short_range() {
        let (outcome, message) = usage_outcome("-r 1");
        assert_eq!(outcome, ParseOutcome::InvalidOptionParams);
        assert!(message.starts_with("Error with --range!"), "{}", message);
        assert!(message.ends_with("Usage: --range FROM TO (integers, FROM <= TO)"));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let (outcome, _) = usage_outcome("-r 9 2");
        assert_eq!(outcome, ParseOutcome::InvalidOption);
    }

    #[test]
    fn unknown_option_is_reported() {
        let (outcome, message) = usage_outcome("w --bogus");
        assert_eq!(outcome, ParseOutcome::InvalidParams);
        assert_eq!(message, "argsdemo: unknown option --bogus");
    }

    // -- helpers --

    #[test]
    fn strict_detection() {
        assert!(wants_strict(&argv("-s")));
        assert!(wants_strict(&argv("x --strict")));
        assert!(wants_strict(&argv("-vs")));
        assert!(!wants_strict(&argv("--tags s")));
        assert!(!wants_strict(&argv("--say")));
        assert!(!wants_strict(&argv("-vx -sv")));
        assert!(wants_strict(&argv("-sv -vx")));
    }

    #[test]
    fn strict_in_unexpanded_bundle_is_a_stray() {
        let (outcome, message) = usage_outcome("-vx -sv");
        assert_eq!(outcome, ParseOutcome::InvalidParams);
        assert_eq!(message, "argsdemo: unknown option -sv");
    }

    #[test]
    fn render_skips_empty_fields_unless_verbose() {
        let c = Cmdline {
            name: Some("alice".into()),
            words: argv("a b"),
            ..Default::default()
        };
        assert_eq!(render(&c), "name: alice\nwords: a b\n");

        let c = Cmdline {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(
            render(&c),
            "strict: \nname: \nrange: \ntags: \nwords: \n"
        );
    }
}
