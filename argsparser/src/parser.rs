//! The parsing engine: owns the registered options, expands bundled short
//! flags, applies options in priority order and hands whatever is left to
//! the positional handler.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::help::HelpSections;
use crate::option::{Opt, OPTION_PREFIX};
use crate::outcome::ParseOutcome;

pub type PositionalHandler = Box<dyn FnMut(&[String]) -> bool>;

const HELP_SHORT: &str = "-h";
const HELP_FULL: &str = "--help";

// ============================================================================
// ParserBuilder
// ============================================================================

pub struct ParserBuilder {
    name: String,
    help: HelpSections,
    manual_help: bool,
    positional: Option<PositionalHandler>,
    options: Vec<Opt>,
}

impl ParserBuilder {
    pub fn new(name: &str) -> Self {
        ParserBuilder {
            name: name.to_string(),
            help: HelpSections::default(),
            manual_help: false,
            positional: None,
            options: Vec::new(),
        }
    }

    /// First help line, usually program name and version.
    pub fn program_info(mut self, info: &str) -> Self {
        self.help.program_info = info.to_string();
        self
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.help.usage = usage.to_string();
        self
    }

    pub fn preamble(mut self, preamble: &str) -> Self {
        self.help.preamble = preamble.to_string();
        self
    }

    pub fn conclusion(mut self, conclusion: &str) -> Self {
        self.help.conclusion = conclusion.to_string();
        self
    }

    pub fn description_indent(mut self, indent: usize) -> Self {
        self.help.description_indent = indent;
        self
    }

    /// Don't synthesize `-h, --help`; the program registers its own or none.
    pub fn manual_help(mut self, manual: bool) -> Self {
        self.manual_help = manual;
        self
    }

    /// Receives the tokens no option consumed. Without one, any leftover
    /// token fails the parse.
    pub fn positional<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&[String]) -> bool + 'static,
    {
        self.positional = Some(Box::new(handler));
        self
    }

    pub fn option(mut self, opt: Opt) -> Self {
        self.options.push(opt);
        self
    }

    pub fn build(self) -> Parser {
        let positional: PositionalHandler = match self.positional {
            Some(handler) => handler,
            None => Box::new(|rest: &[String]| rest.is_empty()),
        };
        let mut parser = Parser {
            name: self.name,
            options: Vec::with_capacity(self.options.len() + 1),
            help: self.help,
            manual_help: self.manual_help,
            help_synthesized: false,
            help_requested: Rc::new(Cell::new(false)),
            help_text: Rc::new(RefCell::new(String::new())),
            positional,
            bad_option: None,
        };
        for opt in self.options {
            parser.add_option(opt);
        }
        parser
    }
}

// ============================================================================
// Parser
// ============================================================================

pub struct Parser {
    name: String,
    options: Vec<Opt>,
    help: HelpSections,
    manual_help: bool,
    help_synthesized: bool,
    help_requested: Rc<Cell<bool>>,
    help_text: Rc<RefCell<String>>,
    positional: PositionalHandler,
    bad_option: Option<usize>,
}

impl Parser {
    pub fn builder(name: &str) -> ParserBuilder {
        ParserBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an option. Order only matters between equal priorities.
    pub fn add_option(&mut self, opt: Opt) {
        tracing::trace!(option = opt.name(), priority = opt.priority_value(), "option registered");
        self.options.push(opt);
    }

    pub fn options(&self) -> &[Opt] {
        &self.options
    }

    /// Look an option up by short or full name.
    pub fn option(&self, name: &str) -> Option<&Opt> {
        self.options.iter().find(|o| o.matches(name))
    }

    /// Mutable lookup, e.g. to make one option required depending on
    /// configuration decided after registration.
    pub fn option_mut(&mut self, name: &str) -> Option<&mut Opt> {
        self.options.iter_mut().find(|o| o.matches(name))
    }

    /// Required options that have not been applied in the current parse.
    pub fn required_control(&self) -> usize {
        self.options
            .iter()
            .filter(|o| o.is_required() && !o.is_applied())
            .count()
    }

    /// The option that stopped the last parse, if it failed on one.
    pub fn bad_option(&self) -> Option<&Opt> {
        self.bad_option.and_then(|idx| self.options.get(idx))
    }

    pub fn help_requested(&self) -> bool {
        self.help_requested.get()
    }

    /// Full `--help` text: program info, usage, preamble, options, conclusion.
    pub fn build_help(&self) -> String {
        self.help.render(&self.options)
    }

    pub fn parse_args<I, S>(&mut self, args: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.reset();

        let outcome = self.run(&mut args);
        match self.bad_option() {
            Some(opt) => tracing::debug!(%outcome, bad_option = opt.name(), "parse finished"),
            None => tracing::debug!(%outcome, "parse finished"),
        }
        outcome
    }

    fn run(&mut self, args: &mut Vec<String>) -> ParseOutcome {
        if args.is_empty() {
            return if self.required_control() == 0 {
                ParseOutcome::Ok
            } else {
                ParseOutcome::EmptyArgs
            };
        }

        if let Some(bundle) = expand_bundled_flags(args) {
            tracing::debug!(%bundle, "expanded bundled flags");
        }

        self.ensure_help_option();
        self.options.sort_by_key(|o| o.priority_value());
        *self.help_text.borrow_mut() = self.build_help();

        if let Err(outcome) = self.apply_options(args) {
            return outcome;
        }

        if self.help_requested.get() {
            return ParseOutcome::HelpRequested;
        }

        if !(self.positional)(args.as_slice()) {
            return ParseOutcome::InvalidParams;
        }
        ParseOutcome::Ok
    }

    fn reset(&mut self) {
        self.bad_option = None;
        self.help_requested.set(false);
        for opt in &mut self.options {
            opt.reset();
        }
    }

    fn apply_options(&mut self, args: &mut Vec<String>) -> Result<(), ParseOutcome> {
        for (idx, opt) in self.options.iter_mut().enumerate() {
            if let Err(e) = opt.apply(args) {
                tracing::debug!(option = opt.name(), error = %e, "option failed");
                self.bad_option = Some(idx);
                return Err(e.outcome());
            }
            if opt.is_applied() {
                tracing::debug!(option = opt.name(), "option applied");
            }
        }

        // Each required option already failed on its own if absent; this
        // only trips if that no longer holds.
        let outstanding = self.required_control();
        if outstanding != 0 {
            tracing::warn!(outstanding, "required options left unapplied");
            return Err(ParseOutcome::MissingRequiredOptions);
        }
        Ok(())
    }

    fn ensure_help_option(&mut self) {
        if self.manual_help || self.help_synthesized {
            return;
        }
        if self
            .options
            .iter()
            .any(|o| o.matches(HELP_SHORT) || o.matches(HELP_FULL))
        {
            return;
        }

        let requested = self.help_requested.clone();
        let text = self.help_text.clone();
        let help = Opt::flag(HELP_SHORT, HELP_FULL, move || {
            println!("{}", text.borrow());
            requested.set(true);
            true
        })
        .description("Show this message")
        .priority(i32::MIN);

        tracing::debug!("synthesized help option");
        self.options.push(help);
        self.help_synthesized = true;
    }
}

/// A single dash followed by two or more characters, none of them a dash.
pub fn is_bundle(token: &str) -> bool {
    match token.strip_prefix(OPTION_PREFIX) {
        Some(rest) => rest.chars().count() >= 2 && !rest.contains(OPTION_PREFIX),
        None => false,
    }
}

/// The bundle `parse_args` would expand: the first token passing
/// [`is_bundle`]. Later bundles are left as they are.
pub fn first_bundle(args: &[String]) -> Option<&str> {
    args.iter().map(String::as_str).find(|a| is_bundle(a))
}

/// Replace the first bundle (`-abc`) with `-a -b -c` appended at the end of
/// `args`. Returns the bundle that was expanded.
fn expand_bundled_flags(args: &mut Vec<String>) -> Option<String> {
    let idx = args.iter().position(|a| is_bundle(a))?;
    let bundle = args.remove(idx);
    args.extend(
        bundle
            .chars()
            .skip(1)
            .map(|c| format!("{}{}", OPTION_PREFIX, c)),
    );
    Some(bundle)
}
