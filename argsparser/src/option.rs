//! Option model: a named, prioritized unit that finds itself in the argument
//! list and consumes the tokens that belong to it.

use std::fmt;

use crate::error::OptionError;

/// Tokens starting with this character end a variable-arity parameter run.
pub const OPTION_PREFIX: char = '-';

/// Column at which option names are padded to in help lines.
pub const DEFAULT_DESCRIPTION_INDENT: usize = 30;

pub type FlagHandler = Box<dyn FnMut() -> bool>;
pub type ParamsHandler = Box<dyn FnMut(&[String]) -> bool>;

// ============================================================================
// Action — how an option consumes its parameters
// ============================================================================

pub enum Action {
    /// No parameters.
    Flag(FlagHandler),
    /// Exactly `count` tokens following the option name.
    Fixed { count: usize, handler: ParamsHandler },
    /// Every token up to the next option-like token.
    Variable(ParamsHandler),
}

/// Parameter count of an option, without its handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    Fixed(usize),
    Variable,
}

impl Action {
    pub fn arity(&self) -> Arity {
        match self {
            Action::Flag(_) => Arity::None,
            Action::Fixed { count, .. } => Arity::Fixed(*count),
            Action::Variable(_) => Arity::Variable,
        }
    }
}

// ============================================================================
// Opt
// ============================================================================

pub struct Opt {
    short_name: String,
    full_name: String,
    description: String,
    usage: String,
    priority: i32,
    required: bool,
    custom_help: Option<String>,
    applied: bool,
    action: Action,
}

impl Opt {
    fn with_action(short: &str, full: &str, action: Action) -> Self {
        Opt {
            short_name: short.to_string(),
            full_name: full.to_string(),
            description: String::new(),
            usage: String::new(),
            priority: 0,
            required: false,
            custom_help: None,
            applied: false,
            action,
        }
    }

    /// Option without parameters, e.g. `-v, --verbose`.
    pub fn flag<F>(short: &str, full: &str, handler: F) -> Self
    where
        F: FnMut() -> bool + 'static,
    {
        Self::with_action(short, full, Action::Flag(Box::new(handler)))
    }

    /// Option followed by exactly `count` parameters.
    pub fn fixed<F>(short: &str, full: &str, count: usize, handler: F) -> Self
    where
        F: FnMut(&[String]) -> bool + 'static,
    {
        Self::with_action(
            short,
            full,
            Action::Fixed {
                count,
                handler: Box::new(handler),
            },
        )
    }

    /// Option followed by one parameter, handed to `handler` as a plain string.
    pub fn single<F>(short: &str, full: &str, mut handler: F) -> Self
    where
        F: FnMut(&str) -> bool + 'static,
    {
        Self::fixed(short, full, 1, move |params: &[String]| handler(&params[0]))
    }

    /// Option followed by any number of parameters, up to the next option.
    pub fn variable<F>(short: &str, full: &str, handler: F) -> Self
    where
        F: FnMut(&[String]) -> bool + 'static,
    {
        Self::with_action(short, full, Action::Variable(Box::new(handler)))
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.set_help(help);
        self
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Full name if present, otherwise the short one.
    pub fn name(&self) -> &str {
        display_name(&self.short_name, &self.full_name)
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    pub fn priority_value(&self) -> i32 {
        self.priority
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Only meaningful between registration and the next parse; the parser
    /// holds the option mutably borrowed while parsing.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn arity(&self) -> Arity {
        self.action.arity()
    }

    /// Replace the generated help line. An empty string restores it.
    pub fn set_help(&mut self, help: &str) {
        self.custom_help = if help.is_empty() {
            None
        } else {
            Some(help.to_string())
        };
    }

    pub fn has_custom_help(&self) -> bool {
        self.custom_help.is_some()
    }

    /// Help line, with the full name padded to `indent` columns unless a
    /// custom line was set.
    pub fn help_line(&self, indent: usize) -> String {
        match self.custom_help {
            Some(ref help) => help.clone(),
            None => format!(
                "  {}, {:<indent$} - {}",
                self.short_name,
                self.full_name,
                self.description,
                indent = indent
            ),
        }
    }

    /// Diagnostic for a rejected parameter set, followed by the usage hint.
    pub fn error_message(&self, msg: &str) -> String {
        let mut out = format!("Error with {}!\n{}", self.name(), msg);
        if !self.usage.is_empty() {
            out.push('\n');
            out.push_str(&self.usage);
        }
        out
    }

    pub fn matches(&self, token: &str) -> bool {
        !token.is_empty() && (token == self.short_name || token == self.full_name)
    }

    pub(crate) fn reset(&mut self) {
        self.applied = false;
    }

    /// Find this option in `args`, remove it together with its parameters
    /// and run the handler.
    ///
    /// Absence is only an error for required options. On failure `applied`
    /// stays false; a short fixed-arity option leaves `args` untouched.
    pub fn apply(&mut self, args: &mut Vec<String>) -> Result<(), OptionError> {
        let pos = match args.iter().position(|a| self.matches(a)) {
            Some(pos) => pos,
            None if self.required => {
                return Err(OptionError::MissingRequired {
                    name: self.name().to_string(),
                });
            }
            None => return Ok(()),
        };

        if let Action::Fixed { count, .. } = self.action {
            let found = args.len() - pos - 1;
            if found < count {
                return Err(OptionError::MissingParams {
                    name: self.name().to_string(),
                    expected: count,
                    found,
                });
            }
        }

        let name = display_name(&self.short_name, &self.full_name);
        let accepted = match self.action {
            Action::Flag(ref mut handler) => {
                args.remove(pos);
                tracing::trace!(option = name, "flag");
                handler()
            }
            Action::Fixed {
                count,
                ref mut handler,
            } => {
                let params: Vec<String> = args.drain(pos..=pos + count).skip(1).collect();
                tracing::trace!(option = name, ?params, "fixed parameters");
                handler(&params)
            }
            Action::Variable(ref mut handler) => {
                args.remove(pos);
                let end = args[pos..]
                    .iter()
                    .position(|a| a.starts_with(OPTION_PREFIX))
                    .map_or(args.len(), |i| pos + i);
                let params: Vec<String> = args.drain(pos..end).collect();
                tracing::trace!(option = name, ?params, "variable parameters");
                handler(&params)
            }
        };

        if !accepted {
            return Err(OptionError::Rejected {
                name: name.to_string(),
            });
        }
        self.applied = true;
        Ok(())
    }
}

fn display_name<'a>(short: &'a str, full: &'a str) -> &'a str {
    if full.is_empty() {
        short
    } else {
        full
    }
}

impl fmt::Debug for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opt")
            .field("short_name", &self.short_name)
            .field("full_name", &self.full_name)
            .field("priority", &self.priority)
            .field("required", &self.required)
            .field("applied", &self.applied)
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}
