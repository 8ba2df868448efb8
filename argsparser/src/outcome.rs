use std::fmt;

use crate::error::ParseError;

/// Result of one `Parser::parse_args` call.
///
/// Exactly one value is produced per parse. `HelpRequested` is terminal but
/// not an error; programs usually exit cleanly on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseOutcome {
    /// All required options applied and the positional handler accepted the leftovers.
    Ok,
    /// No arguments were supplied while required options exist.
    EmptyArgs,
    /// The help option ran.
    HelpRequested,
    /// A required option never appeared.
    MissingRequiredOptions,
    /// A matched option's handler rejected its parameters.
    InvalidOption,
    /// A fixed-arity option ran out of tokens before collecting its parameters.
    InvalidOptionParams,
    /// The positional handler rejected the leftover tokens.
    InvalidParams,
}

/// Successful terminal states of a parse, see [`ParseOutcome::into_result`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    Completed,
    HelpRequested,
}

impl ParseOutcome {
    pub fn is_ok(self) -> bool {
        self == ParseOutcome::Ok
    }

    /// True for every outcome except `Ok` and `HelpRequested`.
    pub fn is_failure(self) -> bool {
        !matches!(self, ParseOutcome::Ok | ParseOutcome::HelpRequested)
    }

    /// Split the outcome into the two successful states and a typed error.
    pub fn into_result(self) -> Result<Parsed, ParseError> {
        match self {
            ParseOutcome::Ok => Ok(Parsed::Completed),
            ParseOutcome::HelpRequested => Ok(Parsed::HelpRequested),
            ParseOutcome::EmptyArgs => Err(ParseError::EmptyArgs),
            ParseOutcome::MissingRequiredOptions => Err(ParseError::MissingRequiredOptions),
            ParseOutcome::InvalidOption => Err(ParseError::InvalidOption),
            ParseOutcome::InvalidOptionParams => Err(ParseError::InvalidOptionParams),
            ParseOutcome::InvalidParams => Err(ParseError::InvalidParams),
        }
    }
}

impl fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseOutcome::Ok => write!(f, "ok"),
            ParseOutcome::EmptyArgs => write!(f, "no arguments given"),
            ParseOutcome::HelpRequested => write!(f, "help requested"),
            ParseOutcome::MissingRequiredOptions => write!(f, "missing required options"),
            ParseOutcome::InvalidOption => write!(f, "invalid option"),
            ParseOutcome::InvalidOptionParams => write!(f, "invalid option parameters"),
            ParseOutcome::InvalidParams => write!(f, "invalid program parameters"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_is_not_a_failure() {
        assert!(!ParseOutcome::HelpRequested.is_failure());
        assert!(!ParseOutcome::HelpRequested.is_ok());
        assert!(ParseOutcome::Ok.is_ok());
    }

    #[test]
    fn failures_become_errors() {
        assert_eq!(ParseOutcome::Ok.into_result().unwrap(), Parsed::Completed);
        assert_eq!(
            ParseOutcome::HelpRequested.into_result().unwrap(),
            Parsed::HelpRequested
        );
        assert_eq!(
            ParseOutcome::InvalidParams.into_result().unwrap_err(),
            ParseError::InvalidParams
        );
        assert!(ParseOutcome::EmptyArgs.is_failure());
    }

    #[test]
    fn display_is_human_readable() {
        assert_eq!(
            ParseOutcome::InvalidOptionParams.to_string(),
            "invalid option parameters"
        );
    }
}
