use crate::outcome::ParseOutcome;

/// Why a single option failed to apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("required option {name} is missing")]
    MissingRequired { name: String },

    #[error("option {name} expects {expected} parameter(s), found {found}")]
    MissingParams {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("option {name} rejected its parameters")]
    Rejected { name: String },
}

impl OptionError {
    pub fn outcome(&self) -> ParseOutcome {
        match self {
            OptionError::MissingRequired { .. } => ParseOutcome::MissingRequiredOptions,
            OptionError::MissingParams { .. } => ParseOutcome::InvalidOptionParams,
            OptionError::Rejected { .. } => ParseOutcome::InvalidOption,
        }
    }
}

/// Failing [`ParseOutcome`]s as an error type, for use with `?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no arguments given")]
    EmptyArgs,

    #[error("missing required options")]
    MissingRequiredOptions,

    #[error("invalid option")]
    InvalidOption,

    #[error("invalid option parameters")]
    InvalidOptionParams,

    #[error("invalid program parameters")]
    InvalidParams,
}

impl From<ParseError> for ParseOutcome {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::EmptyArgs => ParseOutcome::EmptyArgs,
            ParseError::MissingRequiredOptions => ParseOutcome::MissingRequiredOptions,
            ParseError::InvalidOption => ParseOutcome::InvalidOption,
            ParseError::InvalidOptionParams => ParseOutcome::InvalidOptionParams,
            ParseError::InvalidParams => ParseOutcome::InvalidParams,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_errors_map_to_outcomes() {
        let missing = OptionError::MissingRequired { name: "--key".into() };
        assert_eq!(missing.outcome(), ParseOutcome::MissingRequiredOptions);

        let short = OptionError::MissingParams {
            name: "--option".into(),
            expected: 4,
            found: 2,
        };
        assert_eq!(short.outcome(), ParseOutcome::InvalidOptionParams);
        assert_eq!(
            short.to_string(),
            "option --option expects 4 parameter(s), found 2"
        );

        let rejected = OptionError::Rejected { name: "-u".into() };
        assert_eq!(rejected.outcome(), ParseOutcome::InvalidOption);
    }

    #[test]
    fn parse_error_round_trips_to_outcome() {
        let outcome = ParseOutcome::MissingRequiredOptions;
        let err = outcome.into_result().unwrap_err();
        assert_eq!(ParseOutcome::from(err), outcome);
    }
}
