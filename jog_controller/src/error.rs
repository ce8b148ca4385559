use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Invalid value {value:?} for {field}")]
    InvalidInput { field: String, value: String },
}

impl InputError {
    pub fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        InputError::InvalidInput {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            InputError::InvalidInput { field, .. } => field,
        }
    }
}

fn parse_trimmed<T: FromStr>(field: &str, text: &str) -> Result<T, InputError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| InputError::invalid(field, text))
}

/// Parses an integer count. Surrounding whitespace is ignored.
pub fn parse_count(field: &str, text: &str) -> Result<i64, InputError> {
    parse_trimmed(field, text)
}

pub fn parse_decimal(field: &str, text: &str) -> Result<f64, InputError> {
    let value: f64 = parse_trimmed(field, text)?;
    if !value.is_finite() {
        return Err(InputError::invalid(field, text));
    }
    Ok(value)
}
