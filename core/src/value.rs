//! Decoding of raw strings into typed option and parameter values.
//!
//! Every leaf type used in a schema implements [`OptionValue`]. Implementations
//! are provided for `String`, `bool`, all fixed-width integers and
//! `f32`/`f64`. Enumerations opt in through [`LabeledValue`].

use crate::error::DecodeError;

/// A type that can be decoded from a single command-line string.
///
/// # Examples
///
/// ```
/// use option_schema_core::OptionValue;
///
/// assert_eq!(i32::decode("-12").unwrap(), -12);
/// assert!(bool::decode("Yes").unwrap());
/// assert_eq!(
///     u8::decode("300").unwrap_err().to_string(),
///     "Invalid integer value: '300'"
/// );
/// ```
pub trait OptionValue: Sized {
    fn decode(raw: &str) -> Result<Self, DecodeError>;
}

impl OptionValue for String {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(raw.to_string())
    }
}

impl OptionValue for bool {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        match raw.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" | "enable" => Ok(true),
            "0" | "false" | "no" | "n" | "off" | "disable" => Ok(false),
            _ => Err(DecodeError::InvalidBoolean(raw.to_string())),
        }
    }
}

macro_rules! integer_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                fn decode(raw: &str) -> Result<Self, DecodeError> {
                    raw.parse::<$ty>()
                        .map_err(|_| DecodeError::InvalidInteger(raw.to_string()))
                }
            }
        )*
    };
}

integer_option_value!(i8, i16, i32, i64, i128, isize);
integer_option_value!(u8, u16, u32, u64, u128, usize);

macro_rules! float_option_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl OptionValue for $ty {
                fn decode(raw: &str) -> Result<Self, DecodeError> {
                    raw.parse::<$ty>()
                        .map_err(|_| DecodeError::InvalidFloat(raw.to_string()))
                }
            }
        )*
    };
}

float_option_value!(f32, f64);

/// An enumeration decoded by exact match against a fixed set of labels.
///
/// Implementing this trait provides [`OptionValue`] for free.
///
/// # Examples
///
/// ```
/// use option_schema_core::{LabeledValue, OptionValue};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Format {
///     Text,
///     Json,
/// }
///
/// impl LabeledValue for Format {
///     const LABELS: &'static [(&'static str, Self)] =
///         &[("text", Format::Text), ("json", Format::Json)];
/// }
///
/// assert_eq!(Format::decode("json").unwrap(), Format::Json);
/// assert!(Format::decode("JSON").is_err());
/// ```
pub trait LabeledValue: Sized + Clone + 'static {
    const LABELS: &'static [(&'static str, Self)];
}

impl<T: LabeledValue> OptionValue for T {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        T::LABELS
            .iter()
            .find(|(label, _)| *label == raw)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| DecodeError::InvalidValue(raw.to_string()))
    }
}
