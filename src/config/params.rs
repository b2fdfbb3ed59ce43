//! Parameter descriptors for the console.
//!
//! Every tunable of [`MorseConfig`] appears here once, with its type,
//! range and accessors, so `set` / `show` stay table driven.

use thiserror::Error;

use super::{MorseConfig, TerminatorPolicy, WriteCountPolicy, DOT_MS_MAX, DOT_MS_MIN};

/// Typed parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamValue {
    U32(u32),
    /// Index into the descriptor's variant names.
    Enum(u8),
}

/// Parameter type, with the information needed to parse and validate.
#[derive(Clone, Copy, Debug)]
pub enum ParamType {
    U32 { min: u32, max: u32 },
    Enum { variants: &'static [&'static str] },
}

/// Why a value was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParamSetError {
    #[error("value out of range")]
    OutOfRange,
    #[error("value has the wrong type")]
    WrongType,
    #[error("value could not be parsed")]
    Unparsable,
}

/// One console-visible parameter.
pub struct ParamDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    pub param_type: ParamType,
    pub get_fn: fn(&MorseConfig) -> ParamValue,
    pub set_fn: fn(&MorseConfig, ParamValue) -> Result<(), ParamSetError>,
}

impl ParamDescriptor {
    /// Parse console text into a value of this parameter's type.
    ///
    /// Enums accept either the variant name or its index.
    pub fn parse(&self, text: &str) -> Result<ParamValue, ParamSetError> {
        match self.param_type {
            ParamType::U32 { min, max } => {
                let v: u32 = text.parse().map_err(|_| ParamSetError::Unparsable)?;
                if v < min || v > max {
                    return Err(ParamSetError::OutOfRange);
                }
                Ok(ParamValue::U32(v))
            }
            ParamType::Enum { variants } => {
                if let Some(idx) = variants.iter().position(|v| *v == text) {
                    return Ok(ParamValue::Enum(idx as u8));
                }
                let idx: u8 = text.parse().map_err(|_| ParamSetError::Unparsable)?;
                if usize::from(idx) >= variants.len() {
                    return Err(ParamSetError::OutOfRange);
                }
                Ok(ParamValue::Enum(idx))
            }
        }
    }

    /// Human readable rendering of a value, for enums the variant name.
    pub fn display(&self, value: ParamValue, out: &mut dyn core::fmt::Write) -> core::fmt::Result {
        match (self.param_type, value) {
            (ParamType::Enum { variants }, ParamValue::Enum(idx)) => {
                out.write_str(variants.get(usize::from(idx)).copied().unwrap_or("?"))
            }
            (_, ParamValue::U32(v)) => write!(out, "{}", v),
            (_, ParamValue::Enum(idx)) => write!(out, "{}", idx),
        }
    }
}

/// All console-visible parameters.
pub static PARAMS: &[ParamDescriptor] = &[
    ParamDescriptor {
        name: "dot_ms",
        brief: "Dot duration in ms (dash 3x, word gap 7x)",
        param_type: ParamType::U32 { min: DOT_MS_MIN, max: DOT_MS_MAX },
        get_fn: |c| ParamValue::U32(c.dot_ms()),
        set_fn: |c, v| match v {
            ParamValue::U32(ms) => c.set_dot_ms(ms),
            ParamValue::Enum(_) => Err(ParamSetError::WrongType),
        },
    },
    ParamDescriptor {
        name: "terminator",
        brief: "Newline after input without letters (scan) or only after letters",
        param_type: ParamType::Enum { variants: TerminatorPolicy::NAMES },
        get_fn: |c| ParamValue::Enum(c.terminator() as u8),
        set_fn: |c, v| match v {
            ParamValue::Enum(idx) => {
                c.set_terminator(TerminatorPolicy::from_u8(idx));
                Ok(())
            }
            ParamValue::U32(_) => Err(ParamSetError::WrongType),
        },
    },
    ParamDescriptor {
        name: "write_count",
        brief: "Bytes reported by write: requested or consumed",
        param_type: ParamType::Enum { variants: WriteCountPolicy::NAMES },
        get_fn: |c| ParamValue::Enum(c.write_count() as u8),
        set_fn: |c, v| match v {
            ParamValue::Enum(idx) => {
                c.set_write_count(WriteCountPolicy::from_u8(idx));
                Ok(())
            }
            ParamValue::U32(_) => Err(ParamSetError::WrongType),
        },
    },
];

/// Find a parameter by exact name.
pub fn find_param(name: &str) -> Option<&'static ParamDescriptor> {
    PARAMS.iter().find(|p| p.name == name)
}

/// Parameters whose name starts with `pattern` minus a trailing `*`.
pub fn find_params_matching(pattern: &str) -> impl Iterator<Item = &'static ParamDescriptor> + '_ {
    let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
    PARAMS.iter().filter(move |p| p.name.starts_with(prefix))
}

/// All parameter names.
pub fn param_names() -> impl Iterator<Item = &'static str> {
    PARAMS.iter().map(|p| p.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_param() {
        assert!(find_param("dot_ms").is_some());
        assert!(find_param("dot").is_none());
        assert_eq!(find_params_matching("w*").count(), 1);
        assert_eq!(find_params_matching("*").count(), PARAMS.len());
        assert_eq!(param_names().count(), 3);
    }

    #[test]
    fn test_parse_u32() {
        let p = find_param("dot_ms").unwrap();
        assert_eq!(p.parse("120"), Ok(ParamValue::U32(120)));
        assert_eq!(p.parse("0"), Err(ParamSetError::OutOfRange));
        assert_eq!(p.parse("fast"), Err(ParamSetError::Unparsable));
    }

    #[test]
    fn test_parse_enum_by_name_or_index() {
        let p = find_param("terminator").unwrap();
        assert_eq!(p.parse("letters"), Ok(ParamValue::Enum(1)));
        assert_eq!(p.parse("0"), Ok(ParamValue::Enum(0)));
        assert_eq!(p.parse("2"), Err(ParamSetError::OutOfRange));
    }

    #[test]
    fn test_set_through_descriptor() {
        let config = MorseConfig::new();
        let p = find_param("write_count").unwrap();

        (p.set_fn)(&config, ParamValue::Enum(1)).unwrap();
        assert_eq!(config.write_count(), WriteCountPolicy::Consumed);
        assert_eq!((p.set_fn)(&config, ParamValue::U32(1)), Err(ParamSetError::WrongType));

        let mut text = String::new();
        p.display((p.get_fn)(&config), &mut text).unwrap();
        assert_eq!(text, "consumed");
    }
}
