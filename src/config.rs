//! Field configuration
//!
//! A [`FieldSpec`] names a field either by catalogue degree
//! (`primitive:8`) or by generator exponents (`8,4,3,2,0`). [`FieldOptions`]
//! controls whether log tables are built alongside.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::field::Field;
use crate::primitives::primitive_exponents;
use crate::FieldError;

/// Textual description of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSpec {
    /// Catalogued primitive polynomial of the given degree.
    Primitive(u32),
    /// Explicit generator exponents.
    Exponents(Vec<u32>),
}

/// When to build log/exp tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogTablePolicy {
    /// Never build tables.
    #[default]
    Skip,
    /// Build tables when the field allows it; ignore refusals.
    Try,
    /// Build tables and fail if they cannot be built.
    Require,
}

/// Options applied when turning a [`FieldSpec`] into a [`Field`].
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    /// Log table policy.
    pub log_tables: LogTablePolicy,
}

impl FieldSpec {
    /// Generator exponents this spec resolves to.
    pub fn exponents(&self) -> Result<Vec<u32>, FieldError> {
        match self {
            FieldSpec::Primitive(degree) => primitive_exponents(*degree)
                .map(<[u32]>::to_vec)
                .ok_or_else(|| {
                    FieldError::Configuration(format!(
                        "no catalogued primitive polynomial of degree {degree}"
                    ))
                }),
            FieldSpec::Exponents(exponents) => Ok(exponents.clone()),
        }
    }

    /// Construct the field without log tables.
    pub fn build(&self) -> Result<Field, FieldError> {
        Field::new(self.exponents()?)
    }

    /// Construct the field and apply `options`.
    pub fn build_with(&self, options: &FieldOptions) -> Result<Field, FieldError> {
        let field = self.build()?;
        match options.log_tables {
            LogTablePolicy::Skip => {}
            LogTablePolicy::Try => {
                if let Err(err) = field.build_log_tables() {
                    debug!(%err, "continuing without log tables");
                }
            }
            LogTablePolicy::Require => field.build_log_tables()?,
        }
        Ok(field)
    }
}

impl FromStr for FieldSpec {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(degree) = s.strip_prefix("primitive:") {
            let degree = degree.trim().parse::<u32>().map_err(|_| {
                FieldError::Configuration(format!("invalid primitive degree '{degree}'"))
            })?;
            return Ok(FieldSpec::Primitive(degree));
        }

        let exponents = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<u32>()
                    .map_err(|_| FieldError::Configuration(format!("invalid exponent '{part}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldSpec::Exponents(exponents))
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSpec::Primitive(degree) => write!(f, "primitive:{degree}"),
            FieldSpec::Exponents(exponents) => {
                let parts: Vec<String> = exponents.iter().map(u32::to_string).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}
