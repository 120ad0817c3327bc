//! Algorithm catalog types

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier of a supported algorithm.
///
/// The playground supports exactly these four families; a tagged variant is
/// all the dispatch the core needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmId {
    /// Partitional clustering (Lloyd's algorithm).
    KMeans,
    /// Density-based clustering with noise.
    Dbscan,
    /// Linear dimensionality reduction.
    Pca,
    /// Agglomerative hierarchical clustering.
    Hierarchical,
}

impl AlgorithmId {
    /// All supported identifiers, in catalog order.
    pub const ALL: [AlgorithmId; 4] = [
        AlgorithmId::KMeans,
        AlgorithmId::Dbscan,
        AlgorithmId::Pca,
        AlgorithmId::Hierarchical,
    ];

    /// Stable string form used in payloads and lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KMeans => "kmeans",
            Self::Dbscan => "dbscan",
            Self::Pca => "pca",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kmeans" => Ok(Self::KMeans),
            "dbscan" => Ok(Self::Dbscan),
            "pca" => Ok(Self::Pca),
            "hierarchical" => Ok(Self::Hierarchical),
            other => Err(Error::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// A concrete parameter value supplied by the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer-valued parameter (cluster counts, neighbor counts, ...).
    Int(i64),
    /// Real-valued parameter (neighborhood radii, ...).
    Real(f64),
    /// One of an enumerated set of choices (linkage methods, ...).
    Choice(String),
}

impl ParamValue {
    /// Human-readable kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Real(_) => "real",
            Self::Choice(_) => "choice",
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Choice(v) => f.write_str(v),
        }
    }
}

/// Constraint on a parameter's allowed values.
///
/// Serializable (but not deserializable) so a host can render widgets from
/// the catalog; the catalog itself is compiled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Constraint {
    /// Inclusive integer range.
    IntRange { min: i64, max: i64 },
    /// Inclusive real range. `step` is display granularity for a host
    /// slider; the engine validates the range only.
    RealRange { min: f64, max: f64, step: f64 },
    /// Enumerated set of allowed choices.
    Choice(&'static [&'static str]),
}

impl Constraint {
    /// Check `value` against this constraint.
    ///
    /// Integer values are accepted where a real is expected (a host slider
    /// may deliver whole numbers as integers).
    pub fn check(&self, value: &ParamValue) -> std::result::Result<(), String> {
        match (self, value) {
            (Self::IntRange { min, max }, ParamValue::Int(v)) => {
                if v < min || v > max {
                    Err(format!("{v} is outside {min}..={max}"))
                } else {
                    Ok(())
                }
            }
            (Self::RealRange { min, max, .. }, ParamValue::Real(v)) => {
                if !v.is_finite() || *v < *min || *v > *max {
                    Err(format!("{v} is outside {min}..={max}"))
                } else {
                    Ok(())
                }
            }
            (Self::RealRange { .. }, ParamValue::Int(v)) => {
                self.check(&ParamValue::Real(*v as f64))
            }
            (Self::Choice(allowed), ParamValue::Choice(v)) => {
                if allowed.contains(&v.as_str()) {
                    Ok(())
                } else {
                    Err(format!("'{v}' is not one of: {}", allowed.join(", ")))
                }
            }
            (_, other) => Err(format!("{} value not allowed here", other.kind())),
        }
    }
}

/// Schema for a single algorithm parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name, as used in bindings.
    pub name: &'static str,
    /// Allowed values.
    pub constraint: Constraint,
    /// Default value, always satisfying `constraint`.
    pub default: ParamValue,
}

/// Catalog entry for one algorithm: display metadata plus parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlgorithmSpec {
    /// Identifier used for dispatch.
    pub id: AlgorithmId,
    /// Display name for a host's selection widget.
    pub name: &'static str,
    /// One-line description for a host's overview pane.
    pub description: &'static str,
    /// Typical use cases, display copy for the overview pane.
    pub use_cases: &'static [&'static str],
    /// Ordered parameter schemas.
    pub parameters: Vec<ParameterSpec>,
}

impl AlgorithmSpec {
    /// Look up the schema for `name`.
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Mapping from parameter name to a concrete value.
///
/// Built by the host from widget state, usually starting from
/// [`ParameterBinding::defaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterBinding {
    values: HashMap<String, ParamValue>,
}

impl ParameterBinding {
    /// Create an empty binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binding holding every default of `spec`.
    pub fn defaults(spec: &AlgorithmSpec) -> Self {
        let values = spec
            .parameters
            .iter()
            .map(|p| (p.name.to_string(), p.default.clone()))
            .collect();
        Self { values }
    }

    /// Set a value, replacing any previous binding for the name.
    pub fn set(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Get the bound value for `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Iterate over bound (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Validate this binding against `spec`.
    ///
    /// Every parameter of the spec must be bound to a value satisfying its
    /// constraint, and no unknown names may be bound.
    pub fn validate(&self, spec: &AlgorithmSpec) -> Result<()> {
        for param in &spec.parameters {
            let value = self.values.get(param.name).ok_or_else(|| {
                Error::invalid_parameter(param.name, "no value bound")
            })?;
            param
                .constraint
                .check(value)
                .map_err(|reason| Error::invalid_parameter(param.name, reason))?;
        }
        for name in self.values.keys() {
            if spec.parameter(name).is_none() {
                return Err(Error::invalid_parameter(
                    name.clone(),
                    format!("not a parameter of {}", spec.id),
                ));
            }
        }
        Ok(())
    }

    /// Bound integer value for `name`.
    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ParamValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Bound real value for `name`, accepting integers.
    pub fn real(&self, name: &str) -> Option<f64> {
        match self.values.get(name) {
            Some(ParamValue::Real(v)) => Some(*v),
            Some(ParamValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    /// Bound choice value for `name`.
    pub fn choice(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ParamValue::Choice(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn algorithm_id_round_trips_through_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = "tsne".parse::<AlgorithmId>().unwrap_err();
        assert!(matches!(err, Error::UnknownAlgorithm(name) if name == "tsne"));
    }

    #[test]
    fn int_range_bounds_are_inclusive() {
        let c = Constraint::IntRange { min: 2, max: 8 };
        assert!(c.check(&ParamValue::Int(2)).is_ok());
        assert!(c.check(&ParamValue::Int(8)).is_ok());
        assert!(c.check(&ParamValue::Int(1)).is_err());
        assert!(c.check(&ParamValue::Int(9)).is_err());
    }

    #[test]
    fn real_range_accepts_integer_values() {
        let c = Constraint::RealRange {
            min: 0.1,
            max: 2.0,
            step: 0.1,
        };
        assert!(c.check(&ParamValue::Int(1)).is_ok());
        assert!(c.check(&ParamValue::Real(0.5)).is_ok());
        assert!(c.check(&ParamValue::Real(f64::NAN)).is_err());
        assert!(c.check(&ParamValue::Real(2.1)).is_err());
    }

    #[test]
    fn choice_constraint_rejects_unlisted_value() {
        let c = Constraint::Choice(&["ward", "complete", "average"]);
        assert!(c.check(&ParamValue::Choice("ward".into())).is_ok());
        assert!(c.check(&ParamValue::Choice("single".into())).is_err());
        assert!(c.check(&ParamValue::Int(0)).is_err());
    }
}
