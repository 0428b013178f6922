//! Boolean connectives used to join two predicate bodies

use predix_expr::BinaryOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connective joining two predicate bodies
///
/// `And` and `Or` evaluate both sides; `AndAlso` skips the right side when
/// the left side is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connective {
    /// Conjunction, both sides evaluated
    And,
    /// Short-circuit conjunction
    AndAlso,
    /// Disjunction, both sides evaluated
    Or,
}

impl Connective {
    /// All connectives, in declaration order
    pub const ALL: [Connective; 3] = [Connective::And, Connective::AndAlso, Connective::Or];

    /// The binary operator this connective builds
    pub fn operator(self) -> BinaryOp {
        match self {
            Connective::And => BinaryOp::And,
            Connective::AndAlso => BinaryOp::AndAlso,
            Connective::Or => BinaryOp::Or,
        }
    }

    /// Get the connective name as a string
    pub fn as_str(self) -> &'static str {
        match self {
            Connective::And => "and",
            Connective::AndAlso => "and_also",
            Connective::Or => "or",
        }
    }

    /// Parse a connective, accepting `and_also`, `and-also` and `andalso`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "and" => Some(Connective::And),
            "and_also" | "and-also" | "andalso" => Some(Connective::AndAlso),
            "or" => Some(Connective::Or),
            _ => None,
        }
    }

    /// Apply the connective to two already-evaluated operands
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Connective::And | Connective::AndAlso => left && right,
            Connective::Or => left || right,
        }
    }
}

impl std::str::FromStr for Connective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid connective: {}", s))
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_mapping() {
        assert_eq!(Connective::And.operator(), BinaryOp::And);
        assert_eq!(Connective::AndAlso.operator(), BinaryOp::AndAlso);
        assert_eq!(Connective::Or.operator(), BinaryOp::Or);
        assert!(Connective::AndAlso.operator().is_short_circuit());
        assert!(!Connective::And.operator().is_short_circuit());
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("AND".parse::<Connective>().unwrap(), Connective::And);
        assert_eq!("and-also".parse::<Connective>().unwrap(), Connective::AndAlso);
        assert_eq!("andalso".parse::<Connective>().unwrap(), Connective::AndAlso);
        assert!("xor".parse::<Connective>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for connective in Connective::ALL {
            assert_eq!(Connective::parse(&connective.to_string()), Some(connective));
        }
    }
}
