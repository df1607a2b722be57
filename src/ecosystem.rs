// 🎨 Ecosystem - closed set of service ecosystems and their display colors
//
// Every transaction belongs to exactly one ecosystem. The set is closed, so a
// color lookup can never miss; unknown tags are rejected when parsing.

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ECOSYSTEM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ecosystem {
    #[serde(rename = "MRT")]
    Mrt,

    #[serde(rename = "TRANSJAKARTA")]
    Transjakarta,

    #[serde(rename = "JAKPRO")]
    Jakpro,

    #[serde(rename = "PAM JAYA")]
    PamJaya,

    #[serde(rename = "LRT")]
    Lrt,
}

impl Ecosystem {
    /// All ecosystems, in legend order
    pub const ALL: [Ecosystem; 5] = [
        Ecosystem::Mrt,
        Ecosystem::Transjakarta,
        Ecosystem::Jakpro,
        Ecosystem::PamJaya,
        Ecosystem::Lrt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Mrt => "MRT",
            Ecosystem::Transjakarta => "TRANSJAKARTA",
            Ecosystem::Jakpro => "JAKPRO",
            Ecosystem::PamJaya => "PAM JAYA",
            Ecosystem::Lrt => "LRT",
        }
    }

    /// Hex color used for nodes and edges of this ecosystem
    pub fn color(&self) -> &'static str {
        match self {
            Ecosystem::Mrt => "#1f77b4",
            Ecosystem::Transjakarta => "#ff7f0e",
            Ecosystem::Jakpro => "#2ca02c",
            Ecosystem::PamJaya => "#9467bd",
            Ecosystem::Lrt => "#17becf",
        }
    }

    /// Same color as (r, g, b), for terminal rendering
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Ecosystem::Mrt => (0x1f, 0x77, 0xb4),
            Ecosystem::Transjakarta => (0xff, 0x7f, 0x0e),
            Ecosystem::Jakpro => (0x2c, 0xa0, 0x2c),
            Ecosystem::PamJaya => (0x94, 0x67, 0xbd),
            Ecosystem::Lrt => (0x17, 0xbe, 0xcf),
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ecosystem {
    type Err = GraphError;

    /// Exact label match; `mrt` or ` MRT` are unknown tags
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ecosystem::ALL
            .iter()
            .copied()
            .find(|eco| eco.as_str() == s)
            .ok_or_else(|| GraphError::UnknownEcosystem(s.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!("MRT".parse::<Ecosystem>().unwrap(), Ecosystem::Mrt);
        assert_eq!("PAM JAYA".parse::<Ecosystem>().unwrap(), Ecosystem::PamJaya);
        assert_eq!("TRANSJAKARTA".parse::<Ecosystem>().unwrap(), Ecosystem::Transjakarta);
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("mrt".parse::<Ecosystem>().is_err());
        assert!("Pam Jaya".parse::<Ecosystem>().is_err());
        assert!(" LRT".parse::<Ecosystem>().is_err());
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "KRL".parse::<Ecosystem>().unwrap_err();
        assert_eq!(err, GraphError::UnknownEcosystem("KRL".to_string()));
    }

    #[test]
    fn test_colors_are_distinct() {
        let mut colors: Vec<&str> = Ecosystem::ALL.iter().map(|e| e.color()).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Ecosystem::ALL.len());
    }

    #[test]
    fn test_rgb_matches_hex() {
        for eco in Ecosystem::ALL {
            let (r, g, b) = eco.rgb();
            assert_eq!(format!("#{:02x}{:02x}{:02x}", r, g, b), eco.color());
        }
    }

    #[test]
    fn test_serde_uses_display_label() {
        let json = serde_json::to_string(&Ecosystem::PamJaya).unwrap();
        assert_eq!(json, "\"PAM JAYA\"");
        let back: Ecosystem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Ecosystem::PamJaya);
    }
}
