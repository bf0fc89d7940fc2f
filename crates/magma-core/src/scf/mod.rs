//! SCF config documents and the pure pieces of project scaffolding:
//! catalog lookup, narrative rendering, and page tag conventions.

pub mod config;
pub mod lookup;
pub mod narrative;

pub use config::{
    AssessmentObjective, EvidenceItem, ScfConfig, ScfControl, SUPPORTED_VERSION, Timeline,
    TimelineWindow, UNCATEGORIZED_DOMAIN,
};
pub use lookup::{CatalogLookup, Resolved};

pub const CONTROLS_OVERVIEW_TAG: &str = "controls-overview";
pub const RISKS_OVERVIEW_TAG: &str = "risks-overview";
pub const THREATS_OVERVIEW_TAG: &str = "threats-overview";

/// Lowercase, trim, and replace spaces with `-`.
#[must_use]
pub fn slugify(input: &str) -> String {
    input.trim().to_lowercase().replace(' ', "-")
}

#[must_use]
pub fn domain_tag(domain: &str) -> String {
    format!("domain-{}", slugify(domain))
}

#[must_use]
pub fn control_tag(control_id: &str) -> String {
    format!("control-{control_id}")
}

#[must_use]
pub fn risk_tag(risk_id: &str) -> String {
    format!("risk-{risk_id}")
}

#[must_use]
pub fn threat_tag(threat_id: &str) -> String {
    format!("threat-{threat_id}")
}

/// Cut `s` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let mut out: String = s.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_domains() {
        assert_eq!(slugify(" Access Control "), "access-control");
        assert_eq!(domain_tag("Asset Management"), "domain-asset-management");
        assert_eq!(domain_tag(UNCATEGORIZED_DOMAIN), "domain-uncategorized");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("short", 60), "short");
        assert_eq!(truncate_chars("abcdefghij", 8), "abcde...");
        assert_eq!(truncate_chars("ééééé", 4), "é...");
        assert_eq!(truncate_chars("abcdef", 2), "ab");
        assert_eq!(truncate_chars("abcdef", 0), "abcdef");
    }
}
