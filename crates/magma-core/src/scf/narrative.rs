//! Markdown and prose derived from a config's selection.
//!
//! Everything here is a pure function of its inputs. Sets are rendered in
//! sorted order so output is byte-stable across runs.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::config::{ScfConfig, ScfControl};

/// Body of the root "Controls Overview" page.
#[must_use]
pub fn overview_markdown(config: &ScfConfig, selected: &[&ScfControl]) -> String {
    let domains: BTreeSet<&str> = selected.iter().map(|c| c.domain_name()).collect();

    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", config.project_name);
    out.push_str("This project was created from an SCF configuration document.\n\n");
    let _ = writeln!(out, "- **Total selected controls:** {}", selected.len());
    if config.timeline.max_months > 0 {
        let _ = writeln!(out, "- **Planned duration:** {} months", config.timeline.max_months);
    }
    if !domains.is_empty() {
        let joined: Vec<&str> = domains.into_iter().collect();
        let _ = writeln!(out, "- **Domains covered:** {}", joined.join(", "));
    }

    if !config.timeline.windows.is_empty() {
        out.push_str("\n## Timeline windows\n\n");
        for w in &config.timeline.windows {
            let _ = writeln!(out, "- {} (months {}–{})", w.goal, w.start_month, w.end_month);
        }
    }
    out
}

/// One-sentence project description for configs that do not supply one.
///
/// ```text
/// SCF project with 2 selected controls, covering soc2, core: baseline, over 6 months, all marked as priority.
/// ```
#[must_use]
pub fn project_description(config: &ScfConfig, selected: &[&ScfControl]) -> String {
    let total = selected.len();
    if total == 0 {
        return "SCF project with 0 selected controls.".to_string();
    }

    let mut coverage = BTreeSet::new();
    let mut cores = BTreeSet::new();
    let mut priority = 0usize;
    for control in selected {
        coverage.extend(control.coverage.iter().filter(|(_, on)| **on).map(|(k, _)| k.as_str()));
        cores.extend(control.core.iter().filter(|(_, on)| **on).map(|(k, _)| k.as_str()));
        if control.priority {
            priority += 1;
        }
    }

    let mut parts = Vec::new();
    if total == 1 {
        parts.push("SCF project with 1 selected control".to_string());
    } else {
        parts.push(format!("SCF project with {total} selected controls"));
    }
    if !coverage.is_empty() {
        parts.push(format!("covering {}", join_set(&coverage)));
    }
    if !cores.is_empty() {
        parts.push(format!("core: {}", join_set(&cores)));
    }
    if config.timeline.max_months > 0 {
        parts.push(format!("over {} months", config.timeline.max_months));
    }
    if priority > 0 {
        if priority == total {
            parts.push("all marked as priority".to_string());
        } else {
            parts.push(format!("{priority} marked as priority"));
        }
    }

    format!("{}.", parts.join(", "))
}

/// Body of a control page.
#[must_use]
pub fn control_markdown(control: &ScfControl) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {} - {}\n", control.object_id, control.title);

    out.push_str("## Control intent\n\n");
    if !control.control_description.is_empty() {
        out.push_str(&control.control_description);
        out.push_str("\n\n");
    }
    let _ = writeln!(out, "- **Domain:** {}", control.domain_name());
    if !control.cadence.is_empty() {
        let _ = writeln!(out, "- **Cadence:** {}", control.cadence);
    }
    if control.weight != 0.0 {
        let _ = writeln!(out, "- **Weight:** {:.2}", control.weight);
    }
    let frameworks = control.coverage_keys();
    if !frameworks.is_empty() {
        let _ = writeln!(out, "- **Framework coverage:** {}", frameworks.join(", "));
    }
    let cores = control.core_keys();
    if !cores.is_empty() {
        let _ = writeln!(out, "- **Core:** {}", cores.join(", "));
    }
    out
}

/// Body of a domain page.
#[must_use]
pub fn domain_markdown(domain: &str) -> String {
    format!("Controls in the {domain} domain.")
}

fn join_set(set: &BTreeSet<&str>) -> String {
    set.iter().copied().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scf::config::{Timeline, TimelineWindow};
    use pretty_assertions::assert_eq;

    fn flags(pairs: &[(&str, bool)]) -> std::collections::BTreeMap<String, bool> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    fn control(id: &str, domain: &str) -> ScfControl {
        ScfControl {
            object_id: id.into(),
            title: format!("{id} title"),
            domain: domain.into(),
            selected: true,
            ..ScfControl::default()
        }
    }

    #[test]
    fn description_all_priority_with_coverage() {
        let mut a = control("A", "Access Control");
        let mut b = control("B", "Asset Management");
        for c in [&mut a, &mut b] {
            c.priority = true;
            c.coverage = flags(&[("soc2", true)]);
        }
        let cfg = ScfConfig::default();
        let text = project_description(&cfg, &[&a, &b]);
        assert_eq!(text, "SCF project with 2 selected controls, covering soc2, all marked as priority.");
        assert!(text.ends_with("all marked as priority."));
    }

    #[test]
    fn description_counts_partial_priority_and_sorts_sets() {
        let mut a = control("A", "");
        a.priority = true;
        a.coverage = flags(&[("soc2", true), ("hipaa", false)]);
        a.core = flags(&[("mcr", true)]);
        let mut b = control("B", "");
        b.coverage = flags(&[("iso27001", true)]);
        b.core = flags(&[("dsr", true)]);
        let c = control("C", "");
        let cfg = ScfConfig {
            timeline: Timeline {
                max_months: 9,
                ..Timeline::default()
            },
            ..ScfConfig::default()
        };
        assert_eq!(
            project_description(&cfg, &[&a, &b, &c]),
            "SCF project with 3 selected controls, covering iso27001, soc2, core: dsr, mcr, over 9 months, 1 marked as priority."
        );
    }

    #[test]
    fn description_singular_control() {
        let a = control("A", "");
        assert_eq!(
            project_description(&ScfConfig::default(), &[&a]),
            "SCF project with 1 selected control."
        );
    }

    #[test]
    fn overview_lists_sorted_unique_domains_and_windows() {
        let a = control("A", "Zeta");
        let b = control("B", "Alpha");
        let c = control("C", "Alpha");
        let cfg = ScfConfig {
            project_name: "Demo".into(),
            timeline: Timeline {
                max_months: 12,
                windows: vec![TimelineWindow {
                    goal: "Foundations".into(),
                    start_month: 1,
                    end_month: 3,
                }],
                ..Timeline::default()
            },
            ..ScfConfig::default()
        };
        let md = overview_markdown(&cfg, &[&a, &b, &c]);
        assert!(md.starts_with("# Demo\n\n"));
        assert!(md.contains("- **Total selected controls:** 3\n"));
        assert!(md.contains("- **Planned duration:** 12 months\n"));
        assert!(md.contains("- **Domains covered:** Alpha, Zeta\n"));
        assert!(md.contains("## Timeline windows\n\n- Foundations (months 1–3)\n"));
    }

    #[test]
    fn overview_omits_optional_sections() {
        let a = control("A", "");
        let md = overview_markdown(&ScfConfig::default(), &[&a]);
        assert!(!md.contains("Planned duration"));
        assert!(!md.contains("Timeline windows"));
        assert!(md.contains("- **Domains covered:** Uncategorized\n"));
    }

    #[test]
    fn negative_duration_is_not_rendered() {
        let a = control("A", "Ops");
        let cfg = ScfConfig {
            timeline: Timeline {
                max_months: -3,
                ..Timeline::default()
            },
            ..ScfConfig::default()
        };
        assert!(!overview_markdown(&cfg, &[&a]).contains("Planned duration"));
        assert!(!project_description(&cfg, &[&a]).contains("months"));
    }

    #[test]
    fn control_page_renders_metadata() {
        let mut c = control("IAC-01", "Identification & Authentication");
        c.control_description = "Manage identities.".into();
        c.cadence = "Annual".into();
        c.weight = 7.5;
        c.coverage = flags(&[("soc2", true), ("nist_csf", true), ("pci", false)]);
        c.core = flags(&[("baseline", true)]);
        let md = control_markdown(&c);
        assert_eq!(
            md,
            "# IAC-01 - IAC-01 title\n\n## Control intent\n\nManage identities.\n\n\
             - **Domain:** Identification & Authentication\n\
             - **Cadence:** Annual\n\
             - **Weight:** 7.50\n\
             - **Framework coverage:** nist_csf, soc2\n\
             - **Core:** baseline\n"
        );
    }

    #[test]
    fn control_page_skips_empty_fields() {
        let c = control("A", "");
        let md = control_markdown(&c);
        assert!(!md.contains("Cadence"));
        assert!(!md.contains("Weight"));
        assert!(!md.contains("Framework coverage"));
        assert!(!md.contains("Core"));
        assert!(!md.contains("Assessment objectives"));
    }
}
