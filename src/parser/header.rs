use std::sync::LazyLock;

use regex::Regex;

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Normalize a raw table header into a canonical snake_case attribute key.
///
/// Pipeline: drop parenthetical notes ("Weight (kg)" → "Weight"), lowercase,
/// join whitespace-separated tokens with `_`, strip commas and colons, then
/// collapse the known synonym families onto one canonical key.
pub fn normalize(raw: &str) -> String {
    let refined = PAREN_RE.replace_all(&raw.to_lowercase(), "").replace('/', " ");
    let joined = refined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(',', "")
        .replace(':', "");

    if joined.contains("forwarding_rate")
        || joined.contains("capacity_in_millions_of_packets")
        || joined.contains("capacity_in_mpps")
    {
        return "forwarding_rate".to_string();
    }
    if joined.contains("switching_capacity") {
        return "switching_capacity".to_string();
    }
    if joined.contains("mtbf") {
        return "mtbf".to_string();
    }
    // Colons are stripped above, so the worst-case synonym is matched in its
    // stripped spelling rather than the raw "power_consumption:_worst_case".
    if joined.contains("power_consumption_worst_case") {
        return "power_consumption".to_string();
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_parentheticals() {
        assert_eq!(normalize("Weight (kg)"), "weight");
        assert_eq!(normalize("Unit Dimensions (W x D x H)"), "unit_dimensions");
    }

    #[test]
    fn joins_and_cleans() {
        assert_eq!(normalize("Physical Dimensions:"), "physical_dimensions");
        assert_eq!(normalize("Ports,"), "ports");
        assert_eq!(normalize("RJ-45 Ports"), "rj-45_ports");
    }

    #[test]
    fn slash_becomes_separator() {
        assert_eq!(normalize("Heat/Dissipation"), "heat_dissipation");
    }

    #[test]
    fn forwarding_rate_synonyms() {
        assert_eq!(normalize("Forwarding Rate (Mpps)"), "forwarding_rate");
        assert_eq!(
            normalize("Capacity in Millions of Packets per Second"),
            "forwarding_rate"
        );
        assert_eq!(normalize("Capacity in mpps"), "forwarding_rate");
    }

    #[test]
    fn switching_capacity_synonyms() {
        assert_eq!(
            normalize("Switching Capacity in Gigabits per Second"),
            "switching_capacity"
        );
    }

    #[test]
    fn mtbf_any_casing() {
        for raw in ["MTBF", "mtbf (hours)", "MTBF, Hours", "Mtbf:"] {
            assert_eq!(normalize(raw), "mtbf");
        }
    }

    #[test]
    fn power_consumption_worst_case() {
        assert_eq!(normalize("Power Consumption: Worst Case"), "power_consumption");
    }

    #[test]
    fn empty_input_yields_empty_key() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn passthrough_unknown_headers() {
        assert_eq!(normalize("PoE Power Budget"), "poe_power_budget");
        assert_eq!(normalize("Combo Ports"), "combo_ports");
    }
}
