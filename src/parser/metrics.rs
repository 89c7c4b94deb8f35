//! Post-extraction enrichment: fan presence, port descriptions, and the
//! vendor-published forwarding-rate / switching-capacity / MTBF constants
//! keyed by RJ-45 port count.

use std::sync::LazyLock;

use regex::Regex;

use super::layout::LayoutKind;
use super::{FeatureValue, Features};
use crate::catalog::{self, Series};

static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").unwrap());
// Word-bounded SFP with an optional trailing '+' folded into the match, so a
// bare-SFP hit is exactly the literal "SFP" (the regex crate has no lookahead).
static SFP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bSFP\b\+?").unwrap());

/// Device sub-classification for a port-count table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceClass {
    /// Matches regardless of device markers.
    Any,
    /// Model identifier carries the Fast-Ethernet "FE" marker.
    FastEthernet,
    /// Uplink description mentions SFP but not SFP+.
    BareSfpUplink,
    /// Fallback once the marker classes failed.
    Default,
}

struct PortMetrics {
    ports: u64,
    device: DeviceClass,
    rate: f64,
    capacity: f64,
    mtbf: i64,
}

// The Catalyst-1000 and legacy-SMB tables are textually identical today but
// belong to different hardware generations; they are kept as independent
// call-site tables rather than merged.
#[rustfmt::skip]
const PORT_METRICS_CATALYST_1000: &[PortMetrics] = &[
    PortMetrics { ports: 8, device: DeviceClass::Any, rate: 14.88, capacity: 20.0, mtbf: 2171669 },
    PortMetrics { ports: 16, device: DeviceClass::Any, rate: 26.78, capacity: 36.0, mtbf: 2165105 },
    PortMetrics { ports: 24, device: DeviceClass::FastEthernet, rate: 9.52, capacity: 12.8, mtbf: 2026793 },
    PortMetrics { ports: 24, device: DeviceClass::BareSfpUplink, rate: 41.67, capacity: 56.0, mtbf: 2026793 },
    PortMetrics { ports: 24, device: DeviceClass::Default, rate: 95.23, capacity: 128.0, mtbf: 2026793 },
    PortMetrics { ports: 48, device: DeviceClass::FastEthernet, rate: 13.09, capacity: 17.6, mtbf: 1452667 },
    PortMetrics { ports: 48, device: DeviceClass::BareSfpUplink, rate: 77.38, capacity: 104.0, mtbf: 1452667 },
    PortMetrics { ports: 48, device: DeviceClass::Default, rate: 130.94, capacity: 176.0, mtbf: 1452667 },
];

#[rustfmt::skip]
const PORT_METRICS_SMB_SERIES: &[PortMetrics] = &[
    PortMetrics { ports: 8, device: DeviceClass::Any, rate: 14.88, capacity: 20.0, mtbf: 2171669 },
    PortMetrics { ports: 16, device: DeviceClass::Any, rate: 26.78, capacity: 36.0, mtbf: 2165105 },
    PortMetrics { ports: 24, device: DeviceClass::FastEthernet, rate: 9.52, capacity: 12.8, mtbf: 2026793 },
    PortMetrics { ports: 24, device: DeviceClass::BareSfpUplink, rate: 41.67, capacity: 56.0, mtbf: 2026793 },
    PortMetrics { ports: 24, device: DeviceClass::Default, rate: 95.23, capacity: 128.0, mtbf: 2026793 },
    PortMetrics { ports: 48, device: DeviceClass::FastEthernet, rate: 13.09, capacity: 17.6, mtbf: 1452667 },
    PortMetrics { ports: 48, device: DeviceClass::BareSfpUplink, rate: 77.38, capacity: 104.0, mtbf: 1452667 },
    PortMetrics { ports: 48, device: DeviceClass::Default, rate: 130.94, capacity: 176.0, mtbf: 1452667 },
];

/// Apply the enrichment pass appropriate for the page's layout. Wireless
/// access-point pages carry no per-model switch attributes and are left as-is.
pub fn resolve(features: &mut Features, kind: LayoutKind) {
    match kind {
        LayoutKind::Catalyst1000 => resolve_catalyst_1000(features),
        LayoutKind::WirelessAc | LayoutKind::WirelessAx => {}
        _ => resolve_legacy_series(features),
    }
}

/// Catalyst-1000 rules: fan flag decoding, weight unit suffix, port-count
/// metrics, uplink description rewriting.
pub fn resolve_catalyst_1000(features: &mut Features) {
    for (model, value) in features.iter_mut() {
        if !Series::Catalyst1000.contains(model) {
            continue;
        }
        let Some(attrs) = value.as_map_mut() else { continue };

        let fan = attrs
            .get("fan")
            .and_then(FeatureValue::as_str)
            .map(|f| if f == "Y" { "No" } else { "Yes" });
        if let Some(decoded) = fan {
            attrs.insert("fan".into(), FeatureValue::text(decoded));
        }

        let weight = attrs
            .get("unit_weight")
            .and_then(FeatureValue::as_str)
            .map(|w| format!("{} kg", w));
        if let Some(with_unit) = weight {
            attrs.insert("unit_weight".into(), FeatureValue::Text(with_unit));
        }

        apply_port_metrics(model, attrs, PORT_METRICS_CATALYST_1000);
        rewrite_uplink_ports(attrs);
    }
}

/// Legacy SMB-series rules, applied to every known roster model present.
/// The 110-series unmanaged family additionally gets the fan presence rule
/// (a hard-coded exception list of size one).
pub fn resolve_legacy_series(features: &mut Features) {
    for (model, value) in features.iter_mut() {
        if !catalog::is_known_model(model) && model != "SG100-24HP" {
            continue;
        }
        let Some(attrs) = value.as_map_mut() else { continue };

        if Series::Cisco110Unmanaged.contains(model) || model == "SG100-24HP" {
            let fan = if model == "SG100-24HP" { "Yes" } else { "No" };
            attrs.insert("fan".into(), FeatureValue::text(fan));
        }

        if let Some(fc) = attrs.remove("forwarding_capacity") {
            attrs.insert("forwarding_rate".into(), fc);
        }

        apply_port_metrics(model, attrs, PORT_METRICS_SMB_SERIES);
        rewrite_uplink_ports(attrs);
    }
}

/// Rewrite `rj-45_ports` to "<N> x Gigabit Ethernet" and fill in the
/// vendor constants for that port count. Skipped when the field is absent
/// or does not start with a port count.
fn apply_port_metrics(model: &str, attrs: &mut Features, table: &[PortMetrics]) {
    let Some(raw) = attrs.get("rj-45_ports").and_then(FeatureValue::as_str) else {
        return;
    };
    let Some(ports) = LEADING_INT_RE
        .find(raw)
        .and_then(|m| m.as_str().parse::<u64>().ok())
    else {
        return;
    };
    attrs.insert(
        "rj-45_ports".into(),
        FeatureValue::Text(format!("{} x Gigabit Ethernet", ports)),
    );

    let uplink = attrs
        .get("uplink_ports")
        .and_then(FeatureValue::as_str)
        .map(str::to_string);
    let Some(entry) = table.iter().find(|e| {
        e.ports == ports
            && match e.device {
                DeviceClass::Any | DeviceClass::Default => true,
                DeviceClass::FastEthernet => model.contains("FE"),
                DeviceClass::BareSfpUplink => {
                    uplink.as_deref().map(has_bare_sfp).unwrap_or(false)
                }
            }
    }) else {
        return;
    };
    attrs.insert("forwarding_rate".into(), FeatureValue::Float(entry.rate));
    attrs.insert("switching_capacity".into(), FeatureValue::Float(entry.capacity));
    attrs.insert("mtbf".into(), FeatureValue::Int(entry.mtbf));
}

/// Normalize the uplink description to "<N> 10G SFP+" / "<N> Gigabit
/// Ethernet SFP", preserving a " combo" suffix when the raw text says so.
fn rewrite_uplink_ports(attrs: &mut Features) {
    let Some(raw) = attrs.get("uplink_ports").and_then(FeatureValue::as_str) else {
        return;
    };
    let Some(n) = LEADING_INT_RE.find(raw).map(|m| m.as_str().to_string()) else {
        return;
    };
    let combo = if raw.to_lowercase().contains("combo") {
        " combo"
    } else {
        ""
    };
    let rewritten = if raw.contains("SFP+") {
        format!("{} 10G SFP+{}", n, combo)
    } else if raw.contains("SFP") {
        format!("{} Gigabit Ethernet SFP{}", n, combo)
    } else {
        return;
    };
    attrs.insert("uplink_ports".into(), FeatureValue::Text(rewritten));
}

/// True when the text mentions SFP that is not SFP+.
fn has_bare_sfp(text: &str) -> bool {
    SFP_RE.find_iter(text).any(|m| m.as_str() == "SFP")
}
