//! Family-to-layout classification and the per-layout table walkers.
//!
//! Most datasheet pages share the generic rowspan-block shape; a handful of
//! families publish irregular tables that need their own routine. A page
//! that matches nothing yields an empty feature map, never an error.

use std::sync::LazyLock;

use anyhow::{anyhow, Context, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::table::{self, text_of};
use super::{header, FeatureValue, Features};
use crate::catalog::Series;

static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody > tr").unwrap());
static ALL_ROWS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static P: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static P_OR_LI: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p, li").unwrap());
static META_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="title"]"#).unwrap());

/// Which table-walking routine a datasheet page gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Catalyst1000,
    Unmanaged110,
    Managed300,
    WirelessAc,
    WirelessAx,
    Generic,
}

/// Pick the layout for a family concept string. Substring matches, checked
/// in a fixed priority order; note that "Cisco Business 110 Series Unmanaged
/// Switches" does not contain the plain 110-series pattern and so falls
/// through to the generic walker, which handles its pages fine.
pub fn classify(family: &str) -> LayoutKind {
    if family.contains("Cisco Catalyst 1000 Series Switches") {
        LayoutKind::Catalyst1000
    } else if family.contains("Cisco 110 Series Unmanaged Switches") {
        LayoutKind::Unmanaged110
    } else if family.contains("Cisco 350 Series Managed Switches") {
        LayoutKind::Managed300
    } else if family.contains("Cisco Business Wireless AC") {
        LayoutKind::WirelessAc
    } else if family.contains("Cisco Business Wireless AX") {
        LayoutKind::WirelessAx
    } else {
        LayoutKind::Generic
    }
}

/// Meta-title to access-point sub-model mappings.
const AC_SUB_MODELS: &[(&str, &str)] = &[
    ("Cisco Business 140AC Access Point Data Sheet", "CBW140AC"),
    ("Cisco Business 145AC Access Point Data Sheet", "CBW145AC"),
    ("Cisco Business 240AC Access Point Data Sheet", "CBW240AC"),
];

const AX_SUB_MODELS: &[(&str, &str)] = &[
    ("Cisco Business 150AX Access Point Data Sheet", "CBW150AXM"),
    (
        "Cisco Business Wireless 151AXM Mesh Extender Datasheet",
        "CBW151AXM",
    ),
];

/// Run the layout's walker over a parsed page.
pub fn dispatch(kind: LayoutKind, doc: &Html) -> Features {
    match kind {
        LayoutKind::Catalyst1000 => catalyst_1000(doc),
        LayoutKind::Unmanaged110 => unmanaged_110(doc),
        LayoutKind::Managed300 => managed_300(doc),
        LayoutKind::WirelessAc => wireless(doc, AC_SUB_MODELS),
        LayoutKind::WirelessAx => wireless(doc, AX_SUB_MODELS),
        LayoutKind::Generic => generic(doc),
    }
}

// ── Generic walker ──────────────────────────────────────────────────────────

/// The default walker: rowspan'd model blocks interleaved with two-cell
/// key/value rows, in one pass over `tbody > tr` with a skip counter.
pub fn generic(doc: &Html) -> Features {
    let rows: Vec<ElementRef> = doc.select(&BODY_ROWS).collect();
    let mut features = Features::new();
    generic_rows(&rows, &mut features);
    features
}

fn generic_rows(rows: &[ElementRef], features: &mut Features) {
    let mut skip = 0usize;
    for (i, row) in rows.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let span = table::row_span(*row);
        let cells = table::row_cells(*row);
        if span > 1 && table::has_desired_title(&cells) {
            table::parse_model_block(rows, i, span - 1, &cells, cells.len(), features);
            skip = span - 1;
        } else if span > 1 {
            // Rowspan'd spacer cell with no title label: the real header is
            // the next row, and the block is two rows shorter.
            let Some(next) = rows.get(i + 1) else {
                continue;
            };
            let raw = table::row_cells_raw(*next);
            table::parse_model_block(
                rows,
                i + 1,
                span.saturating_sub(2),
                &raw,
                raw.len(),
                features,
            );
            skip = span - 1;
        } else if span == 0 && cells.len() == 2 {
            kv_row(*row, &cells, features);
        }
    }
}

/// Store a two-cell row as key/value. The value prefers the second cell's
/// `<p>`/`<li>` descendants (a lone item collapses to a scalar); keys
/// starting with '-' are list continuations and are dropped.
fn kv_row(row: ElementRef, cells: &[String], features: &mut Features) {
    let key = header::normalize(&cells[0]);
    if key.is_empty() || key.starts_with('-') {
        return;
    }
    let tds: Vec<ElementRef> = row.select(&TD).collect();
    let value = match tds.get(1) {
        Some(td) => {
            let items: Vec<String> = td
                .select(&P_OR_LI)
                .map(text_of)
                .filter(|t| !t.is_empty())
                .collect();
            match items.len() {
                0 => FeatureValue::text(cells[1].clone()),
                1 => FeatureValue::Text(items.into_iter().next().unwrap()),
                _ => FeatureValue::List(items),
            }
        }
        None => FeatureValue::text(cells[1].clone()),
    };
    if value.as_str().map(str::is_empty).unwrap_or(false) {
        return;
    }
    features.insert(key, value);
}

// ── Wireless access points ──────────────────────────────────────────────────

/// AC/AX access-point datasheets describe a single device; the generic
/// walker's output is nested under the sub-model named by the page's
/// `<meta name="title">`.
fn wireless(doc: &Html, sub_models: &[(&str, &str)]) -> Features {
    let mut features = Features::new();
    let title = doc
        .select(&META_TITLE)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::trim);
    let sub = title.and_then(|t| {
        sub_models
            .iter()
            .find(|(meta, _)| *meta == t)
            .map(|(_, sub)| *sub)
    });
    match sub {
        Some(sub) => {
            features.insert(sub.to_string(), FeatureValue::Map(generic(doc)));
        }
        None => warn!(
            "access-point page title {:?} matches no known sub-model",
            title
        ),
    }
    features
}

// ── 110-series unmanaged ────────────────────────────────────────────────────

/// Family attributes the 110-series page publishes as "MODEL: value" lists
/// that must be regrouped per model.
const UNMANAGED_PER_MODEL_KEYS: &[&str] = &[
    "physical_dimensions",
    "weight",
    "ports",
    "switching_capacity",
    "forwarding_capacity",
];

/// The 110-series unmanaged page keys every row by its first cell: a model
/// identifier, a per-model list attribute, the three-column PoE table, or a
/// plain family attribute. Malformed rows are logged and skipped.
fn unmanaged_110(doc: &Html) -> Features {
    let mut features = Features::new();
    for row in doc.select(&BODY_ROWS) {
        let tds: Vec<ElementRef> = row.select(&TD).collect();
        let Some(first) = tds.first() else {
            continue;
        };
        let label = text_of(*first);
        let key = if Series::Cisco110Unmanaged.contains(&label) {
            label.clone()
        } else {
            header::normalize(&label.to_lowercase())
        };
        if let Err(e) = unmanaged_row(&tds, &key, &mut features) {
            warn!("skipping 110-series row {:?}: {}", key, e);
        }
    }
    features
}

fn unmanaged_row(tds: &[ElementRef], key: &str, features: &mut Features) -> Result<()> {
    let value_td = tds.get(1).context("row has no value cell")?;
    let values: Vec<String> = value_td
        .children()
        .filter_map(ElementRef::wrap)
        .map(text_of)
        .collect();

    if UNMANAGED_PER_MODEL_KEYS.contains(&key) {
        for value in &values {
            let Some((model, entry)) = value.split_once(':') else {
                continue;
            };
            let model = model.trim();
            if Series::Cisco110Unmanaged.contains(model) {
                model_attrs(features, model)
                    .insert(key.to_string(), FeatureValue::text(entry.trim()));
            }
        }
    } else if key == "power_over_ethernet" {
        // Three parallel columns: model, PoE budget, PoE port count.
        let models = column_texts(tds.get(1), "Model Name")?;
        let budgets = column_texts(tds.get(2), "Power Dedicated to PoE")?;
        let ports = column_texts(tds.get(3), "Number of PoE Ports")?;
        for (i, model) in models.iter().enumerate() {
            let (Some(budget), Some(port)) = (budgets.get(i), ports.get(i)) else {
                return Err(anyhow!("PoE columns are not parallel"));
            };
            let attrs = model_attrs(features, model);
            attrs.insert(
                "power_dedicated_to_poe".into(),
                FeatureValue::text(budget.clone()),
            );
            attrs.insert(
                "number_of_ports_that_support_poe".into(),
                FeatureValue::text(port.clone()),
            );
        }
    } else if !key.is_empty() {
        if values.len() == 1 {
            features.insert(
                key.to_string(),
                FeatureValue::Text(values.into_iter().next().unwrap()),
            );
        } else {
            features.insert(key.to_string(), FeatureValue::List(values));
        }
    }
    Ok(())
}

fn model_attrs<'a>(features: &'a mut Features, model: &str) -> &'a mut Features {
    let entry = features
        .entry(model.to_string())
        .or_insert_with(|| FeatureValue::Map(Features::new()));
    // A scalar that landed under a model name earlier loses to the record.
    if !matches!(entry, FeatureValue::Map(_)) {
        *entry = FeatureValue::Map(Features::new());
    }
    match entry {
        FeatureValue::Map(m) => m,
        _ => unreachable!(),
    }
}

/// Paragraph texts of a PoE column cell, minus its repeated header label.
fn column_texts(td: Option<&ElementRef>, label: &str) -> Result<Vec<String>> {
    let td = td.with_context(|| format!("missing PoE column {:?}", label))?;
    Ok(td
        .select(&P)
        .map(|p| text_of(p))
        .filter(|t| !t.is_empty() && !t.contains(label))
        .collect())
}

// ── 350-series managed ──────────────────────────────────────────────────────

/// The 350-series managed page declares no usable rowspans; model blocks are
/// recognized by a "Model" header row and consumed at a fixed width. The PoE
/// block on this page is irregular and shorter than the roster.
fn managed_300(doc: &Html) -> Features {
    let rows: Vec<ElementRef> = doc.select(&BODY_ROWS).collect();
    let mut features = Features::new();
    let mut skip = 0usize;
    for (i, row) in rows.iter().enumerate() {
        if skip > 0 {
            skip -= 1;
            continue;
        }
        let cells = table::row_cells(*row);
        if cells.len() == 1 {
            continue;
        }
        if cells.len() == 2 {
            let key = header::normalize(&cells[0]);
            if !key.is_empty() && !key.starts_with('-') && !cells[1].is_empty() {
                features.insert(key, FeatureValue::text(cells[1].clone()));
            }
        }
        if cells.iter().any(|c| c == "Model" || c == "Model Name") {
            let span = if cells.iter().any(|c| c == "Power Dedicated to PoE") {
                14
            } else {
                Series::Cisco350Managed.models().len()
            };
            table::parse_model_block(&rows, i, span, &cells, cells.len(), &mut features);
            skip = span;
        }
    }
    features
}

// ── Catalyst 1000 ───────────────────────────────────────────────────────────

const CATALYST_MODEL_HEADERS: &[&str] = &[
    "rj-45_ports",
    "uplink_ports",
    "power_dedicated_to_poe",
    "fan",
    "unit_dimensions",
    "unit_weight",
];

const CATALYST_PORT_GROUP_HEADERS: &[&str] = &[
    "8-port models",
    "16-port models",
    "24-port models (1/10G uplinks)",
    "48-port models (1/10G uplinks)",
];

/// Two-cell rows dropped from the generic pile.
const CATALYST_UNDESIRED_LABELS: &[&str] = &["Product number", "Note:", "Note", "*Note:"];

/// Wide rows kept as management/compliance lists.
const CATALYST_LIST_LABELS: &[&str] = &["Management", "Standards", "RFC compliance"];

/// The Catalyst-1000 page mixes several table shapes; rows are first sorted
/// into categories by shape in a single pass over every `<tr>`, then each
/// category is assembled into features.
fn catalyst_1000(doc: &Html) -> Features {
    let rows: Vec<ElementRef> = doc.select(&ALL_ROWS).collect();
    let mut model_rows: Vec<Vec<String>> = Vec::new();
    let mut port_group_rows: Vec<Vec<String>> = Vec::new();
    let mut generic_rows: Vec<Vec<String>> = Vec::new();
    let mut list_rows: Vec<Vec<String>> = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .children()
            .filter_map(ElementRef::wrap)
            .map(text_of)
            .filter(|t| !t.is_empty())
            .collect();

        if cells
            .first()
            .map(|c| Series::Catalyst1000.contains(c))
            .unwrap_or(false)
        {
            model_rows.push(cells.clone());
        }
        if cells.len() == 1 {
            continue;
        }
        if cells.len() == 5 && cells.iter().any(|c| c == "8-port models") {
            // The per-port-count metrics grid follows this header row.
            for r in rows.iter().skip(i + 1).take(30) {
                let data: Vec<String> = r
                    .children()
                    .filter_map(ElementRef::wrap)
                    .map(text_of)
                    .collect();
                port_group_rows.push(data);
            }
        }
        if cells.len() == 2
            && !cells.iter().any(|c| Series::Catalyst1000.contains(c))
            && !cells
                .iter()
                .any(|c| CATALYST_UNDESIRED_LABELS.contains(&c.as_str()))
        {
            generic_rows.push(cells.clone());
        }
        if (cells.len() == 3 || cells.len() == 4)
            && cells
                .iter()
                .any(|c| CATALYST_LIST_LABELS.contains(&c.as_str()))
        {
            let mut cells = cells;
            cells[0] = header::normalize(&cells[0]);
            list_rows.push(cells);
        }
    }

    let mut features = Features::new();

    let roster_len = Series::Catalyst1000.models().len();
    for cells in model_rows.iter().take(roster_len) {
        let Some((model, rest)) = cells.split_first() else {
            continue;
        };
        let attrs: Features = CATALYST_MODEL_HEADERS
            .iter()
            .zip(rest)
            .map(|(k, v)| (k.to_string(), FeatureValue::text(v.clone())))
            .collect();
        features.insert(model.clone(), FeatureValue::Map(attrs));
    }

    for cells in &port_group_rows {
        let Some((label, rest)) = cells.split_first() else {
            continue;
        };
        if label.is_empty() {
            continue;
        }
        let groups: Features = CATALYST_PORT_GROUP_HEADERS
            .iter()
            .zip(rest)
            .map(|(k, v)| (k.to_string(), FeatureValue::text(v.clone())))
            .collect();
        features.insert(label.clone(), FeatureValue::Map(groups));
    }

    for cells in &generic_rows {
        let key = header::normalize(&cells[0]);
        if !key.is_empty() {
            features.insert(key, FeatureValue::text(cells[1].clone()));
        }
    }

    for cells in &list_rows {
        let Some((key, rest)) = cells.split_first() else {
            continue;
        };
        features.insert(key.clone(), FeatureValue::List(rest.to_vec()));
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_by_substring_priority() {
        assert_eq!(
            classify("Cisco Catalyst 1000 Series Switches"),
            LayoutKind::Catalyst1000
        );
        assert_eq!(
            classify("Cisco 110 Series Unmanaged Switches"),
            LayoutKind::Unmanaged110
        );
        assert_eq!(
            classify("Cisco 350 Series Managed Switches"),
            LayoutKind::Managed300
        );
        assert_eq!(classify("Cisco Business Wireless AC"), LayoutKind::WirelessAc);
        assert_eq!(classify("Cisco Business Wireless AX"), LayoutKind::WirelessAx);
        assert_eq!(
            classify("Cisco Business 250 Series Smart Switches"),
            LayoutKind::Generic
        );
    }

    #[test]
    fn business_110_is_not_the_legacy_110_layout() {
        // The "Cisco Business" prefix breaks the legacy substring.
        assert_eq!(
            classify("Cisco Business 110 Series Unmanaged Switches"),
            LayoutKind::Generic
        );
    }

    #[test]
    fn generic_kv_rows_and_model_block() {
        let html = r#"<table><tbody>
            <tr><td rowspan="3">Model</td><td>Switching Capacity (Gbps)</td><td>MTBF</td></tr>
            <tr><td>SG350-10</td><td>20.0</td><td>2000000</td></tr>
            <tr><td>SG350-28</td><td>56.0</td><td>1900000</td></tr>
            <tr><td>Warranty</td><td>Limited lifetime</td></tr>
            <tr><td>- continued</td><td>ignored</td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = generic(&doc);

        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Limited lifetime"))
        );
        assert!(features.get("- continued").is_none());
        let sg10 = features.get("SG350-10").unwrap();
        let FeatureValue::Map(attrs) = sg10 else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("switching_capacity"),
            Some(&FeatureValue::Float(20.0))
        );
    }

    #[test]
    fn generic_value_lists_come_from_list_items() {
        let html = r#"<table><tbody>
            <tr><td><p>Certifications</p></td><td><ul><li>CE</li><li>FCC</li></ul></td></tr>
            <tr><td><p>Warranty</p></td><td><p>Limited lifetime</p></td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = generic(&doc);
        assert_eq!(
            features.get("certifications"),
            Some(&FeatureValue::List(vec!["CE".into(), "FCC".into()]))
        );
        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Limited lifetime"))
        );
    }

    #[test]
    fn generic_spacer_row_shifts_to_next_header() {
        // Rowspan'd first cell with no title label: header is the next row.
        let html = r#"<table><tbody>
            <tr><td rowspan="4">Performance</td><td>filler</td></tr>
            <tr><td>SKU</td><td>Forwarding Rate (mpps)</td></tr>
            <tr><td>SG250-08</td><td>11.9</td></tr>
            <tr><td>SG250-10P</td><td>14.8</td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = generic(&doc);
        let FeatureValue::Map(attrs) = features.get("SG250-08").unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("forwarding_rate"),
            Some(&FeatureValue::Float(11.9))
        );
        assert!(features.get("SG250-10P").is_some());
    }

    #[test]
    fn wireless_page_nests_under_sub_model() {
        let html = r#"<html><head>
            <meta name="title" content="Cisco Business 140AC Access Point Data Sheet">
            </head><body><table><tbody>
            <tr><td>Antenna</td><td>Internal omnidirectional</td></tr>
            </tbody></table></body></html>"#;
        let doc = Html::parse_document(html);
        let features = dispatch(LayoutKind::WirelessAc, &doc);
        let FeatureValue::Map(attrs) = features.get("CBW140AC").unwrap() else {
            panic!("expected sub-model map")
        };
        assert_eq!(
            attrs.get("antenna"),
            Some(&FeatureValue::text("Internal omnidirectional"))
        );
    }

    #[test]
    fn wireless_unknown_title_yields_empty_features() {
        let html = r#"<html><head><meta name="title" content="Some Other Page"></head>
            <body><table><tbody><tr><td>Antenna</td><td>x</td></tr></tbody></table></body></html>"#;
        let doc = Html::parse_document(html);
        assert!(dispatch(LayoutKind::WirelessAx, &doc).is_empty());
    }

    #[test]
    fn unmanaged_110_per_model_and_scalar_rows() {
        let html = r#"<table><tbody>
            <tr><td><p>Switching capacity</p></td><td>
                <p>SF110D-05: 1.0 Gbps</p>
                <p>SG110-24: 48.0 Gbps</p>
                <p>NOPE-99: 9.9 Gbps</p>
            </td></tr>
            <tr><td><p>Warranty</p></td><td><p>Limited lifetime</p></td></tr>
            <tr><td><p>Certifications</p></td><td><p>CE</p><p>FCC</p></td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = unmanaged_110(&doc);

        let FeatureValue::Map(attrs) = features.get("SF110D-05").unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("switching_capacity"),
            Some(&FeatureValue::text("1.0 Gbps"))
        );
        assert!(features.get("NOPE-99").is_none());
        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Limited lifetime"))
        );
        assert_eq!(
            features.get("certifications"),
            Some(&FeatureValue::List(vec!["CE".into(), "FCC".into()]))
        );
    }

    #[test]
    fn unmanaged_110_poe_columns_zip_per_model() {
        let html = r#"<table><tbody>
            <tr>
              <td><p>Power over Ethernet</p></td>
              <td><p>Model Name</p><p>SF110D-08HP</p><p>SG110-16HP</p></td>
              <td><p>Power Dedicated to PoE</p><p>32W</p><p>64W</p></td>
              <td><p>Number of PoE Ports</p><p>4</p><p>8</p></td>
            </tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = unmanaged_110(&doc);
        let FeatureValue::Map(attrs) = features.get("SG110-16HP").unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("power_dedicated_to_poe"),
            Some(&FeatureValue::text("64W"))
        );
        assert_eq!(
            attrs.get("number_of_ports_that_support_poe"),
            Some(&FeatureValue::text("8"))
        );
    }

    #[test]
    fn unmanaged_110_ragged_poe_columns_are_skipped() {
        // Budget column is one entry short; the row is dropped, the rest of
        // the table still parses.
        let html = r#"<table><tbody>
            <tr>
              <td><p>Power over Ethernet</p></td>
              <td><p>Model Name</p><p>SF110D-08HP</p><p>SG110-16HP</p></td>
              <td><p>Power Dedicated to PoE</p><p>32W</p></td>
              <td><p>Number of PoE Ports</p><p>4</p><p>8</p></td>
            </tr>
            <tr><td><p>Warranty</p></td><td><p>Limited lifetime</p></td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = unmanaged_110(&doc);
        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Limited lifetime"))
        );
    }

    #[test]
    fn managed_300_fixed_width_block() {
        let mut html = String::from(
            r#"<table><tbody>
            <tr><td>Performance</td></tr>
            <tr><td>Model</td><td>Switching Capacity (Gbps)</td><td>MTBF</td></tr>"#,
        );
        // Block width is the roster length; pad with roster models.
        for (i, model) in Series::Cisco350Managed.models().iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}.0</td><td>{}</td></tr>",
                model,
                i + 10,
                2_000_000 - i
            ));
        }
        html.push_str("<tr><td>Warranty</td><td>Limited lifetime</td></tr></tbody></table>");
        let doc = Html::parse_document(&html);
        let features = managed_300(&doc);

        let first = Series::Cisco350Managed.models()[0];
        let FeatureValue::Map(attrs) = features.get(first).unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("switching_capacity"),
            Some(&FeatureValue::Float(10.0))
        );
        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Limited lifetime"))
        );
    }

    #[test]
    fn managed_300_poe_block_consumes_fourteen_rows() {
        let models = Series::Cisco350Managed.models();
        let mut html = String::from(
            r#"<table><tbody>
            <tr><td>Power over Ethernet</td></tr>
            <tr><td>Model</td><td>Power Dedicated to PoE</td><td>MTBF</td></tr>"#,
        );
        // The PoE block is shorter than the roster; exactly 14 rows belong.
        for model in &models[..14] {
            html.push_str(&format!(
                "<tr><td>{}</td><td>120W</td><td>2000000</td></tr>",
                model
            ));
        }
        html.push_str(&format!(
            "<tr><td>{}</td><td>370W</td><td>1999999</td></tr>",
            models[14]
        ));
        html.push_str("</tbody></table>");
        let doc = Html::parse_document(&html);
        let features = managed_300(&doc);

        let FeatureValue::Map(attrs) = features.get(models[13]).unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(
            attrs.get("power_dedicated_to_poe"),
            Some(&FeatureValue::text("120W"))
        );
        assert_eq!(attrs.get("mtbf"), Some(&FeatureValue::Int(2_000_000)));
        // The row after the block is outside the fixed width and stays out.
        assert!(features.get(models[14]).is_none());
    }

    #[test]
    fn catalyst_1000_categories_assemble() {
        let html = r#"<table><tbody>
            <tr><td>C1000-8T-2G-L</td><td>8</td><td>2 SFP</td><td>n/a</td><td>Y</td><td>26x4x27</td><td>1.18</td></tr>
            <tr><td>Warranty</td><td>Enhanced limited lifetime</td></tr>
            <tr><td>Product number</td><td>dropped</td></tr>
            <tr><td>Management</td><td>SNMP</td><td>RMON</td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = catalyst_1000(&doc);

        let FeatureValue::Map(attrs) = features.get("C1000-8T-2G-L").unwrap() else {
            panic!("expected model attributes")
        };
        assert_eq!(attrs.get("rj-45_ports"), Some(&FeatureValue::text("8")));
        assert_eq!(attrs.get("uplink_ports"), Some(&FeatureValue::text("2 SFP")));
        assert_eq!(attrs.get("fan"), Some(&FeatureValue::text("Y")));

        assert_eq!(
            features.get("warranty"),
            Some(&FeatureValue::text("Enhanced limited lifetime"))
        );
        assert!(features.get("product_number").is_none());
        assert_eq!(
            features.get("management"),
            Some(&FeatureValue::List(vec!["SNMP".into(), "RMON".into()]))
        );
    }

    #[test]
    fn catalyst_1000_port_group_grid() {
        let html = r#"<table><tbody>
            <tr><td>Metric</td><td>8-port models</td><td>16-port models</td><td>24-port models (1/10G uplinks)</td><td>48-port models (1/10G uplinks)</td></tr>
            <tr><td>Forwarding rate</td><td>14.88</td><td>26.78</td><td>95.23</td><td>130.94</td></tr>
        </tbody></table>"#;
        let doc = Html::parse_document(html);
        let features = catalyst_1000(&doc);
        let FeatureValue::Map(groups) = features.get("Forwarding rate").unwrap() else {
            panic!("expected port group map")
        };
        assert_eq!(
            groups.get("8-port models"),
            Some(&FeatureValue::text("14.88"))
        );
        assert_eq!(
            groups.get("48-port models (1/10G uplinks)"),
            Some(&FeatureValue::text("130.94"))
        );
    }
}
