use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::warn;

use super::header;
use super::{FeatureValue, Features};

static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").unwrap());

/// Row labels that mark the start of a model-spanning block.
pub const DESIRED_TITLES: &[&str] = &[
    "Model",
    "Model Name",
    "Model name",
    "SKU",
    "Product Name",
    "Product name",
    "Product Ordering Number",
    "Data rates supported",
    "General",
];

/// Label cells dropped from a model-header row before the header slice.
const MODEL_HEADER_LABELS: &[&str] = &[
    "Model",
    "Model Name",
    "Model name",
    "SKU",
    "Product Name",
    "Product name",
    "Product Ordering Number",
];

/// Collapse an element's text content to single-space-separated form.
pub fn text_of(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Non-empty `<td>` texts of a row.
pub fn row_cells(row: ElementRef) -> Vec<String> {
    row.select(&TD)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect()
}

/// All `<td>` texts of a row, empties included.
pub fn row_cells_raw(row: ElementRef) -> Vec<String> {
    row.select(&TD).map(text_of).collect()
}

/// Declared `rowspan` of the row's first cell; 0 when absent or unparsable.
pub fn row_span(row: ElementRef) -> usize {
    row.select(&TD)
        .next()
        .and_then(|td| td.value().attr("rowspan"))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// True when the row's cells contain any model-block title label.
pub fn has_desired_title(cells: &[String]) -> bool {
    cells.iter().any(|c| DESIRED_TITLES.contains(&c.as_str()))
}

/// Consume a model-spanning block: `span` rows following the header row at
/// `header_idx`, each mapped positionally against the header key list.
/// A malformed row is logged and skipped; the block continues. The caller is
/// responsible for skipping the consumed rows on its own iteration.
pub fn parse_model_block(
    rows: &[ElementRef],
    header_idx: usize,
    span: usize,
    cells: &[String],
    raw_len: usize,
    features: &mut Features,
) {
    let headers = header_map(cells, raw_len);
    for offset in 1..=span {
        let Some(row) = rows.get(header_idx + offset) else {
            warn!("model block ran past the last table row (structural assumption violated)");
            break;
        };
        let data = row_cells(*row);
        if let Err(e) = extract_model_row(&headers, &data, features) {
            warn!("skipping model row: {}", e);
        }
    }
}

/// Build the canonical header key list from a model-header row.
///
/// The slice heuristic keeps the trailing half of the cells (rowspan'd label
/// cells occupy the leading half); `raw_len` is the cell count before the
/// model-label cells were dropped. Duplicate keys collapse, order preserved.
pub fn header_map(cells: &[String], raw_len: usize) -> Vec<String> {
    let filtered: Vec<&String> = cells
        .iter()
        .filter(|c| !MODEL_HEADER_LABELS.contains(&c.as_str()))
        .collect();
    let keep = if raw_len % 2 == 0 {
        raw_len / 2 + 1
    } else {
        raw_len.div_ceil(2)
    };
    let start = filtered.len().saturating_sub(keep);

    let mut headers: Vec<String> = Vec::new();
    for cell in &filtered[start..] {
        let key = header::normalize(cell);
        if !headers.contains(&key) {
            headers.push(key);
        }
    }
    headers
}

/// Map one data row onto the header keys and merge it into the accumulator.
///
/// The first cell is the model identifier. Remaining cells zip positionally
/// against `headers`; trailing cells beyond the header list are dropped.
/// A failed conversion skips that single field only.
pub fn extract_model_row(
    headers: &[String],
    row_cells: &[String],
    features: &mut Features,
) -> Result<()> {
    let Some((model, rest)) = row_cells.split_first() else {
        return Err(anyhow!("empty row in model block"));
    };
    let entry = features
        .entry(model.clone())
        .or_insert_with(|| FeatureValue::Map(Default::default()));
    let Some(attrs) = entry.as_map_mut() else {
        return Err(anyhow!("model '{}' already bound to a non-record value", model));
    };

    for (idx, value) in rest.iter().enumerate() {
        let Some(key) = headers.get(idx) else {
            break;
        };
        match convert_field(key, value) {
            Ok((new_key, converted)) => {
                attrs.insert(new_key, converted);
            }
            Err(e) => warn!("field conversion failed for '{}'='{}': {}", key, value, e),
        }
    }
    Ok(())
}

/// Canonical-key-specific conversion rules.
fn convert_field(key: &str, value: &str) -> Result<(String, FeatureValue)> {
    Ok(match key {
        "switching_capacity" | "forwarding_rate" | "heat_dissipation" => (
            key.to_string(),
            FeatureValue::Float(value.replace(',', "").parse()?),
        ),
        "mtbf" => (
            "mtbf".to_string(),
            FeatureValue::Int(value.replace(',', "").parse()?),
        ),
        "number_of_ports_that_support_poe" => {
            let n = LEADING_INT_RE
                .find(value)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            (key.to_string(), FeatureValue::Int(n))
        }
        "combo_ports" => ("uplink_ports".to_string(), FeatureValue::text(value)),
        "dimensions" => ("unit_dimensions".to_string(), FeatureValue::text(value)),
        "poe_power_budget" => ("power_dedicated_to_poe".to_string(), FeatureValue::text(value)),
        _ => (key.to_string(), FeatureValue::text(value)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn rows_of(doc: &Html) -> Vec<ElementRef> {
        let tr = Selector::parse("tr").unwrap();
        doc.select(&tr).collect()
    }

    #[test]
    fn row_helpers() {
        let doc = Html::parse_fragment(
            "<table><tr><td rowspan=\"3\">Model</td><td> Switching  Capacity </td><td></td></tr></table>",
        );
        let rows = rows_of(&doc);
        assert_eq!(row_span(rows[0]), 3);
        assert_eq!(row_cells(rows[0]), vec!["Model", "Switching Capacity"]);
        assert_eq!(row_cells_raw(rows[0]).len(), 3);
    }

    #[test]
    fn header_map_odd_length() {
        // 3 raw cells, "Model" label dropped → keep last ceil(3/2)=2 of the rest
        let cells = vec![
            "Model".to_string(),
            "Switching Capacity (Gbps)".to_string(),
            "MTBF (hours)".to_string(),
        ];
        assert_eq!(header_map(&cells, 3), vec!["switching_capacity", "mtbf"]);
    }

    #[test]
    fn header_map_even_length_keeps_extra_cell() {
        let cells = vec![
            "Model Name".to_string(),
            "Ports".to_string(),
            "Forwarding Rate (Mpps)".to_string(),
            "MTBF".to_string(),
        ];
        // raw_len 4 → keep 4/2+1 = 3 trailing headers
        assert_eq!(
            header_map(&cells, 4),
            vec!["ports", "forwarding_rate", "mtbf"]
        );
    }

    #[test]
    fn header_map_dedupes_synonyms() {
        let cells = vec![
            "Forwarding Rate".to_string(),
            "Capacity in mpps".to_string(),
        ];
        assert_eq!(header_map(&cells, 2), vec!["forwarding_rate"]);
    }

    #[test]
    fn extract_converts_numeric_fields() {
        let headers = vec!["switching_capacity".to_string(), "mtbf".to_string()];
        let row = vec!["SG350-28".to_string(), "1,280.0".to_string(), "2,026,793".to_string()];
        let mut features = Features::new();
        extract_model_row(&headers, &row, &mut features).unwrap();

        let attrs = features.get_mut("SG350-28").unwrap().as_map_mut().unwrap();
        assert_eq!(attrs.get("switching_capacity"), Some(&FeatureValue::Float(1280.0)));
        assert_eq!(attrs.get("mtbf"), Some(&FeatureValue::Int(2026793)));
    }

    #[test]
    fn extract_isolates_failed_fields() {
        let headers = vec!["mtbf".to_string(), "switching_capacity".to_string()];
        let row = vec![
            "SG350-28".to_string(),
            "N/A".to_string(),
            "128.0".to_string(),
        ];
        let mut features = Features::new();
        extract_model_row(&headers, &row, &mut features).unwrap();

        let attrs = features.get_mut("SG350-28").unwrap().as_map_mut().unwrap();
        assert!(attrs.get("mtbf").is_none());
        assert_eq!(attrs.get("switching_capacity"), Some(&FeatureValue::Float(128.0)));
    }

    #[test]
    fn extract_renames_aliased_keys() {
        let headers = vec![
            "combo_ports".to_string(),
            "dimensions".to_string(),
            "poe_power_budget".to_string(),
        ];
        let row = vec![
            "C1200-24P-4G".to_string(),
            "4 Gigabit Ethernet SFP combo".to_string(),
            "440 x 257 x 44 mm".to_string(),
            "195W".to_string(),
        ];
        let mut features = Features::new();
        extract_model_row(&headers, &row, &mut features).unwrap();

        let attrs = features.get_mut("C1200-24P-4G").unwrap().as_map_mut().unwrap();
        assert!(attrs.contains_key("uplink_ports"));
        assert!(attrs.contains_key("unit_dimensions"));
        assert!(attrs.contains_key("power_dedicated_to_poe"));
        assert!(!attrs.contains_key("combo_ports"));
    }

    #[test]
    fn poe_port_count_defaults_to_zero() {
        let headers = vec!["number_of_ports_that_support_poe".to_string()];
        let mut features = Features::new();
        extract_model_row(
            &headers,
            &["X".to_string(), "none".to_string()],
            &mut features,
        )
        .unwrap();
        let attrs = features.get_mut("X").unwrap().as_map_mut().unwrap();
        assert_eq!(attrs.get("number_of_ports_that_support_poe"), Some(&FeatureValue::Int(0)));

        extract_model_row(
            &headers,
            &["X".to_string(), "24 ports".to_string()],
            &mut features,
        )
        .unwrap();
        let attrs = features.get_mut("X").unwrap().as_map_mut().unwrap();
        assert_eq!(attrs.get("number_of_ports_that_support_poe"), Some(&FeatureValue::Int(24)));
    }

    #[test]
    fn extract_is_idempotent() {
        let headers = vec!["mtbf".to_string()];
        let row = vec!["SG350-28".to_string(), "2026793".to_string()];
        let mut features = Features::new();
        extract_model_row(&headers, &row, &mut features).unwrap();
        let once = features.clone();
        extract_model_row(&headers, &row, &mut features).unwrap();
        assert_eq!(features, once);
    }

    #[test]
    fn trailing_cells_beyond_headers_are_dropped() {
        let headers = vec!["mtbf".to_string()];
        let row = vec![
            "SG350-28".to_string(),
            "2026793".to_string(),
            "stray".to_string(),
        ];
        let mut features = Features::new();
        extract_model_row(&headers, &row, &mut features).unwrap();
        let attrs = features.get_mut("SG350-28").unwrap().as_map_mut().unwrap();
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn block_consumes_exactly_span_rows() {
        let doc = Html::parse_fragment(
            "<table>\
             <tr><td rowspan=\"3\">Model</td><td>Switching Capacity</td><td>MTBF</td></tr>\
             <tr><td>SG350-10</td><td>20.0</td><td>2171669</td></tr>\
             <tr><td>SG350-28</td><td>56.0</td><td>2026793</td></tr>\
             <tr><td>SG350-52</td><td>104.0</td><td>1452667</td></tr>\
             </table>",
        );
        let rows = rows_of(&doc);
        let cells = row_cells(rows[0]);
        let mut features = Features::new();
        parse_model_block(&rows, 0, 2, &cells, cells.len(), &mut features);

        assert!(features.contains_key("SG350-10"));
        assert!(features.contains_key("SG350-28"));
        assert!(!features.contains_key("SG350-52"), "row past the span must not be consumed");
    }

    #[test]
    fn block_past_table_end_is_truncated() {
        let doc = Html::parse_fragment(
            "<table>\
             <tr><td rowspan=\"9\">Model</td><td>MTBF</td></tr>\
             <tr><td>SG350-10</td><td>2171669</td></tr>\
             </table>",
        );
        let rows = rows_of(&doc);
        let cells = row_cells(rows[0]);
        let mut features = Features::new();
        parse_model_block(&rows, 0, 8, &cells, cells.len(), &mut features);
        assert_eq!(features.len(), 1);
    }
}
