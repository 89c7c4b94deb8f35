//! Product-family rosters and seed source lists for the Cisco SMB catalog.

/// What a queued source URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Datasheet,
    CliGuide,
    AdminGuide,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Datasheet => "datasheet",
            SourceKind::CliGuide => "cli_guide",
            SourceKind::AdminGuide => "admin_guide",
        }
    }

    pub fn parse(s: &str) -> Option<SourceKind> {
        match s {
            "datasheet" => Some(SourceKind::Datasheet),
            "cli_guide" => Some(SourceKind::CliGuide),
            "admin_guide" => Some(SourceKind::AdminGuide),
            _ => None,
        }
    }
}

/// Product series whose models share a roster and a metrics rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Catalyst1200,
    Catalyst1300,
    Cbs110Unmanaged,
    Cbs220,
    Cbs250,
    Cbs350,
    Cbw140Ac,
    Cbw145Ac,
    Cisco110Unmanaged,
    Cisco350Managed,
    Cisco350xStackable,
    Cisco550xStackable,
    Catalyst1000,
}

pub const CISCO_CATALYST_1200_SERIES: &[&str] = &[
    "C1200-8T-D",
    "C1200-8T-E-2G",
    "C1200-8P-E-2G",
    "C1200-8FP-2G",
    "C1200-16T-2G",
    "C1200-16P-2G",
    "C1200-24T-4G",
    "C1200-24P-4G",
    "C1200-24FP-4G",
    "C1200-48T-4G",
    "C1200-48P-4G",
    "C1200-24T-4X",
    "C1200-24P-4X",
    "C1200-24FP-4X",
    "C1200-48T-4X",
    "C1200-48P-4X",
];

pub const CISCO_CATALYST_1300_SERIES: &[&str] = &[
    "C1300-8FP-2G",
    "C1300-8T-E-2G",
    "C1300-8P-E-2G",
    "C1300-16T-2G",
    "C1300-16P-2G",
    "C1300-16FP-2G",
    "C1300-24T-4G",
    "C1300-24P-4G",
    "C1300-24FP-4G",
    "C1300-48T-4G",
    "C1300-48P-4G",
    "C1300-48FP-4G",
    "C1300-16P-4X",
    "C1300-24T-4X",
    "C1300-24P-4X",
    "C1300-24FP-4X",
    "C1300-48T-4X",
    "C1300-48P-4X",
];

pub const CBS_110_SERIES_UNMANAGED: &[&str] = &[
    "CBS110-5T-D",
    "CBS110-8T-D",
    "CBS110-8PP-D",
    "CBS110-16T",
    "CBS110-16PP",
    "CBS110-24T",
    "CBS110-24PP",
];

pub const CBS_220_SERIES: &[&str] = &[
    "CBS220-8T-E-2G",
    "CBS220-8P-E-2G",
    "CBS220-8FP-E-2G",
    "CBS220-16T-2G",
    "CBS220-16P-2G",
    "CBS220-24T-4G",
    "CBS220-24P-4G",
    "CBS220-24FP-4G",
    "CBS220-48T-4G",
    "CBS220-48P-4G",
    "CBS220-24T-4X",
    "CBS220-24P-4X",
    "CBS220-24FP-4X",
    "CBS220-48T-4X",
    "CBS220-48P-4X",
    "CBS220-48FP-4X",
];

pub const CBS_250_SERIES: &[&str] = &[
    "CBS250-8T-D",
    "CBS250-8PP-D",
    "CBS250-8T-E-2G",
    "CBS250-8PP-E-2G",
    "CBS250-8P-E-2G",
    "CBS250-8FP-E-2G",
    "CBS250-16T-2G",
    "CBS250-16P-2G",
    "CBS250-24T-4G",
    "CBS250-24PP-4G",
    "CBS250-24P-4G",
    "CBS250-24FP-4G",
    "CBS250-48T-4G",
    "CBS250-48PP-4G",
    "CBS250-48P-4G",
    "CBS250-24T-4X",
    "CBS250-24P-4X",
    "CBS250-24FP-4X",
    "CBS250-48T-4X",
    "CBS250-48P-4X",
];

pub const CBS_350_SERIES: &[&str] = &[
    "CBS350-8T-E-2G",
    "CBS350-8P-2G",
    "CBS350-8P-E-2G",
    "CBS350-8FP-2G",
    "CBS350-8FP-E-2G",
    "CBS350-8S-E-2G",
    "CBS350-16T-2G",
    "CBS350-16T-E-2G",
    "CBS350-16P-2G",
    "CBS350-16P-E-2G",
    "CBS350-16FP-2G",
    "CBS350-24T-4G",
    "CBS350-24P-4G",
    "CBS350-24FP-4G",
    "CBS350-24S-4G",
    "CBS350-48T-4G",
    "CBS350-48P-4G",
    "CBS350-48FP-4G",
    "CBS350-24T-4X",
    "CBS350-24P-4X",
    "CBS350-24FP-4X",
    "CBS350-48T-4X",
    "CBS350-48P-4X",
    "CBS350-48FP-4X",
    "CBS350-8MGP-2X",
    "CBS350-8MP-2X",
    "CBS350-24MGP-4X",
    "CBS350-12NP-4X",
    "CBS350-24NGP-4X",
    "CBS350-48NGP-4X",
    "CBS350-8XT",
    "CBS350-12XS",
    "CBS350-12XT",
    "CBS350-16XTS",
    "CBS350-24XS",
    "CBS350-24XT",
    "CBS350-24XTS",
    "CBS350-48XT-4X",
];

pub const CBW_140AC_SERIES: &[&str] = &["CBW140AC-x"];

pub const CBW_145AC_SERIES: &[&str] = &["CBW145AC-x"];

pub const CISCO_110_SERIES_UNMANAGED: &[&str] = &[
    "SF110D-05",
    "SF110D-08",
    "SF110D-08HP",
    "SF110D-16",
    "SF110D-16HP",
    "SF110-16",
    "SF110-24",
    "SF112-24",
    "SG110D-05",
    "SG110D-08",
    "SG110D-08HP",
    "SG110-16",
    "SG110-16HP",
    "SG112-24",
    "SG110-24",
    "SG110-24HP",
];

pub const CISCO_350_SERIES_MANAGED: &[&str] = &[
    "SF350-08",
    "SF352-08",
    "SF352-08P",
    "SF352-08MP",
    "SF350-24",
    "SF350-24P",
    "SF350-24MP",
    "SF350-48",
    "SF350-48P",
    "SF350-48MP",
    "SG350-8PD",
    "SG350-10",
    "SG350-10P",
    "SG350-10MP",
    "SG355-10MP",
    "SG350-10SFP",
    "SG350-20",
    "SG350-28",
    "SG350-28P",
    "SG350-28MP",
    "SG350-28SFP",
    "SG350-52",
    "SG350-52P",
    "SG350-52MP",
];

pub const CISCO_350X_STACKABLE_SERIES: &[&str] = &[
    "SG350X-8PMD",
    "SG350X-12PMV",
    "SG350X-24P",
    "SG350X-24MP",
    "SG350X-24PD",
    "SG350X-24PV",
    "SG350X-48",
    "SG350X-48P",
    "SG350X-48MP",
    "SG350X-48PV",
    "SG350XG-2F10",
    "SG350XG-24F",
    "SG350XG-24T",
    "SG350XG-48T",
    "SX350X-08",
    "SX350X-12",
    "SX350X-24F",
    "SX350X-24",
    "SX350X-52",
];

pub const CISCO_550X_STACKABLE_SERIES: &[&str] = &[
    "SF500-24",
    "SF500-24P",
    "SF500-24MP",
    "SF500-48",
    "SF500-48P",
    "SF500-48MP",
    "SG500-28",
    "SG500-28P",
    "SG500-28MPP",
    "SG500-52",
    "SG500-52P",
    "SG500-52MP",
    "SG500X-24",
    "SG500X-24P",
    "SG500X-24MPP",
    "SG500X-48",
    "SG500X-48P",
    "SG500X-48MP",
    "SG500XG-8F8T",
];

pub const CATALYST_1000_SERIES: &[&str] = &[
    "C1000-8T-2G-L",
    "C1000-8T-E-2G-L",
    "C1000-8P-2G-L",
    "C1000-8P-E-2G-L",
    "C1000-8FP-2G-L",
    "C1000-8FP-E-2G-L",
    "C1000-16T-2G-L",
    "C1000-16T-E-2G-L",
    "C1000-16P-2G-L",
    "C1000-16P-E-2G-L",
    "C1000-16FP-2G-L",
    "C1000-24T-4G-L",
    "C1000-24P-4G-L",
    "C1000-24FP-4G-L",
    "C1000-48T-4G-L",
    "C1000-48P-4G-L",
    "C1000-48FP-4G-L",
    "C1000-24T-4X-L",
    "C1000-24P-4X-L",
    "C1000-24FP-4X-L",
    "C1000-48T-4X-L",
    "C1000-48P-4X-L",
    "C1000-48FP-4X-L",
    "C1000FE-24T-4G-L",
    "C1000FE-24P-4G-L",
    "C1000FE-48T-4G-L",
    "C1000FE-48P-4G-L",
];

impl Series {
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Series::Catalyst1200 => CISCO_CATALYST_1200_SERIES,
            Series::Catalyst1300 => CISCO_CATALYST_1300_SERIES,
            Series::Cbs110Unmanaged => CBS_110_SERIES_UNMANAGED,
            Series::Cbs220 => CBS_220_SERIES,
            Series::Cbs250 => CBS_250_SERIES,
            Series::Cbs350 => CBS_350_SERIES,
            Series::Cbw140Ac => CBW_140AC_SERIES,
            Series::Cbw145Ac => CBW_145AC_SERIES,
            Series::Cisco110Unmanaged => CISCO_110_SERIES_UNMANAGED,
            Series::Cisco350Managed => CISCO_350_SERIES_MANAGED,
            Series::Cisco350xStackable => CISCO_350X_STACKABLE_SERIES,
            Series::Cisco550xStackable => CISCO_550X_STACKABLE_SERIES,
            Series::Catalyst1000 => CATALYST_1000_SERIES,
        }
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models().contains(&model)
    }
}

const ALL_SERIES: &[Series] = &[
    Series::Catalyst1200,
    Series::Catalyst1300,
    Series::Cbs110Unmanaged,
    Series::Cbs220,
    Series::Cbs250,
    Series::Cbs350,
    Series::Cbw140Ac,
    Series::Cbw145Ac,
    Series::Cisco110Unmanaged,
    Series::Cisco350Managed,
    Series::Cisco350xStackable,
    Series::Cisco550xStackable,
    Series::Catalyst1000,
];

/// True if `model` is a known SKU in any roster.
pub fn is_known_model(model: &str) -> bool {
    ALL_SERIES.iter().any(|s| s.contains(model))
}

/// A seed entry: the family concept string plus its datasheet URL.
pub struct DatasheetSource {
    pub concept: &'static str,
    pub url: &'static str,
}

pub const DATASHEET_SOURCES: &[DatasheetSource] = &[
    DatasheetSource {
        concept: "Cisco Business 110 Series Unmanaged Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/business-110-series-unmanaged-switches/datasheet-c78-744158.html?ccid=cc001531",
    },
    DatasheetSource {
        concept: "Cisco Business 220 Series Smart Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/business-220-series-smart-switches/datasheet-c78-744915.html",
    },
    DatasheetSource {
        concept: "Cisco Business 250 Series Smart Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/business-250-series-smart-switches/nb-06-bus250-smart-switch-ds-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Business 350 Series Managed Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/business-350-series-managed-switches/datasheet-c78-744156.html",
    },
    DatasheetSource {
        concept: "Cisco Catalyst 1000 Series Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/catalyst-1000-series-switches/nb-06-cat1k-ser-switch-ds-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Catalyst 1200 Series Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/catalyst-1200-series-switches/nb-06-cat1200-ser-data-sheet-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Catalyst 1300 Series Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/catalyst-1300-series-switches/nb-06-cat1300-ser-data-sheet-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco 350 Series Managed Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/small-business-smart-switches/data-sheet-c78-737359.html",
    },
    DatasheetSource {
        concept: "Cisco 350X Series Stackable Managed Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/350x-series-stackable-managed-switches/datasheet-c78-735986.html",
    },
    DatasheetSource {
        concept: "Cisco 550X Series Stackable Managed Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/550x-series-stackable-managed-switches/datasheet-c78-735874.html",
    },
    DatasheetSource {
        concept: "Cisco 250 Series Smart Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/250-series-smart-switches/datasheet-c78-737061.html",
    },
    DatasheetSource {
        concept: "Cisco 220 Series Smart Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/small-business-220-series-smart-plus-switches/datasheet-c78-731284.html",
    },
    DatasheetSource {
        concept: "Cisco 300 Series Managed Switches",
        url: "https://www.cisco.com/c/en/us/products/collateral/switches/small-business-smart-switches/data_sheet_c78-610061.html",
    },
    DatasheetSource {
        concept: "Cisco Business Wireless AC",
        url: "https://www.cisco.com/c/en/us/products/collateral/wireless/business-100-series-access-points/smb-01-bus-140ac-ap-ds-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Business Wireless AC",
        url: "https://www.cisco.com/c/en/us/products/collateral/wireless/business-100-series-access-points/smb-01-bus-145ac-ap-ds-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Business Wireless AC",
        url: "https://www.cisco.com/c/en/us/products/collateral/wireless/business-200-series-access-points/smb-01-bus-240ac-ap-ds-cte-en.html",
    },
    DatasheetSource {
        concept: "Cisco Business Wireless AX",
        url: "https://www.cisco.com/c/en/us/products/collateral/wireless/business-100-series-access-points/business-access-point-ds.html",
    },
    DatasheetSource {
        concept: "Cisco Business Wireless AX",
        url: "https://www.cisco.com/c/en/us/products/collateral/wireless/business-100-series-mesh-extenders/busines-mesh-extender-ds.html",
    },
];

/// A guide book landing page; its chapters are discovered via the book TOC.
pub struct GuideBook {
    pub concept: &'static str,
    pub kind: SourceKind,
    pub url: &'static str,
}

pub const GUIDE_BOOKS: &[GuideBook] = &[
    GuideBook {
        concept: "Cisco Catalyst 1300 Series Switches",
        kind: SourceKind::AdminGuide,
        url: "https://www.cisco.com/c/en/us/td/docs/switches/campus-lan-switches-access/Catalyst-1200-and-1300-Switches/Admin-Guide/catalyst-1300-admin-guide.html",
    },
    GuideBook {
        concept: "Cisco Catalyst 1300 Series Switches",
        kind: SourceKind::CliGuide,
        url: "https://www.cisco.com/c/en/us/td/docs/switches/campus-lan-switches-access/Catalyst-1200-and-1300-Switches/cli/C1300-cli.html",
    },
    GuideBook {
        concept: "Cisco Catalyst 1200 Series Switches",
        kind: SourceKind::AdminGuide,
        url: "https://www.cisco.com/c/en/us/td/docs/switches/campus-lan-switches-access/Catalyst-1200-and-1300-Switches/Admin-Guide/catalyst-1200-admin-guide.html",
    },
    GuideBook {
        concept: "Cisco Catalyst 1200 Series Switches",
        kind: SourceKind::CliGuide,
        url: "https://www.cisco.com/c/en/us/td/docs/switches/campus-lan-switches-access/Catalyst-1200-and-1300-Switches/cli/C1200-cli.html",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_membership() {
        assert!(Series::Cisco350Managed.contains("SG350-28"));
        assert!(Series::Catalyst1000.contains("C1000FE-24T-4G-L"));
        assert!(!Series::Catalyst1000.contains("SG350-28"));
    }

    #[test]
    fn known_model_spans_series() {
        assert!(is_known_model("CBS110-24PP"));
        assert!(is_known_model("SG500XG-8F8T"));
        assert!(!is_known_model("not-a-model"));
    }

    #[test]
    fn source_kind_round_trip() {
        for kind in [SourceKind::Datasheet, SourceKind::CliGuide, SourceKind::AdminGuide] {
            assert_eq!(SourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(SourceKind::parse("video"), None);
    }
}
