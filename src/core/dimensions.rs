//! Dimension tables for the synthetic market dataset
//!
//! Fixed enumerations, multiplier tables and the hierarchical taxonomies that
//! the generator crosses. Table order is significant: index draws made by
//! the seeded generator select by position.

use crate::core::generator::GenerateError;
use crate::entities::record::ChannelType;
use crate::entities::segment::Segment;

/// Region with its countries and multipliers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionDef {
    pub name: &'static str,
    pub countries: &'static [&'static str],
    pub volume: f64,
    pub market_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductTypeDef {
    pub name: &'static str,
    pub price: f64,
    pub volume: f64,
    pub cagr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeMaterialDef {
    pub name: &'static str,
    pub price: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLengthDef {
    pub name: &'static str,
    pub factor: f64,
}

/// Application or end-user multiplier pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageDef {
    pub name: &'static str,
    pub volume: f64,
    pub price: f64,
}

/// Second level of a taxonomy with its (possibly empty) leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TaxonomyNode {
    pub name: &'static str,
    pub children: &'static [&'static str],
}

/// Top level of a taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct TaxonomyRoot {
    pub name: &'static str,
    pub nodes: &'static [TaxonomyNode],
}

pub type Taxonomy = &'static [TaxonomyRoot];

pub const YEARS: [u16; 15] = [
    2021, 2022, 2023, 2024, 2025, 2026, 2027, 2028, 2029, 2030, 2031, 2032, 2033, 2034, 2035,
];

/// Year that price and volume growth factors are measured from
pub const GROWTH_BASE_YEAR: u16 = 2021;

pub const REGIONS: [RegionDef; 6] = [
    RegionDef {
        name: "North America",
        countries: &["U.S.", "Canada"],
        volume: 1.5,
        market_share: 1.4,
    },
    RegionDef {
        name: "Europe",
        countries: &[
            "U.K.",
            "Germany",
            "Italy",
            "France",
            "Spain",
            "Russia",
            "Netherlands",
            "Ireland",
            "Sweden",
            "Poland",
            "Hungary",
            "Slovakia",
            "Turkey",
            "Rest of Europe",
        ],
        volume: 1.3,
        market_share: 1.3,
    },
    RegionDef {
        name: "Asia Pacific",
        countries: &[
            "China",
            "India",
            "Japan",
            "South Korea",
            "ASEAN",
            "Vietnam",
            "Singapore",
            "Thailand",
            "Indonesia",
            "Rest of ASEAN",
            "Australia",
            "Rest of Asia Pacific",
        ],
        volume: 1.8,
        market_share: 1.5,
    },
    RegionDef {
        name: "Middle East & Africa",
        countries: &["GCC", "South Africa", "Rest of Middle East"],
        volume: 1.0,
        market_share: 0.95,
    },
    RegionDef {
        name: "Latin America",
        countries: &["Brazil", "Argentina", "Mexico", "Rest of Latin America"],
        volume: 1.1,
        market_share: 0.9,
    },
    RegionDef {
        name: "ASEAN",
        countries: &["Vietnam", "Singapore", "Thailand", "Indonesia", "Rest of ASEAN"],
        volume: 1.6,
        market_share: 1.3,
    },
];

pub const PRODUCT_TYPES: [ProductTypeDef; 5] = [
    ProductTypeDef { name: "Digging Shovel", price: 1.0, volume: 1.2, cagr: 1.1 },
    ProductTypeDef { name: "Snow Shovel", price: 0.9, volume: 1.5, cagr: 1.2 },
    ProductTypeDef { name: "Trenching Shovel", price: 1.2, volume: 0.8, cagr: 1.0 },
    ProductTypeDef { name: "Scoop Shovel", price: 0.8, volume: 1.1, cagr: 0.9 },
    ProductTypeDef { name: "Others", price: 1.1, volume: 0.9, cagr: 1.0 },
];

pub const BLADE_MATERIALS: [BladeMaterialDef; 5] = [
    BladeMaterialDef { name: "Carbon Steel", price: 0.8, volume: 1.3 },
    BladeMaterialDef { name: "Stainless Steel", price: 1.3, volume: 1.0 },
    BladeMaterialDef { name: "Aluminum", price: 1.1, volume: 0.9 },
    BladeMaterialDef { name: "Polycarbonate", price: 0.9, volume: 1.1 },
    BladeMaterialDef { name: "Others", price: 1.0, volume: 1.0 },
];

pub const HANDLE_LENGTHS: [HandleLengthDef; 4] = [
    HandleLengthDef { name: "Short Handle", factor: 0.9 },
    HandleLengthDef { name: "Medium Handle", factor: 1.0 },
    HandleLengthDef { name: "Long Handle", factor: 1.1 },
    HandleLengthDef { name: "Adjustable Handle", factor: 1.0 },
];

pub const APPLICATIONS: [UsageDef; 7] = [
    UsageDef { name: "Construction & Infrastructure", volume: 1.4, price: 1.2 },
    UsageDef { name: "Agriculture & Landscaping", volume: 1.3, price: 1.0 },
    UsageDef { name: "Mining & Quarrying", volume: 0.7, price: 1.4 },
    UsageDef { name: "Forestry", volume: 0.8, price: 1.1 },
    UsageDef { name: "Household & Gardening", volume: 1.5, price: 0.8 },
    UsageDef { name: "Snow Removal", volume: 1.2, price: 0.9 },
    UsageDef { name: "Utility & Road Maintenance", volume: 1.0, price: 1.1 },
];

pub const END_USERS: [UsageDef; 2] = [
    UsageDef { name: "Commercial/Industrial Users", volume: 1.2, price: 1.3 },
    UsageDef { name: "Residential Users", volume: 1.5, price: 0.8 },
];

pub const OFFLINE_CHANNELS: [&str; 3] = [
    "Hardware Stores",
    "Specialty Garden Centers",
    "Agricultural Supply Stores",
];

pub const ONLINE_CHANNELS: [&str; 2] = ["Ecommerce Website", "Brand's/Company's Own Website"];

pub const BRANDS: [&str; 10] = [
    "Fiskars",
    "Bully Tools",
    "Razor-Back",
    "Truper",
    "Ames",
    "Spear & Jackson",
    "Radius Garden",
    "Seymour",
    "Union Tools",
    "Garant",
];

pub const COMPANIES: [&str; 10] = [
    "Fiskars Corporation",
    "Bully Tools Inc",
    "Razor-Back Tools",
    "Truper Herramientas",
    "Ames True Temper",
    "Spear & Jackson",
    "Radius Garden",
    "Seymour Manufacturing",
    "Union Tools",
    "Garant GP",
];

pub const SOLUTION_TYPES: [&str; 8] = [
    "Fixed-Position Self-Scanning Kiosks",
    "Single-Plane Self-Scanning Kiosks",
    "Multi-Plane Self-Scanning Kiosks",
    "Presentation Self-Scanning Kiosks",
    "Mobile Self-Scanning Solutions",
    "Dedicated Mobile Self-Scanning Devices",
    "Smartphone-Based Self-Scanning",
    "Smart-Cart-Based Self-Scanning",
];

pub const TECHNOLOGY_TYPES: [&str; 3] = [
    "Barcode Scanning (1D/2D)",
    "RFID-Based Scanning",
    "Computer Vision and AI Scanning",
];

pub const RETAIL_FORMATS: [&str; 6] = [
    "Supermarkets & Hypermarkets",
    "Convenience Stores",
    "Specialty and Discount Stores",
    "Department Stores",
    "Warehouse Clubs",
    "Pharmacies & Drugstores",
];

pub const MODEL_TYPES: [&str; 2] = ["Cash Model", "Cashless Model"];

pub const COMPONENT_HIERARCHY: [TaxonomyRoot; 3] = [
    TaxonomyRoot {
        name: "Hardware",
        nodes: &[
            TaxonomyNode {
                name: "Kiosk Scanner Devices",
                children: &[
                    "Single-plane Kiosk Scanners",
                    "Multi-plane (Bioptic) Kiosk Scanners",
                ],
            },
            TaxonomyNode {
                name: "Handheld Self-scanning Devices",
                children: &[
                    "Dedicated Handheld Self-scanning Devices",
                    "Retailer-owned Smartphones / Smart Devices",
                    "Smart-cart Units",
                ],
            },
            TaxonomyNode {
                name: "Others (kiosk Terminals, Embedded Scan Modules, Payment Units, Scales, Network & Accessories)",
                children: &[],
            },
        ],
    },
    TaxonomyRoot {
        name: "Software",
        nodes: &[
            TaxonomyNode { name: "Scanning & Decoding software", children: &[] },
            TaxonomyNode { name: "Computer Vision Software", children: &[] },
            TaxonomyNode { name: "POS & Payment Integration Software", children: &[] },
            TaxonomyNode { name: "Store Operations & Workflow Software", children: &[] },
            TaxonomyNode { name: "Others (Analytics & Dashboard Software, etc.)", children: &[] },
        ],
    },
    TaxonomyRoot {
        name: "Services",
        nodes: &[
            TaxonomyNode { name: "Managed Services", children: &[] },
            TaxonomyNode { name: "Professional Services", children: &[] },
        ],
    },
];

pub const CROSS_PRODUCT_TECHNOLOGY_HIERARCHY: [TaxonomyRoot; 2] = [
    TaxonomyRoot {
        name: "Fixed-Position Self-Scanning Kiosks",
        nodes: &[
            TaxonomyNode {
                name: "Barcode-Based Fixed Kiosks",
                children: &[
                    "Single-Plane Self-Scanning Kiosks",
                    "Multi-Plane Self-Scanning Kiosks",
                    "Presentation Self-Scanning Kiosks",
                ],
            },
            TaxonomyNode { name: "RFID-Based Fixed Kiosks", children: &[] },
            TaxonomyNode { name: "Computer Vision / AI-Based Fixed Kiosks", children: &[] },
        ],
    },
    TaxonomyRoot {
        name: "Mobile Self-Scanning Solutions",
        nodes: &[
            TaxonomyNode {
                name: "Barcode-Based Mobile Self-Scanning",
                children: &[
                    "Dedicated Mobile Self-Scanning Devices",
                    "Smartphone-Based Self-Scanning",
                    "Smart-Cart Barcode Self-Scanning",
                ],
            },
            TaxonomyNode { name: "RFID-Based Mobile Self-Scanning Solutions", children: &[] },
            TaxonomyNode { name: "Computer Vision / AI Smart-Cart Self-Scanning", children: &[] },
        ],
    },
];

pub const CROSS_RETAIL_FORMAT_HIERARCHY: [TaxonomyRoot; 2] = [
    TaxonomyRoot {
        name: "Fixed-Position Self-Scanning Kiosks",
        nodes: &[
            TaxonomyNode { name: "Single-Plane Self-Scanning Kiosks", children: &RETAIL_FORMATS },
            TaxonomyNode { name: "Multi-Plane Self-Scanning Kiosks", children: &RETAIL_FORMATS },
            TaxonomyNode { name: "Presentation Self-Scanning Kiosks", children: &RETAIL_FORMATS },
        ],
    },
    TaxonomyRoot {
        name: "Mobile Self-Scanning Solutions",
        nodes: &[
            TaxonomyNode { name: "Dedicated Mobile Self-Scanning Devices", children: &RETAIL_FORMATS },
            TaxonomyNode { name: "Smartphone-Based Self-Scanning", children: &RETAIL_FORMATS },
            TaxonomyNode { name: "Smart-Cart-Based Self-Scanning", children: &RETAIL_FORMATS },
        ],
    },
];

/// Premium tier by brand position: 0.8, 1.2, 1.6, repeating
pub fn brand_premium(index: usize) -> f64 {
    0.8 + (index % 3) as f64 * 0.4
}

/// The complete set of tables one generation run crosses
///
/// `Tables::STANDARD` is the reference dataset; tests build smaller variants
/// with struct update syntax.
#[derive(Debug, Clone, Copy)]
pub struct Tables {
    pub years: &'static [u16],
    pub regions: &'static [RegionDef],
    pub product_types: &'static [ProductTypeDef],
    pub blade_materials: &'static [BladeMaterialDef],
    pub handle_lengths: &'static [HandleLengthDef],
    pub applications: &'static [UsageDef],
    pub end_users: &'static [UsageDef],
    pub offline_channels: &'static [&'static str],
    pub online_channels: &'static [&'static str],
    pub brands: &'static [&'static str],
    pub companies: &'static [&'static str],
    pub segments: &'static [Segment],
    pub component_hierarchy: Taxonomy,
    pub cross_technology_hierarchy: Taxonomy,
    pub cross_retail_hierarchy: Taxonomy,
    pub solution_types: &'static [&'static str],
    pub technology_types: &'static [&'static str],
    pub retail_formats: &'static [&'static str],
    pub model_types: &'static [&'static str],
}

impl Tables {
    pub const STANDARD: Tables = Tables {
        years: &YEARS,
        regions: &REGIONS,
        product_types: &PRODUCT_TYPES,
        blade_materials: &BLADE_MATERIALS,
        handle_lengths: &HANDLE_LENGTHS,
        applications: &APPLICATIONS,
        end_users: &END_USERS,
        offline_channels: &OFFLINE_CHANNELS,
        online_channels: &ONLINE_CHANNELS,
        brands: &BRANDS,
        companies: &COMPANIES,
        segments: &Segment::ALL,
        component_hierarchy: &COMPONENT_HIERARCHY,
        cross_technology_hierarchy: &CROSS_PRODUCT_TECHNOLOGY_HIERARCHY,
        cross_retail_hierarchy: &CROSS_RETAIL_FORMAT_HIERARCHY,
        solution_types: &SOLUTION_TYPES,
        technology_types: &TECHNOLOGY_TYPES,
        retail_formats: &RETAIL_FORMATS,
        model_types: &MODEL_TYPES,
    };

    /// Every enumeration must be non-empty before index draws are made
    pub fn validate(&self) -> Result<(), GenerateError> {
        let lists: [(&'static str, usize); 15] = [
            ("years", self.years.len()),
            ("regions", self.regions.len()),
            ("product types", self.product_types.len()),
            ("blade materials", self.blade_materials.len()),
            ("handle lengths", self.handle_lengths.len()),
            ("applications", self.applications.len()),
            ("end users", self.end_users.len()),
            ("offline channels", self.offline_channels.len()),
            ("online channels", self.online_channels.len()),
            ("brands", self.brands.len()),
            ("companies", self.companies.len()),
            ("segments", self.segments.len()),
            ("solution types", self.solution_types.len()),
            ("technology types", self.technology_types.len()),
            ("retail formats", self.retail_formats.len()),
        ];
        if let Some((name, _)) = lists.iter().find(|(_, len)| *len == 0) {
            return Err(GenerateError::EmptyDimension(name));
        }
        if self.model_types.is_empty() {
            return Err(GenerateError::EmptyDimension("model types"));
        }
        if let Some(region) = self.regions.iter().find(|r| r.countries.is_empty()) {
            return Err(GenerateError::EmptyRegion(region.name));
        }

        let taxonomies = [
            ("component hierarchy", self.component_hierarchy),
            ("cross product/technology hierarchy", self.cross_technology_hierarchy),
            ("cross product/retail hierarchy", self.cross_retail_hierarchy),
        ];
        for (name, taxonomy) in taxonomies {
            if taxonomy.is_empty() || taxonomy.iter().any(|root| root.nodes.is_empty()) {
                return Err(GenerateError::EmptyDimension(name));
            }
        }
        Ok(())
    }

    /// Countries belonging to a region, if the region exists
    pub fn countries_for(&self, region: &str) -> Option<&'static [&'static str]> {
        self.regions
            .iter()
            .find(|r| r.name == region)
            .map(|r| r.countries)
    }

    /// Channel list for a channel type
    pub fn channels_for(&self, channel_type: ChannelType) -> &'static [&'static str] {
        match channel_type {
            ChannelType::Offline => self.offline_channels,
            ChannelType::Online => self.online_channels,
        }
    }
}

/// Check the standard tables
pub fn validate_tables() -> Result<(), GenerateError> {
    Tables::STANDARD.validate()
}

// =========================================================================
// Constant getters for filter UIs
// =========================================================================

pub fn component_hierarchy() -> Taxonomy {
    &COMPONENT_HIERARCHY
}

pub fn cross_product_technology_hierarchy() -> Taxonomy {
    &CROSS_PRODUCT_TECHNOLOGY_HIERARCHY
}

pub fn cross_retail_format_hierarchy() -> Taxonomy {
    &CROSS_RETAIL_FORMAT_HIERARCHY
}

pub fn solution_types() -> &'static [&'static str] {
    &SOLUTION_TYPES
}

pub fn technology_types() -> &'static [&'static str] {
    &TECHNOLOGY_TYPES
}

pub fn retail_formats() -> &'static [&'static str] {
    &RETAIL_FORMATS
}

pub fn model_types() -> &'static [&'static str] {
    &MODEL_TYPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_valid() {
        assert!(Tables::STANDARD.validate().is_ok());
        assert!(validate_tables().is_ok());
    }

    #[test]
    fn test_empty_dimension_rejected() {
        let tables = Tables {
            brands: &[],
            ..Tables::STANDARD
        };
        assert_eq!(
            tables.validate(),
            Err(GenerateError::EmptyDimension("brands"))
        );
    }

    #[test]
    fn test_region_without_countries_rejected() {
        static REGIONS_NO_COUNTRIES: [RegionDef; 1] = [RegionDef {
            name: "Antarctica",
            countries: &[],
            volume: 1.0,
            market_share: 1.0,
        }];
        let tables = Tables {
            regions: &REGIONS_NO_COUNTRIES,
            ..Tables::STANDARD
        };
        assert_eq!(
            tables.validate(),
            Err(GenerateError::EmptyRegion("Antarctica"))
        );
    }

    #[test]
    fn test_brand_premium_tiers() {
        let tiers: Vec<f64> = (0..BRANDS.len()).map(brand_premium).collect();
        assert_eq!(tiers[0], 0.8);
        assert!((tiers[1] - 1.2).abs() < 1e-12);
        assert!((tiers[2] - 1.6).abs() < 1e-12);
        assert_eq!(tiers[3], tiers[0]);
        assert_eq!(tiers[9], 0.8);
    }

    #[test]
    fn test_country_lookup() {
        let countries = Tables::STANDARD.countries_for("North America").unwrap();
        assert_eq!(countries, &["U.S.", "Canada"]);
        assert!(Tables::STANDARD.countries_for("Atlantis").is_none());
        let total: usize = REGIONS.iter().map(|r| r.countries.len()).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn test_channels_for_type() {
        assert_eq!(Tables::STANDARD.channels_for(ChannelType::Offline).len(), 3);
        assert_eq!(
            Tables::STANDARD.channels_for(ChannelType::Online),
            &["Ecommerce Website", "Brand's/Company's Own Website"]
        );
    }

    #[test]
    fn test_hierarchy_getters() {
        assert_eq!(component_hierarchy().len(), 3);
        assert_eq!(component_hierarchy()[0].nodes[1].children.len(), 3);
        assert!(cross_retail_format_hierarchy()
            .iter()
            .flat_map(|root| root.nodes)
            .all(|node| node.children.len() == 6));
        assert_eq!(cross_product_technology_hierarchy()[1].nodes[0].children[2], "Smart-Cart Barcode Self-Scanning");
        assert_eq!(solution_types().len(), 8);
        assert_eq!(technology_types().len(), 3);
        assert_eq!(retail_formats().len(), 6);
        assert_eq!(model_types(), &["Cash Model", "Cashless Model"]);
    }
}
