//! The inspection checklist catalog.
//!
//! A catalog is an ordered list of named categories, each holding an ordered
//! list of item labels. Session validation, the CLI and the PDF report all
//! read the same [`Catalog`], so the order defined here is the order items are
//! presented and reported in.

use serde::Serialize;

/// The built-in walk-around categories, in presentation order.
const STANDARD: &[(&str, &[&str])] = &[
    (
        "Exterior Check",
        &[
            "Tires: Inspect for proper inflation.",
            "Tires: Check for any visible wear or damage.",
            "Tires: Ensure lug nuts are tight.",
            "Lights and Reflectors: Test headlights, taillights, brake lights, and turn signals.",
            "Lights and Reflectors: Verify that clearance lights are visible and operational.",
            "Lights and Reflectors: Check reflectors and reflective tape for visibility.",
            "Mirrors and Windows: Clean and ensure windows and mirrors are free of cracks.",
            "Mirrors and Windows: Adjust mirrors for optimal rear visibility.",
            "Fluid Leaks: Check under the vehicle for any signs of oil, coolant, or fuel leaks.",
            "Body and Frame: Inspect the body for any visible damage, rust, or loose parts.",
            "Body and Frame: Ensure the frame is free of cracks or defects.",
            "Suspension: Check suspension components for wear or damage.",
            "Suspension: Ensure shock absorbers are in good condition.",
        ],
    ),
    (
        "Engine Compartment",
        &[
            "Fluid Levels: Check oil, coolant, and windshield washer fluid levels.",
            "Fluid Levels: Inspect power steering and brake fluid levels.",
            "Battery: Ensure the battery is securely mounted.",
            "Battery: Check for corrosion on terminals.",
            "Belts and Hoses: Inspect for wear, cracks, or fraying.",
        ],
    ),
    (
        "Interior Check",
        &[
            "Brakes: Test the operation of service and parking brakes.",
            "Steering: Ensure steering wheel has minimal play and operates smoothly.",
            "Gauges and Instruments: Verify that all gauges (fuel, temperature, pressure) are functioning.",
            "Emergency Equipment: Check for a functional fire extinguisher and first aid kit.",
            "Emergency Equipment: Ensure warning triangles or flares are present.",
        ],
    ),
    (
        "Safety Features",
        &[
            "Seatbelts: Verify seatbelts are functional and not frayed.",
            "Horn: Test the horn to ensure it is operational.",
            "Emergency Exits: Ensure easy access to emergency exits in the cab.",
        ],
    ),
    (
        "Cargo and Trailer",
        &[
            "Load Security: Check that cargo is properly loaded and secured.",
            "Trailer Connection: Inspect the kingpin and locking jaws.",
            "Trailer Connection: Verify that safety chains are attached.",
            "Trailer Doors: Ensure doors open, close, and lock securely.",
        ],
    ),
];

/// A named group of checklist items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
    items: Vec<String>,
}

impl Category {
    /// Create a category from a name and its item labels.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// The category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The item labels, in order.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Check whether `item` belongs to this category.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }
}

/// An ordered set of checklist categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalog {
    /// Build a catalog from categories, keeping their order.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The built-in truck walk-around catalog.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            STANDARD
                .iter()
                .map(|(name, items)| Category::new(*name, items.iter().copied()))
                .collect(),
        )
    }

    /// All categories, in catalog order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by exact name.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Every item label across all categories, in catalog order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
    }

    /// Check whether any category lists `item`.
    #[must_use]
    pub fn contains_item(&self, item: &str) -> bool {
        self.categories.iter().any(|c| c.contains(item))
    }

    /// Total number of items across all categories.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
