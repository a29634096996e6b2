//! Seed reference data for the StayHub listing catalog.

use crate::domain::catalog::{Criterion, InfluenceEdge, InfluenceNode, NodeKind, Polarity};
use crate::domain::foundation::CriterionCode;
use crate::domain::preferences::{COMFORT_NODE, CONVENIENCE_NODE, VALUE_NODE};

/// Root node of the default influence diagram.
pub const SATISFACTION_NODE: &str = "SATISFACTION";

/// The criteria every listing is scored on.
pub fn stayhub_criteria() -> Vec<Criterion> {
    vec![
        Criterion::new(CriterionCode::PRICE, "Price", Polarity::Cost, 1)
            .with_unit("USD/night")
            .with_description("Nightly price of the listing"),
        Criterion::new(CriterionCode::DISTANCE_CENTER, "Distance to center", Polarity::Cost, 2)
            .with_unit("km")
            .with_description("Straight-line distance to the city center"),
        Criterion::new(CriterionCode::RATING_OVERALL, "Overall rating", Polarity::Benefit, 3)
            .with_unit("stars")
            .with_description("Average overall guest rating"),
        Criterion::new(CriterionCode::RATING_CLEANLINESS, "Cleanliness", Polarity::Benefit, 4)
            .with_unit("stars")
            .with_description("Average cleanliness rating"),
        Criterion::new(CriterionCode::RATING_LOCATION, "Location rating", Polarity::Benefit, 5)
            .with_unit("stars")
            .with_description("Average location rating"),
        Criterion::new(CriterionCode::RATING_VALUE, "Value for money", Polarity::Benefit, 6)
            .with_unit("stars")
            .with_description("Average value-for-money rating"),
        Criterion::new(CriterionCode::AMENITIES_COUNT, "Amenities", Polarity::Benefit, 7)
            .with_unit("count")
            .with_description("Number of listed amenities"),
        Criterion::new(CriterionCode::VIEW_QUALITY, "View", Polarity::Benefit, 8)
            .with_unit("score")
            .with_description("Quality of the view from the listing"),
    ]
}

/// Nodes of the default influence diagram.
///
/// One root feeds the three intermediate factors; each leaf stands for a
/// criterion reached through a mapped edge.
pub fn default_influence_nodes() -> Vec<InfluenceNode> {
    let leaves = [
        "NEAR_CENTER",
        "GOOD_AREA",
        "WELL_REVIEWED",
        "CLEAN",
        "WELL_EQUIPPED",
        "AFFORDABLE",
        "FAIR_VALUE",
    ];

    let mut nodes = vec![
        InfluenceNode::new(SATISFACTION_NODE, NodeKind::Root, 0),
        InfluenceNode::new(CONVENIENCE_NODE, NodeKind::Intermediate, 1),
        InfluenceNode::new(COMFORT_NODE, NodeKind::Intermediate, 2),
        InfluenceNode::new(VALUE_NODE, NodeKind::Intermediate, 3),
    ];
    nodes.extend(
        leaves
            .into_iter()
            .enumerate()
            .map(|(i, code)| InfluenceNode::new(code, NodeKind::Leaf, 10 + i as i32)),
    );
    nodes
}

/// Edges of the default influence diagram.
pub fn default_influence_edges() -> Vec<InfluenceEdge> {
    vec![
        InfluenceEdge::new(SATISFACTION_NODE, CONVENIENCE_NODE, 1.0),
        InfluenceEdge::new(SATISFACTION_NODE, COMFORT_NODE, 1.0),
        InfluenceEdge::new(SATISFACTION_NODE, VALUE_NODE, 1.0),
        InfluenceEdge::mapped(CONVENIENCE_NODE, "NEAR_CENTER", 0.6, CriterionCode::DISTANCE_CENTER),
        InfluenceEdge::mapped(CONVENIENCE_NODE, "GOOD_AREA", 0.4, CriterionCode::RATING_LOCATION),
        InfluenceEdge::mapped(COMFORT_NODE, "WELL_REVIEWED", 0.4, CriterionCode::RATING_OVERALL),
        InfluenceEdge::mapped(COMFORT_NODE, "CLEAN", 0.3, CriterionCode::RATING_CLEANLINESS),
        InfluenceEdge::mapped(COMFORT_NODE, "WELL_EQUIPPED", 0.3, CriterionCode::AMENITIES_COUNT),
        InfluenceEdge::mapped(VALUE_NODE, "AFFORDABLE", 0.7, CriterionCode::PRICE),
        InfluenceEdge::mapped(VALUE_NODE, "FAIR_VALUE", 0.3, CriterionCode::RATING_VALUE),
    ]
}
