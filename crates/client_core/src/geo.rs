//! Flat geographic records reshaped into the two-level drill-down
//! hierarchy consumed by the treemap view.

use std::collections::HashMap;

use shared::protocol::GeoRecord;

/// One entry of the country → region hierarchy. Root nodes carry no
/// parent; leaf ids are the composite `country-region` key.
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapNode {
    pub id: String,
    pub label: String,
    pub parent_id: Option<String>,
    pub value: f64,
}

impl TreemapNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Builds the two-level hierarchy from flat geographic records.
///
/// Emits one root per distinct country followed by one leaf per distinct
/// (country, region) pair, both in first-seen input order. Records
/// repeating a pair merge into the existing leaf so composite ids stay
/// unique, and every root's value equals the sum of its children's by
/// construction. Pure and total: empty input yields empty output, and the
/// same input always yields the same output.
pub fn build_geo_hierarchy(records: &[GeoRecord]) -> Vec<TreemapNode> {
    let mut roots: Vec<TreemapNode> = Vec::new();
    let mut root_index: HashMap<String, usize> = HashMap::new();
    let mut leaves: Vec<TreemapNode> = Vec::new();
    let mut leaf_index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let value = record.customer_count as f64;

        match root_index.get(&record.country) {
            Some(&index) => roots[index].value += value,
            None => {
                root_index.insert(record.country.clone(), roots.len());
                roots.push(TreemapNode {
                    id: record.country.clone(),
                    label: record.country.clone(),
                    parent_id: None,
                    value,
                });
            }
        }

        let key = (record.country.clone(), record.region.clone());
        match leaf_index.get(&key) {
            Some(&index) => leaves[index].value += value,
            None => {
                leaf_index.insert(key, leaves.len());
                leaves.push(TreemapNode {
                    id: format!("{}-{}", record.country, record.region),
                    label: record.region.clone(),
                    parent_id: Some(record.country.clone()),
                    value,
                });
            }
        }
    }

    let mut nodes = roots;
    nodes.extend(leaves);
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, region: &str, customer_count: u64) -> GeoRecord {
        GeoRecord {
            country: country.to_string(),
            region: region.to_string(),
            customer_count,
        }
    }

    fn sample_records() -> Vec<GeoRecord> {
        vec![
            record("Canada", "Ontario", 40),
            record("Canada", "Quebec", 25),
            record("Mexico", "Jalisco", 18),
            record("Canada", "Alberta", 7),
        ]
    }

    #[test]
    fn root_values_conserve_the_input_total() {
        let records = sample_records();
        let input_total: u64 = records.iter().map(|r| r.customer_count).sum();

        let nodes = build_geo_hierarchy(&records);
        let root_total: f64 = nodes.iter().filter(|n| n.is_root()).map(|n| n.value).sum();

        assert_eq!(root_total, input_total as f64);
    }

    #[test]
    fn every_leaf_points_at_exactly_one_root() {
        let nodes = build_geo_hierarchy(&sample_records());

        for leaf in nodes.iter().filter(|n| !n.is_root()) {
            let parent = leaf.parent_id.as_deref().expect("leaf parent");
            let matching_roots = nodes
                .iter()
                .filter(|n| n.is_root() && n.id == parent)
                .count();
            assert_eq!(matching_roots, 1, "leaf {} has {matching_roots} roots", leaf.id);
        }
    }

    #[test]
    fn roots_aggregate_their_countries() {
        let nodes = build_geo_hierarchy(&sample_records());

        let canada = nodes.iter().find(|n| n.id == "Canada").expect("Canada root");
        assert!(canada.is_root());
        assert_eq!(canada.value, 72.0);

        let quebec = nodes
            .iter()
            .find(|n| n.id == "Canada-Quebec")
            .expect("Quebec leaf");
        assert_eq!(quebec.label, "Quebec");
        assert_eq!(quebec.parent_id.as_deref(), Some("Canada"));
        assert_eq!(quebec.value, 25.0);
    }

    #[test]
    fn duplicate_country_region_pairs_merge_into_one_leaf() {
        let nodes = build_geo_hierarchy(&[
            record("Chile", "Santiago", 10),
            record("Chile", "Santiago", 5),
        ]);

        let leaves: Vec<_> = nodes.iter().filter(|n| !n.is_root()).collect();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].value, 15.0);

        let mut ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), nodes.len(), "node ids must be unique");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(build_geo_hierarchy(&[]).is_empty());
    }

    #[test]
    fn rebuilding_from_the_same_input_is_deterministic() {
        let records = sample_records();
        assert_eq!(build_geo_hierarchy(&records), build_geo_hierarchy(&records));
    }

    #[test]
    fn roots_precede_leaves() {
        let nodes = build_geo_hierarchy(&sample_records());
        let first_leaf = nodes.iter().position(|n| !n.is_root()).expect("a leaf");
        assert!(nodes[..first_leaf].iter().all(TreemapNode::is_root));
        assert!(nodes[first_leaf..].iter().all(|n| !n.is_root()));
    }
}
