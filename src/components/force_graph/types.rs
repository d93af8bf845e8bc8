use serde::Deserialize;

use super::error::GraphError;

/// One node of a static graph definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, also the label when `label` is absent.
	pub id: String,
	/// Category, mapped to a color by the presentation layer.
	pub group: u32,
	/// Economic weight; drives the bubble radius. Missing or non-positive
	/// values render at the minimum radius.
	#[serde(default)]
	pub value: Option<f64>,
	/// Display text overriding the id.
	#[serde(default)]
	pub label: Option<String>,
}

/// One link of a static graph definition.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Id of the source node.
	pub source: String,
	/// Id of the target node.
	pub target: String,
	/// Similarity weight in (0, 1].
	pub value: f64,
}

/// A raw node/link list as supplied at view construction.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// Nodes, unique by id.
	pub nodes: Vec<GraphNode>,
	/// Links between node ids.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Parse a definition from its JSON form.
	///
	/// Only the document shape is checked here; referential integrity is
	/// enforced when the data is turned into a [`Graph`](super::Graph).
	pub fn from_json(json: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(json)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_optional_fields() {
		let data = GraphData::from_json(
			r#"{
				"nodes": [
					{ "id": "Netflix", "group": 1, "value": 15.99 },
					{ "id": "Hulu", "group": 1, "label": "Hulu (ads)" }
				],
				"links": [{ "source": "Netflix", "target": "Hulu", "value": 0.8 }]
			}"#,
		)
		.unwrap();

		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].value, Some(15.99));
		assert_eq!(data.nodes[1].value, None);
		assert_eq!(data.nodes[1].label.as_deref(), Some("Hulu (ads)"));
		assert_eq!(data.links[0].value, 0.8);
	}

	#[test]
	fn links_default_to_empty() {
		let data = GraphData::from_json(r#"{ "nodes": [] }"#).unwrap();
		assert!(data.links.is_empty());
	}

	#[test]
	fn rejects_malformed_documents() {
		let err = GraphData::from_json(r#"{ "nodes": [{ "id": 3 }] }"#).unwrap_err();
		assert!(matches!(err, GraphError::Parse(_)));
	}
}
