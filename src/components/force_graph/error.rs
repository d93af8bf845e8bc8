/// Which end of a link an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LinkEnd {
	/// The `source` id.
	Source,
	/// The `target` id.
	Target,
}

/// Reasons a graph definition or layout config is rejected before the
/// simulation starts.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
	/// Two nodes share an id.
	#[error("duplicate node id `{0}`")]
	DuplicateNode(String),

	/// A link names a node that does not exist.
	#[error("link #{index} {end} `{id}` does not name a node")]
	UnknownNode {
		/// Position of the link in the definition.
		index: usize,
		/// The offending end.
		end: LinkEnd,
		/// The id that failed to resolve.
		id: String,
	},

	/// A link connects a node to itself.
	#[error("link #{index} connects `{id}` to itself")]
	SelfLink {
		/// Position of the link in the definition.
		index: usize,
		/// The node id.
		id: String,
	},

	/// A link weight outside (0, 1].
	#[error("link #{index} has weight {weight}, expected a value in (0, 1]")]
	InvalidWeight {
		/// Position of the link in the definition.
		index: usize,
		/// The rejected weight.
		weight: f64,
	},

	/// A layout tunable the simulation cannot run with.
	#[error("invalid layout config: `{field}` {reason}")]
	InvalidConfig {
		/// Config field name.
		field: &'static str,
		/// What is wrong with it.
		reason: &'static str,
	},

	/// The JSON definition could not be deserialized.
	#[error("malformed graph definition: {0}")]
	Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_ends_render_lowercase() {
		assert_eq!(LinkEnd::Source.to_string(), "source");
		assert_eq!(LinkEnd::Target.to_string(), "target");

		let err = GraphError::UnknownNode {
			index: 0,
			end: LinkEnd::Source,
			id: "ghost".into(),
		};
		assert_eq!(err.to_string(), "link #0 source `ghost` does not name a node");
	}
}
