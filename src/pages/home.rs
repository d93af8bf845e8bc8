use leptos::prelude::*;

use crate::components::force_graph::scale::{self, GROUP_PALETTE};
use crate::components::force_graph::{ForceGraphCanvas, GraphData, GraphError};

const SUBSCRIPTION_NETWORK: &str = include_str!("../../data/subscription_network.json");

/// The sample subscription network: services linked by similarity.
pub fn subscription_network() -> Result<GraphData, GraphError> {
	GraphData::from_json(SUBSCRIPTION_NETWORK)
}

/// Color and name of every named group, in group order.
fn legend_entries() -> Vec<(&'static str, &'static str)> {
	(1..=GROUP_PALETTE.len() as u32)
		.filter_map(|group| Some((scale::group_color(group), scale::group_name(group)?)))
		.collect()
}

#[component]
fn Legend() -> impl IntoView {
	view! {
		<ul class="graph-legend">
			{legend_entries()
				.into_iter()
				.map(|(color, name)| {
					view! {
						<li>
							<span class="swatch" style=format!("background-color: {color}")></span>
							{name}
						</li>
					}
				})
				.collect_view()}
		</ul>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let network = subscription_network();

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{network
				.map(|data| {
					let graph_data = Signal::derive(move || data.clone());
					view! {
						<div class="fullscreen-graph">
							<ForceGraphCanvas data=graph_data color=scale::group_color fullscreen=true />
							<div class="graph-overlay">
								<h1>"Subscription Network"</h1>
								<p class="subtitle">
									"Linked services overlap in what they offer. Drag bubbles to rearrange. Scroll to zoom. Drag background to pan."
								</p>
								<Legend />
							</div>
						</div>
					}
				})}
		</ErrorBoundary>
	}
}
