use leptos::prelude::*;
use log::warn;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	warn!("no route matched, showing 404");

	view! { <h1>"Uh oh!" <br /> "We couldn't find that page!"</h1> }
}
