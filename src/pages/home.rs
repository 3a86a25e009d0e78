use leptos::prelude::*;
use log::info;

use crate::components::pattern_web::{Pattern, PatternWeb};

/// The three-pattern chain shown on the demo page.
fn sample_patterns() -> Vec<Pattern> {
	vec![
		Pattern::new(
			"ScenarioExpansion",
			"Scenario Expansion",
			["ConstraintEmphasis"],
		),
		Pattern::new(
			"ConstraintEmphasis",
			"Constraint Emphasis",
			["ConflictMediation"],
		),
		Pattern::new("ConflictMediation", "Conflict Mediation", Vec::<String>::new()),
	]
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let patterns = Signal::derive(sample_patterns);
	let (last_clicked, set_last_clicked) = signal(None::<String>);
	let on_node_click = Callback::new(move |id: String| {
		info!("node clicked: {id}");
		set_last_clicked.set(Some(id));
	});

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

			<div class="pattern-web-frame" style="width: 800px; height: 600px;">
				<PatternWeb patterns=patterns on_node_click=on_node_click />
			</div>
			<p class="subtitle">
				"Hover a pattern or connector to highlight it. Click a pattern to select it. "
				{move || last_clicked.get().map(|id| format!("Last clicked: {id}"))}
			</p>
		</ErrorBoundary>
	}
}
