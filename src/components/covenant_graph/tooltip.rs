use leptos::prelude::*;

use super::types::Covenant;

/// Details of the hovered covenant, pinned to the bottom of the graph.
#[component]
pub fn CovenantTooltip(covenant: Covenant) -> impl IntoView {
	let status = covenant.status;

	view! {
		<div class="covenant-tooltip glass">
			<div class="covenant-tooltip-header">
				<div>
					<h4>{covenant.name}</h4>
					<p class="muted">{covenant.legal_reference}</p>
				</div>
				<span class=format!("status-pill {}", status.css_class())>{status.label()}</span>
			</div>
			<p class="muted">{covenant.threshold}</p>
			<div class="covenant-tooltip-meta">
				{covenant
					.current_value
					.map(|value| view! { <span>"Current: "<strong>{value}</strong></span> })}
				<span>"Frequency: "<strong>{covenant.frequency.label()}</strong></span>
				<span>"Confidence: "<strong>{format!("{}%", covenant.confidence)}</strong></span>
			</div>
		</div>
	}
}
