use leptos::prelude::*;

use crate::components::covenant_graph::{
	Covenant, CovenantGraphCanvas, CovenantStatus, Frequency, Materiality,
};

/// Covenants of the bundled demo facility.
///
/// `CL-4` references a reporting covenant that lives in another facility; the
/// graph drops that dependency.
fn sample_covenants() -> Vec<Covenant> {
	vec![
		Covenant {
			id: "FIN-1".into(),
			name: "Maximum Leverage Ratio".into(),
			threshold: "Total Net Debt / EBITDA <= 3.50x".into(),
			legal_reference: "Clause 22.2(a)".into(),
			current_value: Some("3.12x".into()),
			frequency: Frequency::Quarterly,
			status: CovenantStatus::Compliant,
			materiality: Materiality::High,
			confidence: 94,
			dependencies: vec!["REP-1".into(), "FIN-3".into()],
		},
		Covenant {
			id: "FIN-2".into(),
			name: "Minimum Interest Cover".into(),
			threshold: "EBITDA / Net Finance Charges >= 4.00x".into(),
			legal_reference: "Clause 22.2(b)".into(),
			current_value: Some("4.21x".into()),
			frequency: Frequency::Quarterly,
			status: CovenantStatus::AtRisk,
			materiality: Materiality::High,
			confidence: 81,
			dependencies: vec!["REP-1".into(), "FIN-3".into()],
		},
		Covenant {
			id: "FIN-3".into(),
			name: "EBITDA Definition".into(),
			threshold: "Consolidated EBITDA adjusted per Schedule 9".into(),
			legal_reference: "Clause 1.1".into(),
			current_value: None,
			frequency: Frequency::Ongoing,
			status: CovenantStatus::Compliant,
			materiality: Materiality::Medium,
			confidence: 88,
			dependencies: vec![],
		},
		Covenant {
			id: "REP-1".into(),
			name: "Compliance Certificate".into(),
			threshold: "Delivered within 45 days of quarter end".into(),
			legal_reference: "Clause 20.2".into(),
			current_value: None,
			frequency: Frequency::Quarterly,
			status: CovenantStatus::Pending,
			materiality: Materiality::Medium,
			confidence: 70,
			dependencies: vec!["REP-2".into()],
		},
		Covenant {
			id: "REP-2".into(),
			name: "Annual Audited Accounts".into(),
			threshold: "Delivered within 120 days of year end".into(),
			legal_reference: "Clause 20.1(a)".into(),
			current_value: None,
			frequency: Frequency::Annual,
			status: CovenantStatus::Compliant,
			materiality: Materiality::Low,
			confidence: 99,
			dependencies: vec![],
		},
		Covenant {
			id: "NEG-1".into(),
			name: "Negative Pledge".into(),
			threshold: "No security over assets save Permitted Security".into(),
			legal_reference: "Clause 23.3".into(),
			current_value: None,
			frequency: Frequency::Ongoing,
			status: CovenantStatus::Breach,
			materiality: Materiality::High,
			confidence: 65,
			dependencies: vec!["CL-4".into()],
		},
		Covenant {
			id: "CL-4".into(),
			name: "Permitted Financial Indebtedness".into(),
			threshold: "Basket capped at GBP 25m".into(),
			legal_reference: "Clause 23.5".into(),
			current_value: Some("GBP 21.4m".into()),
			frequency: Frequency::Monthly,
			status: CovenantStatus::AtRisk,
			materiality: Materiality::Medium,
			confidence: 77,
			dependencies: vec!["FIN-1".into(), "REP-9".into()],
		},
		Covenant {
			id: "AFF-1".into(),
			name: "Insurance Maintenance".into(),
			threshold: "Assets insured with reputable underwriters".into(),
			legal_reference: "Clause 24.8".into(),
			current_value: None,
			frequency: Frequency::SemiAnnual,
			status: CovenantStatus::Compliant,
			materiality: Materiality::Low,
			confidence: 92,
			dependencies: vec!["NEG-1".into()],
		},
	]
}

/// Covenant dependency graph for a single facility.
#[component]
pub fn Graph() -> impl IntoView {
	let covenants = Signal::derive(sample_covenants);
	let selected = RwSignal::new(None::<Covenant>);
	let selected_id = Signal::derive(move || selected.with(|c| c.as_ref().map(|c| c.id.clone())));
	let on_select = Callback::new(move |covenant: Option<Covenant>| selected.set(covenant));

	view! {
		<main class="graph-page">
			<header class="graph-header">
				<h1>"Project Atlas Senior Facilities"</h1>
				<p class="subtitle">"Hover a covenant for details. Click to select, click again to clear."</p>
			</header>
			<div class="graph-panel">
				<CovenantGraphCanvas covenants=covenants selected=selected_id on_select=on_select />
			</div>
			<aside class="selection-panel">
				{move || match selected.get() {
					Some(covenant) => {
						view! {
							<div class="selection-detail">
								<h2>{covenant.name}</h2>
								<p class="muted">{covenant.legal_reference}</p>
								<p>{covenant.threshold}</p>
							</div>
						}
							.into_any()
					}
					None => view! { <p class="muted">"No covenant selected"</p> }.into_any(),
				}}
			</aside>
		</main>
	}
}
