#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CovenantStatus {
	Compliant,
	AtRisk,
	Breach,
	Pending,
}

impl CovenantStatus {
	/// Fixed categorical stroke/fill color for the status.
	pub fn color(self) -> &'static str {
		match self {
			Self::Compliant => "#4caf75",
			Self::AtRisk => "#cca333",
			Self::Breach => "#bf4040",
			Self::Pending => "#737b8c",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Compliant => "Compliant",
			Self::AtRisk => "At Risk",
			Self::Breach => "Breach",
			Self::Pending => "Pending",
		}
	}

	pub fn css_class(self) -> &'static str {
		match self {
			Self::Compliant => "status-compliant",
			Self::AtRisk => "status-at-risk",
			Self::Breach => "status-breach",
			Self::Pending => "status-pending",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Materiality {
	High,
	Medium,
	Low,
}

impl Materiality {
	pub fn node_radius(self) -> f64 {
		match self {
			Self::High => 35.0,
			Self::Medium => 28.0,
			Self::Low => 22.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frequency {
	Monthly,
	Quarterly,
	SemiAnnual,
	Annual,
	Ongoing,
}

impl Frequency {
	pub fn label(self) -> &'static str {
		match self {
			Self::Monthly => "Monthly",
			Self::Quarterly => "Quarterly",
			Self::SemiAnnual => "Semi-annual",
			Self::Annual => "Annual",
			Self::Ongoing => "Ongoing",
		}
	}
}

/// A loan covenant as supplied by the surrounding page.
///
/// `dependencies` holds ids of other covenants in the same facility; ids that
/// do not resolve are tolerated and simply produce no edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Covenant {
	pub id: String,
	pub name: String,
	pub threshold: String,
	pub legal_reference: String,
	pub current_value: Option<String>,
	pub frequency: Frequency,
	pub status: CovenantStatus,
	pub materiality: Materiality,
	/// 0-100
	pub confidence: u8,
	pub dependencies: Vec<String>,
}

#[cfg(test)]
impl Covenant {
	pub(crate) fn fixture(id: &str, dependencies: &[&str]) -> Self {
		Self {
			id: id.into(),
			name: format!("Covenant {id}"),
			threshold: String::new(),
			legal_reference: String::new(),
			current_value: None,
			frequency: Frequency::Quarterly,
			status: CovenantStatus::Compliant,
			materiality: Materiality::Medium,
			confidence: 100,
			dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
		}
	}
}
