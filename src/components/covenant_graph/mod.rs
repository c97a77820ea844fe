mod component;
mod layout;
mod render;
mod state;
mod tooltip;
mod types;

pub use component::CovenantGraphCanvas;
pub use types::{Covenant, CovenantStatus, Frequency, Materiality};
