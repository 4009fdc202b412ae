pub mod chart;
pub mod figure;
pub mod serve;
pub mod summary;

pub use figure::{decision_regions, history_figure, write_figure};
pub use serve::{serve, Gallery};
pub use summary::print_summary;
