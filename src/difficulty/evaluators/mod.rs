pub use self::{reading::ReadingEvaluator, snap_flow::SnapFlowEvaluator};

mod reading;
mod snap_flow;
