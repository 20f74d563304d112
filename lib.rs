/*!
This crate implements an incrementally updatable confusion matrix for multi-class classification and semantic segmentation evaluation. A [`ConfusionMatrix`](struct.ConfusionMatrix.html) accumulates counts of (ground truth, prediction) label pairs over one or more batches, then derives global accuracy, per-class accuracy, per-class intersection-over-union, and row/column normalized matrices. Classes without support produce explicit `None` values instead of NaNs and are excluded from the macro averages. [`ConfusionMatrixReport`](struct.ConfusionMatrixReport.html) renders the accumulated results as a human-readable table.
*/

mod confusion;
mod report;

pub use self::confusion::{
	ClassMetrics, ConfusionMatrix, ConfusionMatrixError, ConfusionMatrixOptions,
	ConfusionMatrixOutput, UpdateOptions,
};
pub use self::report::ConfusionMatrixReport;
