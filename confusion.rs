use crate::report::ConfusionMatrixReport;
use itertools::izip;
use ndarray::prelude::*;
use num_traits::ToPrimitive;
use thiserror::Error;

/**
A confusion matrix that accumulates counts of (ground truth, prediction) label pairs across batches and computes derived statistics on demand.

Labels are non-negative class indices below the class count, with the exception of a single negative void label whose elements are excluded from all accounting. Updates are plain additive counting, so accumulating a dataset in one call, in many calls, or in independent matrices later combined with [`merge`](#method.merge) all produce the same counts.
*/
pub struct ConfusionMatrix {
	label_names: Vec<String>,
	class_count: usize,
	void_label: i64,
	/// counts[(i, j)] counts elements with ground truth class i predicted as class j.
	counts: Array2<u64>,
	state: State,
}

/// Derived statistics are computed once per accumulation round and cached until the counts change again.
#[derive(Clone, Debug)]
enum State {
	Accumulating,
	Finalized(ConfusionMatrixOutput),
}

#[derive(Debug, Error)]
pub enum ConfusionMatrixError {
	#[error("invalid configuration: {0}")]
	InvalidConfiguration(String),
	#[error("ground truth shape {ground_truth:?} does not match prediction shape {predictions:?}")]
	ShapeMismatch {
		ground_truth: Vec<usize>,
		predictions: Vec<usize>,
	},
	#[error("label {label} is out of range for {class_count} classes")]
	LabelOutOfRange { label: i64, class_count: usize },
	#[error("void label {void_label} found in the predictions")]
	VoidPredictionNotAllowed { void_label: i64 },
	#[error("statistics were already computed for the accumulated counts")]
	StaleStateConflict,
}

/// Options to construct a [`ConfusionMatrix`](struct.ConfusionMatrix.html). At least one of `label_names` and `class_count` must be specified. When only `class_count` is given, the label names default to the stringified class indices.
pub struct ConfusionMatrixOptions {
	pub label_names: Option<Vec<String>>,
	pub class_count: Option<usize>,
	pub void_label: i64,
}

impl Default for ConfusionMatrixOptions {
	fn default() -> Self {
		Self {
			label_names: None,
			class_count: None,
			void_label: -1,
		}
	}
}

/// Options for a single call to [`update_with`](struct.ConfusionMatrix.html#method.update_with).
#[derive(Clone, Copy, Debug)]
pub struct UpdateOptions {
	/// Accept void labels in the predictions and exclude those elements from the counts instead of returning an error.
	pub allow_void_prediction: bool,
	/// Return an error if statistics were already computed for the accumulated counts, so that previously reported results are not silently invalidated.
	pub require_fresh: bool,
}

impl Default for UpdateOptions {
	fn default() -> Self {
		Self {
			allow_void_prediction: false,
			require_fresh: true,
		}
	}
}

/// The statistics derived from the accumulated counts.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionMatrixOutput {
	pub class_metrics: Vec<ClassMetrics>,
	/// The fraction of all counted elements whose prediction matches the ground truth. `None` when nothing has been counted.
	pub global_score: Option<f32>,
	/// The mean of the per-class scores, excluding classes whose score is undefined.
	pub avg_score: Option<f32>,
	/// The mean of the per-class intersection-over-union values, excluding classes whose value is undefined.
	pub avg_iou_score: Option<f32>,
	/// Each row divided by its ground truth count. Cells in rows without ground truth support are `None`.
	pub row_normalized: Array2<Option<f32>>,
	/// Each column divided by its prediction count. Cells in columns without predicted support are `None`.
	pub col_normalized: Array2<Option<f32>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassMetrics {
	/// The number of counted elements whose ground truth is this class.
	pub ground_truth_count: u64,
	/// The number of counted elements predicted as this class.
	pub predicted_count: u64,
	/// The fraction of this class's ground truth elements that were predicted correctly. `None` when the class has no ground truth support.
	pub score: Option<f32>,
	/// The intersection-over-union for this class. `None` when the class has neither ground truth nor predicted support.
	pub iou: Option<f32>,
}

impl ConfusionMatrix {
	pub fn new(options: ConfusionMatrixOptions) -> Result<Self, ConfusionMatrixError> {
		let ConfusionMatrixOptions {
			label_names,
			class_count,
			void_label,
		} = options;
		if void_label >= 0 {
			return Err(ConfusionMatrixError::InvalidConfiguration(format!(
				"the void label must be negative, got {}",
				void_label
			)));
		}
		let label_names = match (label_names, class_count) {
			(Some(label_names), class_count) => {
				if let Some(class_count) = class_count {
					if class_count != label_names.len() {
						return Err(ConfusionMatrixError::InvalidConfiguration(format!(
							"class_count is {} but {} label names were given",
							class_count,
							label_names.len()
						)));
					}
				}
				label_names
			}
			(None, Some(class_count)) => (0..class_count).map(|i| i.to_string()).collect(),
			(None, None) => {
				return Err(ConfusionMatrixError::InvalidConfiguration(
					"either label_names or class_count must be specified".to_owned(),
				))
			}
		};
		if label_names.is_empty() {
			return Err(ConfusionMatrixError::InvalidConfiguration(
				"at least one class is required".to_owned(),
			));
		}
		let class_count = label_names.len();
		Ok(Self {
			label_names,
			class_count,
			void_label,
			counts: Array2::zeros((class_count, class_count)),
			state: State::Accumulating,
		})
	}

	pub fn from_label_names(
		label_names: Vec<String>,
		void_label: i64,
	) -> Result<Self, ConfusionMatrixError> {
		Self::new(ConfusionMatrixOptions {
			label_names: Some(label_names),
			class_count: None,
			void_label,
		})
	}

	pub fn with_class_count(
		class_count: usize,
		void_label: i64,
	) -> Result<Self, ConfusionMatrixError> {
		Self::new(ConfusionMatrixOptions {
			label_names: None,
			class_count: Some(class_count),
			void_label,
		})
	}

	pub fn label_names(&self) -> &[String] {
		&self.label_names
	}

	pub fn class_count(&self) -> usize {
		self.class_count
	}

	pub fn void_label(&self) -> i64 {
		self.void_label
	}

	/// The raw accumulated counts.
	pub fn counts(&self) -> &Array2<u64> {
		&self.counts
	}

	/// Whether derived statistics have been computed for the current counts.
	pub fn is_finished(&self) -> bool {
		matches!(self.state, State::Finalized(_))
	}

	/// Zero the counts and drop any computed statistics.
	pub fn reset(&mut self) {
		self.counts.fill(0);
		self.state = State::Accumulating;
	}

	/// Count a batch of (ground truth, prediction) label pairs with the default [`UpdateOptions`](struct.UpdateOptions.html).
	pub fn update(
		&mut self,
		ground_truth: ArrayViewD<i64>,
		predictions: ArrayViewD<i64>,
	) -> Result<(), ConfusionMatrixError> {
		self.update_with(ground_truth, predictions, UpdateOptions::default())
	}

	/**
	Count a batch of (ground truth, prediction) label pairs.

	The two views must have the same shape and may have any rank, a single segmentation image and a whole batch of images work the same way. Elements whose ground truth label is the void label are excluded. If `allow_void_prediction` is set, elements whose predicted label is the void label are excluded as well, otherwise a void prediction is an error. Validation runs over the entire batch before any counting, so a rejected batch leaves the counts untouched.
	*/
	pub fn update_with(
		&mut self,
		ground_truth: ArrayViewD<i64>,
		predictions: ArrayViewD<i64>,
		options: UpdateOptions,
	) -> Result<(), ConfusionMatrixError> {
		if ground_truth.shape() != predictions.shape() {
			return Err(ConfusionMatrixError::ShapeMismatch {
				ground_truth: ground_truth.shape().to_vec(),
				predictions: predictions.shape().to_vec(),
			});
		}
		if options.require_fresh && self.is_finished() {
			return Err(ConfusionMatrixError::StaleStateConflict);
		}
		for &label in ground_truth.iter() {
			if label != self.void_label {
				self.check_label(label)?;
			}
		}
		for &label in predictions.iter() {
			if label == self.void_label {
				if !options.allow_void_prediction {
					return Err(ConfusionMatrixError::VoidPredictionNotAllowed {
						void_label: self.void_label,
					});
				}
			} else {
				self.check_label(label)?;
			}
		}
		for (&gt, &pred) in ground_truth.iter().zip(predictions.iter()) {
			if gt == self.void_label || pred == self.void_label {
				continue;
			}
			self.counts[(gt.to_usize().unwrap(), pred.to_usize().unwrap())] += 1;
		}
		self.state = State::Accumulating;
		Ok(())
	}

	fn check_label(&self, label: i64) -> Result<(), ConfusionMatrixError> {
		if label.to_usize().map_or(true, |label| label >= self.class_count) {
			return Err(ConfusionMatrixError::LabelOutOfRange {
				label,
				class_count: self.class_count,
			});
		}
		Ok(())
	}

	/**
	Add another matrix's counts to this one.

	This supports accumulating in parallel: give each worker its own matrix and merge them when all workers are done. The merged counts equal the counts a single matrix would have accumulated from all of the workers' batches.
	*/
	pub fn merge(&mut self, other: Self) -> Result<(), ConfusionMatrixError> {
		if other.class_count != self.class_count {
			return Err(ConfusionMatrixError::ShapeMismatch {
				ground_truth: self.counts.shape().to_vec(),
				predictions: other.counts.shape().to_vec(),
			});
		}
		self.counts += &other.counts;
		self.state = State::Accumulating;
		Ok(())
	}

	/// Compute the derived statistics for the current counts. Does nothing if they are already computed.
	pub fn finish(&mut self) {
		if let State::Accumulating = self.state {
			self.state = State::Finalized(self.compute_output());
		}
	}

	/// The derived statistics for the current counts, computing them first if needed. Readers can never observe statistics that are stale relative to the counts.
	pub fn output(&mut self) -> &ConfusionMatrixOutput {
		self.finish();
		match &self.state {
			State::Finalized(output) => output,
			State::Accumulating => unreachable!(),
		}
	}

	/// Render the row normalized matrix and summary scores as a table, computing the statistics first if needed. Label names are cropped to `max_name_length` characters when given.
	pub fn report(&mut self, max_name_length: Option<usize>) -> ConfusionMatrixReport {
		self.finish();
		let output = match &self.state {
			State::Finalized(output) => output,
			State::Accumulating => unreachable!(),
		};
		ConfusionMatrixReport::new(&self.label_names, output, max_name_length)
	}

	fn compute_output(&self) -> ConfusionMatrixOutput {
		let total = self.counts.sum();
		let ground_truth_counts = self.counts.sum_axis(Axis(1));
		let predicted_counts = self.counts.sum_axis(Axis(0));
		let diag = self.counts.diag();
		let class_metrics: Vec<ClassMetrics> = izip!(
			diag.iter(),
			ground_truth_counts.iter(),
			predicted_counts.iter()
		)
		.map(|(&correct, &ground_truth_count, &predicted_count)| {
			let union = ground_truth_count + predicted_count - correct;
			ClassMetrics {
				ground_truth_count,
				predicted_count,
				score: ratio(correct, ground_truth_count),
				iou: ratio(correct, union),
			}
		})
		.collect();
		let global_score = ratio(diag.sum(), total);
		let avg_score = mean_defined(class_metrics.iter().map(|class| class.score));
		let avg_iou_score = mean_defined(class_metrics.iter().map(|class| class.iou));
		let row_normalized = Array2::from_shape_fn((self.class_count, self.class_count), |(i, j)| {
			ratio(self.counts[(i, j)], ground_truth_counts[i])
		});
		let col_normalized = Array2::from_shape_fn((self.class_count, self.class_count), |(i, j)| {
			ratio(self.counts[(i, j)], predicted_counts[j])
		});
		ConfusionMatrixOutput {
			class_metrics,
			global_score,
			avg_score,
			avg_iou_score,
			row_normalized,
			col_normalized,
		}
	}
}

/// `None` when the denominator is zero, so that classes without support produce an explicit undefined value instead of a NaN.
fn ratio(numerator: u64, denominator: u64) -> Option<f32> {
	if denominator == 0 {
		None
	} else {
		Some(numerator.to_f32().unwrap() / denominator.to_f32().unwrap())
	}
}

/// The mean of the defined values, or `None` if there are none.
fn mean_defined(values: impl Iterator<Item = Option<f32>>) -> Option<f32> {
	let mut sum = 0.0;
	let mut count = 0usize;
	for value in values.flatten() {
		sum += value;
		count += 1;
	}
	if count == 0 {
		None
	} else {
		Some(sum / count.to_f32().unwrap())
	}
}

#[test]
fn test_worked_example() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 0, 1, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1, 1, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	assert_eq!(matrix.counts(), &arr2(&[[1u64, 1], [0, 2]]));
	let output = matrix.output();
	insta::assert_compact_debug_snapshot!(output.global_score, @"Some(0.75)");
	insta::assert_compact_debug_snapshot!(output.avg_score, @"Some(0.75)");
	assert_eq!(output.class_metrics[0].score, Some(0.5));
	assert_eq!(output.class_metrics[1].score, Some(1.0));
	assert_eq!(output.class_metrics[0].iou, Some(0.5));
	let avg_iou = output.avg_iou_score.unwrap();
	assert!((avg_iou - 7.0 / 12.0).abs() < 1e-6);
}

#[test]
fn test_batched_updates_match_single_update() {
	let ground_truth = arr1(&[0i64, 2, 1, 1, 2, 0, 2, 1]).into_dyn();
	let predictions = arr1(&[0i64, 2, 2, 1, 0, 0, 2, 1]).into_dyn();
	let mut whole = ConfusionMatrix::with_class_count(3, -1).unwrap();
	whole.update(ground_truth.view(), predictions.view()).unwrap();
	let mut split = ConfusionMatrix::with_class_count(3, -1).unwrap();
	let (gt_a, gt_b) = ground_truth.view().split_at(Axis(0), 3);
	let (pred_a, pred_b) = predictions.view().split_at(Axis(0), 3);
	split.update(gt_a, pred_a).unwrap();
	split.update(gt_b, pred_b).unwrap();
	assert_eq!(whole.counts(), split.counts());
	assert_eq!(whole.output(), split.output());
}

#[test]
fn test_merge_matches_sequential_updates() {
	let gt_a = arr1(&[0i64, 1, 1]).into_dyn();
	let pred_a = arr1(&[0i64, 1, 0]).into_dyn();
	let gt_b = arr1(&[1i64, 0, 0]).into_dyn();
	let pred_b = arr1(&[1i64, 1, 0]).into_dyn();
	let mut sequential = ConfusionMatrix::with_class_count(2, -1).unwrap();
	sequential.update(gt_a.view(), pred_a.view()).unwrap();
	sequential.update(gt_b.view(), pred_b.view()).unwrap();
	let mut worker_a = ConfusionMatrix::with_class_count(2, -1).unwrap();
	worker_a.update(gt_a.view(), pred_a.view()).unwrap();
	let mut worker_b = ConfusionMatrix::with_class_count(2, -1).unwrap();
	worker_b.update(gt_b.view(), pred_b.view()).unwrap();
	worker_a.merge(worker_b).unwrap();
	assert_eq!(worker_a.counts(), sequential.counts());
	let other = ConfusionMatrix::with_class_count(3, -1).unwrap();
	assert!(matches!(
		worker_a.merge(other),
		Err(ConfusionMatrixError::ShapeMismatch { .. })
	));
}

#[test]
fn test_reset() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 1]).into_dyn();
	let predictions = arr1(&[1i64, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	matrix.finish();
	matrix.reset();
	assert!(!matrix.is_finished());
	assert_eq!(matrix.counts(), &Array2::<u64>::zeros((2, 2)));
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	let mut fresh = ConfusionMatrix::with_class_count(2, -1).unwrap();
	fresh.update(ground_truth.view(), predictions.view()).unwrap();
	assert_eq!(matrix.counts(), fresh.counts());
}

#[test]
fn test_invalid_configuration() {
	assert!(matches!(
		ConfusionMatrix::new(ConfusionMatrixOptions::default()),
		Err(ConfusionMatrixError::InvalidConfiguration(_))
	));
	assert!(matches!(
		ConfusionMatrix::with_class_count(2, 0),
		Err(ConfusionMatrixError::InvalidConfiguration(_))
	));
	assert!(matches!(
		ConfusionMatrix::with_class_count(0, -1),
		Err(ConfusionMatrixError::InvalidConfiguration(_))
	));
	assert!(matches!(
		ConfusionMatrix::new(ConfusionMatrixOptions {
			label_names: Some(vec!["a".to_owned(), "b".to_owned()]),
			class_count: Some(3),
			void_label: -1,
		}),
		Err(ConfusionMatrixError::InvalidConfiguration(_))
	));
	let matrix = ConfusionMatrix::with_class_count(3, -1).unwrap();
	assert_eq!(matrix.label_names(), &["0", "1", "2"]);
}

#[test]
fn test_shape_mismatch_leaves_counts_unchanged() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 1, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1]).into_dyn();
	assert!(matches!(
		matrix.update(ground_truth.view(), predictions.view()),
		Err(ConfusionMatrixError::ShapeMismatch { .. })
	));
	assert_eq!(matrix.counts(), &Array2::<u64>::zeros((2, 2)));
}

#[test]
fn test_label_out_of_range_leaves_counts_unchanged() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ok = arr1(&[0i64, 1]).into_dyn();
	let too_large = arr1(&[0i64, 2]).into_dyn();
	assert!(matches!(
		matrix.update(too_large.view(), ok.view()),
		Err(ConfusionMatrixError::LabelOutOfRange { label: 2, .. })
	));
	assert!(matches!(
		matrix.update(ok.view(), too_large.view()),
		Err(ConfusionMatrixError::LabelOutOfRange { label: 2, .. })
	));
	// negative labels other than the void label are not valid classes
	let negative = arr1(&[0i64, -2]).into_dyn();
	assert!(matches!(
		matrix.update(negative.view(), ok.view()),
		Err(ConfusionMatrixError::LabelOutOfRange { label: -2, .. })
	));
	let extremes = arr1(&[i64::MAX, i64::MIN]).into_dyn();
	assert!(matches!(
		matrix.update(extremes.view(), ok.view()),
		Err(ConfusionMatrixError::LabelOutOfRange { .. })
	));
	assert_eq!(matrix.counts(), &Array2::<u64>::zeros((2, 2)));
}

#[test]
fn test_void_predictions() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 1]).into_dyn();
	let predictions = arr1(&[-1i64, 1]).into_dyn();
	assert!(matches!(
		matrix.update(ground_truth.view(), predictions.view()),
		Err(ConfusionMatrixError::VoidPredictionNotAllowed { void_label: -1 })
	));
	assert_eq!(matrix.counts(), &Array2::<u64>::zeros((2, 2)));
	matrix
		.update_with(
			ground_truth.view(),
			predictions.view(),
			UpdateOptions {
				allow_void_prediction: true,
				..Default::default()
			},
		)
		.unwrap();
	assert_eq!(matrix.counts(), &arr2(&[[0u64, 0], [0, 1]]));
}

#[test]
fn test_void_ground_truth_always_excluded() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -2).unwrap();
	let ground_truth = arr1(&[-2i64, 0, -2]).into_dyn();
	let predictions = arr1(&[0i64, 0, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	assert_eq!(matrix.counts(), &arr2(&[[1u64, 0], [0, 0]]));
	// with a custom void label, -1 is just an ordinary invalid label
	let minus_one = arr1(&[-1i64, 0, 0]).into_dyn();
	assert!(matches!(
		matrix.update(minus_one.view(), predictions.view()),
		Err(ConfusionMatrixError::LabelOutOfRange { label: -1, .. })
	));
}

#[test]
fn test_update_after_finish() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	matrix.finish();
	assert!(matrix.is_finished());
	assert!(matches!(
		matrix.update(ground_truth.view(), predictions.view()),
		Err(ConfusionMatrixError::StaleStateConflict)
	));
	matrix
		.update_with(
			ground_truth.view(),
			predictions.view(),
			UpdateOptions {
				require_fresh: false,
				..Default::default()
			},
		)
		.unwrap();
	assert!(!matrix.is_finished());
	assert_eq!(matrix.counts(), &arr2(&[[2u64, 0], [0, 2]]));
}

#[test]
fn test_finish_is_idempotent() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 0, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	let first = matrix.output().clone();
	matrix.finish();
	assert_eq!(&first, matrix.output());
}

#[test]
fn test_trace_identity() {
	let mut matrix = ConfusionMatrix::with_class_count(3, -1).unwrap();
	let ground_truth = arr1(&[0i64, 1, 2, 2, 1, 0]).into_dyn();
	let predictions = arr1(&[0i64, 2, 1, 2, 1, 0]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	let total = matrix.counts().sum().to_f32().unwrap();
	let trace = matrix.counts().diag().sum().to_f32().unwrap();
	let global_score = matrix.output().global_score.unwrap();
	assert!((global_score * total - trace).abs() < 1e-5);
}

#[test]
fn test_row_normalization() {
	let mut matrix = ConfusionMatrix::with_class_count(3, -1).unwrap();
	// class 2 never occurs in the ground truth
	let ground_truth = arr1(&[0i64, 0, 0, 1, 1, 1, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1, 2, 1, 1, 0, 2]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	let output = matrix.output();
	for (row, class) in output
		.row_normalized
		.genrows()
		.into_iter()
		.zip(output.class_metrics.iter())
	{
		if class.ground_truth_count == 0 {
			assert!(row.iter().all(|cell| cell.is_none()));
		} else {
			let sum: f32 = row.iter().map(|cell| cell.unwrap()).sum();
			assert!((sum - 1.0).abs() < 1e-5);
		}
	}
	// a class with predictions but no ground truth has a defined iou of zero
	assert_eq!(output.class_metrics[2].score, None);
	assert_eq!(output.class_metrics[2].iou, Some(0.0));
}

#[test]
fn test_col_normalization() {
	let mut matrix = ConfusionMatrix::with_class_count(3, -1).unwrap();
	// class 2 occurs in the ground truth but is never predicted
	let ground_truth = arr1(&[0i64, 0, 1, 1, 2, 2]).into_dyn();
	let predictions = arr1(&[0i64, 1, 0, 1, 0, 1]).into_dyn();
	matrix.update(ground_truth.view(), predictions.view()).unwrap();
	let output = matrix.output();
	// each ground truth row has two elements, so a column cell is a third of
	// its column but half of its row, which catches a swapped denominator
	assert_eq!(output.col_normalized[(0, 0)], Some(1.0 / 3.0));
	assert_eq!(output.col_normalized[(2, 1)], Some(1.0 / 3.0));
	assert_eq!(output.row_normalized[(2, 1)], Some(0.5));
	for (col, class) in output
		.col_normalized
		.gencolumns()
		.into_iter()
		.zip(output.class_metrics.iter())
	{
		if class.predicted_count == 0 {
			assert!(col.iter().all(|cell| cell.is_none()));
		} else {
			let sum: f32 = col.iter().map(|cell| cell.unwrap()).sum();
			assert!((sum - 1.0).abs() < 1e-5);
		}
	}
	assert_eq!(output.class_metrics[2].predicted_count, 0);
}

#[test]
fn test_multidimensional_input() {
	let mut batched = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr2(&[[0i64, 0], [1, 1]]).into_dyn();
	let predictions = arr2(&[[0i64, 1], [1, 1]]).into_dyn();
	batched.update(ground_truth.view(), predictions.view()).unwrap();
	let mut flat = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let ground_truth = arr1(&[0i64, 0, 1, 1]).into_dyn();
	let predictions = arr1(&[0i64, 1, 1, 1]).into_dyn();
	flat.update(ground_truth.view(), predictions.view()).unwrap();
	assert_eq!(batched.counts(), flat.counts());
}

#[test]
fn test_empty_matrix_statistics() {
	let mut matrix = ConfusionMatrix::with_class_count(2, -1).unwrap();
	let output = matrix.output();
	assert_eq!(output.global_score, None);
	assert_eq!(output.avg_score, None);
	assert_eq!(output.avg_iou_score, None);
	assert!(output.row_normalized.iter().all(|cell| cell.is_none()));
	assert!(output.col_normalized.iter().all(|cell| cell.is_none()));
}
