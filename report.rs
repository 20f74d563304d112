use crate::confusion::ConfusionMatrixOutput;
use std::fmt;

/**
A human-readable rendering of a confusion matrix, produced by [`ConfusionMatrix::report`](struct.ConfusionMatrix.html#method.report).

Writes one line per class showing the row normalized counts as percentages, then the global, average, and intersection-over-union scores. Cells and scores that are undefined because a class has no support render as `n/a`.
*/
pub struct ConfusionMatrixReport<'a> {
	label_names: Vec<String>,
	name_width: usize,
	output: &'a ConfusionMatrixOutput,
}

impl<'a> ConfusionMatrixReport<'a> {
	pub(crate) fn new(
		label_names: &[String],
		output: &'a ConfusionMatrixOutput,
		max_name_length: Option<usize>,
	) -> Self {
		let longest_name = label_names
			.iter()
			.map(|name| name.chars().count())
			.max()
			.unwrap_or(0);
		let name_width = max_name_length.unwrap_or(longest_name);
		let label_names = label_names
			.iter()
			.map(|name| name.chars().take(name_width).collect())
			.collect();
		Self {
			label_names,
			name_width,
			output,
		}
	}
}

impl<'a> fmt::Display for ConfusionMatrixReport<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (name, row) in self
			.label_names
			.iter()
			.zip(self.output.row_normalized.genrows())
		{
			write!(f, "{:>width$}", name, width = self.name_width)?;
			for cell in row.iter() {
				write!(f, ", {}", Percent(*cell))?;
			}
			writeln!(f)?;
		}
		writeln!(f, "Global:  {}", Percent(self.output.global_score))?;
		writeln!(f, "Average: {}", Percent(self.output.avg_score))?;
		writeln!(f, "IoU:     {}", Percent(self.output.avg_iou_score))?;
		Ok(())
	}
}

struct Percent(Option<f32>);

impl fmt::Display for Percent {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self.0 {
			Some(value) => write!(f, "{:>6.2}%", value * 100.0),
			None => write!(f, "{:>7}", "n/a"),
		}
	}
}

#[cfg(test)]
mod test {
	use crate::{ConfusionMatrix, ConfusionMatrixOptions};
	use ndarray::prelude::*;

	#[test]
	fn test_report() {
		let mut matrix =
			ConfusionMatrix::from_label_names(vec!["cat".to_owned(), "dog".to_owned()], -1)
				.unwrap();
		let ground_truth = arr1(&[0i64, 0, 1, 1]).into_dyn();
		let predictions = arr1(&[0i64, 1, 1, 1]).into_dyn();
		matrix.update(ground_truth.view(), predictions.view()).unwrap();
		let report = matrix.report(None).to_string();
		let expected = "cat,  50.00%,  50.00%\n\
			dog,   0.00%, 100.00%\n\
			Global:   75.00%\n\
			Average:  75.00%\n\
			IoU:      58.33%\n";
		assert_eq!(report, expected);
	}

	#[test]
	fn test_report_crops_names_and_marks_undefined_cells() {
		let mut matrix = ConfusionMatrix::new(ConfusionMatrixOptions {
			label_names: Some(vec!["water".to_owned(), "sky".to_owned()]),
			class_count: None,
			void_label: -1,
		})
		.unwrap();
		// nothing in the ground truth belongs to sky
		let ground_truth = arr1(&[0i64, 0]).into_dyn();
		let predictions = arr1(&[0i64, 0]).into_dyn();
		matrix.update(ground_truth.view(), predictions.view()).unwrap();
		let report = matrix.report(Some(3)).to_string();
		let expected = "wat, 100.00%,   0.00%\n\
			sky,     n/a,     n/a\n\
			Global:  100.00%\n\
			Average: 100.00%\n\
			IoU:     100.00%\n";
		assert_eq!(report, expected);
	}
}
