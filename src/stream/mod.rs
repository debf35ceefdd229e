//! Line stream handling for linepatch.
//!
//! This module handles:
//! - Bounded line reading from any `BufRead`
//! - Applying the patcher line by line, in input order
//! - The long-line policy and per-run statistics

pub mod reader;

pub use reader::{LineReader, ReadLine, Terminator};

use crate::config::types::LongLinePolicy;
use crate::error::{PatchError, Result};
use crate::patterns::Patcher;
use std::borrow::Cow;
use std::fmt;
use std::io::{BufRead, Write};

/// Counters for one pass over a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamReport {
	pub lines_read: u64,
	pub lines_patched: u64,
	pub lines_skipped: u64,
	pub lines_truncated: u64,
	pub lines_passed_through: u64,
}

impl StreamReport {
	/// Whether any over-long line was dropped or altered.
	pub fn lost_data(&self) -> bool {
		self.lines_skipped > 0 || self.lines_truncated > 0
	}

	/// Number of over-long lines seen, however they were handled.
	pub fn long_lines(&self) -> u64 {
		self.lines_skipped + self.lines_truncated + self.lines_passed_through
	}
}

impl fmt::Display for StreamReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} lines read, {} patched, {} skipped, {} truncated, {} passed through",
			self.lines_read,
			self.lines_patched,
			self.lines_skipped,
			self.lines_truncated,
			self.lines_passed_through
		)
	}
}

/// Patch every line of `input` and write it to `output`.
///
/// Lines are emitted in input order with their original terminators. An
/// over-long line is handled according to `policy`; `on_long_line` is called
/// with the corresponding error for every such line that does not stop the
/// run. Read and write errors are fatal. `output` is flushed before return,
/// including when `policy` is `Fail`.
pub fn patch_stream<R, W, F>(
	input: R,
	output: &mut W,
	patcher: &Patcher,
	policy: LongLinePolicy,
	mut on_long_line: F,
) -> Result<StreamReport>
where
	R: BufRead,
	W: Write,
	F: FnMut(&PatchError),
{
	let max = patcher.max_line_length();
	let mut reader = LineReader::new(input, max);
	let mut report = StreamReport::default();
	let mut buf = Vec::with_capacity(max.min(64 * 1024) + 2);

	while let Some(read) = reader.read_line(&mut buf)? {
		report.lines_read += 1;
		let line_no = report.lines_read;

		let terminator = match read {
			ReadLine::Complete(terminator) => terminator,
			ReadLine::Overflow => {
				let err = handle_overflow(
					&mut reader,
					output,
					&buf,
					line_no,
					policy,
					patcher,
					&mut report,
				)?;
				on_long_line(&err);
				continue;
			}
		};

		match patcher.process(line_no, &buf) {
			Ok(patched) => {
				if let Cow::Owned(_) = patched {
					report.lines_patched += 1;
				}
				write_line(output, &patched, terminator)?;
			}
			Err(err) if err.is_line_too_long() => {
				match policy {
					LongLinePolicy::Fail => {
						output.flush()?;
						return Err(err);
					}
					LongLinePolicy::Skip => report.lines_skipped += 1,
					LongLinePolicy::Truncate => {
						let content = truncated_patch(patcher, &buf);
						write_line(output, &content, terminator)?;
						report.lines_truncated += 1;
					}
					LongLinePolicy::Passthrough => {
						write_line(output, &buf, terminator)?;
						report.lines_passed_through += 1;
					}
				}
				on_long_line(&err);
			}
			Err(err) => return Err(err),
		}
	}

	output.flush()?;
	Ok(report)
}

/// Handle a line whose remainder is still unread. Returns the warning to
/// report, or an error when `policy` is `Fail`.
fn handle_overflow<R: BufRead, W: Write>(
	reader: &mut LineReader<R>,
	output: &mut W,
	buf: &[u8],
	line_no: u64,
	policy: LongLinePolicy,
	patcher: &Patcher,
	report: &mut StreamReport,
) -> Result<PatchError> {
	let max = patcher.max_line_length();
	let last = buf.last().copied();

	let (terminator, rest) = if policy == LongLinePolicy::Passthrough {
		output.write_all(buf)?;
		reader.finish_line(Some(&mut *output), last)?
	} else {
		reader.finish_line::<W>(None, last)?
	};

	let mut len = buf.len() + rest;
	if terminator == Terminator::CrLf {
		len -= 1;
	}
	let err = PatchError::LineTooLong {
		line: line_no,
		len,
		max,
	};

	match policy {
		LongLinePolicy::Fail => {
			output.flush()?;
			Err(err)
		}
		LongLinePolicy::Skip => {
			report.lines_skipped += 1;
			Ok(err)
		}
		LongLinePolicy::Truncate => {
			let content = truncated_patch(patcher, buf);
			write_line(output, &content, terminator)?;
			report.lines_truncated += 1;
			Ok(err)
		}
		LongLinePolicy::Passthrough => {
			report.lines_passed_through += 1;
			Ok(err)
		}
	}
}

/// Patch the first `max` bytes of `line` and cut the result back to `max`.
fn truncated_patch<'a>(patcher: &Patcher, line: &'a [u8]) -> Cow<'a, [u8]> {
	let max = patcher.max_line_length();
	let head = &line[..line.len().min(max)];
	match crate::patterns::process_line(head, patcher.table()) {
		Cow::Borrowed(b) => Cow::Borrowed(b),
		Cow::Owned(mut v) => {
			v.truncate(max);
			Cow::Owned(v)
		}
	}
}

fn write_line<W: Write>(output: &mut W, content: &[u8], terminator: Terminator) -> Result<()> {
	output.write_all(content)?;
	output.write_all(terminator.as_bytes())?;
	Ok(())
}
