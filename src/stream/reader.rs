use std::io::{self, BufRead, Read, Write};

/// How a line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
	/// End of stream without a line break.
	None,
	Lf,
	CrLf,
}

impl Terminator {
	pub fn as_bytes(self) -> &'static [u8] {
		match self {
			Terminator::None => b"",
			Terminator::Lf => b"\n",
			Terminator::CrLf => b"\r\n",
		}
	}
}

/// Result of reading one line into the caller's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadLine {
	/// The whole line is in the buffer, terminator stripped.
	Complete(Terminator),

	/// The buffer filled up before the line ended. It holds the first
	/// `limit + 2` raw bytes and the rest of the line is still unread.
	Overflow,
}

/// Reads lines without ever buffering more than `limit + 2` bytes of one.
///
/// The extra two bytes leave room for a `\r\n` terminator, so a line whose
/// content is exactly `limit` bytes always reads as `Complete`.
#[derive(Debug)]
pub struct LineReader<R> {
	inner: R,
	limit: usize,
}

impl<R: BufRead> LineReader<R> {
	pub fn new(inner: R, limit: usize) -> Self {
		LineReader { inner, limit }
	}

	/// Read the next line into `buf`, or `None` at end of stream.
	pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<Option<ReadLine>> {
		buf.clear();

		let cap = self.limit.saturating_add(2);
		let n = (&mut self.inner)
			.take(cap as u64)
			.read_until(b'\n', buf)?;

		if n == 0 {
			return Ok(None);
		}

		if buf.last() == Some(&b'\n') {
			buf.pop();
			if buf.last() == Some(&b'\r') {
				buf.pop();
				return Ok(Some(ReadLine::Complete(Terminator::CrLf)));
			}
			return Ok(Some(ReadLine::Complete(Terminator::Lf)));
		}

		if n < cap {
			// End of stream inside the line.
			return Ok(Some(ReadLine::Complete(Terminator::None)));
		}

		Ok(Some(ReadLine::Overflow))
	}

	/// Consume the unread remainder of an overflowed line.
	///
	/// If `sink` is given the remainder, terminator included, is copied to it.
	/// `last` is the final byte already read, used to recognize a `\r\n`
	/// split across the boundary. Returns the terminator and the number of
	/// bytes consumed before the `\n`; for `CrLf` that count includes the
	/// `\r` unless it was already in the caller's buffer.
	pub fn finish_line<W: Write>(
		&mut self,
		mut sink: Option<&mut W>,
		mut last: Option<u8>,
	) -> io::Result<(Terminator, usize)> {
		let mut consumed = 0;

		loop {
			let chunk = self.inner.fill_buf()?;
			if chunk.is_empty() {
				return Ok((Terminator::None, consumed));
			}

			match chunk.iter().position(|&b| b == b'\n') {
				Some(pos) => {
					let prev = if pos == 0 { last } else { Some(chunk[pos - 1]) };
					if let Some(w) = sink.as_mut() {
						w.write_all(&chunk[..=pos])?;
					}
					self.inner.consume(pos + 1);

					let term = if prev == Some(b'\r') {
						Terminator::CrLf
					} else {
						Terminator::Lf
					};
					return Ok((term, consumed + pos));
				}
				None => {
					let len = chunk.len();
					last = chunk.last().copied();
					if let Some(w) = sink.as_mut() {
						w.write_all(chunk)?;
					}
					self.inner.consume(len);
					consumed += len;
				}
			}
		}
	}
}
