//! Small parsing helpers built on top of [`ByteIterator`](super::iterator::ByteIterator).
//!
//! These functions implement the token level of simple bracketed text formats:
//! - `parse_word` for runs of ASCII letters (keywords)
//! - `parse_tag_ignore_case` for matching a fixed keyword
//! - `parse_number_as_string` and `parse_number_as<T>` for decimal numbers
//! - `parse_delimited_entries` to iterate over comma separated lists in brackets
//!
//! Parsing functions consume only as much as needed and leave the iterator positioned at the
//! next token (e.g., after a closing bracket).

use super::iterator::ByteIterator;
use anyhow::{Context, Result, bail};
use std::str::FromStr;

/// Parse a run of ASCII letters and return it.
///
/// Leading whitespace is skipped. Returns an empty string if the next byte is not a letter.
pub fn parse_word(iter: &mut ByteIterator) -> String {
	iter.skip_whitespace();
	let mut word = String::new();
	while let Some(b) = iter.peek() {
		if !b.is_ascii_alphabetic() {
			break;
		}
		word.push(b as char);
		iter.advance();
	}
	word
}

/// Match a fixed ASCII keyword at the current iterator position, ignoring case.
///
/// # Errors
/// Returns an error if the upcoming bytes do not match `tag` or if the buffer is exhausted
/// prematurely.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_tag_ignore_case};
/// let mut it = ByteIterator::from_text("Empty", true);
/// parse_tag_ignore_case(&mut it, "EMPTY").unwrap();
/// ```
pub fn parse_tag_ignore_case(iter: &mut ByteIterator, tag: &str) -> Result<()> {
	for c in tag.bytes() {
		match iter.expect_next_byte()? {
			b if b.eq_ignore_ascii_case(&c) => {}
			_ => return Err(iter.format_error(&format!("unexpected character while parsing tag '{tag}'"))),
		}
	}
	Ok(())
}

/// Parse a decimal number and return its textual representation.
///
/// Accepts an optional sign, an integer part, an optional fraction and an optional exponent
/// (`e`/`E` with optional sign). Either the integer part or the fraction must contain a digit,
/// so `.5` and `5.` are accepted while `.` is not.
///
/// Leaves the iterator at the first byte that is not part of the number.
///
/// # Errors
/// Returns an error if required digits are missing.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_number_as_string};
/// let mut it = ByteIterator::from_text("-12.5e3 ", true);
/// assert_eq!(parse_number_as_string(&mut it).unwrap(), "-12.5e3");
/// ```
pub fn parse_number_as_string(iter: &mut ByteIterator) -> Result<String> {
	iter.skip_whitespace();
	let mut number = String::with_capacity(24);

	if let Some(b'+' | b'-') = iter.peek() {
		number.push(iter.expect_next_byte()? as char);
	}

	let mut has_digits = false;
	while let Some(b'0'..=b'9') = iter.peek() {
		has_digits = true;
		number.push(iter.expect_next_byte()? as char);
	}

	if let Some(b'.') = iter.peek() {
		number.push(iter.expect_next_byte()? as char);
		while let Some(b'0'..=b'9') = iter.peek() {
			has_digits = true;
			number.push(iter.expect_next_byte()? as char);
		}
		if let Some(b'.') = iter.peek() {
			return Err(iter.format_error("unexpected '.' in number"));
		}
	}

	if !has_digits {
		return Err(iter.format_error("expected digits in number"));
	}

	if let Some(b'e' | b'E') = iter.peek() {
		number.push(iter.expect_next_byte()? as char);
		if let Some(b'+' | b'-') = iter.peek() {
			number.push(iter.expect_next_byte()? as char);
		}
		let mut exponent_digits = false;
		while let Some(b'0'..=b'9') = iter.peek() {
			exponent_digits = true;
			number.push(iter.expect_next_byte()? as char);
		}
		if !exponent_digits {
			return Err(iter.format_error("expected digits after exponent"));
		}
	}

	Ok(number)
}

/// Parse a decimal number and convert it to a concrete type `R`.
///
/// # Errors
/// Returns an error if number parsing fails or if `R::from_str` rejects the text.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_number_as};
/// let mut it = ByteIterator::from_text("42", true);
/// let n: f64 = parse_number_as(&mut it).unwrap();
/// assert_eq!(n, 42.0);
/// ```
pub fn parse_number_as<R: FromStr>(iter: &mut ByteIterator) -> Result<R> {
	parse_number_as_string(iter)?
		.parse::<R>()
		.map_err(|_| iter.format_error("invalid number"))
}

/// Iterate over comma separated entries enclosed by `open` and `close`, collecting the results
/// from `parse_value`.
///
/// Allows optional whitespace between tokens and returns an empty `Vec` for an empty list.
///
/// # Errors
/// Returns an error on malformed lists (missing brackets or commas) or if `parse_value` fails.
///
/// # Example
/// ```
/// # use geomkit_core::byte_iterator::{ByteIterator, parse_delimited_entries, parse_number_as};
/// let mut it = ByteIterator::from_text("(1, 2,3)", true);
/// let nums: Vec<i32> = parse_delimited_entries(&mut it, b'(', b')', parse_number_as).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
pub fn parse_delimited_entries<R>(
	iter: &mut ByteIterator,
	open: u8,
	close: u8,
	mut parse_value: impl FnMut(&mut ByteIterator) -> Result<R>,
) -> Result<Vec<R>> {
	iter.skip_whitespace();
	if iter.expect_next_byte()? != open {
		bail!(iter.format_error(&format!("expected '{}' while parsing a list", open as char)));
	}

	let mut result = Vec::new();

	iter.skip_whitespace();
	if iter.peek() == Some(close) {
		iter.advance();
		return Ok(result);
	}

	result.push(parse_value(iter).context("while parsing list entry")?);

	loop {
		iter.skip_whitespace();
		match iter.expect_next_byte()? {
			b if b == close => break,
			b',' => {
				iter.skip_whitespace();
				result.push(parse_value(iter).context("while parsing list entry")?);
			}
			_ => {
				return Err(iter.format_error(&format!(
					"parsing list, expected ',' or '{}'",
					close as char
				)));
			}
		}
	}

	Ok(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn word() {
		let mut iter = ByteIterator::from_text("  LineString (", false);
		assert_eq!(parse_word(&mut iter), "LineString");
		assert_eq!(parse_word(&mut iter), "");
		assert_eq!(iter.peek(), Some(b'('));
	}

	#[test]
	fn tag_ignore_case() {
		fn parse(text: &str, tag: &str) -> bool {
			let mut iter = ByteIterator::from_text(text, false);
			parse_tag_ignore_case(&mut iter, tag).is_ok()
		}
		assert!(parse("EMPTY", "empty"));
		assert!(parse("eMpTy", "EMPTY"));
		assert!(!parse("EMTPY", "EMPTY"));
		assert!(!parse("EMP", "EMPTY"));
	}

	#[rstest]
	#[case("123", "123")]
	#[case("-123", "-123")]
	#[case("+7", "+7")]
	#[case("0.456", "0.456")]
	#[case(".5", ".5")]
	#[case("5.", "5.")]
	#[case("3e4", "3e4")]
	#[case("-1.5E-3,", "-1.5E-3")]
	#[case("  42 43", "42")]
	fn number_as_string(#[case] text: &str, #[case] expected: &str) {
		let mut iter = ByteIterator::from_text(text, false);
		assert_eq!(parse_number_as_string(&mut iter).unwrap(), expected);
	}

	#[rstest]
	#[case(".")]
	#[case("-")]
	#[case("abc")]
	#[case("1.2.3")]
	#[case("1e")]
	#[case("")]
	fn number_as_string_errors(#[case] text: &str) {
		let mut iter = ByteIterator::from_text(text, false);
		assert!(parse_number_as_string(&mut iter).is_err());
	}

	#[test]
	fn number_as_f64() {
		let mut iter = ByteIterator::from_text("-0.25 10", false);
		assert_eq!(parse_number_as::<f64>(&mut iter).unwrap(), -0.25);
		assert_eq!(parse_number_as::<f64>(&mut iter).unwrap(), 10.0);
	}

	#[test]
	fn delimited_entries() {
		fn parse(text: &str) -> Result<Vec<f64>> {
			let mut iter = ByteIterator::from_text(text, false);
			parse_delimited_entries(&mut iter, b'(', b')', parse_number_as)
		}
		assert_eq!(parse("()").unwrap(), Vec::<f64>::new());
		assert_eq!(parse("( )").unwrap(), Vec::<f64>::new());
		assert_eq!(parse("(1)").unwrap(), vec![1.0]);
		assert_eq!(parse(" ( 1 , 2,3 ) ").unwrap(), vec![1.0, 2.0, 3.0]);
		assert!(parse("(1, 2").is_err());
		assert!(parse("(1 2)").is_err());
		assert!(parse("[1]").is_err());
		assert!(parse("(1,)").is_err());
	}

	#[test]
	fn nested_delimited_entries() {
		let mut iter = ByteIterator::from_text("((1,2),(3))", false);
		let nested = parse_delimited_entries(&mut iter, b'(', b')', |it| {
			parse_delimited_entries(it, b'(', b')', parse_number_as::<i32>)
		})
		.unwrap();
		assert_eq!(nested, vec![vec![1, 2], vec![3]]);
	}
}
