//! The textual input grammar used by catalog fixtures, and the output formatting
//! that matches what submitted programs print.
//!
//! Fixtures separate arguments with the literal two-character token `\n`
//! (backslash, `n`), not a real newline. All grammar handling lives here so a
//! change in fixture format only touches this file.

use crate::error::VerifyError;

/// The two-character argument separator stored in fixtures.
pub const ARG_SEPARATOR: &str = "\\n";

/// Split an input into arguments on the literal `\n` token, falling back to real
/// line breaks when the token is absent.
pub fn split_args(input: &str) -> Vec<&str> {
  let trimmed = input.trim();
  if trimmed.contains(ARG_SEPARATOR) {
    return trimmed.split(ARG_SEPARATOR).map(str::trim).collect();
  }
  trimmed.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Text piped to a submission's stdin: each `\n` token becomes a real line break.
pub fn to_stdin(input: &str) -> String {
  let mut out = input.replace(ARG_SEPARATOR, "\n");
  if !out.ends_with('\n') {
    out.push('\n');
  }
  out
}

/// Exactly `n` arguments, or a malformed-input error naming what was found.
pub fn expect_args(input: &str, n: usize) -> Result<Vec<&str>, VerifyError> {
  let args = split_args(input);
  if args.len() != n {
    return Err(VerifyError::Malformed(format!("expected {n} arguments, found {}", args.len())));
  }
  Ok(args)
}

pub fn parse_int(s: &str) -> Result<i64, VerifyError> {
  let t = s.trim();
  t.parse::<i64>()
    .map_err(|_| VerifyError::Malformed(format!("not an integer: '{t}'")))
}

/// `[1, 2, 3]` → `vec![1, 2, 3]`; `[]` → empty.
pub fn parse_int_list(s: &str) -> Result<Vec<i64>, VerifyError> {
  let inner = strip_brackets(s.trim())?;
  if inner.trim().is_empty() {
    return Ok(Vec::new());
  }
  inner.split(',').map(parse_int).collect()
}

/// `[[1,4,5],[1,3,4],[]]` → nested vectors.
pub fn parse_nested_int_list(s: &str) -> Result<Vec<Vec<i64>>, VerifyError> {
  let inner = strip_brackets(s.trim())?;
  let mut out = Vec::new();
  let mut depth = 0usize;
  let mut start = None;

  for (i, ch) in inner.char_indices() {
    match ch {
      '[' => {
        if depth == 0 {
          start = Some(i);
        }
        depth += 1;
      }
      ']' => {
        if depth == 0 {
          return Err(VerifyError::Malformed("unbalanced ']'".into()));
        }
        depth -= 1;
        if depth == 0 {
          let from = start.take().unwrap_or(i);
          out.push(parse_int_list(&inner[from..=i])?);
        }
      }
      ',' | ' ' | '\t' => {}
      other if depth == 0 => {
        return Err(VerifyError::Malformed(format!("unexpected '{other}' between lists")));
      }
      _ => {}
    }
  }
  if depth != 0 {
    return Err(VerifyError::Malformed("unbalanced '['".into()));
  }
  Ok(out)
}

fn strip_brackets(s: &str) -> Result<&str, VerifyError> {
  s.strip_prefix('[')
    .and_then(|r| r.strip_suffix(']'))
    .ok_or_else(|| VerifyError::Malformed(format!("expected a bracketed list, got '{s}'")))
}

/// Python list repr: `[1, 2, 3]`.
pub fn format_int_list(xs: &[i64]) -> String {
  let parts: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
  format!("[{}]", parts.join(", "))
}

/// Python float repr for the values the catalog produces: `2.0`, `2.5`, `-1.0`.
pub fn format_float(x: f64) -> String {
  if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
    format!("{x:.1}")
  } else {
    format!("{x}")
  }
}

/// Python bool repr.
pub fn format_bool(b: bool) -> String {
  if b { "True".into() } else { "False".into() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn literal_separator_splits_arguments() {
    assert_eq!(split_args("[2,7,11,15]\\n9"), vec!["[2,7,11,15]", "9"]);
    assert_eq!(split_args("[1,3]\n[2]"), vec!["[1,3]", "[2]"]);
    assert_eq!(split_args("hello"), vec!["hello"]);
  }

  #[test]
  fn stdin_text_uses_real_newlines() {
    assert_eq!(to_stdin("[1,2]\\n3"), "[1,2]\n3\n");
    assert_eq!(to_stdin("48 18"), "48 18\n");
  }

  #[test]
  fn lists_parse_with_or_without_spaces() {
    assert_eq!(parse_int_list("[1, 2,3]").unwrap(), vec![1, 2, 3]);
    assert_eq!(parse_int_list("[]").unwrap(), Vec::<i64>::new());
    assert_eq!(parse_int_list("[-4]").unwrap(), vec![-4]);
    assert!(parse_int_list("1,2").is_err());
    assert!(parse_int_list("[1,x]").is_err());
  }

  #[test]
  fn nested_lists_parse() {
    assert_eq!(
      parse_nested_int_list("[[1,4,5],[1,3,4],[2,6]]").unwrap(),
      vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]
    );
    assert_eq!(parse_nested_int_list("[[]]").unwrap(), vec![Vec::<i64>::new()]);
    assert!(parse_nested_int_list("[[1,2]").is_err());
  }

  #[test]
  fn formatting_matches_python_repr() {
    assert_eq!(format_int_list(&[1, 1, 2]), "[1, 1, 2]");
    assert_eq!(format_int_list(&[]), "[]");
    assert_eq!(format_float(2.0), "2.0");
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_bool(true), "True");
  }
}
