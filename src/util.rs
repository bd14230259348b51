//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let cut = floor_char_boundary(s, max);
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}

/// Keep at most `max` characters. Used for user-facing previews
/// (stderr excerpts, test inputs) where counting bytes would split code points.
pub fn truncate_chars(s: &str, max: usize) -> String {
  s.chars().take(max).collect()
}

/// Preview with an ellipsis marker when something was cut.
pub fn preview(s: &str, max: usize) -> String {
  if s.chars().count() > max {
    format!("{}...", truncate_chars(s, max))
  } else {
    s.to_string()
  }
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
  while idx > 0 && !s.is_char_boundary(idx) {
    idx -= 1;
  }
  idx
}

/// Returns the first balanced `open ... close` region of `text`.
///
/// Model output often wraps JSON in prose or code fences. Brackets inside JSON
/// string literals are skipped so `"a ] b"` does not end the region early.
pub fn extract_balanced(text: &str, open: char, close: char) -> Option<&str> {
  let start = text.find(open)?;
  let mut depth = 0usize;
  let mut in_string = false;
  let mut escaped = false;

  for (offset, ch) in text[start..].char_indices() {
    if in_string {
      if escaped {
        escaped = false;
      } else if ch == '\\' {
        escaped = true;
      } else if ch == '"' {
        in_string = false;
      }
      continue;
    }
    match ch {
      '"' => in_string = true,
      c if c == open => depth += 1,
      c if c == close => {
        depth -= 1;
        if depth == 0 {
          let end = start + offset + ch.len_utf8();
          return Some(&text[start..end]);
        }
      }
      _ => {}
    }
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fill_template_replaces_every_occurrence() {
    let out = fill_template("{topic} in {subject}: {topic}", &[("topic", "Loops"), ("subject", "Python")]);
    assert_eq!(out, "Loops in Python: Loops");
  }

  #[test]
  fn extract_balanced_skips_prose_and_nested_brackets() {
    let text = "Sure! Here you go:\n```json\n[{\"options\": [\"a]\", \"b\"]}]\n```\nEnjoy [not this]";
    let got = extract_balanced(text, '[', ']').expect("array");
    assert_eq!(got, "[{\"options\": [\"a]\", \"b\"]}]");
  }

  #[test]
  fn extract_balanced_handles_unterminated_input() {
    assert_eq!(extract_balanced("[1, 2", '[', ']'), None);
    assert_eq!(extract_balanced("no json here", '{', '}'), None);
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(truncate_chars("héllo", 2), "hé");
    assert_eq!(preview("abcdef", 3), "abc...");
    assert_eq!(preview("abc", 3), "abc");
    assert!(trunc_for_log("ééé", 3).starts_with('é'));
  }
}
