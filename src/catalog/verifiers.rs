//! Canonical verifiers: one pure function per catalog problem.
//!
//! Each verifier takes a fixture input in the catalog grammar and returns the
//! exact text a correct submission prints.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::parse::{
  expect_args, format_bool, format_float, format_int_list, parse_int, parse_int_list,
  parse_nested_int_list, split_args,
};
use crate::error::VerifyError;

/// Signature shared by all verifiers.
pub type VerifierFn = fn(&str) -> Result<String, VerifyError>;

pub const MAX_COIN_AMOUNT: i64 = 100_000;
pub const MAX_LIS_LEN: usize = 10_000;
/// Largest `n` accepted by the Fibonacci and climbing-stairs verifiers.
/// Climbing stairs needs F(n + 1); F(181) still fits in u128.
pub const MAX_FIB_INDEX: i64 = 180;

/// Closed set of problem identifiers. Each maps to exactly one verifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProblemId {
  TwoSum,
  ReverseString,
  Palindrome,
  ArraySum,
  FindMax,
  Fibonacci,
  BinarySearch,
  ValidParentheses,
  LongestUniqueSubstring,
  ContainerWithMostWater,
  MergeKLists,
  MedianOfTwoSortedArrays,
  MergeSort,
  Quicksort,
  ClimbingStairs,
  CoinChange,
  LongestIncreasingSubsequence,
  Gcd,
  MergeTwoSorted,
}

impl ProblemId {
  pub const ALL: [ProblemId; 19] = [
    ProblemId::TwoSum,
    ProblemId::ReverseString,
    ProblemId::Palindrome,
    ProblemId::ArraySum,
    ProblemId::FindMax,
    ProblemId::Fibonacci,
    ProblemId::BinarySearch,
    ProblemId::ValidParentheses,
    ProblemId::LongestUniqueSubstring,
    ProblemId::ContainerWithMostWater,
    ProblemId::MergeKLists,
    ProblemId::MedianOfTwoSortedArrays,
    ProblemId::MergeSort,
    ProblemId::Quicksort,
    ProblemId::ClimbingStairs,
    ProblemId::CoinChange,
    ProblemId::LongestIncreasingSubsequence,
    ProblemId::Gcd,
    ProblemId::MergeTwoSorted,
  ];

  pub fn name(self) -> &'static str {
    match self {
      ProblemId::TwoSum => "two_sum",
      ProblemId::ReverseString => "reverse_string",
      ProblemId::Palindrome => "is_palindrome",
      ProblemId::ArraySum => "array_sum",
      ProblemId::FindMax => "find_max",
      ProblemId::Fibonacci => "fibonacci",
      ProblemId::BinarySearch => "binary_search",
      ProblemId::ValidParentheses => "valid_parentheses",
      ProblemId::LongestUniqueSubstring => "longest_unique_substring",
      ProblemId::ContainerWithMostWater => "max_area",
      ProblemId::MergeKLists => "merge_k_lists",
      ProblemId::MedianOfTwoSortedArrays => "median_sorted_arrays",
      ProblemId::MergeSort => "merge_sort",
      ProblemId::Quicksort => "quicksort",
      ProblemId::ClimbingStairs => "climb_stairs",
      ProblemId::CoinChange => "coin_change",
      ProblemId::LongestIncreasingSubsequence => "length_of_lis",
      ProblemId::Gcd => "gcd",
      ProblemId::MergeTwoSorted => "merge_sorted",
    }
  }

  pub fn verifier(self) -> VerifierFn {
    match self {
      ProblemId::TwoSum => two_sum,
      ProblemId::ReverseString => reverse_string,
      ProblemId::Palindrome => is_palindrome,
      ProblemId::ArraySum => array_sum,
      ProblemId::FindMax => find_max,
      ProblemId::Fibonacci => fibonacci,
      ProblemId::BinarySearch => binary_search,
      ProblemId::ValidParentheses => valid_parentheses,
      ProblemId::LongestUniqueSubstring => longest_unique_substring,
      ProblemId::ContainerWithMostWater => max_area,
      ProblemId::MergeKLists => merge_k_lists,
      ProblemId::MedianOfTwoSortedArrays => median_sorted_arrays,
      ProblemId::MergeSort => merge_sort,
      ProblemId::Quicksort => quicksort,
      ProblemId::ClimbingStairs => climb_stairs,
      ProblemId::CoinChange => coin_change,
      ProblemId::LongestIncreasingSubsequence => length_of_lis,
      ProblemId::Gcd => gcd,
      ProblemId::MergeTwoSorted => merge_sorted,
    }
  }

  pub fn verify(self, input: &str) -> Result<String, VerifyError> {
    (self.verifier())(input)
  }
}

impl fmt::Display for ProblemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for ProblemId {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().trim_start_matches("_verify_");
    let canonical = match wanted {
      "fibonacci_nth" => "fibonacci",
      "lis" => "length_of_lis",
      "length_of_longest_substring" => "longest_unique_substring",
      "find_median_sorted_arrays" => "median_sorted_arrays",
      "merge_two_sorted" => "merge_sorted",
      other => other,
    };
    ProblemId::ALL
      .iter()
      .copied()
      .find(|id| id.name() == canonical)
      .ok_or_else(|| s.to_string())
  }
}

fn two_sum(input: &str) -> Result<String, VerifyError> {
  let args = split_args(input);
  let (nums, target) = match args.as_slice() {
    [list, target] => (parse_int_list(list)?, parse_int(target)?),
    // "[2,7,11,15], 9" on one line
    [single] => {
      let (list, target) = single
        .rsplit_once("],")
        .ok_or_else(|| VerifyError::Malformed("expected list and target".into()))?;
      (parse_int_list(&format!("{list}]"))?, parse_int(target)?)
    }
    _ => return Err(VerifyError::Malformed("expected list and target".into())),
  };

  let mut seen: HashMap<i64, i64> = HashMap::new();
  for (i, num) in nums.iter().enumerate() {
    // No i64 complement exists when the subtraction overflows.
    if let Some(j) = target.checked_sub(*num).and_then(|want| seen.get(&want)) {
      return Ok(format_int_list(&[*j, i as i64]));
    }
    seen.insert(*num, i as i64);
  }
  Ok(format_int_list(&[]))
}

fn reverse_string(input: &str) -> Result<String, VerifyError> {
  Ok(input.trim().chars().rev().collect())
}

fn is_palindrome(input: &str) -> Result<String, VerifyError> {
  let s = input.trim();
  Ok(format_bool(s.chars().eq(s.chars().rev())))
}

fn array_sum(input: &str) -> Result<String, VerifyError> {
  let xs = parse_int_list(input)?;
  xs.iter()
    .try_fold(0i64, |acc, x| acc.checked_add(*x))
    .map(|total| total.to_string())
    .ok_or_else(|| VerifyError::TooLarge("sum overflows i64".into()))
}

fn find_max(input: &str) -> Result<String, VerifyError> {
  let xs = parse_int_list(input)?;
  xs.iter()
    .max()
    .map(|m| m.to_string())
    .ok_or_else(|| VerifyError::Malformed("max of empty list".into()))
}

fn check_fib_bound(n: i64) -> Result<(), VerifyError> {
  if n > MAX_FIB_INDEX {
    return Err(VerifyError::TooLarge(format!("n = {n} (max {MAX_FIB_INDEX})")));
  }
  Ok(())
}

/// F(n) for `0 <= n <= MAX_FIB_INDEX + 1`.
fn fib_u128(n: i64) -> u128 {
  let (mut a, mut b) = (0u128, 1u128);
  for _ in 0..n {
    let next = a + b;
    a = b;
    b = next;
  }
  a
}

/// `n <= 1` echoes `n`, negatives included.
fn fibonacci(input: &str) -> Result<String, VerifyError> {
  let n = parse_int(input)?;
  if n <= 1 {
    return Ok(n.to_string());
  }
  check_fib_bound(n)?;
  Ok(fib_u128(n).to_string())
}

fn climb_stairs(input: &str) -> Result<String, VerifyError> {
  let n = parse_int(input)?;
  if n <= 1 {
    return Ok("1".into());
  }
  check_fib_bound(n)?;
  Ok(fib_u128(n + 1).to_string())
}

fn binary_search(input: &str) -> Result<String, VerifyError> {
  let args = expect_args(input, 2)?;
  let arr = parse_int_list(args[0])?;
  let target = parse_int(args[1])?;
  let (mut lo, mut hi) = (0i64, arr.len() as i64 - 1);
  while lo <= hi {
    let mid = (lo + hi) / 2;
    let v = arr[mid as usize];
    if v == target {
      return Ok(mid.to_string());
    } else if v < target {
      lo = mid + 1;
    } else {
      hi = mid - 1;
    }
  }
  Ok("-1".into())
}

fn valid_parentheses(input: &str) -> Result<String, VerifyError> {
  let mut stack = Vec::new();
  for ch in input.trim().chars() {
    match ch {
      '(' | '[' | '{' => stack.push(ch),
      ')' | ']' | '}' => {
        let want = match ch {
          ')' => '(',
          ']' => '[',
          _ => '{',
        };
        if stack.pop() != Some(want) {
          return Ok(format_bool(false));
        }
      }
      _ => {}
    }
  }
  Ok(format_bool(stack.is_empty()))
}

fn longest_unique_substring(input: &str) -> Result<String, VerifyError> {
  let mut last_index: HashMap<char, usize> = HashMap::new();
  let (mut start, mut best) = (0usize, 0usize);
  for (i, ch) in input.trim().chars().enumerate() {
    if let Some(&prev) = last_index.get(&ch) {
      if prev >= start {
        start = prev + 1;
      }
    }
    last_index.insert(ch, i);
    best = best.max(i - start + 1);
  }
  Ok(best.to_string())
}

fn max_area(input: &str) -> Result<String, VerifyError> {
  let h = parse_int_list(input)?;
  if h.is_empty() {
    return Ok("0".into());
  }
  let (mut i, mut j) = (0usize, h.len() - 1);
  let mut best = 0i64;
  while i < j {
    let area = h[i]
      .min(h[j])
      .checked_mul((j - i) as i64)
      .ok_or_else(|| VerifyError::TooLarge("area overflows i64".into()))?;
    best = best.max(area);
    if h[i] < h[j] {
      i += 1;
    } else {
      j -= 1;
    }
  }
  Ok(best.to_string())
}

fn merge_k_lists(input: &str) -> Result<String, VerifyError> {
  let mut merged: Vec<i64> = parse_nested_int_list(input)?.into_iter().flatten().collect();
  merged.sort_unstable();
  Ok(format_int_list(&merged))
}

fn median_sorted_arrays(input: &str) -> Result<String, VerifyError> {
  let args = expect_args(input, 2)?;
  let mut merged = parse_int_list(args[0])?;
  merged.extend(parse_int_list(args[1])?);
  merged.sort_unstable();
  let n = merged.len();
  let median = match n {
    0 => 0.0,
    _ if n % 2 == 1 => merged[n / 2] as f64,
    _ => (merged[n / 2 - 1] as i128 + merged[n / 2] as i128) as f64 / 2.0,
  };
  Ok(format_float(median))
}

fn merge_sort(input: &str) -> Result<String, VerifyError> {
  fn sort(a: &[i64]) -> Vec<i64> {
    if a.len() <= 1 {
      return a.to_vec();
    }
    let (left, right) = a.split_at(a.len() / 2);
    let (left, right) = (sort(left), sort(right));
    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
      if left[i] <= right[j] {
        out.push(left[i]);
        i += 1;
      } else {
        out.push(right[j]);
        j += 1;
      }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
  }
  Ok(format_int_list(&sort(&parse_int_list(input)?)))
}

fn quicksort(input: &str) -> Result<String, VerifyError> {
  fn sort(a: Vec<i64>) -> Vec<i64> {
    if a.len() <= 1 {
      return a;
    }
    let pivot = a[a.len() / 2];
    let left = a.iter().copied().filter(|x| *x < pivot).collect();
    let mid: Vec<i64> = a.iter().copied().filter(|x| *x == pivot).collect();
    let right = a.iter().copied().filter(|x| *x > pivot).collect();
    let mut out = sort(left);
    out.extend(mid);
    out.extend(sort(right));
    out
  }
  Ok(format_int_list(&sort(parse_int_list(input)?)))
}

fn coin_change(input: &str) -> Result<String, VerifyError> {
  let args = expect_args(input, 2)?;
  let coins = parse_int_list(args[0])?;
  let amount = parse_int(args[1])?;
  if amount < 0 {
    return Err(VerifyError::Malformed(format!("negative amount {amount}")));
  }
  if amount > MAX_COIN_AMOUNT {
    return Err(VerifyError::TooLarge(format!("amount = {amount} (max {MAX_COIN_AMOUNT})")));
  }
  let amount = amount as usize;
  let mut dp: Vec<Option<u32>> = vec![None; amount + 1];
  dp[0] = Some(0);
  for &c in coins.iter().filter(|c| **c > 0) {
    let c = c as usize;
    for x in c..=amount {
      if let Some(prev) = dp[x - c] {
        dp[x] = Some(dp[x].map_or(prev + 1, |cur| cur.min(prev + 1)));
      }
    }
  }
  Ok(dp[amount].map_or("-1".to_string(), |v| v.to_string()))
}

fn length_of_lis(input: &str) -> Result<String, VerifyError> {
  let xs = parse_int_list(input)?;
  if xs.len() > MAX_LIS_LEN {
    return Err(VerifyError::TooLarge(format!("{} elements (max {MAX_LIS_LEN})", xs.len())));
  }
  let mut dp = vec![1usize; xs.len()];
  for i in 0..xs.len() {
    for j in 0..i {
      if xs[j] < xs[i] {
        dp[i] = dp[i].max(dp[j] + 1);
      }
    }
  }
  Ok(dp.iter().max().copied().unwrap_or(0).to_string())
}

fn gcd(input: &str) -> Result<String, VerifyError> {
  let mut parts: Vec<&str> = input.split_whitespace().collect();
  if parts.len() == 1 {
    parts = split_args(input);
  }
  let a = parts
    .first()
    .map(|p| parse_int(p))
    .transpose()?
    .ok_or_else(|| VerifyError::Malformed("missing operands".into()))?;
  let b = match parts.get(1) {
    Some(p) => parse_int(p)?,
    None => 0,
  };
  // Widened so i64::MIN % -1 cannot overflow.
  let (mut a, mut b) = (a as i128, b as i128);
  while b != 0 {
    let r = a % b;
    a = b;
    b = r;
  }
  Ok(a.to_string())
}

fn merge_sorted(input: &str) -> Result<String, VerifyError> {
  let args = expect_args(input, 2)?;
  let (a, b) = (parse_int_list(args[0])?, parse_int_list(args[1])?);
  let mut out = Vec::with_capacity(a.len() + b.len());
  let (mut i, mut j) = (0, 0);
  while i < a.len() && j < b.len() {
    if a[i] <= b[j] {
      out.push(a[i]);
      i += 1;
    } else {
      out.push(b[j]);
      j += 1;
    }
  }
  out.extend_from_slice(&a[i..]);
  out.extend_from_slice(&b[j..]);
  Ok(format_int_list(&out))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gcd_matches_examples() {
    assert_eq!(ProblemId::Gcd.verify("48 18").unwrap(), "6");
    assert_eq!(ProblemId::Gcd.verify("7 3").unwrap(), "1");
    assert_eq!(ProblemId::Gcd.verify("12\\n8").unwrap(), "4");
    assert_eq!(ProblemId::Gcd.verify("9").unwrap(), "9");
  }

  #[test]
  fn two_sum_handles_both_layouts() {
    assert_eq!(ProblemId::TwoSum.verify("[2,7,11,15]\\n9").unwrap(), "[0, 1]");
    assert_eq!(ProblemId::TwoSum.verify("[2, 7, 11, 15], 9").unwrap(), "[0, 1]");
    assert_eq!(ProblemId::TwoSum.verify("[1,2]\\n10").unwrap(), "[]");
  }

  #[test]
  fn sequences_and_dp() {
    assert_eq!(ProblemId::Fibonacci.verify("10").unwrap(), "55");
    assert_eq!(ProblemId::Fibonacci.verify("0").unwrap(), "0");
    assert_eq!(ProblemId::ClimbingStairs.verify("5").unwrap(), "8");
    assert_eq!(ProblemId::CoinChange.verify("[1,2,5]\\n11").unwrap(), "3");
    assert_eq!(ProblemId::CoinChange.verify("[2]\\n3").unwrap(), "-1");
    assert_eq!(ProblemId::LongestIncreasingSubsequence.verify("[10,9,2,5,3,7,101,18]").unwrap(), "4");
  }

  #[test]
  fn dp_bounds_are_enforced() {
    assert!(matches!(ProblemId::CoinChange.verify("[1]\\n100001"), Err(VerifyError::TooLarge(_))));
    assert!(matches!(ProblemId::Fibonacci.verify("181"), Err(VerifyError::TooLarge(_))));
    assert!(ProblemId::Fibonacci.verify("180").is_ok());
    assert_eq!(ProblemId::ClimbingStairs.verify("180").unwrap(), fib_u128(181).to_string());
    assert!(matches!(ProblemId::ClimbingStairs.verify("181"), Err(VerifyError::TooLarge(_))));
  }

  #[test]
  fn small_fibonacci_indices_echo_n() {
    assert_eq!(ProblemId::Fibonacci.verify("1").unwrap(), "1");
    assert_eq!(ProblemId::Fibonacci.verify("-3").unwrap(), "-3");
    assert_eq!(ProblemId::ClimbingStairs.verify("-3").unwrap(), "1");
  }

  #[test]
  fn arithmetic_overflow_is_reported_not_panicked() {
    let max = i64::MAX;
    assert!(matches!(ProblemId::ArraySum.verify(&format!("[{max},1]")), Err(VerifyError::TooLarge(_))));
    assert!(matches!(ProblemId::ContainerWithMostWater.verify(&format!("[{max},{max},{max}]")), Err(VerifyError::TooLarge(_))));
    assert_eq!(ProblemId::TwoSum.verify(&format!("[-2,{max}]\\n{max}")).unwrap(), "[]");
    assert_eq!(ProblemId::MedianOfTwoSortedArrays.verify(&format!("[{max}]\\n[{max}]")).unwrap(), format_float(max as f64));
    assert_eq!(ProblemId::Gcd.verify(&format!("{} -1", i64::MIN)).unwrap(), "-1");
  }

  #[test]
  fn median_prints_python_floats() {
    assert_eq!(ProblemId::MedianOfTwoSortedArrays.verify("[1,3]\\n[2]").unwrap(), "2.0");
    assert_eq!(ProblemId::MedianOfTwoSortedArrays.verify("[1,2]\\n[3,4]").unwrap(), "2.5");
    assert_eq!(ProblemId::MedianOfTwoSortedArrays.verify("[]\\n[]").unwrap(), "0.0");
  }

  #[test]
  fn names_resolve_both_ways() {
    for id in ProblemId::ALL {
      assert_eq!(id.name().parse::<ProblemId>(), Ok(id));
    }
    assert_eq!("_verify_gcd".parse::<ProblemId>(), Ok(ProblemId::Gcd));
    assert_eq!("_verify_fibonacci_nth".parse::<ProblemId>(), Ok(ProblemId::Fibonacci));
    assert_eq!("_verify_lis".parse::<ProblemId>(), Ok(ProblemId::LongestIncreasingSubsequence));
    assert_eq!("_verify_length_of_longest_substring".parse::<ProblemId>(), Ok(ProblemId::LongestUniqueSubstring));
    assert_eq!("_verify_find_median_sorted_arrays".parse::<ProblemId>(), Ok(ProblemId::MedianOfTwoSortedArrays));
    assert!("no_such_verifier".parse::<ProblemId>().is_err());
  }

  #[test]
  fn malformed_inputs_are_errors() {
    assert!(ProblemId::ArraySum.verify("1,2,3").is_err());
    assert!(ProblemId::BinarySearch.verify("[1,2,3]").is_err());
    assert!(ProblemId::FindMax.verify("[]").is_err());
  }
}
