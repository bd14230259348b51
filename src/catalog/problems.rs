//! Built-in coding problem fixtures.
//!
//! Test inputs use the catalog grammar (`\n` token between arguments). Every
//! template is a runnable program that reads its arguments from stdin, one per line.

use super::verifiers::ProblemId;
use crate::domain::{CodingProblem, Difficulty, TestCase};

#[derive(Debug)]
pub struct Fixture {
  pub id: ProblemId,
  pub title: &'static str,
  pub description: &'static str,
  pub template: &'static str,
  pub tests: &'static [(&'static str, &'static str)],
}

impl Fixture {
  pub fn to_problem(&self) -> CodingProblem {
    CodingProblem {
      title: self.title.to_string(),
      description: self.description.to_string(),
      template_code: self.template.to_string(),
      test_cases: self.tests.iter().map(|(i, e)| TestCase::new(*i, *e)).collect(),
    }
  }
}

pub fn fixtures(difficulty: Difficulty) -> &'static [Fixture] {
  match difficulty {
    Difficulty::Easy => EASY,
    Difficulty::Medium => MEDIUM,
    Difficulty::Hard => HARD,
  }
}

/// Floor-tier problems; always available, also covered by the self-test.
pub fn basic_fixtures(difficulty: Difficulty) -> &'static [Fixture] {
  match difficulty {
    Difficulty::Easy => BASIC_EASY,
    Difficulty::Medium => BASIC_MEDIUM,
    Difficulty::Hard => BASIC_HARD,
  }
}

const EASY: &[Fixture] = &[
  Fixture {
    id: ProblemId::TwoSum,
    title: "Two Sum",
    description: "Given an array of integers nums and an integer target, return indices of the two numbers that add up to target.",
    template: r#"import ast
import sys

def two_sum(nums, target):
    # Your code here
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(two_sum(ast.literal_eval(lines[0]), int(lines[1])))
"#,
    tests: &[("[2,7,11,15]\\n9", "[0, 1]"), ("[3,2,4]\\n6", "[1, 2]"), ("[3,3]\\n6", "[0, 1]")],
  },
  Fixture {
    id: ProblemId::ReverseString,
    title: "Reverse String",
    description: "Write a function that reverses a string.",
    template: r#"import sys

def reverse_string(s):
    # Your code here
    pass

if __name__ == "__main__":
    print(reverse_string(sys.stdin.read().strip()))
"#,
    tests: &[("hello", "olleh"), ("python", "nohtyp"), ("a", "a")],
  },
  Fixture {
    id: ProblemId::Palindrome,
    title: "Palindrome Check",
    description: "Check if a string is a palindrome.",
    template: r#"import sys

def is_palindrome(s):
    # Your code here
    pass

if __name__ == "__main__":
    print(is_palindrome(sys.stdin.read().strip()))
"#,
    tests: &[("racecar", "True"), ("hello", "False"), ("a", "True")],
  },
  Fixture {
    id: ProblemId::ArraySum,
    title: "Sum of Array",
    description: "Calculate the sum of all elements in an array.",
    template: r#"import ast
import sys

def array_sum(arr):
    # Your code here
    pass

if __name__ == "__main__":
    print(array_sum(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[1,2,3,4,5]", "15"), ("[10,20]", "30"), ("[0]", "0")],
  },
  Fixture {
    id: ProblemId::FindMax,
    title: "Find Maximum",
    description: "Find the maximum element in an array.",
    template: r#"import ast
import sys

def find_max(arr):
    # Your code here
    pass

if __name__ == "__main__":
    print(find_max(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[3,7,2,9,1]", "9"), ("[5,5,5]", "5"), ("[1]", "1")],
  },
  Fixture {
    id: ProblemId::Fibonacci,
    title: "Fibonacci (Nth)",
    description: "Return the nth Fibonacci number (0-indexed).",
    template: r#"import sys

def fibonacci(n):
    # Your code here
    pass

if __name__ == "__main__":
    print(fibonacci(int(sys.stdin.read().strip())))
"#,
    tests: &[("0", "0"), ("1", "1"), ("10", "55")],
  },
  Fixture {
    id: ProblemId::BinarySearch,
    title: "Binary Search (sorted array)",
    description: "Return index of target in sorted array or -1 if not found.",
    template: r#"import ast
import sys

def binary_search(arr, target):
    # Your code here
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(binary_search(ast.literal_eval(lines[0]), int(lines[1])))
"#,
    tests: &[("[1,2,3,4,5]\\n3", "2"), ("[1,2,3,4]\\n5", "-1"), ("[2,4,6,8]\\n6", "2")],
  },
];

const MEDIUM: &[Fixture] = &[
  Fixture {
    id: ProblemId::ValidParentheses,
    title: "Valid Parentheses",
    description: "Given a string containing '(){}[]', determine if it is valid.",
    template: r#"import sys

def is_valid(s):
    # Your code here
    pass

if __name__ == "__main__":
    print(is_valid(sys.stdin.read().strip()))
"#,
    tests: &[("()", "True"), ("()[]{}", "True"), ("(]", "False")],
  },
  Fixture {
    id: ProblemId::LongestUniqueSubstring,
    title: "Longest Substring Without Repeating",
    description: "Length of longest substring without repeating characters.",
    template: r#"import sys

def length_of_longest_substring(s):
    # Your code here
    pass

if __name__ == "__main__":
    print(length_of_longest_substring(sys.stdin.read().strip()))
"#,
    tests: &[("abcabcbb", "3"), ("bbbbb", "1"), ("pwwkew", "3")],
  },
  Fixture {
    id: ProblemId::ContainerWithMostWater,
    title: "Container With Most Water",
    description: "Given heights, find max water container capacity.",
    template: r#"import ast
import sys

def max_area(height):
    # Your code here
    pass

if __name__ == "__main__":
    print(max_area(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[1,8,6,2,5,4,8,3,7]", "49"), ("[1,1]", "1"), ("[4,3,2,1,4]", "16")],
  },
  Fixture {
    id: ProblemId::MergeKLists,
    title: "Merge K Sorted Lists (flatten)",
    description: "Merge k sorted lists into one sorted list.",
    template: r#"import ast
import sys

def merge_k_lists(lists):
    # Your code here
    pass

if __name__ == "__main__":
    print(merge_k_lists(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[[1,4,5],[1,3,4],[2,6]]", "[1, 1, 2, 3, 4, 4, 5, 6]"), ("[[]]", "[]"), ("[[1]]", "[1]")],
  },
  Fixture {
    id: ProblemId::MedianOfTwoSortedArrays,
    title: "Find Median of Two Sorted Arrays",
    description: "Find median of two sorted arrays.",
    template: r#"import ast
import sys

def find_median_sorted_arrays(nums1, nums2):
    # Your code here
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(find_median_sorted_arrays(ast.literal_eval(lines[0]), ast.literal_eval(lines[1])))
"#,
    tests: &[("[1,3]\\n[2]", "2.0"), ("[1,2]\\n[3,4]", "2.5"), ("[]\\n[1]", "1.0")],
  },
  Fixture {
    id: ProblemId::MergeSort,
    title: "Merge Sort",
    description: "Sort an array using merge sort.",
    template: r#"import ast
import sys

def merge_sort(arr):
    # Your code here
    pass

if __name__ == "__main__":
    print(merge_sort(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[5,2,3,1]", "[1, 2, 3, 5]"), ("[]", "[]"), ("[1]", "[1]")],
  },
  Fixture {
    id: ProblemId::Quicksort,
    title: "Quicksort (return sorted array)",
    description: "Implement quicksort and return sorted array.",
    template: r#"import ast
import sys

def quicksort(arr):
    # Your code here
    pass

if __name__ == "__main__":
    print(quicksort(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[3,6,8,10,1,2,1]", "[1, 1, 2, 3, 6, 8, 10]"), ("[1,0]", "[0, 1]"), ("[]", "[]")],
  },
];

const HARD: &[Fixture] = &[
  Fixture {
    id: ProblemId::MedianOfTwoSortedArrays,
    title: "Median of Two Sorted Arrays (hard)",
    description: "Find the median of two sorted arrays in O(log(min(m, n))) time.",
    template: r#"import ast
import sys

def find_median_sorted_arrays(nums1, nums2):
    # Optimal O(log(min(m,n))) algorithm expected
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(find_median_sorted_arrays(ast.literal_eval(lines[0]), ast.literal_eval(lines[1])))
"#,
    tests: &[("[1,3]\\n[2]", "2.0"), ("[1,2]\\n[3,4]", "2.5"), ("[]\\n[1]", "1.0")],
  },
  Fixture {
    id: ProblemId::ClimbingStairs,
    title: "Climbing Stairs (DP)",
    description: "Compute number of ways to climb n stairs with 1 or 2 steps.",
    template: r#"import sys

def climb_stairs(n):
    # DP solution
    pass

if __name__ == "__main__":
    print(climb_stairs(int(sys.stdin.read().strip())))
"#,
    tests: &[("1", "1"), ("2", "2"), ("5", "8")],
  },
  Fixture {
    id: ProblemId::CoinChange,
    title: "Coin Change (minimum coins)",
    description: "Given coins and amount, return min number of coins or -1 if impossible.",
    template: r#"import ast
import sys

def coin_change(coins, amount):
    # DP min coins
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(coin_change(ast.literal_eval(lines[0]), int(lines[1])))
"#,
    tests: &[("[1,2,5]\\n11", "3"), ("[2]\\n3", "-1"), ("[1]\\n0", "0")],
  },
  Fixture {
    id: ProblemId::LongestIncreasingSubsequence,
    title: "Longest Increasing Subsequence (LIS)",
    description: "Return length of LIS in an integer array.",
    template: r#"import ast
import sys

def length_of_lis(nums):
    # Dynamic programming or patience sorting
    pass

if __name__ == "__main__":
    print(length_of_lis(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[10,9,2,5,3,7,101,18]", "4"), ("[]", "0"), ("[0]", "1")],
  },
  Fixture {
    id: ProblemId::Gcd,
    title: "GCD (Euclidean)",
    description: "Compute greatest common divisor of two integers.",
    template: r#"import sys

def gcd(a, b):
    # Euclidean algorithm
    pass

if __name__ == "__main__":
    a, b = map(int, sys.stdin.read().split())
    print(gcd(a, b))
"#,
    tests: &[("48 18", "6"), ("7 3", "1"), ("10 5", "5")],
  },
];

const BASIC_EASY: &[Fixture] = &[
  Fixture {
    id: ProblemId::ArraySum,
    title: "Sum of Array",
    description: "Write a function that calculates the sum of all elements in an array.\n\nExample:\nInput: [1, 2, 3, 4, 5]\nOutput: 15",
    template: r#"import ast
import sys

def array_sum(arr):
    # Your code here
    pass

if __name__ == "__main__":
    print(array_sum(ast.literal_eval(sys.stdin.read().strip())))
"#,
    tests: &[("[1, 2, 3, 4, 5]", "15"), ("[10, 20]", "30"), ("[0]", "0")],
  },
  Fixture {
    id: ProblemId::ReverseString,
    title: "Reverse String",
    description: "Write a function that reverses a string.\n\nExample:\nInput: \"hello\"\nOutput: \"olleh\"",
    template: r#"import sys

def reverse_string(s):
    # Your code here
    pass

if __name__ == "__main__":
    print(reverse_string(sys.stdin.read().strip()))
"#,
    tests: &[("hello", "olleh"), ("python", "nohtyp"), ("a", "a")],
  },
];

const BASIC_MEDIUM: &[Fixture] = &[Fixture {
  id: ProblemId::TwoSum,
  title: "Two Sum",
  description: "Given an array of integers and a target, return indices of two numbers that add up to target.\n\nExample:\nInput: [2, 7, 11, 15], target=9\nOutput: [0, 1]",
  template: r#"import ast
import sys

def two_sum(nums, target):
    # Your code here
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(two_sum(ast.literal_eval(lines[0]), int(lines[1])))
"#,
  tests: &[("[2, 7, 11, 15]\\n9", "[0, 1]"), ("[3, 2, 4]\\n6", "[1, 2]"), ("[3, 3]\\n6", "[0, 1]")],
}];

const BASIC_HARD: &[Fixture] = &[Fixture {
  id: ProblemId::MergeTwoSorted,
  title: "Merge Sorted Arrays",
  description: "Merge two sorted arrays into one sorted array.\n\nExample:\nInput: [1, 3, 5], [2, 4, 6]\nOutput: [1, 2, 3, 4, 5, 6]",
  template: r#"import ast
import sys

def merge_sorted(arr1, arr2):
    # Your code here
    pass

if __name__ == "__main__":
    lines = sys.stdin.read().strip().splitlines()
    print(merge_sorted(ast.literal_eval(lines[0]), ast.literal_eval(lines[1])))
"#,
  tests: &[
    ("[1, 3, 5]\\n[2, 4, 6]", "[1, 2, 3, 4, 5, 6]"),
    ("[1]\\n[2]", "[1, 2]"),
    ("[]\\n[1, 2]", "[1, 2]"),
  ],
}];
