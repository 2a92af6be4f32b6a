/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Bookkeeping for a run over the whole test list.
//!
//! The run's results travel between page loads as a string of one digit per
//! test, in the order the tests were run.

use std::fmt::{self, Write};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TestStatus {
    Fail = 0,
    Pass = 1,
    Skipped = 2,
}

impl TestStatus {
    fn from_digit(digit: char) -> Result<TestStatus, ResultLogError> {
        match digit {
            '0' => Ok(TestStatus::Fail),
            '1' => Ok(TestStatus::Pass),
            '2' => Ok(TestStatus::Skipped),
            other => Err(ResultLogError::InvalidStatus(other)),
        }
    }

    fn digit(self) -> char {
        match self {
            TestStatus::Fail => '0',
            TestStatus::Pass => '1',
            TestStatus::Skipped => '2',
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResultLogError {
    InvalidStatus(char),
}

impl fmt::Display for ResultLogError {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResultLogError::InvalidStatus(digit) => {
                write!(formatter, "Invalid test status {digit:?} in result log")
            },
        }
    }
}

impl std::error::Error for ResultLogError {}

/// An inclusive, one-based range of test numbers to run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TestRange {
    pub first: usize,
    pub last: usize,
}

impl TestRange {
    /// Fit a requested range to a list of `count` tests. Returns `None` when
    /// neither end was requested, meaning the whole list runs.
    pub fn clamp(first: Option<usize>, last: Option<usize>, count: usize) -> Option<TestRange> {
        if first.unwrap_or(0) == 0 && last.unwrap_or(0) == 0 {
            return None;
        }
        let count = count.max(1);
        let first = first.unwrap_or(0).clamp(1, count);
        let last = match last {
            Some(last) if last != 0 && last <= count => last.max(first),
            _ => count,
        };
        Some(TestRange { first, last })
    }

    /// The number of tests in the range, zero when `last` precedes `first`.
    pub fn len(&self) -> usize {
        self.last.saturating_add(1).saturating_sub(self.first.max(1))
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// The zero-based index of the first test.
    pub fn start_index(&self) -> usize {
        self.first.saturating_sub(1)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    pub pass_count: usize,
    pub skip_count: usize,
    /// Tests that ran, i.e. were not skipped.
    pub run_count: usize,
    /// One-based numbers of the failed tests.
    pub failed: Vec<usize>,
    /// One-based numbers of the skipped tests.
    pub skipped: Vec<usize>,
    /// Percentage of passes among the tests that ran, rounded down so that
    /// 100 means every test passed.
    pub pass_rate: usize,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultLog {
    statuses: Vec<TestStatus>,
}

impl ResultLog {
    pub fn push(&mut self, status: TestStatus) {
        self.statuses.push(status);
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// The status of the `n`th recorded test. Tests with no record count as
    /// failed.
    pub fn get(&self, n: usize) -> TestStatus {
        self.statuses.get(n).copied().unwrap_or(TestStatus::Fail)
    }

    /// Summarize the log. With a `range`, the log holds the results of that
    /// range only and every test in it is accounted for.
    pub fn summary(&self, range: Option<TestRange>) -> Summary {
        let (count, offset) = match range {
            Some(range) => (range.len(), range.start_index()),
            None => (self.len(), 0),
        };

        let mut summary = Summary {
            pass_count: 0,
            skip_count: 0,
            run_count: 0,
            failed: Vec::new(),
            skipped: Vec::new(),
            pass_rate: 100,
        };
        for index in 0..count {
            let number = index + offset + 1;
            match self.get(index) {
                TestStatus::Fail => summary.failed.push(number),
                TestStatus::Pass => summary.pass_count += 1,
                TestStatus::Skipped => {
                    summary.skipped.push(number);
                    summary.skip_count += 1;
                },
            }
        }
        summary.run_count = count - summary.skip_count;
        if summary.run_count > 0 {
            summary.pass_rate = 100 * summary.pass_count / summary.run_count;
        }
        summary
    }
}

impl FromStr for ResultLog {
    type Err = ResultLogError;

    fn from_str(log: &str) -> Result<ResultLog, ResultLogError> {
        let statuses = log
            .chars()
            .map(TestStatus::from_digit)
            .collect::<Result<_, _>>()?;
        Ok(ResultLog { statuses })
    }
}

impl fmt::Display for ResultLog {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        self.statuses
            .iter()
            .try_for_each(|status| formatter.write_char(status.digit()))
    }
}
