// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    shorter_than_limit = { "abc",       8, "abc" },
    exact_limit        = { "abcdefgh",  8, "abcdefgh" },
    truncated          = { "abcdefghij", 4, "abcd" },
    commit_hash        = { "3f9c2a1b7d4e5f60718293a4b5c6d7e8f9a0b1c2", 10, "3f9c2a1b7d" },
    multibyte          = { "żółw-repo", 3, "żół" },
)]
fn short_truncates(input: &str, n: usize, expected: &str) {
    assert_eq!(input.short(n), expected);
}
