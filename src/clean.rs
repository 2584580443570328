// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Turns a place name into its search key: every character outside of the
/// ASCII Latin alphabet and space is dropped, and the rest is lowercased.
///
/// `"St. Mary's Café"` becomes `"st marys caf"`.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c.is_ascii_alphabetic() || c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
