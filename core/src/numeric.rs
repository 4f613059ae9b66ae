/*
 * Copyright (c) 2025. Adapta Team
 * This file is part of Adapta.
 * Adapta is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Adapta is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Adapta. If not, see <https://www.gnu.org/licenses/>.
 */
//! Lenient parsing of numeric display cells.
//!
//! Monetary columns arrive as display text with thousands-separator commas
//! ("10,000.50"). A cell is read by stripping the commas and taking the
//! longest leading decimal prefix; a cell with no such prefix counts as
//! zero. That coercion is the registry's established export behavior and is
//! kept as-is.
use log::debug;
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, one_of};
use nom::combinator::{opt, recognize};
use nom::sequence::{pair, tuple};
use std::cmp::Ordering;

// Longest leading decimal prefix: sign, integer/fraction digits, optional
// exponent. Mirrors the table widget's number coercion, so "12abc" reads as
// 12 while "abc" has no prefix at all.
fn decimal_prefix(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        opt(recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1)))),
    )))(input)
}

/// Reads a numeric display cell, coercing anything unparsable to zero.
pub fn lenient_value(cell: &str) -> f64 {
    let stripped = cell.replace(',', "");
    let trimmed = stripped.trim_start();
    match decimal_prefix(trimmed) {
        Ok((_, prefix)) => prefix.parse().unwrap_or(0.0),
        Err(_) => {
            if !trimmed.is_empty() {
                debug!("Numeric cell '{}' has no decimal prefix; counted as zero", cell);
            }
            0.0
        }
    }
}

/// Ordering for numeric column sorts. Coerced values never produce NaN, so
/// the total order is well defined.
pub fn compare(a: &str, b: &str) -> Ordering {
    lenient_value(a).total_cmp(&lenient_value(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(lenient_value("0"), 0.0);
        assert_eq!(lenient_value("42"), 42.0);
        assert_eq!(lenient_value("-3.25"), -3.25);
        assert_eq!(lenient_value(".5"), 0.5);
        assert_eq!(lenient_value("2e3"), 2000.0);
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(lenient_value("10,000"), 10000.0);
        assert_eq!(lenient_value("5,000.50"), 5000.5);
        assert_eq!(lenient_value("1,2,3"), 123.0);
    }

    #[test]
    fn test_coerced_to_zero() {
        assert_eq!(lenient_value(""), 0.0);
        assert_eq!(lenient_value("abc"), 0.0);
        assert_eq!(lenient_value("N/A"), 0.0);
        assert_eq!(lenient_value("$100"), 0.0);
    }

    #[test]
    fn test_leading_prefix() {
        assert_eq!(lenient_value("12abc"), 12.0);
        assert_eq!(lenient_value("  7.5 CUP"), 7.5);
        assert_eq!(lenient_value("3.²"), 3.0);
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare("9", "10,000"), Ordering::Less);
        assert_eq!(compare("abc", "0"), Ordering::Equal);
        assert_eq!(compare("-1", "abc"), Ordering::Less);
    }
}
