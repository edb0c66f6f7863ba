// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::Utc;
use lazy_static::lazy_static;
use parking_lot::Mutex;

lazy_static! {
    // Process-wide sequence so two orders created in the same millisecond
    // still get distinct identifiers. The database additionally enforces
    // uniqueness with a UNIQUE constraint on the column.
    static ref ORDER_SEQ: Mutex<u64> = Mutex::new(0);
}

/// Generates the next public order identifier, e.g. `ORD-1714066800000-0001`.
pub fn next_order_id() -> String {
    let mut seq = ORDER_SEQ.lock();
    *seq = seq.wrapping_add(1);
    format!("ORD-{}-{:04}", Utc::now().timestamp_millis(), *seq % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_ids_are_distinct() {
        let a = next_order_id();
        let b = next_order_id();
        assert_ne!(a, b);
        assert!(a.starts_with("ORD-"));
    }
}
