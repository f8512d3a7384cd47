//! The persistence writer.
//!
//! Player state is saved in the same tagged line format the loader reads:
//!
//! ```text
//! coins,500
//! card,1001,2
//! deck,2001,1
//! ```
//!
//! `coins` is always written; `card` and `deck` lines follow in ascending
//! ID order. Feeding the output back through
//! [`RecordStore::load`](crate::store::RecordStore::load) reproduces the
//! same balance and counts.

use std::fmt::Write;

use super::counts::CountMap;

/// Render coins, owned copies and deck copies as loadable text.
#[must_use]
pub fn serialize(coins: i64, inventory: &CountMap, deck: &CountMap) -> String {
    let mut out = String::with_capacity(16 * (1 + inventory.len() + deck.len()));
    // Writing into a String cannot fail.
    let _ = writeln!(out, "coins,{coins}");
    for (id, count) in inventory.iter() {
        let _ = writeln!(out, "card,{id},{count}");
    }
    for (id, count) in deck.iter() {
        let _ = writeln!(out, "deck,{id},{count}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(0, &CountMap::new(), &CountMap::new()), "coins,0\n");
    }

    #[test]
    fn test_serialize_ordering() {
        let inventory: CountMap = vec![(CardId::new(20), 1), (CardId::new(3), 4)].into_iter().collect();
        let deck: CountMap = vec![(CardId::new(3), 2)].into_iter().collect();
        assert_eq!(
            serialize(-5, &inventory, &deck),
            "coins,-5\ncard,3,4\ncard,20,1\ndeck,3,2\n"
        );
    }
}
