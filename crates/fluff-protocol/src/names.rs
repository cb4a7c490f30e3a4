//! The Furby name table.
//!
//! Naming works by id: the firmware carries a fixed table of two-syllable
//! names and a set-name command selects one by index. The table below mirrors
//! the firmware's, including its quirk of skipping "Tay-Tah".

use crate::constants::MAX_NAME_ID;

/// All firmware names, indexed by name id.
pub const NAMES: [&str; MAX_NAME_ID as usize + 1] = [
    "Ah-Bay", "Ah-Boh", "Ah-Boo", "Ah-Dah", "Ah-Doh", "Ah-Doo", "Ah-Kah", "Ah-Koh", "Ah-Tah",
    "Ah-Toh", "Bee-Bay", "Bee-Boh", "Bee-Boo", "Bee-Dah", "Bee-Doh", "Bee-Doo", "Bee-Kah",
    "Bee-Koh", "Bee-Tah", "Bee-Toh", "Dah-Bay", "Dah-Boh", "Dah-Boo", "Dah-Dah", "Dah-Doh",
    "Dah-Doo", "Dah-Kah", "Dah-Koh", "Dah-Tah", "Dah-Toh", "Day-Bay", "Day-Boh", "Day-Boo",
    "Day-Dah", "Day-Doh", "Day-Doo", "Day-Kah", "Day-Koh", "Day-Tah", "Day-Toh", "Dee-Bay",
    "Dee-Boh", "Dee-Boo", "Dee-Dah", "Dee-Doh", "Dee-Doo", "Dee-Kah", "Dee-Koh", "Dee-Tah",
    "Dee-Toh", "Doo-Bay", "Doo-Boh", "Doo-Boo", "Doo-Dah", "Doo-Doh", "Doo-Doo", "Doo-Kah",
    "Doo-Koh", "Doo-Tah", "Doo-Toh", "Kee-Bay", "Kee-Boh", "Kee-Boo", "Kee-Dah", "Kee-Doh",
    "Kee-Doo", "Kee-Kah", "Kee-Koh", "Kee-Tah", "Kee-Toh", "Loo-Bay", "Loo-Boh", "Loo-Boo",
    "Loo-Dah", "Loo-Doh", "Loo-Doo", "Loo-Kah", "Loo-Koh", "Loo-Tah", "Loo-Toh", "May-Bay",
    "May-Boh", "May-Boo", "May-Dah", "May-Doh", "May-Doo", "May-Kah", "May-Koh", "May-Tah",
    "May-Toh", "Noo-Bay", "Noo-Boh", "Noo-Boo", "Noo-Dah", "Noo-Doh", "Noo-Doo", "Noo-Kah",
    "Noo-Koh", "Noo-Tah", "Noo-Toh", "Tay-Bay", "Tay-Boh", "Tay-Boo", "Tay-Dah", "Tay-Doh",
    "Tay-Doo", "Tay-Kah", "Tay-Koh", "Tay-Toh", "Toh-Bay", "Toh-Boh", "Toh-Boo", "Toh-Dah",
    "Toh-Doh", "Toh-Doo", "Toh-Kah", "Toh-Koh", "Toh-Tah", "Toh-Toh", "Way-Bay", "Way-Boh",
    "Way-Boo", "Way-Dah", "Way-Doh", "Way-Doo", "Way-Kah", "Way-Koh", "Way-Tah", "Way-Toh",
];

/// Look up a name by id.
pub fn name_for_id(id: u8) -> Option<&'static str> {
    NAMES.get(id as usize).copied()
}

/// Find the id for a name (case-insensitive).
pub fn id_for_name(name: &str) -> Option<u8> {
    NAMES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .map(|i| i as u8)
}
