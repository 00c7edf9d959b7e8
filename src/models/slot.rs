use serde::{Deserialize, Serialize};

/// A fixed, named window on a ground. Labels look like `"08:00 AM"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: String,
    pub price: u32,
    pub available: bool,
}

pub fn find_slot<'a>(slots: &'a [TimeSlot], label: &str) -> Option<&'a TimeSlot> {
    slots.iter().find(|s| s.time == label)
}
