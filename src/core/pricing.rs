use crate::models::{MeetingFormat, Mentor};

/// Price of a meeting in the given format with the given mentor
///
/// Total over the format enum: the group format maps to the mentor's
/// group rate, both 1-on-1 formats to the single rate. There is no
/// fallback branch that could silently apply a wrong price class.
pub fn price(format: MeetingFormat, mentor: &Mentor) -> u32 {
    match format {
        MeetingFormat::Online1On1 | MeetingFormat::Offline1On1 => mentor.single_price,
        MeetingFormat::GroupOffline => mentor.group_price,
    }
}
