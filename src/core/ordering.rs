use crate::models::Respondent;

/// Order a pair left-to-right: the talker (`q4 == false`) sits left, the
/// listener (`q4 == true`) right. Equal `q4` keeps the given order.
#[inline]
pub fn order_left_right<'a>(a: &'a Respondent, b: &'a Respondent) -> [&'a Respondent; 2] {
    if a.q4 && !b.q4 {
        [b, a]
    } else {
        [a, b]
    }
}
