/// Formats an amount as Indian rupees with no fractional digits, using the
/// en-IN grouping (`₹1,23,456`). Halves round away from zero.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹NaN".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{sign}₹{}", group_indian(&digits))
}

pub fn format_inr_i64(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₹{}", group_indian(&amount.unsigned_abs().to_string()))
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
