//! Column ordering with identity-key promotion.
//!
//! First name, last name, and full name columns lead the table when
//! present; every other column follows in sorted order. Alias matching is
//! case-insensitive and ignores underscores.

const FIRST_NAME_ALIASES: [&str; 3] = ["first name", "firstname", "first"];
const LAST_NAME_ALIASES: [&str; 3] = ["last name", "lastname", "last"];
const NAME_ALIASES: [&str; 1] = ["name"];

fn normalize(key: &str) -> String {
    key.trim().replace('_', " ").to_lowercase()
}

/// Order a set of column keys: first-name column, last-name column, full-name
/// column, then the remaining keys in sorted order.
///
/// Each identity role is claimed by at most one key, the first match in the
/// sorted scan; a key claimed by one role is not considered for another.
pub fn order_columns<I, S>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut sorted: Vec<String> = keys.into_iter().map(Into::into).collect();
    sorted.sort();
    sorted.dedup();

    let mut first_name: Option<usize> = None;
    let mut last_name: Option<usize> = None;
    let mut full_name: Option<usize> = None;

    for (idx, key) in sorted.iter().enumerate() {
        let normalized = normalize(key);
        if first_name.is_none() && FIRST_NAME_ALIASES.contains(&normalized.as_str()) {
            first_name = Some(idx);
        } else if last_name.is_none() && LAST_NAME_ALIASES.contains(&normalized.as_str()) {
            last_name = Some(idx);
        } else if full_name.is_none() && NAME_ALIASES.contains(&normalized.as_str()) {
            full_name = Some(idx);
        }
    }

    let promoted: Vec<usize> = [first_name, last_name, full_name]
        .into_iter()
        .flatten()
        .collect();

    let mut ordered: Vec<String> = promoted.iter().map(|&idx| sorted[idx].clone()).collect();
    for (idx, key) in sorted.into_iter().enumerate() {
        if !promoted.contains(&idx) {
            ordered.push(key);
        }
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_columns_lead_in_role_order() {
        let ordered = order_columns(["zip", "first name", "email", "last"]);
        assert_eq!(ordered, vec!["first name", "last", "email", "zip"]);
    }

    #[test]
    fn ordering_is_idempotent() {
        let once = order_columns(["zip", "first name", "email", "last"]);
        let twice = order_columns(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn aliases_ignore_case_and_underscores() {
        let ordered = order_columns(["total", "First_Name", "LASTNAME"]);
        assert_eq!(ordered, vec!["First_Name", "LASTNAME", "total"]);
    }

    #[test]
    fn no_identity_keys_means_plain_sorted_order() {
        let ordered = order_columns(["zip", "email", "total"]);
        assert_eq!(ordered, vec!["email", "total", "zip"]);
    }

    #[test]
    fn each_role_is_claimed_once() {
        // Both keys alias the first-name role; the first in sorted order wins
        // and the other stays in the sorted tail.
        let ordered = order_columns(["firstname", "first"]);
        assert_eq!(ordered, vec!["first", "firstname"]);
    }

    #[test]
    fn input_order_does_not_matter() {
        let a = order_columns(["email", "first name", "zip"]);
        let b = order_columns(["zip", "email", "first name"]);
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_keys_collapse() {
        let ordered = order_columns(["email", "email", "name"]);
        assert_eq!(ordered, vec!["name", "email"]);
    }
}
