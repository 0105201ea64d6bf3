//! Route labels for spans and metrics.

use uuid::Uuid;

/// Collapse path parameters so every request to the same route shares a label.
///
/// Tracking and client ids are UUIDs; the segment after `/identities/` is a
/// login id.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::new();
    let mut previous = "";

    for segment in path.trim_start_matches('/').split('/') {
        label.push('/');

        if Uuid::parse_str(segment).is_ok() {
            label.push_str("{uuid}");
        } else if previous == "identities" && !segment.is_empty() {
            label.push_str("{login}");
        } else {
            label.push_str(segment);
        }

        previous = segment;
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuids_and_logins_are_collapsed() {
        assert_eq!(route_label("/"), "/");
        assert_eq!(route_label("/trackings/summary"), "/trackings/summary");
        assert_eq!(
            route_label("/trackings/0190f1f4-8a0e-7c4e-a1b2-3c4d5e6f7a8b"),
            "/trackings/{uuid}"
        );
        assert_eq!(
            route_label("/identities/aristide/status"),
            "/identities/{login}/status"
        );
    }
}
