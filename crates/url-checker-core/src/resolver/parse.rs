//! Extract the redirect target from raw HTTP response header lines.

/// Returns the `Location` value of the last response in `lines`, if any.
///
/// libcurl hands over every header line it sees, including the status lines of
/// interim responses, so a status line resets what was collected so far.
pub(crate) fn location_header(lines: &[String]) -> Option<String> {
    let mut location = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            location = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") {
                let value = value.trim();
                if !value.is_empty() {
                    location = Some(value.to_string());
                }
            }
        }
    }

    location
}
