use gitviz_core::{AuthorTime, Commit, CommitId};

use crate::error::ObjectError;

/// Parse the header block of a commit body into a [`Commit`].
///
/// Only lines before the first blank line are looked at, so a message line
/// that happens to start with `parent` is ignored.
pub fn parse_commit(id: CommitId, body: &str) -> Result<Commit, ObjectError> {
    let mut parents: Vec<CommitId> = Vec::new();
    let mut author_time = None;

    for line in body.lines().take_while(|line| !line.is_empty()) {
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        match key {
            "parent" => {
                let parent = value
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| ObjectError::malformed(&id, "parent line without an id"))?;
                let parent = CommitId::new(parent);
                if parents.contains(&parent) {
                    tracing::warn!("commit {} lists parent {} twice", id, parent);
                } else {
                    parents.push(parent);
                }
            }
            "author" if author_time.is_none() => {
                let time = parse_author_time(value)
                    .map_err(|reason| ObjectError::malformed(&id, reason))?;
                author_time = Some(time);
            }
            _ => {}
        }
    }

    let author_time =
        author_time.ok_or_else(|| ObjectError::malformed(&id, "missing author line"))?;
    Commit::new(id.clone(), parents, author_time)
        .map_err(|e| ObjectError::malformed(&id, e.to_string()))
}

/// Parse `<name> <email> <epoch-seconds> <±HHMM>` (the part after `author `).
pub fn parse_author_time(identity: &str) -> Result<AuthorTime, String> {
    let email_end = identity
        .rfind('>')
        .ok_or_else(|| "author line has no '>' after the email".to_string())?;
    let mut fields = identity[email_end + 1..].split_whitespace();
    let (Some(seconds), Some(zone), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err("expected '<epoch-seconds> <zone>' after the email".to_string());
    };

    let seconds: i64 = seconds
        .parse()
        .map_err(|_| format!("invalid epoch seconds '{seconds}'"))?;
    let offset_minutes =
        parse_zone_offset(zone).ok_or_else(|| format!("invalid zone offset '{zone}'"))?;
    Ok(AuthorTime::new(seconds, offset_minutes))
}

/// `+HHMM` / `-HHMM` to signed minutes. The sign covers hours and minutes.
pub fn parse_zone_offset(zone: &str) -> Option<i32> {
    let bytes = zone.as_bytes();
    if bytes.len() != 5 || !bytes[1..].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digit = |i: usize| (bytes[i] - b'0') as i32;
    let hours = digit(1) * 10 + digit(2);
    let minutes = digit(3) * 10 + digit(4);
    Some(sign * (hours * 60 + minutes))
}
