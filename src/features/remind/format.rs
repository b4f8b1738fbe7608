//! Outgoing message rendering
//!
//! Notes are stored with lightweight HTML-ish markup (`<b>`, `<i>`, ...);
//! Discord wants markdown, so the body is translated before sending.

use chrono::{DateTime, Utc};

use super::note::Note;

/// Render the full reminder message for one assembled note.
pub fn render_note(note: &Note) -> String {
    let mut message = format!(
        "📖 **{}** — {}\n",
        note.material_title, note.material_authors
    );
    message.push_str(&format!(
        "📄 chapter {}, page {} of {} · status: {}\n",
        note.chapter,
        note.page,
        note.material_pages,
        note.material_status.as_str()
    ));
    if let Some(tags) = &note.material_tags {
        message.push_str(&format!("🏷 {tags}\n"));
    }

    message.push('\n');
    message.push_str(&markup_to_markdown(&note.content));
    message.push_str("\n\n");

    match note.material_last_repeated_at {
        Some(last) => message.push_str(&format!(
            "🔁 material repeated {} time{}, last {} ago\n",
            note.material_repeats_count,
            plural(note.material_repeats_count),
            humanize_since(last, Utc::now()),
        )),
        None => message.push_str("🔁 material never repeated\n"),
    }
    message.push_str(&format!(
        "🗂 {} note{} in rotation",
        note.total_notes_count,
        plural(note.total_notes_count)
    ));

    message
}

/// Translate note markup to Discord markdown.
pub fn markup_to_markdown(content: &str) -> String {
    content
        .replace("<b>", "**")
        .replace("</b>", "**")
        .replace("<i>", "*")
        .replace("</i>", "*")
        .replace("<u>", "__")
        .replace("</u>", "__")
        .replace("<s>", "~~")
        .replace("</s>", "~~")
        .replace("<code>", "`")
        .replace("</code>", "`")
}

/// Humanize the gap between `then` and `now`, e.g. "3 days".
pub fn humanize_since(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);

    if seconds < 60 {
        "moments".to_string()
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{} minute{}", minutes, plural(minutes))
    } else if seconds < 86_400 {
        let hours = seconds / 3600;
        format!("{} hour{}", hours, plural(hours))
    } else {
        let days = seconds / 86_400;
        format!("{} day{}", days, plural(days))
    }
}

fn plural(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
