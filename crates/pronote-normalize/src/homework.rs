use pronote_core::entities::Homework;
use pronote_core::{DateWindow, RecordFamily};
use pronote_portal::PortalSession;
use pronote_portal::upstream::UpstreamHomework;

use crate::error::NormalizeError;
use crate::values::{in_window, names, render_date, subject, timestamp};
use crate::windows::{default_homework_window, today};

/// Homework due inside `window` (default: 7 days back to 30 days ahead).
pub async fn homework<S: PortalSession>(
    session: &mut S,
    window: Option<DateWindow>,
) -> Vec<Homework> {
    let window = window.unwrap_or_else(|| default_homework_window(today()));
    crate::contain(RecordFamily::Homework, try_homework(session, window).await)
}

async fn try_homework<S: PortalSession>(
    session: &mut S,
    window: DateWindow,
) -> Result<Vec<Homework>, NormalizeError> {
    let upstream = session
        .homework(window)
        .await
        .map_err(NormalizeError::portal(RecordFamily::Homework))?;

    let mut out = Vec::with_capacity(upstream.len());
    for item in upstream {
        let due = timestamp(item.date.as_deref())
            .map_err(|reason| NormalizeError::partial(RecordFamily::Homework, reason))?;
        if in_window(window, due) {
            out.push(map_homework(&item, due));
        }
    }
    Ok(out)
}

fn map_homework(item: &UpstreamHomework, due: Option<chrono::NaiveDateTime>) -> Homework {
    Homework {
        subject: subject(item.subject.as_deref()),
        description: item.description.clone().unwrap_or_default(),
        due_date: render_date(due),
        done: item.done.unwrap_or(false),
        files: names(item.files.as_deref()),
    }
}
