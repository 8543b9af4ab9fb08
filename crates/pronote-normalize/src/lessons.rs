use pronote_core::entities::Lesson;
use pronote_core::{DateWindow, RecordFamily};
use pronote_portal::PortalSession;
use pronote_portal::upstream::LessonContent;

use crate::error::NormalizeError;
use crate::values::{in_window, render_datetime, subject, timestamp};
use crate::windows::{default_lesson_window, today};

/// Timetable entries starting inside `window` (default: today to 7 days ahead).
pub async fn lessons<S: PortalSession>(session: &mut S, window: Option<DateWindow>) -> Vec<Lesson> {
    let window = window.unwrap_or_else(|| default_lesson_window(today()));
    crate::contain(RecordFamily::Lessons, try_lessons(session, window).await)
}

async fn try_lessons<S: PortalSession>(
    session: &mut S,
    window: DateWindow,
) -> Result<Vec<Lesson>, NormalizeError> {
    let bad_date = |reason| NormalizeError::partial(RecordFamily::Lessons, reason);
    let upstream = session
        .lessons(window)
        .await
        .map_err(NormalizeError::portal(RecordFamily::Lessons))?;

    let mut out = Vec::with_capacity(upstream.len());
    for lesson in upstream {
        let start = timestamp(lesson.start.as_deref()).map_err(bad_date)?;
        let end = timestamp(lesson.end.as_deref()).map_err(bad_date)?;
        if !in_window(window, start) {
            continue;
        }
        out.push(Lesson {
            id: lesson.id.unwrap_or_default(),
            subject: subject(lesson.subject.as_deref()),
            teacher: lesson.teacher_name.unwrap_or_default(),
            classroom: lesson.classroom.unwrap_or_default(),
            start: render_datetime(start),
            end: render_datetime(end),
            canceled: lesson.canceled.unwrap_or(false),
            modified: lesson.status.is_some_and(|s| !s.trim().is_empty()),
            content: lesson
                .content
                .as_ref()
                .map(LessonContent::description)
                .unwrap_or_default()
                .to_string(),
        });
    }
    Ok(out)
}
