//! Families scoped to the active grading period: grades, subject averages,
//! absences and tardies.

use pronote_core::RecordFamily;
use pronote_core::entities::{Absence, Grade, SubjectAverage, Tardy};
use pronote_portal::PortalSession;
use pronote_portal::upstream::UpstreamPeriod;

use crate::error::NormalizeError;
use crate::values::{
    coefficient, out_of, parse_hours, render_date, render_datetime, subject, text, timestamp,
    whole_minutes,
};

/// Periods whose name equals the portal's current period. No current period
/// means no records.
async fn active_periods<S: PortalSession>(
    session: &mut S,
    family: RecordFamily,
) -> Result<Vec<UpstreamPeriod>, NormalizeError> {
    let Some(current) = session
        .current_period()
        .await
        .map_err(NormalizeError::portal(family))?
    else {
        tracing::debug!(%family, "no current period reported");
        return Ok(Vec::new());
    };

    let periods = session
        .periods()
        .await
        .map_err(NormalizeError::portal(family))?;
    Ok(periods
        .into_iter()
        .filter(|p| p.name.as_deref() == Some(current.as_str()))
        .collect())
}

/// Grades of the active period.
pub async fn grades<S: PortalSession>(session: &mut S) -> Vec<Grade> {
    crate::contain(RecordFamily::Grades, try_grades(session).await)
}

async fn try_grades<S: PortalSession>(session: &mut S) -> Result<Vec<Grade>, NormalizeError> {
    let mut out = Vec::new();
    for period in active_periods(session, RecordFamily::Grades).await? {
        for grade in period.grades.unwrap_or_default() {
            let date = timestamp(grade.date.as_deref())
                .map_err(|reason| NormalizeError::partial(RecordFamily::Grades, reason))?;
            out.push(Grade {
                subject: subject(grade.subject.as_deref()),
                value: text(grade.grade.as_ref()),
                out_of: out_of(grade.out_of.as_ref()),
                coefficient: coefficient(grade.coefficient.as_ref()),
                class_average: text(grade.average.as_ref()),
                min: text(grade.min.as_ref()),
                max: text(grade.max.as_ref()),
                comment: grade.comment.unwrap_or_default(),
                date: render_date(date),
            });
        }
    }
    Ok(out)
}

/// Per-subject averages of the active period.
pub async fn subject_averages<S: PortalSession>(session: &mut S) -> Vec<SubjectAverage> {
    crate::contain(
        RecordFamily::SubjectAverages,
        try_subject_averages(session).await,
    )
}

async fn try_subject_averages<S: PortalSession>(
    session: &mut S,
) -> Result<Vec<SubjectAverage>, NormalizeError> {
    let periods = active_periods(session, RecordFamily::SubjectAverages).await?;
    Ok(periods
        .into_iter()
        .flat_map(|p| p.averages.unwrap_or_default())
        .map(|avg| SubjectAverage {
            subject: subject(avg.subject.as_deref()),
            student: text(avg.student.as_ref()),
            class_average: text(avg.class_average.as_ref()),
            min: text(avg.min.as_ref()),
            max: text(avg.max.as_ref()),
        })
        .collect())
}

/// Absences and tardies of the active period, from one traversal.
pub async fn attendance<S: PortalSession>(session: &mut S) -> (Vec<Absence>, Vec<Tardy>) {
    match try_attendance(session).await {
        Ok(both) => both,
        Err(error) => {
            tracing::warn!(family = %RecordFamily::Attendance, %error, "record family failed; using empty list");
            (Vec::new(), Vec::new())
        }
    }
}

async fn try_attendance<S: PortalSession>(
    session: &mut S,
) -> Result<(Vec<Absence>, Vec<Tardy>), NormalizeError> {
    let family = RecordFamily::Attendance;
    let bad_date = |reason| NormalizeError::partial(family, reason);

    let mut absences = Vec::new();
    let mut tardies = Vec::new();
    for period in active_periods(session, family).await? {
        for absence in period.absences.unwrap_or_default() {
            absences.push(Absence {
                from: render_datetime(timestamp(absence.from_date.as_deref()).map_err(bad_date)?),
                to: render_datetime(timestamp(absence.to_date.as_deref()).map_err(bad_date)?),
                justified: absence.justified.unwrap_or(false),
                reason: first_reason(absence.reasons),
                hours: absence.hours.as_ref().map_or(0.0, parse_hours),
            });
        }
        for delay in period.delays.unwrap_or_default() {
            tardies.push(Tardy {
                date: render_datetime(timestamp(delay.date.as_deref()).map_err(bad_date)?),
                justified: delay.justified.unwrap_or(false),
                reason: first_reason(delay.reasons),
                minutes: whole_minutes(delay.minutes.as_ref()),
            });
        }
    }
    Ok((absences, tardies))
}

fn first_reason(reasons: Option<Vec<String>>) -> String {
    reasons
        .and_then(|r| r.into_iter().next())
        .unwrap_or_default()
}
