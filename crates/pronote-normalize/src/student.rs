use pronote_core::RecordFamily;
use pronote_core::entities::StudentInfo;
use pronote_portal::PortalSession;

use crate::error::NormalizeError;

/// Identity block plus the active period name. Falls back to an empty
/// identity when the portal cannot provide one.
pub async fn student<S: PortalSession>(session: &mut S) -> StudentInfo {
    match try_student(session).await {
        Ok(info) => info,
        Err(error) => {
            tracing::warn!(%error, "student info unavailable; using empty identity");
            StudentInfo::default()
        }
    }
}

async fn try_student<S: PortalSession>(session: &mut S) -> Result<StudentInfo, NormalizeError> {
    let upstream = session
        .student()
        .await
        .map_err(NormalizeError::portal(RecordFamily::Student))?;
    let current_period = match session.current_period().await {
        Ok(name) => name.unwrap_or_default(),
        Err(error) => {
            tracing::debug!(%error, "current period unavailable");
            String::new()
        }
    };

    Ok(StudentInfo {
        name: upstream.name.unwrap_or_default(),
        establishment: upstream.establishment.unwrap_or_default(),
        class_name: upstream.class_name.unwrap_or_default(),
        current_period,
    })
}
