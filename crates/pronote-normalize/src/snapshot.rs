use chrono::Utc;
use pronote_core::CachedSnapshot;
use pronote_portal::PortalSession;
use pronote_store::StoreBackend;

use crate::error::NormalizeError;
use crate::windows::FetchOptions;
use crate::{discussions, homework, lessons, menus, periods, student};

/// Fetch and map every record family, one request at a time.
///
/// Never fails: a family that cannot be fetched is an empty list.
pub async fn collect_snapshot<S: PortalSession>(
    session: &mut S,
    options: &FetchOptions,
) -> CachedSnapshot {
    let mut snapshot = CachedSnapshot::empty(Utc::now(), student::student(session).await);
    snapshot.homework = homework::homework(session, Some(options.homework)).await;
    snapshot.grades = periods::grades(session).await;
    snapshot.subject_averages = periods::subject_averages(session).await;
    snapshot.lessons = lessons::lessons(session, Some(options.lessons)).await;
    snapshot.menus = menus::menus(session, Some(options.menus)).await;
    snapshot.discussions = discussions::discussions(session, options.only_unread).await;
    let (absences, tardies) = periods::attendance(session).await;
    snapshot.absences = absences;
    snapshot.tardies = tardies;

    tracing::info!(records = snapshot.record_count(), "snapshot assembled");
    snapshot
}

/// Assemble a snapshot and replace the stored one with it.
///
/// # Errors
///
/// Returns `NormalizeError::Store` if the snapshot cannot be written.
pub async fn export_snapshot<S: PortalSession, B: StoreBackend>(
    session: &mut S,
    store: &B,
    options: &FetchOptions,
) -> Result<CachedSnapshot, NormalizeError> {
    let snapshot = collect_snapshot(session, options).await;
    store.snapshot_set(&snapshot).await?;
    tracing::debug!(backend = %store.kind(), "snapshot stored");
    Ok(snapshot)
}
