use pronote_core::RecordFamily;
use pronote_core::entities::Discussion;
use pronote_portal::PortalSession;

use crate::error::NormalizeError;
use crate::values::{render_datetime, timestamp};

/// Message threads, optionally only the unread ones. A thread whose read
/// state is unknown counts as read.
pub async fn discussions<S: PortalSession>(session: &mut S, only_unread: bool) -> Vec<Discussion> {
    crate::contain(
        RecordFamily::Discussions,
        try_discussions(session, only_unread).await,
    )
}

async fn try_discussions<S: PortalSession>(
    session: &mut S,
    only_unread: bool,
) -> Result<Vec<Discussion>, NormalizeError> {
    let upstream = session
        .discussions(only_unread)
        .await
        .map_err(NormalizeError::portal(RecordFamily::Discussions))?;

    let mut out = Vec::with_capacity(upstream.len());
    for thread in upstream {
        let date = timestamp(thread.date.as_deref())
            .map_err(|reason| NormalizeError::partial(RecordFamily::Discussions, reason))?;
        let messages = thread.messages.unwrap_or_default();
        out.push(Discussion {
            id: thread.id.unwrap_or_default(),
            subject: thread.subject.unwrap_or_default(),
            author: thread.creator.unwrap_or_default(),
            date: render_datetime(date),
            read: !thread.unread.unwrap_or(false),
            messages_count: u32::try_from(messages.len()).unwrap_or(u32::MAX),
            last_message: messages
                .last()
                .and_then(|m| m.content.clone())
                .unwrap_or_default(),
        });
    }
    Ok(out)
}
