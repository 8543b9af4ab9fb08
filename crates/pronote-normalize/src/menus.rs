use pronote_core::entities::Menu;
use pronote_core::{DateWindow, RecordFamily};
use pronote_portal::PortalSession;

use crate::error::NormalizeError;
use crate::values::{DEFAULT_MEAL, in_window, names, render_date, timestamp};
use crate::windows::{default_menu_window, today};

/// Cafeteria menus inside `window` (default: today to 14 days ahead).
pub async fn menus<S: PortalSession>(session: &mut S, window: Option<DateWindow>) -> Vec<Menu> {
    let window = window.unwrap_or_else(|| default_menu_window(today()));
    crate::contain(RecordFamily::Menus, try_menus(session, window).await)
}

async fn try_menus<S: PortalSession>(
    session: &mut S,
    window: DateWindow,
) -> Result<Vec<Menu>, NormalizeError> {
    let upstream = session
        .menus(window)
        .await
        .map_err(NormalizeError::portal(RecordFamily::Menus))?;

    let mut out = Vec::with_capacity(upstream.len());
    for menu in upstream {
        let date = timestamp(menu.date.as_deref())
            .map_err(|reason| NormalizeError::partial(RecordFamily::Menus, reason))?;
        if !in_window(window, date) {
            continue;
        }
        out.push(Menu {
            date: render_date(date),
            meal: menu
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MEAL.to_string()),
            starters: names(menu.first_meal.as_deref()),
            mains: names(menu.main_meal.as_deref()),
            sides: names(menu.side_meal.as_deref()),
            desserts: names(menu.dessert.as_deref()),
        });
    }
    Ok(out)
}
