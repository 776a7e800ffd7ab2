//! The seam between the session and whatever draws it.

use crate::event::{Action, Notice};
use crate::ledger::PendingDelete;
use crate::session::Session;
use crate::view::View;

/// A front end that shows session state and talks to the user.
///
/// Surfaces own all presentation: layout, wording of prompts, and how a
/// confirmation is asked for. They never mutate the session themselves.
pub trait Surface {
    /// Draw the current screen.
    fn render(&mut self, view: &View);

    /// Tell the user what just happened.
    fn notify(&mut self, notice: &Notice);

    /// Ask whether the battle may be deleted. `false` keeps it.
    fn confirm_delete(&mut self, pending: &PendingDelete) -> bool;
}

/// Handle one action end to end: apply it, settle any delete confirmation,
/// notify, then re-render once.
pub fn drive(session: &mut Session, action: Action, surface: &mut dyn Surface) -> Notice {
    let notice = match session.apply(action) {
        Notice::DeleteRequested(pending) => {
            if surface.confirm_delete(&pending) {
                session.confirm_delete(pending)
            } else {
                Notice::DeleteCancelled { id: pending.id() }
            }
        }
        other => other,
    };

    if !notice.is_silent() {
        surface.notify(&notice);
    }
    surface.render(&session.view());
    notice
}
