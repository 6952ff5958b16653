//! App message handlers (ticks, status line, quitting)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Tick => model.expire_status().then_some(Cmd::Redraw),

        AppMsg::DismissStatus => model.status.take().map(|_| Cmd::Redraw),

        AppMsg::Quit => {
            model.quit_requested = true;
            Some(Cmd::Quit)
        }
    }
}
