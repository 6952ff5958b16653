//! Profile page update handlers

use crate::commands::Cmd;
use crate::messages::ProfileMsg;
use crate::model::{AppModel, ProfileTarget, TransientMessage};

/// Handle profile messages
pub fn update_profile(model: &mut AppModel, msg: ProfileMsg) -> Option<Cmd> {
    match msg {
        ProfileMsg::Open(target) => {
            if target == ProfileTarget::Me && !model.session.is_authenticated() {
                model.set_status(TransientMessage::error("Sign in to view your profile"));
                return Some(Cmd::Redraw);
            }
            model.profile.open(target);
            Some(Cmd::batch(vec![Cmd::FetchProfile { target }, Cmd::Redraw]))
        }

        ProfileMsg::SelectTab(tab) => model.profile.select_tab(tab).then_some(Cmd::Redraw),

        ProfileMsg::Loaded { target, result } => {
            // A newer Open superseded this fetch
            if model.profile.target != Some(target) {
                tracing::debug!("Dropping profile result for {:?}", target);
                return None;
            }
            model.profile.loading = false;
            match result {
                Ok(data) => model.profile.data = Some(data),
                Err(e) => {
                    tracing::warn!("Failed to load profile: {}", e);
                    model.set_status(TransientMessage::error(format!(
                        "Failed to load profile: {}",
                        e
                    )));
                    model.profile.error = Some(e);
                }
            }
            Some(Cmd::Redraw)
        }
    }
}
