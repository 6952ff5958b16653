//! Session update handlers (sign in, sign out)

use crate::commands::Cmd;
use crate::messages::SessionMsg;
use crate::model::{AppModel, ProfileState, TransientMessage};

/// Handle session messages
pub fn update_session(model: &mut AppModel, msg: SessionMsg) -> Option<Cmd> {
    match msg {
        SessionMsg::Login { email, password } => {
            model.set_status(TransientMessage::info("Signing in..."));
            Some(Cmd::Login { email, password })
        }

        SessionMsg::Register {
            username,
            email,
            password,
        } => {
            model.set_status(TransientMessage::info("Creating account..."));
            Some(Cmd::Register {
                username,
                email,
                password,
            })
        }

        SessionMsg::LoggedIn(result) => match result {
            Ok(token) => {
                model.session.sign_in(token);
                Some(Cmd::batch(vec![
                    Cmd::PersistSession,
                    Cmd::FetchCurrentUser,
                    Cmd::Redraw,
                ]))
            }
            Err(e) => {
                tracing::warn!("Sign-in failed: {}", e);
                model.set_status(TransientMessage::error(format!("Sign-in failed: {}", e)));
                Some(Cmd::Redraw)
            }
        },

        SessionMsg::Refresh => model
            .session
            .is_authenticated()
            .then_some(Cmd::FetchCurrentUser),

        SessionMsg::UserLoaded(result) => match result {
            Ok(user) => {
                tracing::info!("Signed in as {}", user.username);
                model.set_status(TransientMessage::info(format!(
                    "Signed in as {}",
                    user.username
                )));
                model.session.set_user(user);
                Some(Cmd::batch(vec![Cmd::PersistSession, Cmd::Redraw]))
            }
            Err(e) => {
                // Token rejected or expired
                tracing::warn!("Failed to load current user: {}", e);
                model.session.clear();
                model.set_status(TransientMessage::error(format!(
                    "Session expired, sign in again: {}",
                    e
                )));
                Some(Cmd::Redraw)
            }
        },

        SessionMsg::Logout => {
            model.session.clear();
            model.profile = ProfileState::default();
            model.set_status(TransientMessage::info("Signed out"));
            Some(Cmd::Redraw)
        }
    }
}
