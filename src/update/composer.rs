//! Compose surface update handlers

use crate::commands::Cmd;
use crate::messages::ComposerMsg;
use crate::model::{AppModel, TransientMessage};

/// Handle composer messages (text edits, history, tags, publishing)
pub fn update_composer(model: &mut AppModel, msg: ComposerMsg) -> Option<Cmd> {
    match msg {
        ComposerMsg::SetText(value) => {
            model.composer.set_text(value);
            Some(Cmd::Redraw)
        }

        ComposerMsg::Undo => model.composer.undo().then_some(Cmd::Redraw),

        ComposerMsg::Redo => model.composer.redo().then_some(Cmd::Redraw),

        ComposerMsg::AddTag(input) => model.composer.add_tag(&input).then_some(Cmd::Redraw),

        ComposerMsg::RemoveTag(index) => model
            .composer
            .remove_tag(index)
            .map(|_| Cmd::Redraw),

        ComposerMsg::SelectColor(name) => {
            if !model.composer.select_color(&name) {
                model.set_status(TransientMessage::error(format!("Unknown color: {}", name)));
            }
            Some(Cmd::Redraw)
        }

        ComposerMsg::Publish { is_draft } => {
            if model.publishing {
                return None;
            }
            if !model.session.is_authenticated() {
                model.set_status(TransientMessage::error("Sign in to publish"));
                return Some(Cmd::Redraw);
            }
            if model.composer.is_blank() {
                model.set_status(TransientMessage::error("Nothing to publish"));
                return Some(Cmd::Redraw);
            }
            model.publishing = true;
            let post = model.composer.to_new_post(is_draft);
            Some(Cmd::batch(vec![Cmd::PublishPost(post), Cmd::Redraw]))
        }

        ComposerMsg::Published(result) => {
            model.publishing = false;
            match result {
                Ok(post) => {
                    tracing::info!("Created haiku {} (draft: {})", post.id, post.is_draft);
                    let text = if post.is_draft {
                        "Saved draft".to_string()
                    } else {
                        format!("Published haiku #{}", post.id)
                    };
                    model.composer.clear();
                    model.set_status(TransientMessage::info(text));
                }
                Err(e) => {
                    tracing::warn!("Publish failed: {}", e);
                    model.set_status(TransientMessage::error(format!("Publish failed: {}", e)));
                }
            }
            Some(Cmd::Redraw)
        }

        ComposerMsg::New => {
            model.composer.clear();
            Some(Cmd::Redraw)
        }
    }
}
