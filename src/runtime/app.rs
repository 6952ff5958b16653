use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use anyhow::{bail, Result};

use crate::api::Backend;
use crate::commands::Cmd;
use crate::messages::{ComposerMsg, FeedMsg, Msg, ProfileMsg, SessionMsg};
use crate::model::AppModel;
use crate::update::update;

/// Drives the update loop and runs commands against a backend.
///
/// Network commands run on worker threads; each sends exactly one
/// completion message back over the channel.
pub struct App<B: Backend> {
    model: AppModel,
    backend: B,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Completion messages still owed by workers
    pending: usize,
}

impl<B: Backend> App<B> {
    pub fn new(model: AppModel, backend: B) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            backend,
            msg_tx,
            msg_rx,
            pending: 0,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    pub fn into_model(self) -> AppModel {
        self.model
    }

    /// Number of requests in flight
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Run one message through update and execute the resulting command.
    /// Returns true when the presentation should be redrawn.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> Msg + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        self.pending += 1;
        std::thread::spawn(move || {
            let _ = tx.send(job());
        });
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::FetchInitialPage { limit } => {
                let backend = self.backend.clone();
                self.spawn(move || {
                    let result = backend.fetch_page(0, limit, &Default::default());
                    Msg::Feed(FeedMsg::InitialLoaded(result))
                });
            }
            Cmd::FetchPage(request) => {
                let backend = self.backend.clone();
                self.spawn(move || {
                    let result = backend.fetch_page(request.offset, request.limit, &request.tags);
                    Msg::Feed(FeedMsg::PageLoaded { request, result })
                });
            }
            Cmd::PublishPost(post) => {
                let backend = self.backend.authorized(&self.model.session);
                self.spawn(move || {
                    let result = backend.publish(&post).map_err(|e| e.user_message());
                    Msg::Composer(ComposerMsg::Published(result))
                });
            }
            Cmd::ToggleLike { post_id } => {
                let backend = self.backend.authorized(&self.model.session);
                self.spawn(move || {
                    let result = backend.like(post_id).map_err(|e| e.user_message());
                    Msg::Feed(FeedMsg::LikeToggled { post_id, result })
                });
            }
            Cmd::Login { email, password } => {
                let backend = self.backend.clone();
                self.spawn(move || {
                    let result = backend
                        .sign_in(&email, &password)
                        .map_err(|e| e.user_message());
                    Msg::Session(SessionMsg::LoggedIn(result))
                });
            }
            Cmd::Register {
                username,
                email,
                password,
            } => {
                let backend = self.backend.clone();
                self.spawn(move || {
                    let result = backend
                        .sign_up(&username, &email, &password)
                        .map_err(|e| e.user_message());
                    Msg::Session(SessionMsg::LoggedIn(result))
                });
            }
            Cmd::FetchCurrentUser => {
                let backend = self.backend.authorized(&self.model.session);
                self.spawn(move || {
                    let result = backend.current_user().map_err(|e| e.user_message());
                    Msg::Session(SessionMsg::UserLoaded(result))
                });
            }
            Cmd::FetchProfile { target } => {
                let backend = self.backend.authorized(&self.model.session);
                self.spawn(move || {
                    let result = backend.profile(target).map_err(|e| e.user_message());
                    Msg::Profile(ProfileMsg::Loaded { target, result })
                });
            }
            Cmd::PersistSession => {
                if let Err(e) = self.model.session.save() {
                    tracing::warn!("{}", e);
                }
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
            Cmd::Quit => {
                tracing::debug!("Quit requested with {} requests in flight", self.pending);
            }
        }
    }

    /// Apply completions that already arrived, without blocking
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            needs_redraw |= self.dispatch(msg);
        }
        needs_redraw
    }

    /// Block until every request (including ones started by completions)
    /// has finished, waiting at most `timeout` for each message
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        while self.pending > 0 {
            match self.msg_rx.recv_timeout(timeout) {
                Ok(msg) => {
                    self.pending -= 1;
                    self.dispatch(msg);
                }
                Err(RecvTimeoutError::Timeout) => {
                    bail!("timed out waiting for {} request(s)", self.pending)
                }
                Err(RecvTimeoutError::Disconnected) => bail!("message channel closed"),
            }
        }
        Ok(())
    }
}
