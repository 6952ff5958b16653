use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;

use basho::api::ApiClient;
use basho::cli::{haiku_text, CliArgs, Command};
use basho::messages::{AppMsg, ComposerMsg, FeedMsg, Msg, ProfileMsg, SessionMsg};
use basho::model::{AppModel, ProfileTarget};
use basho::runtime::App;
use basho::session::Session;
use basho::{view, ClientConfig};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    if let Err(e) = args.validate() {
        bail!(e);
    }

    basho::tracing::init();

    let config = ClientConfig::load().with_overrides(args.api_url.clone(), args.page_size);
    let session = Session::load();
    tracing::debug!("Using backend {} as {}", config.api_url, session.display_name());

    // Completions may chain a second request (login then /users/me)
    let timeout = config.request_timeout() * 2;
    let client = ApiClient::new(&config.api_url, config.request_timeout())
        .context("Failed to create HTTP client")?;
    let mut app = App::new(AppModel::new(config, session), client);

    let result = run(&mut app, args.command(), timeout);
    app.dispatch(Msg::App(AppMsg::Quit));
    result
}

fn run(app: &mut App<ApiClient>, command: Command, timeout: Duration) -> Result<()> {
    match command {
        Command::Feed { tags, pages } => {
            step(app, Msg::Feed(FeedMsg::Refresh), timeout)?;
            for _ in 1..pages {
                if !app.model().feed.has_more() {
                    break;
                }
                step(app, Msg::load_more(), timeout)?;
            }
            if !tags.is_empty() {
                let tags: BTreeSet<String> = tags.into_iter().collect();
                step(app, Msg::Feed(FeedMsg::SetFilters(tags)), timeout)?;
            }
            print!("{}", view::render_feed(&app.model().feed.snapshot(), Utc::now()));
        }

        Command::Tags { query, selected } => {
            step(app, Msg::Feed(FeedMsg::Refresh), timeout)?;
            for tag in selected {
                step(app, Msg::select_tag(tag), timeout)?;
            }
            let suggestions = app.model().feed.tag_suggestions(&query);
            print!("{}", view::render_suggestions(&query, &suggestions));
        }

        Command::Login { email, password } => {
            let password = password_or_prompt(password)?;
            step(app, Msg::Session(SessionMsg::Login { email, password }), timeout)?;
            require_signed_in(app)?;
        }

        Command::Register {
            username,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let msg = Msg::Session(SessionMsg::Register {
                username,
                email,
                password,
            });
            step(app, msg, timeout)?;
            require_signed_in(app)?;
        }

        Command::Logout => {
            step(app, Msg::Session(SessionMsg::Logout), timeout)?;
        }

        Command::Whoami => {
            step(app, Msg::Session(SessionMsg::Refresh), timeout)?;
            println!("{}", app.model().session.display_name());
        }

        Command::Publish {
            lines,
            tags,
            color,
            draft,
        } => {
            step(app, Msg::set_text(haiku_text(&lines)), timeout)?;
            for tag in tags {
                step(app, Msg::Composer(ComposerMsg::AddTag(tag)), timeout)?;
            }
            step(app, Msg::Composer(ComposerMsg::SelectColor(color)), timeout)?;
            step(
                app,
                Msg::Composer(ComposerMsg::Publish { is_draft: draft }),
                timeout,
            )?;
        }

        Command::Like { post_id } => {
            step(app, Msg::Feed(FeedMsg::ToggleLike(post_id)), timeout)?;
        }

        Command::Profile { user_id, tab } => {
            let target = match user_id {
                Some(id) => ProfileTarget::User(id),
                None => ProfileTarget::Me,
            };
            step(app, Msg::Profile(ProfileMsg::Open(target)), timeout)?;
            step(app, Msg::Profile(ProfileMsg::SelectTab(tab.into())), timeout)?;
            print!("{}", view::render_profile(&app.model().profile, Utc::now()));
        }

        Command::Config { save } => {
            let config = &app.model().config;
            if save {
                config.save().map_err(anyhow::Error::msg)?;
            }
            print!(
                "{}",
                serde_yaml::to_string(config).context("Failed to serialize config")?
            );
        }
    }

    report_status(app)
}

/// Dispatch one message and wait for everything it started
fn step(app: &mut App<ApiClient>, msg: Msg, timeout: Duration) -> Result<()> {
    app.dispatch(msg);
    app.run_until_idle(timeout)
}

fn require_signed_in(app: &App<ApiClient>) -> Result<()> {
    if app.model().session.user.is_none() {
        report_status(app)?;
        bail!("Not signed in");
    }
    Ok(())
}

/// Print the status line; errors go to stderr and fail the command
fn report_status(app: &App<ApiClient>) -> Result<()> {
    let Some(line) = view::render_status(app.model()) else {
        return Ok(());
    };
    if app.model().status.as_ref().is_some_and(|s| s.is_error()) {
        bail!(line);
    }
    eprintln!("{}", line);
    Ok(())
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
