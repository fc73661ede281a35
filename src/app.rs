//! Application state and core logic

use crate::backend::BackendClientTrait;
use crate::event::{AppEvent, SessionEvent};
use crate::platform::SWITCH_FORM_MODIFIER;
use crate::state::{AppState, FormEffect, FormLaunch, FormState, View};
use crate::ticker::MinuteTicker;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

const ACCOUNT_CREATED: &str = "Account created successfully!";
const TASK_SAVED: &str = "Task saved";
const FORM_INCOMPLETE: &str = "Fix the highlighted fields before submitting";

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    backend: Arc<dyn BackendClientTrait>,
    events_tx: UnboundedSender<SessionEvent>,
    events_rx: UnboundedReceiver<SessionEvent>,
    /// Bumped on every `open`; results for older sessions are dropped
    session: u64,
    /// Running only while a create-task form is open
    ticker: Option<MinuteTicker>,
    quit: bool,
}

impl App {
    /// Create a new App showing the given form. Must run inside a tokio runtime.
    pub fn new(backend: Arc<dyn BackendClientTrait>, launch: FormLaunch) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let mut app = Self {
            state: AppState::default(),
            backend,
            events_tx,
            events_rx,
            session: 0,
            ticker: None,
            quit: false,
        };
        app.open(launch);
        app
    }

    /// Switch to a new form, tearing down the previous form session
    pub fn open(&mut self, launch: FormLaunch) {
        self.session += 1;
        tracing::info!(view = launch.view().label(), session = self.session, "Opening form");
        self.ticker = None;
        self.state.open(&launch);
        if matches!(launch, FormLaunch::TaskCreate) {
            self.ticker = Some(MinuteTicker::spawn(self.events_tx.clone(), self.session));
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    #[cfg(test)]
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let effect = match key.code {
            KeyCode::Esc => {
                self.quit = true;
                None
            }
            KeyCode::Char('c') if ctrl => {
                self.quit = true;
                None
            }
            KeyCode::Char('s') if ctrl => {
                self.submit();
                None
            }
            KeyCode::Char('n') if ctrl || key.modifiers.contains(SWITCH_FORM_MODIFIER) => {
                self.switch_account_form();
                None
            }
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Enter => {
                let on_submit = self
                    .state
                    .form
                    .as_form()
                    .is_some_and(|form| form.is_submit_active());
                if on_submit {
                    self.submit();
                    None
                } else {
                    self.state.form.next_field()
                }
            }
            KeyCode::Backspace => self.state.form.delete_char(),
            KeyCode::Char(c) => self.state.form.input_char(c),
            _ => None,
        };

        if let Some(effect) = effect {
            self.dispatch(effect);
        }
    }

    /// Login and signup link to each other
    fn switch_account_form(&mut self) {
        match self.state.current_view {
            View::Login => self.open(FormLaunch::Signup),
            View::Signup => self.open(FormLaunch::Login),
            View::TaskCreate | View::TaskUpdate => {}
        }
    }

    fn submit(&mut self) {
        match self.state.form.submit() {
            Some(effect) => {
                self.state.status_message = None;
                self.dispatch(effect);
            }
            None => {
                // Login shows its own inline messages
                if !matches!(self.state.form, FormState::Login(_)) {
                    self.state.set_status(FORM_INCOMPLETE);
                }
            }
        }
    }

    /// Run a form's network work in the background. The result comes back
    /// through the event channel; a send only fails once the app is gone.
    fn dispatch(&self, effect: FormEffect) {
        let backend = Arc::clone(&self.backend);
        let events = self.events_tx.clone();
        let session = self.session;
        let send = move |event| {
            let _ = events.send(SessionEvent { session, event });
        };

        match effect {
            FormEffect::CheckUserName(check) => {
                tokio::spawn(async move {
                    let result = backend.check_user_name(&check.user_name).await;
                    send(AppEvent::UserNameChecked {
                        seq: check.seq,
                        result,
                    });
                });
            }
            FormEffect::Login(request) => {
                tokio::spawn(async move {
                    let result = backend.login(&request).await;
                    send(AppEvent::LoginFinished(result));
                });
            }
            FormEffect::SubmitSignup(submission) => {
                tokio::spawn(async move {
                    let result = backend.submit_signup(&submission).await;
                    send(AppEvent::SignupSubmitted(result));
                });
            }
            FormEffect::SubmitTask(submission) => {
                tokio::spawn(async move {
                    let result = backend.submit_task(&submission).await;
                    send(AppEvent::TaskSubmitted(result));
                });
            }
        }
    }

    /// Apply every event that is already waiting
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.receive(event);
        }
    }

    /// Apply an event unless the form that started the work has since been
    /// replaced.
    pub fn receive(&mut self, tagged: SessionEvent) {
        if tagged.session != self.session {
            tracing::debug!(
                session = tagged.session,
                current = self.session,
                "Dropping event from a closed form"
            );
            return;
        }
        self.handle_event(tagged.event);
    }

    /// Wait for the next background event
    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UserNameChecked { seq, result } => {
                let FormState::Signup(form) = &mut self.state.form else {
                    return;
                };
                match result {
                    Ok(response) => {
                        form.apply_user_name_check(seq, response.exists);
                    }
                    Err(err) => {
                        tracing::warn!(seq, error = %err, "Username check failed");
                        form.user_name_check_failed(seq);
                    }
                }
            }
            AppEvent::LoginFinished(result) => {
                let FormState::Login(form) = &mut self.state.form else {
                    return;
                };
                match result {
                    Ok(response) => {
                        if let Some(target) = form.apply_response(&response) {
                            self.on_logged_in(target);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Login request failed");
                        form.request_failed();
                        self.state.set_status(err.summary());
                    }
                }
            }
            AppEvent::SignupSubmitted(result) => {
                let FormState::Signup(form) = &mut self.state.form else {
                    return;
                };
                form.finish_submit();
                match result {
                    Ok(()) => {
                        tracing::info!("Account created");
                        self.open(FormLaunch::Login);
                        self.state.set_status(ACCOUNT_CREATED);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Signup failed");
                        self.state.set_status(err.summary());
                    }
                }
            }
            AppEvent::TaskSubmitted(result) => {
                let FormState::Task(form) = &mut self.state.form else {
                    return;
                };
                form.finish_submit(result.is_ok());
                match result {
                    Ok(()) => self.state.set_status(TASK_SAVED),
                    Err(err) => {
                        tracing::warn!(error = %err, "Task submission failed");
                        self.state.set_status(err.summary());
                    }
                }
            }
            AppEvent::MinuteElapsed => {
                if let FormState::Task(form) = &mut self.state.form {
                    form.on_minute_elapsed();
                }
            }
        }
    }

    /// The backend names the next page; the task form is where a signed-in
    /// user goes from here.
    fn on_logged_in(&mut self, target: String) {
        tracing::info!(%target, "Login accepted");
        self.open(FormLaunch::TaskCreate);
        self.state.set_status(format!("Signed in, redirected to {target}"));
        self.state.redirect_target = Some(target);
    }
}
