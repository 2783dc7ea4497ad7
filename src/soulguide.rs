use chat_session::{ChatSession, TypingDelay};
use config::Config;
use log::{debug, info};
use message_bus::{Event, Message, MessageBus, MessageBusSubscription, UiCommand};
use responder::ResponseSelector;
use ui_state::UiState;

mod chat_session;
pub(crate) mod config;
pub(crate) mod message_bus;
pub(crate) mod store;
mod ui_state;

pub struct SoulGuide {
    session: ChatSession,
    selector: ResponseSelector,
    typing_delay: TypingDelay,
    message_bus: MessageBus,
}

impl SoulGuide {
    pub fn new(config: &Config, selector: ResponseSelector, message_bus: MessageBus) -> Self {
        let typing_delay = config.typing_delay();
        debug!(
            "Typing delay between {:?} and {:?}",
            typing_delay.min(),
            typing_delay.max()
        );
        SoulGuide {
            session: ChatSession::new(),
            selector,
            typing_delay,
            message_bus,
        }
    }

    pub fn dispatch_ui_command(&mut self, ui_command: UiCommand) {
        match ui_command {
            UiCommand::InitializeUi => {}
            UiCommand::UpdateDraft(text) => self.session.update_draft(text),
            UiCommand::QuickQuestion(question) => self.session.quick_question(question),
            UiCommand::SendMessage(text) => self.send_message(&text),
            UiCommand::CloseApplication => {
                self.session.close();
                info!("Chat session closed.");
            }
        }
    }

    fn dispatch_event(&mut self, event: Event) {
        match event {
            Event::ReplyDue(turn) => {
                self.session.deliver_reply(turn, &self.selector);
            }
        }
    }

    fn send_message(&mut self, text: &str) {
        let Some(turn) = self.session.accept_message(text) else {
            if self.session.is_closed() {
                debug!("Session closed, message ignored");
            } else {
                debug!("Blank message ignored");
            }
            return;
        };
        let delay = self.typing_delay.sample(&mut rand::thread_rng());
        debug!("Reply to {turn} in {delay:?}");
        let message_bus = self.message_bus.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            message_bus.send_if_listening(Message::Event(Event::ReplyDue(turn)));
        });
    }

    /// Runs until `CloseApplication`. Publishes the UI state after every
    /// command and event.
    pub async fn dispatch_messages(mut self, mut subscription: MessageBusSubscription) {
        info!("SoulGuide worker started.");
        loop {
            match subscription.recv().await {
                Some(Message::UiCommand(command @ UiCommand::CloseApplication)) => {
                    self.dispatch_ui_command(command);
                    break;
                }
                Some(Message::UiCommand(command)) => self.dispatch_ui_command(command),
                Some(Message::Event(event)) => self.dispatch_event(event),
                Some(Message::UiUpdate(_)) => continue,
                None => break,
            }
            self.message_bus.send(self.ui_state().into())
        }
        info!("SoulGuide worker stopped.");
    }

    pub fn ui_state(&self) -> UiState {
        self.session.ui_state()
    }
}
