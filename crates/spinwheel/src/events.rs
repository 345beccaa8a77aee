use wheelkit::control::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Spin,
    Add(String),
    Remove(usize),
    Present,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(command: ControlCommand) -> Self {
        match command {
            ControlCommand::Spin => AppEvent::Spin,
            ControlCommand::Add(text) => AppEvent::Add(text),
            ControlCommand::Remove(index) => AppEvent::Remove(index),
            ControlCommand::Present => AppEvent::Present,
        }
    }
}
