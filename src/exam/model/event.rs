//! Navigation and timing events

use crate::exam::error::Result;
use crate::exam::value::Data;

/// Something the player does when a navigation or timing event fires.
///
/// `kind` always equals the name of the slot the event sits in
/// (`onadvance`, `timeout`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub kind: String,
    pub action: String,
    pub message: String,
}

impl Event {
    pub fn new(kind: &str, action: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            action: action.to_string(),
            message: message.to_string(),
        }
    }

    /// Load `action` and `message` over the current values.
    pub fn load(&mut self, data: &Data) -> Result<()> {
        crate::load_fields!(data, self, {
            action => "action",
            message => "message",
        });
        Ok(())
    }
}
