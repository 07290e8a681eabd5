use std::fmt;
use std::str::FromStr;

use crate::registry::ItemRegistry;

/// Notification fired by the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LassoEvent {
    Start,
    Draw,
    End,
}

impl LassoEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            LassoEvent::Start => "start",
            LassoEvent::Draw => "draw",
            LassoEvent::End => "end",
        }
    }
}

impl fmt::Display for LassoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent(pub String);

impl FromStr for LassoEvent {
    type Err = UnknownEvent;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "start" => Ok(LassoEvent::Start),
            "draw" => Ok(LassoEvent::Draw),
            "end" => Ok(LassoEvent::End),
            other => Err(UnknownEvent(other.to_string())),
        }
    }
}

pub type Hook<H> = Box<dyn FnMut(&ItemRegistry<H>)>;

/// One optional callback per notification.
pub struct Hooks<H> {
    start: Option<Hook<H>>,
    draw: Option<Hook<H>>,
    end: Option<Hook<H>>,
}

impl<H> Default for Hooks<H> {
    fn default() -> Self {
        Self {
            start: None,
            draw: None,
            end: None,
        }
    }
}

impl<H> Hooks<H> {
    fn slot(&mut self, event: LassoEvent) -> &mut Option<Hook<H>> {
        match event {
            LassoEvent::Start => &mut self.start,
            LassoEvent::Draw => &mut self.draw,
            LassoEvent::End => &mut self.end,
        }
    }

    pub fn set(&mut self, event: LassoEvent, hook: Hook<H>) {
        *self.slot(event) = Some(hook);
    }

    pub(crate) fn fire(&mut self, event: LassoEvent, registry: &ItemRegistry<H>) {
        if let Some(hook) = self.slot(event) {
            hook(registry);
        }
    }
}
