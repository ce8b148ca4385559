use crate::{
    jog_page::{AbsoluteSlot, FieldId, JogEvent},
    models::{JogDirection, MoveKind},
    window::{Page, Point, WindowEvent},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Jog(JogEvent),
    Window(WindowEvent),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command {0:?}")]
    UnknownCommand(String),

    #[error("Wrong arguments for {command}: expected {expected}")]
    Arity {
        command: String,
        expected: &'static str,
    },

    #[error("Invalid argument {0:?}")]
    InvalidArgument(String),
}

fn direction(arg: &str) -> Result<JogDirection, ParseError> {
    match arg {
        "left" | "-" | "-1" => Ok(JogDirection::Negative),
        "right" | "+" | "+1" | "1" => Ok(JogDirection::Positive),
        _ => Err(ParseError::InvalidArgument(arg.to_string())),
    }
}

fn point(x: &str, y: &str) -> Result<Point, ParseError> {
    let x = x
        .parse()
        .map_err(|_| ParseError::InvalidArgument(x.to_string()))?;
    let y = y
        .parse()
        .map_err(|_| ParseError::InvalidArgument(y.to_string()))?;
    Ok(Point::new(x, y))
}

/// Parses one console line such as `abs:1`, `jog:left` or `set:speed:750`.
pub fn parse_command(cmd_str: &str) -> Result<UiEvent, ParseError> {
    let cmd_str = cmd_str.trim();
    if cmd_str.is_empty() {
        return Err(ParseError::Empty);
    }

    // Field text is taken verbatim, colons included.
    if let Some(rest) = cmd_str.strip_prefix("set:") {
        let (name, text) = rest.split_once(':').ok_or_else(|| ParseError::Arity {
            command: "set".to_string(),
            expected: "set:<field>:<text>",
        })?;
        let id = FieldId::from_name(name)
            .ok_or_else(|| ParseError::InvalidArgument(name.to_string()))?;
        return Ok(UiEvent::Jog(JogEvent::SetField(id, text.to_string())));
    }

    let parts: Vec<&str> = cmd_str.split(':').collect();

    let event = match (parts[0], &parts[1..]) {
        ("abs", [slot]) => {
            let slot = match *slot {
                "1" => AbsoluteSlot::First,
                "2" => AbsoluteSlot::Second,
                other => return Err(ParseError::InvalidArgument(other.to_string())),
            };
            UiEvent::Jog(JogEvent::AbsoluteMove(slot))
        }
        ("rel", [dir]) => UiEvent::Jog(JogEvent::RelativeMove(direction(dir)?)),
        ("jog", [dir]) => UiEvent::Jog(JogEvent::JogPressed(direction(dir)?)),
        ("stop", []) => UiEvent::Jog(JogEvent::Stop),
        ("apply", []) => UiEvent::Jog(JogEvent::ApplyParameters),
        ("repeat", [kind, enabled]) => {
            let kind = match *kind {
                "abs" => MoveKind::Absolute,
                "rel" => MoveKind::Relative,
                other => return Err(ParseError::InvalidArgument(other.to_string())),
            };
            let enabled = match *enabled {
                "on" | "true" | "1" => true,
                "off" | "false" | "0" => false,
                other => return Err(ParseError::InvalidArgument(other.to_string())),
            };
            UiEvent::Jog(JogEvent::SetRepeat(kind, enabled))
        }
        ("nav", [name]) => {
            let page = Page::from_name(name)
                .ok_or_else(|| ParseError::InvalidArgument(name.to_string()))?;
            UiEvent::Window(WindowEvent::Navigate(page))
        }
        ("menu", []) => UiEvent::Window(WindowEvent::ToggleMenu),
        ("maximize", []) => UiEvent::Window(WindowEvent::ToggleMaximize),
        ("minimize", []) => UiEvent::Window(WindowEvent::Minimize),
        ("restore", []) => UiEvent::Window(WindowEvent::Restore),
        ("drag", ["start", x, y]) => UiEvent::Window(WindowEvent::DragStart(point(x, y)?)),
        ("drag", ["move", x, y]) => UiEvent::Window(WindowEvent::DragMove(point(x, y)?)),
        ("drag", ["end"]) => UiEvent::Window(WindowEvent::DragEnd),
        ("quit" | "exit", []) => UiEvent::Quit,
        (command, _) => return Err(arity_or_unknown(command)),
    };

    Ok(event)
}

fn arity_or_unknown(command: &str) -> ParseError {
    let expected = match command {
        "abs" => "abs:<1|2>",
        "rel" => "rel:<left|right>",
        "jog" => "jog:<left|right>",
        "repeat" => "repeat:<abs|rel>:<on|off>",
        "nav" => "nav:<home|jog|setting|help>",
        "set" => "set:<field>:<text>",
        "drag" => "drag:start:<x>:<y> | drag:move:<x>:<y> | drag:end",
        "stop" | "apply" | "menu" | "maximize" | "minimize" | "restore" | "quit" | "exit" => {
            "no arguments"
        }
        _ => return ParseError::UnknownCommand(command.to_string()),
    };

    ParseError::Arity {
        command: command.to_string(),
        expected,
    }
}
