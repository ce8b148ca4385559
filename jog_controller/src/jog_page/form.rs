use std::{collections::HashMap, fmt};

use crate::{
    config::FormDefaults,
    error::{parse_count, parse_decimal, InputError},
    models::{MoveKind, StatusReadout},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Acceleration,
    Deceleration,
    StopDeceleration,
    Smoothing,
    Speed,
    DwellTime,
    AbsoluteTarget1,
    AbsoluteTarget2,
    RelativeDistance,
    Position,
    Velocity,
    Current,
    SecondaryPosition,
}

impl FieldId {
    pub const ALL: [FieldId; 13] = [
        FieldId::Acceleration,
        FieldId::Deceleration,
        FieldId::StopDeceleration,
        FieldId::Smoothing,
        FieldId::Speed,
        FieldId::DwellTime,
        FieldId::AbsoluteTarget1,
        FieldId::AbsoluteTarget2,
        FieldId::RelativeDistance,
        FieldId::Position,
        FieldId::Velocity,
        FieldId::Current,
        FieldId::SecondaryPosition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldId::Acceleration => "acceleration",
            FieldId::Deceleration => "deceleration",
            FieldId::StopDeceleration => "stop_deceleration",
            FieldId::Smoothing => "smoothing",
            FieldId::Speed => "speed",
            FieldId::DwellTime => "dwell_time",
            FieldId::AbsoluteTarget1 => "absolute_1",
            FieldId::AbsoluteTarget2 => "absolute_2",
            FieldId::RelativeDistance => "relative",
            FieldId::Position => "position",
            FieldId::Velocity => "velocity",
            FieldId::Current => "current",
            FieldId::SecondaryPosition => "position_2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }

    /// Readouts are written by the status refresh, not by the operator.
    pub fn is_readout(self) -> bool {
        matches!(
            self,
            FieldId::Position | FieldId::Velocity | FieldId::Current | FieldId::SecondaryPosition
        )
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text content of the jog page: editable fields, readouts and the two
/// repeat toggles.
#[derive(Debug, Clone)]
pub struct JogForm {
    fields: HashMap<FieldId, String>,
    repeat_absolute: bool,
    repeat_relative: bool,
}

impl JogForm {
    pub fn new(defaults: &FormDefaults) -> Self {
        let params = &defaults.parameters;
        let fields = [
            (FieldId::Acceleration, params.acceleration.to_string()),
            (FieldId::Deceleration, params.deceleration.to_string()),
            (FieldId::StopDeceleration, params.stop_deceleration.to_string()),
            (FieldId::Smoothing, params.smoothing.to_string()),
            (FieldId::Speed, params.speed.to_string()),
            (FieldId::DwellTime, params.dwell_time.to_string()),
            (FieldId::AbsoluteTarget1, defaults.absolute_targets[0].to_string()),
            (FieldId::AbsoluteTarget2, defaults.absolute_targets[1].to_string()),
            (FieldId::RelativeDistance, defaults.relative_distance.to_string()),
            (FieldId::Position, "0".to_string()),
            (FieldId::Velocity, "0".to_string()),
            (FieldId::Current, "0.0".to_string()),
            (FieldId::SecondaryPosition, "0".to_string()),
        ]
        .into_iter()
        .collect();

        Self {
            fields,
            repeat_absolute: false,
            repeat_relative: false,
        }
    }

    pub fn text(&self, id: FieldId) -> &str {
        self.fields.get(&id).map(String::as_str).unwrap_or("")
    }

    pub fn set_text(&mut self, id: FieldId, text: impl Into<String>) {
        self.fields.insert(id, text.into());
    }

    pub fn count(&self, id: FieldId) -> Result<i64, InputError> {
        parse_count(id.name(), self.text(id))
    }

    pub fn repeat(&self, kind: MoveKind) -> bool {
        match kind {
            MoveKind::Absolute => self.repeat_absolute,
            MoveKind::Relative => self.repeat_relative,
        }
    }

    pub fn set_repeat(&mut self, kind: MoveKind, enabled: bool) {
        match kind {
            MoveKind::Absolute => self.repeat_absolute = enabled,
            MoveKind::Relative => self.repeat_relative = enabled,
        }
    }

    pub fn show_status(&mut self, status: &StatusReadout) {
        self.set_text(FieldId::Position, status.position.to_string());
        self.set_text(FieldId::SecondaryPosition, status.position.to_string());
        self.set_text(FieldId::Velocity, status.velocity.to_string());
        self.set_text(FieldId::Current, format!("{:.1}", status.current));
    }

    pub fn readout(&self) -> Result<StatusReadout, InputError> {
        Ok(StatusReadout {
            position: self.count(FieldId::Position)?,
            velocity: self.count(FieldId::Velocity)?,
            current: parse_decimal(FieldId::Current.name(), self.text(FieldId::Current))?,
        })
    }
}

impl Default for JogForm {
    fn default() -> Self {
        Self::new(&FormDefaults::default())
    }
}
