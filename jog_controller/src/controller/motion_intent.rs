use tracing::{debug, info};

use crate::{
    error::InputError,
    jog_page::form::{FieldId, JogForm},
    models::{
        JogDirection, JogState, MotionCommand, MotionParameters, MoveKind, MoveRequest, MoveTarget,
    },
};

/// Turns operator actions into motion commands and tracks whether a jog is
/// running.
///
/// Every operation either returns exactly one command or fails with
/// [`InputError::InvalidInput`] and leaves the controller untouched.
#[derive(Debug, Default)]
pub struct MotionIntentController {
    state: JogState,
}

impl MotionIntentController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> JogState {
        self.state
    }

    pub fn is_jogging(&self) -> bool {
        self.state == JogState::Jogging
    }

    pub fn move_to_absolute(
        &self,
        form: &JogForm,
        field: FieldId,
    ) -> Result<MotionCommand, InputError> {
        let position = form.count(field)?;
        info!("Moving to absolute position {}", position);

        Ok(MotionCommand::Move(MoveRequest {
            target: MoveTarget::Absolute(position),
            repeat: form.repeat(MoveKind::Absolute),
        }))
    }

    /// The field holds a distance; `direction` decides its sign.
    pub fn move_by_relative(
        &self,
        form: &JogForm,
        field: FieldId,
        direction: JogDirection,
    ) -> Result<MotionCommand, InputError> {
        let distance = form.count(field)?;
        let distance = match direction {
            JogDirection::Positive => distance,
            JogDirection::Negative => distance
                .checked_neg()
                .ok_or_else(|| InputError::invalid(field.name(), form.text(field)))?,
        };
        info!("Moving by relative distance {}", distance);

        Ok(MotionCommand::Move(MoveRequest {
            target: MoveTarget::Relative(distance),
            repeat: form.repeat(MoveKind::Relative),
        }))
    }

    pub fn start_jog(
        &mut self,
        form: &JogForm,
        direction: JogDirection,
    ) -> Result<MotionCommand, InputError> {
        let previous = self.state;
        self.state = JogState::Jogging;

        match self.jog_command(form, direction) {
            Ok(command) => Ok(command),
            Err(e) => {
                self.state = previous;
                Err(e)
            }
        }
    }

    fn jog_command(
        &self,
        form: &JogForm,
        direction: JogDirection,
    ) -> Result<MotionCommand, InputError> {
        debug_assert!(self.is_jogging());

        let speed = form.count(FieldId::Speed)?;
        info!("Jog started: direction {}, speed {}", direction, speed);

        Ok(MotionCommand::Jog { direction, speed })
    }

    pub fn stop(&mut self) -> MotionCommand {
        if self.state == JogState::Idle {
            debug!("Stop requested while idle");
        }
        self.state = JogState::Idle;
        info!("Motion stopped");

        MotionCommand::Stop
    }

    pub fn motion_parameters(&self, form: &JogForm) -> Result<MotionParameters, InputError> {
        Ok(MotionParameters {
            acceleration: form.count(FieldId::Acceleration)?,
            deceleration: form.count(FieldId::Deceleration)?,
            stop_deceleration: form.count(FieldId::StopDeceleration)?,
            smoothing: form.count(FieldId::Smoothing)?,
            speed: form.count(FieldId::Speed)?,
            dwell_time: form.count(FieldId::DwellTime)?,
        })
    }
}
