use std::sync::Arc;

use tracing::{debug, warn};

use super::{AbsoluteSlot, FieldId, JogEvent, JogForm};
use crate::{
    command_executor::MotionDispatcher,
    controller::MotionIntentController,
    error::InputError,
    models::{JogDirection, MotionCommand, Notice},
};

pub struct JogPage {
    form: JogForm,
    controller: MotionIntentController,
    dispatcher: Arc<dyn MotionDispatcher>,
    notices: Vec<Notice>,
}

impl JogPage {
    pub fn new(form: JogForm, dispatcher: Arc<dyn MotionDispatcher>) -> Self {
        Self {
            form,
            controller: MotionIntentController::new(),
            dispatcher,
            notices: Vec::new(),
        }
    }

    pub fn form(&self) -> &JogForm {
        &self.form
    }

    pub fn controller(&self) -> &MotionIntentController {
        &self.controller
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub async fn handle(&mut self, event: JogEvent) {
        debug!("Jog page event: {:?}", event);

        match event {
            JogEvent::AbsoluteMove(slot) => self.on_absolute_move(slot).await,
            JogEvent::RelativeMove(direction) => self.on_relative_move(direction).await,
            JogEvent::JogPressed(direction) => self.on_jog_pressed(direction).await,
            JogEvent::Stop => self.on_stop().await,
            JogEvent::ApplyParameters => self.on_apply_parameters().await,
            JogEvent::SetField(id, text) => self.set_field(id, text),
            JogEvent::SetRepeat(kind, enabled) => self.form.set_repeat(kind, enabled),
        }
    }

    pub async fn on_absolute_move(&mut self, slot: AbsoluteSlot) {
        let result = self.controller.move_to_absolute(&self.form, slot.field());
        self.submit(result).await;
    }

    pub async fn on_relative_move(&mut self, direction: JogDirection) {
        let result =
            self.controller
                .move_by_relative(&self.form, FieldId::RelativeDistance, direction);
        self.submit(result).await;
    }

    pub async fn on_jog_pressed(&mut self, direction: JogDirection) {
        let result = self.controller.start_jog(&self.form, direction);
        self.submit(result).await;
    }

    pub async fn on_stop(&mut self) {
        let command = self.controller.stop();
        self.submit(Ok(command)).await;
    }

    pub async fn on_apply_parameters(&mut self) {
        let result = self
            .controller
            .motion_parameters(&self.form)
            .map(MotionCommand::ApplyParameters);
        self.submit(result).await;
    }

    pub fn set_field(&mut self, id: FieldId, text: String) {
        if id.is_readout() {
            warn!("Ignoring edit of read-only field {}", id);
            return;
        }
        self.form.set_text(id, text);
    }

    /// Periodic refresh of the readout fields.
    pub async fn update_status(&mut self) {
        match self.dispatcher.status().await {
            Ok(status) => self.form.show_status(&status),
            Err(e) => debug!("Status refresh failed: {}", e),
        }
    }

    async fn submit(&mut self, result: Result<MotionCommand, InputError>) {
        let command = match result {
            Ok(command) => command,
            Err(e) => {
                warn!("{}", e);
                self.notices.push(Notice::InvalidInput {
                    field: e.field().to_string(),
                });
                return;
            }
        };

        if let MotionCommand::Move(request) = &command {
            if request.repeat {
                warn!("Repeat {} move requested, executing once", request.kind());
                self.notices.push(Notice::RepeatUnsupported {
                    kind: request.kind(),
                });
            }
        }

        if let Err(e) = self.dispatcher.dispatch(command).await {
            warn!("Failed to dispatch {:?}: {}", command, e);
            self.notices.push(Notice::DispatchFailed {
                reason: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{io, sync::Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::models::{MoveKind, MoveRequest, MoveTarget, StatusReadout};

    #[derive(Default)]
    pub(crate) struct RecordingDispatcher {
        pub commands: Mutex<Vec<MotionCommand>>,
        pub status: Mutex<StatusReadout>,
        pub offline: bool,
    }

    impl RecordingDispatcher {
        pub fn commands(&self) -> Vec<MotionCommand> {
            self.commands.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MotionDispatcher for RecordingDispatcher {
        async fn dispatch(&self, command: MotionCommand) -> io::Result<()> {
            if self.offline {
                return Err(io::Error::other("offline"));
            }
            self.commands.lock().unwrap().push(command);
            Ok(())
        }

        async fn status(&self) -> io::Result<StatusReadout> {
            if self.offline {
                return Err(io::Error::other("offline"));
            }
            Ok(*self.status.lock().unwrap())
        }
    }

    fn page() -> (JogPage, Arc<RecordingDispatcher>) {
        let dispatcher = Arc::new(RecordingDispatcher::default());
        let page = JogPage::new(JogForm::default(), dispatcher.clone());
        (page, dispatcher)
    }

    #[tokio::test]
    async fn absolute_move_dispatches_one_command() {
        let (mut page, dispatcher) = page();
        page.handle(JogEvent::SetField(FieldId::AbsoluteTarget2, "1500".into()))
            .await;

        page.handle(JogEvent::AbsoluteMove(AbsoluteSlot::Second))
            .await;

        assert_eq!(
            dispatcher.commands(),
            vec![MotionCommand::Move(MoveRequest {
                target: MoveTarget::Absolute(1500),
                repeat: false,
            })]
        );
        assert!(page.take_notices().is_empty());
    }

    #[tokio::test]
    async fn malformed_absolute_target_gives_one_notice_and_no_command() {
        let (mut page, dispatcher) = page();
        page.handle(JogEvent::SetField(FieldId::AbsoluteTarget1, "abc".into()))
            .await;

        page.handle(JogEvent::AbsoluteMove(AbsoluteSlot::First)).await;

        assert!(dispatcher.commands().is_empty());
        assert_eq!(
            page.take_notices(),
            vec![Notice::InvalidInput {
                field: "absolute_1".to_string()
            }]
        );
        assert!(page.take_notices().is_empty());
    }

    #[tokio::test]
    async fn left_and_right_use_the_same_distance() {
        let (mut page, dispatcher) = page();

        page.handle(JogEvent::RelativeMove(JogDirection::Positive))
            .await;
        page.handle(JogEvent::RelativeMove(JogDirection::Negative))
            .await;

        let targets: Vec<_> = dispatcher
            .commands()
            .into_iter()
            .map(|command| match command {
                MotionCommand::Move(request) => request.target,
                other => panic!("unexpected command {:?}", other),
            })
            .collect();
        assert_eq!(
            targets,
            vec![MoveTarget::Relative(100), MoveTarget::Relative(-100)]
        );
    }

    #[tokio::test]
    async fn repeat_move_runs_once_and_reports_unsupported() {
        let (mut page, dispatcher) = page();
        page.handle(JogEvent::SetRepeat(MoveKind::Absolute, true))
            .await;

        page.handle(JogEvent::AbsoluteMove(AbsoluteSlot::First)).await;

        assert_eq!(dispatcher.commands().len(), 1);
        assert_eq!(
            page.take_notices(),
            vec![Notice::RepeatUnsupported {
                kind: MoveKind::Absolute
            }]
        );
    }

    #[tokio::test]
    async fn jog_press_then_stop() {
        let (mut page, dispatcher) = page();

        page.handle(JogEvent::JogPressed(JogDirection::Negative))
            .await;
        assert!(page.controller().is_jogging());

        page.handle(JogEvent::Stop).await;
        assert!(!page.controller().is_jogging());

        assert_eq!(
            dispatcher.commands(),
            vec![
                MotionCommand::Jog {
                    direction: JogDirection::Negative,
                    speed: 500,
                },
                MotionCommand::Stop,
            ]
        );
    }

    #[tokio::test]
    async fn apply_parameters_is_all_or_nothing() {
        let (mut page, dispatcher) = page();

        page.handle(JogEvent::ApplyParameters).await;
        page.handle(JogEvent::SetField(FieldId::DwellTime, "".into()))
            .await;
        page.handle(JogEvent::ApplyParameters).await;

        assert_eq!(
            dispatcher.commands(),
            vec![MotionCommand::ApplyParameters(Default::default())]
        );
        assert_eq!(
            page.take_notices(),
            vec![Notice::InvalidInput {
                field: "dwell_time".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn readouts_cannot_be_edited() {
        let (mut page, _dispatcher) = page();

        page.handle(JogEvent::SetField(FieldId::Position, "999".into()))
            .await;

        assert_eq!(page.form().text(FieldId::Position), "0");
    }

    #[tokio::test]
    async fn status_refresh_updates_readouts() {
        let (mut page, dispatcher) = page();
        *dispatcher.status.lock().unwrap() = StatusReadout {
            position: 320,
            velocity: -500,
            current: 0.5,
        };

        page.update_status().await;

        assert_eq!(page.form().text(FieldId::Position), "320");
        assert_eq!(page.form().text(FieldId::Velocity), "-500");
        assert_eq!(page.form().text(FieldId::Current), "0.5");
    }

    #[tokio::test]
    async fn dispatch_failure_becomes_notice() {
        let dispatcher = Arc::new(RecordingDispatcher {
            offline: true,
            ..Default::default()
        });
        let mut page = JogPage::new(JogForm::default(), dispatcher);

        page.handle(JogEvent::Stop).await;
        page.update_status().await;

        assert_eq!(
            page.take_notices(),
            vec![Notice::DispatchFailed {
                reason: "offline".to_string()
            }]
        );
        assert!(!page.controller().is_jogging());
    }
}
