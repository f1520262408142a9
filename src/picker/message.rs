// SPDX-License-Identifier: MPL-2.0
//! Messages delivered to the picker's queue.

use crate::application::port::{ExportReport, PickerInput};
use crate::domain::asset::Asset;

/// Which finalize path is waiting for the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeIntent {
    /// The user confirmed the selection.
    Done,
    /// The user aborted.
    Cancel,
}

/// Everything the picker applies on its own context.
#[derive(Debug)]
pub(crate) enum Message {
    /// Posted by a responder or a [`PickerHandle`](crate::application::port::PickerHandle).
    Input(PickerInput),
    /// A captured photo finished persisting (possibly as an unpersisted fallback).
    ImagePersisted(Asset),
    /// A captured video finished persisting; `None` when the store refused it.
    VideoPersisted(Option<Asset>),
    /// The presenter finished closing the picker.
    PickerDismissed(FinalizeIntent),
    ExportFinished(ExportReport),
}

impl Message {
    /// Result of a task the picker spawned.
    pub(crate) fn is_task_result(&self) -> bool {
        matches!(
            self,
            Message::ImagePersisted(_)
                | Message::VideoPersisted(_)
                | Message::PickerDismissed(_)
                | Message::ExportFinished(_)
        )
    }

    /// Answer (or abandonment) of a responder the picker handed out.
    pub(crate) fn is_responder_answer(&self) -> bool {
        matches!(self, Message::Input(PickerInput::Response(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{CapabilityKind, CapabilityResponse, PickerCommand};

    #[test]
    fn classifies_task_results_and_answers() {
        let persisted = Message::VideoPersisted(None);
        assert!(persisted.is_task_result());
        assert!(!persisted.is_responder_answer());

        let abandoned = Message::Input(PickerInput::Response(CapabilityResponse::Abandoned(
            CapabilityKind::Camera,
        )));
        assert!(abandoned.is_responder_answer());
        assert!(!abandoned.is_task_result());

        let command = Message::Input(PickerInput::Command(PickerCommand::Done));
        assert!(!command.is_responder_answer());
        assert!(!command.is_task_result());
    }
}
