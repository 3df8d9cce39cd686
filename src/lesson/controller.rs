//! Dialogue, quiz, and consequence flow for the earthquake drill.
//!
//! The controller owns the only mutable drill state: the active
//! [`FlowState`], which screen is on display, the next script line, and the
//! handles of pending timers. Inputs arrive through the `on_*` handlers and
//! every effect leaves through a [`LessonHost`]. Each transition clears the
//! previous screen before showing the next and cancels any timer it
//! supersedes, so a late callback can only ever be reported as stale.
use bevy::prelude::Resource;

use super::{
    assets::SoundCue,
    config::FlowTimings,
    host::LessonHost,
    script::{QuizChoice, Script, QUIZ_PROMPT},
    types::{
        Backdrop, FlowState, IgnoredReason, ScreenKind, ScreenView, TalkerPose, TimerId,
        TimerStep, Transition,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTimer {
    id: TimerId,
    step: TimerStep,
}

#[derive(Resource, Debug)]
pub struct DialogueFlowController {
    script: Script,
    timings: FlowTimings,
    state: FlowState,
    next_line: usize,
    screen: Option<ScreenKind>,
    /// Dialogue slot: `DialogueAdvance` or `QuizReveal`.
    advance_timer: Option<PendingTimer>,
    /// Quiz slot: `OptionsPrompt`.
    prompt_timer: Option<PendingTimer>,
}

impl DialogueFlowController {
    pub fn new(script: Script, timings: FlowTimings) -> Self {
        Self {
            script,
            timings,
            state: FlowState::Start,
            next_line: 0,
            screen: None,
            advance_timer: None,
            prompt_timer: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Screen currently on display, if any has been shown yet.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn screen(&self) -> Option<ScreenKind> {
        self.screen
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn pending_timers(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.advance_timer
            .iter()
            .chain(self.prompt_timer.iter())
            .map(|pending| pending.id)
    }

    /// "Start Module" was clicked.
    pub fn on_start(&mut self, host: &mut impl LessonHost) -> Transition {
        let from = self.state;
        if from != FlowState::Start {
            return self.ignore(IgnoredReason::ControlNotShown);
        }

        self.clear_screen(host);
        host.set_backdrop(Backdrop::AfterEarthquake);
        host.play_sound(SoundCue::Earthquake);
        host.shake_camera(self.timings.shake_duration, self.timings.shake_intensity);
        host.set_talker(Some(TalkerPose::Narrating));

        self.next_line = 0;
        self.show_next_line(host);
        self.moved(from)
    }

    /// A timer previously handed out by the host expired.
    pub fn on_timer_fire(&mut self, id: TimerId, host: &mut impl LessonHost) -> Transition {
        let from = self.state;

        if let Some(pending) = self.advance_timer.filter(|pending| pending.id == id) {
            self.advance_timer = None;
            match (pending.step, from) {
                (TimerStep::DialogueAdvance, FlowState::PlayingDialogue(_)) => {
                    self.show_next_line(host)
                }
                (TimerStep::QuizReveal, FlowState::PlayingDialogue(_)) => self.enter_quiz(host),
                _ => return self.ignore(IgnoredReason::StaleTimer),
            }
            return self.moved(from);
        }

        if let Some(pending) = self.prompt_timer.filter(|pending| pending.id == id) {
            self.prompt_timer = None;
            if pending.step == TimerStep::OptionsPrompt && from == FlowState::QuizShown {
                host.play_sound(SoundCue::Options);
                return self.moved(from);
            }
        }

        self.ignore(IgnoredReason::StaleTimer)
    }

    /// One of the quiz options was clicked.
    pub fn on_option_click(&mut self, choice: QuizChoice, host: &mut impl LessonHost) -> Transition {
        let from = self.state;
        if from != FlowState::QuizShown {
            return self.ignore(IgnoredReason::ControlNotShown);
        }

        host.stop_all_sounds();
        self.cancel_prompt(host);
        self.clear_screen(host);

        host.set_talker(Some(TalkerPose::Consequence));
        self.show(
            host,
            ScreenView::Consequence {
                choice,
                message: choice.consequence_message().to_string(),
                image: choice.consequence_image(),
            },
        );
        host.play_sound(choice.consequence_cue());

        self.state = FlowState::ConsequenceShown(choice);
        self.moved(from)
    }

    /// "Go Back" was clicked on the quiz or consequence screen.
    pub fn on_go_back(&mut self, host: &mut impl LessonHost) -> Transition {
        match self.state {
            FlowState::QuizShown => self.reset_to_start(host),
            FlowState::ConsequenceShown(_) => {
                let from = self.state;
                host.stop_all_sounds();
                host.stop_sound(SoundCue::Options);
                self.clear_screen(host);
                self.enter_quiz(host);
                self.moved(from)
            }
            FlowState::Start | FlowState::PlayingDialogue(_) => {
                self.ignore(IgnoredReason::ControlNotShown)
            }
        }
    }

    /// Returns to the start screen from anywhere. Safe to call repeatedly.
    pub fn reset_to_start(&mut self, host: &mut impl LessonHost) -> Transition {
        let from = self.state;

        host.stop_all_sounds();
        self.cancel_advance(host);
        self.cancel_prompt(host);
        self.clear_screen(host);

        host.set_backdrop(Backdrop::Classroom);
        host.set_talker(None);
        self.show(host, ScreenView::Start);

        self.next_line = 0;
        self.state = FlowState::Start;
        self.moved(from)
    }

    // An absent line covers both an empty and an exhausted script.
    fn show_next_line(&mut self, host: &mut impl LessonHost) {
        self.cancel_advance(host);

        let index = self.next_line;
        let Some(line) = self.script.line(index).cloned() else {
            self.enter_quiz(host);
            return;
        };

        self.show(host, ScreenView::Dialogue { text: line.text });
        if let Some(cue) = line.cue {
            host.play_sound(cue);
        }

        self.state = FlowState::PlayingDialogue(index);
        self.next_line = index + 1;

        let (delay, step) = if self.next_line < self.script.len() {
            (self.timings.line_interval, TimerStep::DialogueAdvance)
        } else {
            (self.timings.quiz_delay, TimerStep::QuizReveal)
        };
        self.advance_timer = Some(PendingTimer {
            id: host.schedule(delay, step),
            step,
        });
    }

    fn enter_quiz(&mut self, host: &mut impl LessonHost) {
        self.cancel_advance(host);
        self.cancel_prompt(host);
        self.clear_screen(host);

        host.set_talker(Some(TalkerPose::Quiz));
        self.show(
            host,
            ScreenView::Quiz {
                prompt: QUIZ_PROMPT.to_string(),
                options: QuizChoice::ALL.to_vec(),
            },
        );
        host.play_sound(SoundCue::Question);

        let step = TimerStep::OptionsPrompt;
        self.prompt_timer = Some(PendingTimer {
            id: host.schedule(self.timings.options_prompt_delay, step),
            step,
        });
        self.state = FlowState::QuizShown;
    }

    fn show(&mut self, host: &mut impl LessonHost, view: ScreenView) {
        self.clear_screen(host);
        self.screen = Some(view.kind());
        host.show_screen(view);
    }

    fn clear_screen(&mut self, host: &mut impl LessonHost) {
        if let Some(kind) = self.screen.take() {
            host.clear_screen(kind);
        }
    }

    fn cancel_advance(&mut self, host: &mut impl LessonHost) {
        if let Some(pending) = self.advance_timer.take() {
            host.cancel_timer(pending.id);
        }
    }

    fn cancel_prompt(&mut self, host: &mut impl LessonHost) {
        if let Some(pending) = self.prompt_timer.take() {
            host.cancel_timer(pending.id);
        }
    }

    fn moved(&self, from: FlowState) -> Transition {
        Transition::Moved {
            from,
            to: self.state,
        }
    }

    fn ignore(&self, reason: IgnoredReason) -> Transition {
        Transition::Ignored {
            state: self.state,
            reason,
        }
    }
}

impl Default for DialogueFlowController {
    fn default() -> Self {
        Self::new(Script::earthquake_drill(), FlowTimings::default())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, time::Duration};

    use super::*;
    use crate::lesson::{assets::ImageKey, timers::FlowTimers};

    /// Host double that mirrors what an engine would have on screen.
    #[derive(Default)]
    struct RecordingHost {
        timers: FlowTimers,
        visible: Vec<ScreenView>,
        playing: Vec<SoundCue>,
        backdrop: Backdrop,
        talker: Option<TalkerPose>,
        shakes: usize,
        started_sounds: Vec<SoundCue>,
    }

    impl RecordingHost {
        fn visible_kinds(&self) -> Vec<ScreenKind> {
            self.visible.iter().map(ScreenView::kind).collect()
        }

        fn consequence(&self) -> Option<(QuizChoice, &str, ImageKey)> {
            self.visible.iter().find_map(|view| match view {
                ScreenView::Consequence {
                    choice,
                    message,
                    image,
                } => Some((*choice, message.as_str(), *image)),
                _ => None,
            })
        }

        fn dialogue_text(&self) -> Option<&str> {
            self.visible.iter().find_map(|view| match view {
                ScreenView::Dialogue { text } => Some(text.as_str()),
                _ => None,
            })
        }

        /// Advances time and feeds every expired timer to the controller.
        fn advance(
            &mut self,
            controller: &mut DialogueFlowController,
            delta: Duration,
        ) -> Vec<Transition> {
            let mut transitions = Vec::new();
            for id in self.timers.tick(delta) {
                transitions.push(controller.on_timer_fire(id, &mut *self));
            }
            transitions
        }
    }

    impl LessonHost for RecordingHost {
        fn show_screen(&mut self, view: ScreenView) {
            self.visible.push(view);
        }

        fn clear_screen(&mut self, kind: ScreenKind) {
            self.visible.retain(|view| view.kind() != kind);
        }

        fn set_backdrop(&mut self, backdrop: Backdrop) {
            self.backdrop = backdrop;
        }

        fn set_talker(&mut self, pose: Option<TalkerPose>) {
            self.talker = pose;
        }

        fn shake_camera(&mut self, _duration: Duration, _intensity: f32) {
            self.shakes += 1;
        }

        fn play_sound(&mut self, cue: SoundCue) {
            self.playing.push(cue);
            self.started_sounds.push(cue);
        }

        fn stop_sound(&mut self, cue: SoundCue) {
            self.playing.retain(|playing| *playing != cue);
        }

        fn stop_all_sounds(&mut self) {
            self.playing.clear();
        }

        fn schedule(&mut self, delay: Duration, step: TimerStep) -> TimerId {
            self.timers.schedule(delay, step)
        }

        fn cancel_timer(&mut self, id: TimerId) {
            self.timers.cancel(id);
        }
    }

    fn started(script: Script) -> (DialogueFlowController, RecordingHost) {
        let mut controller = DialogueFlowController::new(script, FlowTimings::default());
        let mut host = RecordingHost::default();
        controller.reset_to_start(&mut host);
        controller.on_start(&mut host);
        (controller, host)
    }

    fn at_quiz() -> (DialogueFlowController, RecordingHost) {
        let (mut controller, mut host) = started(Script::earthquake_drill());
        for _ in 0..3 {
            host.advance(&mut controller, Duration::from_millis(3000));
        }
        host.advance(&mut controller, Duration::from_millis(5000));
        assert_eq!(controller.state(), FlowState::QuizShown);
        (controller, host)
    }

    fn firings_until_quiz(script: Script) -> usize {
        let (mut controller, mut host) = started(script);
        let mut firings = 0;
        while controller.state() != FlowState::QuizShown {
            let transitions = host.advance(&mut controller, Duration::from_millis(100));
            firings += transitions.len();
            assert!(firings <= 10, "flow never reached the quiz");
        }
        firings
    }

    #[test]
    fn startup_shows_only_the_start_control() {
        let mut controller = DialogueFlowController::default();
        let mut host = RecordingHost::default();
        controller.reset_to_start(&mut host);

        assert_eq!(host.visible_kinds(), vec![ScreenKind::Start]);
        assert_eq!(controller.screen(), Some(ScreenKind::Start));
        assert_eq!(host.backdrop, Backdrop::Classroom);
        assert_eq!(host.talker, None);
        assert!(host.timers.is_empty());
    }

    #[test]
    fn start_triggers_earthquake_and_first_line() {
        let (controller, host) = started(Script::earthquake_drill());

        assert_eq!(controller.state(), FlowState::PlayingDialogue(0));
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Dialogue]);
        assert_eq!(host.dialogue_text(), Some("Oh no! The ground is shaking..."));
        assert_eq!(host.backdrop, Backdrop::AfterEarthquake);
        assert_eq!(host.talker, Some(TalkerPose::Narrating));
        assert_eq!(host.shakes, 1);
        assert_eq!(host.playing, vec![SoundCue::Earthquake, SoundCue::Line1]);
    }

    #[test]
    fn exactly_one_screen_visible_after_every_transition() {
        let mut controller = DialogueFlowController::default();
        let mut host = RecordingHost::default();
        let check = |host: &RecordingHost| assert_eq!(host.visible.len(), 1);

        controller.reset_to_start(&mut host);
        check(&host);
        controller.on_start(&mut host);
        check(&host);
        for _ in 0..4 {
            host.advance(&mut controller, Duration::from_millis(5000));
            check(&host);
        }
        controller.on_option_click(QuizChoice::Hide, &mut host);
        check(&host);
        controller.on_go_back(&mut host);
        check(&host);
        controller.on_option_click(QuizChoice::Leave, &mut host);
        check(&host);
        controller.on_go_back(&mut host);
        check(&host);
        controller.on_go_back(&mut host);
        check(&host);
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Start]);
    }

    #[test]
    fn quiz_is_reached_after_one_firing_per_line() {
        assert_eq!(firings_until_quiz(Script::earthquake_drill()), 4);
        assert_eq!(firings_until_quiz(Script::from_texts(["only line"])), 1);
        assert_eq!(
            firings_until_quiz(Script::from_texts(["a", "b", "c", "d", "e", "f"])),
            6
        );
    }

    #[test]
    fn empty_script_skips_straight_to_quiz() {
        let (controller, host) = started(Script::new(Vec::new()));

        assert_eq!(controller.state(), FlowState::QuizShown);
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Quiz]);
        assert_eq!(firings_until_quiz(Script::new(Vec::new())), 0);
    }

    #[test]
    fn lines_advance_three_seconds_apart_and_quiz_waits_five() {
        let (mut controller, mut host) = started(Script::earthquake_drill());

        host.advance(&mut controller, Duration::from_millis(2999));
        assert_eq!(controller.state(), FlowState::PlayingDialogue(0));
        host.advance(&mut controller, Duration::from_millis(1));
        assert_eq!(controller.state(), FlowState::PlayingDialogue(1));

        host.advance(&mut controller, Duration::from_millis(6000));
        assert_eq!(controller.state(), FlowState::PlayingDialogue(2));
        host.advance(&mut controller, Duration::from_millis(3000));
        assert_eq!(controller.state(), FlowState::PlayingDialogue(3));

        host.advance(&mut controller, Duration::from_millis(4999));
        assert_eq!(controller.state(), FlowState::PlayingDialogue(3));
        assert_eq!(
            host.dialogue_text(),
            Some("With mindfulness and knowledge we can tackle it together!")
        );
        host.advance(&mut controller, Duration::from_millis(1));
        assert_eq!(controller.state(), FlowState::QuizShown);
        assert_eq!(host.talker, Some(TalkerPose::Quiz));
        assert_eq!(host.playing.last(), Some(&SoundCue::Question));
    }

    #[test]
    fn options_prompt_plays_three_seconds_into_quiz() {
        let (mut controller, mut host) = at_quiz();
        assert!(!host.playing.contains(&SoundCue::Options));

        let transitions = host.advance(&mut controller, Duration::from_millis(3000));
        assert_eq!(transitions.len(), 1);
        assert!(host.playing.contains(&SoundCue::Options));
        assert_eq!(controller.state(), FlowState::QuizShown);
        assert_eq!(controller.pending_timers().count(), 0);
    }

    #[test]
    fn option_one_shows_hide_consequence() {
        let (mut controller, mut host) = at_quiz();
        controller.on_option_click(QuizChoice::Hide, &mut host);

        assert_eq!(
            controller.state(),
            FlowState::ConsequenceShown(QuizChoice::Hide)
        );
        let (choice, message, image) = host.consequence().expect("consequence visible");
        assert_eq!(choice, QuizChoice::Hide);
        assert!(message.starts_with("Hiding under tables and benches will protect you"));
        assert_eq!(image, ImageKey::Hiding);
        assert_eq!(host.playing, vec![SoundCue::ConsequenceHide]);
    }

    #[test]
    fn option_two_shows_leave_consequence() {
        let (mut controller, mut host) = at_quiz();
        controller.on_option_click(
            QuizChoice::from_option_number(2).expect("second option"),
            &mut host,
        );

        let (choice, message, image) = host.consequence().expect("consequence visible");
        assert_eq!(choice, QuizChoice::Leave);
        assert_eq!(message, QuizChoice::Leave.consequence_message());
        assert_eq!(image, ImageKey::Running);
        assert_eq!(host.playing, vec![SoundCue::ConsequenceLeave]);
    }

    #[test]
    fn choosing_cancels_the_options_prompt() {
        let (mut controller, mut host) = at_quiz();
        controller.on_option_click(QuizChoice::Hide, &mut host);

        assert!(host.advance(&mut controller, Duration::from_secs(60)).is_empty());
        assert!(!host.started_sounds.contains(&SoundCue::Options));
    }

    #[test]
    fn go_back_from_consequence_returns_to_quiz() {
        for choice in QuizChoice::ALL {
            let (mut controller, mut host) = at_quiz();
            controller.on_option_click(choice, &mut host);

            let transition = controller.on_go_back(&mut host);
            assert_eq!(
                transition,
                Transition::Moved {
                    from: FlowState::ConsequenceShown(choice),
                    to: FlowState::QuizShown,
                }
            );
            assert_eq!(host.visible_kinds(), vec![ScreenKind::Quiz]);
            assert_eq!(host.playing, vec![SoundCue::Question]);
        }
    }

    #[test]
    fn go_back_from_quiz_resets_and_cancels_prompt() {
        let (mut controller, mut host) = at_quiz();
        host.advance(&mut controller, Duration::from_millis(1000));

        let transition = controller.on_go_back(&mut host);
        assert_eq!(
            transition,
            Transition::Moved {
                from: FlowState::QuizShown,
                to: FlowState::Start,
            }
        );
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Start]);
        assert_eq!(host.backdrop, Backdrop::Classroom);
        assert_eq!(host.talker, None);
        assert!(host.playing.is_empty());
        assert!(host.timers.is_empty());
        assert!(host.advance(&mut controller, Duration::from_secs(60)).is_empty());
        assert!(!host.started_sounds.contains(&SoundCue::Options));
    }

    #[test]
    fn double_reset_leaves_one_start_control() {
        let (mut controller, mut host) = at_quiz();
        controller.on_go_back(&mut host);
        controller.reset_to_start(&mut host);

        assert_eq!(controller.state(), FlowState::Start);
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Start]);
    }

    #[test]
    fn reset_mid_dialogue_cancels_the_advance_timer() {
        let (mut controller, mut host) = started(Script::earthquake_drill());
        controller.reset_to_start(&mut host);

        assert!(host.timers.is_empty());
        assert!(host.advance(&mut controller, Duration::from_secs(60)).is_empty());
        assert_eq!(controller.state(), FlowState::Start);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let (mut controller, mut host) = started(Script::earthquake_drill());
        let stale = controller.pending_timers().next().expect("advance pending");
        controller.reset_to_start(&mut host);

        let transition = controller.on_timer_fire(stale, &mut host);
        assert_eq!(
            transition,
            Transition::Ignored {
                state: FlowState::Start,
                reason: IgnoredReason::StaleTimer,
            }
        );
        assert_eq!(host.visible_kinds(), vec![ScreenKind::Start]);
    }

    #[test]
    fn clicks_for_absent_controls_are_ignored() {
        let mut controller = DialogueFlowController::default();
        let mut host = RecordingHost::default();
        controller.reset_to_start(&mut host);

        assert!(controller
            .on_option_click(QuizChoice::Hide, &mut host)
            .is_ignored());
        assert!(controller.on_go_back(&mut host).is_ignored());

        controller.on_start(&mut host);
        assert!(controller.on_start(&mut host).is_ignored());
        assert!(controller.on_go_back(&mut host).is_ignored());
        assert_eq!(controller.state(), FlowState::PlayingDialogue(0));
        assert_eq!(controller.pending_timers().count(), 1);
    }

    #[test]
    fn never_more_than_one_timer_per_slot() {
        let (mut controller, mut host) = started(Script::earthquake_drill());
        for _ in 0..4 {
            assert!(host.timers.len() <= 1);
            host.advance(&mut controller, Duration::from_millis(5000));
        }
        assert_eq!(host.timers.len(), 1);

        let mut steps = HashSet::new();
        for id in controller.pending_timers() {
            assert!(steps.insert(host.timers.step(id)));
        }
    }

    #[test]
    fn end_to_end_leave_then_back_to_quiz() {
        let (mut controller, mut host) = started(Script::earthquake_drill());
        for _ in 0..3 {
            host.advance(&mut controller, Duration::from_millis(3000));
        }
        assert_eq!(controller.state(), FlowState::PlayingDialogue(3));
        host.advance(&mut controller, Duration::from_millis(5000));
        assert_eq!(controller.state(), FlowState::QuizShown);

        controller.on_option_click(QuizChoice::Leave, &mut host);
        let (_, message, _) = host.consequence().expect("consequence visible");
        assert_eq!(
            message,
            "Trying to leave the school premises during an earthquake is extremely dangerous and increases risk of injury or death."
        );

        let lines_before = host
            .started_sounds
            .iter()
            .filter(|cue| **cue == SoundCue::Line1)
            .count();
        controller.on_go_back(&mut host);
        assert_eq!(controller.state(), FlowState::QuizShown);
        host.advance(&mut controller, Duration::from_secs(30));
        assert_eq!(controller.state(), FlowState::QuizShown);
        let lines_after = host
            .started_sounds
            .iter()
            .filter(|cue| **cue == SoundCue::Line1)
            .count();
        assert_eq!(lines_before, lines_after);
    }
}
